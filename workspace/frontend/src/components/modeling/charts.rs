use common::{ForecastCharts, ForecastResult};
use yew::prelude::*;
use crate::components::charts::PlotlyChart;
use super::traces::{forecast_traces, overlay_traces, time_layout};

#[derive(Properties, PartialEq)]
pub struct ForecastChartsViewProps {
    pub charts: ForecastCharts,
    /// Y axis label, e.g. the metric name
    pub y_title: AttrValue,
}

#[function_component(ForecastChartsView)]
pub fn forecast_charts_view(props: &ForecastChartsViewProps) -> Html {
    let charts = &props.charts;

    html! {
        <div class="grid grid-cols-1 gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Actual vs predicted"}</h3>
                    if charts.overlay.is_empty() {
                        <p class="text-gray-500">{"No points in the selected window."}</p>
                    } else {
                        <PlotlyChart
                            div_id="overlay-chart"
                            traces={overlay_traces(&charts.overlay)}
                            layout={time_layout(&props.y_title)}
                        />
                    }
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Forecast"}</h3>
                    if charts.forecast.is_empty() {
                        <p class="text-gray-500">{"No points in the selected window."}</p>
                    } else {
                        <PlotlyChart
                            div_id="forecast-chart"
                            traces={forecast_traces(&charts.forecast)}
                            layout={time_layout(&props.y_title)}
                        />
                    }
                </div>
            </div>
        </div>
    }
}

/// Label for the y axis of a result's charts.
pub fn y_title(result: &ForecastResult) -> String {
    result
        .metric
        .map(|m| m.label().to_string())
        .unwrap_or_else(|| "Value".to_string())
}
