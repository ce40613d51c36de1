use common::{Diagnostics, DiagnosticsQuery, Frequency, Metric};
use yew::prelude::*;
use crate::api_client::forecast::get_diagnostics;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::charts::PlotlyChart;
use super::traces::{correlation_traces, lag_layout};

#[derive(Properties, PartialEq)]
pub struct DiagnosticsPanelProps {
    pub metric: Metric,
    pub freq: Frequency,
    #[prop_or_default]
    pub site: Option<String>,
}

/// ACF and PACF of the aggregated series the model is fitted on.
#[function_component(DiagnosticsPanel)]
pub fn diagnostics_panel(props: &DiagnosticsPanelProps) -> Html {
    let query = DiagnosticsQuery {
        metric: props.metric,
        freq: props.freq,
        site: props.site.clone(),
        ..Default::default()
    };

    let request = query.clone();
    let (state, refetch) =
        use_fetch_with_refetch(query.clone(), move || get_diagnostics(request.clone()));

    let nlags = query.nlags;
    let render = Callback::from(move |diagnostics: Diagnostics| {
        let band = diagnostics.confidence_band();
        html! {
            <div class="grid grid-cols-1 xl:grid-cols-2 gap-4">
                <div>
                    <h4 class="font-semibold mb-2">{"Autocorrelation (ACF)"}</h4>
                    <PlotlyChart
                        div_id="acf-chart"
                        traces={correlation_traces("ACF", &diagnostics.acf_points(), band)}
                        layout={lag_layout()}
                        height={280}
                    />
                </div>
                <div>
                    <h4 class="font-semibold mb-2">{"Partial autocorrelation (PACF)"}</h4>
                    <PlotlyChart
                        div_id="pacf-chart"
                        traces={correlation_traces("PACF", &diagnostics.pacf_points(), band)}
                        layout={lag_layout()}
                        height={280}
                    />
                </div>
                if let Some(n) = diagnostics.series_length {
                    <p class="text-sm text-gray-500 xl:col-span-2">
                        {format!("{} observations, {} lags", n, diagnostics.lags.unwrap_or(nlags))}
                    </p>
                }
            </div>
        }
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">{"Diagnostics"}</h3>
                <FetchRender<Diagnostics>
                    state={(*state).clone()}
                    render={render}
                    on_retry={Some(refetch)}
                    loading_text={Some("Computing correlations...".to_string())}
                />
            </div>
        </div>
    }
}
