use common::ForecastResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModelStatsProps {
    pub result: ForecastResult,
}

fn metric_text(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.3}{}", v, suffix),
        _ => "n/a".to_string(),
    }
}

#[function_component(ModelStats)]
pub fn model_stats(props: &ModelStatsProps) -> Html {
    let result = &props.result;
    let metrics = result.metrics.unwrap_or_default();

    html! {
        <div class="flex flex-col gap-3 mb-6">
            <div class="flex flex-wrap gap-2">
                if let Some(model_id) = &result.model_id {
                    <span class="badge badge-primary badge-outline">{model_id}</span>
                }
                if let Some(order) = result.order {
                    <span class="badge badge-ghost">{format!("order {}", order)}</span>
                }
                if let Some(seasonal) = result.seasonal_order {
                    <span class="badge badge-ghost">{format!("seasonal {}", seasonal)}</span>
                }
                if let Some(horizon) = result.horizon {
                    <span class="badge badge-ghost">{format!("horizon {}", horizon)}</span>
                }
            </div>

            if result.metrics.is_some() {
                <div class="stats shadow w-full bg-base-100">
                    <div class="stat">
                        <div class="stat-title">{"MAE"}</div>
                        <div class="stat-value text-primary text-2xl">{metric_text(metrics.mae, "")}</div>
                        <div class="stat-desc">{"Mean absolute error"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">{"RMSE"}</div>
                        <div class="stat-value text-secondary text-2xl">{metric_text(metrics.rmse, "")}</div>
                        <div class="stat-desc">{"Root mean squared error"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">{"MAPE"}</div>
                        <div class="stat-value text-accent text-2xl">{metric_text(metrics.mape, "%")}</div>
                        <div class="stat-desc">{"Mean absolute percentage error"}</div>
                    </div>
                </div>
            } else {
                <div class="alert">
                    <i class="fas fa-info-circle"></i>
                    <span>{"No validation split, accuracy metrics unavailable."}</span>
                </div>
            }
        </div>
    }
}
