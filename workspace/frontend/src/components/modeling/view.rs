use common::export::{forecast_csv, FORECAST_CSV_FILE_NAME};
use common::{DisplayWindow, ForecastCharts, ForecastRequest, ForecastResult};
use yew::prelude::*;
use crate::api_client::forecast::run_forecast;
use crate::common::download::download_text;
use crate::common::toast::ToastContext;
use super::charts::{y_title, ForecastChartsView};
use super::config_form::ConfigForm;
use super::diagnostics::DiagnosticsPanel;
use super::stats::ModelStats;
use super::window_controls::WindowControls;

#[function_component(Modeling)]
pub fn modeling() -> Html {
    let toast_ctx = use_context::<ToastContext>();
    let request = use_state(ForecastRequest::default);
    let busy = use_state(|| false);
    // last response to resolve wins
    let result = use_state(|| None::<ForecastResult>);
    let window = use_state(DisplayWindow::full);

    let on_request_change = {
        let request = request.clone();
        Callback::from(move |next: ForecastRequest| request.set(next))
    };

    let on_run = {
        let request = request.clone();
        let busy = busy.clone();
        let result = result.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_| {
            let request = (*request).clone();
            let busy = busy.clone();
            let result = result.clone();
            let toast_ctx = toast_ctx.clone();

            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match run_forecast(request).await {
                    Ok(fitted) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success(format!(
                                "Forecast ready: {}",
                                fitted.model_id.as_deref().unwrap_or("model fitted")
                            ));
                        }
                        result.set(Some(fitted));
                    }
                    Err(e) => {
                        log::error!("Forecast failed: {}", e);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(e);
                        }
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_window_change = {
        let window = window.clone();
        Callback::from(move |next: DisplayWindow| window.set(next))
    };

    let on_download = {
        let result = result.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_| {
            let Some(current) = (*result).as_ref() else {
                return;
            };
            let outcome = forecast_csv(&current.forecast)
                .map_err(|e| e.to_string())
                .and_then(|csv| {
                    download_text(FORECAST_CSV_FILE_NAME, "text/csv", &csv)
                        .map_err(|e| format!("Download failed: {:?}", e))
                })
                .map(|_| format!("Saved {}", FORECAST_CSV_FILE_NAME));
            if let Err(e) = &outcome {
                log::error!("Forecast export failed: {}", e);
            }
            if let Some(toast_ctx) = &toast_ctx {
                toast_ctx.show_outcome(outcome);
            }
        })
    };

    let charts = ForecastCharts::from_result((*result).as_ref()).windowed(&window);

    html! {
        <div class="grid grid-cols-1 xl:grid-cols-3 gap-6">
            <div class="xl:col-span-1 flex flex-col gap-6">
                <ConfigForm
                    request={(*request).clone()}
                    on_change={on_request_change}
                    on_submit={on_run}
                    busy={*busy}
                />
                <DiagnosticsPanel metric={request.metric} freq={request.freq} site={request.site.clone()} />
            </div>

            <div class="xl:col-span-2 flex flex-col gap-6">
                {match (*result).as_ref() {
                    Some(current) => html! {
                        <>
                            <ModelStats result={current.clone()} />
                            <div class="flex flex-wrap justify-between items-end gap-4">
                                <WindowControls window={*window} on_change={on_window_change} />
                                <button
                                    class="btn btn-outline btn-sm"
                                    onclick={on_download}
                                    disabled={current.forecast.is_empty()}
                                >
                                    <i class="fas fa-file-csv"></i>
                                    {" Download CSV"}
                                </button>
                            </div>
                            <ForecastChartsView charts={charts} y_title={y_title(current)} />
                        </>
                    },
                    None => html! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center py-16">
                                <i class="fas fa-chart-line text-4xl text-gray-400"></i>
                                <p class="text-gray-500">
                                    {"Configure the model and run a forecast to see results."}
                                </p>
                            </div>
                        </div>
                    },
                }}
            </div>
        </div>
    }
}
