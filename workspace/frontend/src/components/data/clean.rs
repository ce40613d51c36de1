use common::{AggregatedSeries, CleanedPreview, Frequency};
use serde_json::{json, Value};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use crate::api_client::data::{get_cleaned_preview, get_series};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::charts::PlotlyChart;
use crate::settings;
use super::table::DataTable;

fn series_traces(series: &AggregatedSeries) -> Value {
    let ts: Vec<&str> = series.series.iter().map(|p| p.ts.as_str()).collect();
    let energy: Vec<Option<f64>> = series.series.iter().map(|p| p.energy_kwh).collect();
    let sessions: Vec<Option<u64>> = series.series.iter().map(|p| p.sessions).collect();

    json!([
        {"type": "scatter", "mode": "lines", "name": "Energy (kWh)", "x": ts, "y": energy},
        {"type": "bar", "name": "Sessions", "x": ts, "y": sessions, "yaxis": "y2", "opacity": 0.4},
    ])
}

fn series_layout() -> Value {
    json!({
        "margin": {"t": 20, "r": 60, "b": 50, "l": 60},
        "xaxis": {"type": "date"},
        "yaxis": {"title": {"text": "kWh"}},
        "yaxis2": {"title": {"text": "Sessions"}, "overlaying": "y", "side": "right"},
        "legend": {"orientation": "h"},
    })
}

#[derive(Properties, PartialEq)]
struct CleanedViewProps {
    site: Option<String>,
    freq: Frequency,
}

#[function_component(CleanedView)]
fn cleaned_view(props: &CleanedViewProps) -> Html {
    let limit = settings::get_settings().preview_limit;
    let freq = props.freq;
    let cleaned_site = props.site.clone();
    let series_site = props.site.clone();

    let (cleaned, refetch_cleaned) = use_fetch_with_refetch(
        (props.site.clone(), freq),
        move || get_cleaned_preview(cleaned_site.clone(), freq, limit),
    );
    let (series, refetch_series) = use_fetch_with_refetch(
        (props.site.clone(), freq),
        move || get_series(series_site.clone(), freq),
    );

    let render_cleaned = Callback::from(|cleaned: CleanedPreview| {
        let (columns, rows) = cleaned.table();
        let null_counts = cleaned.null_counts_desc();
        html! {
            <>
                if let Some(summary) = &cleaned.summary {
                    <div class="alert alert-info mb-4">
                        <i class="fas fa-circle-info"></i>
                        <span>{summary}</span>
                    </div>
                }
                <div class="grid grid-cols-1 xl:grid-cols-4 gap-6">
                    <div>
                        <h4 class="font-semibold mb-2">{"Missing values"}</h4>
                        <table class="table table-xs">
                            <tbody>
                                {for null_counts.iter().map(|(column, count)| html! {
                                    <tr>
                                        <td>{column}</td>
                                        <td class={classes!("text-right", (*count > 0).then_some("text-warning"))}>{count}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                    <div class="xl:col-span-3">
                        <h4 class="font-semibold mb-2">{"Cleaned preview"}</h4>
                        <DataTable {columns} {rows} />
                    </div>
                </div>
            </>
        }
    });

    let render_series = Callback::from(|series: AggregatedSeries| {
        if series.series.is_empty() {
            return html! { <p class="text-gray-500">{"No aggregated points."}</p> };
        }
        html! {
            <PlotlyChart div_id="series-chart" traces={series_traces(&series)} layout={series_layout()} />
        }
    });

    html! {
        <div class="grid grid-cols-1 gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Aggregated series"}</h3>
                    <FetchRender<AggregatedSeries>
                        state={(*series).clone()}
                        render={render_series}
                        on_retry={Some(refetch_series)}
                    />
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Cleaned data"}</h3>
                    <FetchRender<CleanedPreview>
                        state={(*cleaned).clone()}
                        render={render_cleaned}
                        on_retry={Some(refetch_cleaned)}
                    />
                </div>
            </div>
        </div>
    }
}

/// Site and frequency selection for the cleaned, aggregated data.
#[function_component(CleanData)]
pub fn clean_data() -> Html {
    let site = use_state(|| None::<String>);
    let freq = use_state(|| Frequency::Hourly);

    let on_site = {
        let site = site.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let value = input.value().trim().to_string();
                site.set((!value.is_empty()).then_some(value));
            }
        })
    };

    let on_freq = {
        let freq = freq.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<Frequency>().ok())
            {
                freq.set(value);
            }
        })
    };

    html! {
        <>
            <div class="flex flex-wrap justify-end items-end gap-4 mb-6">
                <label class="form-control w-56">
                    <div class="label"><span class="label-text">{"Site"}</span></div>
                    <input
                        type="text"
                        placeholder="all sites"
                        class="input input-bordered input-sm"
                        value={(*site).clone().unwrap_or_default()}
                        onchange={on_site}
                    />
                </label>
                <label class="form-control w-40">
                    <div class="label"><span class="label-text">{"Frequency"}</span></div>
                    <select class="select select-bordered select-sm" onchange={on_freq}>
                        {for Frequency::ALL.iter().map(|f| html! {
                            <option value={f.as_str()} selected={*f == *freq}>{f.label()}</option>
                        })}
                    </select>
                </label>
            </div>
            <CleanedView site={(*site).clone()} freq={*freq} />
        </>
    }
}
