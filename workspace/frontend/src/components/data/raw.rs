use common::DataPreview;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use crate::api_client::data::get_raw_preview;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::settings;
use super::table::DataTable;

const LIMITS: [u32; 4] = [50, 100, 500, 1000];

#[derive(Properties, PartialEq)]
struct PreviewCardProps {
    title: AttrValue,
    filled: bool,
    limit: u32,
}

#[function_component(PreviewCard)]
fn preview_card(props: &PreviewCardProps) -> Html {
    let filled = props.filled;
    let limit = props.limit;
    let (state, refetch) =
        use_fetch_with_refetch((filled, limit), move || get_raw_preview(filled, limit));

    let render = Callback::from(|(preview, message): (DataPreview, Option<String>)| {
        let (columns, rows) = preview.table();
        html! {
            <>
                <div class="flex flex-wrap gap-2 mb-3">
                    if let Some(total) = preview.total_rows {
                        <span class="badge badge-primary badge-outline">{format!("{} rows", total)}</span>
                    }
                    <span class="badge badge-ghost">{format!("{} columns", columns.len())}</span>
                    if let Some(source) = &preview.source {
                        <span class="badge badge-ghost">{source}</span>
                    }
                </div>
                if let Some(message) = message {
                    <p class="text-sm text-gray-500 mb-2">{message}</p>
                }
                <DataTable {columns} {rows} empty_text={Some(AttrValue::from("No data uploaded yet."))} />
            </>
        }
    });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">{props.title.clone()}</h3>
                <FetchRender<(DataPreview, Option<String>)>
                    state={(*state).clone()}
                    render={render}
                    on_retry={Some(refetch)}
                />
            </div>
        </div>
    }
}

/// Raw upload next to its forward-filled variant.
#[function_component(RawData)]
pub fn raw_data() -> Html {
    let limit = use_state(|| settings::get_settings().preview_limit);

    let on_limit = {
        let limit = limit.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<u32>().ok())
            {
                log::debug!("Preview limit changed to {}", value);
                limit.set(value);
            }
        })
    };

    html! {
        <>
            <div class="flex justify-end items-center gap-2 mb-6">
                <span class="text-sm">{"Rows"}</span>
                <select class="select select-bordered select-sm" onchange={on_limit}>
                    {for LIMITS.iter().map(|l| html! {
                        <option value={l.to_string()} selected={*l == *limit}>{l}</option>
                    })}
                    if !LIMITS.contains(&*limit) {
                        <option value={limit.to_string()} selected=true>{*limit}</option>
                    }
                </select>
            </div>
            <div class="grid grid-cols-1 gap-6">
                <PreviewCard title="Raw data" filled={false} limit={*limit} />
                <PreviewCard title="Forward-filled data" filled={true} limit={*limit} />
            </div>
        </>
    }
}
