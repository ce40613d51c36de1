use common::ingest::IngestPayload;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use crate::api_client::data::{ingest_json, upload_csv};
use crate::common::toast::ToastContext;

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(message).is_err() {
            log::warn!("Failed to show alert: {}", message);
        }
    }
}

/// CSV upload and pasted ACN JSON ingestion.
#[function_component(Upload)]
pub fn upload() -> Html {
    let toast_ctx = use_context::<ToastContext>();
    let file_ref = use_node_ref();
    let pasted = use_state(String::new);
    let uploading = use_state(|| false);
    let ingesting = use_state(|| false);

    let on_upload = {
        let file_ref = file_ref.clone();
        let uploading = uploading.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(file) = file_ref
                .cast::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_warning("Choose a CSV file first".to_string());
                }
                return;
            };

            let uploading = uploading.clone();
            let toast_ctx = toast_ctx.clone();
            uploading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = upload_csv(file).await.map(|receipt| {
                    format!("Uploaded {} rows", receipt.rows.unwrap_or(0))
                });
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_outcome(outcome);
                }
                uploading.set(false);
            });
        })
    };

    let on_paste = {
        let pasted = pasted.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                pasted.set(area.value());
            }
        })
    };

    let on_ingest = {
        let pasted = pasted.clone();
        let ingesting = ingesting.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let payload = match IngestPayload::parse(&pasted) {
                Ok(payload) => payload,
                Err(err) => {
                    log::warn!("Pasted data rejected: {}", err);
                    alert("Invalid format: expected a JSON object with an _items array");
                    return;
                }
            };

            let ingesting = ingesting.clone();
            let toast_ctx = toast_ctx.clone();
            ingesting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = ingest_json(payload).await.map(|receipt| {
                    format!(
                        "Ingested {} rows ({} columns)",
                        receipt.rows.unwrap_or(0),
                        receipt.columns.len()
                    )
                });
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_outcome(outcome);
                }
                ingesting.set(false);
            });
        })
    };

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
            <form class="card bg-base-100 shadow" onsubmit={on_upload}>
                <div class="card-body">
                    <h2 class="card-title"><i class="fas fa-file-csv"></i>{" Upload CSV"}</h2>
                    <p class="text-sm text-gray-500">
                        {"Charging sessions with connection and disconnection times, site and delivered energy."}
                    </p>
                    <input
                        ref={file_ref}
                        type="file"
                        accept=".csv,text/csv"
                        class="file-input file-input-bordered w-full mt-4"
                    />
                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary" disabled={*uploading}>
                            if *uploading {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {"Upload"}
                        </button>
                    </div>
                </div>
            </form>

            <form class="card bg-base-100 shadow" onsubmit={on_ingest}>
                <div class="card-body">
                    <h2 class="card-title"><i class="fas fa-code"></i>{" Paste ACN JSON"}</h2>
                    <p class="text-sm text-gray-500">
                        {"An API export such as "}<code>{"{\"_meta\": {...}, \"_items\": [...]}"}</code>
                    </p>
                    <textarea
                        class="textarea textarea-bordered font-mono text-xs h-64 mt-4"
                        placeholder="{\"_items\": []}"
                        value={(*pasted).clone()}
                        oninput={on_paste}
                    />
                    <div class="card-actions justify-end mt-4">
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled={*ingesting || pasted.trim().is_empty()}
                        >
                            if *ingesting {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {"Ingest"}
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
