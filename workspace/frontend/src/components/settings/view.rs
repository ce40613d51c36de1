use log::Level;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use crate::api_client::data::health_at;
use crate::common::toast::ToastContext;
use crate::settings::{self, AppSettings};

const LEVELS: [Level; 5] = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace];

#[function_component(Settings)]
pub fn settings() -> Html {
    let toast_ctx = use_context::<ToastContext>();
    let draft = use_state(settings::get_settings);
    let checking = use_state(|| false);

    let edit = |apply: fn(&mut AppSettings, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .or_else(|| e.target_dyn_into::<HtmlSelectElement>().map(|select| select.value()));
            if let Some(value) = value {
                let mut next = (*draft).clone();
                apply(&mut next, value);
                draft.set(next);
            }
        })
    };

    let on_host = edit(|s, v| s.api_host = v.trim().to_string());
    let on_port = edit(|s, v| {
        if let Ok(port) = v.trim().parse::<u16>() {
            s.api_port = port;
        }
    });
    let on_path = edit(|s, v| s.api_path = v.trim().to_string());
    let on_level = edit(|s, v| {
        if let Some(level) = LEVELS.iter().find(|l| l.as_str().eq_ignore_ascii_case(&v)) {
            s.log_level = *level;
        }
    });
    let on_limit = edit(|s, v| {
        if let Ok(limit) = v.trim().parse::<u32>() {
            s.preview_limit = limit.max(1);
        }
    });

    let on_https = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.api_use_https = input.checked();
                draft.set(next);
            }
        })
    };

    let on_save = {
        let draft = draft.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_| {
            let next = (*draft).clone();
            let outcome = next
                .save_to_storage()
                .map(|_| format!("Saved, requests now go to {}", next.api_base_url()))
                .map_err(|e| format!("Failed to save settings: {:?}", e));
            if outcome.is_ok() {
                log::set_max_level(next.log_level.to_level_filter());
                settings::update_settings(|s| *s = next.clone());
            }
            if let Some(toast_ctx) = &toast_ctx {
                toast_ctx.show_outcome(outcome);
            }
        })
    };

    let on_check = {
        let draft = draft.clone();
        let checking = checking.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_| {
            let base_url = draft.api_base_url();
            let checking = checking.clone();
            let toast_ctx = toast_ctx.clone();

            checking.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = health_at(&base_url)
                    .await
                    .map(|h| format!("Service is {}", h.status.unwrap_or_else(|| "up".to_string())));
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_outcome(outcome);
                }
                checking.set(false);
            });
        })
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Forecast service"}</h2>
                    <div class="grid grid-cols-3 gap-3 mt-4">
                        <label class="form-control col-span-2">
                            <div class="label"><span class="label-text">{"Host"}</span></div>
                            <input type="text" class="input input-bordered w-full"
                                value={draft.api_host.clone()} onchange={on_host} />
                        </label>
                        <label class="form-control">
                            <div class="label"><span class="label-text">{"Port"}</span></div>
                            <input type="number" min="1" max="65535" class="input input-bordered w-full"
                                value={draft.api_port.to_string()} onchange={on_port} />
                        </label>
                    </div>
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Path prefix"}</span></div>
                        <input type="text" placeholder="/api" class="input input-bordered w-full"
                            value={draft.api_path.clone()} onchange={on_path} />
                    </label>
                    <label class="label cursor-pointer justify-start gap-3 mt-2">
                        <input type="checkbox" class="toggle toggle-primary"
                            checked={draft.api_use_https} onchange={on_https} />
                        <span class="label-text">{"Use HTTPS"}</span>
                    </label>
                    <p class="text-sm text-gray-500 font-mono">{draft.api_base_url()}</p>
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-outline" onclick={on_check} disabled={*checking}>
                            if *checking {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {"Test connection"}
                        </button>
                        <button class="btn btn-primary" onclick={on_save.clone()}>{"Save"}</button>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Display"}</h2>
                    <label class="form-control w-full mt-4">
                        <div class="label"><span class="label-text">{"Preview rows"}</span></div>
                        <input type="number" min="1" class="input input-bordered w-full"
                            value={draft.preview_limit.to_string()} onchange={on_limit} />
                    </label>
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Log level"}</span></div>
                        <select class="select select-bordered w-full" onchange={on_level}>
                            {for LEVELS.iter().map(|l| html! {
                                <option value={l.as_str()} selected={*l == draft.log_level}>{l.as_str()}</option>
                            })}
                        </select>
                    </label>
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-primary" onclick={on_save}>{"Save"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
