use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use crate::session::SessionContext;
use crate::Route;

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);

    let bind = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                field.set(input.value());
            }
        })
    };
    let on_username = bind(&username);
    let on_password = bind(&password);

    let onsubmit = {
        let session = session.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(session) = &session else {
                log::error!("Login rendered without a session provider");
                return;
            };

            let error = error.clone();
            let navigator = navigator.clone();
            let done = Callback::from(move |outcome: Result<(), String>| match outcome {
                Ok(()) => {
                    error.set(None);
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Home);
                    }
                }
                Err(message) => error.set(Some(message)),
            });
            session.login.emit(((*username).clone(), (*password).clone(), done));
        })
    };

    if session.as_ref().is_some_and(SessionContext::is_active) {
        return html! { <Redirect<Route> to={Route::Home} /> };
    }

    let expired = session
        .as_ref()
        .is_some_and(|s| !s.is_active() && s.user().is_some());

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <form class="card bg-base-100 shadow-xl w-full max-w-sm" {onsubmit}>
                <div class="card-body">
                    <div class="flex items-center gap-3 mb-4">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content text-xl">
                            <i class="fas fa-charging-station"></i>
                        </div>
                        <h1 class="text-2xl font-bold">{"EV Demand"}</h1>
                    </div>

                    if expired {
                        <div role="alert" class="alert alert-warning text-sm">
                            <span>{"Your session has ended, please sign in again."}</span>
                        </div>
                    }
                    if let Some(message) = &*error {
                        <div role="alert" class="alert alert-error text-sm">
                            <span>{message}</span>
                        </div>
                    }

                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Username"}</span></div>
                        <input type="text" autocomplete="username" class="input input-bordered w-full"
                            value={(*username).clone()} oninput={on_username} />
                    </label>
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Password"}</span></div>
                        <input type="password" autocomplete="current-password" class="input input-bordered w-full"
                            value={(*password).clone()} oninput={on_password} />
                    </label>
                    <div class="card-actions mt-4">
                        <button type="submit" class="btn btn-primary w-full">{"Sign in"}</button>
                    </div>
                </div>
            </form>
        </div>
    }
}
