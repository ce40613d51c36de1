use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod session;
pub mod settings;

use crate::common::toast::ToastProvider;
use components::auth::{AuthGate, Login};
use components::data::{CleanData, RawData};
use components::layout::layout::Layout;
use components::modeling::Modeling;
use components::settings::Settings;
use components::upload::Upload;
use session::SessionProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Home,
    #[at("/raw")]
    RawData,
    #[at("/clean")]
    CleanData,
    #[at("/modeling")]
    Modeling,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn protected(title: &str, page: Html) -> Html {
    html! {
        <AuthGate>
            <Layout title={title.to_string()}>{page}</Layout>
        </AuthGate>
    }
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Login => html! { <Login /> },
        Route::Home => protected("Upload data", html! { <Upload /> }),
        Route::RawData => protected("Raw data", html! { <RawData /> }),
        Route::CleanData => protected("Cleaned data", html! { <CleanData /> }),
        Route::Modeling => protected("Modeling", html! { <Modeling /> }),
        Route::Settings => protected("Settings", html! { <Settings /> }),
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! {
                <div class="min-h-screen flex flex-col items-center justify-center gap-4 bg-base-200">
                    <h1 class="text-4xl font-bold">{"404"}</h1>
                    <p>{"This page does not exist."}</p>
                    <Link<Route> to={Route::Home} classes="btn btn-primary">{"Back to upload"}</Link<Route>>
                </div>
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <SessionProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </SessionProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== EV Demand Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
