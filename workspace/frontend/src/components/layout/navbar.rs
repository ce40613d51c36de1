use yew::prelude::*;
use crate::api_client::data::health;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::hooks::FetchState;
use crate::session::SessionContext;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let session = use_context::<SessionContext>();
    let (service, recheck) = use_fetch_with_refetch((), health);

    let status = match &*service {
        FetchState::Success(h) => html! {
            <span class="badge badge-success gap-1">
                <i class="fas fa-circle text-[0.5rem]"></i>
                {h.status.clone().unwrap_or_else(|| "ok".to_string())}
            </span>
        },
        FetchState::Error(_) => html! {
            <span class="badge badge-error gap-1 cursor-pointer" onclick={recheck.reform(|_: MouseEvent| ())}>
                <i class="fas fa-circle text-[0.5rem]"></i>{"offline"}
            </span>
        },
        _ => html! { <span class="loading loading-dots loading-xs"></span> },
    };

    let user_menu = match session {
        Some(session) => {
            let logout = session.logout.reform(|_: MouseEvent| ());
            html! {
                <div class="flex items-center gap-2">
                    <span class="text-sm hidden md:inline">
                        <i class="fas fa-user mr-1"></i>
                        {session.user().unwrap_or_default()}
                    </span>
                    <button class="btn btn-ghost btn-sm" onclick={logout}>
                        <i class="fas fa-right-from-bracket"></i>
                        {" Logout"}
                    </button>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="my-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-4">
                {status}
                {user_menu}
            </div>
        </div>
    }
}
