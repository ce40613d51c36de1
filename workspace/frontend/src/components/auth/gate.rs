use yew::prelude::*;
use yew_router::prelude::*;
use crate::session::SessionContext;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct AuthGateProps {
    pub children: Children,
}

/// Renders the children only for an active session, otherwise sends the user to login.
#[function_component(AuthGate)]
pub fn auth_gate(props: &AuthGateProps) -> Html {
    let session = use_context::<SessionContext>();

    match session {
        Some(session) if session.is_active() => html! { <>{props.children.clone()}</> },
        _ => {
            log::debug!("No active session, redirecting to login");
            html! { <Redirect<Route> to={Route::Login} /> }
        }
    }
}
