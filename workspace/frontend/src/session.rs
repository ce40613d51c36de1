use chrono::{Duration, Utc};
use common::session::{Session, DEFAULT_SESSION_TTL_HOURS};
use web_sys::window;
use yew::prelude::*;

const STORAGE_KEY: &str = "evdash_session";

/// Session handed to protected views, with the transitions they may trigger.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub login: Callback<(String, String, Callback<Result<(), String>>)>,
    pub logout: Callback<()>,
}

impl SessionContext {
    pub fn is_active(&self) -> bool {
        self.session.is_active(Utc::now())
    }

    pub fn user(&self) -> Option<String> {
        self.session.user().map(str::to_string)
    }
}

/// Restores the mirrored session from localStorage, dropping stale ones.
fn load_session() -> Session {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());

    match stored.map(|text| serde_json::from_str::<Session>(&text)) {
        Some(Ok(session)) => {
            let session = session.refresh(Utc::now());
            log::debug!("Restored session for {:?}", session.user());
            session
        }
        Some(Err(e)) => {
            log::warn!("Ignoring unreadable stored session: {}", e);
            Session::init()
        }
        None => Session::init(),
    }
}

fn store_session(session: &Session) {
    let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    match serde_json::to_string(session) {
        Ok(text) => {
            if storage.set_item(STORAGE_KEY, &text).is_err() {
                log::warn!("Failed to persist session");
            }
        }
        Err(e) => log::warn!("Failed to serialize session: {}", e),
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_state(load_session);

    let login = {
        let session = session.clone();
        Callback::from(
            move |(user, password, done): (String, String, Callback<Result<(), String>>)| {
                match session.authenticate(
                    &user,
                    &password,
                    Utc::now(),
                    Duration::hours(DEFAULT_SESSION_TTL_HOURS),
                ) {
                    Ok(next) => {
                        store_session(&next);
                        session.set(next);
                        done.emit(Ok(()));
                    }
                    Err(e) => {
                        log::warn!("Login rejected: {}", e);
                        done.emit(Err(e.to_string()));
                    }
                }
            },
        )
    };

    let logout = {
        let session = session.clone();
        Callback::from(move |_| {
            let next = session.expire();
            store_session(&next);
            session.set(next);
        })
    };

    let context = SessionContext {
        session: (*session).clone(),
        login,
        logout,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
