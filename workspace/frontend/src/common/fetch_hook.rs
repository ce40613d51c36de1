use yew::prelude::*;
use std::future::Future;
use std::rc::Rc;
use crate::hooks::FetchState;
use crate::common::toast::ToastContext;

/// Fetches on mount and whenever `deps` change; the returned callback refetches.
///
/// Requests are not fenced: when several are in flight the last one to
/// resolve decides the state.
#[hook]
pub fn use_fetch_with_refetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    D: PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let latest_fn = use_mut_ref(|| None::<Rc<F>>);
    *latest_fn.borrow_mut() = Some(Rc::new(fetch_fn));

    let refetch = {
        let fetch_state = fetch_state.clone();
        let latest_fn = latest_fn.clone();

        use_callback((), move |_, _| {
            let Some(fetch_fn) = latest_fn.borrow().clone() else {
                return;
            };
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();

            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                match (*fetch_fn)().await {
                    Ok(data) => fetch_state.set(FetchState::Success(data)),
                    Err(err) => {
                        fetch_state.set(FetchState::Error(err.clone()));
                        if let Some(toast_ctx) = toast_ctx {
                            toast_ctx.show_error(err);
                        }
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
