use std::rc::Rc;

use yew::prelude::*;

use crate::settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

#[derive(Default, PartialEq)]
struct ToastQueue {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Push(Toast),
    Dismiss(usize),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(Self { toasts })
    }
}

/// Handle for raising toasts from any component below `ToastProvider`.
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    add_toast: Callback<(String, ToastType)>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.add_toast.emit((message, ToastType::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }

    /// Shows `Ok` messages as success and `Err` messages as errors.
    pub fn show_outcome(&self, outcome: Result<String, String>) {
        match outcome {
            Ok(message) => self.show_success(message),
            Err(message) => self.show_error(message),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let next_id = use_mut_ref(|| 0usize);

    let add_toast = {
        let queue = queue.clone();
        Callback::from(move |(message, toast_type): (String, ToastType)| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            queue.dispatch(ToastAction::Push(Toast {
                id,
                message,
                toast_type,
            }));

            let queue = queue.clone();
            let duration_ms = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration_ms, move || {
                queue.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    let context = ToastContext { add_toast };

    html! {
        <ContextProvider<ToastContext> {context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let queue = queue.clone();
                        Callback::from(move |_| queue.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
