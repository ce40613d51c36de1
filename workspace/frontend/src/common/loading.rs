use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<String>,
}

/// Spinner shown while a request is in flight.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center gap-3 py-10" role="status">
            <span class="loading loading-dots loading-lg text-primary"></span>
            if let Some(text) = &props.text {
                <p class="text-sm opacity-70">{text}</p>
            }
        </div>
    }
}
