use common::DisplayWindow;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

const STRIDES: [usize; 5] = [1, 2, 4, 8, 24];

#[derive(Properties, PartialEq)]
pub struct WindowControlsProps {
    pub window: DisplayWindow,
    pub on_change: Callback<DisplayWindow>,
}

/// Trailing-percentage slider and downsample stride for both charts.
#[function_component(WindowControls)]
pub fn window_controls(props: &WindowControlsProps) -> Html {
    let window = props.window;

    let on_percent = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(percent) = e
                .target_dyn_into::<HtmlInputElement>()
                .and_then(|input| input.value().parse::<f64>().ok())
            {
                on_change.emit(DisplayWindow::new(percent, window.stride));
            }
        })
    };

    let on_stride = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(stride) = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<usize>().ok())
            {
                let stride = (stride > 1).then_some(stride);
                on_change.emit(DisplayWindow::new(window.percent, stride));
            }
        })
    };

    let current_stride = window.stride.unwrap_or(1);

    html! {
        <div class="flex flex-wrap items-end gap-6">
            <label class="form-control w-64">
                <div class="label">
                    <span class="label-text">{"Visible window"}</span>
                    <span class="label-text-alt">{format!("last {:.0}%", window.percent)}</span>
                </div>
                <input
                    type="range"
                    min="0"
                    max="100"
                    step="5"
                    class="range range-primary range-sm"
                    value={format!("{}", window.percent)}
                    oninput={on_percent}
                />
            </label>
            <label class="form-control w-40">
                <div class="label"><span class="label-text">{"Downsample"}</span></div>
                <select class="select select-bordered select-sm" onchange={on_stride}>
                    {for STRIDES.iter().map(|s| html! {
                        <option value={s.to_string()} selected={*s == current_stride}>
                            {if *s == 1 { "every point".to_string() } else { format!("every {}th", s) }}
                        </option>
                    })}
                </select>
            </label>
        </div>
    }
}
