use common::{ForecastRequest, Frequency, Metric, ModelOrder, SeasonalOrder};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfigFormProps {
    pub request: ForecastRequest,
    pub on_change: Callback<ForecastRequest>,
    pub on_submit: Callback<()>,
    pub busy: bool,
}

fn input_value(e: &Event) -> Option<String> {
    e.target_dyn_into::<HtmlInputElement>().map(|input| input.value())
}

fn select_value(e: &Event) -> Option<String> {
    e.target_dyn_into::<HtmlSelectElement>().map(|select| select.value())
}

/// Numeric field bound to one `u32` of the request.
fn number_field(
    label: &str,
    value: u32,
    min: u32,
    request: &ForecastRequest,
    on_change: &Callback<ForecastRequest>,
    apply: fn(&mut ForecastRequest, u32),
) -> Html {
    let onchange = {
        let request = request.clone();
        let on_change = on_change.clone();
        Callback::from(move |e: Event| {
            let Some(parsed) = input_value(&e).and_then(|v| v.trim().parse::<u32>().ok()) else {
                log::debug!("Ignoring non-numeric input");
                return;
            };
            let mut next = request.clone();
            apply(&mut next, parsed);
            on_change.emit(next);
        })
    };

    html! {
        <label class="form-control w-full">
            <div class="label"><span class="label-text">{label}</span></div>
            <input
                type="number"
                min={min.to_string()}
                class="input input-bordered input-sm w-full"
                value={value.to_string()}
                {onchange}
            />
        </label>
    }
}

/// Parses comma separated integers, e.g. `1,1,1`.
fn parse_orders(text: &str) -> Option<Vec<u32>> {
    text.split(',').map(|part| part.trim().parse::<u32>().ok()).collect()
}

#[function_component(ConfigForm)]
pub fn config_form(props: &ConfigFormProps) -> Html {
    let request = &props.request;

    let on_site = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut next = request.clone();
            next.site = input_value(&e).filter(|v| !v.trim().is_empty());
            on_change.emit(next);
        })
    };

    let on_metric = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(metric) = select_value(&e).and_then(|v| v.parse::<Metric>().ok()) {
                let mut next = request.clone();
                next.metric = metric;
                on_change.emit(next);
            }
        })
    };

    let on_freq = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(freq) = select_value(&e).and_then(|v| v.parse::<Frequency>().ok()) {
                let mut next = request.clone();
                next.freq = freq;
                next.seasonal_period = freq.natural_season();
                on_change.emit(next);
            }
        })
    };

    let on_auto_grid = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = request.clone();
                next.auto_grid = input.checked();
                if !next.auto_grid {
                    next.order.get_or_insert_with(ModelOrder::default);
                    next.seasonal_order.get_or_insert(SeasonalOrder(1, 1, 1, next.seasonal_period));
                }
                on_change.emit(next);
            }
        })
    };

    let on_order = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            match input_value(&e).as_deref().and_then(parse_orders).as_deref() {
                Some(&[p, d, q]) => {
                    let mut next = request.clone();
                    next.order = Some(ModelOrder(p, d, q));
                    on_change.emit(next);
                }
                _ => log::warn!("Order must be three comma separated integers"),
            }
        })
    };

    let on_seasonal_order = {
        let request = request.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            match input_value(&e).as_deref().and_then(parse_orders).as_deref() {
                Some(&[p, d, q, s]) => {
                    let mut next = request.clone();
                    next.seasonal_order = Some(SeasonalOrder(p, d, q, s));
                    on_change.emit(next);
                }
                _ => log::warn!("Seasonal order must be four comma separated integers"),
            }
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let order = request.order.unwrap_or_default();
    let seasonal = request
        .seasonal_order
        .unwrap_or(SeasonalOrder(1, 1, 1, request.seasonal_period));

    html! {
        <form class="card bg-base-100 shadow" {onsubmit}>
            <div class="card-body gap-3">
                <h3 class="card-title">{"Model configuration"}</h3>

                <label class="form-control w-full">
                    <div class="label"><span class="label-text">{"Site (empty for all)"}</span></div>
                    <input
                        type="text"
                        class="input input-bordered input-sm w-full"
                        value={request.site.clone().unwrap_or_default()}
                        onchange={on_site}
                    />
                </label>

                <div class="grid grid-cols-2 gap-3">
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Metric"}</span></div>
                        <select class="select select-bordered select-sm" onchange={on_metric}>
                            {for Metric::ALL.iter().map(|m| html! {
                                <option value={m.as_str()} selected={*m == request.metric}>{m.label()}</option>
                            })}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">{"Frequency"}</span></div>
                        <select class="select select-bordered select-sm" onchange={on_freq}>
                            {for Frequency::ALL.iter().map(|f| html! {
                                <option value={f.as_str()} selected={*f == request.freq}>{f.label()}</option>
                            })}
                        </select>
                    </label>
                </div>

                <div class="grid grid-cols-3 gap-3">
                    {number_field("Seasonal period", request.seasonal_period, 1, request, &props.on_change,
                        |r, v| r.seasonal_period = v)}
                    {number_field("Horizon", request.horizon, 1, request, &props.on_change,
                        |r, v| r.horizon = v)}
                    {number_field("Test size", request.test_size, 0, request, &props.on_change,
                        |r, v| r.test_size = v)}
                </div>

                <label class="label cursor-pointer justify-start gap-3">
                    <input
                        type="checkbox"
                        class="toggle toggle-primary toggle-sm"
                        checked={request.auto_grid}
                        onchange={on_auto_grid}
                    />
                    <span class="label-text">{"Automatic order search"}</span>
                </label>

                if !request.auto_grid {
                    <div class="grid grid-cols-2 gap-3">
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">{"Order (p,d,q)"}</span></div>
                            <input
                                type="text"
                                class="input input-bordered input-sm w-full"
                                value={format!("{},{},{}", order.0, order.1, order.2)}
                                onchange={on_order}
                            />
                        </label>
                        <label class="form-control w-full">
                            <div class="label"><span class="label-text">{"Seasonal (P,D,Q,s)"}</span></div>
                            <input
                                type="text"
                                class="input input-bordered input-sm w-full"
                                value={format!("{},{},{},{}", seasonal.0, seasonal.1, seasonal.2, seasonal.3)}
                                onchange={on_seasonal_order}
                            />
                        </label>
                    </div>
                }

                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled={props.busy}>
                        if props.busy {
                            <span class="loading loading-spinner loading-sm"></span>
                            {" Fitting model..."}
                        } else {
                            <i class="fas fa-play"></i>
                            {" Run forecast"}
                        }
                    </button>
                </div>
            </div>
        </form>
    }
}
