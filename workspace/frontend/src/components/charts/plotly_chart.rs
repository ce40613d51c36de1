use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    // plain objects, not JS Maps, or Plotly ignores the attributes
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub div_id: AttrValue,
    /// Array of Plotly traces
    pub traces: Value,
    pub layout: Value,
    #[prop_or(360)]
    pub height: u32,
}

/// Draws the given traces with plotly.js and redraws when they change.
#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.div_id.clone(), props.traces.clone(), props.layout.clone()),
        move |(container_ref, div_id, traces, layout)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(div_id);

                let config = serde_json::json!({"responsive": true, "displaylogo": false});
                match (to_js(traces), to_js(layout), to_js(&config)) {
                    (Ok(data), Ok(layout), Ok(config)) => newPlot(div_id, data, layout, config),
                    _ => log::error!("Failed to convert chart {} for plotly", div_id),
                }
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} class="w-full" style={format!("height:{}px;", props.height)}></div>
    }
}
