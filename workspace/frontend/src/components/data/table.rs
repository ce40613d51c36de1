use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[prop_or_default]
    pub empty_text: Option<AttrValue>,
}

/// Scrollable preview table; cells arrive already formatted.
#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    if props.rows.is_empty() {
        let text = props
            .empty_text
            .clone()
            .unwrap_or_else(|| AttrValue::from("No rows to show."));
        return html! { <p class="text-gray-500 py-4">{text}</p> };
    }

    html! {
        <div class="overflow-x-auto max-h-[32rem]">
            <table class="table table-xs table-pin-rows table-zebra">
                <thead>
                    <tr>
                        <th class="text-gray-400">{"#"}</th>
                        {for props.columns.iter().map(|c| html! { <th>{c}</th> })}
                    </tr>
                </thead>
                <tbody>
                    {for props.rows.iter().enumerate().map(|(idx, row)| html! {
                        <tr>
                            <td class="text-gray-400">{idx + 1}</td>
                            {for row.iter().map(|cell| html! { <td class="whitespace-nowrap">{cell}</td> })}
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}
