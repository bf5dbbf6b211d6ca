use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

#[component]
pub fn SearchBox(
    value: String,
    #[props(default = "Search by keyword...".to_string())] placeholder: String,
    on_search: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "search-box",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_search.call(evt.value()),
            }
        }
    }
}
