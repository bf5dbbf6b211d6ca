use dioxus::prelude::*;

use crate::resource::FieldView;

/// Create/edit form rendered from the entity schema. One text input per
/// field, with the field label as placeholder and the error inline below.
#[component]
pub fn EntityForm(
    fields: Vec<FieldView>,
    submit_label: String,
    #[props(default)] busy: bool,
    on_change: EventHandler<(&'static str, String)>,
    on_blur: EventHandler<&'static str>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        form {
            class: "entity-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            for field in fields {
                div {
                    key: "{field.name}",
                    class: "modal-field",
                    input {
                        id: "field-{field.name}",
                        class: if field.error.is_some() { "field-input invalid" } else { "field-input" },
                        r#type: "text",
                        placeholder: "{field.label}",
                        value: "{field.value}",
                        oninput: move |evt: FormEvent| on_change.call((field.name, evt.value())),
                        onblur: move |_| on_blur.call(field.name),
                    }
                    if let Some(error) = &field.error {
                        span { class: "field-error", "{error}" }
                    }
                }
            }
            div {
                class: "modal-actions",
                button {
                    r#type: "button",
                    class: "btn btn-outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: busy,
                    "{submit_label}"
                }
            }
        }
    }
}
