//! Labelled text input (or textarea) with an inline validation message.

use leptos::prelude::*;

#[component]
pub fn TextField(
    value: RwSignal<String>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] error: Option<Signal<Option<String>>>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] multiline: bool,
    #[prop(default = 4)] rows: u32,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let error_text = move || error.and_then(|e| e.get());

    let control = if multiline {
        view! {
            <textarea
                class="field__control"
                rows=rows.to_string()
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                class="field__control"
                type=kind
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="field" class:field--error=move || error_text().is_some()>
            {label.map(|text| view! { <label class="field__label">{text}</label> })}
            {control}
            {move || error_text().map(|msg| view! { <p class="field__error">{msg}</p> })}
        </div>
    }
}
