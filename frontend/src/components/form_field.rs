use leptos::prelude::*;
use synergia_shared::forms::FormStatus;

/// Labelled input bound to a signal, showing the validator's message for
/// `error_key` underneath.
#[component]
pub fn FormField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    status: RwSignal<FormStatus>,
    /// Key used by the validator for this field.
    error_key: &'static str,
) -> impl IntoView {
    let error = move || status.with(|s| s.field_error(error_key));

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                class=move || if error().is_some() { "input input-bordered input-error" } else { "input input-bordered" }
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error().map(|msg| view! {
                <label class="label"><span class="label-text-alt text-error">{msg}</span></label>
            })}
        </div>
    }
}
