use leptos::prelude::*;

#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Toast in the top right corner; clears itself after three seconds.
#[component]
pub fn Notification(notification: RwSignal<Option<(String, bool)>>) -> impl IntoView {
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if notification.get().is_some_and(|(_, is_err)| is_err) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
