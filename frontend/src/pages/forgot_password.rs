use crate::web::router::Link;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::AppRoute;

/// The backend has no reset endpoint yet; the request is acknowledged locally.
const SIMULATED_DELAY_MS: u32 = 2_000;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (message, set_message) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_message.set(None);
        tracing::info!("password reset requested");

        spawn_local(async move {
            TimeoutFuture::new(SIMULATED_DELAY_MS).await;
            set_message.set(Some(
                "Se o email existir em nosso sistema, você receberá instruções para redefinir sua senha."
                    .to_string(),
            ));
            set_loading.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h1 class="card-title text-2xl justify-center">"Redefinir senha"</h1>
                        <p class="text-center text-base-content/70">
                            "Digite seu email para receber instruções de redefinição"
                        </p>
                        {move || message.get().map(|msg| view! {
                            <div role="status" class="alert alert-success text-sm py-2"><span>{msg}</span></div>
                        })}
                        <div class="form-control">
                            <label class="label" for="email"><span class="label-text">"E-mail"</span></label>
                            <input
                                id="email"
                                type="email"
                                placeholder="seu@email.com"
                                class="input input-bordered"
                                required
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="btn btn-primary mt-4" disabled=move || loading.get()>
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Enviando..." }.into_any()
                            } else {
                                "Enviar instruções".into_any()
                            }}
                        </button>
                        <div class="text-center mt-4">
                            <Link to=AppRoute::Login.to_path() class="link link-primary">"← Voltar para o login"</Link>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
