use crate::auth::use_auth;
use crate::components::error_banner::ErrorBanner;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::AppRoute;
use synergia_shared::forms::{FormStatus, submit_login};
use synergia_shared::validation::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (senha, set_senha) = signal(String::new());
    let status = RwSignal::new(FormStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            senha: senha.get_untracked(),
        };
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            let store = auth.store();
            let api = auth.api();
            match submit_login(&store, &api, &form).await {
                // the router leaves this page once the session signal flips
                Ok(session) => status.set(FormStatus::Success(format!(
                    "Bem-vindo(a), {}!",
                    session.user.first_name()
                ))),
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || status.with(FormStatus::error_message));
    let submitting = move || status.with(FormStatus::is_submitting);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold text-primary">"Synergia"</h1>
                    <p class="text-base-content/70">"Entre para continuar"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="voce@exemplo.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="senha">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="senha"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_senha.set(event_target_value(&ev))
                                prop:value=senha
                                class="input input-bordered"
                                required
                            />
                            <label class="label">
                                <Link to=AppRoute::ForgotPassword.to_path() class="label-text-alt link link-hover">
                                    "Esqueceu a senha?"
                                </Link>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Ainda não tem conta? "
                            <Link to=AppRoute::Register.to_path() class="link link-primary">"Cadastre-se"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
