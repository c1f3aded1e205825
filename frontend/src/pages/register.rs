use crate::auth::use_auth;
use crate::components::error_banner::ErrorBanner;
use crate::components::form_field::FormField;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::AppRoute;
use synergia_shared::date::today_local;
use synergia_shared::forms::{FormStatus, submit_registration};
use synergia_shared::validation::{RegistrationForm, format_cpf};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let nome = RwSignal::new(String::new());
    let nascimento = RwSignal::new(String::new());
    let cpf = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let senha = RwSignal::new(String::new());
    let confirmacao = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = RegistrationForm {
            nome_completo: nome.get_untracked(),
            data_nascimento: nascimento.get_untracked(),
            cpf: cpf.get_untracked(),
            email: email.get_untracked(),
            senha: senha.get_untracked(),
            confirmacao_senha: confirmacao.get_untracked(),
        };
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            let store = auth.store();
            let api = auth.api();
            match submit_registration(&store, &api, &form, today_local()).await {
                Ok(_) => {
                    status.set(FormStatus::Success(
                        "Cadastro realizado! Faça login para continuar.".to_string(),
                    ));
                    set_timeout(
                        move || router.navigate_to(AppRoute::Login),
                        std::time::Duration::from_millis(1500),
                    );
                }
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || status.with(FormStatus::error_message));
    let success = move || status.with(|s| s.success_message().map(str::to_string));
    let submitting = move || status.with(FormStatus::is_submitting);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold text-primary">"Crie sua conta"</h1>
                    <p class="text-base-content/70">"Voluntários a partir de 16 anos"</p>
                </div>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error />
                        {move || success().map(|msg| view! {
                            <div role="status" class="alert alert-success text-sm py-2"><span>{msg}</span></div>
                        })}

                        <FormField id="nome" label="Nome completo" value=nome status=status error_key="nomeCompleto" />
                        <FormField id="nascimento" label="Data de nascimento" kind="date" value=nascimento status=status error_key="dataNascimento" />
                        <div class="form-control">
                            <label class="label" for="cpf"><span class="label-text">"CPF"</span></label>
                            <input
                                id="cpf"
                                type="text"
                                inputmode="numeric"
                                placeholder="000.000.000-00"
                                class="input input-bordered"
                                prop:value=cpf
                                on:input=move |ev| cpf.set(format_cpf(&event_target_value(&ev)))
                            />
                            {move || status.with(|s| s.field_error("cpf")).map(|msg| view! {
                                <label class="label"><span class="label-text-alt text-error">{msg}</span></label>
                            })}
                        </div>
                        <FormField id="email" label="Email" kind="email" value=email status=status error_key="email" />
                        <FormField id="senha" label="Senha" kind="password" value=senha status=status error_key="senha" />
                        <FormField id="confirmacao" label="Confirme a senha" kind="password" value=confirmacao status=status error_key="confirmacaoSenha" />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Enviando..." }.into_any()
                                } else {
                                    "Cadastrar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Já tem conta? "
                            <Link to=AppRoute::Login.to_path() class="link link-primary">"Entrar"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
