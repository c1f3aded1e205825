//! Profile editor, rendered outside the sidebar layout.

use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::form_field::FormField;
use crate::pages::profile::ApplicationHistory;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::forms::{FormStatus, submit_profile};
use synergia_shared::validation::{ProfileForm, format_cpf};
use synergia_shared::{AppRoute, Application, User};

#[component]
pub fn MyProfilePage() -> impl IntoView {
    let auth = use_auth();

    let nome = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let nascimento = RwSignal::new(String::new());
    let cpf = RwSignal::new(String::new());
    let foto = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::Idle);
    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    let fill = move |u: &User| {
        nome.set(u.nome_completo.clone().unwrap_or_default());
        email.set(u.email.clone().unwrap_or_default());
        // date inputs only take the `YYYY-MM-DD` prefix
        nascimento.set(
            u.data_nascimento
                .as_deref()
                .map(|d| d.chars().take(10).collect())
                .unwrap_or_default(),
        );
        cpf.set(u.cpf.as_deref().map(format_cpf).unwrap_or_default());
        foto.set(u.foto_perfil.clone().unwrap_or_default());
    };

    let session = auth.current_user();
    if let Some(s) = &session {
        fill(&s.user);
    }
    match session.and_then(|s| s.user_id()) {
        Some(user_id) => spawn_local(async move {
            match auth.api().get_profile(user_id).await {
                Ok(profile) => {
                    fill(&profile.usuario);
                    set_applications.set(profile.inscricoes);
                }
                Err(e) => set_load_error.set(Some(e.user_message())),
            }
            set_loading.set(false);
        }),
        None => set_loading.set(false),
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = ProfileForm {
            nome_completo: nome.get_untracked(),
            email: email.get_untracked(),
            data_nascimento: nascimento.get_untracked(),
            cpf: cpf.get_untracked(),
            foto_perfil: foto.get_untracked(),
        };
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            let store = auth.store();
            let api = auth.api();
            match submit_profile(&store, &api, &form).await {
                Ok(saved) => {
                    fill(&saved);
                    status.set(FormStatus::Success("Perfil atualizado com sucesso!".to_string()));
                }
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || load_error.get().or_else(|| status.with(FormStatus::error_message)));
    let success = move || status.with(|s| s.success_message().map(str::to_string));
    let back = move || AppRoute::home_for(auth.status_signal().get()).to_path();

    view! {
        <div class="min-h-screen bg-base-200 py-10 px-4">
            <div class="max-w-3xl mx-auto space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-3xl font-bold">"Meu perfil"</h1>
                    {move || view! { <Link to=back() class="btn btn-ghost">"Voltar"</Link> }}
                </div>
                <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                    <form class="card bg-base-100 shadow" on:submit=on_submit>
                        <div class="card-body space-y-2">
                            <ErrorBanner message=error />
                            {move || success().map(|msg| view! {
                                <div role="status" class="alert alert-success text-sm py-2"><span>{msg}</span></div>
                            })}
                            <FormField id="nome" label="Nome completo" value=nome status=status error_key="nomeCompleto" />
                            <FormField id="email" label="Email" kind="email" value=email status=status error_key="email" />
                            <div class="grid md:grid-cols-2 gap-4">
                                <FormField id="nascimento" label="Data de nascimento" kind="date" value=nascimento status=status error_key="dataNascimento" />
                                <div class="form-control">
                                    <label class="label" for="cpf"><span class="label-text">"CPF"</span></label>
                                    <input
                                        id="cpf"
                                        class="input input-bordered"
                                        placeholder="000.000.000-00"
                                        prop:value=cpf
                                        on:input=move |ev| cpf.set(format_cpf(&event_target_value(&ev)))
                                    />
                                    {move || status.with(|s| s.field_error("cpf")).map(|m| view! { <span class="text-error text-xs">{m}</span> })}
                                </div>
                            </div>
                            <FormField id="foto" label="URL da foto (opcional)" value=foto status=status error_key="fotoPerfil" />
                            <div class="card-actions justify-end mt-4">
                                <button type="submit" class="btn btn-primary" disabled=move || status.with(FormStatus::is_submitting)>
                                    {move || if status.with(FormStatus::is_submitting) { "Salvando..." } else { "Salvar alterações" }}
                                </button>
                            </div>
                        </div>
                    </form>
                    <ApplicationHistory applications=applications />
                </Show>
            </div>
        </div>
    }
}
