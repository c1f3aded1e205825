use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::form_field::FormField;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::forms::{FormStatus, submit_tool};
use synergia_shared::validation::ToolForm;
use synergia_shared::{AppRoute, Id};

/// Create (`editing` unset) or edit a tool.
#[component]
pub fn ToolFormPage(#[prop(optional)] editing: Option<Id>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let nome = RwSignal::new(String::new());
    let descricao = RwSignal::new(String::new());
    let imagem_url = RwSignal::new(String::new());
    let quantidade = RwSignal::new("1".to_string());
    let disponivel = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::Idle);
    let (loading, set_loading) = signal(editing.is_some());
    let (load_error, set_load_error) = signal(Option::<String>::None);

    if let Some(id) = editing {
        spawn_local(async move {
            match auth.api().get_tool(id).await {
                Ok(tool) => {
                    nome.set(tool.nome);
                    descricao.set(tool.descricao.unwrap_or_default());
                    imagem_url.set(tool.imagem_url.unwrap_or_default());
                    quantidade.set(tool.quantidade.to_string());
                    disponivel.set(tool.quantidade_disponivel.to_string());
                }
                Err(e) => set_load_error.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = ToolForm {
            nome: nome.get_untracked(),
            descricao: descricao.get_untracked(),
            imagem_url: imagem_url.get_untracked(),
            quantidade: quantidade.get_untracked(),
            quantidade_disponivel: disponivel.get_untracked(),
        };
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            match submit_tool(&auth.api(), &form, editing).await {
                Ok(saved) => {
                    status.set(FormStatus::Success("Ferramenta salva".to_string()));
                    let target = saved
                        .id
                        .or(editing)
                        .map_or(AppRoute::Tools, AppRoute::ToolDetail);
                    router.navigate_to(target);
                }
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || load_error.get().or_else(|| status.with(FormStatus::error_message)));
    let title = if editing.is_some() { "Editar ferramenta" } else { "Nova ferramenta" };

    view! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-3xl font-bold mb-6">{title}</h1>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <form class="card bg-base-100 shadow" on:submit=on_submit>
                    <div class="card-body space-y-2">
                        <ErrorBanner message=error />
                        <FormField id="nome" label="Nome" value=nome status=status error_key="nome" />
                        <FormField id="descricao" label="Descrição" value=descricao status=status error_key="descricao" />
                        <FormField id="imagem_url" label="URL da imagem (opcional)" value=imagem_url status=status error_key="imagemUrl" />
                        <div class="grid grid-cols-2 gap-4">
                            <FormField id="quantidade" label="Quantidade total" kind="number" value=quantidade status=status error_key="quantidade" />
                            <Show when=move || editing.is_some()>
                                <FormField id="disponivel" label="Disponíveis" kind="number" value=disponivel status=status error_key="quantidadeDisponivel" />
                            </Show>
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <Link to=AppRoute::Tools.to_path() class="btn btn-ghost">"Cancelar"</Link>
                            <button type="submit" class="btn btn-primary" disabled=move || status.with(FormStatus::is_submitting)>
                                {move || if status.with(FormStatus::is_submitting) { "Salvando..." } else { "Salvar" }}
                            </button>
                        </div>
                    </div>
                </form>
            </Show>
        </div>
    }
}
