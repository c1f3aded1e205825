use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::{AppRoute, Id, Tool};

#[component]
pub fn ToolDetailPage(id: Id) -> impl IntoView {
    let auth = use_auth();

    let (tool, set_tool) = signal(Option::<Tool>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    spawn_local(async move {
        match auth.api().get_tool(id).await {
            Ok(t) => set_tool.set(Some(t)),
            Err(e) => set_error.set(Some(e.user_message())),
        }
        set_loading.set(false);
    });

    let details = move || {
        tool.get().map(|t| {
            let in_use = t.quantidade.saturating_sub(t.quantidade_disponivel);
            view! {
                <div class="card bg-base-100 shadow">
                    {t.imagem_url.clone().filter(|u| !u.trim().is_empty()).map(|src| view! {
                        <figure><img src=src alt=t.nome.clone() class="max-h-72 object-contain" /></figure>
                    })}
                    <div class="card-body">
                        <h1 class="card-title text-2xl">{t.nome.clone()}</h1>
                        <p>{t.descricao.clone().unwrap_or_else(|| "Sem descrição.".to_string())}</p>
                        <div class="stats shadow mt-4">
                            <div class="stat">
                                <div class="stat-title">"Total"</div>
                                <div class="stat-value">{t.quantidade}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Disponíveis"</div>
                                <div class="stat-value text-success">{t.quantidade_disponivel}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Em uso"</div>
                                <div class="stat-value text-warning">{in_use}</div>
                            </div>
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <Link to=AppRoute::ToolEdit(id).to_path() class="btn btn-warning">"Editar"</Link>
                            <Link to=AppRoute::Tools.to_path() class="btn btn-ghost">"Voltar"</Link>
                        </div>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-4">
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                {details}
            </Show>
        </div>
    }
}
