use crate::web::router::Link;
use leptos::prelude::*;
use synergia_shared::{AppRoute, Id, Tool};

/// Inventory row; admins get edit and delete actions.
#[component]
pub fn ToolCard(
    tool: Tool,
    is_admin: bool,
    #[prop(into)] on_delete: Callback<Id>,
) -> impl IntoView {
    let id = tool.id;
    let availability = if tool.is_available() {
        ("badge badge-success", "Disponível")
    } else {
        ("badge badge-error", "Indisponível")
    };

    view! {
        <div class="card card-side bg-base-100 shadow-md">
            {tool.imagem_url.clone().filter(|u| !u.trim().is_empty()).map(|src| view! {
                <figure class="w-28 shrink-0">
                    <img src=src alt=tool.nome.clone() class="h-full object-cover" />
                </figure>
            })}
            <div class="card-body py-4">
                <div class="flex items-center justify-between gap-2">
                    <h3 class="card-title text-base">{tool.nome.clone()}</h3>
                    <span class=availability.0>{availability.1}</span>
                </div>
                <p class="text-sm text-base-content/70">{tool.descricao.clone().unwrap_or_default()}</p>
                <p class="text-xs">
                    {format!("{} de {} disponíveis", tool.quantidade_disponivel, tool.quantidade)}
                </p>
                {id.map(|id| view! {
                    <div class="card-actions justify-end">
                        <Link to=AppRoute::ToolDetail(id).to_path() class="btn btn-ghost btn-xs">"Detalhes"</Link>
                        <Show when=move || is_admin>
                            <Link to=AppRoute::ToolEdit(id).to_path() class="btn btn-outline btn-xs">"Editar"</Link>
                            <button class="btn btn-error btn-outline btn-xs" on:click=move |_| on_delete.run(id)>
                                "Excluir"
                            </button>
                        </Show>
                    </div>
                })}
            </div>
        </div>
    }
}
