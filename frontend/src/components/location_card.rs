use crate::web::router::Link;
use leptos::prelude::*;
use synergia_shared::date::format_br_datetime;
use synergia_shared::{AppRoute, Location};

const PLACEHOLDER_IMAGE: &str = "/assets/local-placeholder.png";
const DESCRIPTION_PREVIEW: usize = 120;

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_PREVIEW).collect();
    format!("{}…", cut.trim_end())
}

#[component]
pub fn LocationCard(location: Location) -> impl IntoView {
    let href = location
        .id
        .map(|id| AppRoute::LocationDetail(id).to_path())
        .unwrap_or_else(|| AppRoute::Locations.to_path());
    let image = location
        .imagem_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let description = location.descricao.as_deref().map(preview).unwrap_or_default();
    let address = location.address_line();
    let start = location.data_inicio.as_deref().map(format_br_datetime);

    view! {
        <div class="card bg-base-100 shadow-xl hover:shadow-2xl transition-shadow">
            <figure class="h-48 overflow-hidden">
                <img src=image alt=location.nome.clone() class="w-full h-full object-cover" />
            </figure>
            <div class="card-body">
                <h2 class="card-title">{location.nome.clone()}</h2>
                <p class="text-sm text-base-content/70">{description}</p>
                {address.map(|a| view! { <p class="text-xs text-base-content/60">{a}</p> })}
                {start.map(|s| view! { <span class="badge badge-outline">"Início: " {s}</span> })}
                <div class="card-actions justify-end">
                    <Link to=href class="btn btn-primary btn-sm">"Ver detalhes"</Link>
                </div>
            </div>
        </div>
    }
}

