use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::location_card::LocationCard;
use crate::components::pagination::PaginationBar;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::listing::filter_locations;
use synergia_shared::pagination::Pagination;
use synergia_shared::{AppRoute, Location};

#[component]
pub fn LocationsPage() -> impl IntoView {
    let auth = use_auth();
    let per_page = auth.config().locations_per_page;

    let (locations, set_locations) = signal(Vec::<Location>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let page = RwSignal::new(1usize);

    spawn_local(async move {
        match auth.api().list_locations().await {
            Ok(list) => set_locations.set(list),
            Err(e) => set_error.set(Some(e.user_message())),
        }
        set_loading.set(false);
    });

    let filtered = Memo::new(move |_| {
        locations.with(|all| {
            search.with(|q| filter_locations(all, q).into_iter().cloned().collect::<Vec<_>>())
        })
    });
    let total = Signal::derive(move || filtered.with(Vec::len));
    let visible = move || {
        filtered.with(|list| {
            Pagination::new(list.len(), per_page, page.get())
                .slice(list)
                .to_vec()
        })
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Locais"</h1>
                    <p class="text-base-content/70">"Escolha onde você quer fazer a diferença"</p>
                </div>
                <div class="flex gap-2">
                    <input
                        type="text"
                        placeholder="Buscar por nome ou descrição..."
                        class="input input-bordered w-full md:w-72"
                        prop:value=search
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <Show when=move || auth.is_admin()>
                        <Link to=AppRoute::LocationNew.to_path() class="btn btn-primary">"+ Adicionar local"</Link>
                    </Show>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show
                    when=move || { total.get() > 0 }
                    fallback=move || view! {
                        <p class="text-center text-base-content/60 py-12">
                            {move || if search.with(|s| s.trim().is_empty()) {
                                "Nenhum local cadastrado."
                            } else {
                                "Nenhum local encontrado para a busca."
                            }}
                        </p>
                    }
                >
                    <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                        {move || visible().into_iter().map(|location| view! { <LocationCard location=location /> }).collect_view()}
                    </div>
                </Show>
                <PaginationBar total_items=total items_per_page=per_page page=page />
            </Show>
        </div>
    }
}
