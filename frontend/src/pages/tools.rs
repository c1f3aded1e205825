use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner, Notification};
use crate::components::pagination::PaginationBar;
use crate::components::tool_card::ToolCard;
use crate::web::confirm;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::listing::filter_tools;
use synergia_shared::pagination::Pagination;
use synergia_shared::{AppRoute, Id, Tool};

#[component]
pub fn ToolsPage() -> impl IntoView {
    let auth = use_auth();
    let per_page = auth.config().tools_per_page;

    let (tools, set_tools) = signal(Vec::<Tool>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let (only_available, set_only_available) = signal(false);
    let page = RwSignal::new(1usize);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    Effect::new(move |_| {
        let available = only_available.get();
        set_loading.set(true);
        spawn_local(async move {
            let api = auth.api();
            let result = if available {
                api.list_available_tools().await
            } else {
                api.list_tools().await
            };
            match result {
                Ok(list) => {
                    set_tools.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    });

    let on_delete = Callback::new(move |id: Id| {
        if !confirm("Excluir esta ferramenta?") {
            return;
        }
        spawn_local(async move {
            match auth.api().delete_tool(id).await {
                Ok(()) => {
                    set_tools.update(|list| list.retain(|t| t.id != Some(id)));
                    notification.set(Some(("Ferramenta excluída".to_string(), false)));
                }
                Err(e) => notification.set(Some((e.user_message(), true))),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        tools.with(|all| search.with(|q| filter_tools(all, q).into_iter().cloned().collect::<Vec<_>>()))
    });
    let total = Signal::derive(move || filtered.with(Vec::len));
    let visible = move || {
        filtered.with(|list| Pagination::new(list.len(), per_page, page.get()).slice(list).to_vec())
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <Notification notification=notification />
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <h1 class="text-3xl font-bold">"Ferramentas"</h1>
                <div class="flex flex-wrap gap-2 items-center">
                    <label class="label cursor-pointer gap-2">
                        <span class="label-text">"Só disponíveis"</span>
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=only_available
                            on:change=move |ev| {
                                set_only_available.set(event_target_checked(&ev));
                                page.set(1);
                            }
                        />
                    </label>
                    <input
                        type="text"
                        placeholder="Buscar ferramenta..."
                        class="input input-bordered w-full md:w-64"
                        prop:value=search
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            page.set(1);
                        }
                    />
                    <Link to=AppRoute::ToolNew.to_path() class="btn btn-primary">"+ Nova ferramenta"</Link>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show
                    when=move || { total.get() > 0 }
                    fallback=|| view! { <p class="text-center text-base-content/60 py-12">"Nenhuma ferramenta encontrada."</p> }
                >
                    <div class="grid gap-4 md:grid-cols-2">
                        {move || {
                            let admin = auth.is_admin();
                            visible()
                                .into_iter()
                                .map(|tool| view! { <ToolCard tool=tool is_admin=admin on_delete=on_delete /> })
                                .collect_view()
                        }}
                    </div>
                </Show>
                <PaginationBar total_items=total items_per_page=per_page page=page />
            </Show>
        </div>
    }
}
