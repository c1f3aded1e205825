use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::pagination::PaginationBar;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::date::format_br_datetime;
use synergia_shared::listing::{ApplicationTab, StatusCounts, filter_applications};
use synergia_shared::pagination::Pagination;
use synergia_shared::{AppRoute, Application};

#[component]
fn ApplicationRow(application: Application) -> impl IntoView {
    let status = application.status;
    let name = application
        .usuario_nome
        .clone()
        .unwrap_or_else(|| "Voluntário".to_string());
    let location = application.local_nome.clone().unwrap_or_else(|| "-".to_string());
    let date = application
        .data_desejada
        .as_deref()
        .map(format_br_datetime)
        .unwrap_or_else(|| "-".to_string());

    view! {
        <tr>
            <td>
                <div class="font-semibold">{name}</div>
                <div class="text-xs text-base-content/60">{application.usuario_email.clone().unwrap_or_default()}</div>
            </td>
            <td>{location}</td>
            <td>{date}</td>
            <td><span class=status.badge_class()>{status.label()}</span></td>
            <td>
                {application.id.map(|id| view! {
                    <Link to=AppRoute::ApplicationDetail(id).to_path() class="btn btn-sm btn-ghost">"Detalhes"</Link>
                })}
            </td>
        </tr>
    }
}

#[component]
pub fn ApplicationsPage() -> impl IntoView {
    let auth = use_auth();
    let per_page = auth.config().applications_per_page;

    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let tab = RwSignal::new(ApplicationTab::All);
    let page = RwSignal::new(1usize);

    spawn_local(async move {
        match auth.api().list_applications().await {
            Ok(list) => set_applications.set(list),
            Err(e) => set_error.set(Some(e.user_message())),
        }
        set_loading.set(false);
    });

    let counts = Memo::new(move |_| applications.with(|all| StatusCounts::from_applications(all)));
    let filtered = Memo::new(move |_| {
        let current = tab.get();
        applications.with(|all| {
            search.with(|q| {
                filter_applications(all, current, q)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });
    let total = Signal::derive(move || filtered.with(Vec::len));
    let visible = move || {
        filtered.with(|list| Pagination::new(list.len(), per_page, page.get()).slice(list).to_vec())
    };

    let tabs = move || {
        ApplicationTab::ALL
            .iter()
            .map(|&t| {
                view! {
                    <button
                        role="tab"
                        class=move || if tab.get() == t { "tab tab-active" } else { "tab" }
                        on:click=move |_| {
                            tab.set(t);
                            page.set(1);
                        }
                    >
                        {format!("{} ({})", t.label(), counts.get().for_tab(t))}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <h1 class="text-3xl font-bold">"Inscrições"</h1>
                <input
                    type="text"
                    placeholder="Buscar por voluntário ou local..."
                    class="input input-bordered w-full md:w-80"
                    prop:value=search
                    on:input=move |ev| {
                        set_search.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
            </div>

            <div role="tablist" class="tabs tabs-boxed">{tabs}</div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show
                    when=move || { total.get() > 0 }
                    fallback=|| view! { <p class="text-center text-base-content/60 py-12">"Nenhuma inscrição encontrada."</p> }
                >
                    <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Voluntário"</th>
                                    <th>"Local"</th>
                                    <th>"Data desejada"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || visible()
                                    .into_iter()
                                    .map(|a| view! { <ApplicationRow application=a /> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                </Show>
                <PaginationBar total_items=total items_per_page=per_page page=page />
            </Show>
        </div>
    }
}
