//! Admin dashboard
//!
//! Counters come from the statistics endpoint when it answers, otherwise they
//! are computed from the full lists. Also hosts the location approval queue
//! and the report viewers.

use crate::auth::{Api, use_auth};
use crate::components::error_banner::{ErrorBanner, LoadingSpinner, Notification};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use synergia_shared::api::ApplicationReportRange;
use synergia_shared::date::format_br_datetime;
use synergia_shared::{AppRoute, Application, ApplicationStatus, DashboardStats, Id, Location};

const RECENT_LIMIT: usize = 5;

async fn load_stats(api: &Api) -> Result<(DashboardStats, Vec<Location>), String> {
    let (stats, users, locations, tools, applications) = futures::join!(
        api.dashboard_statistics(),
        api.admin_list_users(),
        api.list_locations(),
        api.list_tools(),
        api.list_applications(),
    );
    let locations = locations.map_err(|e| e.user_message())?;
    let stats = match stats {
        Ok(stats) if stats != DashboardStats::default() => stats,
        other => {
            if let Err(e) = other {
                tracing::debug!("statistics endpoint unavailable: {}", e);
            }
            let applications = applications.unwrap_or_default();
            DashboardStats::from_lists(
                users.map(|u| u.len()).unwrap_or_default(),
                locations.len(),
                tools.map(|t| t.len()).unwrap_or_default(),
                &applications,
            )
        }
    };
    Ok((stats, locations))
}

#[component]
fn StatCard(title: &'static str, value: Signal<usize>, #[prop(optional)] accent: &'static str) -> impl IntoView {
    view! {
        <div class="stat bg-base-100 rounded-box shadow">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", accent)>{move || value.get()}</div>
        </div>
    }
}

#[component]
fn PendingLocations(notification: RwSignal<Option<(String, bool)>>) -> impl IntoView {
    let auth = use_auth();
    let (pending, set_pending) = signal(Vec::<Location>::new());

    spawn_local(async move {
        match auth.api().pending_locations().await {
            Ok(list) => set_pending.set(list),
            Err(e) => tracing::debug!("pending locations unavailable: {}", e),
        }
    });

    let decide = move |id: Id, approve: bool| {
        spawn_local(async move {
            let api = auth.api();
            let result = if approve {
                api.approve_location(id).await
            } else {
                api.refuse_location(id).await
            };
            match result {
                Ok(()) => {
                    set_pending.update(|list| list.retain(|l| l.id != Some(id)));
                    let msg = if approve { "Local aprovado" } else { "Local recusado" };
                    notification.set(Some((msg.to_string(), false)));
                }
                Err(e) => notification.set(Some((e.user_message(), true))),
            }
        });
    };

    view! {
        <Show when=move || pending.with(|l| !l.is_empty())>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"Locais aguardando aprovação"</h2>
                    <ul class="divide-y divide-base-200">
                        {move || pending
                            .get()
                            .into_iter()
                            .filter_map(|l| l.id.map(|id| (id, l)))
                            .map(|(id, l)| view! {
                                <li class="flex items-center justify-between py-2 gap-2">
                                    <Link to=AppRoute::LocationDetail(id).to_path() class="link flex-1">{l.nome.clone()}</Link>
                                    <button class="btn btn-xs btn-success" on:click=move |_| decide(id, true)>"Aprovar"</button>
                                    <button class="btn btn-xs btn-error" on:click=move |_| decide(id, false)>"Recusar"</button>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn PendingApplications() -> impl IntoView {
    let auth = use_auth();
    let (pending, set_pending) = signal(Vec::<Application>::new());

    spawn_local(async move {
        match auth.api().list_applications_by_status(ApplicationStatus::Pending).await {
            Ok(list) => set_pending.set(list),
            Err(e) => tracing::debug!("pending applications unavailable: {}", e),
        }
    });

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <h2 class="card-title">"Inscrições pendentes"</h2>
                    <Link to=AppRoute::Applications.to_path() class="link link-primary text-sm">"Ver todas"</Link>
                </div>
                <Show
                    when=move || pending.with(|l| !l.is_empty())
                    fallback=|| view! { <p class="text-base-content/60">"Nenhuma inscrição pendente."</p> }
                >
                    <ul class="divide-y divide-base-200">
                        {move || pending
                            .get()
                            .into_iter()
                            .take(RECENT_LIMIT)
                            .map(|a| {
                                let label = format!(
                                    "{} em {}",
                                    a.usuario_nome.clone().unwrap_or_else(|| "Voluntário".to_string()),
                                    a.local_nome.clone().unwrap_or_else(|| "-".to_string()),
                                );
                                view! {
                                    <li class="py-2">
                                        {match a.id {
                                            Some(id) => view! {
                                                <Link to=AppRoute::ApplicationDetail(id).to_path() class="link">{label}</Link>
                                            }.into_any(),
                                            None => label.into_any(),
                                        }}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn Reports() -> impl IntoView {
    let auth = use_auth();
    let data_inicio = RwSignal::new(String::new());
    let data_fim = RwSignal::new(String::new());
    let (report, set_report) = signal(Option::<Value>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);

    let show = move |result: Result<Value, String>| {
        match result {
            Ok(value) => {
                set_report.set(Some(value));
                set_error.set(None);
            }
            Err(msg) => set_error.set(Some(msg)),
        }
        set_loading.set(false);
    };

    let on_applications = move |_| {
        let range = ApplicationReportRange {
            data_inicio: data_inicio.get_untracked(),
            data_fim: data_fim.get_untracked(),
        };
        if range.data_inicio.is_empty() || range.data_fim.is_empty() {
            set_error.set(Some("Informe o período do relatório".to_string()));
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            show(auth.api().applications_report(&range).await.map_err(|e| e.user_message()));
        });
    };

    let on_locations = move |_| {
        set_loading.set(true);
        spawn_local(async move {
            show(auth.api().locations_report().await.map_err(|e| e.user_message()));
        });
    };

    let rendered = move || {
        report.get().map(|value| {
            let text = serde_json::to_string_pretty(&value).unwrap_or_default();
            view! { <pre class="bg-base-200 rounded p-3 text-xs overflow-auto max-h-80">{text}</pre> }
        })
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body space-y-2">
                <h2 class="card-title">"Relatórios"</h2>
                <ErrorBanner message=error />
                <div class="flex flex-wrap items-end gap-2">
                    <label class="form-control">
                        <span class="label-text">"De"</span>
                        <input type="date" class="input input-bordered input-sm" prop:value=data_inicio on:input=move |ev| data_inicio.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-control">
                        <span class="label-text">"Até"</span>
                        <input type="date" class="input input-bordered input-sm" prop:value=data_fim on:input=move |ev| data_fim.set(event_target_value(&ev)) />
                    </label>
                    <button class="btn btn-sm btn-primary" disabled=loading on:click=on_applications>"Inscrições"</button>
                    <button class="btn btn-sm" disabled=loading on:click=on_locations>"Locais"</button>
                </div>
                {rendered}
            </div>
        </div>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (stats, set_stats) = signal(DashboardStats::default());
    let (recent, set_recent) = signal(Vec::<Location>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    spawn_local(async move {
        match load_stats(&auth.api()).await {
            Ok((s, locations)) => {
                set_stats.set(s);
                set_recent.set(locations.into_iter().rev().take(RECENT_LIMIT).collect());
            }
            Err(msg) => set_error.set(Some(msg)),
        }
        set_loading.set(false);
    });

    let stat = move |pick: fn(&DashboardStats) -> usize| Signal::derive(move || stats.with(pick));
    let greeting = move || {
        auth.current_user()
            .map(|s| format!("Olá, {}!", s.user.first_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <Notification notification=notification />
            <div>
                <h1 class="text-3xl font-bold">"Painel administrativo"</h1>
                <p class="text-base-content/60">{greeting}</p>
            </div>
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <div class="grid gap-4 grid-cols-2 lg:grid-cols-4">
                    <StatCard title="Voluntários" value=stat(|s| s.total_usuarios) />
                    <StatCard title="Locais" value=stat(|s| s.total_locais) />
                    <StatCard title="Ferramentas" value=stat(|s| s.total_ferramentas) />
                    <StatCard title="Inscrições" value=stat(|s| s.total_inscricoes) />
                    <StatCard title="Pendentes" value=stat(|s| s.inscricoes_pendentes) accent="text-warning" />
                    <StatCard title="Aprovadas" value=stat(|s| s.inscricoes_confirmadas) accent="text-success" />
                    <StatCard title="Recusadas" value=stat(|s| s.inscricoes_recusadas) accent="text-error" />
                </div>

                <div class="grid gap-6 lg:grid-cols-2">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <div class="flex justify-between items-center">
                                <h2 class="card-title">"Locais recentes"</h2>
                                <Link to=AppRoute::LocationNew.to_path() class="btn btn-sm btn-primary">"+ Novo"</Link>
                            </div>
                            <ul class="divide-y divide-base-200">
                                {move || recent
                                    .get()
                                    .into_iter()
                                    .filter_map(|l| l.id.map(|id| (id, l)))
                                    .map(|(id, l)| view! {
                                        <li class="py-2 flex justify-between gap-2">
                                            <Link to=AppRoute::LocationDetail(id).to_path() class="link">{l.nome.clone()}</Link>
                                            <span class="text-xs text-base-content/60">
                                                {l.data_inicio.as_deref().map(format_br_datetime).unwrap_or_default()}
                                            </span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    </div>
                    <PendingApplications />
                </div>

                <PendingLocations notification=notification />
                <Reports />
            </Show>
        </div>
    }
}
