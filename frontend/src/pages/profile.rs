use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::location_card::LocationCard;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::date::{format_br_date, format_br_datetime};
use synergia_shared::{AppRoute, Application, Location, User};

/// Volunteer history shared by the two profile pages.
#[component]
pub fn ApplicationHistory(#[prop(into)] applications: Signal<Vec<Application>>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Minhas inscrições"</h2>
                <Show
                    when=move || applications.with(|l| !l.is_empty())
                    fallback=|| view! { <p class="text-base-content/60">"Você ainda não se inscreveu em nenhum local."</p> }
                >
                    <ul class="divide-y divide-base-200">
                        {move || applications
                            .get()
                            .into_iter()
                            .map(|a| {
                                let name = a.local_nome.clone().unwrap_or_else(|| "Local".to_string());
                                view! {
                                    <li class="py-2 flex items-center justify-between gap-2">
                                        <div>
                                            {match a.local_id {
                                                Some(id) => view! {
                                                    <Link to=AppRoute::LocationDetail(id).to_path() class="link font-semibold">{name}</Link>
                                                }.into_any(),
                                                None => view! { <span class="font-semibold">{name}</span> }.into_any(),
                                            }}
                                            <div class="text-xs text-base-content/60">
                                                {a.data_desejada.as_deref().map(format_br_datetime).unwrap_or_default()}
                                            </div>
                                        </div>
                                        <span class=a.status.badge_class()>{a.status.label()}</span>
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
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let session = auth.current_user();
    let admin = auth.is_admin();

    let (user, set_user) = signal(session.as_ref().map(|s| s.user.clone()));
    let (applications, set_applications) = signal(Vec::<Application>::new());
    let (locations, set_locations) = signal(Vec::<Location>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    match session.and_then(|s| s.user_id()) {
        Some(user_id) => spawn_local(async move {
            let api = auth.api();
            let (found, history) = futures::join!(
                api.get_user(user_id),
                api.list_applications_by_user(user_id)
            );
            match found {
                Ok(u) => set_user.set(Some(u)),
                Err(e) => tracing::debug!("keeping stored user: {}", e),
            }
            match history {
                Ok(list) => set_applications.set(list),
                Err(e) => set_error.set(Some(e.user_message())),
            }
            if admin {
                match api.list_locations_by_user(user_id).await {
                    Ok(list) => set_locations.set(list),
                    Err(e) => tracing::debug!("no locations for user {}: {}", user_id, e),
                }
            }
            set_loading.set(false);
        }),
        None => set_loading.set(false),
    }

    let card = move || {
        user.get().map(|u: User| {
            let initials = u.initials();
            view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body flex-row items-center gap-6">
                        {match u.foto_perfil.clone().filter(|f| !f.is_empty()) {
                            Some(src) => view! {
                                <div class="avatar"><div class="w-24 rounded-full"><img src=src alt="Foto de perfil" /></div></div>
                            }.into_any(),
                            None => view! {
                                <div class="avatar placeholder">
                                    <div class="bg-primary text-primary-content w-24 rounded-full"><span class="text-3xl">{initials}</span></div>
                                </div>
                            }.into_any(),
                        }}
                        <div class="flex-1 space-y-1">
                            <h1 class="text-2xl font-bold">{u.display_name().to_string()}</h1>
                            {u.email.clone().map(|e| view! { <p>{e}</p> })}
                            {u.telefone.clone().map(|t| view! { <p>{t}</p> })}
                            {u.data_nascimento.as_deref().map(|d| view! { <p class="text-sm">{format!("Nascimento: {}", format_br_date(d))}</p> })}
                        </div>
                        <Link to=AppRoute::MyProfile.to_path() class="btn btn-outline">"Editar perfil"</Link>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                {card}
                <ApplicationHistory applications=applications />
                <Show when=move || locations.with(|l| !l.is_empty())>
                    <h2 class="text-xl font-semibold">"Locais cadastrados por você"</h2>
                    <div class="grid gap-4 md:grid-cols-2">
                        {move || locations
                            .get()
                            .into_iter()
                            .map(|l| view! { <LocationCard location=l /> })
                            .collect_view()}
                    </div>
                </Show>
            </Show>
        </div>
    }
}
