use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::location_card::LocationCard;
use crate::pages::showcase::ShowcaseLinks;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::listing::filter_locations;
use synergia_shared::{AppRoute, AuthStatus, Location};

const STEPS: [(&str, &str); 4] = [
    (
        "Escolha um local próximo a você",
        "Encontre uma comunidade, bairro ou área que precise de apoio.",
    ),
    (
        "Faça sua inscrição",
        "Escolha a data em que pode participar e envie sua inscrição.",
    ),
    (
        "Aguarde a confirmação",
        "A equipe Synergia analisa e confirma sua participação.",
    ),
    (
        "Participe da ação",
        "Compareça no dia marcado e ajude a transformar o lugar.",
    ),
];

#[component]
pub fn PublicNavbar() -> impl IntoView {
    let auth = use_auth();

    let account = move || match auth.current_user() {
        Some(session) => {
            let home = AppRoute::home_for(AuthStatus::from_session(Some(&session))).to_path();
            view! {
                <Link to=home class="btn btn-primary btn-sm">{session.user.first_name().to_string()}</Link>
            }
            .into_any()
        }
        None => view! { <Link to=AppRoute::Login.to_path() class="btn btn-primary btn-sm">"Login"</Link> }.into_any(),
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1">
                <Link to="/" class="btn btn-ghost text-xl text-primary">"Synergia"</Link>
            </div>
            <div class="flex-none gap-2">
                <a href="/#about" class="btn btn-ghost btn-sm hidden md:inline-flex">"Sobre nós"</a>
                <a href="/#how-it-works" class="btn btn-ghost btn-sm hidden md:inline-flex">"Como funciona"</a>
                <Link to=AppRoute::Contact.to_path() class="btn btn-ghost btn-sm">"Contato"</Link>
                {account}
            </div>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();

    let (locations, set_locations) = signal(Vec::<Location>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());

    spawn_local(async move {
        match auth.api().list_locations().await {
            Ok(list) => set_locations.set(list),
            Err(e) => {
                tracing::warn!("landing: failed to load locations: {}", e);
                set_error.set(Some("Erro ao carregar locais".to_string()));
            }
        }
        set_loading.set(false);
    });

    let filtered = move || {
        locations.with(|all| {
            search.with(|q| filter_locations(all, q).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="min-h-screen bg-base-100">
            <PublicNavbar />

            <header class="hero min-h-[60vh] bg-primary text-primary-content">
                <div class="hero-content text-center">
                    <div class="max-w-xl">
                        <h1 class="text-5xl font-bold">"Como podemos mudar o mundo?"</h1>
                        <p class="py-6">"Tudo começa com um simples passo."</p>
                        <div class="flex gap-3 justify-center">
                            <Link to=AppRoute::Register.to_path() class="btn btn-accent">"Seja voluntário"</Link>
                            <Link to=AppRoute::Login.to_path() class="btn btn-outline">"Login"</Link>
                        </div>
                    </div>
                </div>
            </header>

            <section id="about" class="max-w-5xl mx-auto p-8 space-y-4">
                <h2 class="text-3xl font-bold">"A Synergia: juntos pelo planeta, pelas pessoas e pelos animais"</h2>
                <p>
                    "A Synergia é uma ONG comprometida em transformar o mundo por meio da união de pessoas "
                    "com um propósito comum: cuidar do nosso planeta, apoiar comunidades e proteger os "
                    "animais e ecossistemas impactados pela poluição."
                </p>
                <p>"Acreditamos que pequenas ações, quando somadas, geram grandes transformações."</p>
                <h3 class="text-2xl font-semibold pt-4">"Onde atuamos"</h3>
                <ShowcaseLinks />
            </section>

            <section id="projects" class="max-w-6xl mx-auto p-8">
                <div class="flex flex-col md:flex-row justify-between items-center gap-4 mb-6">
                    <h2 class="text-3xl font-bold">"Locais disponíveis"</h2>
                    <input
                        type="text"
                        placeholder="Buscar locais..."
                        class="input input-bordered w-full md:w-72"
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </div>
                <ErrorBanner message=error />
                <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                    {move || {
                        let list = filtered();
                        if list.is_empty() && error.get().is_none() {
                            view! { <p class="text-center text-base-content/60 py-12">"Nenhum local encontrado."</p> }.into_any()
                        } else {
                            view! {
                                <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                                    {list.into_iter().map(|location| view! { <LocationCard location=location /> }).collect_view()}
                                </div>
                            }
                            .into_any()
                        }
                    }}
                </Show>
            </section>

            <section id="how-it-works" class="bg-base-200 p-8">
                <div class="max-w-5xl mx-auto">
                    <h2 class="text-3xl font-bold mb-6">"Como ser um voluntário"</h2>
                    <div class="grid gap-4 md:grid-cols-4">
                        {STEPS
                            .iter()
                            .enumerate()
                            .map(|(i, (title, text))| view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <span class="text-4xl font-bold text-primary">{i + 1}</span>
                                        <h3 class="font-semibold">{*title}</h3>
                                        <p class="text-sm">{*text}</p>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>
        </div>
    }
}
