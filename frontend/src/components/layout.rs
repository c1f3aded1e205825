use crate::auth::use_auth;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use synergia_shared::AppRoute;

struct NavItem {
    route: AppRoute,
    label: &'static str,
    admin_only: bool,
}

const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        route: AppRoute::AdminDashboard,
        label: "Dashboard",
        admin_only: true,
    },
    NavItem {
        route: AppRoute::Locations,
        label: "Locais",
        admin_only: false,
    },
    NavItem {
        route: AppRoute::Tools,
        label: "Ferramentas",
        admin_only: true,
    },
    NavItem {
        route: AppRoute::Applications,
        label: "Inscrições",
        admin_only: true,
    },
    NavItem {
        route: AppRoute::Profile,
        label: "Meu perfil",
        admin_only: false,
    },
];

/// Whether `current` belongs to the section opened by `item`.
fn is_section(item: AppRoute, current: AppRoute) -> bool {
    match item {
        AppRoute::Locations => matches!(
            current,
            AppRoute::Locations
                | AppRoute::LocationNew
                | AppRoute::LocationDetail(_)
                | AppRoute::LocationEdit(_)
        ),
        AppRoute::Tools => matches!(
            current,
            AppRoute::Tools | AppRoute::ToolNew | AppRoute::ToolDetail(_) | AppRoute::ToolEdit(_)
        ),
        AppRoute::Applications => {
            matches!(current, AppRoute::Applications | AppRoute::ApplicationDetail(_))
        }
        other => other == current,
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let current = router.current_route();

    let links = move || {
        let admin = auth.is_admin();
        NAV_ITEMS
            .iter()
            .filter(|item| admin || !item.admin_only)
            .map(|item| {
                let route = item.route;
                let class = move || {
                    if is_section(route, current.get()) {
                        "active font-semibold"
                    } else {
                        ""
                    }
                };
                view! {
                    <li>
                        <a href=route.to_path() class=class on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            router.navigate_to(route);
                        }>
                            {item.label}
                        </a>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <aside class="w-64 min-h-full bg-base-100 border-r border-base-300 flex flex-col">
            <div class="p-6">
                <Link to="/" class="text-2xl font-bold text-primary">"Synergia"</Link>
            </div>
            <ul class="menu px-4 flex-1">{links}</ul>
            <div class="p-4 text-xs text-base-content/50">"Voluntariado ambiental"</div>
        </aside>
    }
}

#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();

    let name = move || {
        auth.current_user()
            .map(|s| s.display_name().to_string())
            .unwrap_or_default()
    };
    let initials = move || auth.current_user().map(|s| s.initials()).unwrap_or_default();

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-none lg:hidden">
                <label for="main-drawer" class="btn btn-square btn-ghost">"☰"</label>
            </div>
            <div class="flex-1"></div>
            <div class="flex-none gap-3 items-center">
                <Show when=move || auth.is_admin()>
                    <span class="badge badge-primary">"Admin"</span>
                </Show>
                <span class="hidden md:inline text-sm">{name}</span>
                <div class="avatar placeholder">
                    <div class="bg-neutral text-neutral-content w-10 rounded-full">
                        <span>{initials}</span>
                    </div>
                </div>
                <button class="btn btn-outline btn-error btn-sm" on:click=move |_| auth.logout()>
                    "Sair"
                </button>
            </div>
        </div>
    }
}

/// Sidebar + header shell around the logged-in pages.
#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    view! {
        <div class="drawer lg:drawer-open">
            <input id="main-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <Header />
                <main class="p-4 md:p-8 flex-1">{children()}</main>
            </div>
            <div class="drawer-side z-40">
                <label for="main-drawer" class="drawer-overlay"></label>
                <Sidebar />
            </div>
        </div>
    }
}
