//! Synergia volunteer console
//!
//! Client-side rendered Leptos app over the shared crate:
//! - `web::router`: History-API router with auth guards
//! - `auth`: session context shared by every page
//! - `components`: layout and reusable widgets
//! - `pages`: one component per route

mod auth;
mod components {
    pub mod error_banner;
    pub mod form_field;
    pub mod layout;
    pub mod location_card;
    pub mod pagination;
    pub mod tool_card;
}
pub mod logging;
mod pages {
    pub mod admin_dashboard;
    pub mod application_detail;
    pub mod applications;
    pub mod contact;
    pub mod forgot_password;
    pub mod landing;
    pub mod location_detail;
    pub mod location_form;
    pub mod locations;
    pub mod login;
    pub mod my_profile;
    pub mod profile;
    pub mod register;
    pub mod showcase;
    pub mod tool_detail;
    pub mod tool_form;
    pub mod tools;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::layout::MainLayout;
use crate::pages::{
    admin_dashboard::AdminDashboardPage, application_detail::ApplicationDetailPage,
    applications::ApplicationsPage, contact::ContactPage, forgot_password::ForgotPasswordPage,
    landing::LandingPage, location_detail::LocationDetailPage, location_form::LocationFormPage,
    locations::LocationsPage, login::LoginPage, my_profile::MyProfilePage, profile::ProfilePage,
    register::RegisterPage, showcase::ShowcasePage, tool_detail::ToolDetailPage, tool_form::ToolFormPage,
    tools::ToolsPage,
};

use leptos::prelude::*;
use synergia_shared::{AppConfig, AppRoute};

// Browser adapters: `web_sys` implementations of the shared ports
// (`HttpClient`, `StoragePort`) plus the router.
pub(crate) mod web {
    mod dialog;
    mod file;
    mod http;
    pub mod router;
    mod storage;

    pub use dialog::confirm;
    pub use file::{picked_file, read_upload};
    pub use http::FetchHttpClient;
    pub use storage::{BrowserStorage, on_storage_change};
}

use web::router::{Link, Router, RouterOutlet};

fn page(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::MyProfile => view! { <MyProfilePage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::Locations => view! { <LocationsPage /> }.into_any(),
        AppRoute::LocationNew => view! { <LocationFormPage /> }.into_any(),
        AppRoute::LocationDetail(id) => view! { <LocationDetailPage id=id /> }.into_any(),
        AppRoute::LocationEdit(id) => view! { <LocationFormPage editing=id /> }.into_any(),
        AppRoute::Tools => view! { <ToolsPage /> }.into_any(),
        AppRoute::ToolNew => view! { <ToolFormPage /> }.into_any(),
        AppRoute::ToolDetail(id) => view! { <ToolDetailPage id=id /> }.into_any(),
        AppRoute::ToolEdit(id) => view! { <ToolFormPage editing=id /> }.into_any(),
        AppRoute::Applications => view! { <ApplicationsPage /> }.into_any(),
        AppRoute::ApplicationDetail(id) => view! { <ApplicationDetailPage id=id /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Showcase(site) => view! { <ShowcasePage site=site /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                    <Link to=AppRoute::Landing.to_path() class="btn btn-primary mt-6">"Voltar ao início"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Route matcher: authenticated pages render inside the sidebar layout.
fn route_matcher(route: AppRoute) -> AnyView {
    if route.uses_main_layout() {
        view! { <MainLayout>{page(route)}</MainLayout> }.into_any()
    } else {
        page(route)
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context
    let auth_ctx = AuthContext::new(AppConfig::from_build_env());
    provide_context(auth_ctx);

    // 2. Cross-tab sync
    init_auth(&auth_ctx);

    // 3. Guards react to login / logout
    let auth_status = auth_ctx.status_signal();

    view! {
        <Router auth_status=auth_status>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
