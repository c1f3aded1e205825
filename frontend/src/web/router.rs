//! History-API router
//!
//! All `window.history` access lives here. Every navigation runs the guard
//! from the shared route table and lands on the page it allows:
//! request -> guard -> history -> render.

use leptos::prelude::*;
use synergia_shared::routes::{AppRoute, AuthStatus, RouteDecision, is_force_public};
use wasm_bindgen::prelude::*;

fn current_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();
    (path, search)
}

fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Injected by the app so the router never touches the session store.
    auth_status: Signal<AuthStatus>,
}

impl RouterService {
    fn new(auth_status: Signal<AuthStatus>) -> Self {
        let (path, search) = current_location();
        let requested = AppRoute::from_path(&path);
        let initial = requested.resolve(auth_status.get_untracked(), is_force_public(&search));
        if initial != requested {
            tracing::info!("[router] {} redirected to {}", requested, initial);
            replace_history_state(&initial.to_path());
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            auth_status,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigates to a path such as `/locais/detalhe/3` or `/login?force=true`.
    pub fn navigate(&self, target: &str) {
        let (path, query) = split_target(target);
        self.go(AppRoute::from_path(path), is_force_public(query), target);
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.go(route, false, &route.to_path());
    }

    fn go(&self, target: AppRoute, force_public: bool, url: &str) {
        let status = self.auth_status.get_untracked();
        let (route, url) = match target.guard(status, force_public) {
            RouteDecision::Allow => (target, url.to_string()),
            RouteDecision::Redirect(to) => {
                tracing::info!("[router] access to {} denied, redirecting to {}", target, to);
                (to, to.to_path())
            }
        };

        push_history_state(&url);
        self.set_route.set(route);
        scroll_to_top();
    }

    /// Back/forward buttons go through the same guards.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth_status = self.auth_status;

        let closure = Closure::<dyn Fn()>::new(move || {
            let (path, search) = current_location();
            let target = AppRoute::from_path(&path);
            match target.guard(auth_status.get_untracked(), is_force_public(&search)) {
                RouteDecision::Allow => set_route.set(target),
                RouteDecision::Redirect(to) => {
                    replace_history_state(&to.to_path());
                    set_route.set(to);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        closure.forget();
    }

    /// Re-guards the current page whenever the session changes: logging in
    /// leaves the login page, logging out (or a 401) leaves protected pages.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth_status = self.auth_status;

        Effect::new(move |_| {
            let status = auth_status.get();
            let route = current_route.get_untracked();
            let (_, search) = current_location();

            if let RouteDecision::Redirect(to) = route.guard(status, is_force_public(&search)) {
                tracing::info!("[router] session changed on {}, redirecting to {}", route, to);
                push_history_state(&to.to_path());
                set_route.set(to);
            }
        });
    }
}

fn provide_router(auth_status: Signal<AuthStatus>) -> RouterService {
    let router = RouterService::new(auth_status);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Full page load; drops every signal and in-flight request.
pub fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window()
        && let Err(e) = window.location().set_href(path)
    {
        tracing::error!("[router] could not load {}: {:?}", path, e);
    }
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(auth_status: Signal<AuthStatus>, children: Children) -> impl IntoView {
    provide_router(auth_status);

    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// In-app anchor: keeps the `href` for middle-click, navigates in place otherwise.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
