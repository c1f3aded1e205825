//! Route table
//!
//! Pure data: paths, access classes and the guard decision. The browser
//! router in the frontend only applies what is decided here.

use crate::models::Id;
use crate::session::Session;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Landing,
    Contact,
    Login,
    Register,
    ForgotPassword,
    /// Profile edit form.
    MyProfile,
    AdminDashboard,
    Locations,
    LocationNew,
    LocationDetail(Id),
    LocationEdit(Id),
    Tools,
    ToolNew,
    ToolDetail(Id),
    ToolEdit(Id),
    Applications,
    ApplicationDetail(Id),
    /// Profile overview with the user's applications.
    Profile,
    /// Public page describing one of the sites the NGO works on.
    Showcase(ShowcaseSite),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowcaseSite {
    Guaruja,
    Cipo,
    Tiete,
}

impl ShowcaseSite {
    pub const ALL: [ShowcaseSite; 3] = [Self::Guaruja, Self::Cipo, Self::Tiete];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Guaruja => "guaruja",
            Self::Cipo => "cipo",
            Self::Tiete => "tiete",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|site| site.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Login-like pages; a logged-in user is sent away.
    PublicOnly,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(AppRoute),
}

/// What the guards need to know about the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub admin: bool,
}

impl AuthStatus {
    pub fn from_session(session: Option<&Session>) -> Self {
        Self {
            authenticated: session.is_some(),
            admin: session.is_some_and(|s| s.is_admin),
        }
    }
}

fn parse_id(segment: &str) -> Option<Id> {
    segment.parse().ok()
}

impl AppRoute {
    /// Parses a location path; the query string and trailing slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Landing,
            ["contato"] => Self::Contact,
            ["login"] => Self::Login,
            ["cadastro"] => Self::Register,
            ["esqueci-senha"] => Self::ForgotPassword,
            ["meuperfil"] => Self::MyProfile,
            ["admin"] | ["dashboard"] | ["home"] => Self::AdminDashboard,
            ["locais"] => Self::Locations,
            ["locais", "novo"] => Self::LocationNew,
            ["locais", "detalhe", id] => parse_id(id).map_or(Self::NotFound, Self::LocationDetail),
            ["locais", "editar", id] => parse_id(id).map_or(Self::NotFound, Self::LocationEdit),
            ["ferramentas"] => Self::Tools,
            ["ferramentas", "novo"] => Self::ToolNew,
            ["ferramentas", "detalhe", id] => parse_id(id).map_or(Self::NotFound, Self::ToolDetail),
            ["ferramentas", "editar", id] => parse_id(id).map_or(Self::NotFound, Self::ToolEdit),
            ["inscricoes"] => Self::Applications,
            ["inscricoes", "detalhe", id] => {
                parse_id(id).map_or(Self::NotFound, Self::ApplicationDetail)
            }
            ["perfil"] => Self::Profile,
            [slug] => ShowcaseSite::from_slug(slug).map_or(Self::NotFound, Self::Showcase),
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Contact => "/contato".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/cadastro".to_string(),
            Self::ForgotPassword => "/esqueci-senha".to_string(),
            Self::MyProfile => "/meuperfil".to_string(),
            Self::AdminDashboard => "/admin".to_string(),
            Self::Locations => "/locais".to_string(),
            Self::LocationNew => "/locais/novo".to_string(),
            Self::LocationDetail(id) => format!("/locais/detalhe/{}", id),
            Self::LocationEdit(id) => format!("/locais/editar/{}", id),
            Self::Tools => "/ferramentas".to_string(),
            Self::ToolNew => "/ferramentas/novo".to_string(),
            Self::ToolDetail(id) => format!("/ferramentas/detalhe/{}", id),
            Self::ToolEdit(id) => format!("/ferramentas/editar/{}", id),
            Self::Applications => "/inscricoes".to_string(),
            Self::ApplicationDetail(id) => format!("/inscricoes/detalhe/{}", id),
            Self::Profile => "/perfil".to_string(),
            Self::Showcase(site) => format!("/{}", site.slug()),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Landing | Self::Contact | Self::Showcase(_) | Self::NotFound => {
                RouteAccess::Public
            }
            Self::Login | Self::Register | Self::ForgotPassword => RouteAccess::PublicOnly,
            Self::Locations | Self::LocationDetail(_) | Self::Profile | Self::MyProfile => {
                RouteAccess::Authenticated
            }
            Self::AdminDashboard
            | Self::LocationNew
            | Self::LocationEdit(_)
            | Self::Tools
            | Self::ToolNew
            | Self::ToolDetail(_)
            | Self::ToolEdit(_)
            | Self::Applications
            | Self::ApplicationDetail(_) => RouteAccess::Admin,
        }
    }

    /// Where a logged-in visitor lands.
    pub fn home_for(status: AuthStatus) -> Self {
        if status.admin {
            Self::AdminDashboard
        } else {
            Self::Locations
        }
    }

    /// Pages rendered inside the sidebar layout.
    pub fn uses_main_layout(&self) -> bool {
        matches!(
            self.access(),
            RouteAccess::Authenticated | RouteAccess::Admin
        ) && !matches!(self, Self::MyProfile)
    }

    /// `force_public` is the `?force=true` escape hatch of login-like pages.
    pub fn guard(&self, status: AuthStatus, force_public: bool) -> RouteDecision {
        match self.access() {
            RouteAccess::Public => RouteDecision::Allow,
            RouteAccess::PublicOnly => {
                if status.authenticated && !force_public {
                    RouteDecision::Redirect(Self::home_for(status))
                } else {
                    RouteDecision::Allow
                }
            }
            RouteAccess::Authenticated => {
                if status.authenticated {
                    RouteDecision::Allow
                } else {
                    RouteDecision::Redirect(Self::Login)
                }
            }
            RouteAccess::Admin => {
                if !status.authenticated {
                    RouteDecision::Redirect(Self::Login)
                } else if !status.admin {
                    RouteDecision::Redirect(Self::Locations)
                } else {
                    RouteDecision::Allow
                }
            }
        }
    }

    /// Applies guards until a page is allowed; redirects never chain more than once.
    pub fn resolve(&self, status: AuthStatus, force_public: bool) -> Self {
        match self.guard(status, force_public) {
            RouteDecision::Allow => *self,
            RouteDecision::Redirect(target) => target,
        }
    }
}

/// `?force=true` in a query string.
pub fn is_force_public(query: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "force=true")
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANON: AuthStatus = AuthStatus {
        authenticated: false,
        admin: false,
    };
    const VOLUNTEER: AuthStatus = AuthStatus {
        authenticated: true,
        admin: false,
    };
    const ADMIN: AuthStatus = AuthStatus {
        authenticated: true,
        admin: true,
    };

    #[test]
    fn test_paths_parse() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/locais/detalhe/42"), AppRoute::LocationDetail(42));
        assert_eq!(AppRoute::from_path("/inscricoes/detalhe/7/"), AppRoute::ApplicationDetail(7));
        assert_eq!(AppRoute::from_path("/login?force=true"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/locais/detalhe/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/praia"), AppRoute::NotFound);
    }

    #[test]
    fn test_showcase_pages_are_public() {
        assert_eq!(
            AppRoute::from_path("/guaruja"),
            AppRoute::Showcase(ShowcaseSite::Guaruja)
        );
        assert_eq!(AppRoute::from_path("/cipo/"), AppRoute::Showcase(ShowcaseSite::Cipo));
        assert_eq!(AppRoute::from_path("/tiete"), AppRoute::Showcase(ShowcaseSite::Tiete));
        for site in ShowcaseSite::ALL {
            let route = AppRoute::Showcase(site);
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
            for status in [ANON, VOLUNTEER, ADMIN] {
                assert_eq!(route.guard(status, false), RouteDecision::Allow);
            }
            assert!(!route.uses_main_layout());
        }
    }

    #[test]
    fn test_aliases_point_to_admin() {
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::AdminDashboard);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::AdminDashboard);
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            AppRoute::Landing,
            AppRoute::Contact,
            AppRoute::Register,
            AppRoute::MyProfile,
            AppRoute::LocationEdit(3),
            AppRoute::ToolDetail(9),
            AppRoute::Profile,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_admin_guard() {
        let route = AppRoute::Applications;
        assert_eq!(route.guard(ANON, false), RouteDecision::Redirect(AppRoute::Login));
        assert_eq!(route.guard(VOLUNTEER, false), RouteDecision::Redirect(AppRoute::Locations));
        assert_eq!(route.guard(ADMIN, false), RouteDecision::Allow);
    }

    #[test]
    fn test_authenticated_guard() {
        assert_eq!(
            AppRoute::Locations.guard(ANON, false),
            RouteDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(AppRoute::Profile.guard(VOLUNTEER, false), RouteDecision::Allow);
    }

    #[test]
    fn test_public_only_guard() {
        assert_eq!(AppRoute::Login.guard(ANON, false), RouteDecision::Allow);
        assert_eq!(
            AppRoute::Login.guard(ADMIN, false),
            RouteDecision::Redirect(AppRoute::AdminDashboard)
        );
        assert_eq!(
            AppRoute::Register.guard(VOLUNTEER, false),
            RouteDecision::Redirect(AppRoute::Locations)
        );
        assert_eq!(AppRoute::Login.guard(ADMIN, true), RouteDecision::Allow);
    }

    #[test]
    fn test_force_query() {
        assert!(is_force_public("?force=true"));
        assert!(is_force_public("a=1&force=true"));
        assert!(!is_force_public("?force=false"));
        assert!(!is_force_public(""));
    }

    #[test]
    fn test_redirect_targets_are_allowed() {
        for status in [ANON, VOLUNTEER, ADMIN] {
            for path in ["/admin", "/locais", "/login", "/ferramentas/novo", "/perfil"] {
                let resolved = AppRoute::from_path(path).resolve(status, false);
                assert_eq!(resolved.guard(status, false), RouteDecision::Allow);
            }
        }
    }
}
