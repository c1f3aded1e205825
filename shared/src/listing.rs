//! Search and tab filters applied to fetched lists.

use crate::models::{Application, ApplicationStatus, Location, Tool};

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn normalized_query(query: &str) -> Option<String> {
    let q = query.trim();
    (!q.is_empty()).then(|| q.to_lowercase())
}

/// Matches `nome` or `descricao`, case-insensitively.
pub fn filter_locations<'a>(locations: &'a [Location], query: &str) -> Vec<&'a Location> {
    let Some(q) = normalized_query(query) else {
        return locations.iter().collect();
    };
    locations
        .iter()
        .filter(|l| contains_ci(Some(&l.nome), &q) || contains_ci(l.descricao.as_deref(), &q))
        .collect()
}

pub fn filter_tools<'a>(tools: &'a [Tool], query: &str) -> Vec<&'a Tool> {
    let Some(q) = normalized_query(query) else {
        return tools.iter().collect();
    };
    tools.iter().filter(|t| contains_ci(Some(&t.nome), &q)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationTab {
    #[default]
    All,
    Pending,
    Confirmed,
    Refused,
}

impl ApplicationTab {
    pub const ALL: [ApplicationTab; 4] = [
        ApplicationTab::All,
        ApplicationTab::Pending,
        ApplicationTab::Confirmed,
        ApplicationTab::Refused,
    ];

    pub fn status(&self) -> Option<ApplicationStatus> {
        match self {
            ApplicationTab::All => None,
            ApplicationTab::Pending => Some(ApplicationStatus::Pending),
            ApplicationTab::Confirmed => Some(ApplicationStatus::Confirmed),
            ApplicationTab::Refused => Some(ApplicationStatus::Refused),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationTab::All => "Todas",
            ApplicationTab::Pending => "Pendentes",
            ApplicationTab::Confirmed => "Aprovadas",
            ApplicationTab::Refused => "Recusadas",
        }
    }
}

/// Tab first, then search over volunteer name, email and location name.
pub fn filter_applications<'a>(
    applications: &'a [Application],
    tab: ApplicationTab,
    query: &str,
) -> Vec<&'a Application> {
    let q = normalized_query(query);
    applications
        .iter()
        .filter(|a| tab.status().is_none_or(|s| a.status == s))
        .filter(|a| match &q {
            None => true,
            Some(q) => {
                contains_ci(a.usuario_nome.as_deref(), q)
                    || contains_ci(a.usuario_email.as_deref(), q)
                    || contains_ci(a.local_nome.as_deref(), q)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub refused: usize,
}

impl StatusCounts {
    pub fn from_applications(applications: &[Application]) -> Self {
        applications.iter().fold(
            Self {
                all: applications.len(),
                ..Default::default()
            },
            |mut counts, a| {
                match a.status {
                    ApplicationStatus::Pending => counts.pending += 1,
                    ApplicationStatus::Confirmed => counts.confirmed += 1,
                    ApplicationStatus::Refused => counts.refused += 1,
                }
                counts
            },
        )
    }

    pub fn for_tab(&self, tab: ApplicationTab) -> usize {
        match tab {
            ApplicationTab::All => self.all,
            ApplicationTab::Pending => self.pending,
            ApplicationTab::Confirmed => self.confirmed,
            ApplicationTab::Refused => self.refused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(status: ApplicationStatus, nome: &str, local: &str) -> Application {
        Application {
            status,
            usuario_nome: Some(nome.to_string()),
            usuario_email: Some(format!("{}@synergia.org", nome.to_lowercase())),
            local_nome: Some(local.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_location_search_is_case_insensitive() {
        let locations = vec![
            Location {
                nome: "Praia do Guarujá".into(),
                ..Default::default()
            },
            Location {
                nome: "Rio Tietê".into(),
                descricao: Some("Limpeza das MARGENS".into()),
                ..Default::default()
            },
        ];
        assert_eq!(filter_locations(&locations, "PRAIA").len(), 1);
        assert_eq!(filter_locations(&locations, "margens")[0].nome, "Rio Tietê");
        assert_eq!(filter_locations(&locations, "  ").len(), 2);
    }

    #[test]
    fn test_tool_search() {
        let tools = vec![
            Tool {
                nome: "Pá".into(),
                ..Default::default()
            },
            Tool {
                nome: "Luvas".into(),
                ..Default::default()
            },
        ];
        assert_eq!(filter_tools(&tools, "luv").len(), 1);
        assert!(filter_tools(&tools, "rastelo").is_empty());
    }

    #[test]
    fn test_application_tabs_and_search() {
        let apps = vec![
            app(ApplicationStatus::Pending, "Ana", "Cipó"),
            app(ApplicationStatus::Confirmed, "Bruno", "Cipó"),
            app(ApplicationStatus::Pending, "Carla", "Tietê"),
        ];

        assert_eq!(filter_applications(&apps, ApplicationTab::All, "").len(), 3);
        assert_eq!(filter_applications(&apps, ApplicationTab::Pending, "").len(), 2);
        assert_eq!(filter_applications(&apps, ApplicationTab::Pending, "tietê").len(), 1);
        assert_eq!(filter_applications(&apps, ApplicationTab::All, "BRUNO@").len(), 1);
        assert!(filter_applications(&apps, ApplicationTab::Refused, "").is_empty());

        let counts = StatusCounts::from_applications(&apps);
        assert_eq!(
            counts,
            StatusCounts {
                all: 3,
                pending: 2,
                confirmed: 1,
                refused: 0
            }
        );
        assert_eq!(counts.for_tab(ApplicationTab::Confirmed), 1);
    }
}
