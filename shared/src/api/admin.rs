use super::{ApiClient, decode};
use crate::error::ApiResult;
use crate::http::{HttpClient, HttpMethod};
use crate::models::{DashboardStats, Id, Location, User};
use serde_json::Value;

/// Inclusive date range (ISO dates) for the applications report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReportRange {
    pub data_inicio: String,
    pub data_fim: String,
}

impl<C: HttpClient> ApiClient<C> {
    pub async fn dashboard_statistics(&self) -> ApiResult<DashboardStats> {
        match self.get_value("/admin/dashboard/estatisticas").await? {
            Value::Null => Ok(DashboardStats::default()),
            value => decode(value),
        }
    }

    pub async fn admin_list_users(&self) -> ApiResult<Vec<User>> {
        self.get_list("/admin/usuarios").await
    }

    pub async fn pending_locations(&self) -> ApiResult<Vec<Location>> {
        self.get_list("/admin/locais/pendentes").await
    }

    pub async fn approve_location(&self, id: Id) -> ApiResult<()> {
        self.send_empty(HttpMethod::Put, &format!("/admin/locais/{}/aprovar", id))
            .await
            .map(|_| ())
    }

    pub async fn refuse_location(&self, id: Id) -> ApiResult<()> {
        self.send_empty(HttpMethod::Put, &format!("/admin/locais/{}/recusar", id))
            .await
            .map(|_| ())
    }

    /// Report payloads are rendered as-is, so they stay untyped.
    pub async fn applications_report(&self, range: &ApplicationReportRange) -> ApiResult<Value> {
        self.get_value(&format!(
            "/admin/relatorios/inscricoes?dataInicio={}&dataFim={}",
            urlencoding::encode(&range.data_inicio),
            urlencoding::encode(&range.data_fim)
        ))
        .await
    }

    pub async fn locations_report(&self) -> ApiResult<Value> {
        self.get_value("/admin/relatorios/locais").await
    }
}
