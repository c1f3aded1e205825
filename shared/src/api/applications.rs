use super::{ApiClient, decode};
use crate::error::ApiResult;
use crate::http::{HttpClient, HttpMethod};
use crate::models::{Application, ApplicationPayload, ApplicationStatus, Id, RefusalPayload};
use serde_json::Value;

impl<C: HttpClient> ApiClient<C> {
    pub async fn list_applications(&self) -> ApiResult<Vec<Application>> {
        self.get_list("/inscricoes").await
    }

    pub async fn get_application(&self, id: Id) -> ApiResult<Application> {
        self.get(&format!("/inscricoes/{}", id)).await
    }

    pub async fn create_application(&self, payload: &ApplicationPayload) -> ApiResult<Application> {
        decode(self.send_json(HttpMethod::Post, "/inscricoes", payload).await?)
    }

    /// `PUT /inscricoes/{id}/confirmar`; an empty answer is reported as `None`.
    pub async fn confirm_application(&self, id: Id) -> ApiResult<Option<Application>> {
        let value = self
            .send_empty(HttpMethod::Put, &format!("/inscricoes/{}/confirmar", id))
            .await?;
        decode_optional(value)
    }

    /// `PUT /inscricoes/{id}/recusar` with an optional `{motivo}`.
    pub async fn refuse_application(
        &self,
        id: Id,
        reason: Option<&str>,
    ) -> ApiResult<Option<Application>> {
        let payload = RefusalPayload {
            motivo: reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        };
        let value = self
            .send_json(HttpMethod::Put, &format!("/inscricoes/{}/recusar", id), &payload)
            .await?;
        decode_optional(value)
    }

    pub async fn delete_application(&self, id: Id) -> ApiResult<()> {
        self.send_empty(HttpMethod::Delete, &format!("/inscricoes/{}", id))
            .await
            .map(|_| ())
    }

    pub async fn list_applications_by_user(&self, user_id: Id) -> ApiResult<Vec<Application>> {
        self.get_list(&format!("/inscricoes/usuario/{}", user_id))
            .await
    }

    pub async fn list_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> ApiResult<Vec<Application>> {
        self.get_list(&format!("/inscricoes/status/{}", status.as_path()))
            .await
    }

    pub async fn list_applications_by_location(
        &self,
        location_id: Id,
    ) -> ApiResult<Vec<Application>> {
        self.get_list(&format!("/inscricoes/local/{}", location_id))
            .await
    }
}

fn decode_optional(value: Value) -> ApiResult<Option<Application>> {
    match value {
        Value::Object(_) => decode(value).map(Some),
        _ => Ok(None),
    }
}
