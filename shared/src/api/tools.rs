use super::{ApiClient, decode};
use crate::error::ApiResult;
use crate::http::{HttpClient, HttpMethod};
use crate::models::{Id, Tool, ToolPayload};

impl<C: HttpClient> ApiClient<C> {
    pub async fn list_tools(&self) -> ApiResult<Vec<Tool>> {
        self.get_list("/ferramentas").await
    }

    /// Tools with `quantidadeDisponivel > 0`, as filtered by the backend.
    pub async fn list_available_tools(&self) -> ApiResult<Vec<Tool>> {
        self.get_list("/ferramentas/disponiveis").await
    }

    pub async fn get_tool(&self, id: Id) -> ApiResult<Tool> {
        self.get(&format!("/ferramentas/{}", id)).await
    }

    pub async fn create_tool(&self, payload: &ToolPayload) -> ApiResult<Tool> {
        decode(self.send_json(HttpMethod::Post, "/ferramentas", payload).await?)
    }

    pub async fn update_tool(&self, id: Id, payload: &ToolPayload) -> ApiResult<Tool> {
        decode(
            self.send_json(HttpMethod::Put, &format!("/ferramentas/{}", id), payload)
                .await?,
        )
    }

    pub async fn delete_tool(&self, id: Id) -> ApiResult<()> {
        self.send_empty(HttpMethod::Delete, &format!("/ferramentas/{}", id))
            .await
            .map(|_| ())
    }

    pub async fn list_tools_by_location(&self, location_id: Id) -> ApiResult<Vec<Tool>> {
        self.get_list(&format!("/ferramentas/local/{}", location_id))
            .await
    }
}
