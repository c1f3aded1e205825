use super::{ApiClient, decode};
use crate::error::ApiResult;
use crate::http::{HttpClient, HttpMethod};
use crate::models::{Id, ImageUpload, Location, LocationPayload};
use serde_json::Value;

impl<C: HttpClient> ApiClient<C> {
    pub async fn list_locations(&self) -> ApiResult<Vec<Location>> {
        self.get_list("/locais").await
    }

    pub async fn get_location(&self, id: Id) -> ApiResult<Location> {
        self.get(&format!("/locais/{}", id)).await
    }

    /// Locations accepting volunteers on `date` (ISO 8601).
    pub async fn list_locations_available_on(&self, date: &str) -> ApiResult<Vec<Location>> {
        self.get_list(&format!("/locais/disponiveis?data={}", urlencoding::encode(date)))
            .await
    }

    /// Raw availability answer for one location on `date`.
    pub async fn check_location_availability(&self, id: Id, date: &str) -> ApiResult<Value> {
        self.get_value(&format!(
            "/locais/{}/disponibilidade?data={}",
            id,
            urlencoding::encode(date)
        ))
        .await
    }

    pub async fn list_locations_by_user(&self, user_id: Id) -> ApiResult<Vec<Location>> {
        self.get_list(&format!("/locais/usuario/{}", user_id)).await
    }

    /// `POST /locais`, as JSON or, with an image, as multipart (`local` + `imagem`).
    pub async fn create_location(
        &self,
        payload: &LocationPayload,
        image: Option<&ImageUpload>,
    ) -> ApiResult<Location> {
        let value = match image {
            Some(image) => {
                self.send_multipart(HttpMethod::Post, "/locais", "local", payload, image)
                    .await?
            }
            None => self.send_json(HttpMethod::Post, "/locais", payload).await?,
        };
        decode(value)
    }

    pub async fn update_location(
        &self,
        id: Id,
        payload: &LocationPayload,
        image: Option<&ImageUpload>,
    ) -> ApiResult<Location> {
        let path = format!("/locais/{}", id);
        let value = match image {
            Some(image) => {
                self.send_multipart(HttpMethod::Put, &path, "local", payload, image)
                    .await?
            }
            None => self.send_json(HttpMethod::Put, &path, payload).await?,
        };
        decode(value)
    }

    pub async fn delete_location(&self, id: Id) -> ApiResult<()> {
        self.send_empty(HttpMethod::Delete, &format!("/locais/{}", id))
            .await
            .map(|_| ())
    }
}
