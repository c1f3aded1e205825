use super::{ApiClient, decode_normalized};
use crate::error::ApiResult;
use crate::http::{HttpClient, HttpMethod, HttpRequest};
use crate::models::{Id, LoginRequest, Profile, ProfileUpdate, RegisterRequest, User};
use crate::normalize::normalize_keys;
use serde_json::Value;

/// Some endpoints wrap the user as `{ "usuario": {...} }`.
fn unwrap_user(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if matches!(obj.get("usuario"), Some(Value::Object(_))) => {
            obj.remove("usuario").unwrap_or(Value::Null)
        }
        other => other,
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// `POST /usuarios/login`, raw (normalized) response for session decoding.
    ///
    /// Bypasses the global 401 handling so wrong credentials surface the
    /// server message instead of a forced logout.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<Value> {
        let req = HttpRequest::new(&self.url("/usuarios/login"), HttpMethod::Post)
            .with_json(credentials)?;
        let value = self.dispatch(req, false).await?.value()?;
        Ok(normalize_keys(value))
    }

    /// `POST /usuarios/cadastro`.
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResult<User> {
        let value = self
            .send_json(HttpMethod::Post, "/usuarios/cadastro", payload)
            .await?;
        decode_normalized(unwrap_user(value))
    }

    /// `GET /meu-perfil/{id}`: either `{usuario, inscricoes}` or a bare user.
    pub async fn get_profile(&self, user_id: Id) -> ApiResult<Profile> {
        let value = normalize_keys(self.get_value(&format!("/meu-perfil/{}", user_id)).await?);
        if matches!(value.get("usuario"), Some(Value::Object(_))) {
            return super::decode(value);
        }
        Ok(Profile {
            usuario: super::decode(value)?,
            inscricoes: Vec::new(),
        })
    }

    /// `PUT /meu-perfil/{id}`.
    pub async fn update_profile(&self, user_id: Id, payload: &ProfileUpdate) -> ApiResult<User> {
        let value = self
            .send_json(HttpMethod::Put, &format!("/meu-perfil/{}", user_id), payload)
            .await?;
        decode_normalized(unwrap_user(value))
    }

    /// `GET /usuarios`.
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        match self.get_value("/usuarios").await? {
            Value::Null => Ok(Vec::new()),
            value => decode_normalized(value),
        }
    }

    /// `GET /usuarios/{id}`.
    pub async fn get_user(&self, user_id: Id) -> ApiResult<User> {
        let value = self.get_value(&format!("/usuarios/{}", user_id)).await?;
        decode_normalized(unwrap_user(value))
    }

    /// `PUT /usuarios/{id}`.
    pub async fn update_user(&self, user_id: Id, payload: &ProfileUpdate) -> ApiResult<User> {
        let value = self
            .send_json(HttpMethod::Put, &format!("/usuarios/{}", user_id), payload)
            .await?;
        decode_normalized(unwrap_user(value))
    }
}
