//! Form submission flows
//!
//! Every flow validates first and only then touches the network, so an
//! invalid form never produces a request. Pages drive a [`FormStatus`] from
//! the returned [`SubmitError`].

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::models::{Application, Id, ImageUpload, Location, Tool, User};
use crate::session::Session;
use crate::store::SessionStore;
use crate::validation::{
    ApplicationForm, LocationForm, LoginForm, ProfileForm, RegistrationForm, ToolForm,
    ValidationErrors,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use thiserror::Error;

/// idle → submitting → success / error
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(SubmitError),
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            FormStatus::Error(e) => Some(e.user_message()),
            _ => None,
        }
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        match self {
            FormStatus::Error(SubmitError::Invalid(errors)) => errors.get(field).map(str::to_string),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match self {
            FormStatus::Success(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(errors) => errors.first().unwrap_or_default().to_string(),
            SubmitError::Api(e) => e.user_message(),
        }
    }
}

impl From<ValidationErrors> for SubmitError {
    fn from(errors: ValidationErrors) -> Self {
        SubmitError::Invalid(errors)
    }
}

pub type SubmitResult<T> = Result<T, SubmitError>;

/// Create (`editing == None`) or update a location; multipart when an image
/// file is attached.
pub async fn submit_location<C: HttpClient, Tz: TimeZone>(
    api: &ApiClient<C>,
    form: &LocationForm,
    image: Option<&ImageUpload>,
    editing: Option<Id>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> SubmitResult<Location> {
    let mut checked = form.clone();
    checked.has_image_file = image.is_some();
    let payload = checked.validate(now, tz)?;

    let location = match editing {
        Some(id) => api.update_location(id, &payload, image).await?,
        None => api.create_location(&payload, image).await?,
    };
    tracing::info!("location saved: {:?}", location.id);
    Ok(location)
}

pub async fn submit_tool<C: HttpClient>(
    api: &ApiClient<C>,
    form: &ToolForm,
    editing: Option<Id>,
) -> SubmitResult<Tool> {
    let payload = form.validate()?;
    let tool = match editing {
        Some(id) => api.update_tool(id, &payload).await?,
        None => api.create_tool(&payload).await?,
    };
    tracing::info!("tool saved: {:?}", tool.id);
    Ok(tool)
}

pub async fn submit_application<C: HttpClient, Tz: TimeZone>(
    api: &ApiClient<C>,
    form: &ApplicationForm,
    session: Option<&Session>,
    location_id: Id,
    now: DateTime<Utc>,
    tz: &Tz,
) -> SubmitResult<Application> {
    let payload = form.validate(session.and_then(Session::user_id), location_id, now, tz)?;
    Ok(api.create_application(&payload).await?)
}

pub async fn submit_login<C: HttpClient>(
    store: &SessionStore,
    api: &ApiClient<C>,
    form: &LoginForm,
) -> SubmitResult<Session> {
    let request = form.validate()?;
    Ok(store.login(api, &request.email, &request.senha).await?)
}

pub async fn submit_registration<C: HttpClient>(
    store: &SessionStore,
    api: &ApiClient<C>,
    form: &RegistrationForm,
    today: NaiveDate,
) -> SubmitResult<User> {
    let payload = form.validate(today)?;
    Ok(store.register(api, &payload).await?)
}

/// Saves the profile and merges the answer into the stored user, so fields
/// the backend leaves out of its reply are not lost.
pub async fn submit_profile<C: HttpClient>(
    store: &SessionStore,
    api: &ApiClient<C>,
    form: &ProfileForm,
) -> SubmitResult<User> {
    let payload = form.validate()?;
    let current = store
        .current_user()
        .ok_or(SubmitError::Api(ApiError::Unauthorized))?;
    let user_id = current
        .user_id()
        .ok_or(SubmitError::Api(ApiError::Unauthorized))?;

    let saved = api.update_profile(user_id, &payload).await?;
    let mut merged = current.user;
    merged.merge(saved);
    store.update_user(merged.clone());
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::http::{HttpMethod, MockHttpClient, RequestBody};
    use crate::storage::{MemoryStorage, StoragePort};
    use crate::STORAGE_USER_KEY;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://localhost:8080/api";

    fn api() -> (Arc<MemoryStorage>, ApiClient<MockHttpClient>) {
        let storage = Arc::new(MemoryStorage::new());
        let api = ApiClient::new(&AppConfig::default(), MockHttpClient::new(), storage.clone());
        (storage, api)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 10, 12, 0, 0).unwrap()
    }

    fn location_form(data_inicio: &str) -> LocationForm {
        LocationForm {
            nome: "Praia do Guarujá".into(),
            descricao: "Limpeza da orla".into(),
            imagem_url: "https://img/guaruja.png".into(),
            rua: "Av. Atlântica".into(),
            numero: "1".into(),
            cep: "11410-000".into(),
            data_inicio: data_inicio.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_past_start_date_never_hits_network() {
        let (_storage, api) = api();
        for date in ["2030-01-10T12:00", "2029-12-31T23:59", "2020-01-01T00:00"] {
            let err = submit_location(&api, &location_form(date), None, None, now(), &Utc)
                .await
                .unwrap_err();
            assert!(matches!(err, SubmitError::Invalid(_)));
        }
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_future_start_date_posts_json() {
        let (_storage, api) = api();
        api.http().mock_response(
            HttpMethod::Post,
            &format!("{}/locais", BASE),
            201,
            json!({ "id": 11, "nome": "Praia do Guarujá" }),
        );

        let location = submit_location(
            &api,
            &location_form("2030-01-10T12:01"),
            None,
            None,
            now(),
            &Utc,
        )
        .await
        .unwrap();
        assert_eq!(location.id, Some(11));
        assert_eq!(api.http().request_count(), 1);

        let sent = api.http().last_request().unwrap();
        assert_eq!(
            sent.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_image_file_goes_multipart() {
        let (_storage, api) = api();
        api.http().mock_response(
            HttpMethod::Put,
            &format!("{}/locais/11", BASE),
            200,
            json!({ "id": 11, "nome": "Praia do Guarujá" }),
        );

        let mut form = location_form("2030-03-01T08:00");
        form.imagem_url.clear();
        let image = ImageUpload {
            file_name: "orla.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };

        submit_location(&api, &form, Some(&image), Some(11), now(), &Utc)
            .await
            .unwrap();

        let sent = api.http().last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Put);
        match sent.body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 2);
                match &parts[0] {
                    crate::http::MultipartPart::Text { name, value } => {
                        assert_eq!(name, "local");
                        let local: serde_json::Value = serde_json::from_str(value).unwrap();
                        assert_eq!(local["dataInicio"], json!("2030-03-01T08:00:00.000Z"));
                        assert_eq!(local["imagemUrl"], json!(""));
                    }
                    other => panic!("unexpected part: {:?}", other),
                }
                assert!(matches!(
                    &parts[1],
                    crate::http::MultipartPart::File { name, .. } if name == "imagem"
                ));
            }
            other => panic!("unexpected body: {:?}", other),
        }
        assert!(!sent.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_application_validation_before_network() {
        let (_storage, api) = api();
        let session = Session {
            user: User {
                id: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };

        let form = ApplicationForm {
            data_desejada: "2030-01-09T10:00".into(),
        };
        let err = submit_application(&api, &form, Some(&session), 3, now(), &Utc)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "A data deve ser no futuro");
        assert_eq!(api.http().request_count(), 0);

        api.http().mock_response(
            HttpMethod::Post,
            &format!("{}/inscricoes", BASE),
            201,
            json!({ "id": 5, "usuarioId": 1, "localId": 3, "status": "PENDENTE" }),
        );
        let form = ApplicationForm {
            data_desejada: "2030-01-11T10:00".into(),
        };
        let created = submit_application(&api, &form, Some(&session), 3, now(), &Utc)
            .await
            .unwrap();
        assert_eq!(created.id, Some(5));
    }

    #[tokio::test]
    async fn test_tool_server_error_surfaces_field_messages() {
        let (_storage, api) = api();
        api.http().mock_response(
            HttpMethod::Post,
            &format!("{}/ferramentas", BASE),
            400,
            json!({ "errors": [{ "field": "nome", "defaultMessage": "já existe" }] }),
        );
        let form = ToolForm {
            nome: "Pá".into(),
            descricao: "Pá".into(),
            quantidade: "3".into(),
            ..Default::default()
        };

        let status = match submit_tool(&api, &form, None).await {
            Ok(_) => FormStatus::Success("ok".into()),
            Err(e) => FormStatus::Error(e),
        };
        assert_eq!(status.error_message().as_deref(), Some("já existe"));
        assert_eq!(status.field_error("nome"), None);
    }

    #[tokio::test]
    async fn test_invalid_registration_never_hits_network() {
        let (storage, api) = api();
        let store = SessionStore::new(storage);
        let form = RegistrationForm {
            nome_completo: "Ana".into(),
            data_nascimento: "2020-01-01".into(),
            cpf: "123".into(),
            email: "ana@synergia.org".into(),
            senha: "123456".into(),
            confirmacao_senha: "123456".into(),
        };
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let status = match submit_registration(&store, &api, &form, today).await {
            Ok(_) => FormStatus::Idle,
            Err(e) => FormStatus::Error(e),
        };
        assert_eq!(
            status.field_error("dataNascimento").as_deref(),
            Some("Você deve ter pelo menos 16 anos")
        );
        assert_eq!(api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_update_refreshes_store() {
        let (storage, api) = api();
        storage
            .set(
                STORAGE_USER_KEY,
                &json!({ "id": 7, "nomeCompleto": "Ana", "token": "t-7" }).to_string(),
            )
            .unwrap();
        let store = SessionStore::new(storage.clone());
        api.http().mock_response(
            HttpMethod::Put,
            &format!("{}/meu-perfil/7", BASE),
            200,
            json!({ "usuario": { "nome_completo": "Ana Paula", "email": "ana@synergia.org" } }),
        );

        let form = ProfileForm {
            nome_completo: "Ana Paula".into(),
            email: "ana@synergia.org".into(),
            ..Default::default()
        };
        let saved = submit_profile(&store, &api, &form).await.unwrap();
        assert_eq!(saved.id, Some(7));

        let session = store.current_user().unwrap();
        assert_eq!(session.display_name(), "Ana Paula");
        assert_eq!(session.token.as_deref(), Some("t-7"));
        assert_eq!(
            api.http()
                .last_request()
                .unwrap()
                .headers
                .get("Authorization")
                .map(String::as_str),
            Some("Bearer t-7")
        );
    }

    #[tokio::test]
    async fn test_profile_reply_keeps_fields_it_leaves_out() {
        let (storage, api) = api();
        storage
            .set(
                STORAGE_USER_KEY,
                &json!({
                    "id": 7,
                    "nomeCompleto": "Ana",
                    "cpf": "123.456.789-00",
                    "fotoPerfil": "https://img/ana.png",
                    "token": "t-7"
                })
                .to_string(),
            )
            .unwrap();
        let store = SessionStore::new(storage.clone());
        api.http().mock_response(
            HttpMethod::Put,
            &format!("{}/meu-perfil/7", BASE),
            200,
            json!({ "usuario": { "nomeCompleto": "Ana Paula", "cpf": null } }),
        );

        let form = ProfileForm {
            nome_completo: "Ana Paula".into(),
            email: "ana@synergia.org".into(),
            ..Default::default()
        };
        let saved = submit_profile(&store, &api, &form).await.unwrap();
        assert_eq!(saved.nome_completo.as_deref(), Some("Ana Paula"));
        assert_eq!(saved.cpf.as_deref(), Some("123.456.789-00"));

        let session = store.current_user().unwrap();
        assert_eq!(session.display_name(), "Ana Paula");
        assert_eq!(session.user.cpf.as_deref(), Some("123.456.789-00"));
        assert_eq!(session.user.foto_perfil.as_deref(), Some("https://img/ana.png"));
        assert_eq!(session.token.as_deref(), Some("t-7"));
    }

    #[tokio::test]
    async fn test_login_form_requires_fields() {
        let (storage, api) = api();
        let store = SessionStore::new(storage);
        let err = submit_login(&store, &api, &LoginForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Email é obrigatório");
        assert_eq!(api.http().request_count(), 0);
    }
}
