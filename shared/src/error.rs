use serde_json::Value;
use thiserror::Error;

// =========================================================
// Error envelope
// =========================================================

/// One entry of a Spring-style validation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

/// Whatever the backend (or the network) said went wrong, reduced to the
/// shapes observed in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEnvelope {
    /// Plain text body, or a JSON body with no recognizable field.
    Text(String),
    /// `{"errors": [...]}` or `{"errors": {"field": [...]}}`.
    FieldErrors(Vec<FieldError>),
    /// `{"message": "..."}`.
    ServerMessage(String),
    /// No response reached the client.
    Network(String),
}

impl ErrorEnvelope {
    /// Parses a raw response body.
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Self::from_value(&value),
            Err(_) => ErrorEnvelope::Text(trimmed.to_string()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let obj = match value {
            Value::String(s) => return ErrorEnvelope::Text(s.clone()),
            Value::Object(obj) => obj,
            Value::Null => return ErrorEnvelope::Text(String::new()),
            other => return ErrorEnvelope::Text(other.to_string()),
        };

        if let Some(message) = obj.get("message").and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return ErrorEnvelope::ServerMessage(message.to_string());
            }
        }

        match obj.get("errors") {
            Some(Value::Array(items)) if !items.is_empty() => {
                ErrorEnvelope::FieldErrors(items.iter().map(|item| field_error(None, item)).collect())
            }
            Some(Value::Object(by_field)) if !by_field.is_empty() => {
                let mut errors = Vec::new();
                for (field, entries) in by_field {
                    match entries {
                        Value::Array(items) => errors.extend(
                            items.iter().map(|item| field_error(Some(field.as_str()), item)),
                        ),
                        single => errors.push(field_error(Some(field.as_str()), single)),
                    }
                }
                ErrorEnvelope::FieldErrors(errors)
            }
            _ => ErrorEnvelope::Text(value.to_string()),
        }
    }

    /// Human-readable text for banners and alerts.
    pub fn message(&self) -> String {
        match self {
            ErrorEnvelope::Text(text) => text.clone(),
            ErrorEnvelope::ServerMessage(message) => message.clone(),
            ErrorEnvelope::Network(detail) => detail.clone(),
            ErrorEnvelope::FieldErrors(errors) => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

fn field_error(field: Option<&str>, item: &Value) -> FieldError {
    match item {
        Value::String(message) => FieldError {
            field: field.map(str::to_string),
            message: message.clone(),
        },
        Value::Object(obj) => {
            let message = obj
                .get("defaultMessage")
                .or_else(|| obj.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| item.to_string());
            let field = obj
                .get("field")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| field.map(str::to_string));
            FieldError { field, message }
        }
        other => FieldError {
            field: field.map(str::to_string),
            message: other.to_string(),
        },
    }
}

// =========================================================
// Client errors
// =========================================================

/// Failure to turn a response body into the expected record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("resposta não é um objeto JSON")]
    NotAnObject,
    #[error("formato de resposta de login não reconhecido")]
    UnrecognizedShape,
    #[error("JSON inválido: {0}")]
    Json(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Nenhuma resposta do servidor: {0}")]
    Network(String),
    #[error("Tempo limite de {0} ms excedido")]
    Timeout(u32),
    #[error("Sessão expirada ou não autorizada")]
    Unauthorized,
    #[error("Erro {status}: {}", .envelope.message())]
    Server { status: u16, envelope: ErrorEnvelope },
    #[error("Resposta inesperada do servidor: {0}")]
    Decode(#[from] DecodeError),
    #[error("Falha ao montar a requisição: {0}")]
    Request(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps any client failure onto the envelope union consumed by forms.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ApiError::Server { envelope, .. } => envelope.clone(),
            ApiError::Network(_) | ApiError::Timeout(_) => {
                ErrorEnvelope::Network(self.user_message())
            }
            other => ErrorEnvelope::Text(other.to_string()),
        }
    }

    /// The string a page shows to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Nenhuma resposta do servidor. Verifique backend/conexão.".to_string()
            }
            ApiError::Timeout(_) => {
                "O servidor demorou demais para responder. Tente novamente.".to_string()
            }
            ApiError::Unauthorized => "Sessão expirada. Faça login novamente.".to_string(),
            ApiError::Server { status, envelope } => {
                let message = envelope.message();
                if message.trim().is_empty() {
                    format!("Erro {}", status)
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_body() {
        let envelope = ErrorEnvelope::parse("Email já cadastrado");
        assert_eq!(envelope, ErrorEnvelope::Text("Email já cadastrado".into()));
        assert_eq!(envelope.message(), "Email já cadastrado");
    }

    #[test]
    fn json_string_body() {
        let envelope = ErrorEnvelope::parse("\"CPF já cadastrado\"");
        assert_eq!(envelope, ErrorEnvelope::Text("CPF já cadastrado".into()));
    }

    #[test]
    fn message_field_wins() {
        let body = json!({ "message": "Local não encontrado", "status": 404 }).to_string();
        assert_eq!(
            ErrorEnvelope::parse(&body),
            ErrorEnvelope::ServerMessage("Local não encontrado".into())
        );
    }

    #[test]
    fn spring_error_array() {
        let body = json!({
            "status": 400,
            "errors": [
                { "field": "nome", "defaultMessage": "não deve estar em branco" },
                { "field": "cep", "defaultMessage": "tamanho inválido" }
            ]
        })
        .to_string();

        let envelope = ErrorEnvelope::parse(&body);
        match &envelope {
            ErrorEnvelope::FieldErrors(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field.as_deref(), Some("nome"));
            }
            other => panic!("unexpected envelope: {:?}", other),
        }
        assert_eq!(
            envelope.message(),
            "não deve estar em branco; tamanho inválido"
        );
    }

    #[test]
    fn error_map_by_field() {
        let body = json!({ "errors": { "email": ["inválido", "obrigatório"] } }).to_string();
        let envelope = ErrorEnvelope::parse(&body);
        match envelope {
            ErrorEnvelope::FieldErrors(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().all(|e| e.field.as_deref() == Some("email")));
            }
            other => panic!("unexpected envelope: {:?}", other),
        }
    }

    #[test]
    fn unknown_json_falls_back_to_raw_text() {
        let body = json!({ "timestamp": "2025-01-01", "error": "Bad Request" }).to_string();
        match ErrorEnvelope::parse(&body) {
            ErrorEnvelope::Text(text) => assert!(text.contains("Bad Request")),
            other => panic!("unexpected envelope: {:?}", other),
        }
    }

    #[test]
    fn network_errors_map_to_network_envelope() {
        let err = ApiError::Network("connection refused".into());
        assert!(matches!(err.envelope(), ErrorEnvelope::Network(_)));
        assert!(err.user_message().starts_with("Nenhuma resposta do servidor"));
    }

    #[test]
    fn empty_server_message_uses_status() {
        let err = ApiError::Server {
            status: 500,
            envelope: ErrorEnvelope::Text(String::new()),
        };
        assert_eq!(err.user_message(), "Erro 500");
        assert_eq!(err.status(), Some(500));
    }
}
