//! Login response decoding
//!
//! The backend has answered logins in several shapes over time. All of them
//! are reduced here to a single [`Session`]; anything else is a
//! [`DecodeError`], never a silent empty session.

use crate::error::DecodeError;
use crate::models::{Id, User};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const ID_KEYS: [&str; 4] = ["id", "userId", "usuarioId", "_id"];
const TOKEN_KEYS: [&str; 3] = ["token", "authToken", "accessToken"];
const ADMIN_FLAG_KEYS: [&str; 2] = ["isAdmin", "admin"];

fn admin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)admin").expect("Failed to compile admin role regex"))
}

/// The logged-in user as the console sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub user: User,
    pub token: Option<String>,
    pub is_admin: bool,
}

impl Session {
    pub fn user_id(&self) -> Option<Id> {
        self.user.id
    }

    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }

    pub fn initials(&self) -> String {
        self.user.initials()
    }

    /// Object written under the user storage key: the user record plus
    /// `token` and the derived `isAdmin`.
    pub fn to_stored_value(&self) -> Value {
        let mut obj = match serde_json::to_value(&self.user) {
            Ok(Value::Object(obj)) => obj,
            _ => Map::new(),
        };
        if let Some(token) = &self.token {
            obj.insert("token".to_string(), Value::String(token.clone()));
        }
        obj.insert("isAdmin".to_string(), Value::Bool(self.is_admin));
        Value::Object(obj)
    }

    /// Rehydrates a session from the raw storage string.
    pub fn from_stored(raw: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(raw)?;
        decode_session(&value)
    }
}

/// `isAdmin === true` (or the legacy `admin === true`), or a `role` / `roles`
/// entry matching `/admin/i`. Anything that is not an object is not an admin.
pub fn detect_is_admin(user: Option<&Value>) -> bool {
    let Some(Value::Object(obj)) = user else {
        return false;
    };

    if ADMIN_FLAG_KEYS
        .iter()
        .any(|key| obj.get(*key) == Some(&Value::Bool(true)))
    {
        return true;
    }

    if let Some(Value::String(role)) = obj.get("role") {
        if admin_pattern().is_match(role) {
            return true;
        }
    }

    match obj.get("roles") {
        Some(Value::Array(roles)) => roles.iter().any(|role| match role {
            Value::String(name) => admin_pattern().is_match(name),
            Value::Object(entry) => entry
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| admin_pattern().is_match(name)),
            _ => false,
        }),
        _ => false,
    }
}

/// First of `id`, `userId`, `usuarioId`, `_id`; numeric strings are accepted.
pub fn resolve_user_id(user: &Value) -> Option<Id> {
    ID_KEYS.iter().find_map(|key| match user.get(*key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// First non-empty of `token`, `authToken`, `accessToken`.
pub fn resolve_token(user: &Value) -> Option<String> {
    TOKEN_KEYS.iter().find_map(|key| {
        user.get(*key)
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
    })
}

fn looks_like_user(obj: &Map<String, Value>) -> bool {
    ID_KEYS.iter().any(|key| obj.contains_key(*key)) || obj.contains_key("nomeCompleto")
}

/// Locates the user object inside a login response.
fn locate_user<'a>(root: &'a Map<String, Value>) -> Option<(&'a Map<String, Value>, Option<&'a Map<String, Value>>)> {
    // { usuario, token }
    if let Some(Value::Object(user)) = root.get("usuario") {
        return Some((user, None));
    }

    if let Some(Value::Object(data)) = root.get("data") {
        // { data: { usuario } }
        if let Some(Value::Object(user)) = data.get("usuario") {
            return Some((user, Some(data)));
        }
        // { data: { ...user } }
        if looks_like_user(data) {
            return Some((data, None));
        }
    }

    // bare user
    if looks_like_user(root) {
        return Some((root, None));
    }

    None
}

/// Reduces any known login response shape to a [`Session`].
pub fn decode_session(value: &Value) -> Result<Session, DecodeError> {
    let Value::Object(root) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let (user_obj, data_obj) = locate_user(root).ok_or(DecodeError::UnrecognizedShape)?;
    let user_value = Value::Object(user_obj.clone());

    let token = resolve_token(&user_value)
        .or_else(|| data_obj.and_then(|d| resolve_token(&Value::Object(d.clone()))))
        .or_else(|| resolve_token(value));

    let is_admin = detect_is_admin(Some(&user_value))
        || data_obj.is_some_and(|d| detect_is_admin(Some(&Value::Object(d.clone()))))
        || detect_is_admin(Some(value));

    let id = resolve_user_id(&user_value);

    let mut fields = user_obj.clone();
    for key in TOKEN_KEYS.iter().chain(ADMIN_FLAG_KEYS.iter()) {
        fields.remove(*key);
    }
    // `id` may arrive as a string; it is re-inserted from the resolved value
    fields.remove("id");

    let mut user: User = serde_json::from_value(Value::Object(fields))?;
    user.id = id;

    Ok(Session {
        user,
        token,
        is_admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_flag() {
        assert!(detect_is_admin(Some(&json!({ "isAdmin": true }))));
        assert!(detect_is_admin(Some(&json!({ "admin": true }))));
        assert!(!detect_is_admin(Some(&json!({ "isAdmin": "true" }))));
        assert!(!detect_is_admin(Some(&json!({ "isAdmin": false }))));
    }

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(detect_is_admin(Some(&json!({ "role": "ROLE_ADMIN" }))));
        assert!(detect_is_admin(Some(&json!({ "role": "Administrador" }))));
        assert!(!detect_is_admin(Some(&json!({ "role": "VOLUNTARIO" }))));
    }

    #[test]
    fn admin_roles_array() {
        assert!(detect_is_admin(Some(&json!({ "roles": ["USER", "admin"] }))));
        assert!(detect_is_admin(Some(&json!({ "roles": [{ "name": "ROLE_ADMIN" }] }))));
        assert!(!detect_is_admin(Some(&json!({ "roles": [{ "name": "ROLE_USER" }, 3] }))));
    }

    #[test]
    fn non_objects_are_never_admin() {
        assert!(!detect_is_admin(None));
        assert!(!detect_is_admin(Some(&Value::Null)));
        assert!(!detect_is_admin(Some(&json!("admin"))));
        assert!(!detect_is_admin(Some(&json!({}))));
    }

    #[test]
    fn id_and_token_aliases() {
        assert_eq!(resolve_user_id(&json!({ "usuarioId": 9 })), Some(9));
        assert_eq!(resolve_user_id(&json!({ "_id": "12" })), Some(12));
        assert_eq!(resolve_user_id(&json!({ "nome": "x" })), None);
        assert_eq!(
            resolve_token(&json!({ "token": "", "accessToken": "abc" })).as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn decodes_usuario_token_envelope() {
        let session = decode_session(&json!({
            "usuario": { "id": 1, "nomeCompleto": "Ana", "role": "ADMIN" },
            "token": "t-1"
        }))
        .unwrap();
        assert_eq!(session.user_id(), Some(1));
        assert_eq!(session.token.as_deref(), Some("t-1"));
        assert!(session.is_admin);
    }

    #[test]
    fn decodes_data_wrappers() {
        let nested = decode_session(&json!({
            "data": { "usuario": { "id": 2, "email": "b@x.org" }, "accessToken": "t-2" }
        }))
        .unwrap();
        assert_eq!(nested.user_id(), Some(2));
        assert_eq!(nested.token.as_deref(), Some("t-2"));
        assert!(!nested.is_admin);

        let flat = decode_session(&json!({ "data": { "id": 3, "authToken": "t-3" } })).unwrap();
        assert_eq!(flat.user_id(), Some(3));
        assert_eq!(flat.token.as_deref(), Some("t-3"));
    }

    #[test]
    fn decodes_bare_user() {
        let session = decode_session(&json!({ "nomeCompleto": "Caio", "isAdmin": true })).unwrap();
        assert_eq!(session.user.nome_completo.as_deref(), Some("Caio"));
        assert_eq!(session.user_id(), None);
        assert!(session.is_admin);
        assert!(!session.user.extra.contains_key("isAdmin"));
    }

    #[test]
    fn unknown_shapes_are_errors() {
        assert_eq!(decode_session(&json!("ok")), Err(DecodeError::NotAnObject));
        assert_eq!(
            decode_session(&json!({ "status": "ok" })),
            Err(DecodeError::UnrecognizedShape)
        );
        assert_eq!(
            decode_session(&json!({ "data": { "mensagem": "x" } })),
            Err(DecodeError::UnrecognizedShape)
        );
    }

    #[test]
    fn stored_value_round_trips() {
        let session = decode_session(&json!({
            "usuario": { "id": 5, "nomeCompleto": "Rita Lima", "roles": ["ADMIN"] },
            "token": "t-5"
        }))
        .unwrap();
        let stored = session.to_stored_value();
        assert_eq!(stored["isAdmin"], json!(true));
        assert_eq!(stored["token"], json!("t-5"));

        let restored = Session::from_stored(&stored.to_string()).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.initials(), "RL");
    }
}
