use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::serde_helper as lenient;

/// Backend identifiers are numeric (JPA `Long`).
pub type Id = i64;

// =========================================================
// Domain Models
// =========================================================

/// A volunteer or administrator as returned by the backend.
///
/// Only the fields the console reads are typed; everything else is kept in
/// `extra` so the record survives a round trip through local storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_id")]
    pub id: Option<Id>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub nome_completo: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub data_nascimento: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub cpf: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub telefone: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub foto_perfil: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.nome_completo
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Usuário")
    }

    pub fn first_name(&self) -> &str {
        self.display_name().split_whitespace().next().unwrap_or("Usuário")
    }

    /// Overlays the fields `newer` actually carries; absent ones keep their value.
    pub fn merge(&mut self, newer: User) {
        let User {
            id,
            nome_completo,
            data_nascimento,
            cpf,
            email,
            telefone,
            foto_perfil,
            extra,
        } = newer;
        fn keep<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        keep(&mut self.id, id);
        keep(&mut self.nome_completo, nome_completo);
        keep(&mut self.data_nascimento, data_nascimento);
        keep(&mut self.cpf, cpf);
        keep(&mut self.email, email);
        keep(&mut self.telefone, telefone);
        keep(&mut self.foto_perfil, foto_perfil);
        self.extra.extend(extra);
    }

    /// Avatar letters: first and last name initials (`"Rita Lima"` → `"RL"`),
    /// the first two letters of a single name, `"US"` when unknown.
    pub fn initials(&self) -> String {
        let name = self.nome_completo.as_deref().unwrap_or("");
        let mut words = name.split_whitespace();
        let letters: String = match (words.next(), words.next_back()) {
            (Some(first), Some(last)) => first.chars().take(1).chain(last.chars().take(1)).collect(),
            (Some(only), None) => only.chars().take(2).collect(),
            _ => return "US".to_string(),
        };
        letters.to_uppercase()
    }
}

/// A tool requirement attached to a location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTool {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_id")]
    pub ferramenta_id: Option<Id>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub nome: Option<String>,
    #[serde(default = "default_quantity", deserialize_with = "quantity")]
    pub quantidade: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Lenient like the other counters, but a missing or `null` quantity means one.
fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    lenient::opt_count(deserializer).map(|q| q.unwrap_or_else(default_quantity))
}

/// A volunteering site ("Local").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_id")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nome: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub descricao: Option<String>,
    #[serde(default, alias = "imagem", deserialize_with = "lenient::opt_string")]
    pub imagem_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub endereco: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub rua: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub numero: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cep: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub data_inicio: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub data_final: Option<String>,
    #[serde(default, deserialize_with = "lenient::lossy_vec")]
    pub ferramentas: Vec<LocationTool>,
    /// Approval status as sent by the backend (e.g. `PENDENTE`, `APROVADO`).
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
}

impl Location {
    /// `Rua X, 12 - CEP 00000-000`, falling back to the free-form address.
    pub fn address_line(&self) -> Option<String> {
        let street = self.rua.as_deref().filter(|s| !s.trim().is_empty());
        match street {
            Some(rua) => {
                let mut line = rua.to_string();
                if let Some(numero) = self.numero.as_deref().filter(|s| !s.trim().is_empty()) {
                    line.push_str(", ");
                    line.push_str(numero);
                }
                if let Some(cep) = self.cep.as_deref().filter(|s| !s.trim().is_empty()) {
                    line.push_str(" - CEP ");
                    line.push_str(cep);
                }
                Some(line)
            }
            None => self.endereco.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// An inventory item ("Ferramenta").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_id")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub nome: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub descricao: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub imagem_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantidade: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantidade_disponivel: u32,
}

impl Tool {
    pub fn is_available(&self) -> bool {
        self.quantidade_disponivel > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "PENDENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMADA", alias = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "RECUSADA", alias = "REFUSED")]
    Refused,
}

impl ApplicationStatus {
    /// Literal used in `/inscricoes/status/{status}`.
    pub fn as_path(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDENTE",
            ApplicationStatus::Confirmed => "CONFIRMADA",
            ApplicationStatus::Refused => "RECUSADA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pendente",
            ApplicationStatus::Confirmed => "Aprovada",
            ApplicationStatus::Refused => "Recusada",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "badge badge-warning",
            ApplicationStatus::Confirmed => "badge badge-success",
            ApplicationStatus::Refused => "badge badge-error",
        }
    }
}

/// A volunteer's request to join a location ("Inscrição").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_id")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub usuario_id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub local_id: Option<Id>,
    #[serde(default, alias = "data", deserialize_with = "lenient::opt_string")]
    pub data_desejada: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub usuario_nome: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub usuario_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub usuario_telefone: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub usuario_foto: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_count")]
    pub usuario_idade: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub local_nome: Option<String>,
    #[serde(default, alias = "descricao", deserialize_with = "lenient::opt_string")]
    pub observacao: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub motivo: Option<String>,
}

/// Profile page payload: the user and their applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub usuario: User,
    #[serde(default, deserialize_with = "lenient::lossy_vec")]
    pub inscricoes: Vec<Application>,
}

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_usuarios: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_locais: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_ferramentas: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_inscricoes: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub inscricoes_pendentes: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub inscricoes_confirmadas: usize,
    #[serde(default, deserialize_with = "lenient::count")]
    pub inscricoes_recusadas: usize,
}

impl DashboardStats {
    /// Computes the counters from full lists, as the dashboard does client-side.
    pub fn from_lists(
        users: usize,
        locations: usize,
        tools: usize,
        applications: &[Application],
    ) -> Self {
        let count = |status| applications.iter().filter(|a| a.status == status).count();
        Self {
            total_usuarios: users,
            total_locais: locations,
            total_ferramentas: tools,
            total_inscricoes: applications.len(),
            inscricoes_pendentes: count(ApplicationStatus::Pending),
            inscricoes_confirmadas: count(ApplicationStatus::Confirmed),
            inscricoes_recusadas: count(ApplicationStatus::Refused),
        }
    }
}

// =========================================================
// Request payloads
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nome_completo: String,
    pub data_nascimento: String,
    /// Digits only.
    pub cpf: String,
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub nome_completo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_perfil: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationToolPayload {
    pub ferramenta_id: Id,
    pub quantidade: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    pub nome: String,
    pub descricao: String,
    /// Empty when an image file travels in the multipart body instead.
    pub imagem_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    pub rua: String,
    pub numero: String,
    pub cep: String,
    /// ISO 8601, UTC.
    pub data_inicio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_final: Option<String>,
    pub ferramentas: Vec<LocationToolPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPayload {
    pub nome: String,
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagem_url: Option<String>,
    pub quantidade: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_disponivel: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub usuario_id: Id,
    pub local_id: Id,
    /// ISO 8601, UTC.
    pub data_desejada: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefusalPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

/// An image picked in a form, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn application_status_wire_literals() {
        let app: Application = serde_json::from_value(json!({
            "id": 3, "status": "CONFIRMADA", "localNome": "Cipó"
        }))
        .unwrap();
        assert_eq!(app.status, ApplicationStatus::Confirmed);
        assert_eq!(serde_json::to_value(app.status).unwrap(), json!("CONFIRMADA"));

        let english: Application = serde_json::from_value(json!({ "status": "REFUSED" })).unwrap();
        assert_eq!(english.status, ApplicationStatus::Refused);
    }

    #[test]
    fn user_round_trip_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "nomeCompleto": "Ana Souza",
            "email": "ana@synergia.org",
            "cidade": "Santos"
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra.get("cidade"), Some(&json!("Santos")));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
        assert_eq!(user.initials(), "AS");
        assert_eq!(user.first_name(), "Ana");
    }

    #[test]
    fn initials_use_first_and_last_name() {
        let named = |n: Option<&str>| User {
            nome_completo: n.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(named(Some("Rita Lima")).initials(), "RL");
        assert_eq!(named(Some("  maria da silva  ")).initials(), "MS");
        assert_eq!(named(Some("Ana")).initials(), "AN");
        assert_eq!(named(Some("   ")).initials(), "US");
        assert_eq!(named(None).initials(), "US");
    }

    #[test]
    fn location_accepts_legacy_image_field() {
        let loc: Location = serde_json::from_value(json!({
            "id": 1, "nome": "Praia do Guarujá", "imagem": "https://img/1.png",
            "rua": "Av. Atlântica", "numero": "100", "cep": "11410-000"
        }))
        .unwrap();
        assert_eq!(loc.imagem_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(
            loc.address_line().as_deref(),
            Some("Av. Atlântica, 100 - CEP 11410-000")
        );
        assert!(loc.ferramentas.is_empty());
    }

    #[test]
    fn dashboard_counts_by_status() {
        let apps = vec![
            Application { status: ApplicationStatus::Pending, ..Default::default() },
            Application { status: ApplicationStatus::Pending, ..Default::default() },
            Application { status: ApplicationStatus::Refused, ..Default::default() },
        ];
        let stats = DashboardStats::from_lists(4, 2, 9, &apps);
        assert_eq!(stats.total_inscricoes, 3);
        assert_eq!(stats.inscricoes_pendentes, 2);
        assert_eq!(stats.inscricoes_confirmadas, 0);
        assert_eq!(stats.inscricoes_recusadas, 1);
    }
}
