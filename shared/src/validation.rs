//! Synchronous form checks
//!
//! Each form struct holds the raw input strings as typed by the user and
//! `validate` turns them into the request payload, or the ordered list of
//! problems to show next to the fields.

use crate::date::{age_on, local_input_to_utc, parse_date, to_iso};
use crate::models::{
    ApplicationPayload, Id, LocationPayload, LocationToolPayload, LoginRequest, ProfileUpdate,
    RegisterRequest, ToolPayload,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const MIN_VOLUNTEER_AGE: i32 = 16;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const CPF_DIGITS: usize = 11;

fn email_pattern() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("Failed to compile email regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Progressive `000.000.000-00` mask, applied while typing.
pub fn format_cpf(value: &str) -> String {
    let digits: Vec<char> = digits_only(value).chars().take(CPF_DIGITS).collect();
    let mut out = String::with_capacity(14);
    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*d);
    }
    out
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_empty(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

// =========================================================
// ValidationErrors
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message per field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.entries.iter().map(|(_, m)| m.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Required `datetime-local` strictly after `now`.
fn future_instant<Tz: TimeZone>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    now: DateTime<Utc>,
    tz: &Tz,
    required_message: &str,
) -> Option<DateTime<Utc>> {
    if blank(value) {
        errors.add(field, required_message);
        return None;
    }
    match local_input_to_utc(value, tz) {
        None => {
            errors.add(field, "Data inválida");
            None
        }
        Some(instant) if instant <= now => {
            errors.add(field, "A data deve ser no futuro");
            None
        }
        Some(instant) => Some(instant),
    }
}

// =========================================================
// Location
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationForm {
    pub nome: String,
    pub descricao: String,
    pub imagem_url: String,
    /// An image file was picked; it travels as the multipart `imagem` part.
    pub has_image_file: bool,
    pub endereco: String,
    pub rua: String,
    pub numero: String,
    pub cep: String,
    /// `datetime-local` value.
    pub data_inicio: String,
    /// Optional `datetime-local` value.
    pub data_final: String,
    pub ferramentas: Vec<LocationToolPayload>,
}

impl LocationForm {
    pub fn validate<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<LocationPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if blank(&self.nome) {
            errors.add("nome", "Nome do local é obrigatório");
        }
        if blank(&self.descricao) {
            errors.add("descricao", "Descrição é obrigatória");
        }
        if blank(&self.rua) {
            errors.add("rua", "Rua é obrigatória");
        }
        if blank(&self.numero) {
            errors.add("numero", "Número é obrigatório");
        }
        if blank(&self.cep) {
            errors.add("cep", "CEP é obrigatório");
        }

        let inicio = future_instant(
            &mut errors,
            "dataInicio",
            &self.data_inicio,
            now,
            tz,
            "Data de início é obrigatória",
        );

        let final_ = if blank(&self.data_final) {
            None
        } else {
            match local_input_to_utc(&self.data_final, tz) {
                None => {
                    errors.add("dataFinal", "Data inválida");
                    None
                }
                Some(end) => {
                    if inicio.is_some_and(|start| end <= start) {
                        errors.add("dataFinal", "Data final deve ser posterior à data de início");
                    }
                    Some(end)
                }
            }
        };

        if !self.has_image_file && blank(&self.imagem_url) {
            errors.add(
                "imagem",
                "Imagem é obrigatória: envie um arquivo OU informe uma URL.",
            );
        }

        if self.ferramentas.iter().any(|f| f.quantidade == 0) {
            errors.add("ferramentas", "Quantidade de ferramenta deve ser maior que zero");
        }

        errors.into_result(|| LocationPayload {
            nome: self.nome.trim().to_string(),
            descricao: self.descricao.trim().to_string(),
            imagem_url: self.imagem_url.trim().to_string(),
            endereco: non_empty(&self.endereco),
            rua: self.rua.trim().to_string(),
            numero: self.numero.trim().to_string(),
            cep: self.cep.trim().to_string(),
            data_inicio: inicio.as_ref().map(to_iso).unwrap_or_default(),
            data_final: final_.as_ref().map(to_iso),
            ferramentas: self.ferramentas.clone(),
        })
    }

    pub fn toggle_tool(&mut self, tool_id: Id) {
        toggle_tool(&mut self.ferramentas, tool_id);
    }

    pub fn set_tool_quantity(&mut self, tool_id: Id, quantidade: u32) {
        set_tool_quantity(&mut self.ferramentas, tool_id, quantidade);
    }
}

/// Adds a tool with quantity 1, or removes it when already selected.
pub fn toggle_tool(selection: &mut Vec<LocationToolPayload>, tool_id: Id) {
    if let Some(pos) = selection.iter().position(|f| f.ferramenta_id == tool_id) {
        selection.remove(pos);
    } else {
        selection.push(LocationToolPayload {
            ferramenta_id: tool_id,
            quantidade: 1,
        });
    }
}

pub fn set_tool_quantity(selection: &mut [LocationToolPayload], tool_id: Id, quantidade: u32) {
    if let Some(entry) = selection.iter_mut().find(|f| f.ferramenta_id == tool_id) {
        entry.quantidade = quantidade;
    }
}

// =========================================================
// Tool
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolForm {
    pub nome: String,
    pub descricao: String,
    pub imagem_url: String,
    pub quantidade: String,
    /// Empty on creation: the backend starts with everything available.
    pub quantidade_disponivel: String,
}

impl ToolForm {
    pub fn validate(&self) -> Result<ToolPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if blank(&self.nome) {
            errors.add("nome", "Nome da ferramenta é obrigatório");
        }
        if blank(&self.descricao) {
            errors.add("descricao", "Descrição é obrigatória");
        }

        let quantidade = match self.quantidade.trim().parse::<u32>() {
            Ok(q) if q > 0 => Some(q),
            _ => {
                errors.add("quantidade", "Quantidade deve ser um número positivo");
                None
            }
        };

        let disponivel = if blank(&self.quantidade_disponivel) {
            None
        } else {
            match self.quantidade_disponivel.trim().parse::<u32>() {
                Ok(d) if quantidade.is_none_or(|q| d <= q) => Some(d),
                Ok(_) => {
                    errors.add(
                        "quantidadeDisponivel",
                        "Quantidade disponível não pode exceder a quantidade total",
                    );
                    None
                }
                Err(_) => {
                    errors.add(
                        "quantidadeDisponivel",
                        "Quantidade disponível deve ser um número",
                    );
                    None
                }
            }
        };

        errors.into_result(|| ToolPayload {
            nome: self.nome.trim().to_string(),
            descricao: self.descricao.trim().to_string(),
            imagem_url: non_empty(&self.imagem_url),
            quantidade: quantidade.unwrap_or_default(),
            quantidade_disponivel: disponivel,
        })
    }
}

// =========================================================
// Registration / profile / login
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrationForm {
    pub nome_completo: String,
    /// `date` input value.
    pub data_nascimento: String,
    /// Masked or raw.
    pub cpf: String,
    pub email: String,
    pub senha: String,
    pub confirmacao_senha: String,
}

impl RegistrationForm {
    pub fn validate(&self, today: NaiveDate) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if blank(&self.nome_completo) {
            errors.add("nomeCompleto", "Nome é obrigatório");
        }

        if blank(&self.data_nascimento) {
            errors.add("dataNascimento", "Data de nascimento é obrigatória");
        } else {
            match parse_date(&self.data_nascimento) {
                None => errors.add("dataNascimento", "Data inválida"),
                Some(birth) if age_on(birth, today) < MIN_VOLUNTEER_AGE => {
                    errors.add("dataNascimento", "Você deve ter pelo menos 16 anos")
                }
                Some(_) => {}
            }
        }

        let cpf = digits_only(&self.cpf);
        if cpf.is_empty() {
            errors.add("cpf", "CPF é obrigatório");
        } else if cpf.len() != CPF_DIGITS {
            errors.add("cpf", "CPF inválido");
        }

        if blank(&self.email) {
            errors.add("email", "Email é obrigatório");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Email inválido");
        }

        if self.senha.is_empty() {
            errors.add("senha", "Senha é obrigatória");
        } else if self.senha.chars().count() < MIN_PASSWORD_LEN {
            errors.add("senha", "Mínimo 6 caracteres");
        }

        if self.confirmacao_senha.is_empty() {
            errors.add("confirmacaoSenha", "Confirmação é obrigatória");
        } else if self.confirmacao_senha != self.senha {
            errors.add("confirmacaoSenha", "Senhas não coincidem");
        }

        errors.into_result(|| RegisterRequest {
            nome_completo: self.nome_completo.trim().to_string(),
            data_nascimento: self.data_nascimento.trim().to_string(),
            cpf,
            email: self.email.trim().to_string(),
            senha: self.senha.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub nome_completo: String,
    pub email: String,
    pub data_nascimento: String,
    pub cpf: String,
    pub foto_perfil: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if blank(&self.nome_completo) {
            errors.add("nomeCompleto", "Nome é obrigatório");
        }
        if blank(&self.email) {
            errors.add("email", "Email é obrigatório");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Email inválido");
        }
        if !blank(&self.data_nascimento) && parse_date(&self.data_nascimento).is_none() {
            errors.add("dataNascimento", "Data inválida");
        }

        errors.into_result(|| ProfileUpdate {
            nome_completo: self.nome_completo.trim().to_string(),
            data_nascimento: non_empty(&self.data_nascimento),
            cpf: non_empty(&digits_only(&self.cpf)),
            email: self.email.trim().to_string(),
            foto_perfil: non_empty(&self.foto_perfil),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if blank(&self.email) {
            errors.add("email", "Email é obrigatório");
        }
        if self.senha.is_empty() {
            errors.add("senha", "Senha é obrigatória");
        }
        errors.into_result(|| LoginRequest {
            email: self.email.trim().to_string(),
            senha: self.senha.clone(),
        })
    }
}

// =========================================================
// Application
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationForm {
    /// `datetime-local` value.
    pub data_desejada: String,
}

impl ApplicationForm {
    pub fn validate<Tz: TimeZone>(
        &self,
        user_id: Option<Id>,
        location_id: Id,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<ApplicationPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if user_id.is_none() {
            errors.add("usuario", "Usuário não autenticado ou id ausente.");
        }
        let desejada = future_instant(
            &mut errors,
            "dataDesejada",
            &self.data_desejada,
            now,
            tz,
            "Informe a data desejada",
        );
        errors.into_result(|| ApplicationPayload {
            usuario_id: user_id.unwrap_or_default(),
            local_id: location_id,
            data_desejada: desejada.as_ref().map(to_iso).unwrap_or_default(),
        })
    }
}
