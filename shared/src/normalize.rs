//! Key normalization for backend responses
//!
//! Some endpoints answer in snake_case, others in camelCase. Every object key
//! in a nested value is rewritten to camelCase; values are left untouched.

use serde_json::{Map, Value};

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

/// `usuario_nome` -> `usuarioNome`, `numero-rua` -> `numeroRua`.
///
/// A run of separators followed by a letter collapses into the uppercased
/// letter. Leading separators (`_id`) and separators not followed by a letter
/// (`linha_2`) are kept, which makes the conversion idempotent.
pub fn to_camel_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len());
    let mut i = 0;

    // leading separators are part of the name
    while i < chars.len() && is_separator(chars[i]) {
        out.push(chars[i]);
        i += 1;
    }

    while i < chars.len() {
        let c = chars[i];
        if !is_separator(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_separator(chars[i]) {
            i += 1;
        }

        match chars.get(i) {
            Some(next) if next.is_alphabetic() => {
                out.extend(next.to_uppercase());
                i += 1;
            }
            _ => out.extend(&chars[run_start..i]),
        }
    }

    out
}

/// Recursively renames every object key to camelCase.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        Value::Object(obj) => {
            let mut renamed = Map::with_capacity(obj.len());
            for (key, inner) in obj {
                renamed.insert(to_camel_case(&key), normalize_keys(inner));
            }
            Value::Object(renamed)
        }
        scalar => scalar,
    }
}
