//! Front matter validation.
//!
//! Turns a [`RawDocument`] into a typed [`Document`]. The front matter is a
//! loosely typed YAML mapping (`order: "024"` is a quoted string standing in
//! for an integer), so every field is coerced explicitly:
//!
//! | Field | Required | Accepted values |
//! |-------|----------|-----------------|
//! | `title` | yes | non-blank string |
//! | `permalink` | yes | site-relative URL path, normalized to `/a/b` |
//! | `order` | yes | non-negative integer, or a string of ASCII digits |
//! | `published` | no (default `true`) | boolean, or `"true"`/`"false"` |
//! | `layout`, `type`, `sidenav` | no | string, passed through |
//!
//! Any other key is passed through unchanged in [`Document::extra`].
//!
//! Validation is a pure function of its input and reports every problem in
//! the document, not just the first one.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};
use tips_storage::RawDocument;

use crate::document::Document;
use crate::error::{ErrorKind, ValidationError};

/// Keys with a dedicated [`Document`] field.
const KNOWN_FIELDS: [&str; 7] = [
    "title",
    "permalink",
    "order",
    "published",
    "layout",
    "type",
    "sidenav",
];

const ORDER_EXPECTED: &str = "a non-negative integer";

/// Validate a raw document's front matter.
///
/// # Errors
///
/// Returns every [`ValidationError`] found in the document. A front matter
/// block that is not a YAML mapping yields a single `MalformedDocument` error.
pub fn validate(raw: &RawDocument) -> Result<Document, Vec<ValidationError>> {
    let mapping = parse_mapping(&raw.front_matter).map_err(|reason| {
        vec![ValidationError::new(
            raw.id.as_str(),
            ErrorKind::MalformedDocument { reason },
        )]
    })?;

    let mut errors = Vec::new();

    let title = collect(required_string(&mapping, "title"), &mut errors);
    let permalink = collect(
        required_string(&mapping, "permalink").and_then(|p| normalize_permalink(&p)),
        &mut errors,
    );
    let order = collect(order(&mapping), &mut errors);
    let published = collect(published(&mapping), &mut errors);
    let layout = collect(optional_string(&mapping, "layout"), &mut errors);
    let page_type = collect(optional_string(&mapping, "type"), &mut errors);
    let sidenav = collect(optional_string(&mapping, "sidenav"), &mut errors);
    let extra = collect(extra_fields(&mapping), &mut errors);

    match (title, permalink, order, published, layout, page_type, sidenav, extra) {
        (
            Some(title),
            Some(permalink),
            Some(order),
            Some(published),
            Some(layout),
            Some(page_type),
            Some(sidenav),
            Some(extra),
        ) if errors.is_empty() => Ok(Document {
            id: raw.id.clone(),
            title,
            order,
            permalink,
            published,
            layout,
            page_type,
            sidenav,
            extra,
            body: raw.body.clone(),
            source_path: raw.source_path.clone(),
        }),
        _ => Err(errors
            .into_iter()
            .map(|kind| ValidationError::new(raw.id.as_str(), kind))
            .collect()),
    }
}

/// Record a field error and keep going.
fn collect<T>(result: Result<T, ErrorKind>, errors: &mut Vec<ErrorKind>) -> Option<T> {
    result.map_err(|kind| errors.push(kind)).ok()
}

/// Parse the front matter into a mapping with string keys.
///
/// Empty (or comment-only) front matter is an empty mapping.
fn parse_mapping(front_matter: &str) -> Result<Mapping, String> {
    if front_matter.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let mapping = match serde_yaml::from_str::<Value>(front_matter) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            return Err(format!(
                "metadata block must be key/value pairs, found {}",
                describe(&other)
            ));
        }
        Err(e) => return Err(format!("invalid metadata YAML: {e}")),
    };

    if let Some(key) = mapping.keys().find(|k| !k.is_string()) {
        return Err(format!(
            "metadata keys must be strings, found {}",
            describe(key)
        ));
    }

    Ok(mapping)
}

/// Short description of a YAML value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(_) => "a list".to_owned(),
        Value::Mapping(_) => "a mapping".to_owned(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}

fn mismatch(field: &str, expected: &'static str, value: &Value) -> ErrorKind {
    ErrorKind::TypeMismatch {
        field: field.to_owned(),
        expected,
        found: describe(value),
    }
}

/// Read a required, non-blank string field.
fn required_string(mapping: &Mapping, field: &'static str) -> Result<String, ErrorKind> {
    match mapping.get(field) {
        None | Some(Value::Null) => Err(ErrorKind::MissingField { field }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ErrorKind::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(mismatch(field, "a string", other)),
    }
}

/// Read an optional string field. Null counts as absent.
fn optional_string(mapping: &Mapping, field: &'static str) -> Result<Option<String>, ErrorKind> {
    match mapping.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(field, "a string", other)),
    }
}

/// Normalize a permalink to a leading `/` without a trailing `/`.
///
/// `tips/61`, `/tips/61` and `/tips/61/` all become `/tips/61`.
pub(crate) fn normalize_permalink(raw: &str) -> Result<String, ErrorKind> {
    let trimmed = raw.trim();
    if trimmed.contains("://") || trimmed.chars().any(char::is_whitespace) {
        return Err(ErrorKind::TypeMismatch {
            field: "permalink".to_owned(),
            expected: "a site-relative URL path",
            found: format!("{raw:?}"),
        });
    }
    Ok(format!("/{}", trimmed.trim_matches('/')))
}

/// Coerce `order` to an integer.
fn order(mapping: &Mapping) -> Result<u32, ErrorKind> {
    const FIELD: &str = "order";
    match mapping.get(FIELD) {
        None | Some(Value::Null) => Err(ErrorKind::MissingField { field: FIELD }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ErrorKind::MissingField { field: FIELD })
        }
        Some(value @ Value::String(s)) => {
            parse_order(s.trim()).ok_or_else(|| mismatch(FIELD, ORDER_EXPECTED, value))
        }
        Some(value @ Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| mismatch(FIELD, ORDER_EXPECTED, value)),
        Some(other) => Err(mismatch(FIELD, ORDER_EXPECTED, other)),
    }
}

/// Parse a string of ASCII digits (leading zeros allowed).
fn parse_order(s: &str) -> Option<u32> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Coerce `published`, defaulting to `true`.
fn published(mapping: &Mapping) -> Result<bool, ErrorKind> {
    const FIELD: &str = "published";
    match mapping.get(FIELD) {
        None | Some(Value::Null) => Ok(true),
        Some(Value::Bool(b)) => Ok(*b),
        Some(value @ Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(mismatch(FIELD, "a boolean", value)),
        },
        Some(other) => Err(mismatch(FIELD, "a boolean", other)),
    }
}

/// Collect unknown keys as JSON values.
fn extra_fields(mapping: &Mapping) -> Result<BTreeMap<String, serde_json::Value>, ErrorKind> {
    let mut extra = BTreeMap::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        if KNOWN_FIELDS.contains(&key) {
            continue;
        }
        let json = serde_json::to_value(value)
            .map_err(|_| mismatch(key, "a JSON-compatible value", value))?;
        extra.insert(key.to_owned(), json);
    }
    Ok(extra)
}
