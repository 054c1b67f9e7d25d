pub mod ticket;
pub mod user;

pub use ticket::{NewTicket, Ticket, TicketField, DEFAULT_STATUS};
pub use user::{NewUser, User};

use serde_json::{Map, Value};
use thiserror::Error;

/// Why an inbound JSON payload could not be turned into an insert record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A required field is absent or "falsy" (null, "", 0, false, [], {})
    #[error("missing required field: {0}")]
    Missing(&'static str),

    /// A required field is present but has a type the store cannot accept
    #[error("invalid value for field: {0}")]
    Invalid(&'static str),
}

/// Presence check with the loose truthiness the API has always used:
/// only values that carry something count as "present".
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

pub(crate) fn required_text(body: &Map<String, Value>, field: &'static str) -> Result<String, PayloadError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(PayloadError::Invalid(field)),
    }
}

/// Integer id with the coercions an integer column applies: `1.0` and
/// `true` both become 1, numeric strings are parsed.
pub(crate) fn required_id(body: &Map<String, Value>, field: &'static str) -> Result<i32, PayloadError> {
    let parsed = match body.get(field) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::Bool(true)) => Some(1),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|id| i32::try_from(id).ok())
        .ok_or(PayloadError::Invalid(field))
}

/// Check every field for presence first so a request missing one field
/// is always reported as missing, whatever the types of the others.
pub(crate) fn require_all(body: &Map<String, Value>, fields: &[&'static str]) -> Result<(), PayloadError> {
    match fields.iter().find(|f| !is_present(body.get(**f))) {
        Some(missing) => Err(PayloadError::Missing(missing)),
        None => Ok(()),
    }
}
