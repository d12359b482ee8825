//! Permissive parsing of the `/set` request body.
//!
//! The endpoint never rejects a request: anything that does not carry a usable
//! `distance_mm` degrades to [`DistanceInput::Fallback`], which leaves the
//! current distance in place.

use serde_json::Value;

/// JSON field carrying the requested distance.
pub const DISTANCE_FIELD: &str = "distance_mm";

/// Outcome of parsing a set-distance request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceInput {
    /// A numeric distance was supplied. It may still be out of range.
    Value(f64),
    /// Nothing usable was supplied; keep the current distance.
    Fallback,
}

impl DistanceInput {
    /// Parse a raw request body.
    ///
    /// The content type is ignored. Accepts JSON numbers and numeric strings.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::Fallback;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(_) => Self::Fallback,
        }
    }

    /// Extract the distance from an already decoded JSON document.
    pub fn from_json(value: &Value) -> Self {
        let field = match value.get(DISTANCE_FIELD) {
            Some(field) => field,
            None => return Self::Fallback,
        };

        let parsed = match field {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(distance) if distance.is_finite() => Self::Value(distance),
            _ => Self::Fallback,
        }
    }
}
