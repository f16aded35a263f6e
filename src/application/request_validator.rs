// Request validator - Turns a decoded JSON payload into a PlotRequest
use crate::domain::plot::{
    DEFAULT_TITLE, DEFAULT_X_LABEL, DEFAULT_Y_LABEL, PlotMetadata, PlotRequest,
};
use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 5000;

/// Client-facing validation failures. The `Display` text is returned verbatim
/// in the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body must be a json object")]
    NotAnObject,
    #[error("missing 'data' field")]
    MissingData,
    #[error("'data' or 'data.y' must be an array of numbers")]
    YNotArray,
    #[error("at least two data points are required")]
    TooFewPoints,
    #[error("data contains too many points (max 5000)")]
    TooManyPoints,
    #[error("all y values must be numeric")]
    NonNumericY,
    #[error("'data.x' must be an array of numbers")]
    XNotArray,
    #[error("x and y must have the same length")]
    LengthMismatch,
    #[error("all x values must be numeric")]
    NonNumericX,
}

/// Shape of the `data` field, resolved once: either a bare array of y values
/// or an object with optional `x` and `y` members.
#[derive(Debug)]
enum SeriesInput<'a> {
    Flat(&'a Value),
    Xy {
        x: Option<&'a Value>,
        y: Option<&'a Value>,
    },
}

impl<'a> SeriesInput<'a> {
    fn resolve(data: &'a Value) -> Self {
        match data {
            Value::Object(fields) => SeriesInput::Xy {
                x: present(fields, "x"),
                y: present(fields, "y"),
            },
            other => SeriesInput::Flat(other),
        }
    }

    fn into_parts(self) -> (Option<&'a Value>, Option<&'a Value>) {
        match self {
            SeriesInput::Flat(y) => (None, Some(y)),
            SeriesInput::Xy { x, y } => (x, y),
        }
    }
}

pub fn validate_plot_request(payload: &Value) -> Result<PlotRequest, ValidationError> {
    let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;
    let data = present(fields, "data").ok_or(ValidationError::MissingData)?;

    let (x, y) = SeriesInput::resolve(data).into_parts();

    let y = y
        .and_then(Value::as_array)
        .ok_or(ValidationError::YNotArray)?;

    if y.len() < MIN_POINTS {
        return Err(ValidationError::TooFewPoints);
    }
    if y.len() > MAX_POINTS {
        return Err(ValidationError::TooManyPoints);
    }

    let y_values = to_floats(y).ok_or(ValidationError::NonNumericY)?;

    let x_values = match x {
        None => (0..y_values.len()).map(|i| i as f64).collect(),
        Some(x) => {
            let x = x.as_array().ok_or(ValidationError::XNotArray)?;
            if x.len() != y_values.len() {
                return Err(ValidationError::LengthMismatch);
            }
            to_floats(x).ok_or(ValidationError::NonNumericX)?
        }
    };

    let metadata = PlotMetadata {
        title: label(fields, "title", DEFAULT_TITLE),
        x_label: label(fields, "x_label", DEFAULT_X_LABEL),
        y_label: label(fields, "y_label", DEFAULT_Y_LABEL),
    };

    Ok(PlotRequest {
        x_values,
        y_values,
        metadata,
    })
}

/// A member counts as present only when it is not `null`
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn to_floats(values: &[Value]) -> Option<Vec<f64>> {
    values.iter().map(to_float).collect()
}

/// Numbers, booleans and numeric strings convert; everything else does not.
fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// Explicit nulls are coerced like any other value, only a missing key gets the default
fn label(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        None => default.to_string(),
        Some(value) => to_label(value),
    }
}

/// Top-level strings are taken verbatim; anything else is rendered as text
fn to_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => display_text(other),
    }
}

/// Literal text of a value: `None`/`True`/`False`, `[1, 2]`, `{'k': 'v'}`,
/// floats always carrying a fraction or an exponent (`1.0`, `1e+20`).
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(float_text).unwrap_or_default(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quoted(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(display_text).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", quoted(k), display_text(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

// Shortest round-trip digits; exponent form below 1e-4 and from 1e16 up
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let fixed = value.to_string();
    if fixed.contains('.') {
        fixed
    } else {
        format!("{}.0", fixed)
    }
}

fn quoted(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
