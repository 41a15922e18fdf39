//! Loose value semantics used by the target framework's templates.
//!
//! Props come from a dynamically typed editor, so attribute emission follows
//! JavaScript rules: truthiness for presence checks, strict equality for
//! default comparisons, and string conversion for interpolation.

use serde_json::Value;

/// JavaScript truthiness of an optional prop value.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// JavaScript string conversion, as used by template literal interpolation.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.as_f64().map(js_number).unwrap_or_default(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// `Number.prototype.toString`: plain decimals for magnitudes in
/// `[1e-6, 1e21)`, shortest exponent form with an explicit sign otherwise.
fn js_number(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Strict equality against a string literal.
pub fn is_str(value: &Value, expected: &str) -> bool {
    matches!(value, Value::String(s) if s == expected)
}

/// Strict equality against a number literal.
pub fn is_number(value: &Value, expected: f64) -> bool {
    matches!(value, Value::Number(n) if n.as_f64() == Some(expected))
}

/// Convert a camelCase style key to its hyphenated CSS property name.
///
/// Every ASCII uppercase letter gets a `-` prefix, then the whole key is
/// lowercased: `backgroundColor` becomes `background-color`.
pub fn css_property_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Treat an empty string like an absent one.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
