//! URL path templating

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::{FetchError, Result};

/// Path parameter map: placeholder name to scalar value
pub type PathParams = BTreeMap<String, Value>;

/// Characters left unescaped in substituted values, matching JavaScript's
/// `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Substitute `{name}` placeholders in a URL template
///
/// Every occurrence of a given placeholder is replaced with the
/// percent-encoded string form of its value. Placeholders with no matching
/// key are left untouched, and params the template never references are
/// ignored. The only error case is a referenced value with no string form
/// (an array or object).
pub fn fill_path(path: &str, params: &PathParams) -> Result<String> {
    let mut filled = path.to_string();

    for (key, value) in params {
        let token = format!("{{{key}}}");
        if !filled.contains(&token) {
            continue;
        }
        let raw = scalar_to_string(value).ok_or_else(|| FetchError::PathParam {
            key: key.clone(),
        })?;
        let encoded = utf8_percent_encode(&raw, COMPONENT).to_string();
        filled = filled.replace(&token, &encoded);
    }

    Ok(filled)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
