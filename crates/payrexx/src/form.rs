//! # Form Encoding
//!
//! Bracket-style form encoding of nested parameters, as the Payrexx API
//! expects them:
//!
//! ```text
//! fields[email][value]=a%40b.ch&basket[0][name][0]=Shirt&psp[0]=44
//! ```
//!
//! Two conventions are supported. Signatures are computed over the
//! [`Format::Rfc1738`] encoding; the body actually sent uses
//! [`Format::Rfc3986`].

use payrexx_core::{PayrexxError, PayrexxResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Percent-encoding convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Only unreserved characters stay literal; space is `%20`
    Rfc3986,
    /// As RFC 3986, but space is `+` and parentheses stay literal
    Rfc1738,
}

impl Format {
    fn escape(self, raw: &str) -> String {
        let encoded = urlencoding::encode(raw);
        match self {
            Format::Rfc3986 => encoded.into_owned(),
            Format::Rfc1738 => encoded
                .replace("%20", "+")
                .replace("%28", "(")
                .replace("%29", ")"),
        }
    }
}

/// Serialize `params` to a JSON object, preserving field order.
pub fn to_object<T: Serialize + ?Sized>(params: &T) -> PayrexxResult<Map<String, Value>> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(PayrexxError::Serialization(format!(
            "form parameters must serialize to an object, got {}",
            kind(&other)
        ))),
        Err(e) => Err(PayrexxError::Serialization(e.to_string())),
    }
}

/// Encode `params` as a query string in the given format.
pub fn encode(params: &Map<String, Value>, format: Format) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key.clone(), value, &mut pairs);
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", format.escape(key), format.escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn flatten(prefix: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten(format!("{}[{}]", prefix, key), nested, out);
            }
        }
        Value::Array(items) => {
            for (i, nested) in items.iter().enumerate() {
                flatten(format!("{}[{}]", prefix, i), nested, out);
            }
        }
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Number(n) => out.push((prefix, n.to_string())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Null => out.push((prefix, String::new())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_flat_params_keep_order() {
        let params = object(json!({ "amount": 1000, "currency": "EUR", "sku": "A1" }));
        assert_eq!(
            encode(&params, Format::Rfc3986),
            "amount=1000&currency=EUR&sku=A1"
        );
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let params = object(json!({
            "fields": { "email": { "value": "a@b.ch" } },
            "psp": [44, 36],
        }));
        assert_eq!(
            encode(&params, Format::Rfc3986),
            "fields%5Bemail%5D%5Bvalue%5D=a%40b.ch&psp%5B0%5D=44&psp%5B1%5D=36"
        );
    }

    #[test]
    fn test_space_and_parentheses_per_format() {
        let params = object(json!({ "purpose": "Order (42) paid" }));
        assert_eq!(
            encode(&params, Format::Rfc3986),
            "purpose=Order%20%2842%29%20paid"
        );
        assert_eq!(encode(&params, Format::Rfc1738), "purpose=Order+(42)+paid");
    }

    #[test]
    fn test_scalars() {
        let params = object(json!({ "preAuthorization": true, "vatRate": 7.7, "note": null }));
        assert_eq!(
            encode(&params, Format::Rfc3986),
            "preAuthorization=true&vatRate=7.7&note="
        );
    }

    #[test]
    fn test_unreserved_stay_literal() {
        let params = object(json!({ "url": "https://shop.ch/ok?x=1~y" }));
        assert_eq!(
            encode(&params, Format::Rfc3986),
            "url=https%3A%2F%2Fshop.ch%2Fok%3Fx%3D1~y"
        );
    }

    #[test]
    fn test_to_object_rejects_non_objects() {
        assert!(to_object(&vec![1, 2]).is_err());
        assert!(to_object(&json!({ "a": 1 })).is_ok());
    }
}
