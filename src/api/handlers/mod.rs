pub mod health;
pub mod metrics;
pub mod rankings;
pub mod traders;

use serde_json::Value;

use crate::errors::AppError;

/// Read the optional `addresses` field of a request payload. Missing and
/// falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) mean no addresses;
/// anything else must be a list of strings.
pub(crate) fn request_addresses(value: Option<Value>) -> Result<Vec<String>, AppError> {
    let invalid = || AppError::BadRequest("\"addresses\" should be a list.".into());

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(Vec::new()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::Object(o)) if o.is_empty() => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid()),
            })
            .collect(),
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_addresses_accepts_falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(request_addresses(Some(value.clone())).unwrap().is_empty(), "{value}");
        }
        assert!(request_addresses(None).unwrap().is_empty());
    }

    #[test]
    fn test_request_addresses_rejects_non_lists() {
        for value in [json!("wallet1"), json!(true), json!(7), json!({"a": 1}), json!([1, 2])] {
            assert!(request_addresses(Some(value.clone())).is_err(), "{value}");
        }
    }

    #[test]
    fn test_request_addresses_reads_list() {
        let addresses = request_addresses(Some(json!(["wallet1", "wallet2"]))).unwrap();
        assert_eq!(addresses, vec!["wallet1", "wallet2"]);
    }
}
