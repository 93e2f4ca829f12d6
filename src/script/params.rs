use std::collections::HashMap;

use serde_json::Value;

use crate::FilterError;

/// Raw script parameters, as handed over by the host.
pub type Params = HashMap<String, Value>;

const FIELD_PARAM: &str = "field";
const TERM_PARAM: &str = "term";
const COUNT_PARAM: &str = "count";

/// Validated parameters of the `contains_multiple` script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainsMultipleParams {
    /// Field holding the postings.
    pub field: String,
    /// Term to look up.
    pub term: String,
    /// Minimum number of occurrences of `term` in `field`.
    ///
    /// Zero and negative values are accepted. A document then matches as soon
    /// as it contains the term.
    pub count: i32,
}

impl ContainsMultipleParams {
    /// Extracts `field`, `term` and `count` from `params`.
    ///
    /// Keys are checked in that order and the first missing one is
    /// reported. Other keys are ignored.
    pub fn from_params(params: &Params) -> crate::Result<ContainsMultipleParams> {
        let field = required(params, FIELD_PARAM)?;
        let term = required(params, TERM_PARAM)?;
        let count = required(params, COUNT_PARAM)?;
        Ok(ContainsMultipleParams {
            field: value_to_string(FIELD_PARAM, field)?,
            term: value_to_string(TERM_PARAM, term)?,
            count: parse_count(count)?,
        })
    }
}

// A `null` value is treated as missing.
fn required<'a>(params: &'a Params, name: &str) -> crate::Result<&'a Value> {
    match params.get(name) {
        None | Some(Value::Null) => Err(FilterError::MissingParameter(name.to_string())),
        Some(value) => Ok(value),
    }
}

fn value_to_string(name: &str, value: &Value) -> crate::Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(_) | Value::Bool(_) => Ok(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(FilterError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a string, got {value}"),
        }),
    }
}

fn parse_count(value: &Value) -> crate::Result<i32> {
    let invalid = |reason: String| FilterError::InvalidParameter {
        name: COUNT_PARAM.to_string(),
        reason,
    };
    match value {
        Value::String(text) => text.parse::<i32>().map_err(|parse_err| {
            invalid(format!("cannot parse {text:?} as an integer: {parse_err}"))
        }),
        Value::Number(number) => number
            .as_i64()
            .and_then(|count| i32::try_from(count).ok())
            .ok_or_else(|| invalid(format!("{number} is not a 32-bit integer"))),
        _ => Err(invalid(format!("expected an integer, got {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{ContainsMultipleParams, Params};
    use crate::FilterError;

    fn params(value: serde_json::Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_params_from_strings() -> crate::Result<()> {
        let params = hashmap! {
            "field".to_string() => json!("text"),
            "term".to_string() => json!("foo"),
            "count".to_string() => json!("2"),
            "unrelated".to_string() => json!({"ignored": true}),
        };
        assert_eq!(
            ContainsMultipleParams::from_params(&params)?,
            ContainsMultipleParams {
                field: "text".to_string(),
                term: "foo".to_string(),
                count: 2,
            }
        );
        Ok(())
    }

    #[test]
    fn test_params_numeric_count_and_term() -> crate::Result<()> {
        let params = params(json!({"field": "year", "term": 1984, "count": -1}));
        let parsed = ContainsMultipleParams::from_params(&params)?;
        assert_eq!(parsed.term, "1984");
        assert_eq!(parsed.count, -1);
        Ok(())
    }

    #[test]
    fn test_params_missing_key_is_named() {
        for (missing, value) in [
            ("field", json!({"term": "foo", "count": 1})),
            ("term", json!({"field": "text", "count": 1})),
            ("count", json!({"field": "text", "term": "foo"})),
        ] {
            let err = ContainsMultipleParams::from_params(&params(value)).unwrap_err();
            assert!(
                matches!(&err, FilterError::MissingParameter(name) if name == missing),
                "{err:?}"
            );
            assert_eq!(err.to_string(), format!("Missing parameter [{missing}]"));
        }
    }

    #[test]
    fn test_params_missing_keys_reported_in_order() {
        let err = ContainsMultipleParams::from_params(&Params::new()).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter [field]");
    }

    #[test]
    fn test_params_null_is_missing() {
        let params = params(json!({"field": "text", "term": null, "count": 1}));
        let err = ContainsMultipleParams::from_params(&params).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter [term]");
    }

    #[test]
    fn test_params_invalid_count() {
        for count in [json!("two"), json!(2.5), json!(1u64 << 40), json!([2]), json!("2.0")] {
            let params = params(json!({"field": "text", "term": "foo", "count": count}));
            let err = ContainsMultipleParams::from_params(&params).unwrap_err();
            assert!(
                matches!(&err, FilterError::InvalidParameter { name, .. } if name == "count"),
                "{err:?}"
            );
            assert!(err.is_validation_error());
        }
    }

    #[test]
    fn test_params_invalid_field() {
        let params = params(json!({"field": ["text"], "term": "foo", "count": 1}));
        let err = ContainsMultipleParams::from_params(&params).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter { name, .. } if name == "field"));
    }
}
