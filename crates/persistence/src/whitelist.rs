//! Field whitelisting for inbound record attributes.
//!
//! Only the fields a resource declares as writable survive filtering. Anything
//! else a client sends (including `id` and the timestamps) is dropped without
//! complaint. Presence and type checks happen later, in
//! [`validation`](crate::validation).

use crate::core::Resource;
use crate::types::Attributes;

/// Keeps only the entries of `raw` whose key is in `allowed`.
///
/// Values are passed through untouched, whatever their type.
///
/// ```
/// use hospital_persistence::whitelist::filter;
/// use serde_json::json;
///
/// let raw = json!({"given_name": "Ada", "id": 99, "admin": true});
/// let filtered = filter(raw.as_object().unwrap(), &["given_name", "surname"]);
///
/// assert_eq!(serde_json::Value::Object(filtered), json!({"given_name": "Ada"}));
/// ```
pub fn filter(raw: &Attributes, allowed: &[&str]) -> Attributes {
    raw.iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Filters `raw` against the writable fields of `R`.
pub fn permit<R: Resource>(raw: &Attributes) -> Attributes {
    let allowed: Vec<&str> = R::permitted_fields().collect();
    filter(raw, &allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Doctor, Patient};
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_drops_unknown_fields() {
        let raw = attrs(json!({
            "given_name": "Ada",
            "surname": "Lovelace",
            "id": 12,
            "created_at": "2001-01-01T00:00:00Z",
            "title": "Countess"
        }));

        let filtered = permit::<Doctor>(&raw);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.contains_key("given_name"));
        assert!(filtered.contains_key("surname"));
    }

    #[test]
    fn test_keeps_allowed_fields_regardless_of_value() {
        let raw = attrs(json!({
            "given_name": "",
            "surname": null,
            "doctor_id": [1, 2],
            "gender": {"nested": true}
        }));

        let filtered = permit::<Patient>(&raw);
        assert_eq!(filtered, raw);
    }

    #[test]
    fn test_empty_input() {
        assert!(permit::<Patient>(&Attributes::new()).is_empty());
    }

    fn arb_attributes() -> impl Strategy<Value = Attributes> {
        let key = prop_oneof![
            Just("given_name".to_string()),
            Just("surname".to_string()),
            Just("born_on".to_string()),
            Just("doctor_id".to_string()),
            "[a-z_]{1,12}",
        ];
        let value = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            ".{0,16}".prop_map(Value::from),
        ];
        prop::collection::btree_map(key, value, 0..8)
            .prop_map(|map| map.into_iter().collect())
    }

    proptest! {
        #[test]
        fn filter_is_idempotent(raw in arb_attributes()) {
            let allowed = ["given_name", "surname", "born_on", "gender", "doctor_id"];
            let once = filter(&raw, &allowed);
            let twice = filter(&once, &allowed);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn filter_only_yields_allowed_keys(raw in arb_attributes()) {
            let allowed = ["given_name", "surname"];
            let filtered = filter(&raw, &allowed);
            prop_assert!(filtered.keys().all(|k| allowed.contains(&k.as_str())));
            for key in allowed {
                prop_assert_eq!(filtered.get(key), raw.get(key));
            }
        }
    }
}
