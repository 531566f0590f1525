//! The state-object access contract.
//!
//! Accessor and element evaluators never inspect the caller's state directly.
//! They go through [`State`], trying a keyed lookup first and falling back to
//! structured (field) access, so hosts can plug in maps, JSON documents or
//! their own serializable types.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::OnceLock;

/// Something an expression can read named values from.
pub trait State {
    /// Keyed-mapping lookup: exact, case-sensitive key match.
    fn get_key(&self, key: &str) -> Option<Value>;

    /// Structured-object lookup, tried when [`get_key`](State::get_key) finds nothing.
    fn get_field(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Resolves `name` against `state`: keyed lookup first, then structured access.
pub fn resolve_property(state: &dyn State, name: &str) -> Option<Value> {
    state.get_key(name).or_else(|| state.get_field(name))
}

/// Field match over a JSON object: exact name first, then ignoring case.
fn field_ignore_case(map: &Map<String, Value>, name: &str) -> Option<Value> {
    map.get(name)
        .or_else(|| {
            map.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
        .cloned()
}

impl State for Value {
    fn get_key(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(key).cloned(),
            _ => None,
        }
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => field_ignore_case(map, name),
            _ => None,
        }
    }
}

impl State for Map<String, Value> {
    fn get_key(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        field_ignore_case(self, name)
    }
}

impl<S: BuildHasher> State for HashMap<String, Value, S> {
    fn get_key(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl State for BTreeMap<String, Value> {
    fn get_key(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl<T: State + ?Sized> State for &T {
    fn get_key(&self, key: &str) -> Option<Value> {
        (**self).get_key(key)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        (**self).get_field(name)
    }
}

/// Exposes any serializable host type as a state.
///
/// The value is serialized once, on first access. Fields are matched by
/// exact name, then case-insensitively; a type that does not serialize to a
/// JSON object has no fields.
pub struct Structured<T> {
    inner: T,
    fields: OnceLock<Option<Map<String, Value>>>,
}

impl<T: Serialize> Structured<T> {
    pub fn new(inner: T) -> Self {
        Structured {
            inner,
            fields: OnceLock::new(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn fields(&self) -> Option<&Map<String, Value>> {
        self.fields
            .get_or_init(|| match serde_json::to_value(&self.inner) {
                Ok(Value::Object(map)) => Some(map),
                Ok(_) => None,
                Err(err) => {
                    tracing::debug!(error = %err, "structured state failed to serialize");
                    None
                }
            })
            .as_ref()
    }
}

impl<T: Serialize> State for Structured<T> {
    fn get_key(&self, _key: &str) -> Option<Value> {
        None
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.fields().and_then(|map| field_ignore_case(map, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn test_keyed_lookup_wins_over_field() {
        let state = json!({"Name": "field", "name": "key"});
        assert_eq!(resolve_property(&state, "name"), Some(json!("key")));
        assert_eq!(resolve_property(&state, "NAME"), Some(json!("field")));
    }

    #[test]
    fn test_non_object_values_have_no_properties() {
        assert_eq!(resolve_property(&json!(null), "a"), None);
        assert_eq!(resolve_property(&json!([1, 2]), "0"), None);
        assert_eq!(resolve_property(&json!("abc"), "length"), None);
    }

    #[test]
    fn test_hash_map_is_keyed_only() {
        let mut map = HashMap::new();
        map.insert("count".to_string(), json!(3));
        assert_eq!(resolve_property(&map, "count"), Some(json!(3)));
        assert_eq!(resolve_property(&map, "Count"), None);
    }

    #[test]
    fn test_structured_state() {
        let user = Structured::new(User {
            name: "ada".to_string(),
            age: 36,
        });
        assert_eq!(resolve_property(&user, "name"), Some(json!("ada")));
        assert_eq!(resolve_property(&user, "Age"), Some(json!(36)));
        assert_eq!(resolve_property(&user, "email"), None);
        assert_eq!(user.inner().age, 36);
    }

    #[test]
    fn test_structured_prefers_exact_field_name() {
        #[derive(Serialize)]
        struct Person {
            #[serde(rename = "Name")]
            display: String,
            name: String,
        }

        let person = Structured::new(Person {
            display: "Ada Lovelace".to_string(),
            name: "ada".to_string(),
        });
        assert_eq!(resolve_property(&person, "name"), Some(json!("ada")));
        assert_eq!(resolve_property(&person, "Name"), Some(json!("Ada Lovelace")));
        assert_eq!(resolve_property(&person, "NAME"), Some(json!("Ada Lovelace")));
    }

    #[test]
    fn test_structured_scalar_has_no_fields() {
        let n = Structured::new(42);
        assert_eq!(resolve_property(&n, "anything"), None);
    }
}
