use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Option names with shorthand meaning during normalization. Anything else
/// passes through to the builder verbatim.
pub mod keys {
    pub const METHODS: &str = "methods";
    pub const WILL_RETURN: &str = "willReturn";
    pub const WILL: &str = "will";
    pub const CONSTRUCTOR: &str = "constructor";
    pub const DISABLE_ORIGINAL_CONSTRUCTOR: &str = "disableOriginalConstructor";
    pub const MOCK_TYPE: &str = "mockType";
}

/// A mock-object configuration: an insertion-ordered mapping from option
/// name to an arbitrary value.
///
/// Callers assemble configurations out of shorthand options (`methods`,
/// `constructor`, `mockType`, ...) and hand them to the factory, which
/// normalizes each one, merges them, and drives the framework's mock
/// builder with the result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockConfig(Map<String, Value>);

impl MockConfig {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes an option, shifting later entries up to preserve their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub(crate) fn map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// Resolves shorthand options into the canonical form consumed by the
    /// factory:
    ///
    /// - `willReturn` and `will` are always present as mappings afterwards.
    /// - `methods` entries are split into method names and stub return
    ///   values: an entry under a numeric key names a method directly, while
    ///   an entry under any other key names the method and carries its
    ///   return value, which is recorded into `willReturn` unless already
    ///   present there. `methods` itself becomes a mapping from each
    ///   resolved name to itself, in processing order.
    /// - The `constructor` shorthand collapses into
    ///   `disableOriginalConstructor`: an explicit
    ///   `disableOriginalConstructor` wins, otherwise the negated
    ///   truthiness of `constructor` is used.
    ///
    /// Normalizing is idempotent. Unrecognized options are left untouched.
    pub fn normalize(&mut self) {
        self.ensure_mapping(keys::WILL_RETURN);

        let entries: Option<Vec<(String, Value)>> = match self.0.get(keys::METHODS) {
            Some(Value::Array(list)) if !list.is_empty() => Some(
                list.iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), value.clone()))
                    .collect(),
            ),
            Some(Value::Object(map)) if !map.is_empty() => Some(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            _ => None,
        };

        if let Some(entries) = entries {
            let mut resolved = Map::new();
            for (key, value) in entries {
                let name = if is_numeric_key(&key) {
                    match value {
                        Value::String(name) => name,
                        other => {
                            warn!(entry = %other, "ignoring methods entry without a usable method name");
                            continue;
                        }
                    }
                } else {
                    let already_canonical =
                        matches!(&value, Value::String(name) if *name == key);
                    if !already_canonical {
                        if let Some(Value::Object(will_return)) =
                            self.0.get_mut(keys::WILL_RETURN)
                        {
                            will_return.entry(key.clone()).or_insert(value);
                        }
                    }
                    key
                };
                resolved.insert(name.clone(), Value::String(name));
            }
            self.0
                .insert(keys::METHODS.to_string(), Value::Object(resolved));
        }

        self.ensure_mapping(keys::WILL);

        if let Some(constructor) = self.0.remove(keys::CONSTRUCTOR) {
            if !self.0.contains_key(keys::DISABLE_ORIGINAL_CONSTRUCTOR) {
                self.0.insert(
                    keys::DISABLE_ORIGINAL_CONSTRUCTOR.to_string(),
                    Value::Bool(!is_truthy(&constructor)),
                );
            }
        }
    }

    fn ensure_mapping(&mut self, key: &str) {
        if !matches!(self.0.get(key), Some(Value::Object(_))) {
            self.0.insert(key.to_string(), Value::Object(Map::new()));
        }
    }
}

impl From<Map<String, Value>> for MockConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for MockConfig {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MockConfig {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Truthiness of an arbitrary option value under the loose-typing rules of
/// the configuration format: `null`, `false`, zero, the empty string, `"0"`
/// and empty collections are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(list) => !list.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// A key that holds an integer names nothing itself; the entry's value is
/// the method name.
fn is_numeric_key(key: &str) -> bool {
    key.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg(value: Value) -> MockConfig {
        match value {
            Value::Object(map) => MockConfig::from(map),
            other => panic!("expected an object literal, got {other}"),
        }
    }

    #[test]
    fn test_normalize_empty_configuration() {
        let mut config = MockConfig::new();
        config.normalize();

        assert_eq!(config, cfg(json!({"willReturn": {}, "will": {}})));
        assert_eq!(config.len(), 2, "no other keys should be introduced");
    }

    #[test]
    fn test_normalize_plain_method_list() {
        let mut config = cfg(json!({"methods": ["save", "load"]}));
        config.normalize();

        assert_eq!(
            config,
            cfg(json!({
                "methods": {"save": "save", "load": "load"},
                "willReturn": {},
                "will": {},
            }))
        );
    }

    #[test]
    fn test_normalize_methods_with_stub_returns() {
        let mut config = cfg(json!({
            "methods": {"0": "save", "getName": "alice", "1": "load"},
        }));
        config.normalize();

        assert_eq!(
            config.get(keys::METHODS),
            Some(&json!({"save": "save", "getName": "getName", "load": "load"}))
        );
        assert_eq!(config.get(keys::WILL_RETURN), Some(&json!({"getName": "alice"})));
    }

    #[test]
    fn test_explicit_will_return_takes_precedence() {
        let mut config = cfg(json!({
            "willReturn": {"getName": "explicit"},
            "methods": {"getName": "derived"},
        }));
        config.normalize();

        assert_eq!(
            config.get(keys::WILL_RETURN),
            Some(&json!({"getName": "explicit"})),
            "an explicit willReturn entry must survive a methods shorthand for the same method"
        );
        assert_eq!(
            config.get(keys::METHODS),
            Some(&json!({"getName": "getName"}))
        );
    }

    #[test]
    fn test_derived_will_return_entries_append_in_processing_order() {
        let mut config = cfg(json!({
            "willReturn": {"existing": 0},
            "methods": {"alpha": 1, "zeta": 2},
        }));
        config.normalize();

        let will_return = match config.get(keys::WILL_RETURN) {
            Some(Value::Object(map)) => map,
            other => panic!("willReturn should be a mapping, got {other:?}"),
        };
        let order: Vec<&str> = will_return.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["existing", "alpha", "zeta"]);
    }

    #[test]
    fn test_normalize_key_order() {
        let mut config = cfg(json!({"methods": ["save"]}));
        config.normalize();

        let order: Vec<&str> = config.as_map().keys().map(String::as_str).collect();
        assert_eq!(
            order,
            vec!["methods", "willReturn", "will"],
            "methods keeps its position, defaults append"
        );
    }

    #[test]
    fn test_constructor_shorthand_negates_into_disable_flag() {
        let mut config = cfg(json!({"constructor": false}));
        config.normalize();
        assert_eq!(config.get(keys::CONSTRUCTOR), None);
        assert_eq!(
            config.get(keys::DISABLE_ORIGINAL_CONSTRUCTOR),
            Some(&json!(true))
        );

        let mut config = cfg(json!({"constructor": true}));
        config.normalize();
        assert_eq!(
            config.get(keys::DISABLE_ORIGINAL_CONSTRUCTOR),
            Some(&json!(false))
        );
    }

    #[test]
    fn test_explicit_disable_flag_wins_over_constructor_shorthand() {
        let mut config = cfg(json!({
            "constructor": true,
            "disableOriginalConstructor": "keep-me",
        }));
        config.normalize();

        assert_eq!(config.get(keys::CONSTRUCTOR), None);
        assert_eq!(
            config.get(keys::DISABLE_ORIGINAL_CONSTRUCTOR),
            Some(&json!("keep-me")),
            "the explicit flag must be preserved unchanged"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut config = cfg(json!({
            "methods": {"0": "save", "getName": "alice"},
            "constructor": false,
            "mockClassName": "UserServiceMock",
        }));
        config.normalize();
        let once = config.clone();
        config.normalize();
        assert_eq!(config, once);

        let mut config = cfg(json!({"methods": ["save", "load"]}));
        config.normalize();
        let once = config.clone();
        config.normalize();
        assert_eq!(config, once);
    }

    #[test]
    fn test_normalize_leaves_unrecognized_options_untouched() {
        let mut config = cfg(json!({"mockClassName": "Named", "proxyTarget": 3}));
        config.normalize();

        assert_eq!(config.get("mockClassName"), Some(&json!("Named")));
        assert_eq!(config.get("proxyTarget"), Some(&json!(3)));
    }

    #[test]
    fn test_normalize_skips_plain_entries_without_a_name() {
        let mut config = cfg(json!({"methods": [42, "save"]}));
        config.normalize();

        assert_eq!(config.get(keys::METHODS), Some(&json!({"save": "save"})));
    }

    #[test]
    fn test_normalize_coerces_malformed_stub_mappings() {
        let mut config = cfg(json!({"willReturn": "oops", "will": 7}));
        config.normalize();

        assert_eq!(config.get(keys::WILL_RETURN), Some(&json!({})));
        assert_eq!(config.get(keys::WILL), Some(&json!({})));
    }

    #[test]
    fn test_normalize_leaves_scalar_methods_untouched() {
        let mut config = cfg(json!({"methods": "save"}));
        config.normalize();
        let once = config.clone();
        config.normalize();

        assert_eq!(config.get(keys::METHODS), Some(&json!("save")));
        assert_eq!(config, once);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": 0})));
    }
}
