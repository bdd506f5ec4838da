use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MockConfigError;

/// The mock-construction strategy requested through the `mockType` option.
///
/// Each variant resolves to one factory method on the framework's mock
/// builder; anything outside this set is rejected with
/// [`MockConfigError::InvalidMockType`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockType {
    /// Mock of a concrete class, produced by `getMock`.
    #[default]
    Default,
    /// Mock of an abstract class, produced by `getMockForAbstractClass`.
    Abstract,
    /// Mock of a trait or mixin, produced by `getMockForTrait`.
    Trait,
}

impl MockType {
    /// The symbol this variant uses in a `mockType` configuration entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            MockType::Default => "default",
            MockType::Abstract => "abstract",
            MockType::Trait => "trait",
        }
    }

    /// Name of the builder factory method that produces this kind of mock.
    pub fn factory_method(&self) -> &'static str {
        match self {
            MockType::Default => "getMock",
            MockType::Abstract => "getMockForAbstractClass",
            MockType::Trait => "getMockForTrait",
        }
    }
}

impl FromStr for MockType {
    type Err = MockConfigError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "default" => Ok(MockType::Default),
            "abstract" => Ok(MockType::Abstract),
            "trait" => Ok(MockType::Trait),
            other => Err(MockConfigError::InvalidMockType(other.to_string())),
        }
    }
}

impl TryFrom<&Value> for MockType {
    type Error = MockConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(symbol) => symbol.parse(),
            other => Err(MockConfigError::InvalidMockType(other.to_string())),
        }
    }
}

impl Display for MockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_factory_method_resolution() {
        assert_eq!(MockType::Default.factory_method(), "getMock");
        assert_eq!(
            MockType::Abstract.factory_method(),
            "getMockForAbstractClass"
        );
        assert_eq!(MockType::Trait.factory_method(), "getMockForTrait");
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = "0123456789".parse::<MockType>().unwrap_err();
        assert!(
            matches!(err, MockConfigError::InvalidMockType(symbol) if symbol == "0123456789")
        );

        assert!("Default".parse::<MockType>().is_err(), "symbols are case sensitive");
        assert!("".parse::<MockType>().is_err());
    }

    #[test]
    fn test_symbol_round_trip() {
        for mock_type in [MockType::Default, MockType::Abstract, MockType::Trait] {
            assert_eq!(mock_type.as_str().parse::<MockType>().unwrap(), mock_type);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_symbols() {
        assert_eq!(serde_json::to_value(MockType::Abstract).unwrap(), json!("abstract"));
        let parsed: MockType = serde_json::from_value(json!("trait")).unwrap();
        assert_eq!(parsed, MockType::Trait);
    }

    #[test]
    fn test_non_string_values_are_rejected() {
        assert!(MockType::try_from(&json!(3)).is_err());
        assert!(MockType::try_from(&json!(null)).is_err());
        assert_eq!(
            MockType::try_from(&json!("abstract")).unwrap(),
            MockType::Abstract
        );
    }
}
