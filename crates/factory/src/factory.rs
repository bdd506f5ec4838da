use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use mockwright_common::framework::{MockBuilder, MockHandle, TestContext};
use mockwright_common::{MockConfig, MockType, is_truthy, keys};

use crate::error::MockFactoryError;

type Result<T> = std::result::Result<T, MockFactoryError>;

/// Mock instance type produced by a given test context.
pub type MockOf<C> = <<C as TestContext>::Builder as MockBuilder>::Mock;

/// Turns shorthand configurations into fully configured mock objects.
///
/// The factory holds a single reference to the test context supplied at
/// construction; configurations are consumed per call and never shared.
pub struct MockFactory<C> {
    context: C,
}

impl<C: TestContext> MockFactory<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }

    /// The test context this factory builds mocks through.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Produces a configured mock for `target` from zero or more shorthand
    /// configurations.
    ///
    /// Each configuration is normalized independently, then all of them are
    /// deep-merged with later ones overriding earlier ones. The merged
    /// result drives the framework's builder: recognized builder properties
    /// are applied, the original constructor is suppressed unless
    /// configured otherwise, the mock is produced through the factory
    /// method selected by `mockType`, and the `willReturn`/`will` stubs are
    /// installed on it.
    #[instrument(skip_all, fields(class = target))]
    pub fn mock_object(
        &self,
        target: &str,
        configs: impl IntoIterator<Item = MockConfig>,
    ) -> Result<MockOf<C>> {
        let mut config = merge_configs(configs);

        let will_return = take_mapping(&mut config, keys::WILL_RETURN);
        let will = take_mapping(&mut config, keys::WILL);
        let mock_type_value = config
            .remove(keys::MOCK_TYPE)
            .unwrap_or_else(|| Value::String(MockType::Default.as_str().to_string()));

        // Only the default mock type treats an absent or empty `methods`
        // entry as "replace every method"; null is the builder's sentinel
        // for that.
        if methods_unrestricted(&config, &mock_type_value) {
            config.insert(keys::METHODS, Value::Null);
        }

        let mut builder = self.context.mock_builder(target)?;
        for (key, value) in config.iter() {
            if !builder.apply_setting(key, value)? {
                trace!(key = %key, "no matching builder setter, ignoring");
            }
        }

        let disable_constructor = config
            .get(keys::DISABLE_ORIGINAL_CONSTRUCTOR)
            .map(is_truthy)
            .unwrap_or(true);
        if disable_constructor {
            builder.disable_original_constructor();
        }

        let mock_type = MockType::try_from(&mock_type_value)?;
        debug!(factory = mock_type.factory_method(), "creating mock instance");
        let mut mock = match mock_type {
            MockType::Default => builder.get_mock(),
            MockType::Abstract => builder.get_mock_for_abstract_class(),
            MockType::Trait => builder.get_mock_for_trait(),
        }?;

        for (method, value) in will_return {
            mock.stub_return(&method, value)?;
        }
        for (method, action) in will {
            mock.stub_action(&method, action)?;
        }

        Ok(mock)
    }
}

fn merge_configs(configs: impl IntoIterator<Item = MockConfig>) -> MockConfig {
    let mut merged: Option<MockConfig> = None;
    for mut config in configs {
        config.normalize();
        match merged.as_mut() {
            Some(base) => base.merge_from(config),
            None => merged = Some(config),
        }
    }
    merged.unwrap_or_else(|| {
        let mut empty = MockConfig::new();
        empty.normalize();
        empty
    })
}

fn take_mapping(config: &mut MockConfig, key: &str) -> Map<String, Value> {
    match config.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn methods_unrestricted(config: &MockConfig, mock_type: &Value) -> bool {
    if !matches!(mock_type, Value::String(symbol) if symbol == MockType::Default.as_str()) {
        return false;
    }
    match config.get(keys::METHODS) {
        None | Some(Value::Null) => true,
        Some(Value::Array(list)) => list.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}
