use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::FrameworkError;
use crate::framework::{MockBuilder, MockHandle, TestContext};

/// Builder properties every fake builder accepts by default, mirroring the
/// conventional `set<Property>` surface of a mock builder.
const DEFAULT_SETTABLE: [&str; 4] = ["methods", "constructorArgs", "mockClassName", "proxyTarget"];

/// One recorded interaction with the fake framework.
#[derive(Clone, Debug, PartialEq)]
pub enum BuilderCall {
    Setting { name: String, value: Value },
    DisableOriginalConstructor,
    Factory { method: String },
    StubReturn { method: String, value: Value },
    StubAction { method: String, action: Value },
}

/// Fake test context for driving the mock factory in tests.
///
/// Clones share the same journal, so a test can keep a handle while the
/// factory owns another.
#[derive(Clone, Debug)]
pub struct FakeTestContext {
    known_types: Arc<RwLock<Option<Vec<String>>>>,
    settable: Arc<RwLock<Vec<String>>>,
    should_fail_builder: Arc<RwLock<bool>>,
    should_fail_stub: Arc<RwLock<bool>>,
    journal: Arc<RwLock<Vec<BuilderCall>>>,
}

impl FakeTestContext {
    pub fn new() -> Self {
        Self {
            known_types: Arc::new(RwLock::new(None)),
            settable: Arc::new(RwLock::new(
                DEFAULT_SETTABLE.iter().map(|name| name.to_string()).collect(),
            )),
            should_fail_builder: Arc::new(RwLock::new(false)),
            should_fail_stub: Arc::new(RwLock::new(false)),
            journal: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Restrict the set of type names the context can produce builders for.
    /// Unrestricted contexts accept any target.
    pub fn set_known_types(&mut self, types: &[&str]) {
        *self.known_types.write().unwrap() =
            Some(types.iter().map(|name| name.to_string()).collect());
    }

    /// Replace the allow-list of settable builder properties.
    pub fn set_settable_properties(&mut self, properties: &[&str]) {
        *self.settable.write().unwrap() =
            properties.iter().map(|name| name.to_string()).collect();
    }

    /// Make builder requests fail with a framework error.
    pub fn set_should_fail_builder(&mut self, should_fail: bool) {
        *self.should_fail_builder.write().unwrap() = should_fail;
    }

    /// Make stub configuration on produced mocks fail.
    pub fn set_should_fail_stub(&mut self, should_fail: bool) {
        *self.should_fail_stub.write().unwrap() = should_fail;
    }

    /// All interactions recorded so far, in call order.
    pub fn calls(&self) -> Vec<BuilderCall> {
        self.journal.read().unwrap().clone()
    }

    /// Factory method used to produce the most recent mock, if any.
    pub fn factory_method_used(&self) -> Option<String> {
        self.journal.read().unwrap().iter().rev().find_map(|call| match call {
            BuilderCall::Factory { method } => Some(method.clone()),
            _ => None,
        })
    }

    /// Clear the recorded interactions.
    pub fn clear(&mut self) {
        self.journal.write().unwrap().clear();
    }

    fn record(&self, call: BuilderCall) {
        self.journal.write().unwrap().push(call);
    }
}

impl Default for FakeTestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext for FakeTestContext {
    type Builder = FakeBuilder;

    fn mock_builder(&self, target: &str) -> Result<FakeBuilder, FrameworkError> {
        if *self.should_fail_builder.read().unwrap() {
            return Err(FrameworkError::Custom("builder unavailable".to_string()));
        }
        if let Some(known) = self.known_types.read().unwrap().as_ref() {
            if !known.iter().any(|known_type| known_type == target) {
                return Err(FrameworkError::UnknownClass(target.to_string()));
            }
        }
        Ok(FakeBuilder {
            context: self.clone(),
            target: target.to_string(),
        })
    }
}

/// Recording mock builder produced by [`FakeTestContext`].
#[derive(Clone, Debug)]
pub struct FakeBuilder {
    context: FakeTestContext,
    target: String,
}

impl FakeBuilder {
    pub fn target(&self) -> &str {
        &self.target
    }

    fn produce(self, method: &str) -> Result<FakeMock, FrameworkError> {
        self.context.record(BuilderCall::Factory {
            method: method.to_string(),
        });
        Ok(FakeMock {
            context: self.context,
            target: self.target,
        })
    }
}

impl MockBuilder for FakeBuilder {
    type Mock = FakeMock;

    fn apply_setting(&mut self, name: &str, value: &Value) -> Result<bool, FrameworkError> {
        let known = self
            .context
            .settable
            .read()
            .unwrap()
            .iter()
            .any(|property| property == name);
        if !known {
            return Ok(false);
        }
        self.context.record(BuilderCall::Setting {
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(true)
    }

    fn disable_original_constructor(&mut self) {
        self.context.record(BuilderCall::DisableOriginalConstructor);
    }

    fn get_mock(self) -> Result<FakeMock, FrameworkError> {
        self.produce("getMock")
    }

    fn get_mock_for_abstract_class(self) -> Result<FakeMock, FrameworkError> {
        self.produce("getMockForAbstractClass")
    }

    fn get_mock_for_trait(self) -> Result<FakeMock, FrameworkError> {
        self.produce("getMockForTrait")
    }
}

/// Recording mock instance produced by [`FakeBuilder`].
#[derive(Clone, Debug)]
pub struct FakeMock {
    context: FakeTestContext,
    target: String,
}

impl FakeMock {
    /// The type name this mock was built for.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl MockHandle for FakeMock {
    fn stub_return(&mut self, method: &str, value: Value) -> Result<(), FrameworkError> {
        if *self.context.should_fail_stub.read().unwrap() {
            return Err(FrameworkError::UnknownMethod(method.to_string()));
        }
        self.context.record(BuilderCall::StubReturn {
            method: method.to_string(),
            value,
        });
        Ok(())
    }

    fn stub_action(&mut self, method: &str, action: Value) -> Result<(), FrameworkError> {
        if *self.context.should_fail_stub.read().unwrap() {
            return Err(FrameworkError::UnknownMethod(method.to_string()));
        }
        self.context.record(BuilderCall::StubAction {
            method: method.to_string(),
            action,
        });
        Ok(())
    }
}
