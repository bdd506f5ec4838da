use serde_json::Value;

use crate::error::FrameworkError;

type Result<T> = std::result::Result<T, FrameworkError>;

/// The test-context collaborator that hands out mock builders.
///
/// Implemented over the real test framework in production test suites and
/// by [`crate::testing::FakeTestContext`] in this workspace's own tests.
pub trait TestContext {
    type Builder: MockBuilder;

    /// Obtains a staged mock builder for the named target type.
    fn mock_builder(&self, target: &str) -> Result<Self::Builder>;
}

/// A staged configuration object that accumulates settings before
/// producing a mock instance.
pub trait MockBuilder {
    type Mock: MockHandle;

    /// Applies a named builder property if the builder supports it.
    ///
    /// Returns `Ok(false)` when the builder exposes no setter for `name`;
    /// callers ignore such keys.
    fn apply_setting(&mut self, name: &str, value: &Value) -> Result<bool>;

    /// Suppresses invocation of the mocked type's original constructor.
    fn disable_original_constructor(&mut self);

    /// Produces a mock of a concrete class.
    fn get_mock(self) -> Result<Self::Mock>;

    /// Produces a mock of an abstract class.
    fn get_mock_for_abstract_class(self) -> Result<Self::Mock>;

    /// Produces a mock of a trait.
    fn get_mock_for_trait(self) -> Result<Self::Mock>;
}

/// A produced mock instance accepting per-method stubs.
pub trait MockHandle {
    /// Configures `method` to return `value` when called.
    fn stub_return(&mut self, method: &str, value: Value) -> Result<()>;

    /// Configures `method` to perform an opaque framework-defined action,
    /// such as a callback or a sequence of returns.
    fn stub_action(&mut self, method: &str, action: Value) -> Result<()>;
}
