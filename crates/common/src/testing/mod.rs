#![cfg(any(test, feature = "testing"))]

// Testing utilities and fakes for mockwright-common
//
// This module provides a recording in-memory stand-in for the external
// test-framework collaborator. It simulates the builder and mock surface
// without requiring a real mocking framework behind it.
//
// Usage:
// - Drive the factory against FakeTestContext and inspect the recorded calls
// - Configure failure modes to test error pass-through
// - Restrict the known types or settable properties to exercise edge cases

pub mod fake_framework;

pub use fake_framework::{BuilderCall, FakeBuilder, FakeMock, FakeTestContext};
