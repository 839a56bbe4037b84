// tests/support/mod.rs
// Shared across multiple integration-test binaries; not every binary uses
// every helper, so silence dead_code at the module level.
#[allow(dead_code)]
pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;
