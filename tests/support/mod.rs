// tests/support/mod.rs
// Shared by several integration test binaries; each binary uses a different
// subset, so unused items are allowed at the module level.
#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(dead_code, unused_imports)]
pub mod builders;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use mocks::*;
