// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit_repo;
pub mod security;
pub mod time;

pub use audit_repo::{FailingAuditRepo, InMemoryAuditRepo};
pub use security::{DummyTokenManager, EXPIRED_TOKEN, INSTRUCTOR_TOKEN, PM_TOKEN, pm_user, instructor_user};
pub use time::{FixedClock, fixed_now};
