//! Audit log service for the instructor onboarding portal.
//!
//! Layers follow the usual split: `domain` holds entities, filters and the
//! repository port; `application` holds the query/command services;
//! `infrastructure` holds the PostgreSQL and token adapters; `presentation`
//! exposes the read-only HTTP API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
