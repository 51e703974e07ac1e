//! Core types and trait definitions for the Sprout tracking backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod activity;
pub mod checklist;
pub mod child;
pub mod entity;
pub mod notification;
pub mod planning;
pub mod store;
pub mod suggestion;
pub mod user;
pub mod validate;

pub use validate::{FieldError, ValidationError};
