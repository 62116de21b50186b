//! Core types, validation rules, and the submission service for DoContact.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend plugs in through [`store::SubmissionStore`]; the web layer
//! builds typed inputs at its boundary and hands them to
//! [`service::SubmissionService`].

pub mod error;
pub mod origin;
pub mod page;
pub mod sanitize;
pub mod service;
pub mod store;
pub mod submission;
pub mod validate;

pub use error::{Error, Result};
