//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers used by parsing, search and display

pub mod error;
pub mod string;
