//! Application layer for entigen.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`GenerateService`)
//! - **Ports**: traits for the outside world (`Filesystem`, `Prompter`)
//! - **Errors**: application-specific error types
//!
//! All inference and emission rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerateService, GenerationReport, OutputDirs};

pub use ports::{Filesystem, Prompter};

pub use error::ApplicationError;
