//! entigen core - hexagonal architecture implementation
//!
//! Domain and application layers of the entigen entity/model generator.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           entigen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (GenerateService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Filesystem, Prompter)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    entigen-adapters (Infrastructure)    │
//! │  (LocalFilesystem, MemoryFilesystem,    │
//! │   ScriptedPrompter)                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use entigen_core::domain::{emitter, inference};
//! use serde_json::json;
//!
//! let registry = inference::infer("User", &json!({"address": {"city": "NYC"}})).unwrap();
//! let files = emitter::render("UserEntity", &registry).unwrap();
//!
//! assert_eq!(
//!     files.identifiers().collect::<Vec<_>>(),
//!     ["address_entity", "user_entity", "user_model"]
//! );
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        GenerateService, GenerationReport, OutputDirs,
        ports::{Filesystem, Prompter},
    };
    pub use crate::domain::{
        EmitOptions, Emitter, GeneratedFiles, Inferencer, Layer, NamingConvention, RenderedFile,
        Schema, SchemaRegistry, TypeRef, UnsupportedShapePolicy,
    };
    pub use crate::error::{EntigenError, EntigenResult};
}
