//! Core domain layer for entigen.
//!
//! Pure logic: JSON shape inference, naming, and Dart source emission.
//! Nothing here touches the filesystem or the terminal; reading the sample
//! and writing files is the application layer's job, through ports.
//!
//! ## Pipeline
//!
//! ```text
//! (class name, serde_json::Value)
//!         │  inference::Inferencer
//!         ▼
//!   SchemaRegistry   (nested schemas first, root last)
//!         │  emitter::Emitter
//!         ▼
//!   GeneratedFiles   (identifier → RenderedFile)
//! ```
pub mod emitter;
pub mod entities;
pub mod error;
pub mod inference;
pub mod naming;
pub mod value_objects;

pub use emitter::{EmitOptions, Emitter};
pub use entities::{FieldSpec, GeneratedFiles, Layer, RenderedFile, Schema, SchemaRegistry};
pub use error::{DomainError, ErrorCategory};
pub use inference::{Inferencer, MAX_LIST_DEPTH, infer};
pub use value_objects::{NamingConvention, TypeRef, UnsupportedShapePolicy, ValueKind};
