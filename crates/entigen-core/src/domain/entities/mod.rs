pub mod generated;
pub mod schema;

pub use generated::{GeneratedFiles, Layer, RenderedFile};
pub use schema::{FieldSpec, Schema, SchemaRegistry};
