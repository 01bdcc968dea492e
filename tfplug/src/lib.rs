//! tfplug - Terraform Plugin Framework for Rust
//!
//! The core of a framework for building Terraform providers in Rust: the
//! value model shared with Terraform, schema descriptors with validation,
//! diagnostics and request-scoped contexts.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use context::Context;
pub use error::{Result, TfplugError};
pub use schema::{
    Attribute, AttributeBuilder, AttributeType, Block, CustomType, NestedBlock, NestedType,
    NestingMode, ObjectNestingMode, Schema, SchemaBuilder, Validator, ValidatorRequest,
    ValidatorResponse,
};
pub use types::{
    AttributePath, AttributePathStep, Diagnostic, DiagnosticSeverity, Diagnostics, Dynamic,
    DynamicValue,
};
