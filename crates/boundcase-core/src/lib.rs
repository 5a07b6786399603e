//! # boundcase-core
//!
//! Generate boundary-value test cases from schema constraints.
//!
//! Hand it a [`Schema`] and it returns representative valid and invalid
//! inputs, each with a human-readable description and the verdict of the
//! schema's own validator:
//!
//! ```
//! use boundcase_core::{valid, invalid, IntoSchema, Schema};
//!
//! let schema: Schema = Schema::object([
//!     ("name", Schema::from(Schema::string().min(2))),
//!     ("age", Schema::number().min(0.0).optional()),
//! ])
//! .into();
//!
//! let good = valid(&schema).unwrap();
//! let bad = invalid(&schema).unwrap();
//! assert!(good.iter().all(|c| c.is_valid));
//! assert!(bad.iter().all(|c| !c.is_valid));
//! ```
//!
//! Output is deterministic for a given [`GenerateOptions::seed`].

mod composite;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod generators;
pub mod oracle;
pub mod random;
pub mod registry;
pub mod schema;
pub mod value;
pub mod warning;

pub use config::GenerateOptions;
pub use error::{ErrorCode, GenerateError};
pub use extract::{extract, ConstraintSet};
pub use generator::{generate, invalid, valid, Generated, TestCaseGenerator};
pub use generators::{GenContext, LeafGenerator};
pub use oracle::{case, classify, TestCase, Verdict};
pub use registry::{default_registry, GeneratorRegistry, RegistryBuilder};
pub use schema::{IntoSchema, Schema, SchemaKind, ValidationError};
pub use value::Value;
pub use warning::{Warning, WarningKind};
