//! Domain models for data-model documentation.
//!
//! # Core Concepts
//!
//! - [`Registry`]: Registered models grouped by [`Category`], in registration order.
//! - [`MetadataRecord`]: How a model is presented (display name, description,
//!   keywords) and which of its fields are documented ([`ModelConfig`]).
//! - [`ModelDefinition`]: The framework's view of a model and its declared
//!   fields, resolved through a [`ModelLookup`].
//! - [`FieldDescriptor`]: One declared field. Display metadata is exposed through
//!   the capability traits [`HasVerboseName`], [`HasHelpText`] and [`HasUnits`].

mod field;
mod model;
mod record;
mod registry;

pub use field::*;
pub use model::*;
pub use record::*;
pub use registry::*;
