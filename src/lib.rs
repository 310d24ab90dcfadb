//! Reference documentation for registered data models.
//!
//! The crate has two halves that a documentation build drives:
//!
//! - [`listing`]: writes the `data_models/` index and per-category listing
//!   pages when the builder starts.
//! - [`directive`]: the `autodatamodel` directive, rendering one model's
//!   declared fields into a [`doctree::Node`] tree.
//!
//! [`extension`] wires both into a host build tool, [`build`] is a small local
//! host, and [`catalog`] loads registry and model definitions from JSON.

pub mod build;
pub mod catalog;
pub mod config;
pub mod directive;
pub mod doctree;
pub mod error;
pub mod extension;
pub mod listing;
pub mod models;
pub mod ordering;
pub mod text;
pub mod writer;

pub use error::{DocsError, PathError};
