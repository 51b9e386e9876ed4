//! Core types shared across Morphset crates
//!
//! This crate provides the small set of types that both the synthesis engine
//! and its external collaborators (persistence providers, schema sources)
//! need to agree on:
//!
//! - **Kind tag**: `SettingsKind`, the behavioral contract of an instance
//! - **Identity**: `SchemaId`, the process-unique identity of a resolved schema
//! - **Schema constants**: Canonical logging field keys and event names

pub mod ids;
pub mod kind;
pub mod schema;

pub use ids::SchemaId;
pub use kind::{ParseKindError, SettingsKind};
