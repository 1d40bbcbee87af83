//! Crosscheck - contradiction detection between code and documentation.
//!
//! Crosscheck hands a set of files (typically an implementation and the
//! documentation describing it) to a reasoning backend and turns the
//! backend's free-form answer into a strict report of contradictions.
//!
//! # Architecture
//!
//! - `artifact`: the input files and their identifiers
//! - `config`: configuration assembled once at startup
//! - `backend`: pluggable reasoning backends and the backend selector
//! - `parse`: recovery of contradictions from untrusted backend output
//! - `validate`: membership filtering against the input files
//! - `analyze`: the pipeline and its failure policies
//! - `report`: output formatting (text, JSON)
//!
//! # Adding a New Backend
//!
//! Implement the `Backend` trait in `src/backend/` and add a `Mode` variant
//! for it in `backend::select`.

pub mod analyze;
pub mod artifact;
pub mod backend;
pub mod cli;
pub mod config;
pub mod parse;
pub mod report;
pub mod types;
pub mod validate;

pub use analyze::{analyze, Analysis, Pipeline};
pub use artifact::{Artifact, ArtifactError, ArtifactSet};
pub use backend::{Backend, BackendError, ConfigError};
pub use config::{Config, FailurePolicy, Mode, OutOfSetPolicy};
pub use parse::{OutputFormat, ParseError};
pub use report::Signal;
pub use types::{AnalysisResult, Contradiction, Origin};
