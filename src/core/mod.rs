//! core
//!
//! Core domain types and operations for Scriptorium.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ProjectId, Fingerprint
//! - [`manifest`] - Manifest model and target-path resolution
//! - [`tsv`] - Structural validation of translation-notes TSV files
//! - [`csv`] - Spreadsheet-friendly CSV export
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Resolution and validation are pure functions of their inputs
//! - Absence (no match, unloaded content) is a modeled value, not a fault
//! - All checks are read-only; content is never corrected in place

pub mod config;
pub mod csv;
pub mod manifest;
pub mod tsv;
pub mod types;
