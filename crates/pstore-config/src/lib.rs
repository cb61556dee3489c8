// crates/pstore-config/src/lib.rs
// ============================================================================
// Module: Parameter Store Config Library
// Description: Configuration model and validation for the walkthrough tools.
// Purpose: Single source of truth for pstore.toml and environment settings.
// Dependencies: pstore-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `pstore-config` replaces scattered environment reads with one explicit
//! configuration value. Settings come from an optional TOML file overlaid by
//! the standard AWS environment variables, and are validated fail-closed
//! before any client is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
