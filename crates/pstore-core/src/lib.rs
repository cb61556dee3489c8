// crates/pstore-core/src/lib.rs
// ============================================================================
// Module: Parameter Store Core Library
// Description: Public API surface for the parameter-store walkthrough core.
// Purpose: Expose core types, interfaces, runtime helpers, and rendering.
// Dependencies: crate::{audit, core, interfaces, prettify, runtime}
// ============================================================================

//! ## Overview
//! The core crate models the remote parameter-store service's records and
//! requests, defines the [`ParameterStore`] seam, and ships an in-memory
//! store, the walkthrough procedures, a response pretty-printer, and audit
//! sinks. Network-backed stores live in separate crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod prettify;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use audit::AuditSink;
pub use audit::AuditedParameterStore;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ParameterAuditEvent;
pub use audit::StderrAuditSink;
pub use interfaces::ParameterStore;
pub use interfaces::StoreError;
pub use prettify::prettify;
pub use runtime::InMemoryParameterStore;
pub use runtime::Step;
pub use runtime::Walkthrough;
pub use runtime::WalkthroughError;
pub use runtime::WalkthroughSettings;
