// crates/pstore-ssm/src/lib.rs
// ============================================================================
// Module: Parameter Store SSM Library
// Description: AWS Systems Manager backend for the parameter-store interface.
// Purpose: Issue one blocking SDK round trip per parameter-store call.
// Dependencies: aws-config, aws-sdk-ssm, pstore-config, pstore-core, tokio
// ============================================================================

//! ## Overview
//! [`SsmParameterStore`] implements [`pstore_core::ParameterStore`] over the
//! official SDK. It owns a private runtime and blocks on every request, so
//! callers stay synchronous. Name validation is left to the service.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod convert;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::SsmParameterStore;
