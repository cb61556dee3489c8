// crates/pstore-core/src/core/mod.rs
// ============================================================================
// Module: Parameter Store Core Types
// Description: Records, identifiers, requests, and naming rules.
// Purpose: Group the data model shared by every store implementation.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Core types describe the remote service's data model without owning any of
//! it. Everything here is request-scoped and serializable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod naming;
pub mod parameter;
pub mod requests;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::ParameterName;
pub use naming::NamingError;
pub use parameter::Blob;
pub use parameter::Parameter;
pub use parameter::ParameterStringFilter;
pub use parameter::ParameterTier;
pub use parameter::ParameterType;
pub use parameter::UnknownVariant;
pub use requests::DeleteParameterRequest;
pub use requests::DeleteParameterResponse;
pub use requests::GetParameterRequest;
pub use requests::GetParameterResponse;
pub use requests::GetParametersByPathRequest;
pub use requests::GetParametersByPathResponse;
pub use requests::GetParametersRequest;
pub use requests::GetParametersResponse;
pub use requests::PutParameterRequest;
pub use requests::PutParameterResponse;
pub use time::Timestamp;
