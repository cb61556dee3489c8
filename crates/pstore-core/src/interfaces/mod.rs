// crates/pstore-core/src/interfaces/mod.rs
// ============================================================================
// Module: Parameter Store Interfaces
// Description: Backend-agnostic interface for parameter-store operations.
// Purpose: Define the contract surface used by walkthroughs and the CLI.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`ParameterStore`] is the single seam between the walkthrough procedures
//! and a backend. Calls are synchronous and issue exactly one round trip;
//! implementations do not retry, cache, or paginate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DeleteParameterRequest;
use crate::core::DeleteParameterResponse;
use crate::core::GetParameterRequest;
use crate::core::GetParameterResponse;
use crate::core::GetParametersByPathRequest;
use crate::core::GetParametersByPathResponse;
use crate::core::GetParametersRequest;
use crate::core::GetParametersResponse;
use crate::core::NamingError;
use crate::core::ParameterName;
use crate::core::PutParameterRequest;
use crate::core::PutParameterResponse;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Parameter store errors.
///
/// Failures are reported, never retried. Variants classify the failure for
/// audit labels; the display text is the backend's own message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named record does not exist.
    #[error("{message}")]
    NotFound {
        /// Requested record name.
        name: ParameterName,
        /// Backend message, printed as-is.
        message: String,
    },
    /// A record with the same name exists and overwrite was not requested.
    #[error("{message}")]
    AlreadyExists {
        /// Requested record name.
        name: ParameterName,
        /// Backend message, printed as-is.
        message: String,
    },
    /// The request was rejected before reaching storage.
    #[error("invalid request: {0}")]
    Invalid(String),
    /// Name or path violates the naming rules.
    #[error("invalid parameter name: {0}")]
    Naming(#[from] NamingError),
    /// The backend reported an error; the message is carried verbatim.
    #[error("{0}")]
    Backend(String),
    /// Local I/O or runtime failure.
    #[error("parameter store io error: {0}")]
    Io(String),
}

impl StoreError {
    /// Builds a not-found error with the local store's message.
    #[must_use]
    pub fn not_found(name: ParameterName) -> Self {
        let message = format!("parameter not found: {name}");
        Self::NotFound {
            name,
            message,
        }
    }

    /// Builds an already-exists error with the local store's message.
    #[must_use]
    pub fn already_exists(name: ParameterName) -> Self {
        let message = format!("parameter already exists: {name}");
        Self::AlreadyExists {
            name,
            message,
        }
    }

    /// Returns a stable label for audit logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound {
                ..
            } => "not_found",
            Self::AlreadyExists {
                ..
            } => "already_exists",
            Self::Invalid(_) => "invalid",
            Self::Naming(_) => "naming",
            Self::Backend(_) => "backend",
            Self::Io(_) => "io",
        }
    }
}

// ============================================================================
// SECTION: Parameter Store
// ============================================================================

/// Backend-agnostic parameter store.
pub trait ParameterStore {
    /// Creates or updates a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend rejects the write.
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError>;

    /// Reads one record by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record is missing or the read fails.
    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError>;

    /// Reads several records by name; unknown names are reported, not failed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the request as a whole is rejected.
    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError>;

    /// Reads one page of records under a path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the path, filters, or page size are rejected.
    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError>;

    /// Deletes one record by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record is missing or the delete fails.
    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError>;
}

impl<T: ParameterStore + ?Sized> ParameterStore for &T {
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError> {
        (**self).put_parameter(request)
    }

    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError> {
        (**self).get_parameter(request)
    }

    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        (**self).get_parameters(request)
    }

    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError> {
        (**self).get_parameters_by_path(request)
    }

    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError> {
        (**self).delete_parameter(request)
    }
}

impl<T: ParameterStore + ?Sized> ParameterStore for Box<T> {
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError> {
        (**self).put_parameter(request)
    }

    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError> {
        (**self).get_parameter(request)
    }

    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        (**self).get_parameters(request)
    }

    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError> {
        (**self).get_parameters_by_path(request)
    }

    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError> {
        (**self).delete_parameter(request)
    }
}
