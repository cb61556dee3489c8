// crates/pstore-core/src/runtime/walkthrough.rs
// ============================================================================
// Module: Parameter Store Walkthrough
// Description: Sequential example procedures over a parameter store.
// Purpose: Issue one request per step and print the labeled response.
// Dependencies: crate::core, crate::interfaces, crate::prettify
// ============================================================================

//! ## Overview
//! A [`Walkthrough`] drives the five parameter-store operations against any
//! [`ParameterStore`], one synchronous call per step. Each step writes a
//! label line followed by the pretty-printed response. The first failing
//! step ends the run; nothing is retried.
//!
//! Settings are passed in explicitly so that procedures share no mutable
//! state beyond the store itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::core::DeleteParameterRequest;
use crate::core::DeleteParameterResponse;
use crate::core::GetParameterRequest;
use crate::core::GetParameterResponse;
use crate::core::GetParametersByPathRequest;
use crate::core::GetParametersByPathResponse;
use crate::core::GetParametersRequest;
use crate::core::GetParametersResponse;
use crate::core::ParameterName;
use crate::core::ParameterStringFilter;
use crate::core::ParameterType;
use crate::core::PutParameterRequest;
use crate::core::PutParameterResponse;
use crate::interfaces::ParameterStore;
use crate::interfaces::StoreError;
use crate::prettify::prettify;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Value written by the create-or-update step.
pub const DEMO_VALUE: &str = "Cash Rules Everything Around Me";
/// Name deliberately absent from the store in the multi-name read.
pub const INVALID_PARAMETER_NAME: &str = "InvalidParamName";
/// Path read by the path-prefix step.
pub const DEFAULT_PATH: &str = "/";
/// Page size used by the path-prefix step.
pub const DEFAULT_PATH_MAX_RESULTS: u32 = 2;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Walkthrough failures.
#[derive(Debug, Error)]
pub enum WalkthroughError {
    /// A store call failed; the message is printed as-is.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Writing the rendered output failed.
    #[error("failed to write walkthrough output: {0}")]
    Output(#[from] io::Error),
}

/// Error returned when a step name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown walkthrough step: {0} (expected put, get, get-many, get-by-path, or delete)")]
pub struct UnknownStep(String);

// ============================================================================
// SECTION: Steps
// ============================================================================

/// One walkthrough procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Create-or-update the configured record.
    Put,
    /// Read the configured record with decryption.
    Get,
    /// Read the configured record alongside an unknown name.
    GetMany,
    /// Read one page under the configured path.
    GetByPath,
    /// Delete the configured record.
    Delete,
}

impl Step {
    /// Every step in the order a full walkthrough runs them.
    pub const ALL: [Self; 5] = [Self::Put, Self::Get, Self::GetMany, Self::GetByPath, Self::Delete];

    /// Returns the kebab-case step name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Get => "get",
            Self::GetMany => "get-many",
            Self::GetByPath => "get-by-path",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = UnknownStep;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == value)
            .ok_or_else(|| UnknownStep(value.to_string()))
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Inputs shared by every walkthrough step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughSettings {
    /// Target record name.
    pub name: ParameterName,
    /// Value written by the create-or-update step.
    pub value: String,
    /// Type tag written by the create-or-update step.
    pub parameter_type: ParameterType,
    /// Path read by the path-prefix step.
    pub path: String,
    /// Whether the path-prefix step descends below one level.
    pub recursive: bool,
    /// Optional type restriction for the path-prefix step.
    pub type_filter: Option<ParameterType>,
    /// Page size for the path-prefix step.
    pub max_results: u32,
}

impl WalkthroughSettings {
    /// Builds settings with the stock demo values for the given record.
    #[must_use]
    pub fn new(name: impl Into<ParameterName>) -> Self {
        Self {
            name: name.into(),
            value: DEMO_VALUE.to_string(),
            parameter_type: ParameterType::SecureString,
            path: DEFAULT_PATH.to_string(),
            recursive: true,
            type_filter: Some(ParameterType::SecureString),
            max_results: DEFAULT_PATH_MAX_RESULTS,
        }
    }
}

// ============================================================================
// SECTION: Walkthrough
// ============================================================================

/// Runs example procedures against a store and prints each response.
pub struct Walkthrough<'a, S: ParameterStore + ?Sized, W: Write> {
    /// Store receiving every call.
    store: &'a S,
    /// Destination for labels and rendered responses.
    out: W,
    /// Shared procedure inputs.
    settings: WalkthroughSettings,
}

impl<'a, S: ParameterStore + ?Sized, W: Write> Walkthrough<'a, S, W> {
    /// Creates a walkthrough writing to `out`.
    pub const fn new(store: &'a S, out: W, settings: WalkthroughSettings) -> Self {
        Self {
            store,
            out,
            settings,
        }
    }

    /// Returns the procedure inputs.
    pub const fn settings(&self) -> &WalkthroughSettings {
        &self.settings
    }

    /// Consumes the walkthrough and returns the writer.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Runs `steps` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkthroughError`] raised by a step.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), WalkthroughError> {
        for step in steps {
            match step {
                Step::Put => {
                    self.put_parameter_example()?;
                }
                Step::Get => {
                    self.get_parameter_example()?;
                }
                Step::GetMany => {
                    self.get_parameters_example()?;
                }
                Step::GetByPath => {
                    self.get_parameters_by_path_example()?;
                }
                Step::Delete => {
                    self.delete_parameter_example()?;
                }
            }
        }
        Ok(())
    }

    /// Writes the configured value with overwrite enabled.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn put_parameter_example(&mut self) -> Result<PutParameterResponse, WalkthroughError> {
        let request = PutParameterRequest {
            name: self.settings.name.clone(),
            value: self.settings.value.clone(),
            parameter_type: Some(self.settings.parameter_type),
            overwrite: true,
            description: None,
            key_id: None,
        };
        let response = self.store.put_parameter(&request)?;
        let label = self.settings.name.to_string();
        self.emit("PutParameter", &label, &response)?;
        Ok(response)
    }

    /// Reads the configured record with decryption.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn get_parameter_example(&mut self) -> Result<GetParameterResponse, WalkthroughError> {
        let response = self.store.get_parameter(&self.decrypting_get())?;
        let label = self.settings.name.to_string();
        self.emit("GetParameter", &label, &response)?;
        Ok(response)
    }

    /// Reads the configured record together with a name that does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn get_parameters_example(&mut self) -> Result<GetParametersResponse, WalkthroughError> {
        let request = GetParametersRequest {
            names: vec![self.settings.name.clone(), ParameterName::from(INVALID_PARAMETER_NAME)],
            with_decryption: true,
        };
        let response = self.store.get_parameters(&request)?;
        let label = self.settings.name.to_string();
        self.emit("GetParameters", &label, &response)?;
        Ok(response)
    }

    /// Reads a single page under the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn get_parameters_by_path_example(
        &mut self,
    ) -> Result<GetParametersByPathResponse, WalkthroughError> {
        let request = GetParametersByPathRequest {
            path: self.settings.path.clone(),
            recursive: self.settings.recursive,
            parameter_filters: self
                .settings
                .type_filter
                .map(ParameterStringFilter::type_equals)
                .into_iter()
                .collect(),
            max_results: Some(self.settings.max_results),
            with_decryption: true,
        };
        let response = self.store.get_parameters_by_path(&request)?;
        let label = self.settings.path.clone();
        self.emit("GetParametersByPath", &label, &response)?;
        Ok(response)
    }

    /// Deletes the configured record.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn delete_parameter_example(
        &mut self,
    ) -> Result<DeleteParameterResponse, WalkthroughError> {
        let request = DeleteParameterRequest {
            name: self.settings.name.clone(),
        };
        let response = self.store.delete_parameter(&request)?;
        let label = self.settings.name.to_string();
        self.emit("DeleteParameter", &label, &response)?;
        Ok(response)
    }

    /// Reads the configured record and prints the response without a label.
    ///
    /// # Errors
    ///
    /// Returns [`WalkthroughError`] when the call or the output fails.
    pub fn print_parameter(&mut self) -> Result<GetParameterResponse, WalkthroughError> {
        let response = self.store.get_parameter(&self.decrypting_get())?;
        writeln!(self.out, "{}", prettify(&response))?;
        Ok(response)
    }

    /// Builds the decrypting single-read request.
    fn decrypting_get(&self) -> GetParameterRequest {
        GetParameterRequest {
            name: self.settings.name.clone(),
            with_decryption: true,
        }
    }

    /// Writes the label line and the rendered response.
    fn emit<T: Serialize>(&mut self, operation: &str, target: &str, response: &T) -> io::Result<()> {
        writeln!(self.out, "{operation}: {target}")?;
        writeln!(self.out, "{}", prettify(response))
    }
}
