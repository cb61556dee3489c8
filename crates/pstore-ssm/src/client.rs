// crates/pstore-ssm/src/client.rs
// ============================================================================
// Module: SSM Parameter Store Client
// Description: Blocking parameter store over the AWS Systems Manager SDK.
// Purpose: Map each core request to one SDK call and back.
// Dependencies: aws-config, aws-sdk-ssm, pstore-config, pstore-core, tokio
// ============================================================================

//! ## Overview
//! Each call clones the SDK client into a future, blocks on `send()` through
//! a private runtime, and converts the output. Failures are never retried by
//! this layer; the SDK's own defaults are left untouched.
//!
//! Service errors with a known meaning become [`StoreError::NotFound`] or
//! [`StoreError::AlreadyExists`]. Everything else becomes
//! [`StoreError::Backend`]. Every variant carries the SDK's full error
//! context as its message, so callers print the service text unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::config::Credentials;
use aws_sdk_ssm::error::DisplayErrorContext;
use pstore_config::AwsSettings;
use pstore_config::CredentialSource;
use pstore_core::DeleteParameterRequest;
use pstore_core::DeleteParameterResponse;
use pstore_core::GetParameterRequest;
use pstore_core::GetParameterResponse;
use pstore_core::GetParametersByPathRequest;
use pstore_core::GetParametersByPathResponse;
use pstore_core::GetParametersRequest;
use pstore_core::GetParametersResponse;
use pstore_core::ParameterName;
use pstore_core::ParameterStore;
use pstore_core::PutParameterRequest;
use pstore_core::PutParameterResponse;
use pstore_core::StoreError;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;
use tokio::runtime::RuntimeFlavor;

use crate::convert::from_sdk_parameter;
use crate::convert::from_sdk_parameters;
use crate::convert::from_sdk_tier;
use crate::convert::to_sdk_filter;
use crate::convert::to_sdk_type;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider name reported for statically configured credentials.
const STATIC_PROVIDER_NAME: &str = "pstore-static";

// ============================================================================
// SECTION: Runtime Helpers
// ============================================================================

/// Blocks on an SDK future using a compatible runtime.
fn block_on_with_runtime<F, T>(runtime: &Runtime, future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>> + Send + 'static,
    T: Send + 'static,
{
    if let Ok(handle) = Handle::try_current() {
        if matches!(handle.runtime_flavor(), RuntimeFlavor::MultiThread) {
            return tokio::task::block_in_place(|| handle.block_on(future));
        }
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        std::thread::spawn(move || {
            let result = Runtime::new()
                .map_err(|err| StoreError::Io(err.to_string()))
                .and_then(|runtime| runtime.block_on(future));
            let _ = tx.send(result);
        });
        return rx
            .recv()
            .unwrap_or_else(|_| Err(StoreError::Io("parameter store thread join failed".to_string())));
    }

    runtime.block_on(future)
}

/// Renders an SDK error with its full source chain.
fn error_message<E: StdError>(err: &E) -> String {
    DisplayErrorContext(err).to_string()
}

/// Wraps an unclassified SDK error.
fn backend_error<E: StdError>(err: &E) -> StoreError {
    StoreError::Backend(error_message(err))
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Parameter store backed by AWS Systems Manager.
pub struct SsmParameterStore {
    /// Underlying SDK client.
    client: Client,
    /// Tokio runtime for blocking SDK operations.
    runtime: Option<Arc<Runtime>>,
}

impl fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SsmParameterStore").finish_non_exhaustive()
    }
}

impl Drop for SsmParameterStore {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = std::thread::spawn(move || drop(runtime));
        }
    }
}

impl SsmParameterStore {
    /// Builds a client for the configured region, endpoint, and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when settings are incomplete or the runtime
    /// cannot start.
    pub fn new(settings: &AwsSettings) -> Result<Self, StoreError> {
        let credentials = static_credentials(settings)?;
        let runtime = Runtime::new().map_err(|err| StoreError::Io(err.to_string()))?;
        let region = settings.region.clone();
        let endpoint = settings.endpoint_url.clone();
        let shared_config = block_on_with_runtime(&runtime, async move {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(Region::new(region));
            }
            if let Some(endpoint) = endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            if let Some(credentials) = credentials {
                loader = loader.credentials_provider(credentials);
            }
            Ok(loader.load().await)
        })?;
        Ok(Self {
            client: Client::new(&shared_config),
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Returns the region the client resolved, if any.
    #[must_use]
    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(ToString::to_string)
    }

    /// Returns the runtime or an error if shutdown.
    fn runtime(&self) -> Result<&Runtime, StoreError> {
        self.runtime
            .as_ref()
            .map(AsRef::as_ref)
            .ok_or_else(|| StoreError::Io("parameter store runtime closed".to_string()))
    }
}

/// Builds static credentials when configured, or `None` for the default chain.
fn static_credentials(settings: &AwsSettings) -> Result<Option<Credentials>, StoreError> {
    match settings.credentials {
        CredentialSource::DefaultChain => Ok(None),
        CredentialSource::Static => {
            let access_key_id = settings.access_key_id.clone().ok_or_else(|| {
                StoreError::Invalid("static credentials require an access key id".to_string())
            })?;
            let secret_access_key = settings.secret_access_key.clone().ok_or_else(|| {
                StoreError::Invalid("static credentials require a secret access key".to_string())
            })?;
            Ok(Some(Credentials::new(
                access_key_id,
                secret_access_key,
                settings.session_token.clone(),
                None,
                STATIC_PROVIDER_NAME,
            )))
        }
    }
}

// ============================================================================
// SECTION: Parameter Store
// ============================================================================

impl ParameterStore for SsmParameterStore {
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError> {
        let client = self.client.clone();
        let request = request.clone();
        block_on_with_runtime(self.runtime()?, async move {
            let output = client
                .put_parameter()
                .name(request.name.as_str())
                .value(request.value)
                .set_type(request.parameter_type.map(to_sdk_type))
                .overwrite(request.overwrite)
                .set_description(request.description)
                .set_key_id(request.key_id)
                .send()
                .await
                .map_err(|err| {
                    if err.as_service_error().is_some_and(|service| service.is_parameter_already_exists()) {
                        StoreError::AlreadyExists {
                            name: request.name.clone(),
                            message: error_message(&err),
                        }
                    } else {
                        backend_error(&err)
                    }
                })?;
            Ok(PutParameterResponse {
                tier: from_sdk_tier(output.tier())?,
                version: output.version(),
            })
        })
    }

    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError> {
        let client = self.client.clone();
        let request = request.clone();
        block_on_with_runtime(self.runtime()?, async move {
            let output = client
                .get_parameter()
                .name(request.name.as_str())
                .with_decryption(request.with_decryption)
                .send()
                .await
                .map_err(|err| {
                    if err.as_service_error().is_some_and(|service| service.is_parameter_not_found()) {
                        StoreError::NotFound {
                            name: request.name.clone(),
                            message: error_message(&err),
                        }
                    } else {
                        backend_error(&err)
                    }
                })?;
            Ok(GetParameterResponse {
                parameter: output.parameter().map(from_sdk_parameter).transpose()?,
            })
        })
    }

    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        let client = self.client.clone();
        let names: Vec<String> = request.names.iter().map(ToString::to_string).collect();
        let with_decryption = request.with_decryption;
        block_on_with_runtime(self.runtime()?, async move {
            let output = client
                .get_parameters()
                .set_names(Some(names))
                .with_decryption(with_decryption)
                .send()
                .await
                .map_err(|err| backend_error(&err))?;
            Ok(GetParametersResponse {
                invalid_parameters: output.invalid_parameters().to_vec(),
                parameters: from_sdk_parameters(output.parameters())?,
            })
        })
    }

    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError> {
        let client = self.client.clone();
        let filters = request
            .parameter_filters
            .iter()
            .map(to_sdk_filter)
            .collect::<Result<Vec<_>, _>>()?;
        let max_results = request
            .max_results
            .map(|max| {
                i32::try_from(max)
                    .map_err(|_| StoreError::Invalid(format!("max results out of range: {max}")))
            })
            .transpose()?;
        let path = request.path.clone();
        let recursive = request.recursive;
        let with_decryption = request.with_decryption;
        block_on_with_runtime(self.runtime()?, async move {
            let output = client
                .get_parameters_by_path()
                .path(path)
                .recursive(recursive)
                .set_parameter_filters((!filters.is_empty()).then_some(filters))
                .set_max_results(max_results)
                .with_decryption(with_decryption)
                .send()
                .await
                .map_err(|err| backend_error(&err))?;
            Ok(GetParametersByPathResponse {
                next_token: output.next_token().map(str::to_string),
                parameters: from_sdk_parameters(output.parameters())?,
            })
        })
    }

    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError> {
        let client = self.client.clone();
        let name: ParameterName = request.name.clone();
        block_on_with_runtime(self.runtime()?, async move {
            client.delete_parameter().name(name.as_str()).send().await.map_err(|err| {
                if err.as_service_error().is_some_and(|service| service.is_parameter_not_found()) {
                    StoreError::NotFound {
                        name: name.clone(),
                        message: error_message(&err),
                    }
                } else {
                    backend_error(&err)
                }
            })?;
            Ok(DeleteParameterResponse {})
        })
    }
}
