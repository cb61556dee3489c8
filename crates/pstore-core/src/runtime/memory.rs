// crates/pstore-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Parameter Store
// Description: Process-local parameter store emulating the remote service.
// Purpose: Run walkthroughs and tests without network access.
// Dependencies: base64, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryParameterStore`] reproduces the observable contract of the
//! remote service: versions start at 1 and increase on every overwrite,
//! unknown names in multi-name reads are reported rather than failed, and
//! secure values are only returned in plaintext when decryption is
//! requested. The ciphertext it returns otherwise is an opaque stand-in, not
//! real encryption.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::DeleteParameterRequest;
use crate::core::DeleteParameterResponse;
use crate::core::GetParameterRequest;
use crate::core::GetParameterResponse;
use crate::core::GetParametersByPathRequest;
use crate::core::GetParametersByPathResponse;
use crate::core::GetParametersRequest;
use crate::core::GetParametersResponse;
use crate::core::Parameter;
use crate::core::ParameterName;
use crate::core::ParameterStringFilter;
use crate::core::ParameterTier;
use crate::core::ParameterType;
use crate::core::PutParameterRequest;
use crate::core::PutParameterResponse;
use crate::core::Timestamp;
use crate::core::naming::path_prefix;
use crate::core::naming::validate_parameter_name;
use crate::core::naming::validate_parameter_path;
use crate::core::requests::MAX_NAMES_PER_REQUEST;
use crate::core::requests::MAX_RESULTS_PER_PAGE;
use crate::core::requests::MAX_STANDARD_VALUE_CHARS;
use crate::interfaces::ParameterStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Region used in resource names when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Account used in resource names when none is configured.
pub const DEFAULT_ACCOUNT_ID: &str = "123456789012";
/// Key applied to secure values when the request names none.
pub const DEFAULT_KEY_ID: &str = "alias/aws/ssm";
/// Data type reported for every record.
const DATA_TYPE_TEXT: &str = "text";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Clock used to stamp last-modified metadata.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Stored record state.
#[derive(Debug, Clone)]
struct StoredParameter {
    /// Plaintext value.
    value: String,
    /// Type tag.
    parameter_type: ParameterType,
    /// Current version.
    version: i64,
    /// Last write time.
    last_modified: Timestamp,
    /// Optional description.
    description: Option<String>,
    /// Encryption key for secure values.
    key_id: Option<String>,
}

/// In-memory parameter store for tests and offline walkthroughs.
#[derive(Clone)]
pub struct InMemoryParameterStore {
    /// Records keyed by name, protected by a mutex.
    records: Arc<Mutex<BTreeMap<ParameterName, StoredParameter>>>,
    /// Region used in resource names.
    region: String,
    /// Account used in resource names.
    account_id: String,
    /// Clock for last-modified metadata.
    clock: Clock,
}

impl fmt::Debug for InMemoryParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryParameterStore")
            .field("region", &self.region)
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryParameterStore {
    /// Creates an empty store using the wall clock and default account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
            region: DEFAULT_REGION.to_string(),
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            clock: Arc::new(Timestamp::now_utc),
        }
    }

    /// Sets the region and account used in resource names.
    #[must_use]
    pub fn with_account(mut self, region: impl Into<String>, account_id: impl Into<String>) -> Self {
        self.region = region.into();
        self.account_id = account_id.into();
        self
    }

    /// Replaces the clock used for last-modified metadata.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    /// Returns true when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    /// Locks the record map.
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<ParameterName, StoredParameter>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Io("parameter store mutex poisoned".to_string()))
    }

    /// Builds the resource name for a record.
    fn arn(&self, name: &ParameterName) -> String {
        let separator = if name.is_hierarchical() { "" } else { "/" };
        format!("arn:aws:ssm:{}:{}:parameter{separator}{name}", self.region, self.account_id)
    }

    /// Converts stored state into a response record.
    fn to_parameter(
        &self,
        name: &ParameterName,
        stored: &StoredParameter,
        with_decryption: bool,
    ) -> Parameter {
        let value = if stored.parameter_type == ParameterType::SecureString && !with_decryption {
            ciphertext_stand_in(stored)
        } else {
            stored.value.clone()
        };
        Parameter {
            arn: Some(self.arn(name)),
            data_type: Some(DATA_TYPE_TEXT.to_string()),
            last_modified_date: Some(stored.last_modified),
            name: name.clone(),
            selector: None,
            source_result: None,
            parameter_type: stored.parameter_type,
            value,
            version: stored.version,
        }
    }
}

// ============================================================================
// SECTION: Parameter Store
// ============================================================================

impl ParameterStore for InMemoryParameterStore {
    fn put_parameter(
        &self,
        request: &PutParameterRequest,
    ) -> Result<PutParameterResponse, StoreError> {
        validate_parameter_name(request.name.as_str())?;
        validate_value(&request.value)?;
        let now = (self.clock)();
        let mut guard = self.lock()?;
        let version = if let Some(existing) = guard.get_mut(&request.name) {
            if !request.overwrite {
                return Err(StoreError::already_exists(request.name.clone()));
            }
            let parameter_type = request.parameter_type.unwrap_or(existing.parameter_type);
            let inherited_key = if parameter_type == ParameterType::SecureString {
                existing.key_id.as_deref()
            } else {
                None
            };
            let key_id =
                resolve_key_id(parameter_type, request.key_id.as_deref().or(inherited_key))?;
            existing.value.clone_from(&request.value);
            existing.parameter_type = parameter_type;
            existing.version = existing.version.saturating_add(1);
            existing.last_modified = now;
            existing.key_id = key_id;
            if request.description.is_some() {
                existing.description.clone_from(&request.description);
            }
            existing.version
        } else {
            let Some(parameter_type) = request.parameter_type else {
                return Err(StoreError::Invalid(
                    "parameter type is required when creating a parameter".to_string(),
                ));
            };
            let key_id = resolve_key_id(parameter_type, request.key_id.as_deref())?;
            guard.insert(
                request.name.clone(),
                StoredParameter {
                    value: request.value.clone(),
                    parameter_type,
                    version: 1,
                    last_modified: now,
                    description: request.description.clone(),
                    key_id,
                },
            );
            1
        };
        drop(guard);
        Ok(PutParameterResponse {
            tier: ParameterTier::Standard,
            version,
        })
    }

    fn get_parameter(
        &self,
        request: &GetParameterRequest,
    ) -> Result<GetParameterResponse, StoreError> {
        validate_parameter_name(request.name.as_str())?;
        let guard = self.lock()?;
        let stored =
            guard.get(&request.name).ok_or_else(|| StoreError::not_found(request.name.clone()))?;
        let parameter = self.to_parameter(&request.name, stored, request.with_decryption);
        drop(guard);
        Ok(GetParameterResponse {
            parameter: Some(parameter),
        })
    }

    fn get_parameters(
        &self,
        request: &GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        if request.names.is_empty() {
            return Err(StoreError::Invalid("at least one parameter name is required".to_string()));
        }
        if request.names.len() > MAX_NAMES_PER_REQUEST {
            return Err(StoreError::Invalid(format!(
                "at most {MAX_NAMES_PER_REQUEST} names per request ({})",
                request.names.len()
            )));
        }
        let guard = self.lock()?;
        let mut seen = BTreeSet::new();
        let mut parameters = Vec::new();
        let mut invalid_parameters = Vec::new();
        for name in &request.names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let stored = validate_parameter_name(name.as_str()).ok().and_then(|()| guard.get(name));
            match stored {
                Some(stored) => {
                    parameters.push(self.to_parameter(name, stored, request.with_decryption));
                }
                None => invalid_parameters.push(name.to_string()),
            }
        }
        drop(guard);
        Ok(GetParametersResponse {
            invalid_parameters,
            parameters,
        })
    }

    fn get_parameters_by_path(
        &self,
        request: &GetParametersByPathRequest,
    ) -> Result<GetParametersByPathResponse, StoreError> {
        validate_parameter_path(&request.path)?;
        let max_results = request.max_results.unwrap_or(MAX_RESULTS_PER_PAGE);
        if max_results == 0 || max_results > MAX_RESULTS_PER_PAGE {
            return Err(StoreError::Invalid(format!(
                "max results must be between 1 and {MAX_RESULTS_PER_PAGE} ({max_results})"
            )));
        }
        let page_size = usize::try_from(max_results).unwrap_or(usize::MAX);
        let filters = request
            .parameter_filters
            .iter()
            .map(PathFilter::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let prefix = path_prefix(&request.path);

        let guard = self.lock()?;
        let mut matches = guard.iter().filter(|(name, stored)| {
            let Some(remainder) = name.as_str().strip_prefix(prefix.as_str()) else {
                return false;
            };
            if !request.recursive && remainder.contains('/') {
                return false;
            }
            filters.iter().all(|filter| filter.matches(stored))
        });
        let parameters: Vec<Parameter> = matches
            .by_ref()
            .take(page_size)
            .map(|(name, stored)| self.to_parameter(name, stored, request.with_decryption))
            .collect();
        let has_more = matches.next().is_some();
        drop(guard);

        let next_token = if has_more {
            parameters.last().map(|last| BASE64.encode(last.name.as_str()))
        } else {
            None
        };
        Ok(GetParametersByPathResponse {
            next_token,
            parameters,
        })
    }

    fn delete_parameter(
        &self,
        request: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse, StoreError> {
        validate_parameter_name(request.name.as_str())?;
        self.lock()?
            .remove(&request.name)
            .map(|_| DeleteParameterResponse {})
            .ok_or_else(|| StoreError::not_found(request.name.clone()))
    }
}

// ============================================================================
// SECTION: Path Filters
// ============================================================================

/// Compiled filter for path-prefix reads.
enum PathFilter {
    /// Match records whose type is one of the listed types.
    Type(Vec<ParameterType>),
    /// Match secure records encrypted with one of the listed keys.
    KeyId(Vec<String>),
}

impl PathFilter {
    /// Compiles a request filter, rejecting unsupported keys and options.
    fn compile(filter: &ParameterStringFilter) -> Result<Self, StoreError> {
        match filter.option.as_deref() {
            None | Some("Equals") => {}
            Some(other) => {
                return Err(StoreError::Invalid(format!(
                    "unsupported filter option for {}: {other}",
                    filter.key
                )));
            }
        }
        if filter.values.is_empty() {
            return Err(StoreError::Invalid(format!("filter {} requires values", filter.key)));
        }
        match filter.key.as_str() {
            "Type" => filter
                .values
                .iter()
                .map(|value| {
                    value.parse::<ParameterType>().map_err(|err| StoreError::Invalid(err.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Type),
            "KeyId" => Ok(Self::KeyId(filter.values.clone())),
            other => Err(StoreError::Invalid(format!("unsupported filter key: {other}"))),
        }
    }

    /// Returns true when the stored record passes the filter.
    fn matches(&self, stored: &StoredParameter) -> bool {
        match self {
            Self::Type(types) => types.contains(&stored.parameter_type),
            Self::KeyId(keys) => {
                stored.key_id.as_ref().is_some_and(|key_id| keys.iter().any(|key| key == key_id))
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects empty or oversized values.
fn validate_value(value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::Invalid("parameter value must be non-empty".to_string()));
    }
    let length = value.chars().count();
    if length > MAX_STANDARD_VALUE_CHARS {
        return Err(StoreError::Invalid(format!(
            "parameter value exceeds {MAX_STANDARD_VALUE_CHARS} characters ({length})"
        )));
    }
    Ok(())
}

/// Resolves the encryption key for a write.
fn resolve_key_id(
    parameter_type: ParameterType,
    requested: Option<&str>,
) -> Result<Option<String>, StoreError> {
    match (parameter_type, requested) {
        (ParameterType::SecureString, key) => {
            Ok(Some(key.unwrap_or(DEFAULT_KEY_ID).to_string()))
        }
        (_, Some(_)) => Err(StoreError::Invalid(
            "key id is only valid for SecureString parameters".to_string(),
        )),
        (_, None) => Ok(None),
    }
}

/// Opaque stand-in returned for secure values read without decryption.
fn ciphertext_stand_in(stored: &StoredParameter) -> String {
    let key_id = stored.key_id.as_deref().unwrap_or(DEFAULT_KEY_ID);
    BASE64.encode(format!("{key_id}:{}:{}", stored.version, stored.value))
}
