// crates/pstore-ssm/src/convert.rs
// ============================================================================
// Module: SSM Type Conversion
// Description: Mapping between SDK shapes and parameter-store core types.
// Purpose: Keep SDK types out of the core interface.
// Dependencies: aws-sdk-ssm, pstore-core
// ============================================================================

//! ## Overview
//! Enumerations cross the boundary through their service wire names, so an
//! unrecognized value from a newer service version becomes a backend error
//! instead of being silently coerced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_sdk_ssm::primitives::DateTime;
use aws_sdk_ssm::types::Parameter as SdkParameter;
use aws_sdk_ssm::types::ParameterStringFilter as SdkParameterStringFilter;
use aws_sdk_ssm::types::ParameterTier as SdkParameterTier;
use aws_sdk_ssm::types::ParameterType as SdkParameterType;
use pstore_core::Parameter;
use pstore_core::ParameterName;
use pstore_core::ParameterStringFilter;
use pstore_core::ParameterTier;
use pstore_core::ParameterType;
use pstore_core::StoreError;
use pstore_core::Timestamp;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Converts a core type tag into the SDK enumeration.
#[must_use]
pub fn to_sdk_type(parameter_type: ParameterType) -> SdkParameterType {
    SdkParameterType::from(parameter_type.as_str())
}

/// Converts an SDK type tag into the core enumeration.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] for type names the core does not know.
pub fn from_sdk_type(parameter_type: &SdkParameterType) -> Result<ParameterType, StoreError> {
    parameter_type.as_str().parse().map_err(|err| StoreError::Backend(format!("{err}")))
}

/// Converts an optional SDK tier, defaulting to the standard tier.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] for tier names the core does not know.
pub fn from_sdk_tier(tier: Option<&SdkParameterTier>) -> Result<ParameterTier, StoreError> {
    tier.map_or(Ok(ParameterTier::Standard), |tier| {
        tier.as_str().parse().map_err(|err| StoreError::Backend(format!("{err}")))
    })
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Converts an SDK timestamp.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when the instant is out of range.
pub fn from_sdk_datetime(value: &DateTime) -> Result<Timestamp, StoreError> {
    Timestamp::from_unix_nanos(value.as_nanos())
        .map_err(|err| StoreError::Backend(format!("invalid last-modified date: {err}")))
}

/// Converts an SDK record into the core record.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when the record has no name or type, or
/// carries values the core cannot represent.
pub fn from_sdk_parameter(parameter: &SdkParameter) -> Result<Parameter, StoreError> {
    let name = parameter
        .name()
        .ok_or_else(|| StoreError::Backend("service returned a parameter without a name".to_string()))?;
    let parameter_type = parameter
        .r#type()
        .ok_or_else(|| StoreError::Backend(format!("service returned {name} without a type")))
        .and_then(from_sdk_type)?;
    let last_modified_date = parameter.last_modified_date().map(from_sdk_datetime).transpose()?;
    Ok(Parameter {
        arn: parameter.arn().map(str::to_string),
        data_type: parameter.data_type().map(str::to_string),
        last_modified_date,
        name: ParameterName::new(name),
        selector: parameter.selector().map(str::to_string),
        source_result: parameter.source_result().map(str::to_string),
        parameter_type,
        value: parameter.value().unwrap_or_default().to_string(),
        version: parameter.version(),
    })
}

/// Converts a slice of SDK records.
///
/// # Errors
///
/// Returns the first conversion failure.
pub fn from_sdk_parameters(parameters: &[SdkParameter]) -> Result<Vec<Parameter>, StoreError> {
    parameters.iter().map(from_sdk_parameter).collect()
}

/// Converts a core path filter into the SDK shape.
///
/// # Errors
///
/// Returns [`StoreError::Invalid`] when the SDK rejects the filter.
pub fn to_sdk_filter(filter: &ParameterStringFilter) -> Result<SdkParameterStringFilter, StoreError> {
    SdkParameterStringFilter::builder()
        .key(filter.key.clone())
        .set_option(filter.option.clone())
        .set_values(Some(filter.values.clone()))
        .build()
        .map_err(|err| StoreError::Invalid(format!("invalid parameter filter: {err}")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
