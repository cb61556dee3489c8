// demos/get-parameter/src/main.rs
// ============================================================================
// Module: Parameter Store Get Parameter Demo
// Description: Single decrypting read using static credentials.
// Purpose: Show the smallest useful call against the remote service.
// Dependencies: pstore-config, pstore-core, pstore-ssm
// ============================================================================

//! ## Overview
//! Reads `AWS_PARAMETER_NAME` once with decryption and prints the response
//! without a label. Credentials come from `AWS_ACCESS_KEY_ID`,
//! `AWS_SECRET_ACCESS_KEY`, and the optional `AWS_SESSION_TOKEN`.

use std::io::Write;
use std::process::ExitCode;

use pstore_config::CredentialSource;
use pstore_config::PstoreConfig;
use pstore_core::Walkthrough;
use pstore_ssm::SsmParameterStore;

/// Runs the demo and maps failures to a printed message.
fn main() -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match run(&mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(stdout, "{message}");
            ExitCode::FAILURE
        }
    }
}

/// Loads settings, opens the store, and prints the record.
fn run(out: &mut impl Write) -> Result<(), String> {
    let mut config = PstoreConfig::load(None).map_err(|err| err.to_string())?;
    config.aws.credentials = CredentialSource::Static;
    config.apply_env(|key| std::env::var(key).ok());
    config.validate().map_err(|err| err.to_string())?;
    let settings = config.walkthrough_settings().map_err(|err| err.to_string())?;
    let store = SsmParameterStore::new(&config.aws).map_err(|err| err.to_string())?;
    Walkthrough::new(&store, out, settings).print_parameter().map_err(|err| err.to_string())?;
    Ok(())
}
