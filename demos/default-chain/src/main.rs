// demos/default-chain/src/main.rs
// ============================================================================
// Module: Parameter Store Default Chain Demo
// Description: Full walkthrough using the SDK's default credential chain.
// Purpose: Run every example call with ambient credentials.
// Dependencies: pstore-config, pstore-core, pstore-ssm
// ============================================================================

//! ## Overview
//! Credentials are resolved by the SDK (environment, shared profile, or
//! instance role). The region comes from `AWS_REGION` when set.

use std::io::Write;
use std::process::ExitCode;

use pstore_config::CredentialSource;
use pstore_config::PstoreConfig;
use pstore_core::Step;
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

/// Loads settings, opens the store, and runs every step.
fn run(out: &mut impl Write) -> Result<(), String> {
    let mut config = PstoreConfig::load(None).map_err(|err| err.to_string())?;
    config.apply_env(|key| std::env::var(key).ok());
    config.aws.credentials = CredentialSource::DefaultChain;
    config.validate().map_err(|err| err.to_string())?;
    let settings = config.walkthrough_settings().map_err(|err| err.to_string())?;
    let store = SsmParameterStore::new(&config.aws).map_err(|err| err.to_string())?;
    Walkthrough::new(&store, out, settings).run(&Step::ALL).map_err(|err| err.to_string())
}
