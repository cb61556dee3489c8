// demos/static-credentials/src/main.rs
// ============================================================================
// Module: Parameter Store Static Credentials Demo
// Description: Create, read, batch-read, and delete with a static key triple.
// Purpose: Exercise the write and read calls with explicit credentials.
// Dependencies: pstore-config, pstore-core, pstore-ssm
// ============================================================================

//! ## Overview
//! Runs the put, get, get-many, and delete steps against
//! `AWS_PARAMETER_NAME`. The parameter is deleted at the end, so point it at
//! a disposable name.

use std::io::Write;
use std::process::ExitCode;

use pstore_config::CredentialSource;
use pstore_config::PstoreConfig;
use pstore_core::AuditedParameterStore;
use pstore_core::Step;
use pstore_core::Walkthrough;
use pstore_ssm::SsmParameterStore;

/// Steps run by this demo, in order.
const STEPS: [Step; 4] = [Step::Put, Step::Get, Step::GetMany, Step::Delete];

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

/// Loads settings, opens the audited store, and runs the steps.
fn run(out: &mut impl Write) -> Result<(), String> {
    let mut config = PstoreConfig::load(None).map_err(|err| err.to_string())?;
    config.aws.credentials = CredentialSource::Static;
    config.apply_env(|key| std::env::var(key).ok());
    config.validate().map_err(|err| err.to_string())?;
    let settings = config.walkthrough_settings().map_err(|err| err.to_string())?;
    let sink = config.audit.build_sink().map_err(|err| err.to_string())?;
    let inner = SsmParameterStore::new(&config.aws).map_err(|err| err.to_string())?;
    let store = AuditedParameterStore::new(inner, sink);
    Walkthrough::new(&store, out, settings).run(&STEPS).map_err(|err| err.to_string())
}
