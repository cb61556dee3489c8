// crates/pstore-cli/src/main.rs
// ============================================================================
// Module: Parameter Store CLI Entry Point
// Description: Command dispatcher for parameter-store operations.
// Purpose: Run single operations or the full walkthrough from the shell.
// Dependencies: clap, pstore-config, pstore-core, pstore-ssm, thiserror
// ============================================================================

//! ## Overview
//! `pstore` resolves configuration (file, then environment, then flags),
//! opens the selected backend, issues the requested call, and prints the
//! pretty-printed response. Every failure is printed to stdout and turns
//! into a non-zero exit status; nothing is retried.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use pstore_config::CredentialSource;
use pstore_config::NameRequirement;
use pstore_config::PstoreConfig;
use pstore_core::AuditedParameterStore;
use pstore_core::DeleteParameterRequest;
use pstore_core::GetParametersByPathRequest;
use pstore_core::GetParametersRequest;
use pstore_core::InMemoryParameterStore;
use pstore_core::ParameterName;
use pstore_core::ParameterStore;
use pstore_core::ParameterStringFilter;
use pstore_core::ParameterType;
use pstore_core::PutParameterRequest;
use pstore_core::Step;
use pstore_core::Walkthrough;
use pstore_core::prettify;
use pstore_core::runtime::memory::DEFAULT_ACCOUNT_ID;
use pstore_core::runtime::walkthrough::INVALID_PARAMETER_NAME;
use pstore_ssm::SsmParameterStore;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "pstore", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Configuration file (overrides `PSTORE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Credential source (overrides the config file).
    #[arg(long, value_enum, value_name = "SOURCE", global = true)]
    credentials: Option<CredentialsArg>,
    /// Region (overrides `AWS_REGION`).
    #[arg(long, value_name = "REGION", global = true)]
    region: Option<String>,
    /// Service endpoint (overrides `AWS_ENDPOINT_URL`).
    #[arg(long, value_name = "URL", global = true)]
    endpoint_url: Option<String>,
    /// Store backend; `memory` runs offline against a process-local store.
    #[arg(long, value_enum, default_value_t = BackendArg::Ssm, global = true)]
    backend: BackendArg,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Credential source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CredentialsArg {
    /// Access key, secret, and session token from the environment.
    Static,
    /// The SDK's default provider chain.
    DefaultChain,
}

impl From<CredentialsArg> for CredentialSource {
    fn from(value: CredentialsArg) -> Self {
        match value {
            CredentialsArg::Static => Self::Static,
            CredentialsArg::DefaultChain => Self::DefaultChain,
        }
    }
}

/// Store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// AWS Systems Manager Parameter Store.
    Ssm,
    /// Process-local in-memory store.
    Memory,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or update a parameter.
    Put(PutCommand),
    /// Read one parameter.
    Get(GetCommand),
    /// Read several parameters by name.
    GetMany(GetManyCommand),
    /// Read one page of parameters under a path.
    GetByPath(GetByPathCommand),
    /// Delete a parameter.
    Delete(DeleteCommand),
    /// Run the example procedures in order.
    Walkthrough(WalkthroughCommand),
}

/// Arguments for `put`.
#[derive(Args, Debug)]
struct PutCommand {
    /// Parameter name (overrides `AWS_PARAMETER_NAME`).
    #[arg(long)]
    name: Option<String>,
    /// Value to write (defaults to the configured demo value).
    #[arg(long)]
    value: Option<String>,
    /// Type tag: `String`, `StringList`, or `SecureString`.
    #[arg(long = "type", value_name = "TYPE")]
    parameter_type: Option<ParameterType>,
    /// Replace an existing parameter.
    #[arg(long, action = ArgAction::SetTrue)]
    overwrite: bool,
    /// Optional description.
    #[arg(long)]
    description: Option<String>,
    /// Encryption key for `SecureString` values.
    #[arg(long)]
    key_id: Option<String>,
}

/// Arguments for `get`.
#[derive(Args, Debug)]
struct GetCommand {
    /// Parameter name (overrides `AWS_PARAMETER_NAME`).
    #[arg(long)]
    name: Option<String>,
}

/// Arguments for `get-many`.
#[derive(Args, Debug)]
struct GetManyCommand {
    /// Parameter names; defaults to the configured name and an unknown name.
    names: Vec<String>,
    /// Return secure values as ciphertext.
    #[arg(long, action = ArgAction::SetTrue)]
    no_decrypt: bool,
}

/// Arguments for `get-by-path`.
#[derive(Args, Debug)]
struct GetByPathCommand {
    /// Path prefix (defaults to the configured path).
    #[arg(long)]
    path: Option<String>,
    /// Read only one level below the path.
    #[arg(long, action = ArgAction::SetTrue)]
    one_level: bool,
    /// Restrict results to one type.
    #[arg(long, value_name = "TYPE", conflicts_with = "all_types")]
    type_filter: Option<ParameterType>,
    /// Drop the configured type filter.
    #[arg(long, action = ArgAction::SetTrue)]
    all_types: bool,
    /// Page size, 1 to 10.
    #[arg(long)]
    max_results: Option<u32>,
    /// Return secure values as ciphertext.
    #[arg(long, action = ArgAction::SetTrue)]
    no_decrypt: bool,
}

/// Arguments for `delete`.
#[derive(Args, Debug)]
struct DeleteCommand {
    /// Parameter name (overrides `AWS_PARAMETER_NAME`).
    #[arg(long)]
    name: Option<String>,
}

/// Arguments for `walkthrough`.
#[derive(Args, Debug)]
struct WalkthroughCommand {
    /// Parameter name (overrides `AWS_PARAMETER_NAME`).
    #[arg(long)]
    name: Option<String>,
    /// Steps to run, comma separated: put, get, get-many, get-by-path, delete.
    #[arg(long = "steps", value_delimiter = ',', value_name = "STEP")]
    steps: Vec<Step>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying the printed message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match execute(cli, &|key| std::env::var(key).ok(), &mut stdout) {
        Ok(code) => code,
        Err(err) => emit_error(&mut stdout, &err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn execute<W: Write>(
    cli: Cli,
    env: &dyn Fn(&str) -> Option<String>,
    out: &mut W,
) -> CliResult<ExitCode> {
    if cli.show_version {
        write_line(out, &format!("pstore {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        let help = Cli::command().render_help().to_string();
        write_line(out, &help)?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut config = PstoreConfig::load(cli.config.as_deref()).map_err(to_cli_error)?;
    config.apply_env(env);
    if let Some(credentials) = cli.credentials {
        config.aws.credentials = credentials.into();
    }
    if cli.region.is_some() {
        config.aws.region = cli.region;
    }
    if cli.endpoint_url.is_some() {
        config.aws.endpoint_url = cli.endpoint_url;
    }
    apply_command_overrides(&command, &mut config);
    config.validate_for(name_requirement(&command)).map_err(to_cli_error)?;

    let inner = open_store(cli.backend, &config)?;
    let sink = config.audit.build_sink().map_err(to_cli_error)?;
    let store = AuditedParameterStore::new(inner, sink);

    match command {
        Commands::Put(command) => command_put(&store, &config, command, out),
        Commands::Get(_) => command_get(&store, &config, out),
        Commands::GetMany(command) => command_get_many(&store, &config, command, out),
        Commands::GetByPath(command) => command_get_by_path(&store, &config, command, out),
        Commands::Delete(_) => command_delete(&store, &config, out),
        Commands::Walkthrough(command) => command_walkthrough(&store, &config, &command.steps, out),
    }
}

/// Copies subcommand overrides into the configuration before validation.
fn apply_command_overrides(command: &Commands, config: &mut PstoreConfig) {
    let name = match command {
        Commands::Put(command) => {
            if let Some(value) = &command.value {
                config.parameter.value.clone_from(value);
            }
            if let Some(parameter_type) = command.parameter_type {
                config.parameter.parameter_type = parameter_type;
            }
            command.name.as_ref()
        }
        Commands::Get(command) => command.name.as_ref(),
        Commands::Delete(command) => command.name.as_ref(),
        Commands::Walkthrough(command) => command.name.as_ref(),
        Commands::GetMany(_) => None,
        Commands::GetByPath(command) => {
            if let Some(path) = &command.path {
                config.parameter.path.clone_from(path);
            }
            if command.one_level {
                config.parameter.recursive = false;
            }
            if command.all_types {
                config.parameter.type_filter = None;
            } else if command.type_filter.is_some() {
                config.parameter.type_filter = command.type_filter;
            }
            if let Some(max_results) = command.max_results {
                config.parameter.max_results = max_results;
            }
            None
        }
    };
    if let Some(name) = name {
        config.parameter.name = Some(name.clone());
    }
}

/// Reports whether `command` reads the configured parameter name.
fn name_requirement(command: &Commands) -> NameRequirement {
    match command {
        Commands::GetByPath(_) => NameRequirement::Optional,
        Commands::GetMany(command) if !command.names.is_empty() => NameRequirement::Optional,
        _ => NameRequirement::Required,
    }
}

/// Opens the selected backend.
fn open_store(backend: BackendArg, config: &PstoreConfig) -> CliResult<Box<dyn ParameterStore>> {
    match backend {
        BackendArg::Ssm => {
            let store = SsmParameterStore::new(&config.aws).map_err(to_cli_error)?;
            Ok(Box::new(store))
        }
        BackendArg::Memory => {
            let mut store = InMemoryParameterStore::new();
            if let Some(region) = &config.aws.region {
                store = store.with_account(region.clone(), DEFAULT_ACCOUNT_ID);
            }
            Ok(Box::new(store))
        }
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Handles `put`.
fn command_put<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    command: PutCommand,
    out: &mut W,
) -> CliResult<ExitCode> {
    let settings = config.walkthrough_settings().map_err(to_cli_error)?;
    let response = store
        .put_parameter(&PutParameterRequest {
            name: settings.name,
            value: settings.value,
            parameter_type: Some(settings.parameter_type),
            overwrite: command.overwrite,
            description: command.description,
            key_id: command.key_id,
        })
        .map_err(to_cli_error)?;
    write_rendered(out, &prettify(&response))
}

/// Handles `get` by printing the unlabeled single read.
fn command_get<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    out: &mut W,
) -> CliResult<ExitCode> {
    let settings = config.walkthrough_settings().map_err(to_cli_error)?;
    let mut walkthrough = Walkthrough::new(store, &mut *out, settings);
    walkthrough.print_parameter().map_err(to_cli_error)?;
    Ok(ExitCode::SUCCESS)
}

/// Handles `get-many`.
fn command_get_many<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    command: GetManyCommand,
    out: &mut W,
) -> CliResult<ExitCode> {
    let names = if command.names.is_empty() {
        let settings = config.walkthrough_settings().map_err(to_cli_error)?;
        vec![settings.name, ParameterName::from(INVALID_PARAMETER_NAME)]
    } else {
        command.names.into_iter().map(ParameterName::from).collect()
    };
    let response = store
        .get_parameters(&GetParametersRequest {
            names,
            with_decryption: !command.no_decrypt,
        })
        .map_err(to_cli_error)?;
    write_rendered(out, &prettify(&response))
}

/// Handles `get-by-path`.
fn command_get_by_path<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    command: GetByPathCommand,
    out: &mut W,
) -> CliResult<ExitCode> {
    let settings = &config.parameter;
    let response = store
        .get_parameters_by_path(&GetParametersByPathRequest {
            path: settings.path.clone(),
            recursive: settings.recursive,
            parameter_filters: settings
                .type_filter
                .map(ParameterStringFilter::type_equals)
                .into_iter()
                .collect(),
            max_results: Some(settings.max_results),
            with_decryption: !command.no_decrypt,
        })
        .map_err(to_cli_error)?;
    write_rendered(out, &prettify(&response))
}

/// Handles `delete`.
fn command_delete<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    out: &mut W,
) -> CliResult<ExitCode> {
    let settings = config.walkthrough_settings().map_err(to_cli_error)?;
    let response = store
        .delete_parameter(&DeleteParameterRequest {
            name: settings.name,
        })
        .map_err(to_cli_error)?;
    write_rendered(out, &prettify(&response))
}

/// Handles `walkthrough`; an empty step list runs every step.
fn command_walkthrough<S: ParameterStore, W: Write>(
    store: &S,
    config: &PstoreConfig,
    steps: &[Step],
    out: &mut W,
) -> CliResult<ExitCode> {
    let settings = config.walkthrough_settings().map_err(to_cli_error)?;
    let steps = if steps.is_empty() { &Step::ALL[..] } else { steps };
    let mut walkthrough = Walkthrough::new(store, &mut *out, settings);
    walkthrough.run(steps).map_err(to_cli_error)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Converts any displayable error into a CLI error.
fn to_cli_error(err: impl std::fmt::Display) -> CliError {
    CliError::new(err.to_string())
}

/// Writes a pretty-printed response.
fn write_rendered<W: Write>(out: &mut W, rendered: &str) -> CliResult<ExitCode> {
    write_line(out, rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Writes a line to the output stream.
fn write_line<W: Write>(out: &mut W, message: &str) -> CliResult<()> {
    writeln!(out, "{message}")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Prints an error message to stdout and returns a failure exit code.
fn emit_error<W: Write>(out: &mut W, message: &str) -> ExitCode {
    let _ = writeln!(out, "{message}");
    ExitCode::FAILURE
}
