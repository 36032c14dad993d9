//! pagesmith command-line interface
//!
//! Thin orchestration over the library crates: discover configuration,
//! wire up the generation backend and record store, and map errors to
//! exit codes. All output for humans happens here; the library crates
//! only log.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use std::io::Write;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use pagesmith_codegen::{AppId, GenerationFacade, GenerationType, PersistOutcome};
use pagesmith_config::Config;
use pagesmith_deploy::{AppRecord, AppRecordStore, DeploymentPromoter, JsonRecordStore};
use pagesmith_utils::error::{DeployError, PagesmithError};
use pagesmith_utils::exit_codes::{ExitCode, to_exit_code};
use pagesmith_utils::logging;

/// How long to wait for the detached post-stream save before giving up on
/// reporting its outcome.
const PERSIST_WAIT: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "pagesmith", version, about = "Generate and deploy web apps from prompts")]
struct Cli {
    /// Path to a config file (overrides discovery)
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a web application from a prompt and save it
    Generate {
        /// Application id; isolates output directories per application
        #[arg(long)]
        app_id: u64,

        /// Output shape tag: "html" or "multi_file"
        #[arg(long = "type", value_name = "TAG")]
        gen_type: String,

        /// Relay generation output to stdout as it is produced
        #[arg(long)]
        stream: bool,

        /// Description of the application to build
        prompt: String,
    },
    /// Promote a generated application and print its public URL
    Deploy {
        /// Application id to deploy
        #[arg(long)]
        app_id: u64,
    },
}

/// CLI entrypoint: parses arguments, runs the command, reports errors.
///
/// # Errors
///
/// Returns the exit code `main` should use; all human-readable error
/// output has already been written to stderr.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    // A second init (e.g. under test harnesses) is harmless.
    let _ = logging::init_tracing(cli.verbose);

    match execute(cli) {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("error: {err}");
            Err(to_exit_code(&err))
        }
    }
}

fn execute(cli: Cli) -> Result<(), PagesmithError> {
    let config = match &cli.config {
        Some(path) => Config::load(path.as_std_path())?,
        None => Config::discover()?,
    };

    match cli.command {
        Command::Generate {
            app_id,
            gen_type,
            stream,
            prompt,
        } => generate(&config, AppId::new(app_id), &gen_type, stream, &prompt),
        Command::Deploy { app_id } => deploy(&config, AppId::new(app_id)),
    }
}

fn generate(
    config: &Config,
    app_id: AppId,
    tag: &str,
    stream: bool,
    prompt: &str,
) -> Result<(), PagesmithError> {
    // Fail fast on unknown tags, before the backend is even constructed.
    let gen_type = GenerationType::resolve(tag)?;

    let backend = pagesmith_generator::from_config(&config.generator)?;
    let store = JsonRecordStore::new(config.paths.records_file.clone());
    register_app(&store, app_id, gen_type)?;

    let facade = GenerationFacade::new(Arc::from(backend), config.paths.output_root.clone());
    let runtime = tokio::runtime::Runtime::new()?;

    if stream {
        run_streaming(facade, app_id, gen_type, prompt, &runtime)
    } else {
        let location = runtime.block_on(facade.generate_and_save(prompt, gen_type, app_id))?;
        println!("{location}");
        Ok(())
    }
}

/// Relay the live stream to stdout, then report where the detached save
/// landed.
///
/// The stream itself is never failed retroactively: a persistence failure
/// after full delivery is reported on stderr as a warning, observed
/// through the facade's persist hook.
fn run_streaming(
    facade: GenerationFacade,
    app_id: AppId,
    gen_type: GenerationType,
    prompt: &str,
    runtime: &tokio::runtime::Runtime,
) -> Result<(), PagesmithError> {
    let (outcome_tx, outcome_rx) = mpsc::channel();
    let facade = facade.with_persist_hook(Arc::new(move |outcome| {
        let rendered = match outcome {
            PersistOutcome::Saved(location) => Ok(location.to_string()),
            PersistOutcome::Failed(err) => Err(err.to_string()),
        };
        let _ = outcome_tx.send(rendered);
    }));

    let upstream_error = runtime.block_on(async {
        let mut fragments = facade
            .generate_and_save_stream(prompt, gen_type, app_id)
            .await?;

        while let Some(item) = fragments.next().await {
            match item {
                Ok(fragment) => {
                    print!("{fragment}");
                    let _ = std::io::stdout().flush();
                }
                Err(err) => {
                    println!();
                    return Ok::<_, PagesmithError>(Some(err));
                }
            }
        }
        println!();
        Ok(None)
    })?;

    if let Some(err) = upstream_error {
        // The upstream died mid-stream; nothing was persisted.
        return Err(PagesmithError::Generator(err));
    }

    // The relay is complete; wait for the detached save so the process
    // does not exit underneath it.
    match outcome_rx.recv_timeout(PERSIST_WAIT) {
        Ok(Ok(location)) => {
            eprintln!("saved: {location}");
            Ok(())
        }
        Ok(Err(reason)) => {
            // Delivered-but-not-persisted is not a stream failure; surface
            // it out of band and keep the exit code successful.
            eprintln!("warning: generated output was not persisted: {reason}");
            Ok(())
        }
        Err(_) => {
            eprintln!("warning: timed out waiting for the generated output to be persisted");
            Ok(())
        }
    }
}

fn deploy(config: &Config, app_id: AppId) -> Result<(), PagesmithError> {
    let store = Arc::new(JsonRecordStore::new(config.paths.records_file.clone()));
    let promoter = DeploymentPromoter::new(
        store,
        config.paths.output_root.clone(),
        config.paths.deploy_root.clone(),
        config.deploy.host.clone(),
    );
    let url = promoter.promote(app_id)?;
    println!("{url}");
    Ok(())
}

/// Ensure an application record exists for this generation request,
/// preserving any deployment fields already minted for the app.
fn register_app(
    store: &JsonRecordStore,
    app_id: AppId,
    gen_type: GenerationType,
) -> Result<(), PagesmithError> {
    let record = match store.fetch(app_id) {
        Ok(mut existing) => {
            existing.gen_type = gen_type;
            existing
        }
        Err(DeployError::AppNotFound { .. }) => AppRecord::new(app_id, gen_type),
        Err(err) => return Err(err.into()),
    };
    store.upsert(record).map_err(Into::into)
}
