mod repl;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cumle_grader::verify;
use cumle_protocol::{Assignment, Bundle};
use cumle_session::{parse_document, ExerciseSet, Session, SessionConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::repl::Repl;

#[derive(Parser)]
#[command(author, version, about = "Sentence-diagramming exercises on the terminal")]
struct Cli {
    /// TOML file overriding messages and placeholder texts
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practise interactively
    Play {
        /// Exercise set (JSON, or a .rkyv bundle)
        #[arg(short, long, value_name = "FILE", env = "CUMLE_SENTENCES")]
        sentences: PathBuf,
    },
    /// Grade one attempt ({"Özne": ["..."], ...}) against a sentence
    Check {
        #[arg(short, long, value_name = "FILE", env = "CUMLE_SENTENCES")]
        sentences: PathBuf,

        /// Position of the sentence in the set
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        #[arg(short, long, value_name = "FILE")]
        attempt: PathBuf,
    },
    /// Report answer keys that do not match their sentences
    Validate {
        #[arg(short, long, value_name = "FILE", env = "CUMLE_SENTENCES")]
        sentences: PathBuf,
    },
    /// Compile a JSON exercise set to a binary bundle
    Bundle {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn is_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rkyv")
}

/// Strict read for the batch commands: any problem is an error.
fn read_items(path: &Path) -> anyhow::Result<Vec<cumle_protocol::SentenceItem>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if is_bundle(path) {
        return Ok(Bundle::from_bytes(&bytes)?.into_items());
    }
    parse_document(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Lenient read for play: a missing or broken file gives the placeholder.
fn open_set(path: &Path, config: &SessionConfig) -> ExerciseSet {
    let placeholders = config.placeholders.clone();
    match fs::read(path) {
        Ok(bytes) if is_bundle(path) => ExerciseSet::load_bundle(&bytes, placeholders),
        Ok(bytes) => ExerciseSet::load(&String::from_utf8_lossy(&bytes), placeholders),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read exercise set");
            ExerciseSet::load_failed(placeholders)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play { sentences } => {
            let session = Session::new(open_set(&sentences, &config), config);
            let stdin = io::stdin();
            Repl::new(session, stdin.lock(), io::stdout()).run()?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { sentences, index, attempt } => {
            let items = read_items(&sentences)?;
            let Some(item) = items.get(index) else {
                bail!("{} has {} sentences, no #{}", sentences.display(), items.len(), index);
            };
            let input = fs::read_to_string(&attempt)
                .with_context(|| format!("reading {}", attempt.display()))?;
            let assignment: Assignment = serde_json::from_str(&input)
                .with_context(|| format!("parsing {}", attempt.display()))?;

            let result = verify(&assignment, item);
            println!("{}", config.messages.for_verdict(result.verdict));
            Ok(if result.ok { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }

        Commands::Validate { sentences } => {
            let items = read_items(&sentences)?;
            let set = ExerciseSet::from_items(items, config.placeholders.clone());
            let issues = set.validate();
            for issue in &issues {
                println!("{}", issue);
            }
            info!(sentences = set.len(), issues = issues.len(), "validation finished");
            Ok(if issues.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Commands::Bundle { input, output } => {
            info!(input = %input.display(), "reading exercise set");
            let items = read_items(&input)?;

            let bytes = Bundle::from_items(&items).to_bytes()?;
            fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;

            println!("Bundled {} sentences into {} ({} bytes)", items.len(), output.display(), bytes.len());
            Ok(ExitCode::SUCCESS)
        }
    }
}
