mod input;
mod output;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use input::InputSource;
use output::OutputFormat;
use sentence_tfidf::{DEFAULT_MAX_FEATURES, Encoder, VocabularyModel, VocabularyParams};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "sentence-tfidf")]
#[command(about = "Fit TF-IDF vocabularies and encode sentences as vectors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Learn a vocabulary and idf weights from a corpus and save the model
    Fit {
        /// Corpus file, one sentence per line
        #[arg(value_name = "PATH")]
        corpus: PathBuf,

        /// Treat the corpus as a JSON array of token arrays
        #[arg(long)]
        json: bool,

        /// Maximum vocabulary size
        #[arg(short, long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,

        /// Where to write the fitted model
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Do not lowercase tokens when splitting lines
        #[arg(long)]
        keep_case: bool,
    },
    /// Encode sentences with a fitted model
    Encode {
        /// Fitted model file
        #[arg(short, long, value_name = "PATH")]
        model: PathBuf,

        /// Sentence to encode (if not provided, reads from stdin)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Encode the whole file as one sentence
        #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Encode one sentence per line
        #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "file"])]
        batch: Option<PathBuf>,

        /// Encode a JSON array of token arrays
        #[arg(long, value_name = "PATH", conflicts_with_all = ["text", "file", "batch"])]
        batch_json: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "dense")]
        format: OutputFormat,

        /// Do not lowercase tokens when splitting text
        #[arg(long)]
        keep_case: bool,
    },
    /// List the vocabulary of a fitted model with its idf weights
    Vocab {
        /// Fitted model file
        #[arg(short, long, value_name = "PATH")]
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Fit {
            corpus,
            json,
            max_features,
            output,
            keep_case,
        } => {
            let source = if json {
                input::read_token_json(&corpus)?
            } else {
                input::read_lines(&corpus)?
            };
            let model = fit(source, max_features, !keep_case)?;
            save_model(&model, &output)?;
            if !cli.quiet {
                writeln!(
                    out,
                    "Fitted {} terms (max_features={}) -> {}",
                    model.num_features(),
                    model.max_features(),
                    output.display()
                )?;
            }
        }
        Command::Encode {
            model,
            text,
            file,
            batch,
            batch_json,
            format,
            keep_case,
        } => {
            let model = load_model(&model)?;
            let source = determine_input_source(text, file, batch, batch_json)?;
            debug!(num_sentences = source.len(), "Read sentences to encode");

            let sentences = source.into_sentences(!keep_case);
            let vectors = Encoder::transform(&model, &sentences)?;
            output::write_vectors(&mut out, &vectors, format)?;
        }
        Command::Vocab { model } => {
            let model = load_model(&model)?;
            output::write_vocabulary(&mut out, &model)?;
        }
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (_, true) => "debug",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Priority: text arg > file > batch > batch_json > stdin
fn determine_input_source(
    text: Option<String>,
    file: Option<PathBuf>,
    batch: Option<PathBuf>,
    batch_json: Option<PathBuf>,
) -> Result<InputSource> {
    if let Some(text) = text {
        return Ok(InputSource::Raw(vec![text]));
    }
    if let Some(path) = file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return Ok(InputSource::Raw(vec![text]));
    }
    if let Some(path) = batch {
        return input::read_lines(&path);
    }
    if let Some(path) = batch_json {
        return input::read_token_json(&path);
    }
    input::read_stdin()
}

fn fit(source: InputSource, max_features: usize, lowercase: bool) -> Result<VocabularyModel> {
    let params = VocabularyParams::new(max_features)?;
    let corpus = source.into_sentences(lowercase);
    VocabularyModel::fit(&corpus, params).context("Failed to fit the vocabulary")
}

fn save_model(model: &VocabularyModel, path: &Path) -> Result<()> {
    let bytes = model.to_bytes()?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write model: {}", path.display()))
}

fn load_model(path: &Path) -> Result<VocabularyModel> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read model: {}", path.display()))?;
    VocabularyModel::from_bytes(&bytes)
        .with_context(|| format!("Not a fitted model: {}", path.display()))
}
