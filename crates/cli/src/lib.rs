use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use context_text_chunker::{
    CachingTokenizer, ChunkRecord, Chunker, ChunkingConfig, HfTokenizer, Metadata,
    OversizedPolicy, TokenizerAdapter, WhitespaceTokenizer,
};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const TOKENIZER_ENV: &str = "CONTEXT_CHUNK_TOKENIZER";
const DEFAULT_DOC_ID: &str = "doc";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "context-chunk")]
#[command(about = "Split a document into token-budgeted, overlapping chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Document to chunk (stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Document id used in chunk ids (default: input file stem)
    #[arg(long)]
    doc_id: Option<String>,

    /// JSON object attached to every chunk record
    #[arg(long)]
    metadata: Option<String>,

    /// Chunking config file (TOML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override min_tokens
    #[arg(long)]
    min_tokens: Option<usize>,

    /// Override max_tokens
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Override overlap_tokens
    #[arg(long)]
    overlap_tokens: Option<usize>,

    /// Override the pending-chunk policy for oversized paragraphs
    #[arg(long, value_enum)]
    oversized_policy: Option<PolicyArg>,

    /// HuggingFace tokenizer.json (overrides CONTEXT_CHUNK_TOKENIZER).
    /// Whitespace words are counted when neither is set.
    #[arg(long)]
    tokenizer: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    KeepPending,
    FlushPending,
}

impl PolicyArg {
    const fn as_domain(self) -> OversizedPolicy {
        match self {
            Self::KeepPending => OversizedPolicy::KeepPending,
            Self::FlushPending => OversizedPolicy::FlushPending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array of records
    Json,
    /// One JSON record per line
    Jsonl,
    /// Human-readable listing
    Text,
}

/// Parse arguments, chunk the input and print the records
pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // Tokenizer internals are noisy at debug level
    if !cli.verbose {
        builder.filter_module("tokenizers", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let metadata = parse_metadata(cli.metadata.as_deref())?;
    let doc_id = resolve_doc_id(cli.doc_id.as_deref(), cli.input.as_deref());
    let text = read_input(cli.input.as_deref())?;

    let tokenizer_path = cli
        .tokenizer
        .clone()
        .or_else(|| env::var_os(TOKENIZER_ENV).map(PathBuf::from));
    let tokenizer = build_tokenizer(tokenizer_path.as_deref())?;

    let chunker = Chunker::new(config, tokenizer).context("Invalid chunking configuration")?;
    let records = chunker
        .build_chunks(&doc_id, &text, metadata)
        .with_context(|| format!("Failed to chunk document '{doc_id}'"))?;

    log::info!(
        "{doc_id}: {}",
        Chunker::<Box<dyn TokenizerAdapter>>::get_stats(&records)
    );
    print_stdout(&render(&records, cli.format)?)
}

fn resolve_config(cli: &Cli) -> Result<ChunkingConfig> {
    let mut config = match &cli.config {
        Some(path) => ChunkingConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ChunkingConfig::default(),
    };

    if let Some(min_tokens) = cli.min_tokens {
        config.min_tokens = min_tokens;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(overlap_tokens) = cli.overlap_tokens {
        config.overlap_tokens = overlap_tokens;
    }
    if let Some(policy) = cli.oversized_policy {
        config.oversized_policy = policy.as_domain();
    }

    config.validate().context("Invalid chunking configuration")?;
    log::debug!("chunking config: {config:?}");
    Ok(config)
}

fn parse_metadata(raw: Option<&str>) -> Result<Metadata> {
    let Some(raw) = raw else {
        return Ok(Metadata::new());
    };

    let value: serde_json::Value =
        serde_json::from_str(raw).context("--metadata is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("--metadata must be a JSON object, got {other}"),
    }
}

fn resolve_doc_id(explicit: Option<&str>, input: Option<&Path>) -> String {
    if let Some(doc_id) = explicit {
        return doc_id.to_string();
    }

    input
        .filter(|path| path.as_os_str() != "-")
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DOC_ID.to_string())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    if let Some(path) = input.filter(|path| path.as_os_str() != "-") {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read document from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read document from stdin")?;
    Ok(buffer)
}

fn build_tokenizer(path: Option<&Path>) -> Result<Box<dyn TokenizerAdapter>> {
    match path {
        Some(path) => {
            let tokenizer = HfTokenizer::from_file(path)
                .with_context(|| format!("Failed to load tokenizer from {}", path.display()))?;
            Ok(Box::new(CachingTokenizer::new(tokenizer)))
        }
        None => {
            log::warn!(
                "No tokenizer configured (--tokenizer or {TOKENIZER_ENV}); counting whitespace-separated words"
            );
            Ok(Box::new(WhitespaceTokenizer))
        }
    }
}

fn render(records: &[ChunkRecord], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Jsonl => records
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Text => records
            .iter()
            .map(|record| {
                format!(
                    "{}\n{}\ntokens: {}",
                    record.chunk_id, record.text, record.token_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    Ok(out)
}
