use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use crate::config::UrlLexConfig;
use crate::core::{FeatureExtractor, LayoutInfo, LinearModel, UrlClassifier};
use crate::logging;
use crate::url::PublicSuffixResolver;

/// Top-level CLI for lexical URL feature extraction.
#[derive(Debug, Parser)]
#[command(name = "urllex")]
#[command(about = "Lexical URL feature extraction for URL classifiers", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per URL, keyed by feature name.
    Json,
    /// One comma-separated line of values per URL.
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the feature vector for each URL (reads stdin if none given).
    Extract {
        urls: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print every intermediate measurement for each URL, entropy included.
    Analyze { urls: Vec<String> },

    /// Split hostnames into subdomain, domain and suffix.
    Split { hosts: Vec<String> },

    /// Print the feature layout and its fingerprint.
    Layout,

    /// Classify URLs with a JSON linear model artifact.
    Classify {
        /// Model artifact; falls back to `[model] path` from config.
        #[arg(long)]
        model: Option<PathBuf>,

        urls: Vec<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let cfg = UrlLexConfig::load_or_default(cli.config.as_deref())
            .context("failed to load configuration")?;
        logging::init_logging(&cfg.logging.filter)?;
        tracing::debug!("loaded config: {:?}", cfg);

        cli.command.run(&cfg)
    }

    pub fn run(self, cfg: &UrlLexConfig) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.execute(cfg, &mut out)
    }

    /// Run the command, writing one output line per input to `out`.
    pub fn execute<W: Write>(self, cfg: &UrlLexConfig, out: &mut W) -> Result<()> {
        match self {
            CliCommand::Extract { urls, format } => {
                let extractor = build_extractor(cfg)?;
                for url in inputs(urls)? {
                    let vector = extractor.extract(&url);
                    match format {
                        OutputFormat::Json => writeln!(out, "{}", vector.to_named_json())?,
                        OutputFormat::Csv => writeln!(out, "{}", vector.to_csv())?,
                    }
                }
            }
            CliCommand::Analyze { urls } => {
                let extractor = build_extractor(cfg)?;
                for url in inputs(urls)? {
                    let analysis = extractor.analyze(&url);
                    writeln!(out, "{}", serde_json::to_string(&analysis)?)?;
                }
            }
            CliCommand::Split { hosts } => {
                let resolver = PublicSuffixResolver::new(Arc::new(cfg.rule_set()?));
                for host in inputs(hosts)? {
                    let parts = resolver.resolve(&host);
                    let line = json!({
                        "host": host,
                        "subdomain": parts.subdomain,
                        "domain": parts.domain,
                        "suffix": parts.suffix,
                    });
                    writeln!(out, "{}", line)?;
                }
            }
            CliCommand::Layout => {
                writeln!(out, "{}", serde_json::to_string_pretty(&LayoutInfo::current())?)?;
            }
            CliCommand::Classify { model, urls } => {
                let path = model
                    .or_else(|| cfg.model.path.clone())
                    .context("no model given (use --model or [model] path in config)")?;
                let model = LinearModel::load(&path)
                    .with_context(|| format!("failed to load model {}", path.display()))?;
                let classifier = UrlClassifier::new(build_extractor(cfg)?, Box::new(model))?;
                for url in inputs(urls)? {
                    let label = classifier.predict_url(&url)?;
                    writeln!(out, "{}", json!({ "url": url, "label": label.as_str() }))?;
                }
            }
        }

        Ok(())
    }
}

fn build_extractor(cfg: &UrlLexConfig) -> Result<FeatureExtractor> {
    let rules = cfg.rule_set().context("failed to load suffix rules")?;
    Ok(FeatureExtractor::new(Arc::new(rules)))
}

/// Arguments if any were given, otherwise non-blank lines from stdin.
fn inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
