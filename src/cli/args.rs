//! Command line argument parsing for Emosi CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::error::Result;

/// Emosi - Emotion classification for Indonesian social-media text
#[derive(Parser, Debug, Clone)]
#[command(name = "emosi")]
#[command(about = "Emotion classification for short Indonesian social-media text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EmosiArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "EMOSI_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EmosiArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::default(),
        };

        self.model.apply(&mut config);
        if let Command::Serve(serve) = &self.command {
            serve.apply(&mut config);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Artifact and threshold overrides shared by every subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Slang dictionary (JSON object)
    #[arg(long, env = "EMOSI_SLANG_DICTIONARY", global = true)]
    pub slang_dictionary: Option<PathBuf>,

    /// Vectorizer artifact (.json, .bin or .bincode)
    #[arg(long, env = "EMOSI_VECTORIZER", global = true)]
    pub vectorizer: Option<PathBuf>,

    /// Classifier artifact (.json, .bin or .bincode)
    #[arg(long, env = "EMOSI_CLASSIFIER", global = true)]
    pub classifier: Option<PathBuf>,

    /// Root word list for the stemmer (one word per line)
    #[arg(long, env = "EMOSI_STEMMER_DICTIONARY", global = true)]
    pub stemmer_dictionary: Option<PathBuf>,

    /// Stem without a root word list
    #[arg(long, global = true, conflicts_with = "stemmer_dictionary")]
    pub greedy_stemmer: bool,

    /// Confidence below which a prediction is flagged as uncertain
    #[arg(short = 't', long, env = "EMOSI_THRESHOLD", global = true)]
    pub threshold: Option<f64>,
}

impl ModelArgs {
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(path) = &self.slang_dictionary {
            config.slang_dictionary = path.clone();
        }
        if let Some(path) = &self.vectorizer {
            config.vectorizer = path.clone();
        }
        if let Some(path) = &self.classifier {
            config.classifier = path.clone();
        }
        if let Some(path) = &self.stemmer_dictionary {
            config.stemmer_dictionary = Some(path.clone());
        }
        if self.greedy_stemmer {
            config.stemmer_dictionary = None;
        }
        if let Some(threshold) = self.threshold {
            config.uncertainty_threshold = threshold;
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve GET /predict-teks over HTTP
    Serve(ServeArgs),

    /// Classify a single text
    Predict(PredictArgs),

    /// Show the text after each normalization stage
    Normalize(NormalizeArgs),
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "EMOSI_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "EMOSI_PORT")]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

/// Arguments for classifying a text
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for tracing normalization
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
