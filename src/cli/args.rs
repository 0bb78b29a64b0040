//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Load configuration from that file
//! - `--debug`: Enable debug diagnostics
//! - `--quiet` / `-q`: Errors only

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scriptorium - edit and validate scripture translation resources
#[derive(Parser, Debug)]
#[command(name = "scriptorium")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from this TOML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug diagnostics
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a translation-notes TSV file
    Validate {
        /// Path of the file to validate
        file: PathBuf,
    },

    /// Resolve the target-language path for a source file
    Resolve {
        /// Path of the source repository's manifest.yaml
        #[arg(long)]
        source_manifest: PathBuf,

        /// Path of the target repository's manifest.yaml
        #[arg(long)]
        target_manifest: PathBuf,

        /// Repository-relative path of the source file
        #[arg(long)]
        path: String,
    },

    /// Export a TSV resource as spreadsheet-friendly CSV
    ExportCsv {
        /// Path of the TSV file to convert
        file: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a file's target path against manifests on the server
    TargetPath {
        /// Source repository as owner/name
        #[arg(long)]
        source_repo: String,

        /// Target repository as owner/name
        #[arg(long)]
        target_repo: String,

        /// Repository-relative path of the source file
        #[arg(long)]
        path: String,

        /// Personal access token for the server
        #[arg(long, env = "SCRIPTORIUM_TOKEN")]
        token: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
