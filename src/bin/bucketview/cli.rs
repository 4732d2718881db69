use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bucketview::{BrowserConfig, DisplayMode};

/// Browse and edit bucketed redb databases from a terminal or over HTTP.
#[derive(Parser, Debug)]
#[command(name = "bucketview", version, about = "bucketview CLI")]
pub struct Cli {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Overrides on top of BV_* environment variables.
#[derive(Args, Debug)]
pub struct Global {
    /// Max wait for the database file lock, milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl Global {
    pub fn config(&self) -> BrowserConfig {
        let cfg = BrowserConfig::from_env();
        match self.timeout_ms {
            Some(ms) => cfg.with_open_timeout_ms(ms),
            None => cfg,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Interactive terminal browser
    Tui {
        /// Database file to open (must exist)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Look for a single .db/.redb file here when --file is not given
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Initial value display mode: string|base64|base58|hex
        #[arg(long)]
        mode: Option<DisplayMode>,
    },
    /// Serve the JSON API
    Serve {
        /// Database registered under the default name
        #[arg(long)]
        path: PathBuf,
        /// Bind address (overrides BV_HTTP_ADDR)
        #[arg(long)]
        addr: Option<String>,
        /// Worker threads (overrides BV_HTTP_WORKERS)
        #[arg(long)]
        workers: Option<usize>,
        /// Registry name for --path (overrides BV_DEFAULT_DB)
        #[arg(long)]
        name: Option<String>,
    },
    /// List bucket names
    Buckets {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List keys of a bucket
    Keys {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        bucket: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a value
    Get {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        /// Output rendering: string|base64|base58|hex
        #[arg(long, default_value = "string")]
        mode: DisplayMode,
        /// Write raw value bytes to this file instead
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Store a value (literal, "-" for stdin, "@file", or "hex:..")
    Put {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: Option<String>,
        /// Read value bytes from a file
        #[arg(long)]
        value_file: Option<PathBuf>,
    },
    /// Delete a key
    Del {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
    },
    /// Create a bucket (no-op when it exists)
    CreateBucket {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// Delete a bucket and everything in it
    DeleteBucket {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// Rename a bucket (copy + delete in one transaction)
    RenameBucket {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Rename a key inside a bucket
    RenameKey {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Write sample buckets for trying the browser
    Seed {
        #[arg(long)]
        path: PathBuf,
    },
}
