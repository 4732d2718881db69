use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_bucket;
mod cmd_buckets;
mod cmd_del;
mod cmd_get;
mod cmd_keys;
mod cmd_put;
mod cmd_rename_key;
mod cmd_seed;
mod cmd_serve;
mod cmd_tui;

fn init_logger(default_filter: &str) {
    // RUST_LOG wins over the default, e.g. RUST_LOG=debug bucketview serve ...
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();

    // stderr output would tear the alternate screen
    match cli.cmd {
        cli::Cmd::Tui { .. } => init_logger("off"),
        _ => init_logger("info"),
    }

    let cfg = cli.global.config();
    match cli.cmd {
        cli::Cmd::Tui { file, dir, mode } =>
            cmd_tui::exec(cfg, file, dir, mode),

        cli::Cmd::Serve { path, addr, workers, name } =>
            cmd_serve::exec(cfg, path, addr, workers, name),

        cli::Cmd::Buckets { path, json } =>
            cmd_buckets::exec(&cfg, path, json),

        cli::Cmd::Keys { path, bucket, json } =>
            cmd_keys::exec(&cfg, path, bucket, json),

        cli::Cmd::Get { path, bucket, key, mode, out } =>
            cmd_get::exec(&cfg, path, bucket, key, mode, out),

        cli::Cmd::Put { path, bucket, key, value, value_file } =>
            cmd_put::exec(&cfg, path, bucket, key, value, value_file),

        cli::Cmd::Del { path, bucket, key } =>
            cmd_del::exec(&cfg, path, bucket, key),

        cli::Cmd::CreateBucket { path, name } =>
            cmd_bucket::exec_create(&cfg, path, name),

        cli::Cmd::DeleteBucket { path, name } =>
            cmd_bucket::exec_delete(&cfg, path, name),

        cli::Cmd::RenameBucket { path, from, to } =>
            cmd_bucket::exec_rename(&cfg, path, from, to),

        cli::Cmd::RenameKey { path, bucket, from, to } =>
            cmd_rename_key::exec(&cfg, path, bucket, from, to),

        cli::Cmd::Seed { path } =>
            cmd_seed::exec(&cfg, path),
    }
}
