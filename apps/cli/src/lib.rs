pub mod config;
pub mod db;
pub mod loader;
pub mod shell;

use std::io;

use anyhow::Context;
use quiz_core::{PracticeSession, Scheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::SqliteStore;
use crate::shell::Shell;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Logs go to stderr so they never interleave with the quiz itself
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(dir = %config.bank_dir.display(), "Loading question bank...");
    let bank = loader::load_bank(&config.bank_dir)
        .with_context(|| format!("failed to load questions from {}", config.bank_dir.display()))?;
    if bank.is_empty() {
        tracing::warn!(dir = %config.bank_dir.display(), "no categories found");
    }

    tracing::info!(path = %config.db_path.display(), "Opening database...");
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;

    let session = PracticeSession::new(Scheduler::new(store));
    let mut shell = Shell::new(&bank, session);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout.lock())
}
