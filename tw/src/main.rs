//! tw - conversational trip planner CLI

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use tripwright::agent::PlannerEngine;
use tripwright::cli::{Cli, Command};
use tripwright::config::Config;
use tripwright::domain::{ChatRequest, ChatResponse, Signal, TurnRecord};
use tripwright::llm::create_client;
use tripwright::photos::{ImageResolver, PhotoSearch, UnsplashClient};

fn setup_logging(verbose: bool) -> Result<()> {
    // Stdout is the chat surface, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripwright")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("tripwright.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "Tripwright loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    let engine = build_engine(&config)?;

    match cli.command {
        Command::Chat { user } => cmd_chat(&engine, user).await,
        Command::Send { message, user } => cmd_send(&engine, &message, user).await,
    }
}

/// Wire the engine from config
fn build_engine(config: &Config) -> Result<PlannerEngine> {
    let llm = create_client(&config.llm).context("Failed to create reasoning-engine client")?;

    // No photo credential is fine: the resolver serves the fallback URL
    let search: Option<Arc<dyn PhotoSearch>> = match config.photos.api_key() {
        Some(key) => {
            let client = UnsplashClient::new(
                key,
                config.photos.base_url.clone(),
                std::time::Duration::from_millis(config.photos.timeout_ms),
            )
            .context("Failed to create photo client")?;
            Some(Arc::new(client))
        }
        None => {
            info!("No photo credential configured, destination images use the fallback URL");
            None
        }
    };

    let images = Arc::new(ImageResolver::new(
        search,
        config.photos.fallback_url.clone(),
        config.photos.cache_capacity,
    ));

    Ok(PlannerEngine::new(llm, images)
        .with_max_turns(config.agent.max_turns)
        .with_max_tokens(config.llm.max_tokens))
}

/// Interactive planning session over stdin
async fn cmd_chat(engine: &PlannerEngine, user: Option<String>) -> Result<()> {
    println!("Where would you like to go? (Ctrl+D to quit)");

    let mut transcript: Vec<TurnRecord> = Vec::new();
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        transcript.push(TurnRecord::user(line));

        let response = engine
            .handle(ChatRequest {
                messages: transcript.clone(),
                user_id: user.clone(),
            })
            .await;

        println!("{}", response.ai_text);
        transcript.push(assistant_record(&response));

        if let Some(Signal::PlanReady { payload }) = &response.signal {
            println!();
            println!("--- Trip plan ---");
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
    }

    Ok(())
}

/// One-shot message, JSON response on stdout
async fn cmd_send(engine: &PlannerEngine, message: &str, user: Option<String>) -> Result<()> {
    let response = engine
        .handle(ChatRequest {
            messages: vec![TurnRecord::user(message)],
            user_id: user,
        })
        .await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Transcript record for the engine's reply
///
/// A delivered plan is recorded payload-only, so the next request's slot
/// gate starts fresh after the snapshot.
fn assistant_record(response: &ChatResponse) -> TurnRecord {
    match &response.signal {
        Some(Signal::PlanReady { payload }) => TurnRecord {
            role: "assistant".to_string(),
            content: None,
            payload: serde_json::to_value(payload).ok(),
            ..TurnRecord::default()
        },
        _ => TurnRecord::assistant(response.ai_text.clone()),
    }
}
