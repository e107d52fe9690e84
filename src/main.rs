use anyhow::{Context, Result};
use desktop_portfolio::config::{Config, InterfaceMode};
use desktop_portfolio::desktop::handler::DesktopHandler;
use desktop_portfolio::terminal::output::{BlockKind, OutputBlock};
use desktop_portfolio::terminal::shell::{SubmitStatus, TerminalShell};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, fmt::format::FmtSpan, FmtSubscriber};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn setup_logging(log_level_str: &str) {
    let level = match log_level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("desktop_portfolio={}", level)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn render_block(block: &OutputBlock) -> String {
    let prefix = match block.kind {
        BlockKind::Output => "",
        BlockKind::Error => "! ",
        BlockKind::Warning => "!! ",
    };
    let mut out = String::new();
    for line in &block.lines {
        out.push_str(prefix);
        out.push_str(line);
        out.push('\n');
    }
    out
}

async fn write_str(stdout: &mut Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn run_terminal(config: &Config) -> Result<()> {
    let mut shell = TerminalShell::from_config(config);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_str(
        &mut stdout,
        &format!(
            "Welcome to PortfolioOS {}. Type 'help' to get started.\n{}",
            env!("CARGO_PKG_VERSION"),
            shell.prompt_text()
        ),
    )
    .await?;

    while let Some(line) = lines.next_line().await? {
        let outcome = shell.submit(&line);
        let mut out = String::new();
        if outcome.status == SubmitStatus::Cleared {
            out.push_str(CLEAR_SCREEN);
        }
        for block in &outcome.blocks {
            out.push_str(&render_block(block));
        }
        if outcome.retired_prompt.disabled {
            out.push_str("[input disabled]\n");
        }
        out.push_str(&shell.prompt_text());
        write_str(&mut stdout, &out).await?;
    }

    write_str(&mut stdout, "\nlogout\n").await
}

async fn run_json(config: &Config) -> Result<()> {
    let mut handler = DesktopHandler::new(config);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handler.handle_line(&line);
        let mut encoded = serde_json::to_string(&response).context("Failed to encode response")?;
        encoded.push('\n');
        write_str(&mut stdout, &encoded).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    setup_logging(&config.log_level);

    for id in &config.duplicate_window_ids {
        tracing::warn!(window = %id, "Duplicate window id in WINDOW_MANIFEST, ignoring");
    }

    tracing::info!(version = %env!("CARGO_PKG_VERSION"), "Starting desktop-portfolio");
    tracing::debug!("Loaded configuration: {:?}", config);

    match config.interface_mode {
        InterfaceMode::Terminal => {
            tracing::info!("Using terminal interface mode.");
            run_terminal(&config).await?;
        }
        InterfaceMode::Json => {
            tracing::info!("Using JSON event interface mode.");
            run_json(&config).await?;
        }
    }

    tracing::info!("Session ended.");
    Ok(())
}
