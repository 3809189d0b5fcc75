//! skycast binary
//!
//! ```sh
//! WEATHERAPI_KEY=... skycast
//! skycast --api-key ... --city London --dark
//! RUST_LOG=skycast=debug,skycast_core=debug skycast   # logs go to skycast.log
//! ```

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use skycast::{AppConfig, AppState, Args, WeatherApiClient, WeatherQueryController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_args(Args::parse())?;
    init_logging(&config.log_file)?;

    let client = WeatherApiClient::new(config.api.clone()).context("building HTTP client")?;
    let mut controller = WeatherQueryController::with_state(
        client,
        config.debounce,
        AppState::new(config.start.theme_dark),
    );
    controller.apply_start(&config.start);

    // ===== Terminal setup =====
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("entering alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e).context("creating terminal");
        }
    };

    tracing::info!(base_url = %config.api.base_url, "skycast started");
    let result = controller.run(&mut terminal).await;

    // ===== Cleanup =====
    let restored = restore_terminal(&mut terminal);
    result.context("running UI")?;
    restored.context("restoring terminal")?;
    tracing::info!("skycast exited");
    Ok(())
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
