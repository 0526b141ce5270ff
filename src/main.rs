mod api;
mod app;
mod cli;
mod event;
mod feed;
mod help;
mod keys;
mod logging;
mod pager;
mod playback;
mod settings;
mod theme;
mod tui;
mod viewport;
mod views;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::layout::Rect;
use tracing::info;

use api::VideoClient;
use app::{App, Message};
use cli::{Cli, Commands, ConfigArgs, ConfigCommands, OutputFormat};
use event::Event;
use settings::Settings;
use theme::{ResolvedTheme, ThemeVariant, by_name, default_for_variant, detect_terminal_theme};
use tui::EventHandler;

/// Fast enough for a smooth spinner and a responsive dwell timer.
const TICK_RATE_MS: u64 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config(args)) = &cli.command {
        return handle_config_command(args, &cli);
    }
    run_tui(cli).await
}

fn require_config_dir(custom: Option<&PathBuf>) -> Result<PathBuf> {
    settings::config_dir(custom).context("Could not determine config directory")
}

fn load_settings(config_dir: &std::path::Path) -> Result<Settings> {
    Settings::load(&settings::settings_path(config_dir))
}

fn handle_config_command(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let config_dir = require_config_dir(cli.config_dir.as_ref())?;
    let path = settings::settings_path(&config_dir);

    match &args.command {
        ConfigCommands::Show { format } => {
            let config = load_settings(&config_dir)?.feed_config(cli.endpoint.as_deref());
            match format {
                OutputFormat::Toml => {
                    let toml =
                        toml::to_string_pretty(&config).context("Failed to serialize config")?;
                    print!("{}", toml);
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&config)
                        .context("Failed to serialize config to JSON")?;
                    println!("{}", json);
                }
            }
        }
        ConfigCommands::Init => {
            if path.exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                let settings = Settings {
                    endpoint: Some(
                        cli.endpoint
                            .clone()
                            .unwrap_or_else(|| settings::DEFAULT_ENDPOINT.to_string()),
                    ),
                    ..Settings::default()
                };
                settings.save(&path)?;
                println!("Wrote {}", path.display());
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn resolve_theme(cli: &Cli, settings: &Settings) -> ResolvedTheme {
    // Priority: CLI flag > settings file > terminal detection
    if cli.dark {
        return default_for_variant(ThemeVariant::Dark);
    }
    if cli.light {
        return default_for_variant(ThemeVariant::Light);
    }
    settings
        .theme
        .as_deref()
        .and_then(by_name)
        .unwrap_or_else(|| default_for_variant(detect_terminal_theme()))
}

async fn run_tui(cli: Cli) -> Result<()> {
    let config_dir = require_config_dir(cli.config_dir.as_ref())?;
    let settings = load_settings(&config_dir)?;
    let _log_guard = logging::init(&config_dir, cli.verbose)?;

    let config = settings.feed_config(cli.endpoint.as_deref());
    let client = VideoClient::new(config.endpoint.clone(), config.request_timeout)?;
    let resolved_theme = resolve_theme(&cli, &settings);
    info!(
        endpoint = client.endpoint(),
        theme = %resolved_theme.name,
        variant = ?resolved_theme.variant,
        "starting feed"
    );
    let mut terminal = tui::init()?;
    let mut app = App::new(resolved_theme, config, client);
    let mut events = EventHandler::new(TICK_RATE_MS);
    let mut last_height: Option<u16> = None;

    app.refresh();

    let result = async {
        loop {
            terminal.draw(|frame| views::render(&app, frame))?;

            // Reel size follows the feed area, which shrinks while the debug pane is open
            let size = terminal.size()?;
            let (feed_area, _) = views::split(&app, Rect::new(0, 0, size.width, size.height));
            if last_height != Some(feed_area.height) {
                last_height = Some(feed_area.height);
                app.update(Message::UpdateViewportHeight(feed_area.height));
            }

            // Poll async results (non-blocking)
            while let Ok(result) = app.result_rx.try_recv() {
                app.handle_async_result(result);
            }
            app.tick(Instant::now());

            if app.should_quit {
                break;
            }

            match events.next().await? {
                Event::Key(key) => {
                    if let Some(msg) = keys::handle_key(key, &app) {
                        app.update(msg);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(msg) = keys::handle_mouse(mouse) {
                        app.update(msg);
                    }
                }
                Event::Tick | Event::Resize => {}
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    app.unmount();
    tui::restore()?;
    result
}
