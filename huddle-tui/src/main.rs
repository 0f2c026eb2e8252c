use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use huddle::api::ApiClient;
use huddle::app::{handlers, App};
use huddle::config::ConfigManager;
use huddle::mention::{fetch_candidates, LookupResult};
use huddle::server_config::ServerConfigManager;
use huddle::{log_debug, logging, terminal, ui};
use huddle_types::Theme;
use tokio::sync::mpsc;

/// Huddle - a keyboard-driven terminal client for the team dashboard
#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Comment, react and @mention teammates from the terminal")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "HUDDLE_SERVER_URL")]
    server: Option<String>,

    /// Post whose comments and reactions to open
    #[arg(long, short, env = "HUDDLE_POST_ID", default_value_t = 1)]
    post: i64,

    /// CSRF token sent with state-changing requests
    #[arg(long, env = "HUDDLE_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Theme to start with when none was saved (light or dark)
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::parse(s).ok_or_else(|| format!("unknown theme '{}', expected light or dark", s))
}

// Load environment variables from .env file
// This allows HUDDLE_SERVER_URL and friends to be set without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let config_manager = ConfigManager::new()?;
    let server_config_manager = ServerConfigManager::new(config_manager.clone());
    let server_url = server_config_manager.determine_server_url(cli.server)?;
    if let Err(e) = server_config_manager.save_server_url(server_url.clone()) {
        log::warn!("Failed to remember server URL: {}", e);
    }
    log::info!("Connecting to {} for post {}", server_url, cli.post);

    let mut api_client = ApiClient::new(server_url);
    api_client.set_csrf_token(cli.csrf_token);

    let mut app = App::new(api_client, config_manager, cli.post);
    app.set_log_config(log_config);
    app.apply_theme_hint(cli.theme);

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app).await;
    terminal::restore()?;
    result
}

async fn run(tui: &mut terminal::Tui, app: &mut App) -> Result<()> {
    let (lookup_tx, mut lookup_rx) = mpsc::unbounded_channel::<LookupResult>();

    while app.running {
        // Lookups run off the input path; stale ones are dropped by token
        for request in app.take_lookup_requests() {
            let client = app.api_client.clone();
            let tx = lookup_tx.clone();
            tokio::spawn(async move {
                let candidates = fetch_candidates(&client).await;
                let _ = tx.send(request.complete(candidates));
            });
        }
        while let Ok(result) = lookup_rx.try_recv() {
            app.apply_mention_lookup(result);
        }

        app.run_pending_actions().await?;
        app.clear_expired_toasts();

        tui.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => handlers::handle_key_event(app, key)?,
                Event::Mouse(mouse) => handlers::handle_mouse_event(app, mouse)?,
                Event::Resize(width, height) => {
                    log_debug!(app.log_config, "Terminal resized to {}x{}", width, height);
                }
                _ => {}
            }
        }
    }

    Ok(())
}
