#![forbid(unsafe_code)]

mod animation;
mod config;
mod constants;
mod controls;
mod geometry;
mod gui;
mod render_config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use animation::FlyThruAnimation;
use config::AppConfig;
use controls::{FlyThruControls, JsonFileStore};
use gui::PanelResources;
use render_config::RenderConfig;

/// Bridge fly-through animation with a floating control panel
#[derive(Parser)]
#[command(name = "flythru-controls", version)]
struct Cli {
    /// trace, debug, info, warn or error
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory holding the saved control state
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Treat the renderer as unable to draw shadows
    #[arg(long)]
    no_shadows: bool,

    /// Alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Loaded before the subscriber exists so the config can pick the level
    let app_config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let log_level = parse_level(cli.log_level.as_deref().unwrap_or(&app_config.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("config={:#?}", app_config);

    let can_show_shadows = app_config.shadows_supported && !cli.no_shadows;
    if !can_show_shadows {
        info!("Shadows unavailable on this renderer");
    }
    let render_config = Arc::new(RenderConfig::new(can_show_shadows));

    let state_dir = cli
        .state_dir
        .or_else(|| app_config.state_dir.clone())
        .unwrap_or_else(JsonFileStore::default_dir);
    info!(dir = %state_dir.display(), "Control state directory");
    let store = JsonFileStore::new(state_dir);

    let controls = FlyThruControls::new(Arc::clone(&render_config), Box::new(store));
    let animation = FlyThruAnimation::new(render_config);

    gui::run_gui(
        [app_config.window_width as f32, app_config.window_height as f32],
        animation,
        controls,
        PanelResources::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), TraceLevel::DEBUG);
        assert_eq!(parse_level("warn"), TraceLevel::WARN);
        assert_eq!(parse_level("bogus"), TraceLevel::INFO);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["flythru-controls", "--no-shadows", "--state-dir", "/tmp/x"]);
        assert!(cli.no_shadows);
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_log_level_reads_environment() {
        use clap::CommandFactory;

        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "log_level")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("LOG_LEVEL")));
    }
}
