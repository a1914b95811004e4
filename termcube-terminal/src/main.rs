/// Termcube - a 3x3x3 twisty cube rendered in the terminal
///
/// Controls:
///   - u d r l f b / x y z: Turn a layer or the whole cube (uppercase reverses)
///   - Space: Random turn
///   - q: Undo the last turn
///   - w/e, o/p: Spin the camera
///   - Esc / Ctrl-C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use termcube_core::{Config, ConfigError, Session};
use termcube_terminal::TerminalApp;

#[derive(Debug, Parser)]
#[command(name = "termcube", version, about = "A 3x3x3 twisty cube in your terminal")]
struct Args {
    /// TOML settings file
    #[arg(short, long, default_value = "termcube.toml")]
    config: PathBuf,

    /// Seed for the random-move generator
    #[arg(long)]
    seed: Option<u64>,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Draw back-facing triangles too
    #[arg(long)]
    no_cull: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match Config::load(&args.config) {
        Ok(config) => {
            log::info!("loaded config from {}", args.config.display());
            config
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            log::warn!(
                "config file {} not found, using defaults",
                args.config.display()
            );
            Config::default()
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };

    if let Some(fps) = args.fps {
        config.render.target_fps = fps;
    }
    if args.no_cull {
        config.render.cull_backfaces = false;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}, target {} fps", config.render.target_fps);

    let mut app = TerminalApp::new(Session::new(config, seed))?;
    app.run()
}
