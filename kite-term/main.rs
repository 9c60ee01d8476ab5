//! kite: a small terminal text editor.
//!
//! The terminal client owns IO: it reads the file, runs the crossterm event
//! loop, draws with ratatui and writes saves back. Everything else lives in
//! `kite-lib`.

mod ctx;
mod input;
mod prompt;
mod render;
mod terminal;
mod theme;

use std::{
  path::PathBuf,
  time::{
    Duration,
    Instant,
  },
};

use clap::{
  ArgAction,
  Parser,
};
use crossterm::event::{
  self,
  Event,
};
use eyre::Result;
use kite_lib::config::Config;

use crate::{
  ctx::Ctx,
  terminal::Terminal,
};

#[derive(Debug, Parser)]
#[command(name = "kite")]
#[command(about = "A small terminal text editor", version)]
struct Cli {
  /// Path to file to open
  file: Option<PathBuf>,

  /// Use this config file instead of <config dir>/kite/config.toml
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Write the log here instead of <cache dir>/kite/kite.log
  #[arg(long, value_name = "PATH")]
  log: Option<PathBuf>,

  /// Raise log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  kite_loader::initialize_config_file(cli.config);
  kite_loader::initialize_log_file(cli.log);

  let config = match kite_loader::config::load_config() {
    Ok(config) => config,
    Err(err) => {
      eprintln!("Bad config: {err:#}");
      eprintln!("Falling back to the default config.");
      Config::default()
    },
  };

  setup_logging(cli.verbose, &config)?;
  log::info!("starting kite {}", env!("CARGO_PKG_VERSION"));

  let mut ctx = Ctx::new(cli.file.as_deref(), &config)?;
  let mut terminal = Terminal::new()?;
  terminal.enter_raw_mode()?;
  // On error the terminal is restored when it drops.
  run(&mut ctx, &mut terminal)?;
  terminal.leave_raw_mode()
}

fn run(ctx: &mut Ctx, terminal: &mut Terminal) -> Result<()> {
  let size = terminal.size()?;
  ctx.resize(size.width, size.height);

  loop {
    if ctx.should_quit {
      break;
    }

    if ctx.needs_render {
      render::render(ctx, terminal)?;
      ctx.needs_render = false;
    }

    // Wake up now and then to clear an expired status message.
    if event::poll(Duration::from_millis(500))? {
      match event::read()? {
        Event::Key(key) => {
          if let Some(key) = input::to_key_event(key) {
            ctx.handle_key(key);
          }
        },
        Event::Resize(width, height) => ctx.resize(width, height),
        _ => {},
      }
    } else {
      let messages = ctx.editor.messages();
      if messages.latest().is_some() && messages.visible_at(Instant::now()).is_none() {
        ctx.editor.messages_mut().clear();
        ctx.needs_render = true;
      }
    }
  }

  log::info!("quitting");
  Ok(())
}

fn setup_logging(verbosity: u8, config: &Config) -> Result<()> {
  let level = match verbosity {
    0 => config.log.level.into(),
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} {} {}",
        chrono::Local::now().to_rfc3339(),
        record.level(),
        record.target(),
        message
      ))
    })
    .level(level)
    .chain(fern::log_file(kite_loader::log_file())?)
    .apply()?;

  Ok(())
}
