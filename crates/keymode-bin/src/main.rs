//! Keymode entrypoint: replay a key script over some text and print the result.
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use core_config::load_from;
use core_events::parse_keys;
use core_model::{Engine, Snapshot};
use core_state::Mode;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "keymode.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "keymode", version, about = "Replay Vim-style keys over text")]
struct Args {
    /// UTF-8 text file to edit.
    pub path: Option<PathBuf>,
    /// Inline initial text.
    #[arg(long = "text", conflicts_with = "path")]
    pub text: Option<String>,
    /// Key script in Vim notation, e.g. `dw` or `ifoo<Esc>`. May repeat.
    #[arg(short = 'k', long = "keys")]
    pub keys: Vec<String>,
    /// Initial cursor offset (chars).
    #[arg(long = "cursor", default_value_t = 0)]
    pub cursor: usize,
    /// Mode the session starts in.
    #[arg(long = "mode", value_enum, default_value_t = StartMode::Normal)]
    pub mode: StartMode,
    /// Optional configuration file path (overrides discovery of `modal.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Print the full session snapshot as JSON instead of the text.
    #[arg(long = "json")]
    pub json: bool,
    /// Write the resulting text back to `path`.
    #[arg(long = "write", requires = "path")]
    pub write: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartMode {
    Normal,
    Insert,
    Visual,
    VisualLine,
}

impl From<StartMode> for Mode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Normal => Mode::Normal,
            StartMode::Insert => Mode::Insert,
            StartMode::Visual => Mode::Visual,
            StartMode::VisualLine => Mode::VisualLine,
        }
    }
}

/// Outcome of replaying every script.
#[derive(Debug)]
struct Replay {
    snapshot: Snapshot,
    keys: usize,
    unhandled: usize,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; drop guard so the writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_text(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let Some(path) = &args.path else {
        return Ok(String::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(target: "runtime", file = %path.display(), size_bytes = content.len(), "file_read_ok");
    // Only LF breaks lines; fold CRLF so `\r` does not show up as text.
    Ok(content.replace("\r\n", "\n"))
}

fn replay(engine: &mut Engine, text: &str, args: &Args) -> Result<Replay> {
    let handle = engine.initialize_session_at(text, args.mode.into(), args.cursor);
    let mut keys = 0;
    let mut unhandled = 0;
    for script in &args.keys {
        let events =
            parse_keys(script).with_context(|| format!("parsing key script {script:?}"))?;
        for event in &events {
            keys += 1;
            if !engine.submit_event(handle, event) {
                unhandled += 1;
            }
        }
    }
    let Some(snapshot) = engine.snapshot(handle) else {
        bail!("session vanished during replay");
    };
    engine.close_session(handle);
    Ok(Replay {
        snapshot,
        keys,
        unhandled,
    })
}

fn render(replay: &Replay, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(&replay.snapshot).context("serializing snapshot");
    }
    Ok(replay.snapshot.text.clone())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let text = load_text(&args)?;

    let mut engine = Engine::new(&config);
    let result = replay(&mut engine, &text, &args)?;
    if result.unhandled > 0 {
        warn!(target: "runtime", unhandled = result.unhandled, keys = result.keys, "keys_unhandled");
    }
    info!(
        target: "runtime",
        keys = result.keys,
        mode = ?result.snapshot.mode,
        cursor = result.snapshot.cursor,
        revision = result.snapshot.revision,
        "replay_complete"
    );

    // Let queued clipboard writes land before the process exits.
    engine.registers().sync_clipboard();

    if args.write
        && let Some(path) = &args.path
    {
        std::fs::write(path, &result.snapshot.text)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(target: "runtime", file = %path.display(), "file_written");
    } else {
        println!("{}", render(&result, args.json)?);
    }
    Ok(())
}
