//! `tedit` entrypoint: load a document, replay a key script through the modal
//! editor, print the resulting text (and optionally its tokens).
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::Editor;
use core_config::Config;
use core_events::parse_key_script;
use core_syntax::{Language, PaletteTheme, style_for};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "tedit.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tedit", version, about = "Modal text editing engine replay host")]
struct Args {
    /// Text file to load. A missing file starts an empty document.
    pub path: Option<PathBuf>,
    /// Language id for highlighting (overrides config and file extension).
    #[arg(long = "lang")]
    pub lang: Option<String>,
    /// Key script to replay, e.g. `ihello<Esc>dd`.
    #[arg(long = "keys")]
    pub keys: Option<String>,
    /// Configuration file path (overrides discovery of `tedit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Print each line's tokens after the text.
    #[arg(long = "tokens")]
    pub tokens: bool,
    /// Directory for `tedit.log` (defaults to the working directory).
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayOutcome {
    keys: usize,
    unhandled: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(args.log_dir.as_deref().unwrap_or(Path::new(".")));
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let text = load_text(args.path.as_deref())?;
    let language = resolve_language(args.lang.as_deref(), &config, args.path.as_deref())?;
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        language = language.map(Language::name),
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        "bootstrap_complete"
    );

    let mut editor = Editor::new(&text, language, config.editor_options());
    if let Some(script) = args.keys.as_deref() {
        let outcome = replay(&mut editor, script)?;
        info!(target: "runtime", keys = outcome.keys, unhandled = outcome.unhandled, mode = ?editor.mode(), "replay_complete");
    }

    let mut out = editor.text();
    if args.tokens {
        editor.refresh_tokens();
        out.push('\n');
        out.push_str(&render_tokens(&editor, &config.theme()));
    }
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    writeln!(lock, "{out}").context("writing output")?;
    Ok(())
}

/// Install the file logger. The returned guard must outlive all logging.
fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
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

fn load_text(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(target: "runtime", path = %path.display(), "file_missing_starting_empty");
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// `--lang`, then `[syntax] language`, then the file extension.
fn resolve_language(
    flag: Option<&str>,
    config: &Config,
    path: Option<&Path>,
) -> Result<Option<Language>> {
    if let Some(id) = flag {
        let lang = id.parse::<Language>().context("invalid --lang")?;
        return Ok(Some(lang));
    }
    if let Some(lang) = config.language().context("invalid [syntax] language")? {
        return Ok(Some(lang));
    }
    Ok(path.and_then(Language::from_path))
}

fn replay(editor: &mut Editor, script: &str) -> Result<ReplayOutcome> {
    let keys = parse_key_script(script).context("parsing --keys")?;
    let mut outcome = ReplayOutcome {
        keys: keys.len(),
        unhandled: 0,
    };
    for key in &keys {
        if !editor.handle_key(key) {
            outcome.unhandled += 1;
            debug!(target: "runtime", key = %key, mode = ?editor.mode(), "key_unhandled");
        }
    }
    Ok(outcome)
}

/// One line per document row: `row: start-stop scope(palette) ...`.
fn render_tokens(editor: &Editor, theme: &PaletteTheme) -> String {
    let mut out = String::new();
    for row in 1..=editor.line_count() {
        let _ = write!(out, "{row}:");
        for tok in editor.tokens(row).into_iter().flatten() {
            let _ = write!(
                out,
                " {}-{} {}({})",
                tok.start,
                tok.stop,
                tok.kind.scope(),
                style_for(theme, tok.kind)
            );
        }
        if row < editor.line_count() {
            out.push('\n');
        }
    }
    out
}
