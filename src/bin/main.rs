// Line-protocol bridge between a host input framework and the engine.
//
// stdin:  FILTER_KEY <char> <key> <mods> | KEY_DOWN <char> <key> <mods>
//         | ACTIVATE | DEACTIVATE | EXIT
// stdout: one line per host call, then FILTERED/HANDLED for key commands.
use ime_core::config::ImeConfig;
use ime_core::logging::init_logging;
use ime_core::{CompositionSession, HostCall, ImeEngine, KeyEvent, Modifiers};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

const DEFAULT_CONFIG_PATH: &str = "ime_config.json";
const LOG_PATH: &str = "ime_engine.log";

fn config_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os("IME_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn main() -> ExitCode {
    init_logging(Some(Path::new(LOG_PATH)));
    info!("--- IME engine bridge starting ---");

    let engine = match ImeConfig::load_or_default(&config_path())
        .and_then(|config| ImeEngine::from_config(&config))
    {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "failed to load lexicon");
            eprintln!("[ERROR] failed to load lexicon: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&engine) {
        Ok(()) => {
            info!("shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "bridge I/O failed");
            ExitCode::FAILURE
        }
    }
}

fn run(engine: &ImeEngine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut session = CompositionSession::new(engine);

    for line in stdin.lock().lines() {
        let input = line?;
        let parts: Vec<&str> = input.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");
        let mut calls: Vec<HostCall> = Vec::new();

        match command {
            "FILTER_KEY" => {
                let event = parse_key_event(&parts[1..]);
                writeln!(stdout, "FILTERED {}", session.filter_key_down(&event))?;
            }
            "KEY_DOWN" => {
                let event = parse_key_event(&parts[1..]);
                let handled = session.on_key_down(&event, &mut calls);
                write_calls(&mut stdout, &calls)?;
                writeln!(stdout, "HANDLED {handled}")?;
            }
            "ACTIVATE" => session.on_activate(),
            "DEACTIVATE" => {
                session.on_deactivate(&mut calls);
                write_calls(&mut stdout, &calls)?;
            }
            "EXIT" => {
                info!("received EXIT");
                break;
            }
            "" => continue,
            other => warn!(command = other, "unknown command"),
        }
        stdout.flush()?;
    }
    Ok(())
}

fn parse_key_event(args: &[&str]) -> KeyEvent {
    let num = |i: usize| args.get(i).and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
    let key_code = u16::try_from(num(1)).unwrap_or(0);
    let mods = u8::try_from(num(2)).unwrap_or(0);
    KeyEvent::new(num(0), key_code, Modifiers::from_bits(mods))
}

fn write_calls(out: &mut impl Write, calls: &[HostCall]) -> io::Result<()> {
    for call in calls {
        match call {
            HostCall::SetCompositionString(text) => writeln!(out, "COMPOSITION {text}")?,
            HostCall::SetCompositionCursor(pos) => writeln!(out, "COMPOSITION_CURSOR {pos}")?,
            HostCall::SetCandidateList(list) => {
                let json = serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string());
                writeln!(out, "CANDIDATES {json}")?
            }
            HostCall::SetCandidateCursor(index) => writeln!(out, "CANDIDATE_CURSOR {index}")?,
            HostCall::SetShowCandidates(show) => writeln!(out, "SHOW_CANDIDATES {show}")?,
            HostCall::SetCommitString(text) => writeln!(out, "COMMIT {text}")?,
        }
    }
    Ok(())
}
