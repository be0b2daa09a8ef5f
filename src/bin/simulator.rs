// Interactive terminal host for trying the engine by hand.
// Run with: cargo run --bin simulator -- [config.json]
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor::MoveTo, execute, queue, style::Print};
use ime_core::config::ImeConfig;
use ime_core::logging::init_logging;
use ime_core::session::key;
use ime_core::{CompositionSession, HostAdapter, ImeEngine, KeyEvent, Modifiers};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Mirrors what a real host would draw, plus the "application" text that
/// committed strings and forwarded keys land in.
#[derive(Default)]
struct TerminalHost {
    document: String,
    composition: String,
    composition_cursor: usize,
    candidates: Vec<String>,
    candidate_cursor: usize,
    show_candidates: bool,
}

impl HostAdapter for TerminalHost {
    fn set_composition_string(&mut self, text: &str) {
        self.composition = text.to_string();
    }

    fn set_composition_cursor(&mut self, pos: usize) {
        self.composition_cursor = pos;
    }

    fn set_candidate_list(&mut self, candidates: &[String]) {
        self.candidates = candidates.to_vec();
    }

    fn set_candidate_cursor(&mut self, index: usize) {
        self.candidate_cursor = index;
    }

    fn set_show_candidates(&mut self, show: bool) {
        self.show_candidates = show;
    }

    fn set_commit_string(&mut self, text: &str) {
        self.document.push_str(text);
    }
}

impl TerminalHost {
    /// What the application does with a key the IME passed through.
    fn forward(&mut self, event: &KeyEvent) {
        if event.modifiers.control || event.modifiers.alt {
            return;
        }
        match event.key_code {
            key::RETURN => self.document.push('\n'),
            key::BACK => {
                self.document.pop();
            }
            _ => {
                if let Some(c) = event.as_char().filter(|_| event.is_printable_char()) {
                    self.document.push(c);
                }
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        queue!(out, Print("IME simulator  (Ctrl+C to quit)\r\n"))?;
        queue!(out, Print("-----------------------------------------------\r\n"))?;
        for line in self.document.split('\n') {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        queue!(out, Print(format!("\r\nComposition: [{}]\r\n", self.composition)))?;
        if self.show_candidates {
            for (i, candidate) in self.candidates.iter().enumerate() {
                let marker = if i == self.candidate_cursor { '>' } else { ' ' };
                queue!(out, Print(format!("{marker} {}. {candidate}\r\n", i + 1)))?;
            }
        }
        out.flush()
    }
}

fn to_key_event(code: KeyCode, mods: KeyModifiers) -> Option<KeyEvent> {
    let modifiers = Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        control: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    };
    let event = match code {
        KeyCode::Char(c) => {
            let ev = KeyEvent::char(c);
            KeyEvent::new(ev.char_code, ev.key_code, Modifiers { shift: ev.modifiers.shift, ..modifiers })
        }
        KeyCode::Enter => KeyEvent::key(key::RETURN).with_modifiers(modifiers),
        KeyCode::Backspace => KeyEvent::key(key::BACK).with_modifiers(modifiers),
        KeyCode::Esc => KeyEvent::key(key::ESCAPE).with_modifiers(modifiers),
        KeyCode::Left => KeyEvent::key(key::LEFT).with_modifiers(modifiers),
        KeyCode::Right => KeyEvent::key(key::RIGHT).with_modifiers(modifiers),
        KeyCode::Up => KeyEvent::key(key::UP).with_modifiers(modifiers),
        KeyCode::Down => KeyEvent::key(key::DOWN).with_modifiers(modifiers),
        _ => return None,
    };
    Some(event)
}

fn run(engine: &ImeEngine) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut host = TerminalHost::default();
    let mut session = CompositionSession::new(engine);
    session.on_activate();
    host.render(&mut stdout)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            session.on_deactivate(&mut host);
            break;
        }
        let Some(event) = to_key_event(key_event.code, key_event.modifiers) else {
            continue;
        };

        let handled = session.filter_key_down(&event) && session.on_key_down(&event, &mut host);
        if !handled {
            host.forward(&event);
        }
        host.render(&mut stdout)?;
    }

    execute!(stdout, Print("\r\n"))?;
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging(Some(Path::new("simulator.log")));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ime_config.json"));
    let engine = ImeConfig::load_or_default(&config_path)
        .and_then(|config| ImeEngine::from_config(&config))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    terminal::enable_raw_mode()?;
    let result = run(&engine);
    terminal::disable_raw_mode()?;
    result
}
