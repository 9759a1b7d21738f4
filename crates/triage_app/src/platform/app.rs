use std::io::{self, IsTerminal, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use triage_core::{update, AppState, Msg};
use triage_engine::load_candidate;
use triage_logging::{triage_info, triage_warn};

use super::config::{self, AppConfig};
use super::console::{self, Command};
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use crate::Cli;

enum AppEvent {
    Command(Command),
    Tick(Duration),
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let (mut config, config_problem) = match config::read_config(&cli.config) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (AppConfig::default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config.apply_cli(&cli);

    logging::initialize(config.log_destination, config.log_level());
    if let Some(err) = config_problem {
        triage_warn!("Using default configuration: {err}");
    }
    triage_info!("Starting mail-triage against {}", config.server_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_stdin_reader(event_tx.clone());

    // Background tick drives notification expiry.
    let started = Instant::now();
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while event_tx.send(AppEvent::Tick(started.elapsed())).is_ok() {
            thread::sleep(interval);
        }
    });

    let color = !cli.no_color && io::stdout().is_terminal();
    let mut session = Session::new(&config, color);
    let welcome = ui::layout::welcome(&session.state.view());
    session.print(&welcome)?;

    let mut input_closed = false;
    loop {
        for msg in session.effects.poll() {
            session.dispatch(msg)?;
        }
        // Piped input: keep running until the last submission has finished.
        if input_closed && !session.state.is_busy() {
            break;
        }
        match event_rx.recv_timeout(Duration::from_millis(20)) {
            Ok(AppEvent::Command(Command::Quit)) => break,
            Ok(AppEvent::Command(command)) => session.handle_command(command)?,
            Ok(AppEvent::Tick(now)) => session.dispatch(Msg::Tick { now })?,
            Ok(AppEvent::InputClosed) => input_closed = true,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    triage_info!("mail-triage exiting");
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let read = console::read_commands(stdin.lock(), |command| {
            event_tx.send(AppEvent::Command(command)).is_ok()
        });
        if let Err(err) = read {
            triage_warn!("Stopped reading input: {err}");
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

struct Session {
    state: AppState,
    effects: EffectRunner,
    renderer: ui::render::ConsoleRenderer,
    out: io::Stdout,
}

impl Session {
    fn new(config: &AppConfig, color: bool) -> Self {
        let state = AppState::with_settings(config.ui_settings());
        let renderer = ui::render::ConsoleRenderer::new(color, &state.view());
        Self {
            state,
            effects: EffectRunner::new(config.client_settings()),
            renderer,
            out: io::stdout(),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            let lines = self.renderer.render(&self.state.view());
            self.print(&lines)?;
        }
        for follow_up in self.effects.run(effects) {
            self.dispatch(follow_up)?;
        }
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::AppendText(line) => {
                let text = console::append_line(self.state.input().text(), &line);
                self.dispatch(Msg::TextChanged(text))
            }
            Command::ClearText => self.dispatch(Msg::TextChanged(String::new())),
            Command::PickFile(path) => match load_candidate(&path) {
                Ok(candidate) => self.dispatch(Msg::FilePicked(candidate)),
                Err(err) => self.dispatch(Msg::FileLoadFailed(err.to_string())),
            },
            Command::DropFiles(paths) => {
                self.dispatch(Msg::DragEntered)?;
                let Some(first) = paths.first() else {
                    return self.dispatch(Msg::DragLeft);
                };
                match load_candidate(first) {
                    Ok(candidate) => self.dispatch(Msg::FilesDropped(vec![candidate])),
                    Err(err) => {
                        self.dispatch(Msg::DragLeft)?;
                        self.dispatch(Msg::FileLoadFailed(err.to_string()))
                    }
                }
            }
            Command::DragEnter => self.dispatch(Msg::DragEntered),
            Command::DragLeave => self.dispatch(Msg::DragLeft),
            Command::RemoveFile => self.dispatch(Msg::RemoveFileClicked),
            Command::Submit => self.dispatch(Msg::SubmitClicked),
            Command::Copy => self.dispatch(Msg::CopyReplyClicked),
            Command::CopyAndClear => self.dispatch(Msg::CopyAndClearClicked),
            Command::EditReply(text) => self.dispatch(Msg::ReplyEdited(text)),
            Command::ToggleRaw => self.dispatch(Msg::ToggleRawClicked),
            Command::Health => self.dispatch(Msg::HealthCheckClicked),
            Command::Help => {
                let help: Vec<String> = console::HELP.iter().map(|line| line.to_string()).collect();
                self.print(&help)
            }
            Command::Unknown(line) => self.print(&[format!("Unknown command: {line} (try :help)")]),
            Command::Quit => Ok(()),
        }
    }

    fn print(&self, lines: &[String]) -> io::Result<()> {
        let mut out = self.out.lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
