use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use docuchat_core::{update, AppState, Msg};
use docuchat_logging::{dc_debug, dc_info};

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::ui::input::{self, Command};
use super::ui::render::TerminalRenderer;

/// Everything the dispatch loop reacts to.
pub enum Inbound {
    /// A line typed by the user.
    Line(String),
    /// A message for the core, typically a gateway settle.
    Core(Msg),
    /// Standard input closed.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli).context("loading configuration")?;
    docuchat_logging::initialize(
        config.log_target.into(),
        config::log_level(&cli),
        &config.log_file,
    );
    dc_info!("Starting docuchat against {}", config.backend.base_url);

    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(config.gateway_settings(), inbound_tx.clone())
        .context("starting backend gateway")?;
    spawn_stdin_reader(inbound_tx);

    let mut app = App {
        state: AppState::with_theme(config.theme),
        renderer: TerminalRenderer::new(config.color),
        runner,
    };
    app.render_all()?;

    while let Ok(inbound) = inbound_rx.recv() {
        match inbound {
            Inbound::Line(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            Inbound::Core(msg) => app.dispatch_msg(msg)?,
            Inbound::InputClosed => {
                dc_info!("Standard input closed");
                break;
            }
        }
    }

    if let Some(in_flight) = app.state.in_flight() {
        dc_info!(
            "Exiting with {} request {} still in flight",
            in_flight.kind(),
            in_flight.request_id()
        );
    }
    Ok(())
}

fn spawn_stdin_reader(inbound: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if inbound.send(Inbound::Line(line)).is_err() {
                return;
            }
        }
        let _ = inbound.send(Inbound::InputClosed);
    });
}

struct App {
    state: AppState,
    renderer: TerminalRenderer,
    runner: EffectRunner,
}

impl App {
    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match input::parse_line(line) {
            Command::Core(msgs) => {
                let msgs = if self.state.is_busy() {
                    let (kept, notice) = input::hold_back_while_busy(msgs);
                    if let Some(notice) = notice {
                        print_lines(&[notice])?;
                    }
                    kept
                } else {
                    msgs
                };
                for msg in msgs {
                    self.dispatch_msg(msg)?;
                }
            }
            Command::Help => print_lines(&[input::HELP_TEXT.to_string()])?,
            Command::Invalid(reason) => print_lines(&[reason])?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if !effects.is_empty() {
            dc_debug!("Dispatching {} effects", effects.len());
            self.runner.enqueue(effects);
        }
        if was_dirty {
            self.render_all()?;
        }
        Ok(())
    }

    fn render_all(&mut self) -> io::Result<()> {
        let lines = self.renderer.render(&self.state.view());
        print_lines(&lines)
    }
}

fn print_lines(lines: &[String]) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()
}
