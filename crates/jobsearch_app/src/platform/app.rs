use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use jobsearch_core::{update, AppState, AppViewModel, FilterState, Msg, SearchPhase};
use jobsearch_engine::SearchSettings;

use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::form::FilterForm;
use super::ui::render;
use crate::cli::Cli;

/// How long the loop waits for engine completions before checking input again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.log);

    let mut settings = SearchSettings::from_env();
    if let Some(url) = &cli.backend_url {
        settings = settings.with_backend_url(url.clone());
    }
    let endpoint = settings
        .endpoint()
        .with_context(|| format!("invalid backend URL '{}'", settings.backend_url))?;
    engine_info!("Using search endpoint {}", endpoint);

    let runner = EffectRunner::new(settings).context("failed to start search engine")?;
    let mut session = Session::new(runner, FilterForm::new(cli.initial_filters()));

    let (line_tx, line_rx) = mpsc::channel::<String>();
    if !cli.once {
        spawn_stdin_reader(line_tx);
        session.print(HELP)?;
    } else {
        drop(line_tx);
    }

    let initial = session.form.draft().clone();
    for msg in startup_messages(&cli.api_host, &cli.api_key, initial) {
        session.dispatch(msg)?;
    }

    let mut input_closed = cli.once;
    loop {
        loop {
            match line_rx.try_recv() {
                Ok(line) => {
                    if !session.handle_line(&line)? {
                        return Ok(());
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    input_closed = true;
                    break;
                }
            }
        }

        if input_closed && session.state.phase() != SearchPhase::Loading {
            engine_debug!("Input finished and no search pending; exiting");
            return Ok(());
        }

        for msg in session.runner.wait(POLL_INTERVAL) {
            session.dispatch(msg)?;
        }
    }
}

/// Host first so the provider rules apply to the submitted form, which lands
/// while the key is still empty. Setting the key then issues the one initial search.
fn startup_messages(api_host: &str, api_key: &str, filters: FilterState) -> Vec<Msg> {
    vec![
        Msg::ApiHostChanged(api_host.to_string()),
        Msg::SearchSubmitted(filters),
        Msg::ApiKeyChanged(api_key.to_string()),
    ]
}

fn spawn_stdin_reader(line_tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
}

struct Session {
    state: AppState,
    form: FilterForm,
    runner: EffectRunner,
    out: io::Stdout,
}

impl Session {
    fn new(runner: EffectRunner, form: FilterForm) -> Self {
        Self {
            state: AppState::new(),
            form,
            runner,
            out: io::stdout(),
        }
    }

    /// Runs `msg` and any follow-up messages through `update`, rendering once if
    /// anything changed.
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        let mut rendered: Option<AppViewModel> = None;

        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            let view = state.view();
            let mut state = state;
            let was_dirty = state.consume_dirty();
            self.state = state;

            inbox.extend(self.runner.enqueue(effects));
            if was_dirty {
                rendered = Some(view);
            }
        }

        if let Some(view) = rendered {
            self.form.sync_provider(view.provider);
            self.render(&view)?;
        }
        Ok(())
    }

    /// Handles one input line. Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                self.print(&format!("error: {err}"))?;
                return Ok(true);
            }
        };

        let view = self.state.view();
        match command {
            Command::Quit => return Ok(false),
            Command::Help => self.print(HELP)?,
            Command::Show => self.render(&view)?,
            Command::SetApiKey(api_key) => self.dispatch(Msg::ApiKeyChanged(api_key))?,
            Command::SetApiHost(api_host) => self.dispatch(Msg::ApiHostChanged(api_host))?,
            Command::Edit(edit) => match self.form.apply(edit, view.provider) {
                Ok(()) => {
                    let draft = render::render_draft(self.form.draft(), view.provider);
                    self.print(&draft)?;
                }
                Err(err) => self.print(&format!("error: {err}"))?,
            },
            Command::Search if view.is_loading() => {
                self.print("Searching... wait for the current request to finish.")?
            }
            Command::Search => {
                let filters = self.form.draft().clone();
                self.dispatch(Msg::SearchSubmitted(filters))?;
            }
            Command::Next if !view.can_go_next => self.print("No more results.")?,
            Command::Next => self.dispatch(Msg::NextPageClicked)?,
            Command::Previous if !view.can_go_previous => {
                self.print("Already at the first page.")?
            }
            Command::Previous => self.dispatch(Msg::PreviousPageClicked)?,
        }
        Ok(true)
    }

    fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out)?;
        for line in render::render(view) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{text}")?;
        out.flush()
    }
}
