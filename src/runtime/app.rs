use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg, TableMsg};
use crate::model::AppModel;
use crate::update::update;

/// Drives an [`AppModel`] from text commands
///
/// Commands run synchronously: results of file and clipboard commands are
/// queued as messages and processed before the next input line.
pub struct Runtime<W: Write> {
    model: AppModel,
    out: W,
    clipboard: Option<arboard::Clipboard>,
    preferences_path: Option<PathBuf>,
    queue: VecDeque<Msg>,
    quit: bool,
}

impl<W: Write> Runtime<W> {
    /// Runtime using the system clipboard and the user's config file
    pub fn new(model: AppModel, out: W) -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::info!("System clipboard unavailable: {}", e);
                None
            }
        };
        Self {
            clipboard,
            preferences_path: crate::config_paths::config_file(),
            ..Self::headless(model, out)
        }
    }

    /// Runtime without the system clipboard that never writes preferences
    pub fn headless(model: AppModel, out: W) -> Self {
        Self {
            model,
            out,
            clipboard: None,
            preferences_path: None,
            queue: VecDeque::new(),
            quit: false,
        }
    }

    /// Write preferences to `path` instead of the default config file
    pub fn with_preferences_path(mut self, path: Option<PathBuf>) -> Self {
        self.preferences_path = path;
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (AppModel, W) {
        (self.model, self.out)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Process one message and everything it triggers
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        self.queue.push_back(msg);
        while let Some(msg) = self.queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd)?;
            }
            if let Some(status) = self.model.status.take() {
                writeln!(self.out, "{}", status).context("Failed to write output")?;
            }
        }
        Ok(())
    }

    /// Parse and process one input line; parse errors are reported, not returned
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        match Msg::parse(line) {
            Ok(Some(msg)) => self.dispatch(msg),
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {}", line, e);
                writeln!(self.out, "error: {}", e).context("Failed to write output")
            }
        }
    }

    /// Process lines until input ends or a quit command runs
    ///
    /// End of input quits, so transactions left open by the input are
    /// committed either way.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            self.run_line(&line)?;
            if self.quit {
                break;
            }
        }
        if !self.quit {
            self.dispatch(Msg::App(AppMsg::Quit))?;
        }
        self.out.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Print(text) => {
                write!(self.out, "{}", text).context("Failed to write output")?;
            }
            Cmd::LoadFile { path } => {
                let result = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))
                    .map_err(|e| format!("{:#}", e));
                self.queue
                    .push_back(Msg::App(AppMsg::FileLoaded { path, result }));
            }
            Cmd::SaveFile { path, content } => {
                let result = std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))
                    .map_err(|e| format!("{:#}", e));
                self.queue
                    .push_back(Msg::App(AppMsg::SaveCompleted { path, result }));
            }
            Cmd::SetClipboard(text) => {
                if let Some(clipboard) = self.clipboard.as_mut() {
                    if let Err(e) = clipboard.set_text(text) {
                        tracing::warn!("Failed to set clipboard: {}", e);
                    }
                }
            }
            Cmd::ReadClipboard => {
                let system = self
                    .clipboard
                    .as_mut()
                    .and_then(|clipboard| match clipboard.get_text() {
                        Ok(text) => Some(text),
                        Err(e) => {
                            tracing::debug!("Failed to read clipboard: {}", e);
                            None
                        }
                    });
                let text = system.or_else(|| self.model.clipboard.clone());
                match text {
                    Some(text) => self
                        .queue
                        .push_back(Msg::Table(TableMsg::Paste(Some(text)))),
                    None => self.model.set_status("Clipboard is empty"),
                }
            }
            Cmd::SavePreferences => {
                if let Some(path) = &self.preferences_path {
                    if let Err(e) = self.model.preferences.save_to(path) {
                        tracing::warn!("{}", e);
                    }
                }
            }
            Cmd::Quit => self.quit = true,
        }
        Ok(())
    }
}
