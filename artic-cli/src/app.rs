//! Interactive event loop.
//!
//! Two event sources feed one owner of the [`BrowseSession`]: lines typed at the
//! prompt, and finished fetches coming back over a channel. Each fetch runs in
//! its own task; starting a new navigation cancels the previous task, and the
//! session's generation check drops anything that still slips through.

use std::io::Write;
use std::sync::Arc;

use artic_lib::error::Error;
use artic_lib::error::ValidationError;
use artic_lib::fetcher::PageFetcher;
use artic_lib::model::ArtworkId;
use artic_lib::model::Page;
use artic_lib::navigation::PageRequest;
use artic_lib::navigation::Resolution;
use artic_lib::session::BrowseSession;
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::Clear;
use crossterm::terminal::ClearType;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::command::Command;
use crate::command::HELP;
use crate::command::RowRef;
use crate::error::CliError;
use crate::render::render_paginator;
use crate::render::render_table;

/// Terminal width used when the real one cannot be read.
const FALLBACK_WIDTH: usize = 120;

/// A finished fetch, tagged with the generation that issued it.
#[derive(Debug)]
pub struct Fetched {
    pub generation: u64,
    pub result: Result<Page, Error>,
}

/// Whether the loop should keep going after an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    fetcher: Arc<dyn PageFetcher>,
    session: BrowseSession,
    /// Blocking notice; the next input line only dismisses it.
    alert: Option<String>,
    /// Informational line shown under the table until the next input.
    notice: Option<String>,
    in_flight: Option<CancellationToken>,
    results_tx: mpsc::UnboundedSender<Fetched>,
    results_rx: mpsc::UnboundedReceiver<Fetched>,
}

impl App {
    pub fn new(fetcher: Arc<dyn PageFetcher>, session: BrowseSession) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            session,
            alert: None,
            notice: None,
            in_flight: None,
            results_tx,
            results_rx,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    #[cfg(test)]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Runs until `quit` or end of input.
    pub async fn run(mut self) -> Result<(), CliError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let request = self.session.navigation_mut().reload();
        self.dispatch(request);
        self.draw()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if self.on_input(&line) == Flow::Quit {
                        break;
                    }
                }
                Some(fetched) = self.results_rx.recv() => {
                    self.on_fetched(fetched);
                }
            }
            self.draw()?;
        }

        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        Ok(())
    }

    /// Handles one line typed at the prompt.
    pub fn on_input(&mut self, line: &str) -> Flow {
        if self.alert.take().is_some() {
            return Flow::Continue;
        }
        self.notice = None;

        if line.trim().is_empty() {
            return Flow::Continue;
        }

        match line.parse::<Command>() {
            Ok(command) => self.on_command(command),
            Err(e) => {
                self.notice = Some(e.to_string());
                Flow::Continue
            }
        }
    }

    /// Applies a finished fetch.
    pub fn on_fetched(&mut self, fetched: Fetched) -> Resolution {
        let resolution = self.session.page_resolved(fetched.generation, fetched.result);
        if resolution != Resolution::Stale {
            self.in_flight = None;
        }
        resolution
    }

    /// Waits for the next finished fetch.
    #[cfg(test)]
    pub async fn next_fetched(&mut self) -> Option<Fetched> {
        self.results_rx.recv().await
    }

    fn on_command(&mut self, command: Command) -> Flow {
        let request = match command {
            Command::Quit => return Flow::Quit,
            Command::Next => self.session.navigation_mut().next(),
            Command::Previous => self.session.navigation_mut().previous(),
            Command::First => self.session.navigation_mut().first(),
            Command::Last => self.session.navigation_mut().last(),
            Command::Reload => Some(self.session.navigation_mut().reload()),
            Command::Page(page) => self.validated(|s| s.navigation_mut().go_to(page)),
            Command::Rows(size) => self.validated(|s| s.navigation_mut().set_page_size(size)),
            Command::Toggle(refs) => {
                self.toggle(&refs);
                None
            }
            Command::SelectPage => {
                self.session.select_page();
                None
            }
            Command::DeselectPage => {
                self.session.deselect_page();
                None
            }
            Command::SelectFirst(input) => {
                match self.session.bulk_select(&input) {
                    Ok(added) => self.notice = Some(format!("Selected {} more rows", added)),
                    Err(e) => self.alert = Some(e.to_string()),
                }
                None
            }
            Command::ClearSelection => {
                self.session.clear_selection();
                None
            }
            Command::ListSelected => {
                let ids = self.session.selection().sorted_ids();
                self.notice = Some(if ids.is_empty() {
                    "Nothing selected".to_string()
                } else {
                    format!(
                        "Selected ids: {}",
                        ids.iter().map(ArtworkId::to_string).collect::<Vec<_>>().join(", ")
                    )
                });
                None
            }
            Command::Help => {
                self.notice = Some(HELP.to_string());
                None
            }
        };

        if let Some(request) = request {
            self.dispatch(request);
        }
        Flow::Continue
    }

    fn validated(
        &mut self,
        f: impl FnOnce(&mut BrowseSession) -> Result<PageRequest, ValidationError>,
    ) -> Option<PageRequest> {
        match f(&mut self.session) {
            Ok(request) => Some(request),
            Err(e) => {
                self.alert = Some(e.to_string());
                None
            }
        }
    }

    /// Toggles every referenced row, or none if any reference misses the page.
    fn toggle(&mut self, refs: &[RowRef]) {
        let records = self.session.navigation().records();
        let resolved: Result<Vec<ArtworkId>, ValidationError> = refs
            .iter()
            .map(|row| {
                let found = match *row {
                    RowRef::Id(id) => records.iter().find(|r| r.id == id),
                    RowRef::Position(n) => records.get(n - 1),
                };
                found
                    .map(|r| r.id)
                    .ok_or_else(|| ValidationError::unknown_row(n_or_id(row)))
            })
            .collect();

        let ids = match resolved {
            Ok(ids) => ids,
            Err(e) => {
                self.alert = Some(e.to_string());
                return;
            }
        };

        for id in ids {
            if let Err(e) = self.session.toggle(id) {
                self.alert = Some(e.to_string());
                return;
            }
        }
    }

    /// Spawns the fetch for `request`, cancelling the one before it.
    fn dispatch(&mut self, request: PageRequest) {
        if let Some(previous) = self.in_flight.replace(CancellationToken::new()) {
            previous.cancel();
        }
        let Some(token) = self.in_flight.clone() else { return };

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.results_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("fetch for generation {} cancelled", request.generation);
                }
                result = fetcher.fetch_page(request.query) => {
                    let _ = tx.send(Fetched { generation: request.generation, result });
                }
            }
        });
    }

    fn draw(&self) -> Result<(), CliError> {
        let width = crossterm::terminal::size()
            .map(|(w, _)| usize::from(w))
            .unwrap_or(FALLBACK_WIDTH);
        let view = self.session.view();
        let mut out = std::io::stdout();

        crossterm::queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(out, "Selected (across visited pages): {}", view.selected_count)?;
        if let Some(error) = &view.error {
            writeln!(out, "{}", format!("Error: {}", error).red())?;
        }
        writeln!(out)?;

        for line in render_table(&view, width) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", render_paginator(&view).dim())?;

        if let Some(notice) = &self.notice {
            writeln!(out, "{}", notice)?;
        }
        match &self.alert {
            Some(alert) => write!(out, "{} (Enter to dismiss) ", alert.as_str().yellow().bold())?,
            None => write!(out, "{}", "> ".bold())?,
        }
        out.flush()?;
        Ok(())
    }
}

fn n_or_id(row: &RowRef) -> String {
    match row {
        RowRef::Position(n) => n.to_string(),
        RowRef::Id(id) => format!("#{}", id),
    }
}
