use crate::metrics;
use crate::state::{Screen, Shell, UiEvent};
use crate::tui::keys::{InputMode, TuiAction};
use std::time::Instant;
use watchdesk_core::{
    Dataset, DashboardState, FilterCriteria, FilterField, Intent, LoadError, Outcome,
};

const NOTIFICATION_SECS: u64 = 3;

pub struct TuiApp {
    pub dashboard: DashboardState,
    pub shell: Shell,
    pub source_label: String,
    pub selected_row: usize,
    /// Text being typed while the search box has focus.
    pub search_input: Option<String>,
    pub show_help: bool,
    pub notification: Option<(String, Instant)>,
}

impl TuiApp {
    pub fn new(initial: FilterCriteria, source_label: String) -> Self {
        Self {
            dashboard: DashboardState::new(initial),
            shell: Shell::new(),
            source_label,
            selected_row: 0,
            search_input: None,
            show_help: false,
            notification: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        if matches!(self.shell.screen, Screen::Report(_)) {
            InputMode::Report
        } else if self.dashboard.delete_prompt().visible {
            InputMode::ConfirmDelete
        } else if self.search_input.is_some() {
            InputMode::Search
        } else if self.dashboard.modal().is_open() {
            InputMode::Detail
        } else {
            InputMode::Table
        }
    }

    /// Applies an intent to the dashboard with the shell as collaborator.
    pub fn send(&mut self, intent: Intent) -> Outcome {
        let outcome = self.dashboard.update(intent, &mut self.shell);
        self.after(&outcome);
        outcome
    }

    pub fn on_loaded(&mut self, result: Result<Dataset, LoadError>) {
        match &result {
            Ok(d) => self.shell.push_event(UiEvent::Loaded { records: d.records.len() }),
            Err(e) => {
                metrics::record_load_failure();
                self.shell.push_event(UiEvent::LoadFailed(e.to_string()));
            }
        }
        self.send(Intent::Loaded(result));
    }

    fn after(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::StatusChanged(id, status) => {
                metrics::record_status_toggle(*status);
                self.shell.push_event(UiEvent::StatusToggled { id: *id, status: *status });
            }
            Outcome::DeleteConfirmed => {
                self.notify("Delete request sent");
            }
            Outcome::Rejected(e) => {
                self.shell.push_event(UiEvent::Error(e.to_string()));
            }
            Outcome::ViewChanged | Outcome::Navigated | Outcome::Unchanged => {}
        }
        metrics::record_view(self.dashboard.view_len(), self.dashboard.store().len());
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.view_len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some((message.into(), Instant::now()));
    }

    pub fn expire_notification(&mut self) {
        if let Some((_, at)) = &self.notification {
            if at.elapsed().as_secs() >= NOTIFICATION_SECS {
                self.notification = None;
            }
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.dashboard.view_len();
        if len > 0 {
            self.selected_row = (self.selected_row + 1) % len;
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_action(&mut self, action: TuiAction) -> bool {
        match action {
            TuiAction::Quit => return true,
            TuiAction::MoveSelectionUp => self.move_selection_up(),
            TuiAction::MoveSelectionDown => self.move_selection_down(),
            TuiAction::OpenDetail => {
                if let Ok(id) = self.dashboard.id_at_row(self.selected_row) {
                    self.send(Intent::OpenDetail(id));
                }
            }
            TuiAction::CloseDetail => {
                self.send(Intent::CloseDetail);
            }
            TuiAction::ViewDetails => {
                self.send(Intent::ViewDetails);
            }
            TuiAction::ToggleStatus => match self.dashboard.id_at_row(self.selected_row) {
                Ok(id) => {
                    self.send(Intent::ToggleStatus(id));
                }
                Err(e) => tracing::debug!("Nothing to toggle: {}", e),
            },
            TuiAction::BeginSearch => {
                self.search_input = Some(self.dashboard.criteria().search.clone());
            }
            TuiAction::SearchChar(c) => {
                if let Some(buf) = self.search_input.as_mut() {
                    buf.push(c);
                    let value = buf.clone();
                    self.send(Intent::SetFilter(FilterField::Search, value));
                }
            }
            TuiAction::SearchBackspace => {
                if let Some(buf) = self.search_input.as_mut() {
                    buf.pop();
                    let value = buf.clone();
                    self.send(Intent::SetFilter(FilterField::Search, value));
                }
            }
            TuiAction::SearchCommit => {
                self.search_input = None;
            }
            TuiAction::SearchCancel => {
                self.search_input = None;
                self.send(Intent::SetFilter(FilterField::Search, String::new()));
            }
            TuiAction::CycleMonth => {
                self.send(Intent::CycleFilter(FilterField::Month));
            }
            TuiAction::CycleDate => {
                self.send(Intent::CycleFilter(FilterField::Date));
            }
            TuiAction::CycleReporter => {
                self.send(Intent::CycleFilter(FilterField::Reporter));
            }
            TuiAction::CycleIncident => {
                self.send(Intent::CycleFilter(FilterField::Incident));
            }
            TuiAction::ResetFilters => {
                self.send(Intent::ResetFilters);
                self.shell.push_event(UiEvent::FiltersReset);
            }
            TuiAction::RequestDelete => {
                let reporter = self
                    .dashboard
                    .id_at_row(self.selected_row)
                    .ok()
                    .and_then(|id| self.dashboard.store().get(id))
                    .map(|r| r.reporter.clone());
                if let Some(reporter) = reporter {
                    let target = self.dashboard.subject_for_reporter(&reporter).cloned();
                    if target.is_none() {
                        tracing::debug!("No registered user named {}", reporter);
                    }
                    self.send(Intent::RequestDelete(target));
                }
            }
            TuiAction::ConfirmDelete => {
                self.send(Intent::ConfirmDelete);
            }
            TuiAction::CancelDelete => {
                self.send(Intent::CancelDelete);
                self.shell.push_event(UiEvent::DeleteCancelled);
            }
            TuiAction::DismissError => {
                self.send(Intent::DismissLoadError);
            }
            TuiAction::BackToDashboard => self.shell.back_to_dashboard(),
            TuiAction::ToggleHelp => self.show_help = !self.show_help,
        }
        false
    }
}
