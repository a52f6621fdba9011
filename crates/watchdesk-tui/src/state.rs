use crate::tui::widgets::EventColor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use watchdesk_core::{DeleteSink, IncidentId, IncidentRecord, NavPayload, Navigator, Status, SubjectId, REPORTS_PATH};

const EVENT_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub enum UiEvent {
    Loaded { records: usize },
    LoadFailed(String),
    StatusToggled { id: IncidentId, status: Status },
    FiltersReset,
    DetailsOpened { id: IncidentId },
    DeleteRequested { subject: SubjectId },
    DeleteCancelled,
    Error(String),
}

impl UiEvent {
    pub fn text(&self) -> String {
        match self {
            UiEvent::Loaded { records } => format!("Loaded {} reports", records),
            UiEvent::LoadFailed(msg) => format!("Load failed: {}", msg),
            UiEvent::StatusToggled { id, status } => format!("Report {} marked {}", id, status),
            UiEvent::FiltersReset => "Filters reset".to_string(),
            UiEvent::DetailsOpened { id } => format!("Viewing details of report {}", id),
            UiEvent::DeleteRequested { subject } => format!("Delete requested for user {}", subject),
            UiEvent::DeleteCancelled => "Delete cancelled".to_string(),
            UiEvent::Error(msg) => msg.clone(),
        }
    }

    pub fn color(&self) -> EventColor {
        match self {
            UiEvent::LoadFailed(_) | UiEvent::Error(_) => EventColor::Error,
            UiEvent::DeleteRequested { .. } => EventColor::Warning,
            UiEvent::Loaded { .. } | UiEvent::DetailsOpened { .. } => EventColor::Info,
            _ => EventColor::Normal,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UiEventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event: UiEvent,
}

/// Which full screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Report(IncidentRecord),
}

/// Front-end side of the dashboard: the current screen and the event log.
/// Plays the navigator and delete-sink roles for the core state.
pub struct Shell {
    pub screen: Screen,
    event_log: VecDeque<UiEventLogEntry>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            screen: Screen::Dashboard,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    pub fn push_event(&mut self, event: UiEvent) {
        if self.event_log.len() >= EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(UiEventLogEntry {
            timestamp: Utc::now(),
            event,
        });
    }

    /// Most recent `limit` events, oldest first.
    pub fn recent_events(&self, limit: usize) -> Vec<UiEventLogEntry> {
        let skip = self.event_log.len().saturating_sub(limit);
        self.event_log.iter().skip(skip).cloned().collect()
    }

    pub fn back_to_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
    }
}

impl Navigator for Shell {
    fn navigate(&mut self, path: &str, payload: NavPayload) {
        if path != REPORTS_PATH {
            tracing::warn!("No screen for path {}", path);
            self.push_event(UiEvent::Error(format!("Unknown destination {}", path)));
            return;
        }
        tracing::info!("Navigating to {} for report {}", path, payload.record.id);
        self.push_event(UiEvent::DetailsOpened { id: payload.record.id });
        self.screen = Screen::Report(payload.record);
    }
}

impl DeleteSink for Shell {
    fn delete_confirmed(&mut self, id: SubjectId) {
        tracing::info!("Delete confirmed for user {}", id);
        crate::metrics::record_delete_requested();
        self.push_event(UiEvent::DeleteRequested { subject: id });
    }
}
