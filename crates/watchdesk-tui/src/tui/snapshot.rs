use crate::state::UiEventLogEntry;
use crate::tui::app::TuiApp;
use watchdesk_core::{confirm_dialog, FilterCriteria, IncidentId, IncidentRecord, LoadState, Month, StatCard, Status};

/// Everything one frame needs, read out of the app before drawing.
#[derive(Clone)]
pub struct UiSnapshot {
    pub source: String,
    pub load: LoadState,
    pub cards: Vec<StatCard>,
    pub rows: Vec<ReportRow>,
    pub total_records: usize,
    pub pending_in_view: usize,
    pub filters: FilterLabels,
    pub searching: bool,
    pub detail: Option<IncidentRecord>,
    pub dialog: Option<DialogView>,
    pub events: Vec<UiEventLogEntry>,
}

#[derive(Clone)]
pub struct ReportRow {
    pub id: IncidentId,
    pub icon: &'static str,
    pub incident: String,
    pub location: String,
    pub date_time: String,
    pub reporter: String,
    pub status: Status,
}

#[derive(Clone)]
pub struct FilterLabels {
    pub search: String,
    pub month: String,
    pub date: String,
    pub reporter: String,
    pub incident: String,
}

#[derive(Clone)]
pub struct DialogView {
    pub heading: &'static str,
    pub lines: Vec<String>,
    pub actions: [&'static str; 2],
}

impl UiSnapshot {
    pub fn from_app(app: &TuiApp, event_limit: usize) -> Self {
        let dashboard = &app.dashboard;
        let rows: Vec<ReportRow> = dashboard.view().map(ReportRow::from_record).collect();
        let pending_in_view = rows.iter().filter(|r| r.status == Status::Pending).count();

        let prompt = dashboard.delete_prompt();
        let dialog = confirm_dialog(prompt.visible, prompt.target.as_ref(), |_| {}, || {}).map(|d| DialogView {
            heading: d.heading(),
            lines: d.lines(),
            actions: d.actions(),
        });

        let search = match &app.search_input {
            Some(buf) => buf.clone(),
            None => dashboard.criteria().search.clone(),
        };

        Self {
            source: app.source_label.clone(),
            load: dashboard.load_state().clone(),
            cards: dashboard.summary().to_vec(),
            rows,
            total_records: dashboard.store().len(),
            pending_in_view,
            filters: FilterLabels::new(dashboard.criteria(), search),
            searching: app.search_input.is_some(),
            detail: dashboard.detail_record().cloned(),
            dialog,
            events: app.shell.recent_events(event_limit),
        }
    }
}

impl ReportRow {
    fn from_record(record: &IncidentRecord) -> Self {
        Self {
            id: record.id,
            icon: icon_glyph(&record.icon, &record.incident),
            incident: record.incident.clone(),
            location: record.location.clone(),
            date_time: record.date_time(),
            reporter: record.reporter.clone(),
            status: record.status,
        }
    }
}

impl FilterLabels {
    fn new(criteria: &FilterCriteria, search: String) -> Self {
        let or_any = |v: &str| if v.is_empty() { "Any".to_string() } else { v.to_string() };
        Self {
            search,
            month: Month::label(&criteria.month).to_string(),
            date: or_any(&criteria.date),
            reporter: or_any(&criteria.reporter),
            incident: or_any(&criteria.incident),
        }
    }
}

/// Terminal stand-in for the incident icon asset.
pub fn icon_glyph(icon: &str, incident: &str) -> &'static str {
    let key = if icon.is_empty() { incident } else { icon };
    match key.to_lowercase().as_str() {
        "fire" => "🔥",
        "car" | "car crash" => "🚗",
        "flood" => "🌊",
        _ => "•",
    }
}
