use crate::types::{IncidentRecord, SubjectId};
use serde::{Deserialize, Serialize};

/// Destination of the "view details" action.
pub const REPORTS_PATH: &str = "/reports";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPayload {
    pub record: IncidentRecord,
}

/// Renders a destination elsewhere. The dashboard never inspects what the
/// destination does with the payload.
pub trait Navigator {
    fn navigate(&mut self, path: &str, payload: NavPayload);
}

/// Receives confirmed delete intents. Nothing in the dashboard removes
/// records in response.
pub trait DeleteSink {
    fn delete_confirmed(&mut self, id: SubjectId);
}

/// Records every call instead of acting on it.
#[derive(Debug, Default)]
pub struct Recorded {
    pub navigations: Vec<(String, NavPayload)>,
    pub deletes: Vec<SubjectId>,
}

impl Navigator for Recorded {
    fn navigate(&mut self, path: &str, payload: NavPayload) {
        self.navigations.push((path.to_string(), payload));
    }
}

impl DeleteSink for Recorded {
    fn delete_confirmed(&mut self, id: SubjectId) {
        self.deletes.push(id);
    }
}
