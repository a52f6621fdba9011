use crate::navigation::{NavPayload, Navigator, REPORTS_PATH};
use crate::store::IncidentStore;
use crate::types::{IncidentId, IncidentRecord};

/// Detail modal state: closed, or open on exactly one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailModal {
    #[default]
    Closed,
    Open(IncidentId),
}

impl DetailModal {
    pub fn is_open(&self) -> bool {
        matches!(self, DetailModal::Open(_))
    }

    pub fn held(&self) -> Option<IncidentId> {
        match self {
            DetailModal::Open(id) => Some(*id),
            DetailModal::Closed => None,
        }
    }

    /// Opens on `id`, replacing whatever was held.
    pub fn open(&mut self, id: IncidentId) {
        *self = DetailModal::Open(id);
    }

    pub fn close(&mut self) {
        *self = DetailModal::Closed;
    }

    pub fn record<'s>(&self, store: &'s IncidentStore) -> Option<&'s IncidentRecord> {
        self.held().and_then(|id| store.get(id))
    }

    /// Hands a snapshot of the held record to the navigator and closes.
    /// Returns false (and stays as-is) when nothing is held.
    pub fn view_details(&mut self, store: &IncidentStore, navigator: &mut dyn Navigator) -> bool {
        let Some(record) = self.record(store).cloned() else {
            return false;
        };
        navigator.navigate(REPORTS_PATH, NavPayload { record });
        self.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Recorded;

    fn store() -> IncidentStore {
        IncidentStore::from_records(vec![
            IncidentRecord::new("04-23-34", "10:00 AM", "Fire", "123 Main St", "John Doe"),
            IncidentRecord::new("04-27-34", "02:00 PM", "Car Crash", "456 Elm St", "Jane Smith"),
        ])
    }

    #[test]
    fn test_open_then_close() {
        let mut modal = DetailModal::default();
        modal.open(IncidentId(1));
        assert!(modal.is_open());
        modal.close();
        assert_eq!(modal, DetailModal::Closed);
        assert_eq!(modal.held(), None);
    }

    #[test]
    fn test_second_open_replaces_held_record() {
        let s = store();
        let mut modal = DetailModal::default();
        modal.open(IncidentId(1));
        modal.open(IncidentId(2));
        assert_eq!(modal.record(&s).unwrap().incident, "Car Crash");
    }

    #[test]
    fn test_view_details_navigates_and_closes() {
        let s = store();
        let mut nav = Recorded::default();
        let mut modal = DetailModal::Open(IncidentId(1));

        assert!(modal.view_details(&s, &mut nav));
        assert_eq!(modal, DetailModal::Closed);
        assert_eq!(nav.navigations.len(), 1);
        let (path, payload) = &nav.navigations[0];
        assert_eq!(path, REPORTS_PATH);
        assert_eq!(payload.record.reporter, "John Doe");
    }

    #[test]
    fn test_view_details_when_closed_is_noop() {
        let s = store();
        let mut nav = Recorded::default();
        let mut modal = DetailModal::Closed;
        assert!(!modal.view_details(&s, &mut nav));
        assert!(nav.navigations.is_empty());
    }
}
