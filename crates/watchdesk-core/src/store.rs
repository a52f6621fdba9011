use crate::error::StoreError;
use crate::filter::FilterField;
use crate::types::{IncidentId, IncidentRecord, Status};

/// Source list of incident records, in load order.
#[derive(Debug, Default, Clone)]
pub struct IncidentStore {
    records: Vec<IncidentRecord>,
    next_id: u64,
}

impl IncidentStore {
    pub fn from_records(records: Vec<IncidentRecord>) -> Self {
        let mut s = Self::default();
        for r in records {
            s.push(r);
        }
        s
    }

    /// Appends a record under the next free id. Any id the record carried is
    /// replaced.
    pub fn push(&mut self, mut record: IncidentRecord) -> IncidentId {
        self.next_id += 1;
        let id = IncidentId(self.next_id);
        record.id = id;
        self.records.push(record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncidentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn get(&self, id: IncidentId) -> Option<&IncidentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Flips the status of one record and returns the new status.
    pub fn toggle_status(&mut self, id: IncidentId) -> Result<Status, StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::UnknownIncident(id))?;
        record.status = record.status.toggled();
        tracing::debug!("Incident {} is now {}", id, record.status);
        Ok(record.status)
    }

    pub fn count_status(&self, status: Status) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Distinct values of a record field in first-seen order, used to feed
    /// the filter pickers. Month yields the two-digit prefixes present.
    pub fn distinct(&self, field: FilterField) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for r in &self.records {
            let value = match field {
                FilterField::Search | FilterField::Incident => r.incident.clone(),
                FilterField::Date => r.date.clone(),
                FilterField::Reporter => r.reporter.clone(),
                FilterField::Month => r.date.chars().take(2).collect(),
            };
            if !value.is_empty() && !out.contains(&value) {
                out.push(value);
            }
        }
        out
    }
}
