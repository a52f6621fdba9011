use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable record identifier, assigned by the store when records are loaded.
/// `IncidentId(0)` means "not yet assigned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    Done,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Done,
            Status::Done => Status::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Written by `list --json`; never read back from a dataset.
    #[serde(default, skip_deserializing)]
    pub id: IncidentId,
    /// `MM-DD-YY`, compared as text by the date and month filters.
    pub date: String,
    pub time: String,
    /// Category label such as "Fire" or "Car Crash".
    pub incident: String,
    pub location: String,
    pub reporter: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image: String,
}

impl IncidentRecord {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        incident: impl Into<String>,
        location: impl Into<String>,
        reporter: impl Into<String>,
    ) -> Self {
        Self {
            id: IncidentId::default(),
            date: date.into(),
            time: time.into(),
            incident: incident.into(),
            location: location.into(),
            reporter: reporter.into(),
            status: Status::Pending,
            icon: String::new(),
            image: String::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_media(mut self, icon: impl Into<String>, image: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.image = image.into();
        self
    }

    /// "FIRE ACCIDENT", as shown in the detail modal heading.
    pub fn headline(&self) -> String {
        format!("{} ACCIDENT", self.incident.to_uppercase())
    }

    pub fn date_time(&self) -> String {
        format!("{} - {}", self.date, self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub u64);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered person that can be targeted by the delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub first_name: String,
    pub last_name: String,
    pub locality: String,
}

impl Subject {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
