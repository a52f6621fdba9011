use crate::error::LoadError;
use crate::summary::StatCard;
use crate::types::{IncidentRecord, Subject, SubjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Everything a data source hands to the dashboard at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub summary: Vec<StatCard>,
    pub records: Vec<IncidentRecord>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub trait RecordSource {
    fn fetch_dataset(&self) -> impl Future<Output = Result<Dataset, LoadError>> + Send;
}

/// Built-in data set used when no file is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
    pub fn dataset() -> Dataset {
        Dataset {
            summary: vec![
                StatCard::new("Total Reports", 123, Decimal::new(85, 1), "yesterday"),
                StatCard::new("Total Users", 456, Decimal::new(13, 1), "past week"),
                StatCard::new("Total Alerts", 789, Decimal::new(-43, 1), "yesterday"),
                StatCard::new("Pending Alerts", 101, Decimal::new(18, 1), "yesterday"),
            ],
            records: vec![
                IncidentRecord::new("04-23-34", "10:00 AM", "Fire", "123 Main St", "John Doe")
                    .with_media("fire", "accidentimage.png"),
                IncidentRecord::new("04-27-34", "02:00 PM", "Car Crash", "456 Elm St", "Jane Smith")
                    .with_media("car", "accidentimage.png"),
            ],
            subjects: vec![
                Subject {
                    id: SubjectId(1),
                    first_name: "John".into(),
                    last_name: "Doe".into(),
                    locality: "Poblacion".into(),
                },
                Subject {
                    id: SubjectId(2),
                    first_name: "Jane".into(),
                    last_name: "Smith".into(),
                    locality: "San Roque".into(),
                },
            ],
        }
    }
}

impl RecordSource for MockSource {
    async fn fetch_dataset(&self) -> Result<Dataset, LoadError> {
        Ok(Self::dataset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_yields_fixed_records() {
        let dataset = MockSource.fetch_dataset().await.unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].incident, "Fire");
        assert_eq!(dataset.records[1].date, "04-27-34");
        assert_eq!(dataset.summary.len(), 4);
        assert_eq!(dataset.summary[2].trend.describe(), "4.3% Down from yesterday");
    }

    #[test]
    fn test_from_json_requires_records() {
        let ok = Dataset::from_json(r#"{"records": []}"#).unwrap();
        assert!(ok.records.is_empty());
        assert!(ok.summary.is_empty());

        let err = Dataset::from_json(r#"{"summary": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
