use crate::types::{IncidentId, IncidentRecord};
use serde::{Deserialize, Serialize};

/// Five independent constraints, combined with AND. An empty string is
/// "unset" and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the incident type.
    pub search: String,
    /// Exact `MM-DD-YY` date.
    pub date: String,
    /// Exact reporter name.
    pub reporter: String,
    /// Exact incident type.
    pub incident: String,
    /// Prefix of the date, normally a two-digit month such as "04".
    pub month: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Date,
    Reporter,
    Incident,
    Month,
}

impl FilterCriteria {
    pub fn is_unset(&self) -> bool {
        self.search.is_empty()
            && self.date.is_empty()
            && self.reporter.is_empty()
            && self.incident.is_empty()
            && self.month.is_empty()
    }

    pub fn matches(&self, record: &IncidentRecord) -> bool {
        // lowercasing an empty needle still matches, so search needs no unset check
        record
            .incident
            .to_lowercase()
            .contains(&self.search.to_lowercase())
            && (self.date.is_empty() || record.date == self.date)
            && (self.reporter.is_empty() || record.reporter == self.reporter)
            && (self.incident.is_empty() || record.incident == self.incident)
            && (self.month.is_empty() || record.date.starts_with(&self.month))
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Date => &self.date,
            FilterField::Reporter => &self.reporter,
            FilterField::Incident => &self.incident,
            FilterField::Month => &self.month,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Search => self.search = value,
            FilterField::Date => self.date = value,
            FilterField::Reporter => self.reporter = value,
            FilterField::Incident => self.incident = value,
            FilterField::Month => self.month = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step `field` to the next entry of `options`, treating "unset" as the
    /// slot before the first option. Past the last option it wraps to unset.
    pub fn cycle(&mut self, field: FilterField, options: &[String]) {
        let current = self.get(field);
        let next = if current.is_empty() {
            options.first().cloned().unwrap_or_default()
        } else {
            match options.iter().position(|o| o == current) {
                Some(idx) => options.get(idx + 1).cloned().unwrap_or_default(),
                None => String::new(),
            }
        };
        self.set(field, next);
    }
}

/// Ids of the records that satisfy `criteria`, in source order.
pub fn derive_view<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<IncidentId>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    records
        .into_iter()
        .filter(|r| criteria.matches(r))
        .map(|r| r.id)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Two-digit prefix used by the month filter.
    pub fn code(self) -> String {
        format!("{:02}", self.number())
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Only the exact two-digit form ("04") names a month, since that is the
    /// prefix the filter matches against.
    pub fn from_code(code: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn codes() -> Vec<String> {
        Month::ALL.into_iter().map(Month::code).collect()
    }

    /// Label for the picker, "Select Month" when unset.
    pub fn label(code: &str) -> &'static str {
        if code.is_empty() {
            return "Select Month";
        }
        Month::from_code(code).map(Month::name).unwrap_or("Custom")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, date: &str, incident: &str, reporter: &str) -> IncidentRecord {
        let mut r = IncidentRecord::new(date, "10:00 AM", incident, "Main St", reporter);
        r.id = IncidentId(id);
        r
    }

    fn sample() -> Vec<IncidentRecord> {
        vec![
            record(1, "04-23-34", "Fire", "John Doe"),
            record(2, "04-27-34", "Car Crash", "Jane Smith"),
            record(3, "05-01-34", "Flood", "John Doe"),
        ]
    }

    #[test]
    fn test_unset_criteria_keep_everything_in_order() {
        let records = sample();
        let view = derive_view(&records, &FilterCriteria::default());
        assert_eq!(view, vec![IncidentId(1), IncidentId(2), IncidentId(3)]);
    }

    #[test]
    fn test_month_prefix() {
        let records = sample();
        let criteria = FilterCriteria {
            month: "04".into(),
            ..Default::default()
        };
        assert_eq!(derive_view(&records, &criteria), vec![IncidentId(1), IncidentId(2)]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = sample();
        let criteria = FilterCriteria {
            search: "CRASH".into(),
            ..Default::default()
        };
        assert_eq!(derive_view(&records, &criteria), vec![IncidentId(2)]);

        let criteria = FilterCriteria {
            search: "f".into(),
            ..Default::default()
        };
        assert_eq!(derive_view(&records, &criteria), vec![IncidentId(1), IncidentId(3)]);
    }

    #[test]
    fn test_exact_fields_do_not_partially_match() {
        let records = sample();
        let criteria = FilterCriteria {
            reporter: "John".into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &criteria).is_empty());

        let criteria = FilterCriteria {
            incident: "fire".into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &criteria).is_empty());

        let criteria = FilterCriteria {
            date: "04-23".into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &criteria).is_empty());
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let records = sample();
        let criteria = FilterCriteria {
            reporter: "John Doe".into(),
            month: "05".into(),
            ..Default::default()
        };
        assert_eq!(derive_view(&records, &criteria), vec![IncidentId(3)]);

        let criteria = FilterCriteria {
            reporter: "John Doe".into(),
            incident: "Car Crash".into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &criteria).is_empty());
    }

    #[test]
    fn test_every_single_field_failing_excludes() {
        let r = record(1, "04-23-34", "Fire", "John Doe");
        let matching = FilterCriteria {
            search: "ir".into(),
            date: "04-23-34".into(),
            reporter: "John Doe".into(),
            incident: "Fire".into(),
            month: "04".into(),
        };
        assert!(matching.matches(&r));

        for field in [
            FilterField::Search,
            FilterField::Date,
            FilterField::Reporter,
            FilterField::Incident,
            FilterField::Month,
        ] {
            let mut c = matching.clone();
            c.set(field, "zz");
            assert!(!c.matches(&r), "{:?} should exclude", field);
        }
    }

    #[test]
    fn test_cycle_walks_options_then_wraps_to_unset() {
        let options = vec!["Fire".to_string(), "Car Crash".to_string()];
        let mut c = FilterCriteria::default();
        c.cycle(FilterField::Incident, &options);
        assert_eq!(c.incident, "Fire");
        c.cycle(FilterField::Incident, &options);
        assert_eq!(c.incident, "Car Crash");
        c.cycle(FilterField::Incident, &options);
        assert_eq!(c.incident, "");

        c.incident = "Gone".into();
        c.cycle(FilterField::Incident, &options);
        assert_eq!(c.incident, "");
    }

    #[test]
    fn test_reset_clears_all() {
        let mut c = FilterCriteria {
            search: "a".into(),
            date: "b".into(),
            reporter: "c".into(),
            incident: "d".into(),
            month: "e".into(),
        };
        c.reset();
        assert!(c.is_unset());
    }

    #[test]
    fn test_month_codes_and_labels() {
        assert_eq!(Month::April.code(), "04");
        assert_eq!(Month::from_code("12"), Some(Month::December));
        assert_eq!(Month::from_code("13"), None);
        assert_eq!(Month::label(""), "Select Month");
        assert_eq!(Month::label("01"), "January");
        assert_eq!(Month::codes().len(), 12);
    }

    #[test]
    fn test_single_digit_month_is_not_a_month() {
        assert_eq!(Month::from_code("4"), None);
        assert_eq!(Month::from_code("004"), None);
        assert_eq!(Month::label("4"), "Custom");

        let records = sample();
        let criteria = FilterCriteria {
            month: "4".into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &criteria).is_empty());
    }
}
