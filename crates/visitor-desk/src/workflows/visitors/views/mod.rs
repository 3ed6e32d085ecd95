//! Derived views over a snapshot of the visitor collection.
//!
//! Every function here is pure: it reads the records it is given and never mutates them.
//! Ordering always follows the collection (newest-first).

mod export;
mod summary;

pub use export::write_log_csv;
pub use summary::{DeskDashboard, PendingRequestView, VisitorLogEntryView};

use chrono::FixedOffset;
use serde::Serialize;

use super::domain::{FilterCriteria, VisitorRecord, VisitorStatus};

/// Counts of records by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisitorStats {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl VisitorStats {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

pub fn stats(records: &[VisitorRecord]) -> VisitorStats {
    records
        .iter()
        .fold(VisitorStats::default(), |mut stats, record| {
            match record.status {
                VisitorStatus::Pending => stats.pending += 1,
                VisitorStatus::Approved => stats.approved += 1,
                VisitorStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
}

pub fn pending_queue(records: &[VisitorRecord]) -> Vec<&VisitorRecord> {
    records.iter().filter(|record| record.is_pending()).collect()
}

/// Records satisfying every clause of `criteria`.
///
/// The date clause compares against the calendar date of `time_in` as seen from
/// `display_offset`, so a visitor arriving at 23:30 UTC lands on the next day for a
/// desk running at UTC+01:00.
pub fn filtered_log<'a>(
    records: &'a [VisitorRecord],
    criteria: &FilterCriteria,
    display_offset: FixedOffset,
) -> Vec<&'a VisitorRecord> {
    let needle = criteria.search_text.to_lowercase();

    records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| criteria.status_filter.matches(record.status))
        .filter(|record| match criteria.date_filter {
            Some(date) => record.time_in.with_timezone(&display_offset).date_naive() == date,
            None => true,
        })
        .collect()
}

fn matches_search(record: &VisitorRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [&record.full_name, &record.company, &record.phone]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::visitors::domain::{StatusFilter, VisitorId};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, hour, minute, 0)
            .single()
            .expect("valid instant")
    }

    fn record(
        id: &str,
        name: &str,
        company: &str,
        phone: &str,
        status: VisitorStatus,
    ) -> VisitorRecord {
        let decided = status != VisitorStatus::Pending;
        VisitorRecord {
            id: VisitorId(id.to_string()),
            full_name: name.to_string(),
            is_staff: false,
            company: company.to_string(),
            phone: phone.to_string(),
            purpose: String::new(),
            time_in: at(9, 0),
            status,
            time_decided: decided.then(|| at(9, 30)),
            decided_by: if decided {
                "Mr. Adeyemi".to_string()
            } else {
                String::new()
            },
        }
    }

    fn collection() -> Vec<VisitorRecord> {
        vec![
            record(
                "VMS-1003",
                "Ada Obi",
                "Northwind",
                "0800 123",
                VisitorStatus::Pending,
            ),
            record(
                "VMS-1002",
                "Mary Johnson",
                "Able Health Clinic",
                "555-0144",
                VisitorStatus::Approved,
            ),
            record(
                "VMS-1001",
                "John Doe",
                "XYZ Ltd",
                "555-0182",
                VisitorStatus::Rejected,
            ),
        ]
    }

    fn ids(records: &[&VisitorRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.0.clone()).collect()
    }

    #[test]
    fn stats_sum_to_collection_size() {
        let records = collection();
        let stats = stats(&records);
        assert_eq!(
            stats,
            VisitorStats {
                pending: 1,
                approved: 1,
                rejected: 1
            }
        );
        assert_eq!(stats.total(), records.len());
        assert_eq!(super::stats(&[]).total(), 0);
    }

    #[test]
    fn pending_queue_keeps_only_pending_records() {
        let mut records = collection();
        records.push(record(
            "VMS-0999",
            "Late Entry",
            "",
            "",
            VisitorStatus::Pending,
        ));
        let queue = pending_queue(&records);
        assert_eq!(ids(&queue), vec!["VMS-1003", "VMS-0999"]);
    }

    #[test]
    fn default_criteria_returns_entire_collection_in_order() {
        let records = collection();
        let utc = FixedOffset::east_opt(0).expect("utc");
        let log = filtered_log(&records, &FilterCriteria::default(), utc);
        assert_eq!(ids(&log), vec!["VMS-1003", "VMS-1002", "VMS-1001"]);
    }

    #[test]
    fn search_is_case_insensitive_across_name_company_and_phone() {
        let records = collection();
        let utc = FixedOffset::east_opt(0).expect("utc");

        let by_name = filtered_log(&records, &FilterCriteria::default().search("JOHN"), utc);
        assert_eq!(ids(&by_name), vec!["VMS-1002", "VMS-1001"]);

        let by_company =
            filtered_log(&records, &FilterCriteria::default().search("clinic"), utc);
        assert_eq!(ids(&by_company), vec!["VMS-1002"]);

        let by_phone = filtered_log(&records, &FilterCriteria::default().search("0800"), utc);
        assert_eq!(ids(&by_phone), vec!["VMS-1003"]);
    }

    #[test]
    fn status_filter_narrows_to_matching_records() {
        let records = vec![
            record("VMS-1002", "Approved One", "", "", VisitorStatus::Approved),
            record("VMS-1001", "Pending One", "", "", VisitorStatus::Pending),
        ];
        let log = filtered_log(
            &records,
            &FilterCriteria::default().status(StatusFilter::Approved),
            FixedOffset::east_opt(0).expect("utc"),
        );
        assert_eq!(ids(&log), vec!["VMS-1002"]);
    }

    #[test]
    fn date_filter_uses_display_offset() {
        let mut late = record(
            "VMS-2001",
            "Night Courier",
            "",
            "",
            VisitorStatus::Pending,
        );
        late.time_in = at(23, 30);
        let records = vec![late];

        let march_4 = NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date");
        let march_5 = NaiveDate::from_ymd_opt(2025, 3, 5).expect("valid date");
        let utc = FixedOffset::east_opt(0).expect("utc");
        let lagos = FixedOffset::east_opt(3600).expect("utc+1");

        let on_march_4 = FilterCriteria::default().on(march_4);
        let on_march_5 = FilterCriteria::default().on(march_5);
        assert_eq!(filtered_log(&records, &on_march_4, utc).len(), 1);
        assert!(filtered_log(&records, &on_march_4, lagos).is_empty());
        assert_eq!(filtered_log(&records, &on_march_5, lagos).len(), 1);
    }

    #[test]
    fn unmatched_criteria_yield_empty_log() {
        let records = collection();
        let criteria = FilterCriteria::default()
            .search("nobody")
            .status(StatusFilter::Pending);
        let utc = FixedOffset::east_opt(0).expect("utc");
        assert!(filtered_log(&records, &criteria, utc).is_empty());
    }
}
