use std::io::Write;

use serde::Serialize;

use super::summary::VisitorLogEntryView;

const LOG_CSV_HEADER: [&str; 9] = [
    "Visitor ID",
    "Full Name",
    "Type",
    "Company",
    "Phone",
    "Status",
    "Time In",
    "Decided By",
    "Time Decided",
];

/// Serialized in `LOG_CSV_HEADER` column order.
#[derive(Debug, Serialize)]
struct LogCsvRow<'a> {
    id: &'a str,
    full_name: &'a str,
    identity: &'a str,
    company: &'a str,
    phone: &'a str,
    status: &'a str,
    time_in: String,
    decided_by: &'a str,
    time_decided: String,
}

/// Write the visitor log as CSV with a header row, even when the log is empty.
/// Timestamps are RFC 3339 in UTC.
pub fn write_log_csv<W: Write>(
    entries: &[VisitorLogEntryView],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(LOG_CSV_HEADER)?;

    for entry in entries {
        let decided_by = match entry.time_decided {
            Some(_) => entry.decision_summary.as_str(),
            None => "",
        };
        csv_writer.serialize(LogCsvRow {
            id: &entry.id.0,
            full_name: &entry.full_name,
            identity: entry.identity_label,
            company: &entry.company,
            phone: &entry.phone,
            status: entry.status_label,
            time_in: entry.time_in.to_rfc3339(),
            decided_by,
            time_decided: entry
                .time_decided
                .map(|instant| instant.to_rfc3339())
                .unwrap_or_default(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::visitors::domain::{VisitorId, VisitorRecord, VisitorStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn writes_header_and_one_row_per_entry() {
        let time_in = Utc
            .with_ymd_and_hms(2025, 3, 4, 9, 0, 0)
            .single()
            .expect("valid instant");
        let approved = VisitorRecord {
            id: VisitorId("VMS-1002".to_string()),
            full_name: "Mary Johnson".to_string(),
            is_staff: true,
            company: "Able Health Clinic".to_string(),
            phone: "555-0144".to_string(),
            purpose: "meet HR about onboarding".to_string(),
            time_in,
            status: VisitorStatus::Approved,
            time_decided: Some(time_in + chrono::Duration::minutes(14)),
            decided_by: "Mr. Adeyemi".to_string(),
        };
        let pending = VisitorRecord {
            id: VisitorId("VMS-1003".to_string()),
            full_name: "John Doe".to_string(),
            is_staff: false,
            company: String::new(),
            phone: String::new(),
            purpose: String::new(),
            time_in,
            status: VisitorStatus::Pending,
            time_decided: None,
            decided_by: String::new(),
        };
        let entries = vec![
            VisitorLogEntryView::from_record(&pending),
            VisitorLogEntryView::from_record(&approved),
        ];

        let mut buffer = Vec::new();
        write_log_csv(&entries, &mut buffer).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf8 output");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Visitor ID,Full Name,Type,Company,Phone,Status,Time In,Decided By,Time Decided"
        );
        assert_eq!(
            lines[1],
            "VMS-1003,John Doe,Visitor,N/A,N/A,Pending,2025-03-04T09:00:00+00:00,,"
        );
        assert!(lines[2].starts_with("VMS-1002,Mary Johnson,Staff,Able Health Clinic"));
        assert!(lines[2].ends_with("Mr. Adeyemi,2025-03-04T09:14:00+00:00"));
    }

    #[test]
    fn empty_log_still_writes_header() {
        let mut buffer = Vec::new();
        write_log_csv(&[], &mut buffer).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf8 output");
        assert_eq!(
            output,
            "Visitor ID,Full Name,Type,Company,Phone,Status,Time In,Decided By,Time Decided\n"
        );
    }
}
