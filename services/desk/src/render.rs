use crate::infra::format_time;
use chrono::FixedOffset;
use visitor_desk::workflows::visitors::{DeskDashboard, StatusFilter, VisitorNotification};

pub(crate) fn render_notification(
    notification: Option<&VisitorNotification>,
    offset: FixedOffset,
) {
    println!("\nLatest notification");
    match notification {
        Some(notification) => {
            println!("  {}", notification.message);
            println!("  Sent at {}", format_time(notification.timestamp, offset));
        }
        None => println!("  No new visitor requests yet."),
    }
}

pub(crate) fn render_dashboard(dashboard: &DeskDashboard, offset: FixedOffset) {
    println!("Visitor desk dashboard");
    println!(
        "- Pending approvals: {} | Approved: {} | Rejected: {}",
        dashboard.stats.pending, dashboard.stats.approved, dashboard.stats.rejected
    );
    println!("- Decision maker: {}", dashboard.decision_maker);

    render_notification(dashboard.latest_notification.as_ref(), offset);

    println!("\nApproval console");
    if dashboard.pending.is_empty() {
        println!("  No pending visitor requests.");
    }
    for request in &dashboard.pending {
        println!(
            "  - [{}] {} ({}) · {} · {}",
            request.id, request.full_name, request.identity_label, request.company, request.phone
        );
        println!("    Purpose: {}", request.purpose);
    }

    let criteria = &dashboard.criteria;
    let mut applied = Vec::new();
    if !criteria.search_text.is_empty() {
        applied.push(format!("search \"{}\"", criteria.search_text));
    }
    if criteria.status_filter != StatusFilter::All {
        applied.push(format!("status {:?}", criteria.status_filter));
    }
    if let Some(date) = criteria.date_filter {
        applied.push(format!("date {date}"));
    }
    if applied.is_empty() {
        println!("\nVisitor log");
    } else {
        println!("\nVisitor log ({})", applied.join(", "));
    }

    if dashboard.log.is_empty() {
        println!("  No visitors match these filters.");
    }
    for entry in &dashboard.log {
        let decision = match entry.time_decided {
            Some(decided) => format!(
                "{} · {}",
                entry.decision_summary,
                format_time(decided, offset)
            ),
            None => entry.decision_summary.clone(),
        };
        println!(
            "  - [{}] {} ({}) · {} · {} · in {} · {}",
            entry.id,
            entry.full_name,
            entry.identity_label,
            entry.company,
            entry.status_label,
            format_time(entry.time_in, offset),
            decision
        );
    }
}
