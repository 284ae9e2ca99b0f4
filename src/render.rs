// FleetLens - render.rs
//
// Binary-side text rendering of view models: list tables, group
// breakdowns, summary cards, and the dashboard overview.
//
// Rendering is presentation only -- every number here is computed by the
// core pipeline and read out of the view model unchanged. Output goes to
// stdout; logging stays on stderr.

use crate::core::model::{FleetSnapshot, LoadSummary, ViewProfile};
use crate::core::view::{
    self, build_view, BadgeCounts, ViewModel, ViewQuery,
};
use crate::util::error::Result;
use chrono::NaiveDate;

/// Render a collection view: optional group breakdown, the records table,
/// and a closing summary line.
pub fn list_view<R>(
    records: &[R],
    view: &ViewModel,
    profile: &ViewProfile<R>,
    query: &ViewQuery,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} — {} of {} records\n\n",
        view.collection,
        view.indices.len(),
        records.len()
    ));

    if !view.groups.is_empty() {
        out.push_str(&group_table(view, query));
        out.push('\n');
    }

    out.push_str(&record_table(records, view, profile));
    out.push('\n');
    out.push_str(&summary_line(view));

    out
}

/// Group breakdown table: key, count, and the summed field if requested.
fn group_table(view: &ViewModel, query: &ViewQuery) -> String {
    let group_by = query.group_by.as_deref().unwrap_or("group");
    let mut header = vec![group_by.to_string(), "count".to_string()];
    if let Some(ref sum_by) = query.sum_by {
        header.push(format!("sum({sum_by})"));
    }

    let rows: Vec<Vec<String>> = view
        .groups
        .iter()
        .map(|g| {
            let key = if g.key.is_empty() { "(unset)" } else { &g.key };
            let mut row = vec![key.to_string(), g.count.to_string()];
            if let Some(sum) = g.sum {
                row.push(format_float(sum));
            }
            row
        })
        .collect();

    table(&header, &rows)
}

/// The records table, one row per filtered record, with a deadline badge
/// column for collections that have one.
fn record_table<R>(records: &[R], view: &ViewModel, profile: &ViewProfile<R>) -> String {
    let has_badges = profile.deadline_field.is_some();

    let mut header: Vec<String> = profile.columns.iter().map(|c| c.key.to_string()).collect();
    if has_badges {
        header.push("deadline".to_string());
    }

    let rows: Vec<Vec<String>> = view
        .indices
        .iter()
        .zip(view.badges.iter())
        .map(|(&idx, badge)| {
            let record = &records[idx];
            let mut row: Vec<String> = profile
                .columns
                .iter()
                .map(|c| (c.get)(record).as_text())
                .collect();
            if has_badges {
                row.push(badge.map(|b| b.label().to_string()).unwrap_or_default());
            }
            row
        })
        .collect();

    table(&header, &rows)
}

/// One-line summary: total, predicate counts, aggregates, badge totals.
fn summary_line(view: &ViewModel) -> String {
    let mut parts: Vec<String> = vec![format!("total {}", view.summary.total)];

    for (name, count) in &view.summary.counts {
        parts.push(format!("{name} {count}"));
    }
    for (name, sum) in &view.summary.sums {
        parts.push(format!("{name} Σ {}", format_float(*sum)));
    }
    for (name, avg) in &view.summary.averages {
        parts.push(format!("{name} avg {}", format_float(*avg)));
    }
    if let Some(badges) = badge_part(&view.badge_counts) {
        parts.push(badges);
    }

    format!("{}\n", parts.join("   "))
}

fn badge_part(counts: &BadgeCounts) -> Option<String> {
    if counts.overdue == 0 && counts.warning == 0 && counts.ok == 0 {
        return None;
    }
    Some(format!(
        "deadlines: {} overdue / {} due soon / {} ok",
        counts.overdue, counts.warning, counts.ok
    ))
}

// =============================================================================
// Dashboard overview
// =============================================================================

/// Render the cross-collection dashboard summary.
///
/// Each collection is summarised through the same view pipeline as the list
/// commands (empty filter, default summary spec) so dashboard numbers always
/// agree with the list views.
pub fn dashboard(
    snapshot: &FleetSnapshot,
    load_summary: &LoadSummary,
    reference: NaiveDate,
    warning_window_days: u32,
) -> Result<String> {
    let query = ViewQuery {
        filter: Default::default(),
        group_by: None,
        sum_by: None,
        reference,
        warning_window_days,
    };

    let vehicles = build_view(
        &snapshot.vehicles,
        &query,
        &crate::core::model::Vehicle::view_profile(),
        &view::vehicle_summary_spec(),
    )?;
    let drivers = build_view(
        &snapshot.drivers,
        &query,
        &crate::core::model::Driver::view_profile(),
        &view::driver_summary_spec(),
    )?;
    let trips = build_view(
        &snapshot.trips,
        &query,
        &crate::core::model::Trip::view_profile(),
        &view::trip_summary_spec(),
    )?;
    let maintenance = build_view(
        &snapshot.maintenance,
        &query,
        &crate::core::model::MaintenanceItem::view_profile(),
        &view::maintenance_summary_spec(),
    )?;
    let alerts = build_view(
        &snapshot.alerts,
        &query,
        &crate::core::model::Alert::view_profile(),
        &view::alert_summary_spec(),
    )?;

    let mut out = String::new();
    out.push_str(&format!(
        "Fleet summary — as of {} (warning window {} days)\n\n",
        reference.format("%Y-%m-%d"),
        warning_window_days
    ));

    out.push_str(&format!(
        "Vehicles     {:>5}   {} active, {} in shop   {}\n",
        vehicles.summary.total,
        vehicles.summary.count("active").unwrap_or(0),
        vehicles.summary.count("in-shop").unwrap_or(0),
        deadline_phrase(&vehicles.badge_counts, "service"),
    ));
    out.push_str(&format!(
        "Drivers      {:>5}   {} on duty, {} suspended   {}\n",
        drivers.summary.total,
        drivers.summary.count("on-duty").unwrap_or(0),
        drivers.summary.count("suspended").unwrap_or(0),
        deadline_phrase(&drivers.badge_counts, "licence"),
    ));
    out.push_str(&format!(
        "Trips        {:>5}   {} scheduled, {} in transit, {} completed   {} km planned\n",
        trips.summary.total,
        trips.summary.count("scheduled").unwrap_or(0),
        trips.summary.count("in-transit").unwrap_or(0),
        trips.summary.count("completed").unwrap_or(0),
        format_float(trips.summary.sum("distance_km").unwrap_or(0.0)),
    ));
    out.push_str(&format!(
        "Maintenance  {:>5}   {} pending, {} in progress   {}   cost Σ {}\n",
        maintenance.summary.total,
        maintenance.summary.count("pending").unwrap_or(0),
        maintenance.summary.count("in-progress").unwrap_or(0),
        deadline_phrase(&maintenance.badge_counts, "work"),
        format_float(maintenance.summary.sum("cost").unwrap_or(0.0)),
    ));
    out.push_str(&format!(
        "Alerts       {:>5}   {} active ({} critical)\n",
        alerts.summary.total,
        alerts.summary.count("active").unwrap_or(0),
        alerts.summary.count("critical-active").unwrap_or(0),
    ));

    if !load_summary.warnings.is_empty() {
        out.push_str(&format!(
            "\n{} load warning(s); run with --debug for details\n",
            load_summary.warnings.len()
        ));
    }

    Ok(out)
}

fn deadline_phrase(counts: &BadgeCounts, noun: &str) -> String {
    format!(
        "{} {noun} overdue, {} due soon",
        counts.overdue, counts.warning
    )
}

// =============================================================================
// Table layout
// =============================================================================

/// Render a padded text table with a separator under the header row.
fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let columns = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .take(columns)
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = render_row(header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        out.push_str(&render_row(row));
    }
    out
}

/// Trailing-zero-free float rendering for summary output.
fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n:.1}")
    }
}
