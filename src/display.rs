use std::fmt::Write;

use crate::api::{Assignment, CoverageStat, LoadStat, StaffMember};
use crate::state::{ListState, LoadStatus};
use crate::views::{RosterBoard, StaffDirectory};

/// Formats a staff name with its position, if known
pub fn format_staff_name(name: &str, position: Option<&str>) -> String {
    match position.map(str::trim) {
        Some(position) if !position.is_empty() => format!("{} ({})", name, position),
        _ => name.to_string(),
    }
}

fn status_line<T>(out: &mut String, title: &str, list: &ListState<T>) {
    let _ = write!(out, "== {} ==", title);
    match list.status {
        LoadStatus::Loading => out.push_str(" [loading]"),
        LoadStatus::Error => out.push_str(" [error]"),
        LoadStatus::Idle | LoadStatus::Loaded => {}
    }
    out.push('\n');
    if let Some(err) = &list.last_error {
        let _ = writeln!(out, "  ! {}", err);
    }
}

fn staff_row(staff: &StaffMember) -> String {
    let age = staff
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:>4}  {}  age {}",
        staff.id,
        format_staff_name(&staff.name, staff.position.as_deref()),
        age
    )
}

fn assignment_row(a: &Assignment) -> String {
    let when = match (&a.date, &a.shift_type) {
        (Some(date), Some(shift_type)) => format!("{} {}", date, shift_type),
        (Some(date), None) => date.to_string(),
        (None, Some(shift_type)) => shift_type.clone(),
        (None, None) => match a.shift_id {
            Some(shift_id) => format!("shift {}", shift_id),
            None => "-".to_string(),
        },
    };
    let who = match &a.staff_name {
        Some(name) => format!(
            "{} [staff {}]",
            format_staff_name(name, a.position.as_deref()),
            a.staff_id
        ),
        None => format!("staff {}", a.staff_id),
    };
    format!("{:>4}  {}  {}", a.id, when, who)
}

fn coverage_row(stat: &CoverageStat) -> String {
    format!("  {}  {:<10} {:>3}", stat.date, stat.shift_type, stat.count)
}

fn load_row(stat: &LoadStat) -> String {
    format!(
        "  {:>4}  {:<20} {:>3}",
        stat.staff_id, stat.name, stat.total_assignments
    )
}

pub fn render_staff_directory(directory: &StaffDirectory) -> String {
    let mut out = String::new();
    status_line(&mut out, "Staff", &directory.staff);
    if directory.staff.is_empty() && directory.staff.is_loaded() {
        out.push_str("  (no staff)\n");
    }
    for staff in &directory.staff.data {
        let _ = writeln!(out, "{}", staff_row(staff));
    }
    out
}

pub fn render_roster_board(board: &RosterBoard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Roster {}", board.period());
    if let Some(notice) = &board.notice {
        let _ = writeln!(out, "  * {}", notice);
    }
    if let Some(err) = &board.export_error {
        let _ = writeln!(out, "  ! export: {}", err);
    }

    status_line(&mut out, "Assignments", &board.roster);
    if board.roster.is_empty() && board.roster.is_loaded() {
        out.push_str("  (no assignments)\n");
    }
    for a in &board.roster.data {
        let _ = writeln!(out, "{}", assignment_row(a));
    }

    status_line(&mut out, "Coverage", &board.coverage);
    for stat in &board.coverage.data {
        let _ = writeln!(out, "{}", coverage_row(stat));
    }

    status_line(&mut out, "Staff load", &board.staff_load);
    for stat in &board.staff_load.data {
        let _ = writeln!(out, "{}", load_row(stat));
    }
    out
}
