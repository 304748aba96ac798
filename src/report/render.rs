use std::fmt::{Display, Write};

use crate::format::{fit_column, format_binary_size, pad_to_width, truncate_chars};
use crate::system::process::ProcessRecord;
use crate::system::services::ServiceRecord;
use crate::system::sessions::UserSession;
use crate::system::snapshot::PerformanceSnapshot;

use super::rank::RankMode;

const NAME_MAX: usize = 28;
const NAME_COL: usize = 30;
const PID_COL: usize = 7;
const STATUS_MAX: usize = 10;
const STATUS_COL: usize = 12;
const USER_MAX: usize = 16;
const USER_COL: usize = 18;
const MEM_COL: usize = 10;
const DESCRIPTION_MAX: usize = 30;
const RULE_WIDTH: usize = 100;

const SERVICE_NAME_COL: usize = 30;
const SERVICE_PID_COL: usize = 6;
const SERVICE_STATUS_COL: usize = 10;

/// Shown wherever an optional value is absent.
pub const PLACEHOLDER: &str = "-";

pub const NO_PROCESSES: &str = "No processes found.";
pub const NO_SESSIONS: &str = "No active user sessions detected.";
pub const NO_SERVICES: &str = "No services found.";
pub const NO_DISKS: &str = "No disks found.";

pub fn performance_title() -> String {
    "Performance (summary)".to_string()
}

pub fn processes_title(mode: RankMode) -> String {
    format!("Processes ({})", mode.label())
}

pub fn details_title(mode: RankMode) -> String {
    format!("Details ({} processes, sorted by CPU)", mode.label())
}

pub fn users_title() -> String {
    "Users".to_string()
}

pub fn services_title(mode: RankMode) -> String {
    format!("Services ({})", mode.label())
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {title} ===");
}

pub fn render_performance(snapshot: &PerformanceSnapshot) -> String {
    let mut out = String::new();
    header(&mut out, &performance_title());
    let _ = writeln!(out, "CPU usage   : {:.1}%", snapshot.cpu_percent);
    let _ = writeln!(
        out,
        "Memory      : {:.1}% ({} / {})",
        snapshot.memory.percent,
        format_binary_size(snapshot.memory.used_bytes),
        format_binary_size(snapshot.memory.total_bytes)
    );
    let _ = writeln!(out, "Disks I/O   :");
    if snapshot.per_disk_io.is_empty() {
        let _ = writeln!(out, "  {NO_DISKS}");
    }
    for (name, io) in &snapshot.per_disk_io {
        let _ = writeln!(
            out,
            "  {name}: reads={}B writes={}B",
            io.read_bytes, io.write_bytes
        );
    }
    let _ = writeln!(
        out,
        "Network I/O : sent={}B recv={}B",
        snapshot.network_io.bytes_sent, snapshot.network_io.bytes_recv
    );
    out.push('\n');
    out
}

pub fn summary_row(record: &ProcessRecord) -> String {
    format!(
        "PID {:<6} CPU {:<6}  MEM {:>8}  USER {}  NAME {}",
        record.pid,
        format!("{:.1}%", record.cpu_percent),
        record.memory_display(),
        record.username,
        record.name
    )
}

pub fn render_process_summary(rows: &[ProcessRecord], mode: RankMode) -> String {
    let mut out = String::new();
    header(&mut out, &processes_title(mode));
    if rows.is_empty() {
        let _ = writeln!(out, "{NO_PROCESSES}");
    }
    for record in rows {
        let _ = writeln!(out, "{}", summary_row(record));
    }
    out.push('\n');
    out
}

pub fn details_header() -> String {
    format!(
        "{}{}{}{}{:>6}  {}Description",
        pad_to_width("Name", NAME_COL),
        pad_to_width("PID", PID_COL),
        pad_to_width("Status", STATUS_COL),
        pad_to_width("User", USER_COL),
        "CPU%",
        pad_to_width("Mem (RSS)", MEM_COL),
    )
}

pub fn details_row(record: &ProcessRecord) -> String {
    format!(
        "{}{}{}{}{:5.1}%  {}{}",
        fit_column(&record.name, NAME_MAX, NAME_COL),
        pad_to_width(&record.pid.to_string(), PID_COL),
        fit_column(&record.status, STATUS_MAX, STATUS_COL),
        fit_column(&record.username, USER_MAX, USER_COL),
        record.cpu_percent,
        pad_to_width(&record.memory_display(), MEM_COL),
        truncate_chars(record.description(), DESCRIPTION_MAX),
    )
}

pub fn render_process_details(rows: &[ProcessRecord], mode: RankMode) -> String {
    let mut out = String::new();
    header(&mut out, &details_title(mode));
    let _ = writeln!(out, "{}", details_header());
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    if rows.is_empty() {
        let _ = writeln!(out, "{NO_PROCESSES}");
    }
    for record in rows {
        let _ = writeln!(out, "{}", details_row(record));
    }
    out.push('\n');
    out
}

pub fn session_row(session: &UserSession) -> String {
    format!(
        "User: {}  Host: {}  Terminal: {}  Started: {}",
        session.name,
        or_placeholder(session.host.as_deref()),
        or_placeholder(session.terminal.as_deref()),
        session.started.format("%Y-%m-%d %H:%M")
    )
}

pub fn render_users(sessions: &[UserSession]) -> String {
    let mut out = String::new();
    header(&mut out, &users_title());
    if sessions.is_empty() {
        let _ = writeln!(out, "{NO_SESSIONS}");
    }
    for session in sessions {
        let _ = writeln!(out, "{}", session_row(session));
    }
    out.push('\n');
    out
}

pub fn service_row(service: &ServiceRecord) -> String {
    let pid = service
        .pid
        .map_or_else(|| PLACEHOLDER.to_string(), |pid| pid.to_string());
    format!(
        "Name: {}  PID: {}  Status: {}  Description: {}",
        pad_to_width(&service.name, SERVICE_NAME_COL),
        pad_to_width(&pid, SERVICE_PID_COL),
        pad_to_width(&service.status, SERVICE_STATUS_COL),
        service.display_name
    )
}

pub fn render_services(services: &[ServiceRecord], mode: RankMode) -> String {
    let mut out = String::new();
    header(&mut out, &services_title(mode));
    if services.is_empty() {
        let _ = writeln!(out, "{NO_SERVICES}");
    }
    for service in services {
        let _ = writeln!(out, "{}", service_row(service));
    }
    out.push('\n');
    out
}

/// A section whose data could not be read: header plus one diagnostic line.
pub fn render_section_error(title: &str, what: &str, err: &dyn Display) -> String {
    let mut out = String::new();
    header(&mut out, title);
    let _ = writeln!(out, "Error reading {what}: {err}");
    out.push('\n');
    out
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}
