use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSession {
    pub name: String,
    pub host: Option<String>,
    pub terminal: Option<String>,
    pub started: NaiveDateTime,
}

/// Parses the default output of `who`.
///
/// Linux prints `alice pts/0 2026-10-19 09:12 (10.0.0.5)`; macOS and the C
/// locale print `alice ttys000 Oct 19 09:12` without a year. Those take the
/// year of `now`, or the year before when that would put the login in the
/// future. Lines that do not match either shape are skipped.
pub fn parse_who(output: &str, now: NaiveDateTime) -> Vec<UserSession> {
    output
        .lines()
        .filter_map(|line| parse_who_line(line, now))
        .collect()
}

fn parse_who_line(line: &str, now: NaiveDateTime) -> Option<UserSession> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    let name = fields[0].to_string();
    let terminal = non_empty(fields[1]);

    let (started, rest) = if fields[2].contains('-') {
        let date = NaiveDate::parse_from_str(fields[2], "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(fields[3], "%H:%M").ok()?;
        (NaiveDateTime::new(date, time), &fields[4..])
    } else {
        let (month, day, time) = (fields[2], fields.get(3)?, fields.get(4)?);
        let in_year = |year: i32| {
            let stamp = format!("{year} {month} {day} {time}");
            NaiveDateTime::parse_from_str(&stamp, "%Y %b %d %H:%M").ok()
        };
        let started = match in_year(now.year()) {
            Some(started) if started <= now => started,
            this_year => in_year(now.year() - 1).or(this_year)?,
        };
        (started, &fields[5..])
    };

    let host = rest
        .iter()
        .find_map(|field| field.strip_prefix('(')?.strip_suffix(')'))
        .and_then(non_empty);

    Some(UserSession {
        name,
        host,
        terminal,
        started,
    })
}

/// 100 ns ticks per second in a Windows `FILETIME`.
const FILETIME_TICKS_PER_SEC: i64 = 10_000_000;
/// Seconds from 1601-01-01 to 1970-01-01.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// Converts a `FILETIME` tick count (UTC) to local wall-clock time. Zero means
/// the time was never set.
pub fn filetime_to_local(ticks: i64) -> Option<NaiveDateTime> {
    if ticks <= 0 {
        return None;
    }
    let secs = ticks / FILETIME_TICKS_PER_SEC - FILETIME_UNIX_OFFSET_SECS;
    let nanos = (ticks % FILETIME_TICKS_PER_SEC) as u32 * 100;
    DateTime::from_timestamp(secs, nanos).map(|utc| utc.with_timezone(&Local).naive_local())
}

/// Decodes UTF-16 up to the first NUL.
pub fn wide_to_string(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}

/// Builds a session from what a Windows terminal-services session reports.
/// Sessions nobody is signed in to (services, listeners) and sessions without
/// a logon time are skipped.
pub fn session_from_wts(
    user: &str,
    client: &str,
    station: &str,
    logon_ticks: i64,
) -> Option<UserSession> {
    if user.is_empty() {
        return None;
    }
    Some(UserSession {
        name: user.to_string(),
        host: non_empty(client),
        terminal: non_empty(station),
        started: filetime_to_local(logon_ticks)?,
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn parses_linux_who_output() {
        let output = "\
alice    pts/0        2026-10-19 09:12 (10.0.0.5)
bob      tty7         2026-10-18 22:01 (:0)
carol    tty1         2026-10-17 07:45
";
        let sessions = parse_who(output, at(2026, 10, 19, 12, 0));
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].name, "alice");
        assert_eq!(sessions[0].terminal.as_deref(), Some("pts/0"));
        assert_eq!(sessions[0].host.as_deref(), Some("10.0.0.5"));
        assert_eq!(sessions[0].started, at(2026, 10, 19, 9, 12));
        assert_eq!(sessions[1].host.as_deref(), Some(":0"));
        assert_eq!(sessions[2].host, None);
    }

    #[test]
    fn parses_macos_who_output_with_current_year() {
        let output = "dave     console      Oct 19 08:30\ndave     ttys000      Oct  3 11:05\n";
        let sessions = parse_who(output, at(2025, 10, 19, 12, 0));
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].terminal.as_deref(), Some("console"));
        assert_eq!(sessions[0].started, at(2025, 10, 19, 8, 30));
        assert_eq!(sessions[1].started, at(2025, 10, 3, 11, 5));
        assert_eq!(sessions[1].host, None);
    }

    #[test]
    fn empty_host_in_parens_is_absent() {
        let now = at(2026, 10, 19, 12, 0);
        let sessions = parse_who("erin pts/3 2026-01-02 03:04 ()", now);
        assert_eq!(sessions[0].host, None);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let output = "garbage\n\nfrank pts/1 not-a-date 12:00\n";
        assert!(parse_who(output, at(2026, 10, 19, 12, 0)).is_empty());
    }

    #[test]
    fn yearless_login_after_now_belongs_to_last_year() {
        let sessions = parse_who("bob tty1 Dec 31 23:00", at(2027, 1, 1, 0, 5));
        assert_eq!(sessions[0].started, at(2026, 12, 31, 23, 0));
    }

    #[test]
    fn yearless_login_earlier_today_keeps_this_year() {
        let sessions = parse_who("bob tty1 Jan  1 00:01", at(2027, 1, 1, 0, 5));
        assert_eq!(sessions[0].started, at(2027, 1, 1, 0, 1));
    }

    fn local(secs: i64) -> NaiveDateTime {
        DateTime::from_timestamp(secs, 0)
            .unwrap()
            .with_timezone(&Local)
            .naive_local()
    }

    #[test]
    fn filetime_epoch_offsets() {
        let unix_epoch = FILETIME_UNIX_OFFSET_SECS * FILETIME_TICKS_PER_SEC;
        assert_eq!(filetime_to_local(unix_epoch), Some(local(0)));
        // 2026-10-19 09:12:00 UTC
        let ticks = (1_792_401_120 + FILETIME_UNIX_OFFSET_SECS) * FILETIME_TICKS_PER_SEC;
        assert_eq!(filetime_to_local(ticks), Some(local(1_792_401_120)));
        assert_eq!(filetime_to_local(0), None);
    }

    #[test]
    fn wide_strings_stop_at_nul() {
        let mut units: Vec<u16> = "alice".encode_utf16().collect();
        units.extend([0, 'x' as u16]);
        assert_eq!(wide_to_string(&units), "alice");
        assert_eq!(wide_to_string(&[]), "");
    }

    #[test]
    fn wts_session_maps_client_and_station() {
        let ticks = (1_792_401_120 + FILETIME_UNIX_OFFSET_SECS) * FILETIME_TICKS_PER_SEC;
        let session = session_from_wts("alice", "LAPTOP-7", "RDP-Tcp#3", ticks).unwrap();
        assert_eq!(session.name, "alice");
        assert_eq!(session.host.as_deref(), Some("LAPTOP-7"));
        assert_eq!(session.terminal.as_deref(), Some("RDP-Tcp#3"));
        assert_eq!(session.started, local(1_792_401_120));

        let console = session_from_wts("bob", "", "Console", ticks).unwrap();
        assert_eq!(console.host, None);
    }

    #[test]
    fn wts_sessions_without_user_or_logon_are_skipped() {
        assert_eq!(session_from_wts("", "", "Services", 1), None);
        assert_eq!(session_from_wts("alice", "", "Console", 0), None);
    }
}
