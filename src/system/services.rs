use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub display_name: String,
    pub status: String,
    pub pid: Option<u32>,
}

/// Parses `systemctl list-units --type=service --all --no-legend --plain`.
///
/// Columns are `UNIT LOAD ACTIVE SUB DESCRIPTION...`; the SUB state
/// (`running`, `exited`, `dead`, ...) becomes the status.
pub fn parse_systemctl_units(output: &str) -> Vec<ServiceRecord> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(ServiceRecord {
                name: fields[0].to_string(),
                display_name: fields[4..].join(" "),
                status: fields[3].to_string(),
                pid: None,
            })
        })
        .collect()
}

/// Parses `systemctl show -p Id -p MainPID <units>` into unit id -> main PID.
/// Units without a running main process (`MainPID=0`) are left out.
pub fn parse_systemctl_main_pids(output: &str) -> HashMap<String, u32> {
    let mut pids = HashMap::new();
    let mut id: Option<&str> = None;
    let mut main_pid: Option<u32> = None;

    for line in output.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if line.is_empty() {
            if let (Some(unit), Some(pid)) = (id.take(), main_pid.take())
                && pid != 0
            {
                pids.insert(unit.to_string(), pid);
            }
            continue;
        }
        match line.split_once('=') {
            Some(("Id", value)) => id = Some(value),
            Some(("MainPID", value)) => main_pid = value.parse().ok(),
            _ => {}
        }
    }
    pids
}

pub fn apply_main_pids(services: &mut [ServiceRecord], pids: &HashMap<String, u32>) {
    for service in services {
        if let Some(&pid) = pids.get(&service.name) {
            service.pid = Some(pid);
        }
    }
}

/// Parses `sc queryex type= service state= all`.
///
/// Each service is a block opened by `SERVICE_NAME:`; `STATE : 4  RUNNING`
/// yields `running`, and `PID : 0` means no process.
pub fn parse_sc_queryex(output: &str) -> Vec<ServiceRecord> {
    let mut services = Vec::new();
    let mut current: Option<ServiceRecord> = None;

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "SERVICE_NAME" => {
                if let Some(done) = current.take() {
                    services.push(done);
                }
                current = Some(ServiceRecord {
                    name: value.to_string(),
                    display_name: String::new(),
                    status: String::new(),
                    pid: None,
                });
            }
            "DISPLAY_NAME" => {
                if let Some(service) = current.as_mut() {
                    service.display_name = value.to_string();
                }
            }
            "STATE" => {
                if let Some(service) = current.as_mut() {
                    service.status = value
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or_default()
                        .to_lowercase();
                }
            }
            "PID" => {
                if let Some(service) = current.as_mut() {
                    service.pid = value.parse().ok().filter(|&pid| pid != 0);
                }
            }
            _ => {}
        }
    }
    services.extend(current);
    services
}
