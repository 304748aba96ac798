use std::{io, mem, ptr, slice};

use windows_sys::Win32::System::RemoteDesktop::{
    WTS_CURRENT_SERVER_HANDLE, WTS_INFO_CLASS, WTS_SESSION_INFOW, WTSClientName,
    WTSEnumerateSessionsW, WTSFreeMemory, WTSINFOW, WTSQuerySessionInformationW, WTSSessionInfo,
    WTSUserName,
};

use super::{PlatformExtensions, run_command};
use crate::system::provider::{ProviderError, ProviderResult};
use crate::system::services::{ServiceRecord, parse_sc_queryex};
use crate::system::sessions::{UserSession, session_from_wts, wide_to_string};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn user_sessions() -> ProviderResult<Vec<UserSession>> {
        let mut info: *mut WTS_SESSION_INFOW = ptr::null_mut();
        let mut count = 0u32;
        let ok = unsafe {
            WTSEnumerateSessionsW(WTS_CURRENT_SERVER_HANDLE, 0, 1, &mut info, &mut count)
        };
        if ok == 0 || info.is_null() {
            return Err(ProviderError::Os {
                call: "WTSEnumerateSessionsW",
                source: io::Error::last_os_error(),
            });
        }

        let entries = unsafe { slice::from_raw_parts(info, count as usize) };
        let sessions = entries
            .iter()
            .filter_map(|entry| {
                let station = unsafe { pwstr_to_string(entry.pWinStationName) };
                let user = query_string(entry.SessionId, WTSUserName)?;
                let client = query_string(entry.SessionId, WTSClientName).unwrap_or_default();
                let logon = query_logon_time(entry.SessionId)?;
                session_from_wts(&user, &client, &station, logon)
            })
            .collect();
        unsafe { WTSFreeMemory(info.cast()) };
        Ok(sessions)
    }

    fn services() -> ProviderResult<Vec<ServiceRecord>> {
        let output = run_command(
            "sc",
            &["queryex", "type=", "service", "state=", "all"],
            "services",
        )?;
        Ok(parse_sc_queryex(&output))
    }
}

/// Raw buffer returned by `WTSQuerySessionInformationW`, freed on drop.
struct WtsBuffer {
    ptr: *mut u16,
    bytes: usize,
}

impl WtsBuffer {
    fn query(session_id: u32, class: WTS_INFO_CLASS) -> Option<Self> {
        let mut ptr: *mut u16 = ptr::null_mut();
        let mut bytes = 0u32;
        let ok = unsafe {
            WTSQuerySessionInformationW(
                WTS_CURRENT_SERVER_HANDLE,
                session_id,
                class,
                &mut ptr,
                &mut bytes,
            )
        };
        if ok == 0 || ptr.is_null() {
            return None;
        }
        Some(WtsBuffer {
            ptr,
            bytes: bytes as usize,
        })
    }

    fn units(&self) -> &[u16] {
        unsafe { slice::from_raw_parts(self.ptr, self.bytes / mem::size_of::<u16>()) }
    }
}

impl Drop for WtsBuffer {
    fn drop(&mut self) {
        unsafe { WTSFreeMemory(self.ptr.cast()) };
    }
}

fn query_string(session_id: u32, class: WTS_INFO_CLASS) -> Option<String> {
    WtsBuffer::query(session_id, class).map(|buffer| wide_to_string(buffer.units()))
}

fn query_logon_time(session_id: u32) -> Option<i64> {
    let buffer = WtsBuffer::query(session_id, WTSSessionInfo)?;
    if buffer.bytes < mem::size_of::<WTSINFOW>() {
        return None;
    }
    let info = unsafe { ptr::read_unaligned(buffer.ptr.cast::<WTSINFOW>()) };
    Some(info.LogonTime)
}

/// # Safety
/// `ptr` must be null or point at a NUL-terminated UTF-16 string.
unsafe fn pwstr_to_string(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    wide_to_string(unsafe { slice::from_raw_parts(ptr, len) })
}
