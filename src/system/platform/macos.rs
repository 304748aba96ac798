use chrono::Local;

use super::{PlatformExtensions, run_command};
use crate::system::provider::{ProviderError, ProviderResult};
use crate::system::services::ServiceRecord;
use crate::system::sessions::{UserSession, parse_who};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn user_sessions() -> ProviderResult<Vec<UserSession>> {
        let output = run_command("who", &[], "user sessions")?;
        Ok(parse_who(&output, Local::now().naive_local()))
    }

    fn services() -> ProviderResult<Vec<ServiceRecord>> {
        Err(ProviderError::Unsupported("services"))
    }
}
