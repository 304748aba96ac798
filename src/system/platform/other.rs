use super::PlatformExtensions;
use crate::system::provider::{ProviderError, ProviderResult};
use crate::system::services::ServiceRecord;
use crate::system::sessions::UserSession;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn user_sessions() -> ProviderResult<Vec<UserSession>> {
        Err(ProviderError::Unsupported("user sessions"))
    }

    fn services() -> ProviderResult<Vec<ServiceRecord>> {
        Err(ProviderError::Unsupported("services"))
    }
}
