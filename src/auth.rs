use tracing::info;

use crate::error::{DoormanError, Result};
use crate::models::{SignInRecord, SignUpRecord};

/// Remote account actions. Called only with records that passed validation.
pub trait AuthService {
    fn sign_in(&self, record: &SignInRecord) -> Result<()>;
    fn register(&self, record: &SignUpRecord) -> Result<()>;
}

/// Placeholder until a backend exists. Accepts everything, or rejects
/// everything when built with `rejecting()`.
#[derive(Debug, Default, Clone)]
pub struct StubAuthService {
    reject: bool,
}

impl StubAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self { reject: true }
    }
}

impl AuthService for StubAuthService {
    fn sign_in(&self, _record: &SignInRecord) -> Result<()> {
        if self.reject {
            return Err(DoormanError::Auth("sign-in rejected by stub".into()));
        }
        info!("sign-in accepted (no backend configured)");
        Ok(())
    }

    fn register(&self, _record: &SignUpRecord) -> Result<()> {
        if self.reject {
            return Err(DoormanError::Auth("registration rejected by stub".into()));
        }
        info!("registration accepted (no backend configured)");
        Ok(())
    }
}
