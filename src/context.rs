use crate::error::AppError;
use crate::models::UserId;

/// Caller identity threaded explicitly into every service operation.
///
/// Produced once per request from the inbound credential. Tests build it
/// directly to act as any user, or as nobody.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    caller: Option<UserId>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn user(user_id: UserId) -> Self {
        Self {
            caller: Some(user_id),
        }
    }

    pub fn caller(&self) -> Option<UserId> {
        self.caller
    }

    /// The caller's id, or `Unauthenticated` when there is none.
    pub fn require_user(&self) -> Result<UserId, AppError> {
        self.caller.ok_or(AppError::Unauthenticated)
    }
}
