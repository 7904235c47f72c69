use serde::Deserialize;
use validator::Validate;

use crate::domain::manager::{ManagerRole, NewManager};
use crate::domain::types::{ManagerEmail, ManagerName, StoreId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Registration form shown on the invite page.
pub struct AcceptInviteForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

/// Validated invite registration.
#[derive(Debug)]
pub struct AcceptInvitePayload {
    pub name: ManagerName,
    pub email: ManagerEmail,
}

impl TryFrom<AcceptInviteForm> for AcceptInvitePayload {
    type Error = FormError;

    fn try_from(form: AcceptInviteForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: ManagerName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: ManagerEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
        })
    }
}

impl AcceptInvitePayload {
    /// Invited members always join as regular managers.
    pub fn into_domain(self, store_id: StoreId) -> NewManager {
        NewManager::new(store_id, self.name, self.email, ManagerRole::Manager)
    }
}
