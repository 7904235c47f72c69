//! Services for joining a store through an invite link.

use chrono::Utc;

use crate::domain::invite::{InviteStatus, InviteToken};
use crate::domain::manager::Manager;
use crate::domain::types::InviteCode;
use crate::forms::invites::{AcceptInviteForm, AcceptInvitePayload};
use crate::repository::errors::RepositoryError;
use crate::repository::{InviteReader, InviteWriter};
use crate::services::{ServiceError, ServiceResult};

/// Invite together with its status at the time of the check.
#[derive(Debug, Clone)]
pub struct InviteCheck {
    pub token: InviteToken,
    pub status: InviteStatus,
}

/// Looks up the invite. Malformed and unknown codes are both `NotFound`.
pub fn check_invite<R>(repo: &R, code: &str) -> ServiceResult<InviteCheck>
where
    R: InviteReader + ?Sized,
{
    let code = InviteCode::new(code).map_err(|_| ServiceError::NotFound)?;
    let token = repo
        .get_invite(&code)
        .map_err(|err| {
            log::error!("Failed to load invite {code}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;
    let status = token.status(Utc::now().naive_utc());
    Ok(InviteCheck { token, status })
}

/// Registers a new manager through a valid invite.
pub fn accept_invite<R>(repo: &R, code: &str, form: AcceptInviteForm) -> ServiceResult<Manager>
where
    R: InviteReader + InviteWriter + ?Sized,
{
    let check = check_invite(repo, code)?;
    match check.status {
        InviteStatus::Valid => {}
        InviteStatus::Used => {
            return Err(ServiceError::Form(
                "Приглашение уже использовано.".to_string(),
            ));
        }
        InviteStatus::Expired => {
            return Err(ServiceError::Form(
                "Срок действия приглашения истёк.".to_string(),
            ));
        }
    }

    let payload = AcceptInvitePayload::try_from(form)
        .map_err(|err| ServiceError::Form(format!("Ошибка регистрации: {}", err.hint())))?;
    let new_manager = payload.into_domain(check.token.store_id);

    repo.redeem_invite(&check.token.code, &new_manager)
        .map_err(|err| match err {
            RepositoryError::ConstraintViolation(_) => ServiceError::Form(
                "Менеджер с таким email уже зарегистрирован.".to_string(),
            ),
            other => {
                log::error!("Failed to redeem invite {}: {other}", check.token.code);
                ServiceError::from(other)
            }
        })
}
