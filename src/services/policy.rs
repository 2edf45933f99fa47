//! Authorization policy for account and loan resources
//!
//! Every handler goes through [`authorize`] before touching the store. The
//! function is pure: it only looks at the resolved [`Identity`], the action
//! and the addressed resource. Checks that need the stored record (loan
//! ownership) are expressed as a [`Grant`] the caller applies after the fetch.

use thiserror::Error;

use crate::models::Identity;

/// Operation requested on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    List,
    Read,
    Update,
    Delete,
    UpdateStatus,
}

/// Addressed resource, with the id from the path when there is one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Admin(Option<&'a str>),
    User(Option<&'a str>),
    Loan(Option<&'a str>),
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("requires super-admin")]
    RequiresSuperAdmin,
    #[error("forbidden: not self, not super-admin")]
    NotSelf,
    #[error("requires an administrator")]
    RequiresAdmin,
    #[error("identity mismatch")]
    IdentityMismatch,
    #[error("must be a user")]
    MustBeUser,
    #[error("not your loan")]
    NotYourLoan,
}

/// What an allowed caller may touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    Unrestricted,
    /// Only records whose owner is this user id
    OwnedBy(String),
}

impl Grant {
    /// User id records must belong to, if restricted
    pub fn owner(&self) -> Option<&str> {
        match self {
            Grant::Unrestricted => None,
            Grant::OwnedBy(owner) => Some(owner),
        }
    }

    /// Apply the ownership constraint to a fetched record's owner
    pub fn check_owner(&self, owner: &str) -> Result<(), Denial> {
        match self {
            Grant::OwnedBy(allowed) if allowed != owner => Err(Denial::NotYourLoan),
            _ => Ok(()),
        }
    }
}

/// Decide whether `identity` may perform `action` on `resource`.
pub fn authorize(
    identity: &Identity,
    action: Action,
    resource: Resource<'_>,
) -> Result<Grant, Denial> {
    if identity.is_anonymous() {
        return Err(Denial::Unauthenticated);
    }

    match resource {
        Resource::Admin(target) => authorize_admin(identity, action, target),
        Resource::User(target) => authorize_user(identity, action, target),
        Resource::Loan(_) => authorize_loan(identity),
    }
}

fn authorize_admin(
    identity: &Identity,
    action: Action,
    target: Option<&str>,
) -> Result<Grant, Denial> {
    match action {
        Action::Read | Action::Update => match (identity, target) {
            (Identity::SuperAdmin, _) => Ok(Grant::Unrestricted),
            (Identity::Admin(own), Some(target)) if own == target => Ok(Grant::Unrestricted),
            _ => Err(Denial::NotSelf),
        },
        Action::Create | Action::List | Action::Delete | Action::UpdateStatus => match identity {
            Identity::SuperAdmin => Ok(Grant::Unrestricted),
            _ => Err(Denial::RequiresSuperAdmin),
        },
    }
}

fn authorize_user(
    identity: &Identity,
    action: Action,
    target: Option<&str>,
) -> Result<Grant, Denial> {
    match (action, identity) {
        (_, Identity::SuperAdmin | Identity::Admin(_)) => Ok(Grant::Unrestricted),
        (Action::Create | Action::List, _) => Err(Denial::RequiresAdmin),
        (_, Identity::User(own)) if Some(own.as_str()) == target => Ok(Grant::Unrestricted),
        _ => Err(Denial::IdentityMismatch),
    }
}

fn authorize_loan(identity: &Identity) -> Result<Grant, Denial> {
    match identity {
        Identity::User(own) => Ok(Grant::OwnedBy(own.clone())),
        _ => Err(Denial::MustBeUser),
    }
}
