use thiserror::Error;

use super::Identity;

/// Something a caller wants to do, with the ownership facts needed to decide.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateUser,
    UpdateUser { user_id: &'a str, touches_credentials: bool },
    CreatePlace { owner_id: &'a str },
    ModifyPlace { owner_id: &'a str },
    CreateReview { author_id: &'a str },
    ModifyReview { author_id: &'a str },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    #[error("Admin privileges required")]
    AdminNotAllowed,

    #[error("email and password cannot be updated")]
    CredentialsLocked,

    #[error("Unauthorized action")]
    NotOwner,
}

/// Pure policy check: no IO, no panics.
///
/// Admins may act on any user, place or review. Regular users may only act
/// on records they own. Registering users through the API is reserved to
/// non-admin callers.
pub fn authorize(identity: &Identity, action: Action<'_>) -> Result<(), Denied> {
    match action {
        Action::CreateUser if identity.is_admin => Err(Denied::AdminNotAllowed),
        Action::CreateUser => Ok(()),

        _ if identity.is_admin => Ok(()),

        Action::UpdateUser { touches_credentials: true, .. } => Err(Denied::CredentialsLocked),
        Action::UpdateUser { user_id, .. } => owns(identity, user_id),
        Action::CreatePlace { owner_id } | Action::ModifyPlace { owner_id } => owns(identity, owner_id),
        Action::CreateReview { author_id } | Action::ModifyReview { author_id } => owns(identity, author_id),
    }
}

fn owns(identity: &Identity, owner_id: &str) -> Result<(), Denied> {
    if identity.id == owner_id {
        Ok(())
    } else {
        Err(Denied::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identity {
        Identity { id: "admin".to_string(), is_admin: true }
    }

    fn member() -> Identity {
        Identity { id: "member".to_string(), is_admin: false }
    }

    #[test]
    fn admins_cannot_register_users() {
        assert_eq!(authorize(&admin(), Action::CreateUser), Err(Denied::AdminNotAllowed));
        assert_eq!(authorize(&member(), Action::CreateUser), Ok(()));
    }

    #[test]
    fn members_update_only_themselves() {
        let own = Action::UpdateUser { user_id: "member", touches_credentials: false };
        let other = Action::UpdateUser { user_id: "someone", touches_credentials: false };
        assert_eq!(authorize(&member(), own), Ok(()));
        assert_eq!(authorize(&member(), other), Err(Denied::NotOwner));
    }

    #[test]
    fn credentials_check_precedes_ownership() {
        let own = Action::UpdateUser { user_id: "member", touches_credentials: true };
        let other = Action::UpdateUser { user_id: "someone", touches_credentials: true };
        assert_eq!(authorize(&member(), own), Err(Denied::CredentialsLocked));
        assert_eq!(authorize(&member(), other), Err(Denied::CredentialsLocked));
    }

    #[test]
    fn admins_update_anyone() {
        let action = Action::UpdateUser { user_id: "member", touches_credentials: true };
        assert_eq!(authorize(&admin(), action), Ok(()));
        assert_eq!(authorize(&admin(), Action::ModifyPlace { owner_id: "member" }), Ok(()));
        assert_eq!(authorize(&admin(), Action::ModifyReview { author_id: "member" }), Ok(()));
    }

    #[test]
    fn places_and_reviews_need_ownership() {
        assert_eq!(authorize(&member(), Action::CreatePlace { owner_id: "member" }), Ok(()));
        assert_eq!(authorize(&member(), Action::CreatePlace { owner_id: "x" }), Err(Denied::NotOwner));
        assert_eq!(authorize(&member(), Action::ModifyPlace { owner_id: "x" }), Err(Denied::NotOwner));
        assert_eq!(authorize(&member(), Action::CreateReview { author_id: "x" }), Err(Denied::NotOwner));
        assert_eq!(authorize(&member(), Action::ModifyReview { author_id: "member" }), Ok(()));
    }
}
