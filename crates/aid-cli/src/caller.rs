// Rust guideline compliant 2026-10-16

//! The identity a command acts as.

use aid_app::AppError;
use aid_core::{require_identity, Identity, Role};
use anyhow::Result;

/// Caller flags shared by every command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CallerArgs {
    /// User id to act as
    #[arg(long = "user", global = true)]
    pub user: Option<String>,

    /// Act with the admin role
    #[arg(long, global = true)]
    pub admin: bool,

    /// Treat the caller as an approved member
    #[arg(long, global = true)]
    pub approved: bool,
}

impl CallerArgs {
    /// Builds the request identity.
    ///
    /// Every caller holds the `user` role; `--admin` adds the admin role.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` if no user id was given.
    pub fn identity(&self) -> Result<Identity> {
        let candidate = self.user.as_ref().map(|id| {
            let identity = Identity::new(id.as_str())
                .with_role(Role::User)
                .approved(self.approved);
            if self.admin {
                identity.with_role(Role::Admin)
            } else {
                identity
            }
        });
        let identity = require_identity(candidate.as_ref()).map_err(AppError::from)?;
        Ok(identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_is_unauthenticated() {
        let err = CallerArgs::default().identity().unwrap_err();
        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.http_status(), 401);
    }

    #[test]
    fn test_admin_flag_adds_role() {
        let args = CallerArgs {
            user: Some("u1".to_string()),
            admin: true,
            approved: true,
        };
        let identity = args.identity().unwrap();
        assert!(identity.is_admin());
        assert!(identity.has_role(Role::User));
        assert!(identity.is_approved);
    }
}
