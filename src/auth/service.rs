use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::password::verify_password;
use crate::auth::repo::User;
use crate::auth::role::Role;
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Credential check behind login. The lookup key is `(email, role)`, so an
/// account that exists under a different role is reported as not found —
/// distinctly from a wrong password.
pub async fn verify_credentials(
    db: &PgPool,
    email: &str,
    candidate: &str,
    role: Role,
) -> Result<User, ApiError> {
    let user = User::find_by_email_and_role(db, email, role)
        .await?
        .ok_or_else(|| {
            warn!(%email, %role, "login unknown user");
            ApiError::UserNotFound
        })?;

    if !verify_password(candidate, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.edu"));
        assert!(is_valid_email("student@panimalar.edu"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@x.edu"));
    }
}
