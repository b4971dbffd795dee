//! Login, registration, and logout against the backend

pub mod models;

pub use models::*;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::nav::Navigator;
use crate::session::{Session, SessionStore};

const LOGIN_PATH: &str = "/api/users/login/";
const REGISTER_PATH: &str = "/api/users/register/";

/// Minimum password length enforced by the backend's registration serializer
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Log in with the given credentials.
///
/// On success the access token and identity from the response are committed
/// to the session store. A response without a token is a login failure.
pub async fn login(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    credentials: &Credentials,
) -> Result<Session> {
    tracing::debug!("Logging in as '{}'", credentials.username);

    let data: LoginData = client
        .post_json(LOGIN_PATH, credentials, store, nav)
        .await
        .map_err(|e| match e {
            // A 401 here is a rejected credential pair, not an expired
            // session; the response hook has already run.
            Error::SessionExpired => Error::LoginFailed("invalid username or password".to_string()),
            Error::Api { message, .. } => Error::LoginFailed(message),
            other => other,
        })?;

    if data.access.is_empty() {
        return Err(Error::LoginFailed("no token in response".to_string()));
    }

    let session = Session::new(data.access, data.username, data.user_id);
    store.commit(session.clone())?;

    tracing::info!("Logged in as '{}'", session.username);
    Ok(session)
}

/// Register a new account.
///
/// Password rules mirror the backend: at least [`MIN_PASSWORD_LENGTH`]
/// characters, confirmation must match. Violations are rejected before any
/// network call.
pub async fn register(
    client: &ApiClient,
    store: &mut SessionStore,
    nav: &mut Navigator,
    request: &RegisterRequest,
) -> Result<RegisterData> {
    request.validate()?;

    tracing::debug!("Registering account '{}'", request.username);
    client.post_json(REGISTER_PATH, request, store, nav).await
}

/// Log out: clear the session and its durable storage. No server call,
/// no failure mode beyond the storage itself.
pub fn logout(store: &mut SessionStore) -> Result<()> {
    store.clear()?;
    tracing::info!("Logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_short_password() {
        let request = RegisterRequest {
            username: "alice".into(),
            password: "12345".into(),
            password_confirm: "12345".into(),
            school: "Springfield".into(),
            subject: "math".into(),
            audit_material: "docs/proof.pdf".into(),
        };
        assert!(matches!(request.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_register_rejects_mismatched_confirmation() {
        let request = RegisterRequest {
            username: "alice".into(),
            password: "secret1".into(),
            password_confirm: "secret2".into(),
            school: "Springfield".into(),
            subject: "math".into(),
            audit_material: "docs/proof.pdf".into(),
        };
        assert!(matches!(request.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_register_accepts_valid_request() {
        let request = RegisterRequest {
            username: "alice".into(),
            password: "secret1".into(),
            password_confirm: "secret1".into(),
            school: "Springfield".into(),
            subject: "math".into(),
            audit_material: "docs/proof.pdf".into(),
        };
        assert!(request.validate().is_ok());
    }
}
