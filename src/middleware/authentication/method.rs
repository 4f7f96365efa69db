use crate::configuration::Settings;
use crate::helpers::token;
use crate::models::{Actor, Role, Session};
use actix_web::{dev::ServiceRequest, web};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("settings are not registered")]
    Misconfigured,
}

/// Verifies `userToken`, `sellerToken` and `adminToken`. A cookie that is
/// present but invalid rejects the whole request.
#[tracing::instrument(name = "Authenticate with cookies", skip(req))]
pub fn try_cookies(req: &ServiceRequest) -> Result<Session, AuthError> {
    let mut session = Session::default();
    let secret = match req.app_data::<web::Data<Settings>>() {
        Some(settings) => settings.auth.secret.clone(),
        None => {
            tracing::error!("Settings are missing from app data");
            return Err(AuthError::Misconfigured);
        }
    };

    for role in [Role::User, Role::Seller, Role::Admin] {
        let Some(cookie) = req.cookie(role.cookie_name()) else {
            continue;
        };

        let actor = verify_cookie(&secret, role, cookie.value())?;
        tracing::debug!("Authenticated {} {}", actor.role, actor.id);
        session.set(actor);
    }

    if session.is_anonymous() {
        tracing::debug!("Anonymous request");
    }

    Ok(session)
}

fn verify_cookie(secret: &str, role: Role, value: &str) -> Result<Actor, AuthError> {
    let claims = token::verify(secret, value).map_err(|err| {
        tracing::info!("Rejected {}: {}", role.cookie_name(), err);
        AuthError::Rejected(format!("Invalid {}", role.cookie_name()))
    })?;

    if claims.role != role {
        tracing::info!(
            "Rejected {}: token was issued for {}",
            role.cookie_name(),
            claims.role
        );
        return Err(AuthError::Rejected(format!("Invalid {}", role.cookie_name())));
    }

    Ok(Actor {
        id: claims.sub,
        email: claims.email,
        role,
    })
}
