use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

impl Role {
    /// Cookie the session token of this role travels in.
    pub fn cookie_name(&self) -> &'static str {
        match self {
            Role::User => "userToken",
            Role::Seller => "sellerToken",
            Role::Admin => "adminToken",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Seller => write!(f, "seller"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Authenticated caller, built from verified token claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

/// Everything the authentication middleware found on a request. A browser may
/// hold a user and a seller session at the same time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<Arc<Actor>>,
    pub seller: Option<Arc<Actor>>,
    pub admin: Option<Arc<Actor>>,
}

impl Session {
    pub fn set(&mut self, actor: Actor) {
        let slot = match actor.role {
            Role::User => &mut self.user,
            Role::Seller => &mut self.seller,
            Role::Admin => &mut self.admin,
        };
        *slot = Some(Arc::new(actor));
    }

    pub fn is_anonymous(&self) -> bool {
        self.user.is_none() && self.seller.is_none() && self.admin.is_none()
    }
}
