use crate::configuration::get_configuration;
use crate::helpers::token::{self, Claims};
use crate::models::Role;
use anyhow::Context;

/// Mints a session token for the given actor, signed with the configured
/// secret. The value goes into the cookie named after the role.
pub struct IssueTokenCommand {
    id: i32,
    email: String,
    role: Role,
    ttl_hours: Option<i64>,
}

impl IssueTokenCommand {
    pub fn new(id: i32, email: String, role: Role, ttl_hours: Option<i64>) -> Self {
        Self {
            id,
            email,
            role,
            ttl_hours,
        }
    }
}

impl crate::console::commands::CallableTrait for IssueTokenCommand {
    fn call(&self) -> anyhow::Result<()> {
        let settings = get_configuration().context("Failed to read configuration")?;
        let ttl_hours = self.ttl_hours.unwrap_or(settings.auth.token_ttl_hours);

        let claims = Claims::new(self.id, self.email.clone(), self.role, ttl_hours);
        let token = token::issue(&settings.auth.secret, &claims)?;

        println!("{}={}", self.role.cookie_name(), token);
        Ok(())
    }
}
