use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct NewUser {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    pub avatar: Option<String>,
    #[validate(max_length = 5000)]
    pub bio: Option<String>,
}

impl From<NewUser> for models::User {
    fn from(form: NewUser) -> Self {
        let mut user = models::User::new(form.name, form.email.to_lowercase());
        user.avatar = form.avatar;
        user.bio = form.bio;
        user
    }
}

/// Profile edit. Missing fields stay as they are.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct UserProfile {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    pub avatar: Option<String>,
    #[validate(max_length = 5000)]
    pub bio: Option<String>,
}

impl UserProfile {
    pub fn update(self, user: &mut models::User) {
        if let Some(name) = self.name {
            user.name = name;
        }

        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }

        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_look_like_an_address() {
        let form: NewUser =
            serde_json::from_str(r#"{"name":"Ann","email":"not-an-email"}"#).unwrap();
        assert!(form.validate().is_err());

        let form: NewUser =
            serde_json::from_str(r#"{"name":"Ann","email":"Ann@Example.com"}"#).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(models::User::from(form).email, "ann@example.com");
    }

    #[test]
    fn empty_name_is_rejected() {
        let form: NewUser = serde_json::from_str(r#"{"name":"","email":"a@b.io"}"#).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn profile_update_keeps_missing_fields() {
        let mut user = models::User::new("Ann".to_string(), "a@b.io".to_string());
        user.bio = Some("old".to_string());

        let form: UserProfile = serde_json::from_str(r#"{"avatar":"https://img/1.png"}"#).unwrap();
        form.update(&mut user);

        assert_eq!(user.name, "Ann");
        assert_eq!(user.avatar.as_deref(), Some("https://img/1.png"));
        assert_eq!(user.bio.as_deref(), Some("old"));
    }
}
