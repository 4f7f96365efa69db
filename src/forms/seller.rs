use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct NewSeller {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(max_length = 255)]
    pub headline: Option<String>,
    #[validate(max_length = 5000)]
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl From<NewSeller> for models::Seller {
    fn from(form: NewSeller) -> Self {
        let mut seller = models::Seller::new(form.name, form.email.to_lowercase());
        seller.headline = form.headline;
        seller.bio = form.bio;
        seller.avatar = form.avatar;
        seller
    }
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct SellerProfile {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(max_length = 255)]
    pub headline: Option<String>,
    #[validate(max_length = 5000)]
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl SellerProfile {
    pub fn update(self, seller: &mut models::Seller) {
        if let Some(name) = self.name {
            seller.name = name;
        }
        if self.headline.is_some() {
            seller.headline = self.headline;
        }
        if self.bio.is_some() {
            seller.bio = self.bio;
        }
        if self.avatar.is_some() {
            seller.avatar = self.avatar;
        }
    }
}
