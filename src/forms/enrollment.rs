use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Progress {
    #[validate(minimum = 1)]
    pub lesson_number: i32,
}
