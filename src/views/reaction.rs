use crate::models::{ReactionState, ReactionTarget, Tally};
use serde::Serialize;

/// Tally of a target, plus the caller's own state when a user is known.
#[derive(Debug, Serialize)]
pub struct Reactions {
    pub target: ReactionTarget,
    pub target_id: i32,
    #[serde(flatten)]
    pub tally: Tally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ReactionState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_is_inlined() {
        let value = serde_json::to_value(Reactions {
            target: ReactionTarget::Comment,
            target_id: 3,
            tally: Tally::new(3, 1),
            state: Some(ReactionState::Liked),
        })
        .unwrap();

        assert_eq!(value["target"], "comment");
        assert_eq!(value["likes"], 3);
        assert_eq!(value["rating"], 3.75);
        assert_eq!(value["state"], "liked");
    }
}
