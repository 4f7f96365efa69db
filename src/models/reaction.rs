//! Like/dislike tracking shared by every reactable entity.
//!
//! A user holds one of three states towards a target: neutral, liked or
//! disliked. Stored as at most one `reaction` row per
//! `(target_kind, target_id, user_id)`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionTarget {
    Blog,
    Post,
    /// forum comment
    Comment,
    /// reply to a forum comment
    Reply,
    Seller,
}

impl ReactionTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionTarget::Blog => "blog",
            ReactionTarget::Post => "post",
            ReactionTarget::Comment => "comment",
            ReactionTarget::Reply => "reply",
            ReactionTarget::Seller => "seller",
        }
    }

    /// Table holding the reacted-to rows.
    pub fn table(&self) -> &'static str {
        match self {
            ReactionTarget::Blog => "blog",
            ReactionTarget::Post => "post",
            ReactionTarget::Comment => "post_comment",
            ReactionTarget::Reply => "comment_reply",
            ReactionTarget::Seller => "seller",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReactionTarget::Blog => "Blog",
            ReactionTarget::Post => "Post",
            ReactionTarget::Comment => "Comment",
            ReactionTarget::Reply => "Reply",
            ReactionTarget::Seller => "Seller",
        }
    }
}

impl FromStr for ReactionTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(ReactionTarget::Blog),
            "post" => Ok(ReactionTarget::Post),
            "comment" => Ok(ReactionTarget::Comment),
            "reply" => Ok(ReactionTarget::Reply),
            "seller" => Ok(ReactionTarget::Seller),
            other => Err(format!("Unknown reaction target {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionKind::Like),
            "dislike" => Ok(ReactionKind::Dislike),
            other => Err(format!("Unknown reaction {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

/// What a user asks for: like, dislike, or take the reaction back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    React(ReactionKind),
    Clear,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReactionError {
    #[error("You already liked this")]
    AlreadyLiked,
    #[error("You already disliked this")]
    AlreadyDisliked,
    #[error("You have not reacted to this")]
    NotReacted,
}

impl ReactionError {
    /// Error for asking again for the reaction already in place.
    pub fn repeated(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => ReactionError::AlreadyLiked,
            ReactionKind::Dislike => ReactionError::AlreadyDisliked,
        }
    }
}

impl ReactionState {
    pub fn kind(&self) -> Option<ReactionKind> {
        match self {
            ReactionState::Neutral => None,
            ReactionState::Liked => Some(ReactionKind::Like),
            ReactionState::Disliked => Some(ReactionKind::Dislike),
        }
    }

    /// Moving to like/dislike drops the opposite reaction; repeating the
    /// current one is refused.
    pub fn react(self, kind: ReactionKind) -> Result<ReactionState, ReactionError> {
        match (self, kind) {
            (ReactionState::Liked, ReactionKind::Like)
            | (ReactionState::Disliked, ReactionKind::Dislike) => Err(ReactionError::repeated(kind)),
            (_, ReactionKind::Like) => Ok(ReactionState::Liked),
            (_, ReactionKind::Dislike) => Ok(ReactionState::Disliked),
        }
    }

    pub fn clear(self) -> Result<ReactionState, ReactionError> {
        match self {
            ReactionState::Neutral => Err(ReactionError::NotReacted),
            _ => Ok(ReactionState::Neutral),
        }
    }

    pub fn apply(self, change: ReactionChange) -> Result<ReactionState, ReactionError> {
        match change {
            ReactionChange::React(kind) => self.react(kind),
            ReactionChange::Clear => self.clear(),
        }
    }
}

impl From<Option<ReactionKind>> for ReactionState {
    fn from(kind: Option<ReactionKind>) -> Self {
        match kind {
            None => ReactionState::Neutral,
            Some(ReactionKind::Like) => ReactionState::Liked,
            Some(ReactionKind::Dislike) => ReactionState::Disliked,
        }
    }
}

/// Likes, dislikes and the 0..=5 rating derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub likes: i64,
    pub dislikes: i64,
    pub rating: f64,
}

impl Tally {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self {
            likes,
            dislikes,
            rating: rating(likes, dislikes),
        }
    }
}

/// `likes / (likes + dislikes) * 5`, rounded to two decimals; 0 without votes.
pub fn rating(likes: i64, dislikes: i64) -> f64 {
    let total = likes + dislikes;
    if total <= 0 {
        return 0.0;
    }
    let rating = likes as f64 / total as f64 * 5.0;
    (rating * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_can_like_or_dislike() {
        assert_eq!(
            ReactionState::Neutral.react(ReactionKind::Like),
            Ok(ReactionState::Liked)
        );
        assert_eq!(
            ReactionState::Neutral.react(ReactionKind::Dislike),
            Ok(ReactionState::Disliked)
        );
    }

    #[test]
    fn switching_replaces_the_opposite_reaction() {
        assert_eq!(
            ReactionState::Liked.react(ReactionKind::Dislike),
            Ok(ReactionState::Disliked)
        );
        assert_eq!(
            ReactionState::Disliked.react(ReactionKind::Like),
            Ok(ReactionState::Liked)
        );
    }

    #[test]
    fn repeating_a_reaction_is_refused() {
        assert_eq!(
            ReactionState::Liked.react(ReactionKind::Like),
            Err(ReactionError::AlreadyLiked)
        );
        assert_eq!(
            ReactionState::Disliked.react(ReactionKind::Dislike),
            Err(ReactionError::AlreadyDisliked)
        );
        assert_eq!(
            ReactionError::repeated(ReactionKind::Dislike),
            ReactionError::AlreadyDisliked
        );
    }

    #[test]
    fn clearing_requires_a_reaction() {
        assert_eq!(ReactionState::Liked.clear(), Ok(ReactionState::Neutral));
        assert_eq!(ReactionState::Disliked.clear(), Ok(ReactionState::Neutral));
        assert_eq!(ReactionState::Neutral.clear(), Err(ReactionError::NotReacted));
    }

    #[test]
    fn apply_dispatches_changes() {
        let state = ReactionState::Neutral
            .apply(ReactionChange::React(ReactionKind::Like))
            .and_then(|s| s.apply(ReactionChange::React(ReactionKind::Dislike)))
            .and_then(|s| s.apply(ReactionChange::Clear));
        assert_eq!(state, Ok(ReactionState::Neutral));
        assert_eq!(
            ReactionState::Neutral.apply(ReactionChange::Clear),
            Err(ReactionError::NotReacted)
        );
    }

    #[test]
    fn state_round_trips_through_kind() {
        for state in [
            ReactionState::Neutral,
            ReactionState::Liked,
            ReactionState::Disliked,
        ] {
            assert_eq!(ReactionState::from(state.kind()), state);
        }
    }

    #[test]
    fn rating_is_share_of_likes_out_of_five() {
        assert_eq!(rating(0, 0), 0.0);
        assert_eq!(rating(3, 1), 3.75);
        assert_eq!(rating(1, 2), 1.67);
        assert_eq!(rating(4, 0), 5.0);
        assert_eq!(rating(0, 4), 0.0);
        assert_eq!(Tally::new(3, 1).rating, 3.75);
    }

    #[test]
    fn target_parses_from_path_segment() {
        let target: ReactionTarget = serde_json::from_str("\"reply\"").unwrap();
        assert_eq!(target, ReactionTarget::Reply);
        assert_eq!(target.table(), "comment_reply");
        assert!(serde_json::from_str::<ReactionTarget>("\"course\"").is_err());
        assert_eq!("dislike".parse::<ReactionKind>(), Ok(ReactionKind::Dislike));
        assert!("meh".parse::<ReactionKind>().is_err());
        assert_eq!("seller".parse::<ReactionTarget>(), Ok(ReactionTarget::Seller));
        assert!("course".parse::<ReactionTarget>().is_err());
    }
}
