use crate::models::{self, Tally};
use serde::Serialize;
use std::collections::HashMap;

/// Forum index entry.
#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub post: models::Post,
    pub comments: i64,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Serialize)]
pub struct ReplyNode {
    #[serde(flatten)]
    pub reply: models::Comment,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: models::Comment,
    #[serde(flatten)]
    pub tally: Tally,
    pub replies: Vec<ReplyNode>,
}

/// A post with its comments and their replies, each with its tally.
#[derive(Debug, Serialize)]
pub struct Thread {
    #[serde(flatten)]
    pub post: models::Post,
    #[serde(flatten)]
    pub tally: Tally,
    pub comments: Vec<CommentNode>,
}

impl Thread {
    /// Hangs `replies` under their comments, keeping the given order.
    /// Tallies missing from the maps count as no reactions.
    pub fn assemble(
        post: models::Post,
        tally: Tally,
        comments: Vec<models::Comment>,
        replies: Vec<models::Comment>,
        comment_tallies: &HashMap<i32, Tally>,
        reply_tallies: &HashMap<i32, Tally>,
    ) -> Self {
        let mut by_comment: HashMap<i32, Vec<ReplyNode>> = HashMap::new();
        for reply in replies {
            let tally = reply_tallies.get(&reply.id).copied().unwrap_or_default();
            by_comment
                .entry(reply.parent_id)
                .or_default()
                .push(ReplyNode { reply, tally });
        }

        let comments = comments
            .into_iter()
            .map(|comment| CommentNode {
                tally: comment_tallies.get(&comment.id).copied().unwrap_or_default(),
                replies: by_comment.remove(&comment.id).unwrap_or_default(),
                comment,
            })
            .collect();

        Self {
            post,
            tally,
            comments,
        }
    }
}
