use crate::models::{
    ReactionChange, ReactionError, ReactionKind, ReactionState, ReactionTarget, Tally,
};
use sqlx::{PgConnection, PgExecutor, PgPool};
use std::collections::HashMap;
use tracing::Instrument;

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error(transparent)]
    Rejected(#[from] ReactionError),
    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for ApplyError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Failed to apply reaction: {:?}", err);
        ApplyError::Database("Could not save reaction".to_string())
    }
}

pub async fn target_exists(pool: &PgPool, target: ReactionTarget, id: i32) -> Result<bool, String> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", target.table());
    sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to check {} existence: {:?}", target.as_str(), err);
            "Could not fetch data".to_string()
        })
}

async fn fetch_kind<'e, E: PgExecutor<'e>>(
    executor: E,
    target: ReactionTarget,
    id: i32,
    user_id: i32,
    lock: bool,
) -> Result<Option<ReactionKind>, sqlx::Error> {
    let sql = format!(
        "SELECT kind FROM reaction WHERE target_kind = $1 AND target_id = $2 AND user_id = $3{}",
        if lock { " FOR UPDATE" } else { "" }
    );
    let kind = sqlx::query_scalar::<_, String>(&sql)
        .bind(target.as_str())
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

    // the column is CHECK-constrained to the two known kinds
    Ok(kind.and_then(|kind| kind.parse().ok()))
}

async fn fetch_tally<'e, E: PgExecutor<'e>>(
    executor: E,
    target: ReactionTarget,
    id: i32,
) -> Result<Tally, sqlx::Error> {
    let (likes, dislikes) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE kind = 'like'),
            COUNT(*) FILTER (WHERE kind = 'dislike')
        FROM reaction
        WHERE target_kind = $1 AND target_id = $2
        "#,
    )
    .bind(target.as_str())
    .bind(id)
    .fetch_one(executor)
    .await?;

    Ok(Tally::new(likes, dislikes))
}

pub async fn tally(pool: &PgPool, target: ReactionTarget, id: i32) -> Result<Tally, String> {
    fetch_tally(pool, target, id).await.map_err(|err| {
        tracing::error!("Failed to count reactions: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Tallies of many targets of one kind; targets without reactions are absent.
pub async fn tallies(
    pool: &PgPool,
    target: ReactionTarget,
    ids: &[i32],
) -> Result<HashMap<i32, Tally>, String> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let query_span = tracing::info_span!("Count reactions of targets.", target = target.as_str());
    sqlx::query_as::<_, (i32, i64, i64)>(
        r#"
        SELECT
            target_id,
            COUNT(*) FILTER (WHERE kind = 'like'),
            COUNT(*) FILTER (WHERE kind = 'dislike')
        FROM reaction
        WHERE target_kind = $1 AND target_id = ANY($2)
        GROUP BY target_id
        "#,
    )
    .bind(target.as_str())
    .bind(ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map(|rows| {
        rows.into_iter()
            .map(|(id, likes, dislikes)| (id, Tally::new(likes, dislikes)))
            .collect()
    })
    .map_err(|err| {
        tracing::error!("Failed to count reactions: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_state(
    pool: &PgPool,
    target: ReactionTarget,
    id: i32,
    user_id: i32,
) -> Result<ReactionState, String> {
    fetch_kind(pool, target, id, user_id, false)
        .await
        .map(ReactionState::from)
        .map_err(|err| {
            tracing::error!("Failed to fetch reaction: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Moves the user's reaction on a target and returns the new state with the
/// recomputed tally. An existing row is locked for the duration; when two
/// requests race on a not yet existing reaction the conditional upsert lets
/// only one of them through.
pub async fn apply(
    pool: &PgPool,
    target: ReactionTarget,
    id: i32,
    user_id: i32,
    change: ReactionChange,
) -> Result<(ReactionState, Tally), ApplyError> {
    let query_span = tracing::info_span!(
        "Apply reaction.",
        target = target.as_str(),
        id,
        user_id,
        ?change
    );

    async {
        let mut tx = pool.begin().await?;

        let current = ReactionState::from(fetch_kind(&mut *tx, target, id, user_id, true).await?);
        let next = current.apply(change)?;
        write_state(&mut *tx, target, id, user_id, next).await?;

        let tally = fetch_tally(&mut *tx, target, id).await?;
        tx.commit().await?;

        Ok((next, tally))
    }
    .instrument(query_span)
    .await
}

/// Stores `state`. When a concurrent request got there first the row already
/// holds the requested state, nothing is written and the change is rejected
/// the same way a repeated reaction is.
async fn write_state(
    conn: &mut PgConnection,
    target: ReactionTarget,
    id: i32,
    user_id: i32,
    state: ReactionState,
) -> Result<(), ApplyError> {
    match state.kind() {
        Some(kind) => {
            let written = sqlx::query(
                r#"
                INSERT INTO reaction (target_kind, target_id, user_id, kind, created_at, updated_at)
                VALUES ($1, $2, $3, $4, NOW(), NOW())
                ON CONFLICT (target_kind, target_id, user_id)
                DO UPDATE SET kind = EXCLUDED.kind, updated_at = NOW()
                WHERE reaction.kind <> EXCLUDED.kind
                "#,
            )
            .bind(target.as_str())
            .bind(id)
            .bind(user_id)
            .bind(kind.as_str())
            .execute(&mut *conn)
            .await?
            .rows_affected();

            if written == 0 {
                return Err(ReactionError::repeated(kind).into());
            }
        }
        None => {
            let deleted = sqlx::query(
                r#"DELETE FROM reaction WHERE target_kind = $1 AND target_id = $2 AND user_id = $3"#,
            )
            .bind(target.as_str())
            .bind(id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

            if deleted == 0 {
                return Err(ReactionError::NotReacted.into());
            }
        }
    }

    Ok(())
}

/// Drops every reaction on the given targets; used when the targets are deleted.
pub async fn delete_for_targets(
    conn: &mut PgConnection,
    target: ReactionTarget,
    ids: &[i32],
) -> Result<(), sqlx::Error> {
    if ids.is_empty() {
        return Ok(());
    }

    sqlx::query(r#"DELETE FROM reaction WHERE target_kind = $1 AND target_id = ANY($2)"#)
        .bind(target.as_str())
        .bind(ids)
        .execute(&mut *conn)
        .await
        .map(|_| ())
}
