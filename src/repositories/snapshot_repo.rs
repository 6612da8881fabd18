//! Whole-account export and import.
//!
//! Export reads every table for one user inside a single read transaction
//! and nests children under their parents. Import replaces the user's state
//! with a supplied snapshot in one IMMEDIATE transaction: children are
//! deleted before parents, parents are inserted before children, and any
//! failure rolls the whole thing back. Ids in the supplied document are
//! never used as keys; storage assigns fresh ones.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::{history_repo, scan_history_repo, template_repo};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{ImportSummary, Snapshot};
use crate::user_locks::UserLocks;

#[derive(Clone)]
pub struct SnapshotRepository {
    pool: DbPool,
    locks: UserLocks,
}

impl SnapshotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            locks: UserLocks::new(),
        }
    }

    pub async fn export(&self, user_id: i64) -> Result<Snapshot> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let snapshot = read_snapshot(&tx, user_id)?;
            tx.commit()?;
            Ok(snapshot)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Replaces everything the user owns with `snapshot`. Imports for the same
    /// user run one at a time.
    pub async fn import(&self, user_id: i64, snapshot: Snapshot) -> Result<ImportSummary> {
        let _guard = self.locks.acquire(user_id).await;

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let outcome = replace_snapshot(&tx, user_id, &snapshot);
            let summary = finish_import(tx, outcome)?;
            tracing::info!(
                "Imported snapshot for user {}: {} templates, {} history, {} scans",
                user_id,
                summary.templates,
                summary.history,
                summary.scan_history
            );
            Ok(summary)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

/// Commits a successful import or rolls back a failed one. A failed COMMIT
/// is an import failure too: the transaction is rolled back when dropped.
fn finish_import(
    tx: Transaction<'_>,
    outcome: rusqlite::Result<ImportSummary>,
) -> Result<ImportSummary> {
    match outcome {
        Ok(summary) => {
            tx.commit().map_err(AppError::ImportFailed)?;
            Ok(summary)
        }
        // SQLite rolls back on its own after some errors (e.g. SQLITE_FULL).
        Err(cause) if tx.is_autocommit() => Err(AppError::ImportFailed(cause)),
        Err(cause) => match tx.rollback() {
            Ok(()) => Err(AppError::ImportFailed(cause)),
            Err(rollback) => Err(AppError::RollbackFailed { cause, rollback }),
        },
    }
}

fn read_snapshot(conn: &Connection, user_id: i64) -> rusqlite::Result<Snapshot> {
    Ok(Snapshot {
        templates: template_repo::find_nested_by_user(conn, user_id)?,
        history: history_repo::find_by_user(conn, user_id)?,
        scan_history: scan_history_repo::find_by_user(conn, user_id)?,
    })
}

fn replace_snapshot(
    conn: &Connection,
    user_id: i64,
    snapshot: &Snapshot,
) -> rusqlite::Result<ImportSummary> {
    let deleted = template_repo::delete_by_user(conn, user_id)?;
    let deleted_history = history_repo::delete_by_user(conn, user_id)?;
    let deleted_scans = scan_history_repo::delete_by_user(conn, user_id)?;
    tracing::debug!(
        "Cleared user {}: {} templates, {} exercises, {} sets, {} history, {} scans",
        user_id,
        deleted.templates,
        deleted.exercises,
        deleted.sets,
        deleted_history,
        deleted_scans
    );

    for template in &snapshot.templates {
        template_repo::insert_nested(conn, user_id, template)?;
    }
    for record in &snapshot.history {
        history_repo::insert(conn, user_id, record)?;
    }
    for record in &snapshot.scan_history {
        scan_history_repo::insert(conn, user_id, record)?;
    }

    Ok(ImportSummary::of(snapshot))
}
