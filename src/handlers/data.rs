use axum::{
    body::Bytes,
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{ImportSummary, Snapshot};
use crate::repositories::{SessionRepository, SnapshotRepository};

#[derive(Clone, FromRef)]
pub struct DataState {
    pub snapshot_repo: SnapshotRepository,
    pub session_repo: SessionRepository,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: &'static str,
    pub imported: ImportSummary,
}

fn export_filename() -> String {
    format!("fittrack-export-{}.json", Utc::now().format("%Y-%m-%d"))
}

/// Downloads the caller's templates, history and scan history as one document.
pub async fn export(State(state): State<DataState>, auth_user: AuthUser) -> Result<Response> {
    let snapshot = state.snapshot_repo.export(auth_user.id).await?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(snapshot)).into_response())
}

/// Replaces the caller's data with the uploaded document.
///
/// The body is parsed by hand so that a non-object or malformed document is
/// reported as a validation error before any data is touched.
pub async fn import(
    State(state): State<DataState>,
    auth_user: AuthUser,
    body: Bytes,
) -> Result<Json<ImportResponse>> {
    let snapshot = Snapshot::from_slice(&body)?;

    tracing::info!(
        "Importing snapshot for user {} ({} templates)",
        auth_user.id,
        snapshot.templates.len()
    );
    let imported = state.snapshot_repo.import(auth_user.id, snapshot).await?;

    Ok(Json(ImportResponse {
        message: "Data imported successfully",
        imported,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        let name = export_filename();
        assert!(name.starts_with("fittrack-export-"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "fittrack-export-2024-01-01.json".len());
    }
}
