//! Member API handlers
//!
//! The sheet is the system of record: `PUT` replaces the member range in
//! the order given, `GET` returns it as stored.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use shared::{ApiResponse, AppResult, MemberRecord};

use crate::state::AppState;

/// GET /api/members
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<MemberRecord>>> {
    let members = state.members.read_members().await?;
    Ok(ApiResponse::success(members))
}

/// PUT /api/members
pub async fn replace(
    State(state): State<AppState>,
    payload: Result<Json<Vec<MemberRecord>>, JsonRejection>,
) -> AppResult<ApiResponse<()>> {
    let Json(members) = payload?;
    state.members.update_members(&members).await?;
    Ok(ApiResponse::ok())
}
