//! # 다이내믹(게임 방식) 라우트 핸들러
//!
//! 클라이언트의 선택 화면이 "어떤 게임 방식을 고를 수 있는지" 묻는
//! 조회 전용 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/v1/get_dynamics` → `[{ "name": "questions" }, ...]`

use crate::{db, error::AppError, models::Dynamic, routes::cards::AppState};
use axum::{extract::State, Json};

/// `GET /get_dynamics` — 플레이 가능한 다이내믹 목록을 조회합니다.
///
/// 목록은 base 프롬프트 템플릿에서 파생됩니다:
/// base 템플릿이 있는 다이내믹만 실제로 카드를 만들 수 있기 때문입니다.
pub async fn get_dynamics(State(state): State<AppState>) -> Result<Json<Vec<Dynamic>>, AppError> {
    let dynamics = db::get_dynamics(&state.pool).await?;
    tracing::info!("Retrieved {} dynamics", dynamics.len());
    Ok(Json(dynamics))
}
