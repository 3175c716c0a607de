//! # 카드 라우트 핸들러
//!
//! 카드 조회와 상태 보고를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET  /api/v1/get_cards/{session_id}` → 세션에 전달할 카드 표본
//! - `POST /api/v1/update_card_status`     → 노출/좋아요 보고
//!
//! ## Axum 핸들러 패턴
//! Axum 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다.
//! Extractor는 HTTP 요청에서 데이터를 자동으로 추출합니다:
//! - `State(state)`: 앱 전역 상태 (DB 풀, LLM 클라이언트)
//! - `Path(id)`: URL 경로 파라미터 (예: /get_cards/{session_id})
//! - `Json(body)`: 요청 본문을 JSON으로 파싱하여 구조체로 변환
//!
//! 반환 타입이 `Result<T, AppError>`이면, Axum이 자동으로:
//! - `Ok(T)` → T를 HTTP 응답으로 변환 (IntoResponse 트레이트 사용)
//! - `Err(AppError)` → AppError를 에러 JSON 응답으로 변환

use crate::{
    db,              // 데이터베이스 접근 계층
    error::AppError,
    models::*,       // 데이터 모델 구조체들
    services,        // 도메인 로직 (샘플링, backfill)
    services::llm::LlmClient,
};
use axum::{
    extract::{Path, State}, // Axum Extractor: 요청에서 데이터 추출
    Json,                   // JSON 요청/응답 래퍼
};
use serde_json::{json, Value}; // JSON 값 생성 유틸리티
use sqlx::SqlitePool;          // SQLite 연결 풀 타입

/// 한 번의 요청에 전달하는 카드 수
const SAMPLE_SIZE: usize = 10;
/// 카드 수명 정책: 이 횟수만큼 보여지면 은퇴
const LIFETIME_POLICY: i64 = 5;

// #[derive(Clone)]: AppState가 Clone 트레이트를 구현하게 합니다.
// Axum의 State Extractor는 내부적으로 AppState를 clone하므로 필수입니다.
// SqlitePool은 Arc<내부상태>를 사용하므로 clone해도 실제 풀이 복제되지 않습니다.

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 의존성 주입(Dependency Injection) 메커니즘입니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// LLM 클라이언트 — None이면 카드 생성 없이 기존 풀만 사용
    pub llm: Option<LlmClient>,
}

/// `GET /get_cards/{session_id}` — 세션에 전달할 카드들을 가져옵니다.
///
/// ## 처리 흐름
/// 1. 세션 조회 — 없으면 404
/// 2. services::cards::collect_session_cards로 위임
///    (풀 조회 → 부족 시 생성 → 가중 샘플링 → 전달 기록)
/// 3. 내부 필드를 뺀 `CardResponse` 배열로 응답
///
/// 풀이 모자라고 생성도 실패하면 10장 미만(0장 포함)이 돌아올 수 있습니다.
/// 이는 정상 응답이지 에러가 아닙니다.
pub async fn get_cards(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<CardResponse>>, AppError> {
    let session = db::get_session(&state.pool, &session_id)
        .await?
        // .ok_or(): Option이 None이면 지정한 에러를 반환합니다.
        // 세션을 찾지 못하면 404 NotFound 응답이 됩니다.
        .ok_or(AppError::NotFound)?;
    tracing::info!("Retrieved session info: {}", session.selection_name);

    let cards = services::cards::collect_session_cards(
        &state.pool,
        state.llm.as_ref(), // Option<LlmClient> → Option<&LlmClient>
        &session,
        SAMPLE_SIZE,
        LIFETIME_POLICY,
    )
    .await?;

    // Vec<Card> → Vec<CardResponse>: From 구현으로 내부 필드를 걸러냅니다
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

/// `POST /update_card_status` — 카드가 보여졌음을 보고합니다.
///
/// 요청 본문: `{ "session_id"?, "card_id", "liked"? }`
///
/// ## 갱신 규칙
/// - `times_shown`은 항상 +1 (보고 한 번 = 노출 한 번)
/// - `liked`가 true면 `like_count`도 +1
/// - `session_id`가 있으면 전달 기록에 viewed 표시 — 이 보조 기록은
///   실패해도 요청을 실패시키지 않습니다 (warn 로그만 남김)
///
/// 존재하지 않는 card_id는 0행 갱신으로 끝나고 응답은 그대로 성공입니다.
pub async fn update_card_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateCardStatusRequest>,
) -> Result<Json<Value>, AppError> {
    if req.card_id.is_empty() {
        return Err(AppError::BadRequest("Please provide card_id".to_string()));
    }

    db::update_card_status(&state.pool, &req.card_id, req.liked.unwrap_or(false)).await?;

    // 보조 기록: 세션이 명시된 경우에만, best-effort로
    if let Some(session_id) = req.session_id.as_deref() {
        if let Err(e) = db::mark_session_card_viewed(&state.pool, session_id, &req.card_id).await {
            tracing::warn!("Failed to mark session card as viewed: {}", e);
        }
    }

    Ok(Json(json!({ "status": "success" })))
}
