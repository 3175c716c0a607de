//! # 게임 세션 API 라우트 핸들러
//!
//! 세션 생성을 처리하는 HTTP 핸들러입니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/v1/create_session | `create_session` | 새 게임 세션 시작 |
//!
//! ## 세션 사용 흐름
//! ```text
//! 1. 클라이언트가 선택 조합을 보냄 → POST /create_session
//! 2. 서버가 조합을 정규화하고 이름/해시를 계산해 세션 저장
//! 3. 응답의 session_id로 → GET /get_cards/{session_id}
//! ```

use crate::{
    db,
    error::AppError,
    models::*, // CreateSessionRequest, CreateSessionResponse
    routes::cards::AppState,
    services,
};
use axum::{extract::State, Json};

/// 새 게임 세션을 시작합니다.
///
/// `POST /api/v1/create_session`
/// + `{ "selections": { "social_context": "friends", "purpose": "fun",
///      "tone": "2", "dynamic": "questions", "hot": true } }`
///
/// ## 처리 흐름
/// 1. 선택 조합 정규화 (dynamic 소문자화)
/// 2. 세션 저장 (이름/해시는 start_session이 계산)
/// 3. 같은 조합으로 프롬프트 메시지 쌍을 조립해 함께 반환
///
/// 본문 필드가 빠지거나 타입이 틀리면 Axum의 Json Extractor가
/// 핸들러 진입 전에 4xx로 거절합니다.
/// base 템플릿이 없는 다이내믹은 프롬프트 조립 단계에서 500으로 끝납니다
/// (시드 데이터 문제이므로 클라이언트 잘못이 아닙니다).
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let selection = req.selections.normalized();
    tracing::info!("Received selections: {}", selection.canonical_name());

    let session = db::start_session(&state.pool, &selection).await?;
    let (system_message, user_message) =
        services::prompts::format_prompt_templates(&state.pool, &selection).await?;
    tracing::info!("Started session with ID: {}", session.id);

    Ok(Json(CreateSessionResponse {
        session_id: session.id,
        system_message,
        user_message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Selection;
    use crate::routes::cards::AppState;
    use crate::testutil::{test_pool, test_selection};
    use axum::extract::State;

    #[tokio::test]
    async fn create_session_persists_and_returns_prompts() {
        let pool = test_pool().await;
        let state = AppState { pool: pool.clone(), llm: None };
        let req = CreateSessionRequest { selections: test_selection() };

        let Json(body) = create_session(State(state), Json(req)).await.unwrap();

        assert!(!body.session_id.is_empty());
        assert!(body.system_message.contains("friends"));
        assert!(body.user_message.contains("amistades"));

        let session = db::get_session(&pool, &body.session_id).await.unwrap().unwrap();
        assert_eq!(session.selection_name, "friends-fun-2-questions");
        assert_eq!(session.selection_hash, test_selection().hash());
    }

    #[tokio::test]
    async fn create_session_normalizes_dynamic_case() {
        let pool = test_pool().await;
        let state = AppState { pool: pool.clone(), llm: None };
        let mut selections = test_selection();
        selections.dynamic = "Questions".to_string();
        let req = CreateSessionRequest { selections };

        let Json(body) = create_session(State(state), Json(req)).await.unwrap();

        let session = db::get_session(&pool, &body.session_id).await.unwrap().unwrap();
        assert_eq!(session.selection_name, "friends-fun-2-questions");
    }

    #[tokio::test]
    async fn create_session_with_unknown_dynamic_is_internal_error() {
        let pool = test_pool().await;
        let state = AppState { pool, llm: None };
        let req = CreateSessionRequest {
            selections: Selection {
                social_context: "friends".to_string(),
                purpose: "fun".to_string(),
                tone: "2".to_string(),
                dynamic: "karaoke".to_string(),
                hot: false,
                drink: false,
            },
        };

        let err = create_session(State(state), Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
