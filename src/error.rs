//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 에러 분류:
//! - 요청 본문/파라미터 문제 → 400 BadRequest
//! - 존재하지 않는 세션 등 → 404 NotFound
//! - DB 오류, 템플릿 설정 오류 → 500 (상세 내용은 로그에만 기록)
//!
//! 참고: LLM 호출 실패는 AppError로 전파되지 않습니다.
//! 카드 생성은 best-effort이므로 services::llm 내부에서 회수되어
//! "생성 결과 0장"으로 처리됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json; // json! 매크로로 에러 응답 본문을 만듭니다
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 핸들러와 db/services 함수들이 공통으로 반환하는 에러입니다.
/// 핸들러가 `Err(AppError)`를 반환하면 Axum이 아래의 `IntoResponse`
/// 구현을 거쳐 상태 코드 + JSON 본문으로 바꿔줍니다.
///
/// thiserror의 `#[derive(Error)]`가 std::error::Error 구현을,
/// `#[error("...")]` 어트리뷰트가 Display(에러 메시지 문자열)를 만들어 줍니다.
/// 덕분에 variant마다 Display를 손으로 구현할 필요가 없습니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스가 없음 (HTTP 404)
    /// 주로 존재하지 않는 session_id로 카드를 요청했을 때 발생합니다.
    #[error("Resource not found")]
    NotFound,

    /// 클라이언트가 고칠 수 있는 요청 오류 (HTTP 400)
    /// 들어 있는 String이 그대로 응답 메시지가 됩니다.
    /// ({0}은 튜플 variant의 첫 필드를 가리키는 포맷 문법)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 쪽 문제 (HTTP 500)
    /// base 프롬프트 템플릿 누락, 저장된 선택 조합 파싱 실패처럼
    /// 클라이언트 잘못이 아닌 설정/데이터 문제가 여기에 속합니다.
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    ///
    /// `#[from]`은 `From<sqlx::Error> for AppError`를 자동 구현합니다.
    /// 따라서 sqlx 쿼리 뒤에 `?`만 붙이면 변환이 암묵적으로 일어납니다.
    /// 이 한 줄이 db/ 계층 전체의 에러 변환 보일러플레이트를 없애줍니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// AppError → HTTP 응답 변환.
// Axum은 핸들러의 반환값에 IntoResponse를 요구하므로,
// 여기에 구현해 두면 모든 핸들러가 `Result<_, AppError>`를 그대로 반환할 수 있습니다.
impl IntoResponse for AppError {
    /// 에러 종류별로 (상태 코드, 에러 코드, 메시지)를 결정하고
    /// `{"error": {"code", "message"}}` 형태의 JSON 응답을 만듭니다.
    ///
    /// 원칙: 4xx는 클라이언트에게 원인을 말해 주고,
    /// 5xx는 실제 원인을 로그에만 남기고 일반 메시지를 돌려줍니다.
    /// (내부 구조나 SQL 내용이 응답으로 새어 나가는 것을 막기 위함)
    fn into_response(self) -> Response {
        // enum의 모든 variant를 빠짐없이 처리해야 컴파일됩니다 (exhaustive match)
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),

            // ref: 값을 match 밖으로 이동시키지 않고 참조로만 봅니다.
            // self를 통째로 소비하지 않아야 다른 곳에서 self.to_string()을 쓸 수 있습니다.
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                // 실제 원인은 서버 로그로
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    // 클라이언트에게는 일반 메시지만
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // (StatusCode, Json) 튜플은 Axum이 곧바로 응답으로 변환할 수 있습니다
        (status, body).into_response()
    }
}
