//! # 게임 세션 데이터베이스 쿼리 모듈
//!
//! 세션의 생성과 조회를 담당하는 SQL 쿼리 함수들입니다.
//!
//! ## 세션 라이프사이클
//! ```text
//! [생성] start_session() → 불변 (이후 카드 전달 기록만 session_cards에 쌓임)
//! ```
//!
//! 세션 행에는 선택 조합이 세 가지 형태로 저장됩니다:
//! - `selection`: 원본 JSON (backfill 시 재파싱용)
//! - `selection_name`: 사람이 읽는 이름 (로그/디버깅용)
//! - `selection_hash`: 카드 풀 조회 키

use crate::error::AppError;
use crate::models::{Selection, Session};
use sqlx::SqlitePool;

/// 새 게임 세션을 생성합니다.
///
/// 선택 조합의 이름과 해시는 여기서 한 번 계산되어 영구 저장됩니다.
/// 이후 모든 카드 조회는 저장된 해시를 그대로 사용하므로,
/// 조합 규칙이 바뀌어도 기존 세션의 동작은 변하지 않습니다.
///
/// ## 매개변수
/// - `selection`: 정규화가 끝난 선택 조합 (normalized() 적용 후 전달할 것)
pub async fn start_session(
    pool: &SqlitePool,
    selection: &Selection,
) -> Result<Session, AppError> {
    // UUIDv7으로 세션 ID를 생성합니다
    let id = uuid::Uuid::now_v7().to_string();
    let selection_name = selection.canonical_name();
    let selection_hash = selection.hash();

    // 조합 원본을 JSON 문자열로 직렬화해 보관합니다.
    // 우리 타입을 직렬화하는 것이라 실패할 일은 거의 없지만 Internal로 전파합니다.
    let selection_json = serde_json::to_string(selection)
        .map_err(|e| AppError::Internal(format!("Failed to serialize selection: {}", e)))?;

    // r#"..."#: Rust의 원시 문자열 리터럴 (raw string literal)
    // 이스케이프 처리 없이 줄바꿈과 따옴표를 그대로 쓸 수 있어 SQL 작성에 편리합니다
    sqlx::query(
        r#"
        INSERT INTO sessions (id, selection, selection_name, selection_hash)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&selection_json)
    .bind(&selection_name)
    .bind(&selection_hash)
    .execute(pool)
    .await?; // ?: 에러 발생 시 이 함수에서 즉시 반환 (에러 전파)

    // 생성 직후 조회하여 DB가 채운 기본값(created_at)이 포함된 완전한 객체를 반환
    get_session(pool, &id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve created session".to_string(),
        ))
}

/// ID로 세션 하나를 조회합니다.
///
/// 세션이 존재하면 `Some(Session)`, 없으면 `None`을 반환합니다.
/// 404 처리는 라우트 핸들러에 위임합니다.
pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<Option<Session>, AppError> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, selection, selection_name, selection_hash, created_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool) // 0행이면 None, 1행이면 Some
    .await?;

    Ok(session)
}
