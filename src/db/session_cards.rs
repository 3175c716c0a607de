//! # 세션-카드 전달 기록 쿼리 모듈
//!
//! 세션과 카드의 다대다(N:M) 관계 테이블 `session_cards`를 관리합니다.
//! "이 세션에 이 카드가 언제 전달됐고, 실제로 보였는지"를 기록합니다.
//!
//! ## 테이블 구조
//! - PRIMARY KEY (session_id, card_id) — 같은 세션에 같은 카드는 한 번만 기록
//! - `delivered_at`: 샘플링되어 전달된 시각 (DB 기본값)
//! - `viewed`: 클라이언트가 노출을 보고했는지 (0/1)

use crate::error::AppError;
use sqlx::SqlitePool;

/// 샘플링된 카드들을 세션의 전달 기록에 추가합니다.
///
/// `INSERT OR IGNORE`: 이미 동일한 (session_id, card_id) 조합이 존재하면
/// 에러를 발생시키지 않고 무시합니다. 재샘플링으로 같은 카드가 다시
/// 전달되더라도 최초 기록이 유지됩니다.
/// (session_cards 테이블의 PRIMARY KEY가 복합키이므로 중복 시 충돌 발생)
pub async fn create_session_cards(
    pool: &SqlitePool,
    session_id: &str,
    card_ids: &[String],
) -> Result<(), AppError> {
    for card_id in card_ids {
        sqlx::query("INSERT OR IGNORE INTO session_cards (session_id, card_id) VALUES (?, ?)")
            .bind(session_id)
            .bind(card_id)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// 전달 기록에 "실제로 보였음" 표시를 합니다.
///
/// 카드 상태 보고에 session_id가 포함된 경우에만 호출되는 보조 기록입니다.
///
/// ## 반환값
/// - `true`: 표시 성공
/// - `false`: 해당 세션-카드 전달 기록이 존재하지 않음
///   (호출부가 warn 로그만 남기고 무시하는 best-effort 쓰기입니다)
pub async fn mark_session_card_viewed(
    pool: &SqlitePool,
    session_id: &str,
    card_id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE session_cards SET viewed = 1 WHERE session_id = ? AND card_id = ?",
    )
    .bind(session_id)
    .bind(card_id)
    .execute(pool)
    .await?;

    // rows_affected(): 이 쿼리로 영향받은 행 수를 반환
    Ok(result.rows_affected() > 0)
}
