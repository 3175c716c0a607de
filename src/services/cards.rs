//! # 카드 수집 서비스
//!
//! `get_cards` 요청 한 번에 해당하는 전체 오케스트레이션입니다:
//! 후보 풀 조회 → (부족하면) 생성 backfill → 가중 샘플링 → 전달 기록.
//!
//! ## backfill 규칙
//! 생성은 "후보 풀이 표본 크기보다 작을 때, 그리고 그때만" 시도됩니다.
//! 풀이 이미 충분하면 LLM은 호출조차 되지 않습니다.
//! 생성이 실패하거나 LLM이 미설정이어도 요청은 실패하지 않습니다 —
//! 지금 있는 풀에서 뽑을 수 있는 만큼만 돌려줍니다 (표본이 모자랄 수 있음).
//!
//! DB 오류와 저장된 선택 조합의 파싱 실패만 에러로 전파됩니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{Card, Session};
use crate::services::llm::{self, LlmClient};
use crate::services::sampler;

/// 세션에 전달할 카드 표본을 수집합니다.
///
/// ## 처리 흐름
/// 1. 세션 해시의 후보 풀 조회 (수명 정책 필터 적용)
/// 2. 풀이 `sample_size` 미만이면: 저장된 선택 조합을 파싱해 LLM 생성을
///    시도하고, 생성된 카드를 저장한 뒤 풀을 다시 조회
/// 3. 가중 샘플링으로 최대 `sample_size`장 추첨
/// 4. 추첨된 카드를 세션의 전달 기록(session_cards)에 남김
/// 5. 표본 반환
///
/// `llm_client`가 None이면(미설정) 2단계는 생성 실패와 동일하게 동작합니다.
pub async fn collect_session_cards(
    pool: &SqlitePool,
    llm_client: Option<&LlmClient>,
    session: &Session,
    sample_size: usize,
    policy: i64,
) -> Result<Vec<Card>, AppError> {
    let mut available = db::get_cards_by_hash(pool, &session.selection_hash, policy).await?;
    tracing::info!("Retrieved session cards with {} cards", available.len());

    if available.len() < sample_size {
        tracing::info!("Not enough cards found, generating new cards...");

        // 세션에 보관해 둔 조합 원본을 복원합니다. 실패하면 데이터 손상이므로
        // 생성만 건너뛰는 게 아니라 요청 자체를 에러로 끝냅니다.
        let selection = session
            .parse_selection()
            .map_err(|e| AppError::Internal(format!("Failed to parse stored selection: {}", e)))?;

        let descriptions = llm::generate_session_cards(pool, llm_client, &selection).await;
        if !descriptions.is_empty() {
            db::create_cards(
                pool,
                &descriptions,
                &session.selection_hash,
                &session.selection_name,
            )
            .await?;

            // 방금 저장된 카드까지 포함하도록 풀을 다시 읽습니다
            available = db::get_cards_by_hash(pool, &session.selection_hash, policy).await?;
        }
    }

    let sampled = sampler::weighted_sample(available, sample_size, policy, &mut rand::rng());

    // 전달 기록: 어떤 카드가 이 세션에 나갔는지 남깁니다 (중복은 무시됨)
    let card_ids: Vec<String> = sampled.iter().map(|card| card.id.clone()).collect();
    db::create_session_cards(pool, &session.id, &card_ids).await?;

    Ok(sampled)
}
