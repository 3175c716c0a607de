//! # 카드 데이터베이스 쿼리 모듈
//!
//! 카드 풀 조회, 생성 카드 저장, 노출/좋아요 카운터 갱신을 담당합니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.
//!
//! ## 수명 정책(lifetime policy)
//! 카드는 삭제되지 않습니다. `times_shown`이 정책 한도에 도달하면
//! `get_cards_by_hash`의 WHERE 조건에 걸려 조회 대상에서 빠질 뿐입니다.

use crate::error::AppError;
use crate::models::Card;
use chrono::Utc;
use sqlx::SqlitePool;

/// 특정 조합 해시의 "아직 살아있는" 카드들을 조회합니다.
///
/// `times_shown < policy` 조건으로 수명이 다한 카드를 걸러냅니다.
/// 샘플링 가중치 계산은 여기서 하지 않습니다 — SQL은 후보 풀만 넘기고,
/// 가중 추첨은 services::sampler가 순수 함수로 수행합니다 (테스트 용이성).
pub async fn get_cards_by_hash(
    pool: &SqlitePool,
    combination_hash: &str,
    policy: i64,
) -> Result<Vec<Card>, AppError> {
    let cards = sqlx::query_as::<_, Card>(
        r#"
        SELECT id, card_data, combination_hash, combination_name,
               times_shown, like_count, last_shown_at, created_at
        FROM cards
        WHERE combination_hash = ? AND times_shown < ?
        ORDER BY created_at
        "#,
    )
    .bind(combination_hash)
    .bind(policy)
    .fetch_all(pool) // 모든 행을 Vec으로 반환 (0개여도 빈 Vec)
    .await?;

    Ok(cards)
}

/// LLM이 생성한 카드 내용들을 카드 풀에 저장합니다.
///
/// ## 처리 흐름
/// 1. 내용 하나당 UUIDv7 ID를 생성
/// 2. 세션의 조합 해시/이름을 붙여 INSERT (카운터는 DB 기본값 0)
/// 3. 생성된 ID 목록을 반환
///
/// `.bind()`는 SQL의 `?` 플레이스홀더에 값을 바인딩합니다.
/// 직접 문자열을 SQL에 넣지 않고 바인딩을 쓰는 이유: SQL 인젝션 방지
/// (card_data는 LLM 출력이므로 특히 신뢰할 수 없는 입력입니다)
pub async fn create_cards(
    pool: &SqlitePool,
    descriptions: &[String],
    combination_hash: &str,
    combination_name: &str,
) -> Result<Vec<String>, AppError> {
    let mut ids = Vec::with_capacity(descriptions.len());

    for description in descriptions {
        // UUIDv7: 시간 기반 UUID로, 생성 순서대로 정렬됩니다
        let id = uuid::Uuid::now_v7().to_string();

        sqlx::query(
            r#"
            INSERT INTO cards (id, card_data, combination_hash, combination_name)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(description)
        .bind(combination_hash)
        .bind(combination_name)
        .execute(pool)
        .await?;

        tracing::info!("Created new card {}", id);
        ids.push(id);
    }

    Ok(ids)
}

/// 카드의 노출/좋아요 카운터를 갱신합니다.
///
/// 호출 한 번 = 노출 한 번: `times_shown`은 무조건 +1 되고
/// `last_shown_at`이 현재 시각으로 갱신됩니다.
/// `liked`가 true면 `like_count`도 +1 됩니다.
///
/// ## 반환값
/// - `true`: 갱신 성공 (1행 변경)
/// - `false`: 해당 ID의 카드가 존재하지 않아 변경된 행이 없음
///   (호출부는 이를 에러로 취급하지 않습니다 — 카드가 이미 다른 경로로
///   사라졌더라도 상태 보고 자체는 성공으로 응답하는 정책)
pub async fn update_card_status(
    pool: &SqlitePool,
    card_id: &str,
    liked: bool,
) -> Result<bool, AppError> {
    // DB 기본값과 같은 ISO 8601 형식으로 기록합니다
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

    let result = if liked {
        sqlx::query(
            r#"
            UPDATE cards
            SET times_shown = times_shown + 1,
                like_count = like_count + 1,
                last_shown_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&now)
        .bind(card_id)
        .execute(pool)
        .await?
    } else {
        sqlx::query(
            r#"
            UPDATE cards
            SET times_shown = times_shown + 1,
                last_shown_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&now)
        .bind(card_id)
        .execute(pool)
        .await?
    };

    // rows_affected(): 이 쿼리로 영향받은 행 수를 반환
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{insert_card, test_pool};

    async fn fetch_card(pool: &SqlitePool, id: &str) -> Card {
        sqlx::query_as::<_, Card>(
            "SELECT id, card_data, combination_hash, combination_name, times_shown, like_count, last_shown_at, created_at FROM cards WHERE id = ?",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn get_cards_by_hash_filters_retired_and_foreign_cards() {
        let pool = test_pool().await;
        let fresh = insert_card(&pool, "hash-a", "fresh", 0).await;
        insert_card(&pool, "hash-a", "worn", 4).await;
        insert_card(&pool, "hash-a", "retired", 5).await;
        insert_card(&pool, "hash-b", "other pool", 0).await;

        let cards = get_cards_by_hash(&pool, "hash-a", 5).await.unwrap();
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(cards.len(), 2);
        assert!(ids.contains(&fresh.as_str()));
        assert!(cards.iter().all(|c| c.combination_hash == "hash-a"));
        assert!(cards.iter().all(|c| c.times_shown < 5));
    }

    #[tokio::test]
    async fn create_cards_persists_descriptions_under_hash() {
        let pool = test_pool().await;
        let descriptions = vec!["¿Pregunta uno?".to_string(), "¿Pregunta dos?".to_string()];

        let ids = create_cards(&pool, &descriptions, "hash-new", "friends-fun-1-questions")
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);

        let cards = get_cards_by_hash(&pool, "hash-new", 5).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].times_shown, 0);
        assert_eq!(cards[0].like_count, 0);
        assert_eq!(cards[0].combination_name, "friends-fun-1-questions");
        assert!(cards[0].last_shown_at.is_none());
    }

    #[tokio::test]
    async fn update_card_status_liked_bumps_both_counters() {
        let pool = test_pool().await;
        let id = insert_card(&pool, "hash-a", "card", 0).await;

        let updated = update_card_status(&pool, &id, true).await.unwrap();
        assert!(updated);

        let card = fetch_card(&pool, &id).await;
        assert_eq!(card.times_shown, 1);
        assert_eq!(card.like_count, 1);
        assert!(card.last_shown_at.is_some());
    }

    #[tokio::test]
    async fn update_card_status_unliked_bumps_only_times_shown() {
        let pool = test_pool().await;
        let id = insert_card(&pool, "hash-a", "card", 2).await;

        update_card_status(&pool, &id, false).await.unwrap();

        let card = fetch_card(&pool, &id).await;
        assert_eq!(card.times_shown, 3);
        assert_eq!(card.like_count, 0);
    }

    #[tokio::test]
    async fn update_card_status_unknown_id_affects_nothing() {
        let pool = test_pool().await;
        let updated = update_card_status(&pool, "no-such-card", true).await.unwrap();
        assert!(!updated);
    }
}
