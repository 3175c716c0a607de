//! 테스트 공용 헬퍼
//!
//! 인메모리 SQLite 풀에 실제 마이그레이션을 적용해 반환합니다.
//! 커넥션이 끊기면 인메모리 DB가 사라지므로 풀 크기는 1로 고정합니다.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::Selection;

/// 마이그레이션(스키마 + 템플릿 시드)이 적용된 인메모리 풀을 만듭니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// 시드 템플릿과 맞물리는 대표 선택 조합
pub fn test_selection() -> Selection {
    Selection {
        social_context: "friends".to_string(),
        purpose: "fun".to_string(),
        tone: "2".to_string(),
        dynamic: "questions".to_string(),
        hot: false,
        drink: false,
    }
}

/// 지정한 노출 횟수로 카드 한 장을 삽입하고 ID를 반환합니다.
pub async fn insert_card(
    pool: &SqlitePool,
    combination_hash: &str,
    card_data: &str,
    times_shown: i64,
) -> String {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO cards (id, card_data, combination_hash, combination_name, times_shown)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(card_data)
    .bind(combination_hash)
    .bind("test-combination")
    .bind(times_shown)
    .execute(pool)
    .await
    .expect("failed to insert test card");

    id
}
