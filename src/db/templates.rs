//! # 프롬프트 템플릿 쿼리 모듈
//!
//! `prompt_templates` 테이블 조회 함수들입니다.
//! 템플릿은 마이그레이션으로 시드되며 API로는 수정하지 않습니다 (읽기 전용).

use crate::error::AppError;
use crate::models::{Dynamic, PromptTemplate};
use sqlx::SqlitePool;

/// (selection_key, selection_value) 쌍으로 템플릿들을 조회합니다.
///
/// 같은 쌍에 여러 행이 있을 수 있습니다 — 호출부가 전부 이어 붙입니다.
/// 0행이어도 에러가 아니라 빈 Vec입니다 (해당 조건의 템플릿이 없을 뿐).
pub async fn get_prompt_templates(
    pool: &SqlitePool,
    selection_key: &str,
    selection_value: &str,
) -> Result<Vec<PromptTemplate>, AppError> {
    let templates = sqlx::query_as::<_, PromptTemplate>(
        r#"
        SELECT id, selection_key, selection_value, prompt, created_at
        FROM prompt_templates
        WHERE selection_key = ? AND selection_value = ?
        ORDER BY created_at
        "#,
    )
    .bind(selection_key)
    .bind(selection_value)
    .fetch_all(pool)
    .await?;

    Ok(templates)
}

/// 선택 가능한 다이내믹(게임 방식) 목록을 조회합니다.
///
/// 다이내믹 전용 테이블은 없습니다 — base 템플릿이 존재하는 값이 곧
/// "플레이 가능한 다이내믹"이므로 DISTINCT로 파생시킵니다.
/// 템플릿을 추가하면 목록에도 자동으로 나타납니다.
pub async fn get_dynamics(pool: &SqlitePool) -> Result<Vec<Dynamic>, AppError> {
    let dynamics = sqlx::query_as::<_, Dynamic>(
        r#"
        SELECT DISTINCT selection_value AS name
        FROM prompt_templates
        WHERE selection_key = 'base'
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(dynamics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_pool;

    #[tokio::test]
    async fn get_prompt_templates_finds_seeded_base_row() {
        let pool = test_pool().await;
        let templates = get_prompt_templates(&pool, "base", "questions").await.unwrap();

        assert_eq!(templates.len(), 1);
        assert!(templates[0].prompt.contains("{{social_context}}"));
    }

    #[tokio::test]
    async fn get_prompt_templates_unknown_pair_is_empty() {
        let pool = test_pool().await;
        let templates = get_prompt_templates(&pool, "tone", "2").await.unwrap();
        assert!(templates.is_empty());
    }

    #[tokio::test]
    async fn get_dynamics_lists_distinct_base_values() {
        let pool = test_pool().await;
        let dynamics = get_dynamics(&pool).await.unwrap();
        let names: Vec<&str> = dynamics.iter().map(|d| d.name.as_str()).collect();

        // 시드 데이터의 세 다이내믹이 이름순으로 나와야 합니다
        assert_eq!(names, vec!["challenges", "confessions", "questions"]);
    }

    #[tokio::test]
    async fn get_dynamics_deduplicates_multiple_rows_per_value() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO prompt_templates (id, selection_key, selection_value, prompt) VALUES (?, 'base', 'questions', 'variante extra')",
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .execute(&pool)
        .await
        .unwrap();

        let dynamics = get_dynamics(&pool).await.unwrap();
        let count = dynamics.iter().filter(|d| d.name == "questions").count();
        assert_eq!(count, 1);
    }
}
