use serde::{Deserialize, Serialize};

/// 프롬프트 템플릿 — `prompt_templates` 테이블 한 행
///
/// (selection_key, selection_value) 쌍으로 조회됩니다.
/// 특수 키 "base"는 dynamic별 시스템 메시지 템플릿을 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PromptTemplate {
    pub id: String,
    pub selection_key: String,
    pub selection_value: String,
    pub prompt: String,
    pub created_at: String,
}

/// 선택 가능한 게임 방식 — base 템플릿에서 파생되며 별도 테이블은 없습니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Dynamic {
    pub name: String,
}
