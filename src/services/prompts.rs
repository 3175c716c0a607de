//! # 프롬프트 조립 서비스
//!
//! 세션의 선택 조합을 LLM에 보낼 (시스템 메시지, 사용자 메시지) 쌍으로
//! 조립합니다. 템플릿 본문은 전부 DB(`prompt_templates`)에 있고,
//! 이 모듈은 조회 + 렌더링 + 이어붙이기만 담당합니다.
//!
//! ## 메시지 구성
//! - 시스템 메시지 = base 템플릿(다이내믹별) 렌더링 결과 + 고정 지침
//! - 사용자 메시지 = 패싯별 템플릿 조각을 빈 줄로 이어붙인 것
//!   (조각이 하나도 없으면 일반 지시문으로 대체)
//!
//! base 템플릿의 `{{social_context}}` 같은 자리표시자는 핸들바 strict 모드로
//! 치환합니다. 템플릿이 선택에 없는 키를 참조하면 렌더링이 실패하며,
//! 이는 시드 데이터 쪽 문제이므로 500 계열(Internal)로 전파합니다.

use handlebars::Handlebars;
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::Selection;

/// 모든 시스템 메시지 뒤에 붙는 고정 지침
///
/// 카드 본문은 스페인어, 출력 형식은 id/description 항목의 JSON 리스트를
/// 요구합니다. 응답 파서(services::llm::parse_card_list)가 이 형식을 전제합니다.
const SYSTEM_GUIDELINES: &str = "\n\n### Guidelines:\n\
- Give your answer in Spanish.\n\
- Give your answer in JSON format as a list of items, where each item includes an 'id' and 'description'.\n\
Use the provided selection to customize your response.";

/// 선택 조합을 (시스템 메시지, 사용자 메시지)로 조립합니다.
///
/// ## 처리 흐름
/// 1. `("base", dynamic)` 템플릿의 첫 행을 가져와 strict 렌더링
/// 2. 고정 지침을 붙여 시스템 메시지 완성
/// 3. 패싯별 `(키, 값)` 쌍마다 템플릿을 조회해 조각을 수집
///    - dynamic 패싯은 건너뜀 (base 선택에 이미 사용됨)
///    - 개별 조회 실패는 로그만 남기고 계속 진행 (조각 하나 빠져도 치명적 아님)
/// 4. 조각들을 `\n\n`으로 이어붙여 사용자 메시지 완성
///    - 조각이 없으면 조합 이름을 담은 일반 지시문으로 대체
///
/// ## 에러
/// base 템플릿이 없거나 렌더링에 실패하면 `AppError::Internal` —
/// 이때는 어떤 프롬프트도 만들 수 없으므로 복구하지 않습니다.
pub async fn format_prompt_templates(
    pool: &SqlitePool,
    selection: &Selection,
) -> Result<(String, String), AppError> {
    let base_rows = db::get_prompt_templates(pool, "base", &selection.dynamic).await?;
    let base = base_rows.first().ok_or_else(|| {
        AppError::Internal(format!(
            "No base prompt template for dynamic '{}'",
            selection.dynamic
        ))
    })?;

    // strict 모드: 데이터에 없는 자리표시자를 조용히 빈 문자열로 치환하지 않고
    // 에러로 만듭니다. 템플릿과 선택 구조의 불일치를 즉시 드러내기 위함입니다.
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    let rendered = handlebars
        .render_template(&base.prompt, selection)
        .map_err(|e| AppError::Internal(format!("Failed to render base template: {}", e)))?;

    let system_message = format!("{}{}", rendered, SYSTEM_GUIDELINES);

    let mut fragments: Vec<String> = Vec::new();
    for (key, value) in selection.facet_pairs() {
        if key == "dynamic" {
            continue;
        }

        match db::get_prompt_templates(pool, key, &value).await {
            Ok(rows) => fragments.extend(rows.into_iter().map(|t| t.prompt)),
            Err(e) => {
                // 한 패싯의 조회 실패로 전체 조립을 포기하지 않습니다
                tracing::warn!("Failed to fetch prompt templates for {}={}: {}", key, value, e);
            }
        }
    }

    tracing::info!("Retrieved {} prompt templates based on selections", fragments.len());

    let user_message = if fragments.is_empty() {
        // 패싯 템플릿이 하나도 없는 조합: 원하는 출력 형태만 설명하는 일반 지시문
        format!(
            "Given the following user selection: {}, generate a unique combination of 10 items \
             that best match these preferences.\n\
             Ensure that the combination is diverse and covers different aspects of the user's interests.\n\
             Provide the output in JSON format as a list of items, where each item includes an 'id' and 'description'.",
            selection.canonical_name()
        )
    } else {
        fragments.join("\n\n")
    };

    Ok((system_message, user_message))
}
