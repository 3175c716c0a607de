//! # 게임 세션 모델 정의
//!
//! 한 판의 게임을 나타내는 세션 관련 구조체들을 정의합니다.
//! 세션은 "어떤 선택 조합으로 시작했는지"를 고정해 두는 기록이며,
//! 이후 카드 샘플링은 전부 이 조합의 해시를 기준으로 동작합니다.
//!
//! ## 세션 흐름
//! 1. 클라이언트가 `CreateSessionRequest`로 선택 조합을 보내 세션 시작
//! 2. 서버가 조합 이름/해시를 계산해 저장하고 프롬프트 메시지를 돌려줌
//! 3. 이후 `get_cards/{session_id}`가 저장된 해시로 카드 풀을 찾음

use serde::{Deserialize, Serialize};

use crate::models::selection::Selection;

/// 게임 세션 엔티티 — DB의 `sessions` 테이블 한 행에 대응합니다.
///
/// 생성 이후 수정되지 않습니다 (카드 전달 기록은 session_cards 조인 테이블에).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// 세션 고유 식별자 (UUIDv7)
    pub id: String,
    /// 생성 시점의 선택 조합 원본 (JSON 문자열로 직렬화해 보관)
    /// 카드 생성(backfill)이 필요할 때 이 값을 다시 파싱해 사용합니다.
    pub selection: String,
    /// 선택 조합의 사람이 읽는 이름 (예: "friends-fun-2-questions-hot")
    pub selection_name: String,
    /// 선택 조합의 SHA-256 해시 — 카드 풀을 찾는 키
    pub selection_hash: String,
    /// 세션 생성 시각 (ISO 8601 형식: "2026-02-16T12:00:00.000Z")
    pub created_at: String,
}

impl Session {
    /// 저장해 둔 선택 조합 JSON을 다시 `Selection`으로 파싱합니다.
    ///
    /// 우리가 직렬화해 넣은 값이므로 정상 데이터라면 항상 성공하지만,
    /// DB가 외부에서 수정됐을 가능성에 대비해 Result로 반환합니다.
    pub fn parse_selection(&self) -> Result<Selection, serde_json::Error> {
        serde_json::from_str(&self.selection)
    }
}

/// 세션 생성 요청 — `POST /api/v1/create_session`의 요청 본문에 해당합니다.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// 클라이언트가 고른 선택 조합
    /// 필드가 빠지거나 타입이 틀리면 요청 파싱 단계에서 4xx로 거절됩니다.
    pub selections: Selection,
}

/// 세션 생성 응답
///
/// 프롬프트 메시지 쌍을 함께 돌려주는 이유: 클라이언트가 "이 조합으로
/// 어떤 지시문이 만들어졌는지"를 표시할 수 있게 하기 위함입니다.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    /// 생성된 세션의 ID — 이후 모든 카드 요청에 사용
    pub session_id: String,
    /// 카드 생성에 쓰일 시스템 메시지 (base 템플릿 렌더링 결과)
    pub system_message: String,
    /// 카드 생성에 쓰일 사용자 메시지 (조건별 템플릿 모음)
    pub user_message: String,
}
