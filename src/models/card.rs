//! # 카드 모델 정의
//!
//! 게임 카드(질문/도전 항목)와 관련 요청/응답 구조체를 정의합니다.
//! 카드는 특정 선택 조합(combination_hash)에 묶여 있으며,
//! `times_shown`이 정책 한도에 도달하면 샘플링 대상에서 빠집니다 (삭제 없음).

use serde::{Deserialize, Serialize};

/// 카드 엔티티 — DB의 `cards` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// 카드 고유 식별자 (UUIDv7)
    pub id: String,
    /// 카드 내용 (플레이어에게 보여줄 질문/도전 텍스트)
    pub card_data: String,
    /// 이 카드가 속한 선택 조합의 해시 — 세션의 selection_hash와 대응
    pub combination_hash: String,
    /// 조합의 사람이 읽는 이름 (디버깅/관리용)
    pub combination_name: String,
    /// 지금까지 플레이어에게 노출된 횟수
    /// 수명 정책(policy) 이상이면 샘플링에서 제외됩니다.
    pub times_shown: i64,
    /// 좋아요 수
    pub like_count: i64,
    /// 마지막으로 노출된 시각 — None이면 아직 한 번도 안 보여진 카드
    pub last_shown_at: Option<String>,
    /// 카드 생성 시각
    pub created_at: String,
}

/// 카드 API 응답 — 내부 관리 필드(해시, 타임스탬프)를 제외한 공개 형태
#[derive(Debug, Clone, Serialize)]
pub struct CardResponse {
    pub id: String,
    pub card_data: String,
    pub times_shown: i64,
    pub like_count: i64,
}

// From 트레이트: Card → CardResponse 변환을 표준 방식으로 제공합니다.
// .into()나 CardResponse::from(card)로 호출할 수 있습니다.
impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            card_data: card.card_data,
            times_shown: card.times_shown,
            like_count: card.like_count,
        }
    }
}

/// 카드 상태 갱신 요청 — `POST /api/v1/update_card_status`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct UpdateCardStatusRequest {
    /// 카드를 보여준 세션 (선택 — 있으면 전달 기록에 viewed 표시)
    pub session_id: Option<String>,
    /// 상태를 갱신할 카드 ID
    pub card_id: String,
    /// 좋아요 여부 (선택 — true일 때만 like_count 증가)
    pub liked: Option<bool>,
}

/// LLM이 생성한 카드 한 장의 파싱 결과
///
/// 모델 응답의 각 항목은 `{"id": n, "description": "..."}` 형태이지만
/// 우리가 쓰는 것은 description뿐입니다 (id는 모델이 매긴 일련번호라 무시,
/// serde는 선언하지 않은 필드를 기본적으로 건너뜁니다).
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedCard {
    /// 카드 내용 — 이 필드가 없는 항목은 파싱 실패로 처리됩니다.
    pub description: String,
}
