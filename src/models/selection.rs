//! # 선택 조합(Selection) 모델
//!
//! 클라이언트가 고른 게임 설정(누구랑, 왜, 어떤 수위로, 어떤 방식으로)을
//! 나타내는 핵심 도메인 타입입니다. 이 조합 하나가 카드 풀 하나를 결정합니다.
//!
//! ## 정규화 → 이름 → 해시 파이프라인
//! 1. `normalized()`: dynamic 값을 소문자로 통일
//! 2. `canonical_name()`: 고정된 필드 순서로 `-` 연결 (사람이 읽는 키)
//! 3. `hash()`: canonical name의 SHA-256 (카드 풀을 찾는 기계용 키)
//!
//! 같은 조합이면 JSON 키 순서와 무관하게 항상 같은 해시가 나옵니다.
//! 고정 구조체(struct)로 선언했기 때문에 순서 독립성이 타입 수준에서 보장됩니다.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256}; // SHA-256 해시 (조합 → 카드 풀 키 변환에 사용)

/// 세션 생성 요청의 `selections` 필드에 대응하는 고정 레코드
///
/// 문자열 필드 4개 + 불리언 플래그 2개로 구성됩니다.
/// 플래그는 `#[serde(default)]` 덕분에 JSON에서 생략하면 false가 됩니다.
/// (생략과 명시적 false는 동일하게 취급 — 이름/해시에 포함되지 않습니다.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// 함께 노는 사람들 (예: "friends", "family", "couple")
    pub social_context: String,
    /// 모임의 목적 (예: "fun", "meet")
    pub purpose: String,
    /// 수위/강도 단계 (예: "1", "2", "3")
    pub tone: String,
    /// 게임 방식 (예: "questions", "challenges", "confessions")
    /// 기반(base) 프롬프트 템플릿을 고르는 키이기도 합니다.
    pub dynamic: String,
    /// 성인용 카드 허용 여부 (선택 플래그)
    #[serde(default)]
    pub hot: bool,
    /// 음주 카드 허용 여부 (선택 플래그)
    #[serde(default)]
    pub drink: bool,
}

impl Selection {
    /// 이름/해시 계산 전에 적용하는 정규화입니다.
    ///
    /// dynamic은 대소문자 표기가 클라이언트마다 흔들리기 쉬운 필드라서
    /// ("Questions" vs "questions") 소문자로 통일합니다.
    /// self를 소비(consume)하고 새 값을 반환하는 빌더 스타일입니다.
    pub fn normalized(mut self) -> Self {
        self.dynamic = self.dynamic.to_lowercase();
        self
    }

    /// 사람이 읽을 수 있는 조합 이름을 만듭니다.
    ///
    /// 규칙: 필드 선언 순서대로, 문자열 필드는 값을, 플래그는 켜져 있을 때만
    /// 필드 이름을 `-`로 이어 붙입니다.
    /// 예: friends + fun + "2" + questions + hot=true
    ///     → `"friends-fun-2-questions-hot"`
    pub fn canonical_name(&self) -> String {
        // Vec<&str>: 소유권을 가져오지 않고 각 필드의 참조만 모읍니다.
        let mut parts: Vec<&str> = vec![
            &self.social_context,
            &self.purpose,
            &self.tone,
            &self.dynamic,
        ];
        if self.hot {
            parts.push("hot");
        }
        if self.drink {
            parts.push("drink");
        }
        parts.join("-")
    }

    /// 조합 이름의 SHA-256 해시 (소문자 16진수 64자)
    ///
    /// 세션의 `selection_hash`, 카드의 `combination_hash`가 모두 이 값입니다.
    /// 해시가 같아야 같은 카드 풀을 공유합니다.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_name().as_bytes());
        // {:x}: 바이트 배열을 소문자 16진수 문자열로 포맷
        format!("{:x}", hasher.finalize())
    }

    /// 프롬프트 템플릿 조회용 (키, 값) 쌍 목록을 만듭니다.
    ///
    /// 문자열 필드는 (필드명, 값), 플래그는 켜진 경우에만 (필드명, "true")로
    /// 변환됩니다. dynamic도 포함되지만, 템플릿 수집 단계에서 건너뜁니다
    /// (dynamic은 base 템플릿 선택에 이미 쓰였기 때문).
    pub fn facet_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("social_context", self.social_context.clone()),
            ("purpose", self.purpose.clone()),
            ("tone", self.tone.clone()),
            ("dynamic", self.dynamic.clone()),
        ];
        if self.hot {
            pairs.push(("hot", "true".to_string()));
        }
        if self.drink {
            pairs.push(("drink", "true".to_string()));
        }
        pairs
    }
}
