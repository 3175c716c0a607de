//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `sessions`: 게임 세션 생성/조회 쿼리
//! - `cards`: 카드 풀 조회, 생성 카드 저장, 카운터 갱신 쿼리
//! - `session_cards`: 세션-카드 전달 기록(조인 테이블) 쿼리
//! - `templates`: 프롬프트 템플릿 조회 쿼리 (읽기 전용)

pub mod cards;
pub mod session_cards;
pub mod sessions;
pub mod templates;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::start_session`처럼 바로 접근할 수 있게 합니다.
pub use cards::*;
pub use session_cards::*;
pub use sessions::*;
pub use templates::*;
