//! # 서비스 계층
//!
//! 라우트 핸들러와 DB 사이의 도메인 로직을 담당합니다.
//!
//! 각 하위 모듈:
//! - `sampler`: 신선도 가중 카드 샘플링 (순수 함수)
//! - `prompts`: 선택 조합 → LLM 메시지 쌍 조립
//! - `llm`: chat completions 클라이언트와 응답 파서
//! - `cards`: 카드 수집 오케스트레이션 (조회 → backfill → 샘플링 → 기록)

pub mod cards;
pub mod llm;
pub mod prompts;
pub mod sampler;
