//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `LLM_ENDPOINT` / `LLM_KEY` / `LLM_DEPLOYMENT` / `LLM_API_VERSION`:
//!   카드 생성용 LLM 연결 정보 (전체가 있어야 활성화, 없으면 생성 기능만 꺼짐)

use std::env;

/// 서버 핵심 설정 — 기동 시 한 번 읽고 그 뒤로는 바뀌지 않습니다.
///
/// Clone을 derive해 두는 이유: main에서 일부 값을 로그로 찍거나
/// 상태 구조체로 옮길 때 소유권 문제 없이 다루기 위해서입니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 연결 문자열 (예: "sqlite:data/conecta.db")
    pub database_url: String,
    /// 바인딩 주소. 컨테이너 배포를 기본으로 보고 "0.0.0.0"이 기본값입니다.
    pub host: String,
    /// 포트 번호. u16은 0~65535 범위라 포트 값에 정확히 들어맞는 타입입니다.
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정을 읽습니다.
    ///
    /// `DATABASE_URL`만 필수입니다 — 없으면 `env::VarError`를 그대로 돌려주고,
    /// main의 `?`가 이를 받아 기동을 중단시킵니다.
    /// DB 없이 뜬 서버는 모든 요청이 실패하므로 조용히 기본값으로
    /// 대체하지 않고 즉시 실패하는 쪽을 택했습니다.
    ///
    /// HOST/PORT는 없거나 잘못된 값이면 기본값으로 내려앉습니다
    /// (바인딩 주소가 틀려도 서버 자체는 의미가 있기 때문).
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,

            // unwrap_or_else: Err(환경변수 없음)일 때만 기본값 클로저를 평가합니다
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            // 문자열 → u16 파싱까지 실패하면 ("PORT=abc" 같은 경우) 3000으로
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}

/// LLM(카드 생성 모델) 연결 설정
///
/// Azure 스타일 chat completions 엔드포인트를 기준으로 합니다.
/// 네 값 중 하나라도 없으면 설정 전체를 없는 것으로 취급합니다.
/// 이 경우 서버는 정상 기동하되, 카드 생성(backfill)만 건너뜁니다.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// 엔드포인트 베이스 URL (예: "https://myorg.openai.azure.com")
    pub endpoint: String,
    /// API 키 (api-key 헤더로 전송)
    pub api_key: String,
    /// 배포(deployment) 이름. URL 경로에 들어갑니다.
    pub deployment: String,
    /// API 버전 쿼리 파라미터 (예: "2024-06-01")
    pub api_version: String,
}

impl LlmConfig {
    /// 환경변수에서 LLM 설정을 읽습니다.
    ///
    /// # 반환값
    /// - `Some(LlmConfig)`: 네 환경변수가 모두 설정된 경우
    /// - `None`: 하나라도 없는 경우 (부분 설정은 전체 미설정과 동일하게 취급)
    ///
    /// Option을 반환하는 이유: LLM 없이도 서버는 의미가 있기 때문입니다.
    /// 이미 쌓인 카드 풀만으로 샘플링은 계속 동작합니다.
    pub fn from_env() -> Option<Self> {
        // .ok()로 Result를 Option으로 바꾼 뒤 `?`를 쓰면
        // 네 변수 중 하나라도 없을 때 함수 전체가 None이 됩니다
        Some(Self {
            endpoint: env::var("LLM_ENDPOINT").ok()?,
            api_key: env::var("LLM_KEY").ok()?,
            deployment: env::var("LLM_DEPLOYMENT").ok()?,
            api_version: env::var("LLM_API_VERSION").ok()?,
        })
    }
}
