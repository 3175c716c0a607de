//! # Conecta 웹 서버 진입점
//!
//! 이 파일은 Conecta 애플리케이션의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. LLM 클라이언트 구성 (환경변수가 있을 때만)
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod` 선언 하나가 파일 하나(또는 디렉토리의 mod.rs)를 모듈 트리에 붙입니다.
// Rust는 import로 파일을 찾지 않습니다. 여기 선언된 것만 크레이트의 일부입니다.
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod testutil; // 테스트 전용 헬퍼. cfg(test) 덕분에 릴리스 빌드에는 아예 포함되지 않습니다.

use anyhow::Result; // main 전용: 어떤 에러든 담아서 `?`로 전파할 수 있는 범용 Result
use axum::{
    routing::{get, post}, // HTTP 메서드별 라우팅 함수
    Router,
};
use config::{Config, LlmConfig};
use routes::{cards::AppState, *}; // 핸들러들을 glob으로 가져와 라우터 조립을 짧게 씁니다
use services::llm::LlmClient;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},          // 브라우저 교차 출처 요청 허용
    services::{ServeDir, ServeFile}, // 정적 파일 서빙
    trace::TraceLayer,               // 요청/응답 자동 로깅
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// #[tokio::main]: 동기인 main을 Tokio 런타임 위에서 실행하도록 감싸는 매크로.
// 이 아래의 모든 .await는 이 런타임이 스케줄링합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 있으면 읽고, 없으면 조용히 넘어갑니다 (.ok()).
    // 배포 환경에서는 보통 파일 없이 실제 환경변수를 씁니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry에 필터와 포맷터를 레이어로 쌓은 뒤 전역 로거로 등록합니다.
    // RUST_LOG가 설정되어 있으면 그 값을, 없으면 우리 크레이트와
    // HTTP 스택을 debug로 보는 기본 필터를 사용합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conecta=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // DATABASE_URL이 없으면 여기서 `?`가 에러를 돌려보내며 기동이 멈춥니다.
    let config = Config::from_env()?;
    tracing::info!("Starting Conecta server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 요청마다 연결을 새로 여는 대신, 미리 만들어 둔 연결을 빌려 쓰는 구조입니다.
    // SqlitePool은 내부가 Arc라서 핸들러들에 clone으로 나눠줘도 풀은 하나입니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    // sqlx::migrate!는 컴파일 시점에 ./migrations의 SQL 파일들을 바이너리에
    // 내장합니다. 실행 시에는 아직 적용 안 된 것만 순서대로 적용합니다.
    // 스키마와 시드 템플릿이 여기서 만들어지므로 빈 DB 파일로도 바로 동작합니다.
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: LLM 클라이언트 구성 ──
    // LLM_* 환경변수 네 개가 모두 있을 때만 클라이언트를 만듭니다.
    // None이면 카드 생성(backfill)만 꺼진 채로 서버는 정상 운영됩니다.
    // 기존 카드 풀의 샘플링에는 LLM이 필요 없기 때문입니다.
    let llm = match LlmConfig::from_env() {
        Some(llm_config) => {
            tracing::info!(
                "Card generation enabled (deployment: {})",
                llm_config.deployment
            );
            Some(LlmClient::from_config(&llm_config)?)
        }
        None => {
            tracing::warn!("LLM environment not configured, card generation disabled");
            None
        }
    };

    // ── 7단계: 애플리케이션 상태(State) 생성 ──
    // 모든 핸들러가 공유하는 의존성 묶음입니다.
    // Axum은 요청마다 이 값을 clone해 핸들러에 주입합니다 (AppState: Clone).
    let state = AppState {
        pool: pool.clone(),
        llm,
    };

    // ── 8단계: API 라우터 설정 ──
    // 경로 문자열과 핸들러 함수를 HTTP 메서드별로 연결합니다.
    let api_routes = Router::new()
        // 선택 조합을 받아 세션을 만들고 프롬프트 쌍을 돌려줍니다
        .route("/create_session", post(create_session))
        // {session_id}: 경로 파라미터. 핸들러에서 Path<String>으로 꺼냅니다.
        .route("/get_cards/{session_id}", get(get_cards))
        // 카드 노출/좋아요 보고
        .route("/update_card_status", post(update_card_status))
        // 선택 화면용 게임 방식 목록
        .route("/get_dynamics", get(get_dynamics))
        // 서버 생존 확인
        .route("/health", get(health_check))
        // with_state: 위의 모든 핸들러가 AppState를 받을 수 있게 합니다
        .with_state(state);

    // ── 9단계: CORS 미들웨어 설정 ──
    // 개발 편의를 위해 전부 허용합니다.
    // 프로덕션에서는 프론트엔드 도메인만 허용하도록 좁혀야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 10단계: 프론트엔드 정적 파일 서빙 설정 ──
    // 빌드된 SPA가 frontend/dist에 있으면 API와 같은 포트에서 함께 서빙합니다.
    // SPA 라우팅 특성상 모르는 경로는 index.html로 돌려보내야 합니다.
    let frontend_dist = Path::new("frontend/dist");
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from frontend/dist");

        let serve_dir = ServeDir::new("frontend/dist")
            .not_found_service(ServeFile::new("frontend/dist/index.html"));

        Router::new()
            // /api/v1 아래로 API를 중첩: /create_session → /api/v1/create_session
            .nest("/api/v1", api_routes)
            // API에 매칭되지 않은 나머지 요청은 전부 정적 파일로
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        // 프론트엔드 빌드가 없으면 API 전용으로 동작합니다
        tracing::warn!("Frontend dist directory not found, serving API only");

        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 11단계: 서버 시작 ──
    // 주소에 바인딩한 뒤 axum::serve에 라우터를 넘기면
    // 이 await는 서버가 종료될 때까지 돌아오지 않습니다.
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
