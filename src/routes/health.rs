//! # 헬스체크 핸들러
//!
//! 서버 생존 확인용 최소 엔드포인트입니다.
//! 리버스 프록시나 컨테이너 런타임이 주기적으로 호출해
//! 프로세스가 응답하는지만 확인합니다 (DB 연결 상태까지는 검사하지 않습니다).

use axum::Json;
use serde_json::{json, Value};

/// `GET /api/v1/health` — 항상 `{"status": "ok"}`를 반환합니다.
///
/// Extractor도 State도 받지 않는 가장 단순한 핸들러 형태입니다.
/// 실패 경로가 없으므로 반환 타입도 Result가 아닌 `Json<Value>`입니다.
/// Axum이 Content-Type 헤더와 200 상태 코드를 알아서 붙여줍니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
