//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /health` → `{ "status": "ok" }`
//!
//! 저장소에 ping을 보내 연결이 살아있는지까지 확인합니다.
//! 컨테이너 오케스트레이터(Docker)의 헬스체크 용도입니다.

use crate::{error::AppError, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 저장소 상태를 확인합니다.
///
/// 저장소가 응답하지 않으면 500(또는 마감 초과 시 504)을 반환합니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.deadline().run(state.store.ping()).await?;
    Ok(Json(json!({
        "status": "ok"
    })))
}
