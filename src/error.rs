//! # Bookshelf 에러 응답 규약
//!
//! 핸들러와 저장소 계층은 모두 `Result<T, AppError>`를 반환하고,
//! `AppError`는 `IntoResponse`로 스스로 HTTP 응답이 됩니다.
//!
//! 모든 에러 응답 본문은 같은 모양입니다:
//! `{ "error": { "code": "bad_request", "message": "Invalid book ID" } }`
//!
//! - 400 `bad_request`: 잘못된 ID, 빠진 쿼리 파라미터, 깨진 본문, 빈 필드.
//!   저장소를 호출하기 전에 반환되므로 부작용이 없습니다.
//! - 404 `not_found`: 없는 책을 수정하려 한 경우. 없는 책 삭제는 에러가 아닙니다.
//! - 500 `database_error` / `internal_error`, 504 `store_timeout`: 저장소 쪽 실패.
//!
//! 저장소 에러는 메시지를 숨기지 않고 드라이버가 준 내용을 그대로 `message`에 담습니다.
//! 이 서버는 재시도를 하지 않으므로, 연결 거부인지 디코딩 실패인지를
//! 호출한 쪽이 직접 보고 판단할 수 있어야 하기 때문입니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 책을 찾을 수 없음 (HTTP 404)
    #[error("Book not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    /// 잘못된 ID, 빠진 쿼리 파라미터, 깨진 JSON, 빈 필드가 여기에 해당합니다.
    #[error("{0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("{0}")]
    Internal(String),

    /// MongoDB 드라이버 오류 (HTTP 500)
    /// #[from]: mongodb::error::Error에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    /// 연결 실패와 문서 디코딩 실패가 모두 여기로 들어옵니다.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// 요청의 저장소 마감시간 초과 (HTTP 504)
    #[error("Store operation timed out")]
    Timeout,
}

impl AppError {
    /// 에러 종류별 (HTTP 상태 코드, 에러 코드) 쌍
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "store_timeout"),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 저장소 계층의 에러(Database, Internal, Timeout)는 로그에 기록하고,
    /// 원래 에러 메시지를 그대로 클라이언트에 전달합니다.
    /// 재시도(retry)는 하지 않습니다.
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(code, "{}", self);
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
