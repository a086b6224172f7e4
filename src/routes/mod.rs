//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 조립 코드입니다.
//!
//! 각 하위 모듈:
//! - `books`: 책 CRUD 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod books;
pub mod health;

pub use books::*;
pub use health::*;

use crate::db::{BookStore, Deadline};
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 저장소는 전역 변수가 아니라 여기로 주입되므로, 테스트에서는
/// `MemoryBookStore` 같은 대역을 넣을 수 있습니다.
#[derive(Clone)]
pub struct AppState {
    /// 책 저장소 (Arc이므로 clone해도 같은 저장소를 가리킴)
    pub store: Arc<dyn BookStore>,
    /// 요청 하나의 저장소 호출 시간 예산
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// 지금 시작하는 요청의 마감시각
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.store_timeout)
    }
}

/// 전체 라우터를 조립합니다.
///
/// CORS는 모든 출처/메서드/헤더를 허용합니다.
pub fn router(state: AppState) -> Router {
    // ── CORS 미들웨어 ──
    // 브라우저의 React 클라이언트가 다른 포트(출처)에서 호출하므로 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)  // 모든 출처(origin) 허용 → Access-Control-Allow-Origin: *
        .allow_methods(Any) // GET/POST/PUT/DELETE 등 모든 메서드 허용
        .allow_headers(Any); // Content-Type 등 모든 요청 헤더 허용

    Router::new()
        // 같은 경로에 .post()를 체이닝하면 메서드별로 다른 핸들러를 연결할 수 있습니다.
        .route("/books", get(list_books).post(create_book))
        // 검색 경로는 세그먼트가 3개라 아래 /books/{id}와 겹치지 않습니다.
        .route("/books/search/title", get(find_books_by_title))
        .route("/books/search/author", get(find_books_by_author))
        // {id}: 경로 파라미터 (axum 0.8 문법, 핸들러에서 Path<String>으로 추출)
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route("/health", get(health_check))
        // .with_state(): 모든 핸들러가 State<AppState>로 저장소에 접근
        .with_state(state)
        // .layer(): 나중에 추가한 레이어가 바깥쪽에서 먼저 요청을 받습니다.
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // 요청/응답을 tracing으로 자동 로깅
}
