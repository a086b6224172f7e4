//! # Bookshelf
//!
//! 책(Book) 컬렉션 하나에 대한 CRUD를 JSON HTTP API로 제공하는 서버입니다.
//! 저장소는 MongoDB이며, 바이너리(`main.rs`)는 이 라이브러리를 조립해서 실행합니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 설정
//! - `error`: 에러 타입과 HTTP 응답 변환
//! - `models`: 데이터 구조체
//! - `db`: 저장소 트레이트와 구현체
//! - `routes`: 라우터와 핸들러

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use routes::{router, AppState};
