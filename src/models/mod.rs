//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `book`: 책(Book)과 요청 본문/쿼리 파라미터 구조체
//!
//! `pub use book::*;`로 재공개하여 `crate::models::Book`처럼 짧게 쓸 수 있습니다.

pub mod book;

pub use book::*;
