//! # 책(Book) 모델 정의
//!
//! ## 구조체 역할
//! - `Book`: 저장소에 들어있는 책 한 권 (응답용)
//! - `BookInput`: 생성/수정 요청 본문 (`POST /books`, `PUT /books/{id}`)
//! - `TitleQuery`, `AuthorQuery`: 검색 엔드포인트의 쿼리 파라미터

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 책 엔티티 — 컬렉션의 문서 하나에 대응합니다.
///
/// JSON 형태: `{ "id": "6051505f5a5a430e5f771b48", "title": "...", "author": "..." }`
///
/// `id`는 저장소가 생성 시점에 부여하는 ObjectId의 16진수 문자열입니다.
/// 클라이언트가 정할 수 없고, 한번 부여되면 바뀌지 않습니다.
/// 필드 선언 순서가 곧 JSON 필드 순서(id, title, author)입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// 값이 없으면 JSON에서 아예 빠집니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
}

/// 책 생성/수정 요청 본문
///
/// 두 필드 모두 `#[serde(default)]`이므로 JSON에 빠져 있으면 빈 문자열이 됩니다.
/// 빠진 필드는 파싱 에러가 아니라 `validate()`의 "Missing book fields"로 보고됩니다.
/// 본문에 `id`가 들어 있어도 무시합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

impl BookInput {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// 제목과 저자가 모두 비어있지 않은지 확인합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_empty() || self.author.is_empty() {
            return Err(AppError::BadRequest("Missing book fields".to_string()));
        }
        Ok(())
    }
}

/// `GET /books/search/title?title=...`
///
/// Option인 이유: 파라미터가 없을 때 Axum의 기본 거부 응답 대신
/// 핸들러에서 직접 400 "Missing title parameter"를 만들기 위해서입니다.
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
}

/// `GET /books/search/author?author=...`
#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    pub author: Option<String>,
}

/// 빠졌거나 비어있는 쿼리 파라미터를 400 에러로 바꿉니다.
pub fn required_param(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("Missing {name} parameter"))),
    }
}
