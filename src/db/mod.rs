//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 저장소와 직접 상호작용하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)는 구체 타입이 아니라 `BookStore` 트레이트만 알고,
//! `AppState`를 통해 주입된 `Arc<dyn BookStore>`를 호출합니다.
//!
//! 각 하위 모듈:
//! - `mongo`: MongoDB 드라이버로 구현한 실제 저장소
//! - `memory`: 메모리 안의 Vec으로 구현한 저장소 (테스트용 대역)
//!
//! 그리고 요청 하나의 저장소 호출 전체를 묶는 `Deadline`이 여기 있습니다.

pub mod memory;
pub mod mongo;

pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

use crate::error::AppError;
use crate::models::{Book, BookInput};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// 책 조회 조건. 모든 조건은 정확히 일치(exact match)하는 값만 찾습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    /// 빈 필터: 컬렉션 전체
    All,
    Title(String),
    Author(String),
}

impl BookFilter {
    /// 메모리 저장소에서 쓰는 일치 판정
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Title(title) => &book.title == title,
            BookFilter::Author(author) => &book.author == author,
        }
    }
}

/// 책 컬렉션 저장소 트레이트
///
/// `Send + Sync`이므로 여러 요청 태스크가 동시에 같은 저장소를 호출할 수 있습니다.
/// 동시성 보장은 구현체(MongoDB 클라이언트의 커넥션 풀 등)가 책임집니다.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// 조건에 맞는 책을 저장소의 기본 순회 순서대로 반환합니다.
    async fn find(&self, filter: BookFilter) -> Result<Vec<Book>, AppError>;

    /// ID로 책 한 권을 조회합니다. 없으면 `Ok(None)`.
    async fn get(&self, id: ObjectId) -> Result<Option<Book>, AppError>;

    /// 새 책을 저장하고, 저장소가 부여한 ID를 포함한 레코드를 반환합니다.
    async fn insert(&self, input: &BookInput) -> Result<Book, AppError>;

    /// 제목과 저자만 덮어씁니다. 일치하는 문서가 있었으면 `true`.
    async fn update(&self, id: ObjectId, input: &BookInput) -> Result<bool, AppError>;

    /// ID로 삭제합니다. 실제로 지워진 문서가 있으면 `true`.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// 저장소에 연결할 수 있는지 확인합니다.
    async fn ping(&self) -> Result<(), AppError>;
}

/// 요청 하나에 주어진 저장소 호출 마감시각
///
/// 핸들러 시작 시점에 한 번 만들고, 그 요청 안의 모든 저장소 호출을 `run`으로 감쌉니다.
/// 호출이 두 번이면 두 호출이 같은 시간 예산을 나눠 씁니다.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    /// 지금부터 `budget` 뒤에 만료되는 마감시각
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    /// 마감시각 안에 `fut`를 실행합니다. 넘기면 `AppError::Timeout`.
    pub async fn run<F, T>(self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout_at(self.0, fut)
            .await
            .map_err(|_| AppError::Timeout)?
    }
}

/// 경로의 `{id}`를 ObjectId로 해석합니다. 24자리 16진수가 아니면 400.
pub fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid book ID".to_string()))
}
