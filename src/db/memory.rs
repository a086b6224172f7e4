//! # 메모리 책 저장소
//!
//! `Vec<Book>`에 책을 보관하는 `BookStore` 구현입니다.
//! MongoDB 없이 라우터 전체를 테스트할 때 대역(test double)으로 씁니다.
//! 삽입 순서를 그대로 순회 순서로 사용합니다.

use crate::db::{BookFilter, BookStore};
use crate::error::AppError;
use crate::models::{Book, BookInput};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 저장된 책 수
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

fn same_id(book: &Book, id: &ObjectId) -> bool {
    book.id.as_deref() == Some(id.to_hex().as_str())
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find(&self, filter: BookFilter) -> Result<Vec<Book>, AppError> {
        let books = self.books.read().await;
        Ok(books.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Book>, AppError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| same_id(b, &id)).cloned())
    }

    async fn insert(&self, input: &BookInput) -> Result<Book, AppError> {
        let book = Book {
            id: Some(ObjectId::new().to_hex()),
            title: input.title.clone(),
            author: input.author.clone(),
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: ObjectId, input: &BookInput) -> Result<bool, AppError> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| same_id(b, &id)) {
            Some(book) => {
                book.title = input.title.clone();
                book.author = input.author.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| !same_id(b, &id));
        Ok(books.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryBookStore::new();
        let a = store.insert(&BookInput::new("A", "X")).await.unwrap();
        let b = store.insert(&BookInput::new("A", "X")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn update_and_delete_report_whether_anything_matched() {
        let store = MemoryBookStore::new();
        let book = store.insert(&BookInput::new("A", "X")).await.unwrap();
        let id = ObjectId::parse_str(book.id.as_deref().unwrap()).unwrap();

        assert!(store.update(id, &BookInput::new("B", "Y")).await.unwrap());
        assert_eq!(store.get(id).await.unwrap().unwrap().title, "B");

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(!store.update(id, &BookInput::new("C", "Z")).await.unwrap());
        assert!(store.is_empty().await);
    }
}
