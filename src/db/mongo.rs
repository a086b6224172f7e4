//! # MongoDB 책 저장소
//!
//! `books` 컬렉션에 대한 CRUD 쿼리를 MongoDB 공식 드라이버로 구현합니다.
//!
//! 컬렉션의 문서 형태(BSON):
//! ```text
//! { "_id": ObjectId("..."), "title": "...", "author": "..." }
//! ```
//! API 응답의 `Book`은 `_id` 대신 16진수 문자열 `id`를 쓰므로,
//! 이 모듈 안에서만 쓰는 `BookDocument`로 읽고 쓴 뒤 `Book`으로 바꿉니다.

use crate::config::Config;
use crate::db::{BookFilter, BookStore};
use crate::error::AppError;
use crate::models::{Book, BookInput};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};

/// 컬렉션에 저장되는 문서 한 개
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    // 삽입할 때는 None으로 두어 MongoDB가 _id를 만들게 합니다.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    author: String,
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Book {
            id: doc.id.map(|id| id.to_hex()),
            title: doc.title,
            author: doc.author,
        }
    }
}

/// `BookFilter`를 MongoDB 쿼리 문서로 바꿉니다.
fn filter_document(filter: &BookFilter) -> Document {
    match filter {
        BookFilter::All => doc! {},
        BookFilter::Title(title) => doc! { "title": title.as_str() },
        BookFilter::Author(author) => doc! { "author": author.as_str() },
    }
}

/// MongoDB 컬렉션 핸들
///
/// `Client`는 내부적으로 커넥션 풀을 Arc로 공유하므로 clone해도 연결이 복제되지 않습니다.
#[derive(Clone)]
pub struct MongoBookStore {
    database: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    /// 설정의 URI로 클라이언트를 만들고 컬렉션 핸들을 엽니다.
    ///
    /// 드라이버는 연결을 게으르게(lazily) 맺으므로, 실제 접속 확인은 `ping`으로 합니다.
    /// 서버 선택/연결 타임아웃은 요청 마감시간과 같은 값을 씁니다.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        // ClientOptions::parse(): URI 문자열을 해석합니다 (mongodb+srv면 DNS 조회도 수행).
        let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
        // app_name: 서버 로그/currentOp에 표시되는 클라이언트 이름
        options.app_name = Some("bookshelf".to_string());
        // server_selection_timeout: 사용할 서버를 찾을 때까지 기다리는 최대 시간.
        //   기본값(30초) 대신 요청 마감시간을 써서, 죽은 서버에 대한 호출이 오래 매달리지 않게 합니다.
        options.server_selection_timeout = Some(config.store_timeout);
        // connect_timeout: TCP 연결 한 번을 맺는 최대 시간
        options.connect_timeout = Some(config.store_timeout);

        // Client::with_options(): 실제 연결은 첫 요청 때 맺어집니다.
        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        // collection::<BookDocument>(): 타입이 지정된 컬렉션.
        //   읽기/쓰기 시 serde로 BookDocument ↔ BSON 변환이 자동으로 일어납니다.
        let collection = database.collection::<BookDocument>(&config.collection);

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, filter: BookFilter) -> Result<Vec<Book>, AppError> {
        // find(): 조건에 맞는 문서를 한 번에 받지 않고 커서(Cursor)로 나눠 받습니다.
        let cursor = self.collection.find(filter_document(&filter)).await?;
        // try_collect(): TryStreamExt의 메서드. 커서(Stream)를 끝까지 읽어 Vec으로 모읍니다.
        //   중간에 디코딩이 실패하면 그 에러가 그대로 반환됩니다 (500). 프로세스를 죽이지 않습니다.
        let docs: Vec<BookDocument> = cursor.try_collect().await?;
        // into_iter().map(Book::from): BSON 문서를 API 응답용 Book으로 변환
        Ok(docs.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Book>, AppError> {
        // find_one(): 첫 번째 일치 문서 하나. 없으면 None
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(Book::from))
    }

    async fn insert(&self, input: &BookInput) -> Result<Book, AppError> {
        let doc = BookDocument {
            id: None,
            title: input.title.clone(),
            author: input.author.clone(),
        };
        // insert_one(): _id가 없는 문서를 넣으면 드라이버가 ObjectId를 만들어 채웁니다.
        let result = self.collection.insert_one(&doc).await?;

        // inserted_id는 Bson 타입이므로 ObjectId인지 확인하며 꺼냅니다.
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal("Error creating book: inserted id is not an ObjectId".to_string())
        })?;

        Ok(Book {
            id: Some(id.to_hex()),
            title: doc.title,
            author: doc.author,
        })
    }

    async fn update(&self, id: ObjectId, input: &BookInput) -> Result<bool, AppError> {
        // $set: 지정한 필드만 바꾸고 나머지 필드(_id 포함)는 그대로 둡니다.
        //   문서 전체를 갈아끼우는 replace_one과 달리 부분 업데이트입니다.
        let update = doc! {
            "$set": {
                "title": input.title.as_str(),
                "author": input.author.as_str(),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update) // (필터, 변경 내용)
            .await?;
        // matched_count: 필터에 걸린 문서 수. 값이 같아서 바뀌지 않았어도 1입니다.
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        // deleted_count: 실제로 지워진 문서 수 (0 또는 1)
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        // { ping: 1 }: 서버가 살아있는지만 확인하는 관리 명령
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn filter_documents_use_exact_field_match() {
        assert_eq!(filter_document(&BookFilter::All), doc! {});
        assert_eq!(
            filter_document(&BookFilter::Title("Dune".into())),
            doc! { "title": "Dune" }
        );
        assert_eq!(
            filter_document(&BookFilter::Author("Frank Herbert".into())),
            doc! { "author": "Frank Herbert" }
        );
    }

    #[test]
    fn new_document_has_no_id_field() {
        let doc = BookDocument {
            id: None,
            title: "Dune".into(),
            author: "Frank Herbert".into(),
        };
        let bson_doc = bson::to_document(&doc).unwrap();
        assert!(!bson_doc.contains_key("_id"));
        assert_eq!(bson_doc.get_str("title").unwrap(), "Dune");
    }

    #[test]
    fn stored_document_converts_to_hex_id() {
        let id = ObjectId::parse_str("6051505f5a5a430e5f771b48").unwrap();
        let stored = doc! { "_id": id, "title": "Dune", "author": "Frank Herbert" };
        let doc: BookDocument = bson::from_document(stored).unwrap();
        let book = Book::from(doc);
        assert_eq!(book.id.as_deref(), Some("6051505f5a5a430e5f771b48"));
        assert_eq!(book.author, "Frank Herbert");
    }
}
