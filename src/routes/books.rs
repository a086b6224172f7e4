//! # 책(Book) 라우트 핸들러
//!
//! 책 컬렉션의 CRUD(생성/조회/수정/삭제)를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /books`                      → 전체 목록
//! - `GET    /books/search/title?title=`  → 제목 정확히 일치 검색
//! - `GET    /books/search/author?author=`→ 저자 정확히 일치 검색
//! - `POST   /books`                      → 새 책 생성
//! - `PUT    /books/{id}`                 → 제목/저자 수정
//! - `DELETE /books/{id}`                 → 삭제 후 남은 목록 반환
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 앱 전역 상태 (저장소 핸들, 마감시간 설정)
//! - `Path<String>`: URL 경로 파라미터
//! - `Query<T>`: URL 쿼리 파라미터
//! - `Json<T>`: 요청 본문 JSON
//!
//! Path/Query/Json은 `Result<_, Rejection>`으로 받아서, 추출 실패도
//! `{ "error": { ... } }` JSON 형식의 400으로 응답합니다.
//!
//! 잘못된 ID, 빠진 파라미터, 깨진 본문은 저장소를 호출하기 전에 400으로 끝납니다.
//! 모든 저장소 호출은 요청 시작 시 만든 `Deadline` 안에서 실행됩니다.

use crate::{
    db::{self, BookFilter},
    error::AppError,
    models::*,
    routes::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection}, // Extractor별 거부(rejection) 타입
        Path, Query, State,
    },
    Json,
};
use mongodb::bson::oid::ObjectId;

// ── Extractor 거부 응답 통일 ──
// Axum은 Extractor가 실패하면 기본적으로 평문(plain text) 응답을 바로 돌려보냅니다.
// 핸들러가 `Result<Extractor, Rejection>`을 받으면 실패를 직접 처리할 수 있으므로,
// 아래 세 함수로 모든 거부를 AppError::BadRequest(JSON 에러 형식)로 바꿉니다.

/// 본문 파싱 실패를 AppError::BadRequest로 바꿉니다.
///
/// 깨진 JSON, 잘못된 Content-Type(415), 타입 불일치(422)가 모두 400이 됩니다.
fn parse_body(body: Result<Json<BookInput>, JsonRejection>) -> Result<BookInput, AppError> {
    // |Json(input)|: 클로저 매개변수에서 바로 구조 분해(destructuring)
    body.map(|Json(input)| input)
        // body_text(): Axum이 만들어둔 사람이 읽을 수 있는 에러 설명
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// 쿼리 문자열 파싱 실패를 AppError::BadRequest로 바꿉니다.
///
/// 예: `?title=a&title=b`처럼 같은 키가 두 번 오면 역직렬화가 실패합니다.
fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// 경로의 `{id}`를 ObjectId로 해석합니다.
///
/// 경로 자체를 읽지 못한 경우(예: `%FF`처럼 UTF-8이 아닌 퍼센트 인코딩)와
/// 24자리 16진수가 아닌 경우 모두 400 "Invalid book ID"입니다.
fn parse_path_id(path: Result<Path<String>, PathRejection>) -> Result<ObjectId, AppError> {
    let Path(raw) =
        path.map_err(|_| AppError::BadRequest("Invalid book ID".to_string()))?;
    db::parse_id(&raw)
}

/// `GET /books` — 전체 책 목록을 조회합니다.
///
/// 빈 컬렉션이면 `[]`를 반환합니다 (에러 아님).
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, AppError> {
    // 요청 시작 시점에 마감시각을 정하고, 저장소 호출을 그 안에서 실행합니다.
    let deadline = state.deadline();
    // BookFilter::All: 빈 필터 `{}` → 컬렉션 전체
    let books = deadline.run(state.store.find(BookFilter::All)).await?;
    // Json(): Content-Type: application/json 헤더와 함께 직렬화
    Ok(Json(books))
}

/// `GET /books/search/title?title=...` — 제목이 정확히 같은 책들을 조회합니다.
///
/// "Book"으로 검색하면 "Book 1"은 나오지 않습니다.
pub async fn find_books_by_title(
    State(state): State<AppState>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    // 파라미터가 없거나 빈 문자열이면 저장소를 호출하기 전에 400
    let title = required_param(parse_query(query)?.title, "title")?;
    let deadline = state.deadline();
    let books = deadline
        .run(state.store.find(BookFilter::Title(title)))
        .await?;
    Ok(Json(books))
}

/// `GET /books/search/author?author=...` — 저자가 정확히 같은 책들을 조회합니다.
pub async fn find_books_by_author(
    State(state): State<AppState>,
    query: Result<Query<AuthorQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let author = required_param(parse_query(query)?.author, "author")?;
    let deadline = state.deadline();
    let books = deadline
        .run(state.store.find(BookFilter::Author(author)))
        .await?;
    Ok(Json(books))
}

/// `POST /books` — 새 책을 생성합니다.
///
/// ID는 저장소가 부여하며, 응답에는 부여된 ID가 포함됩니다.
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    // 파싱 → 검증 순서. 둘 중 하나라도 실패하면 아무것도 저장되지 않습니다.
    let input = parse_body(body)?;
    input.validate()?;

    let deadline = state.deadline();
    // &input: 소유권을 넘기지 않고 빌려줍니다. 반환값에는 저장소가 부여한 id가 들어있습니다.
    let book = deadline.run(state.store.insert(&input)).await?;
    tracing::info!(id = ?book.id, "Created book");
    Ok(Json(book))
}

/// `PUT /books/{id}` — 책의 제목과 저자를 수정합니다.
///
/// 순서:
/// 1. ID 해석 (실패 시 400)
/// 2. 기존 레코드 조회 (없으면 404)
/// 3. 본문 파싱/검증 (실패 시 400)
/// 4. 제목/저자 덮어쓰기 후 다시 조회하여 반환
///
/// 2와 4 사이에 버전 확인은 없습니다. 동시에 수정하면 마지막 쓰기가 이깁니다.
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_path_id(path)?;
    // 조회/수정/재조회 세 번의 호출이 같은 마감시각을 나눠 씁니다.
    let deadline = state.deadline();

    // 기존 레코드가 없으면 본문을 보기도 전에 404
    deadline
        .run(state.store.get(id))
        .await?
        .ok_or(AppError::NotFound)?;

    let input = parse_body(body)?;
    input.validate()?;

    // 반환값(일치 여부)은 쓰지 않습니다. 사라졌는지는 아래 재조회가 판단합니다.
    deadline.run(state.store.update(id, &input)).await?;

    // 수정 직후 다른 요청이 지웠다면 여기서 None이 나옵니다.
    let book = deadline.run(state.store.get(id)).await?.ok_or_else(|| {
        AppError::Internal("Error retrieving updated book".to_string())
    })?;
    tracing::info!(%id, "Updated book");
    Ok(Json(book))
}

/// `DELETE /books/{id}` — 책을 삭제하고 남은 목록을 반환합니다.
///
/// 없는 ID를 지워도 에러가 아닙니다. 이때는 빈 목록 `[]`을 반환합니다.
/// 실제로 지운 경우에는 남은 전체 목록을 반환합니다.
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let id = parse_path_id(path)?;
    let deadline = state.deadline();

    let deleted = deadline.run(state.store.delete(id)).await?;
    // 지운 게 없으면 "없음"과 "삭제됨"을 구분하지 않고 빈 목록으로 성공 응답
    if !deleted {
        tracing::debug!(%id, "Nothing to delete");
        return Ok(Json(Vec::new()));
    }
    tracing::info!(%id, "Deleted book");

    let books = deadline.run(state.store.find(BookFilter::All)).await?;
    Ok(Json(books))
}
