//! # Bookshelf 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. MongoDB 연결 및 ping (실패하면 즉시 종료)
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

use anyhow::{Context, Result};
use bookshelf::{config::Config, db::BookStore, db::MongoBookStore, router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 bookshelf, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Bookshelf server on {}:{}", config.host, config.port);

    // ── 4단계: MongoDB 연결 ──
    // 드라이버는 연결을 늦게 맺으므로 ping으로 실제 접속을 확인합니다.
    // 여기서 실패하면 `?`로 main이 에러를 반환하고 프로세스가 종료됩니다.
    let store = MongoBookStore::connect(&config)
        .await
        .context("Failed to configure MongoDB client")?;
    store
        .ping()
        .await
        .with_context(|| format!("Failed to reach MongoDB at {}", config.mongodb_uri))?;
    tracing::info!(
        "Connected to MongoDB (database: {}, collection: {})",
        config.database,
        config.collection
    );

    // ── 5단계: 애플리케이션 상태와 라우터 ──
    let state = AppState::new(Arc::new(store), config.store_timeout);
    let app = router(state);

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
