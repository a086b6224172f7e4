//! # Bookshelf 설정
//!
//! 어디에 있는 MongoDB의 어느 컬렉션을 쓸지, 어느 주소로 요청을 받을지,
//! 요청 하나가 저장소를 얼마나 오래 기다릴지를 정합니다.
//! main에서 `dotenvy`로 `.env`를 먼저 읽은 뒤 `Config::from_env()`를 호출합니다.
//! 모든 항목에 기본값이 있고, 숫자 항목이 잘못되었을 때만 시작이 실패합니다.
//!
//! 설정 항목:
//! - `MONGODB_URI`: MongoDB 접속 주소
//! - `MONGODB_DATABASE`: 데이터베이스 이름
//! - `MONGODB_COLLECTION`: 책 컬렉션 이름
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `STORE_TIMEOUT_SECS`: 요청 하나가 저장소 호출에 쓸 수 있는 최대 시간(초)

use std::env;
use std::time::Duration;
use thiserror::Error;

/// 설정값을 해석하지 못했을 때의 에러
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 숫자여야 하는 값이 숫자가 아님
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    /// 마감시간은 0초일 수 없음
    #[error("STORE_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 main에서만 사용됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB 접속 URI (예: "mongodb://172.17.0.1:27017")
    pub mongodb_uri: String,
    /// 책 컬렉션이 들어있는 데이터베이스 이름 (기본값: "books")
    pub database: String,
    /// 책 컬렉션 이름 (기본값: "books")
    pub collection: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
    /// 요청 하나에 허용되는 저장소 호출 시간
    pub store_timeout: Duration,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 환경변수가 하나도 없어도 동작합니다.
    /// 다만 `PORT`나 `STORE_TIMEOUT_SECS`가 숫자가 아니면 에러를 반환합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        // env::var(key).ok(): 변수가 없거나 유니코드가 아니면 None
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 만듭니다.
    ///
    /// `from_env`는 이 함수에 `env::var`를 넘긴 것이고,
    /// 테스트에서는 HashMap 조회를 넘겨 전역 환경변수를 건드리지 않습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::NotANumber { name: "PORT", value })?,
            None => 8000,
        };

        let timeout_secs: u64 = match lookup("STORE_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::NotANumber {
                name: "STORE_TIMEOUT_SECS",
                value,
            })?,
            None => 10,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://172.17.0.1:27017".to_string()),
            database: lookup("MONGODB_DATABASE").unwrap_or_else(|| "books".to_string()),
            collection: lookup("MONGODB_COLLECTION").unwrap_or_else(|| "books".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://172.17.0.1:27017");
        assert_eq!(config.database, "books");
        assert_eq!(config.collection, "books");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.store_timeout, Duration::from_secs(10));
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = config_from(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "library"),
            ("MONGODB_COLLECTION", "shelf"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("STORE_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.database, "library");
        assert_eq!(config.collection, "shelf");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { name: "PORT", .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = config_from(&[("STORE_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }
}
