//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 업스트림 요청 실패 (비-200 응답, 잘못된 URL, 전송/읽기 오류)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 응답 본문 파싱 실패 (숫자 변환, 컬럼 수)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 저장소 쿼리 오류
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 저장소 연결 오류
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DataError {
    /// 요청 단위 실패 여부.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::FetchError(_))
    }

    /// 행 단위 실패 여부.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::FetchError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DataError::StorageError(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => {
                DataError::ConnectionError("connection pool timed out".to_string())
            }
            _ => DataError::StorageError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
