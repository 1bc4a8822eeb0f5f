//! # Scraper Core
//!
//! 주식 스크래퍼의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 수집 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 회사(티커) 레코드와 일봉 가격 레코드
//! - 요청/행 단위 실패 처리 정책
//! - 수집 날짜 범위 계산
//! - 로깅 인프라

pub mod date_range;
pub mod domain;
pub mod logging;
pub mod policy;

pub use date_range::*;
pub use domain::*;
pub use logging::*;
pub use policy::*;
