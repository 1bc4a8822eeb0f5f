//! 수집 실패 처리 정책.
//!
//! 요청 단위(HTTP 응답 코드, 전송 오류) 실패와 행 단위(숫자 변환, 컬럼 수)
//! 실패를 각각 어떻게 다룰지 수집기마다 주입받습니다.

use std::fmt;
use std::str::FromStr;

/// 단일 실패에 대한 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// 로그를 남기고 다음 항목으로 진행
    SkipAndLog,
    /// 호출자에게 오류를 전파
    Abort,
}

impl OnFailure {
    pub fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkipAndLog => "skip",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for OnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" | "skip_and_log" | "skip-and-log" => Ok(Self::SkipAndLog),
            "abort" => Ok(Self::Abort),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

/// 수집기 하나에 적용되는 실패 정책 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    /// 요청 단위 실패 (응답 코드, 연결, 본문 읽기)
    pub request: OnFailure,
    /// 행 단위 실패 (파싱)
    pub row: OnFailure,
}

impl FailurePolicy {
    pub const fn new(request: OnFailure, row: OnFailure) -> Self {
        Self { request, row }
    }

    /// 회사 디렉터리 기본값: 모든 실패가 실행 전체를 중단합니다.
    ///
    /// 디렉터리는 가격 수집의 전제 조건이기 때문입니다.
    pub const fn company_default() -> Self {
        Self::new(OnFailure::Abort, OnFailure::Abort)
    }

    /// 가격 수집 기본값: 심볼 단위, 행 단위로 실패를 격리합니다.
    pub const fn price_default() -> Self {
        Self::new(OnFailure::SkipAndLog, OnFailure::SkipAndLog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_failure_from_str() {
        assert_eq!("skip".parse::<OnFailure>().unwrap(), OnFailure::SkipAndLog);
        assert_eq!("SKIP-AND-LOG".parse::<OnFailure>().unwrap(), OnFailure::SkipAndLog);
        assert_eq!("abort".parse::<OnFailure>().unwrap(), OnFailure::Abort);
        assert!("retry".parse::<OnFailure>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert!(FailurePolicy::company_default().request.is_abort());
        assert!(FailurePolicy::company_default().row.is_abort());
        assert!(!FailurePolicy::price_default().request.is_abort());
        assert!(!FailurePolicy::price_default().row.is_abort());
    }
}
