//! 가격 수집 날짜 범위.
//!
//! 기준일("오늘")은 항상 호출자가 주입합니다. 바이너리는 시스템 시계를,
//! 테스트는 고정 날짜를 넘깁니다.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// 수집 날짜 범위 (양 끝 포함).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `years`년 전 1월 1일부터 `today`까지의 범위.
    ///
    /// 시작 연도가 chrono 표현 범위를 벗어나면 `None`을 반환합니다.
    pub fn trailing_years(today: NaiveDate, years: u32) -> Option<Self> {
        let year = today.year().checked_sub(i32::try_from(years).ok()?)?;
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(Self { start, end: today })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}
