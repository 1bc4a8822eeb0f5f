//! 회사 디렉터리 레코드.
//!
//! 심볼(티커)을 문서 식별자(`_id`)로 사용합니다. 선택 필드는 원본 값이
//! 비어 있으면 문서에서 아예 빠지며, `null`이나 `0`으로 저장되지 않습니다.

use serde::{Deserialize, Serialize};

/// 회사(티커) 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// 티커 심볼 (문서 식별자)
    #[serde(rename = "_id")]
    pub symbol: String,
    /// 회사명
    pub name: String,
    /// 섹터
    pub sector: String,
    /// 업종
    pub industry: String,
    /// 국가
    pub country: String,
    /// 시가총액
    #[serde(rename = "mcap", default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// 주가수익비율 (P/E)
    #[serde(rename = "pe", default, skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    /// 최종 가격
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// 등락률 (%, 기호 제외)
    #[serde(rename = "change", default, skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    /// 거래량
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
}

impl Company {
    /// 필수 필드만으로 레코드를 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        industry: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
            industry: industry.into(),
            country: country.into(),
            market_cap: None,
            pe_ratio: None,
            price: None,
            change_pct: None,
            volume: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let mut company = Company::new("AAPL", "Apple Inc.", "Technology", "Hardware", "USA");
        company.price = Some(189.5);

        let doc = serde_json::to_value(&company).unwrap();
        let obj = doc.as_object().unwrap();

        assert_eq!(obj["_id"], "AAPL");
        assert_eq!(obj["price"], 189.5);
        assert!(!obj.contains_key("change"));
        assert!(!obj.contains_key("mcap"));
        assert!(!obj.contains_key("volume"));
    }

    #[test]
    fn test_document_roundtrip_keeps_missing_fields_absent() {
        let json = r#"{"_id":"MSFT","name":"Microsoft","sector":"Technology",
                       "industry":"Software","country":"USA","volume":1200}"#;
        let company: Company = serde_json::from_str(json).unwrap();

        assert_eq!(company.symbol, "MSFT");
        assert_eq!(company.volume, Some(1200));
        assert_eq!(company.pe_ratio, None);
    }
}
