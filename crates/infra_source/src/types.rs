//! Wire types for the NAV source's JSON responses
//!
//! ```json
//! {"result": {"status": {"code": 0},
//!             "data": {"data": [{"fbrq": "2022-04-11 00:00:00", "jjjz": "1.2340", "ljjz": "1.5000"}],
//!                      "total_num": "1024"}}}
//! ```
//!
//! Missing or null members decode to their defaults, which the crawl reads as
//! an empty page.

use serde::Deserialize;
use serde_json::Value;

use domain_fund::{NavPage, RemoteNav};

/// Top-level response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavResponse {
    #[serde(default)]
    pub result: Option<ResultBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultBody {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub data: Option<DataBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataBody {
    #[serde(default)]
    pub data: Option<Vec<NavItem>>,
    /// Sent as a string, sometimes as a number
    #[serde(default)]
    pub total_num: Option<Value>,
}

/// One NAV row
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NavItem {
    /// Publication date, `YYYY-MM-DD` with an optional time suffix
    #[serde(default)]
    pub fbrq: String,
    /// Unit NAV
    #[serde(default)]
    pub jjjz: String,
    /// Cumulative NAV
    #[serde(default)]
    pub ljjz: String,
}

impl NavResponse {
    pub fn status_code(&self) -> i64 {
        self.result
            .as_ref()
            .and_then(|r| r.status.as_ref())
            .map_or(0, |s| s.code)
    }

    /// Total row count, when the source sent a usable one
    pub fn total(&self) -> Option<u64> {
        let total = self.result.as_ref()?.data.as_ref()?.total_num.as_ref()?;
        match total {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn into_page(self) -> NavPage {
        let status_code = self.status_code();
        let total = self.total();
        let records = self
            .result
            .and_then(|r| r.data)
            .and_then(|d| d.data)
            .unwrap_or_default()
            .into_iter()
            .map(|item| RemoteNav {
                info_date: item.fbrq,
                unit_worth: item.jjjz,
                total_worth: item.ljjz,
            })
            .collect();

        NavPage {
            status_code,
            records,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_page() {
        let body = r#"{"result":{"status":{"code":0},"data":{"data":[
            {"fbrq":"2022-04-11 00:00:00","jjjz":"1.2340","ljjz":"1.5000"},
            {"fbrq":"2022-04-08 00:00:00","jjjz":"1.2200","ljjz":"1.4860"}
        ],"total_num":"1024"}}}"#;

        let page = serde_json::from_str::<NavResponse>(body).unwrap().into_page();

        assert_eq!(page.status_code, 0);
        assert_eq!(page.total, Some(1024));
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].info_date, "2022-04-11 00:00:00");
        assert_eq!(page.records[0].unit_worth, "1.2340");
        assert_eq!(page.records[1].total_worth, "1.4860");
        assert!(!page.is_terminal());
    }

    #[test]
    fn test_numeric_total() {
        let body = r#"{"result":{"status":{"code":0},"data":{"data":[],"total_num":12}}}"#;
        let response: NavResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total(), Some(12));
    }

    #[test]
    fn test_error_status_without_data() {
        let body = r#"{"result":{"status":{"code":3,"msg":"no symbol"},"data":null}}"#;

        let page = serde_json::from_str::<NavResponse>(body).unwrap().into_page();

        assert_eq!(page.status_code, 3);
        assert!(page.records.is_empty());
        assert_eq!(page.total, None);
        assert!(page.is_terminal());
    }

    #[test]
    fn test_empty_object_is_an_empty_page() {
        let page = serde_json::from_str::<NavResponse>("{}").unwrap().into_page();
        assert_eq!(page, NavPage::default());
    }

    #[test]
    fn test_garbage_total_is_ignored() {
        let body = r#"{"result":{"data":{"data":[],"total_num":"n/a"}}}"#;
        let response: NavResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total(), None);
    }
}
