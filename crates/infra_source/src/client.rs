//! NAV source client implementation.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{format_date, PortError};
use domain_fund::{NavPage, NavSource, PageRequest};

use crate::error::SourceError;
use crate::types::NavResponse;

/// Endpoint of Sina's fund NAV open API.
pub const DEFAULT_BASE_URL: &str =
    "https://stock.finance.sina.com.cn/fundInfo/api/openapi.php/CaihuiFundInfoService.getNav";

/// The source rejects requests without a browser user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/102.0.0.0 Safari/537.36";

/// Provenance tag stored with every record fetched here.
pub const SOURCE_TAG: &str = "sina";

/// NAV source settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Endpoint URL, without query string
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SourceConfig {
    /// Loads `SOURCE_BASE_URL` and `SOURCE_USER_AGENT`, keeping defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("SOURCE"))
            .build()?
            .try_deserialize()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the paginated NAV endpoint.
#[derive(Debug, Clone)]
pub struct SinaNavSource {
    client: Client,
    base_url: Url,
}

impl SinaNavSource {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Build the URL for one page.
    ///
    /// Unbounded window ends are sent as empty parameters.
    pub fn page_url(&self, request: &PageRequest) -> Url {
        let from = request.from.map(format_date).unwrap_or_default();
        let to = request.to.map(format_date).unwrap_or_default();
        let page = request.page.to_string();

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("symbol", request.fund_code.as_str())
            .append_pair("datefrom", &from)
            .append_pair("dateto", &to)
            .append_pair("page", &page);
        url
    }

    /// Fetch and decode one page.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success HTTP status, or a
    /// body that is not the expected JSON.
    pub async fn get_page(&self, request: &PageRequest) -> Result<NavPage, SourceError> {
        let url = self.page_url(request);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        let decoded: NavResponse = serde_json::from_str(&text)?;
        Ok(decoded.into_page())
    }
}

#[async_trait]
impl NavSource for SinaNavSource {
    fn source_tag(&self) -> &str {
        SOURCE_TAG
    }

    #[instrument(skip(self, request), fields(fund_code = %request.fund_code, page = request.page))]
    async fn fetch_page(&self, request: &PageRequest) -> Result<NavPage, PortError> {
        let page = self.get_page(request).await?;
        debug!(
            status_code = page.status_code,
            rows = page.records.len(),
            total = ?page.total,
            "NAV page fetched"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::FundCode;

    fn request(from: Option<NaiveDate>, to: Option<NaiveDate>, page: u32) -> PageRequest {
        PageRequest {
            fund_code: FundCode::parse("000962").unwrap(),
            from,
            to,
            page,
        }
    }

    #[test]
    fn test_unbounded_page_url() {
        let source = SinaNavSource::new(SourceConfig::default()).unwrap();
        let url = source.page_url(&request(None, None, 1));

        assert_eq!(
            url.as_str(),
            "https://stock.finance.sina.com.cn/fundInfo/api/openapi.php/CaihuiFundInfoService.getNav\
             ?symbol=000962&datefrom=&dateto=&page=1"
        );
    }

    #[test]
    fn test_bounded_page_url() {
        let source = SinaNavSource::new(SourceConfig::default().base_url("http://127.0.0.1:9000/nav")).unwrap();
        let url = source.page_url(&request(
            NaiveDate::from_ymd_opt(2022, 4, 11),
            NaiveDate::from_ymd_opt(2026, 10, 18),
            3,
        ));

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/nav?symbol=000962&datefrom=2022-04-11&dateto=2026-10-18&page=3"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = SinaNavSource::new(SourceConfig::default().base_url("not a url"));
        assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_source_tag() {
        let source = SinaNavSource::new(SourceConfig::default()).unwrap();
        assert_eq!(source.source_tag(), "sina");
    }
}
