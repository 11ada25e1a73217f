//! City listings from the GeoDB Cities API (RapidAPI).

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SeedError};

pub const DEFAULT_HOST: &str = "wft-geo-db.p.rapidapi.com";
pub const PAGE_SIZE: u32 = 100;
/// Pause between pages to stay under the RapidAPI rate limit.
pub const PAGE_DELAY: Duration = Duration::from_millis(250);

/// One page of city names for a country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityPage {
    pub names: Vec<String>,
    pub total_count: Option<u32>,
}

#[async_trait::async_trait]
pub trait CitySource: Send + Sync {
    async fn fetch_page(&self, country_code: &str, offset: u32, limit: u32) -> Result<CityPage>;
}

#[derive(Debug, Deserialize)]
struct GeoDbResponse {
    #[serde(default)]
    data: Vec<GeoDbCity>,
    metadata: Option<GeoDbMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeoDbCity {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoDbMetadata {
    total_count: Option<u32>,
}

impl From<GeoDbResponse> for CityPage {
    fn from(response: GeoDbResponse) -> Self {
        Self {
            names: response.data.into_iter().map(|city| city.name).collect(),
            total_count: response.metadata.and_then(|m| m.total_count),
        }
    }
}

pub struct GeoDbClient {
    base_url: String,
    host: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeoDbClient {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        let client = reqwest::Client::builder()
            .user_agent("deporty-seed")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: format!("https://{host}/v1/geo"),
            host,
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl CitySource for GeoDbClient {
    async fn fetch_page(&self, country_code: &str, offset: u32, limit: u32) -> Result<CityPage> {
        let url = format!("{}/countries/{}/cities", self.base_url, country_code);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("sort", "-population".to_string()),
            ])
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::UpstreamError {
                status: status.as_u16(),
                country: country_code.to_string(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        let parsed: GeoDbResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

/// Walks every page for `country_code` and returns the trimmed, non-empty
/// names in the order the source returned them.
pub async fn collect_city_names(
    source: &dyn CitySource,
    country_code: &str,
    page_size: u32,
    delay: Duration,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut offset = 0;

    loop {
        let page = source.fetch_page(country_code, offset, page_size).await?;
        if page.names.is_empty() {
            break;
        }

        let fetched = page.names.len();
        names.extend(
            page.names
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        );

        offset += page_size;
        let has_more = match page.total_count {
            Some(total) => offset < total,
            None => fetched == page_size as usize,
        };
        if !has_more {
            break;
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::debug!(country = country_code, count = names.len(), "Collected GeoDB cities");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves `total` numbered cities, optionally without `totalCount`.
    struct FakeSource {
        total: u32,
        report_total: bool,
        calls: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(total: u32, report_total: bool) -> Self {
            Self {
                total,
                report_total,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl CitySource for FakeSource {
        async fn fetch_page(&self, _country: &str, offset: u32, limit: u32) -> Result<CityPage> {
            self.calls.lock().unwrap().push(offset);
            let end = (offset + limit).min(self.total);
            Ok(CityPage {
                names: (offset..end).map(|i| format!(" Ciudad {i} ")).collect(),
                total_count: self.report_total.then_some(self.total),
            })
        }
    }

    #[tokio::test]
    async fn test_collects_all_pages_using_total_count() {
        let source = FakeSource::new(25, true);
        let names = collect_city_names(&source, "CO", 10, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(names.len(), 25);
        assert_eq!(names[0], "Ciudad 0");
        assert_eq!(*source.calls.lock().unwrap(), vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_stops_on_short_page_without_total_count() {
        let source = FakeSource::new(20, false);
        let names = collect_city_names(&source, "PE", 10, Duration::ZERO)
            .await
            .unwrap();

        // A full last page needs one more request to discover the end.
        assert_eq!(names.len(), 20);
        assert_eq!(*source.calls.lock().unwrap(), vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_empty_country_makes_one_request() {
        let source = FakeSource::new(0, true);
        let names = collect_city_names(&source, "CU", 10, Duration::ZERO)
            .await
            .unwrap();

        assert!(names.is_empty());
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_parses_geodb_payload() {
        let body = r#"{
            "data": [{"id": 1, "name": "Bogotá"}, {"id": 2, "name": ""}],
            "metadata": {"currentOffset": 0, "totalCount": 1043}
        }"#;
        let page: CityPage = serde_json::from_str::<GeoDbResponse>(body).unwrap().into();

        assert_eq!(page.names, vec!["Bogotá".to_string(), String::new()]);
        assert_eq!(page.total_count, Some(1043));
    }
}
