//! Yahoo Finance 제공자.
//!
//! - 심볼 정보/배치 시세: v8 chart API의 `meta` 블록 (reqwest)
//! - 과거 봉: `yahoo_finance_api` connector
//! - 뉴스: v1 search API (reqwest)
//!
//! Yahoo Finance는 공식 API가 아니므로 응답 필드는 모두 선택적으로 파싱합니다.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use market_core::config::UpstreamSettings;
use market_core::domain::{change_percent, NewsArticle};
use market_core::types::{BarInterval, HistoryPeriod};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use super::{BatchQuotes, FastQuote, HistoryRow, ProviderError, QuoteProvider};

/// v8 chart API 응답.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Map<String, Value>,
}

/// v1 search API 응답 (뉴스 부분만).
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsItem {
    title: Option<String>,
    link: Option<String>,
    publisher: Option<String>,
    provider_publish_time: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    resolutions: Vec<Resolution>,
}

#[derive(Debug, Deserialize)]
struct Resolution {
    url: Option<String>,
}

impl From<NewsItem> for NewsArticle {
    fn from(item: NewsItem) -> Self {
        let thumbnail = item
            .thumbnail
            .and_then(|t| t.resolutions.into_iter().next())
            .and_then(|r| r.url);

        NewsArticle {
            title: item.title,
            link: item.link,
            publisher: item.publisher,
            provider_publish_time: item.provider_publish_time.unwrap_or(0),
            kind: item.kind.unwrap_or_else(|| "STORY".to_string()),
            thumbnail,
        }
    }
}

/// Yahoo Finance 기반 시세 제공자.
pub struct YahooProvider {
    client: Client,
    connector: yahoo_finance_api::YahooConnector,
    base_url: String,
    batch_concurrency: usize,
    /// 배치 조회 전체 마감
    batch_timeout: Duration,
    /// 배치 내 심볼당 마감
    symbol_timeout: Duration,
}

impl YahooProvider {
    /// 업스트림 설정으로 제공자를 생성합니다.
    pub fn new(settings: &UpstreamSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ProviderError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| ProviderError::Network(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self {
            client,
            connector,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            batch_concurrency: settings.batch_concurrency.max(1),
            batch_timeout: settings.timeout(),
            symbol_timeout: settings.symbol_timeout(),
        })
    }

    /// chart API의 `meta` 블록을 조회합니다.
    async fn fetch_chart_meta(&self, symbol: &str) -> Result<Map<String, Value>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", "5d"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(ProviderError::Api(format!("HTTP {} ({})", status, symbol)));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("chart 응답 ({}): {}", symbol, e)))?;

        Self::parse_chart_meta(symbol, body)
    }

    fn parse_chart_meta(
        symbol: &str,
        body: ChartResponse,
    ) -> Result<Map<String, Value>, ProviderError> {
        let result = match (body.chart.result, body.chart.error) {
            (Some(result), _) => result,
            (None, Some(err)) if err.code == "Not Found" => {
                return Err(ProviderError::NotFound(symbol.to_string()))
            }
            (None, Some(err)) => {
                return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)))
            }
            (None, None) => return Err(ProviderError::Parse("빈 chart 응답".to_string())),
        };

        result
            .into_iter()
            .next()
            .map(|data| data.meta)
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }

    /// 전일 종가 (`previousClose` 우선, 없으면 `chartPreviousClose`).
    fn previous_close(meta: &Map<String, Value>) -> Option<f64> {
        meta.get("previousClose")
            .or_else(|| meta.get("chartPreviousClose"))
            .and_then(Value::as_f64)
    }

    /// chart meta를 스냅샷용 제공자 필드 맵으로 보강합니다.
    fn info_fields(mut meta: Map<String, Value>) -> Map<String, Value> {
        let price = meta.get("regularMarketPrice").and_then(Value::as_f64);
        let previous_close = Self::previous_close(&meta);

        if let Some(price) = price {
            meta.insert("currentPrice".to_string(), Value::from(price));
            meta.insert(
                "regularMarketChangePercent".to_string(),
                Value::from(change_percent(price, previous_close)),
            );
        }
        if let Some(prev) = previous_close {
            meta.entry("previousClose".to_string())
                .or_insert_with(|| Value::from(prev));
        }

        meta
    }

    async fn fetch_fast_quote(&self, symbol: &str) -> Result<FastQuote, ProviderError> {
        let meta = self.fetch_chart_meta(symbol).await?;

        Ok(FastQuote {
            last_price: meta.get("regularMarketPrice").and_then(Value::as_f64),
            previous_close: Self::previous_close(&meta),
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_info(&self, symbol: &str) -> Result<Map<String, Value>, ProviderError> {
        debug!(symbol = %symbol, "Yahoo Finance 심볼 정보 조회");
        let meta = self.fetch_chart_meta(symbol).await?;
        Ok(Self::info_fields(meta))
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        interval: BarInterval,
    ) -> Result<Vec<HistoryRow>, ProviderError> {
        debug!(
            symbol = %symbol,
            period = %period,
            interval = %interval,
            "Yahoo Finance API 호출"
        );

        let response = self
            .connector
            .get_quote_range(symbol, interval.as_str(), period.as_str())
            .await
            .map_err(|e| ProviderError::Api(format!("Yahoo Finance API 오류 ({}): {}", symbol, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| ProviderError::Parse(format!("Quote 파싱 오류: {}", e)))?;

        Ok(quotes
            .iter()
            .map(|q| HistoryRow {
                timestamp: q.timestamp as i64,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }

    async fn fetch_batch(&self, symbols: &[String]) -> Result<BatchQuotes, ProviderError> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        // 심볼마다 자체 마감을 두고, 배치 마감을 넘긴 심볼은 그 심볼만 타임아웃 처리합니다.
        let deadline = Instant::now() + self.batch_timeout;

        let results: Vec<(String, Result<FastQuote, ProviderError>)> =
            stream::iter(symbols.iter().cloned())
                .map(|symbol| async move {
                    let limit = deadline.min(Instant::now() + self.symbol_timeout);
                    let result = match timeout_at(limit, self.fetch_fast_quote(&symbol)).await {
                        Ok(result) => result,
                        Err(_) => {
                            debug!(symbol = %symbol, "심볼 시세 조회 타임아웃");
                            Err(ProviderError::Timeout(format!("{} ({:?})", symbol, self.symbol_timeout)))
                        }
                    };
                    (symbol, result)
                })
                .buffer_unordered(self.batch_concurrency)
                .collect()
                .await;

        // 모든 요청이 일시적 오류로 실패하면 배치 전체 실패로 봅니다.
        let all_unreachable = results
            .iter()
            .all(|(_, r)| r.as_ref().err().is_some_and(ProviderError::is_retryable));
        if all_unreachable {
            let reason = results
                .into_iter()
                .find_map(|(_, r)| r.err())
                .map(|e| e.to_string())
                .unwrap_or_default();
            warn!(count = symbols.len(), error = %reason, "배치 시세 조회 전체 실패");
            return Err(ProviderError::Network(reason));
        }

        Ok(results.into_iter().collect())
    }

    async fn fetch_news(
        &self,
        symbol: &str,
        count: usize,
    ) -> Result<Vec<NewsArticle>, ProviderError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let news_count = count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", symbol),
                ("quotesCount", "0"),
                ("newsCount", news_count.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Api(format!("HTTP {} (news {})", status, symbol)));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(format!("search 응답: {}", e)))?;

        Ok(body.news.into_iter().take(count).map(NewsArticle::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::io::Write;

    fn provider(base_url: &str) -> YahooProvider {
        let settings = UpstreamSettings {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        YahooProvider::new(&settings).unwrap()
    }

    fn chart_body(symbol: &str, price: f64, prev: f64) -> String {
        serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "INR",
                        "symbol": symbol,
                        "exchangeName": "NSI",
                        "longName": "Tata Consultancy Services Limited",
                        "regularMarketPrice": price,
                        "chartPreviousClose": prev
                    }
                }],
                "error": null
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fetch_info_parses_meta() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v8/finance/chart/TCS.NS")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chart_body("TCS.NS", 4100.0, 4000.0))
            .create_async()
            .await;

        let fields = provider(&server.url()).fetch_info("TCS.NS").await.unwrap();

        mock.assert_async().await;
        assert_eq!(fields["symbol"], "TCS.NS");
        assert_eq!(fields["currency"], "INR");
        assert_eq!(fields["currentPrice"], 4100.0);
        assert_eq!(fields["previousClose"], 4000.0);
        assert!((fields["regularMarketChangePercent"].as_f64().unwrap() - 2.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_info_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v8/finance/chart/NOPE.NS")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(
                r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
            )
            .create_async()
            .await;

        let err = provider(&server.url()).fetch_info("NOPE.NS").await.unwrap_err();
        assert_eq!(err, ProviderError::NotFound("NOPE.NS".to_string()));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v8/finance/chart/INFY.NS")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = provider(&server.url()).fetch_info("INFY.NS").await.unwrap_err();
        assert_eq!(err, ProviderError::RateLimited);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v8/finance/chart/ITC.NS")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = provider(&server.url()).fetch_info("ITC.NS").await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_batch_isolates_failures() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v8/finance/chart/HDFCBANK.NS")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(chart_body("HDFCBANK.NS", 1650.0, 1600.0))
            .create_async()
            .await;
        server
            .mock("GET", "/v8/finance/chart/SBIN.NS")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let symbols = vec!["HDFCBANK.NS".to_string(), "SBIN.NS".to_string()];
        let batch = provider(&server.url()).fetch_batch(&symbols).await.unwrap();

        assert_eq!(batch.len(), 2);
        let hdfc = batch["HDFCBANK.NS"].as_ref().unwrap();
        assert_eq!(hdfc.last_price, Some(1650.0));
        assert_eq!(hdfc.previous_close, Some(1600.0));
        assert!(matches!(batch["SBIN.NS"], Err(ProviderError::Api(_))));
    }

    #[tokio::test]
    async fn test_fetch_batch_slow_symbol_times_out_alone() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v8/finance/chart/FAST.NS")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(chart_body("FAST.NS", 110.0, 100.0))
            .create_async()
            .await;
        let slow_body = chart_body("SLOW.NS", 50.0, 50.0);
        server
            .mock("GET", "/v8/finance/chart/SLOW.NS")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(move |w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(slow_body.as_bytes())
            })
            .create_async()
            .await;

        let settings = UpstreamSettings {
            base_url: server.url(),
            timeout_secs: 2,
            symbol_timeout_secs: 1,
            ..Default::default()
        };
        let provider = YahooProvider::new(&settings).unwrap();
        let symbols = vec!["FAST.NS".to_string(), "SLOW.NS".to_string()];

        let started = std::time::Instant::now();
        let batch = provider.fetch_batch(&symbols).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(batch["FAST.NS"].as_ref().unwrap().last_price, Some(110.0));
        assert!(matches!(batch["SLOW.NS"], Err(ProviderError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_fetch_batch_whole_failure_only_when_retryable() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/v8/finance/chart/RL".to_string()))
            .match_query(Matcher::Any)
            .with_status(429)
            .expect(2)
            .create_async()
            .await;
        server
            .mock("GET", Matcher::Regex(r"^/v8/finance/chart/GONE".to_string()))
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":""}}}"#)
            .create_async()
            .await;
        let provider = provider(&server.url());

        let limited = vec!["RL1.NS".to_string(), "RL2.NS".to_string()];
        assert!(provider.fetch_batch(&limited).await.is_err());

        // 찾을 수 없는 심볼은 재시도 대상이 아니므로 심볼별 결과로 남음
        let gone = vec!["GONE1.NS".to_string(), "GONE2.NS".to_string()];
        let batch = provider.fetch_batch(&gone).await.unwrap();
        assert_eq!(batch["GONE1.NS"], Err(ProviderError::NotFound("GONE1.NS".to_string())));
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_batch_unreachable_is_error() {
        // 닫힌 포트
        let provider = provider("http://127.0.0.1:1");
        let symbols = vec!["TCS.NS".to_string(), "INFY.NS".to_string()];

        let err = provider.fetch_batch(&symbols).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_news() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/finance/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "^NSEI".into()),
                Matcher::UrlEncoded("newsCount".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "news": [
                        {
                            "title": "Sensex climbs",
                            "link": "https://example.com/a",
                            "publisher": "Reuters",
                            "providerPublishTime": 1_704_153_600,
                            "type": "STORY",
                            "thumbnail": { "resolutions": [ { "url": "https://img/1.jpg" } ] }
                        },
                        { "title": "Nifty flat" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let news = provider(&server.url()).fetch_news("^NSEI", 2).await.unwrap();

        assert_eq!(news.len(), 2);
        assert_eq!(news[0].publisher.as_deref(), Some("Reuters"));
        assert_eq!(news[0].provider_publish_time, 1_704_153_600);
        assert_eq!(news[0].thumbnail.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(news[1].provider_publish_time, 0);
        assert_eq!(news[1].kind, "STORY");
        assert_eq!(news[1].thumbnail, None);
    }

    #[tokio::test]
    #[ignore] // 네트워크 필요
    async fn test_live_history() {
        let provider = YahooProvider::new(&UpstreamSettings::default()).unwrap();
        let rows = provider
            .fetch_history("RELIANCE.NS", HistoryPeriod::D5, BarInterval::D1)
            .await
            .unwrap();

        assert!(!rows.is_empty());
        assert!(rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
