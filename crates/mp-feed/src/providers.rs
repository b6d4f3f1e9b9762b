use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use csv::ReaderBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mp_types::{FeedError, MpResult, RiskCategory};

/// A headline as it arrives from a source, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHeadline {
    pub text: String,
    pub source: String,
    /// Absent when the source carried no usable timestamp; ingestion
    /// substitutes the evaluation clock.
    pub published_at: Option<DateTime<Utc>>,
    /// Pre-assigned category, for feeds that ship their own tagging.
    pub category: Option<RiskCategory>,
}

/// Trait for headline sources (sample pools, CSV drops, wire feeds)
#[async_trait]
pub trait HeadlineProvider: Send + Sync + std::fmt::Debug {
    /// Pull the latest batch of raw headlines.
    async fn fetch_latest(&mut self) -> MpResult<Vec<RawHeadline>>;

    /// Get provider name
    fn name(&self) -> &str;

    /// Get provider configuration
    fn config(&self) -> serde_json::Value;
}

/// Tolerant timestamp parsing shared by file and wire sources. A
/// format nobody recognizes reads as None rather than an error.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc())
        })
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        })
        .ok()
}

/// Sample headline provider for demos and tests.
///
/// Draws a seeded batch from a fixed pool with jittered ages, so the
/// same seed always selects the same headlines in the same order.
#[derive(Debug)]
pub struct SampleHeadlineProvider {
    pub name: String,
    rng: ChaCha8Rng,
}

const SAMPLE_POOL: &[(&str, &str)] = &[
    ("Fed officials split on timing of next rate cut", "wire-a"),
    ("Dollar rallies as risk appetite fades", "wire-a"),
    ("ECB warns eurozone inflation still above target", "wire-b"),
    ("New tariffs threaten fragile trade truce", "wire-b"),
    ("Treasury yields jump after strong payrolls print", "wire-a"),
    ("Yuan slides to ten-month low against the dollar", "wire-c"),
    ("Sanctions package targets energy exports", "wire-b"),
    ("BOJ holds policy, yen weakens past key level", "wire-c"),
    ("Missile tests rattle regional markets", "wire-c"),
    ("Central bank intervention props up currency peg", "wire-a"),
    ("Inflation expectations tick higher in survey", "wire-b"),
    ("Border clashes escalate ahead of election", "wire-c"),
    ("Swap spreads widen as rate volatility returns", "wire-a"),
    ("Sterling drops on surprise growth contraction", "wire-b"),
    ("Airline mergers clear final regulatory hurdle", "wire-a"),
    ("Tech earnings lift broader market sentiment", "wire-c"),
];

impl SampleHeadlineProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "Sample Feed".to_string(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl HeadlineProvider for SampleHeadlineProvider {
    async fn fetch_latest(&mut self) -> MpResult<Vec<RawHeadline>> {
        let count = self.rng.gen_range(6..=12);
        let now = Utc::now();

        let mut headlines = Vec::with_capacity(count);
        for _ in 0..count {
            let (text, source) = SAMPLE_POOL[self.rng.gen_range(0..SAMPLE_POOL.len())];
            // Ages spread across all three decay tiers.
            let age_minutes = self.rng.gen_range(0..=170);
            headlines.push(RawHeadline {
                text: text.to_string(),
                source: source.to_string(),
                published_at: Some(now - Duration::minutes(age_minutes)),
                category: None,
            });
        }

        Ok(headlines)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "sample",
            "pool_size": SAMPLE_POOL.len()
        })
    }
}

/// CSV headline provider for local feed drops.
#[derive(Debug)]
pub struct CsvHeadlineProvider {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "headline", alias = "title")]
    text: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default, alias = "timestamp", alias = "date")]
    published_at: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl CsvHeadlineProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            name: "CSV Feed".to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl HeadlineProvider for CsvHeadlineProvider {
    async fn fetch_latest(&mut self) -> MpResult<Vec<RawHeadline>> {
        if !self.path.exists() {
            return Err(
                FeedError::SourceNotFound(self.path.to_string_lossy().to_string()).into(),
            );
        }

        let file = std::fs::File::open(&self.path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut headlines = Vec::new();
        for result in reader.deserialize() {
            let row: CsvRow = result.map_err(|e| FeedError::ParseError {
                message: format!("CSV parsing error: {}", e),
            })?;

            // A timestamp nobody can parse is tolerated; a category
            // nobody recognizes is a broken upstream and fails fast.
            let published_at = row.published_at.as_deref().and_then(|value| {
                let parsed = parse_timestamp(value);
                if parsed.is_none() {
                    tracing::debug!(value, "unparseable publish time, deferring to clock");
                }
                parsed
            });
            let category = row
                .category
                .as_deref()
                .map(RiskCategory::from_str)
                .transpose()?;

            headlines.push(RawHeadline {
                text: row.text,
                source: row.source.unwrap_or_else(|| self.name.clone()),
                published_at,
                category,
            });
        }

        Ok(headlines)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "csv",
            "path": self.path
        })
    }
}

/// Wire-feed provider for a JSON headline endpoint.
///
/// Expects `{"headlines": [{"title": ..., "source": ...,
/// "published_at": ...}, ...]}` and rejects anything else.
#[derive(Debug)]
pub struct HttpHeadlineProvider {
    pub name: String,
    pub endpoint: String,
    pub client: reqwest::Client,
}

impl HttpHeadlineProvider {
    pub fn new(endpoint: String) -> Self {
        Self {
            name: "HTTP Feed".to_string(),
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    fn parse_response(&self, response: serde_json::Value) -> MpResult<Vec<RawHeadline>> {
        let items = response
            .get("headlines")
            .ok_or_else(|| FeedError::ParseError {
                message: "Missing 'headlines' in response".to_string(),
            })?
            .as_array()
            .ok_or_else(|| FeedError::ParseError {
                message: "'headlines' is not an array".to_string(),
            })?;

        let mut headlines = Vec::with_capacity(items.len());
        for item in items {
            let obj = item.as_object().ok_or_else(|| FeedError::ParseError {
                message: "headline entry is not an object".to_string(),
            })?;

            let text = obj
                .get("title")
                .and_then(|v| v.as_str())
                .ok_or_else(|| FeedError::ParseError {
                    message: "headline entry missing 'title'".to_string(),
                })?
                .to_string();
            let source = obj
                .get("source")
                .and_then(|v| v.as_str())
                .unwrap_or(&self.name)
                .to_string();
            let published_at = obj
                .get("published_at")
                .and_then(|v| v.as_str())
                .and_then(parse_timestamp);

            headlines.push(RawHeadline {
                text,
                source,
                published_at,
                category: None,
            });
        }

        Ok(headlines)
    }
}

#[async_trait]
impl HeadlineProvider for HttpHeadlineProvider {
    async fn fetch_latest(&mut self) -> MpResult<Vec<RawHeadline>> {
        tracing::info!("Fetching headlines from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FeedError::LoadingFailed {
                message: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(FeedError::LoadingFailed {
                message: format!("HTTP error: {}", response.status()),
            }
            .into());
        }

        let json: serde_json::Value =
            response.json().await.map_err(|e| FeedError::LoadingFailed {
                message: format!("Failed to parse JSON response: {}", e),
            })?;

        let headlines = self.parse_response(json)?;
        tracing::info!("Retrieved {} headlines from {}", headlines.len(), self.name);
        Ok(headlines)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "http",
            "endpoint": self.endpoint
        })
    }
}
