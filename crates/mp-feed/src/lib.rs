pub mod classifier;
pub mod providers;

pub use classifier::*;
pub use providers::*;

use chrono::{DateTime, Utc};
use tracing::debug;

use mp_types::HeadlineRecord;

/// Turns raw provider output into classified, region-tagged records.
///
/// Feeds that ship their own category keep it; everything else goes
/// through the classifier. A missing publish time reads as `now`, the
/// freshest possible stamp.
pub fn ingest_batch(
    raws: Vec<RawHeadline>,
    classifier: &dyn Classifier,
    now: DateTime<Utc>,
) -> Vec<HeadlineRecord> {
    let records: Vec<HeadlineRecord> = raws
        .into_iter()
        .map(|raw| {
            let category = raw
                .category
                .unwrap_or_else(|| classifier.classify(&raw.text));
            let region = classifier.tag_region(&raw.text);
            HeadlineRecord {
                text: raw.text,
                category,
                region,
                published_at: raw.published_at.unwrap_or(now),
                source: raw.source,
            }
        })
        .collect();

    debug!(count = records.len(), "ingested headline batch");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mp_types::{Region, RiskCategory};

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap()
    }

    fn raw(text: &str) -> RawHeadline {
        RawHeadline {
            text: text.to_string(),
            source: "test".to_string(),
            published_at: Some(clock() - Duration::minutes(10)),
            category: None,
        }
    }

    #[test]
    fn test_classifies_untagged_headlines() {
        let classifier = KeywordClassifier::new();
        let records = ingest_batch(
            vec![raw("Fed weighs another rate hike")],
            &classifier,
            clock(),
        );
        assert_eq!(records[0].category, RiskCategory::InterestRates);
        assert_eq!(records[0].region, Region::UnitedStates);
    }

    #[test]
    fn test_preassigned_category_wins() {
        let classifier = KeywordClassifier::new();
        let mut tagged = raw("Fed weighs another rate hike");
        tagged.category = Some(RiskCategory::Geopolitics);

        let records = ingest_batch(vec![tagged], &classifier, clock());
        assert_eq!(records[0].category, RiskCategory::Geopolitics);
    }

    #[test]
    fn test_missing_timestamp_reads_as_now() {
        let classifier = KeywordClassifier::new();
        let mut undated = raw("Dollar steadies after selloff");
        undated.published_at = None;

        let records = ingest_batch(vec![undated], &classifier, clock());
        assert_eq!(records[0].published_at, clock());
    }

    #[test]
    fn test_batch_order_preserved() {
        let classifier = KeywordClassifier::new();
        let records = ingest_batch(
            vec![raw("first headline"), raw("second headline")],
            &classifier,
            clock(),
        );
        assert_eq!(records[0].text, "first headline");
        assert_eq!(records[1].text, "second headline");
    }
}
