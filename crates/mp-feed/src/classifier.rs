use mp_types::{Region, RiskCategory};

/// Assigns a risk category and region to raw headline text.
///
/// Classification is a feed-side concern; the engine consumes already
/// classified records and never re-classifies.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    fn classify(&self, text: &str) -> RiskCategory;
    fn tag_region(&self, text: &str) -> Region;
    fn name(&self) -> &str;
}

const RATES_KEYWORDS: &[&str] = &[
    "fed",
    "fomc",
    "rate hike",
    "rate cut",
    "interest rate",
    "yield",
    "yields",
    "treasury",
    "inflation",
    "central bank",
    "basis points",
    "monetary policy",
    "ecb",
    "boj",
];

const FX_KEYWORDS: &[&str] = &[
    "dollar",
    "euro",
    "yen",
    "yuan",
    "sterling",
    "currency",
    "exchange rate",
    "devaluation",
    "depreciation",
    "forex",
    "peg",
];

const GEO_KEYWORDS: &[&str] = &[
    "war",
    "sanction",
    "sanctions",
    "conflict",
    "missile",
    "invasion",
    "tariff",
    "tariffs",
    "embargo",
    "coup",
    "election",
    "border",
    "strait",
];

const US_KEYWORDS: &[&str] = &[
    "fed",
    "fomc",
    "federal reserve",
    "washington",
    "white house",
    "wall street",
];

const EUROPE_KEYWORDS: &[&str] = &[
    "ecb",
    "eurozone",
    "euro area",
    "europe",
    "brussels",
    "bundesbank",
    "london",
];

const ASIA_KEYWORDS: &[&str] = &[
    "china",
    "japan",
    "boj",
    "pboc",
    "asia",
    "beijing",
    "tokyo",
    "yuan",
    "korea",
];

/// Keyword-table classifier.
///
/// Counts keyword hits per category and takes the category with the
/// most. Ties break toward rates, then FX, then geopolitics; no hits
/// at all reads as Other. Single-word keywords match whole tokens so
/// "war" does not fire inside "forward".
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn count_hits(haystack: &str, keywords: &[&str]) -> usize {
        keywords
            .iter()
            .filter(|keyword| Self::matches_keyword(haystack, keyword))
            .count()
    }

    fn matches_keyword(haystack: &str, keyword: &str) -> bool {
        if keyword.contains(' ') {
            haystack.contains(keyword)
        } else {
            haystack
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == keyword)
        }
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> RiskCategory {
        let haystack = text.to_lowercase();
        let scored = [
            (
                RiskCategory::InterestRates,
                Self::count_hits(&haystack, RATES_KEYWORDS),
            ),
            (RiskCategory::Fx, Self::count_hits(&haystack, FX_KEYWORDS)),
            (
                RiskCategory::Geopolitics,
                Self::count_hits(&haystack, GEO_KEYWORDS),
            ),
        ];

        // Strictly-greater keeps the earlier table on a tie.
        let mut best = (RiskCategory::Other, 0usize);
        for (category, hits) in scored {
            if hits > best.1 {
                best = (category, hits);
            }
        }
        best.0
    }

    fn tag_region(&self, text: &str) -> Region {
        let haystack = text.to_lowercase();
        if Self::count_hits(&haystack, US_KEYWORDS) > 0 {
            Region::UnitedStates
        } else if Self::count_hits(&haystack, EUROPE_KEYWORDS) > 0 {
            Region::Europe
        } else if Self::count_hits(&haystack, ASIA_KEYWORDS) > 0 {
            Region::Asia
        } else {
            Region::Global
        }
    }

    fn name(&self) -> &str {
        "Keyword Classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_headline() {
        let c = KeywordClassifier::new();
        assert_eq!(
            c.classify("Fed signals rate hike after inflation surprise"),
            RiskCategory::InterestRates
        );
    }

    #[test]
    fn test_fx_headline() {
        let c = KeywordClassifier::new();
        assert_eq!(
            c.classify("Dollar slides against the euro in thin trading"),
            RiskCategory::Fx
        );
    }

    #[test]
    fn test_geopolitics_headline() {
        let c = KeywordClassifier::new();
        assert_eq!(
            c.classify("New sanctions announced over border conflict"),
            RiskCategory::Geopolitics
        );
    }

    #[test]
    fn test_no_hits_reads_other() {
        let c = KeywordClassifier::new();
        assert_eq!(
            c.classify("Quarterly earnings beat analyst estimates"),
            RiskCategory::Other
        );
    }

    #[test]
    fn test_most_hits_wins() {
        let c = KeywordClassifier::new();
        // One rates hit (fed) against two FX hits (dollar, yen).
        assert_eq!(
            c.classify("Dollar and yen whipsaw as Fed stays quiet"),
            RiskCategory::Fx
        );
    }

    #[test]
    fn test_tie_breaks_toward_rates() {
        let c = KeywordClassifier::new();
        // One hit each: yield vs dollar.
        assert_eq!(
            c.classify("Yield spike lifts the dollar"),
            RiskCategory::InterestRates
        );
    }

    #[test]
    fn test_token_matching_avoids_substrings() {
        let c = KeywordClassifier::new();
        // "forward" must not fire the "war" keyword.
        assert_eq!(
            c.classify("Company issues forward guidance for 2026"),
            RiskCategory::Other
        );
    }

    #[test]
    fn test_region_tagging() {
        let c = KeywordClassifier::new();
        assert_eq!(c.tag_region("FOMC minutes due Wednesday"), Region::UnitedStates);
        assert_eq!(c.tag_region("ECB holds deposit rate"), Region::Europe);
        assert_eq!(c.tag_region("PBOC sets stronger yuan fix"), Region::Asia);
        assert_eq!(c.tag_region("Commodity prices drift lower"), Region::Global);
    }

    #[test]
    fn test_region_priority_us_first() {
        let c = KeywordClassifier::new();
        // Mentions both sides; US table is checked first.
        assert_eq!(
            c.tag_region("Fed and ECB diverge on policy"),
            Region::UnitedStates
        );
    }
}
