use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

const FRESH_MINUTES: i64 = 30;
const RECENT_MINUTES: i64 = 120;

/// Piecewise freshness weight for a headline, seen from the
/// evaluation clock `now`.
///
/// Up to 30 minutes old carries full weight, up to two hours carries
/// 0.6, anything older carries 0.2. A boundary age lands in the
/// fresher tier. Future publish stamps count as fresh, so a feed with
/// modest clock skew keeps its newest headlines at full weight.
pub fn decay_weight(published_at: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
    let age = now - published_at;
    if age <= Duration::minutes(FRESH_MINUTES) {
        Decimal::ONE
    } else if age <= Duration::minutes(RECENT_MINUTES) {
        Decimal::new(6, 1)
    } else {
        Decimal::new(2, 1)
    }
}
