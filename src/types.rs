//! Core domain types shared across the dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment class assigned to a bucket of posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentClass {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

impl SentimentClass {
    pub const ALL: [SentimentClass; 4] = [
        SentimentClass::Positive,
        SentimentClass::Negative,
        SentimentClass::Mixed,
        SentimentClass::Neutral,
    ];
}

impl std::fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentClass::Positive => write!(f, "Positive"),
            SentimentClass::Negative => write!(f, "Negative"),
            SentimentClass::Mixed => write!(f, "Mixed"),
            SentimentClass::Neutral => write!(f, "Neutral"),
        }
    }
}

/// One keyword, one calendar day, one dominant-sentiment bucket.
///
/// `avg_*` are per-class average scores over the `count` posts in the
/// bucket. Several records may exist per (keyword, date) pair, one per
/// dominant-sentiment bucket, so consumers must sum counts rather than
/// assume uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySentimentRecord {
    pub keyword: String,
    /// Dominant sentiment class of this bucket
    pub sentiment: SentimentClass,
    /// Calendar day, ISO "YYYY-MM-DD" on the wire
    pub date: NaiveDate,
    pub avg_pos: Option<f64>,
    pub avg_neg: Option<f64>,
    pub avg_mix: Option<f64>,
    pub avg_neutral: Option<f64>,
    /// Number of posts contributing to the averages; the weight for all
    /// downstream weighted averaging
    pub count: u64,
}

/// Accumulated result for one group key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSentiment {
    /// Keyword, date, sentiment label or "{keyword}|{date}" depending on
    /// the grouping mode
    pub group_key: String,
    pub avg_pos: f64,
    pub avg_neg: f64,
    pub avg_mix: f64,
    pub avg_neutral: f64,
    /// Post counts per dominant-sentiment class (occurrence counts,
    /// independent of the weighted averages)
    pub pos_count: u64,
    pub neg_count: u64,
    pub mix_count: u64,
    pub neutral_count: u64,
    pub total_count: u64,
    /// Distinct dates seen in the group
    pub active_days: u64,
}

/// Period rollup for one keyword or the whole filtered set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRollup {
    pub avg_pos: f64,
    pub avg_neg: f64,
    pub avg_mix: f64,
    pub avg_neutral: f64,
    pub pos_count: u64,
    pub neg_count: u64,
    pub mix_count: u64,
    pub neutral_count: u64,
    pub total_count: u64,
}

/// One point of a sentiment time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub avg_pos: f64,
    pub avg_neg: f64,
    pub avg_mix: f64,
    pub avg_neutral: f64,
    pub count: u64,
}

/// One slice of the per-keyword distribution pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub sentiment: SentimentClass,
    /// Weighted average score for the class over the period
    pub avg_value: f64,
    /// Occurrence count for the class, not re-derived from averages
    pub count: u64,
}

/// How contested a keyword's sentiment history is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControversyKind {
    PositiveDominant,
    NegativeDominant,
    Chaotic,
}

impl std::fmt::Display for ControversyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControversyKind::PositiveDominant => write!(f, "positive-dominant"),
            ControversyKind::NegativeDominant => write!(f, "negative-dominant"),
            ControversyKind::Chaotic => write!(f, "chaotic"),
        }
    }
}

/// Controversy ranking entry for one keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControversyEntry {
    pub keyword: String,
    /// Summed post count across all of the keyword's days
    pub total_count: u64,
    /// 0-100, peaks when close-battle days dominate the history
    pub score: f64,
    pub kind: ControversyKind,
}
