//! Sentiment aggregation engine
//!
//! Pure folds over daily sentiment records:
//! - grouped aggregation (keyword / date / sentiment / keyword+date)
//! - positive and negative leaderboards
//! - per-keyword distribution slices
//! - period averages and time series
//!
//! Everything here is synchronous and re-entrant; callers memoize.

pub mod controversy;


use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{
    AggregatedSentiment, DailySentimentRecord, DistributionSlice, SentimentClass, SentimentRollup,
    TimeSeriesPoint,
};

/// Groups must exceed this many posts to appear in ranked output
pub const MIN_VOLUME: u64 = 20;

/// Ranked outputs are truncated to this many entries
pub const TOP_N: usize = 20;

/// Grouping mode for [`aggregate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Keyword,
    Date,
    Sentiment,
    /// One group per (keyword, date) pair, keyed "{keyword}|{date}"
    KeywordDate,
}

/// Running totals for one group key
#[derive(Debug, Default)]
struct GroupAccumulator {
    sum_pos: f64,
    sum_neg: f64,
    sum_mix: f64,
    sum_neutral: f64,
    pos_count: u64,
    neg_count: u64,
    mix_count: u64,
    neutral_count: u64,
    total_count: u64,
    days: BTreeSet<NaiveDate>,
}

impl GroupAccumulator {
    /// Fold one record into the group.
    ///
    /// Each record's `avg_*` is itself an average over `count` posts, so
    /// weighting by `count` here and dividing by the summed count in
    /// [`Self::finalize`] recovers the weighted mean across records.
    fn add(&mut self, record: &DailySentimentRecord) {
        let weight = record.count as f64;
        self.sum_pos += record.avg_pos.unwrap_or(0.0) * weight;
        self.sum_neg += record.avg_neg.unwrap_or(0.0) * weight;
        self.sum_mix += record.avg_mix.unwrap_or(0.0) * weight;
        self.sum_neutral += record.avg_neutral.unwrap_or(0.0) * weight;

        match record.sentiment {
            SentimentClass::Positive => self.pos_count += record.count,
            SentimentClass::Negative => self.neg_count += record.count,
            SentimentClass::Mixed => self.mix_count += record.count,
            SentimentClass::Neutral => self.neutral_count += record.count,
        }

        self.total_count += record.count;
        self.days.insert(record.date);
    }

    fn finalize(self, group_key: String) -> AggregatedSentiment {
        let total = self.total_count;
        // A zero-count group finalizes to 0.0 averages, never NaN
        let avg = |sum: f64| if total > 0 { sum / total as f64 } else { 0.0 };

        AggregatedSentiment {
            group_key,
            avg_pos: avg(self.sum_pos),
            avg_neg: avg(self.sum_neg),
            avg_mix: avg(self.sum_mix),
            avg_neutral: avg(self.sum_neutral),
            pos_count: self.pos_count,
            neg_count: self.neg_count,
            mix_count: self.mix_count,
            neutral_count: self.neutral_count,
            total_count: total,
            active_days: self.days.len() as u64,
        }
    }
}

fn group_key(record: &DailySentimentRecord, mode: GroupBy) -> String {
    match mode {
        GroupBy::Keyword => record.keyword.clone(),
        GroupBy::Date => record.date.to_string(),
        GroupBy::Sentiment => record.sentiment.to_string(),
        GroupBy::KeywordDate => format!("{}|{}", record.keyword, record.date),
    }
}

/// Aggregate records into one [`AggregatedSentiment`] per distinct group key.
///
/// Output is ordered by group key, which makes ranked consumers
/// deterministic under stable sorts.
pub fn aggregate(records: &[DailySentimentRecord], mode: GroupBy) -> Vec<AggregatedSentiment> {
    let mut groups: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
    for record in records {
        groups
            .entry(group_key(record, mode))
            .or_default()
            .add(record);
    }

    groups
        .into_iter()
        .map(|(key, acc)| acc.finalize(key))
        .collect()
}

/// Distinct keywords present in the records, sorted
pub fn keywords(records: &[DailySentimentRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.keyword.as_str()).collect();
    set.into_iter().map(|k| k.to_string()).collect()
}

/// Keyword leaderboard sorted descending by `metric`, ties broken by keyword
fn leaderboard(
    records: &[DailySentimentRecord],
    metric: fn(&AggregatedSentiment) -> f64,
) -> Vec<AggregatedSentiment> {
    let mut items: Vec<AggregatedSentiment> = aggregate(records, GroupBy::Keyword)
        .into_iter()
        .filter(|item| item.total_count > MIN_VOLUME)
        .collect();

    items.sort_by(|a, b| {
        metric(b)
            .total_cmp(&metric(a))
            .then_with(|| a.group_key.cmp(&b.group_key))
    });
    items.truncate(TOP_N);
    items
}

/// Most-positive keywords over the period
pub fn most_positive(records: &[DailySentimentRecord]) -> Vec<AggregatedSentiment> {
    leaderboard(records, |item| item.avg_pos)
}

/// Most-negative keywords over the period
pub fn most_negative(records: &[DailySentimentRecord]) -> Vec<AggregatedSentiment> {
    leaderboard(records, |item| item.avg_neg)
}

/// Distribution pie for one selected keyword.
///
/// Slice counts are the per-class occurrence counts, not something
/// re-derived from the averages. No selected keyword means no slices.
pub fn distribution(
    records: &[DailySentimentRecord],
    keyword: Option<&str>,
) -> Vec<DistributionSlice> {
    let Some(keyword) = keyword else {
        return Vec::new();
    };

    let Some(rollup) = period_average(records, Some(keyword)) else {
        return Vec::new();
    };

    SentimentClass::ALL
        .iter()
        .map(|&sentiment| {
            let (avg_value, count) = match sentiment {
                SentimentClass::Positive => (rollup.avg_pos, rollup.pos_count),
                SentimentClass::Negative => (rollup.avg_neg, rollup.neg_count),
                SentimentClass::Mixed => (rollup.avg_mix, rollup.mix_count),
                SentimentClass::Neutral => (rollup.avg_neutral, rollup.neutral_count),
            };
            DistributionSlice {
                sentiment,
                avg_value,
                count,
            }
        })
        .collect()
}

/// Count-weighted mean over the period, scoped to one keyword when given
pub fn period_average(
    records: &[DailySentimentRecord],
    keyword: Option<&str>,
) -> Option<SentimentRollup> {
    let mut acc = GroupAccumulator::default();
    let mut seen = false;

    for record in records {
        if keyword.is_some_and(|k| k != record.keyword) {
            continue;
        }
        acc.add(record);
        seen = true;
    }

    if !seen {
        return None;
    }

    let agg = acc.finalize(String::new());
    Some(SentimentRollup {
        avg_pos: agg.avg_pos,
        avg_neg: agg.avg_neg,
        avg_mix: agg.avg_mix,
        avg_neutral: agg.avg_neutral,
        pos_count: agg.pos_count,
        neg_count: agg.neg_count,
        mix_count: agg.mix_count,
        neutral_count: agg.neutral_count,
        total_count: agg.total_count,
    })
}

/// Time series over the period.
///
/// With no keyword selected, one point per day with count-weighted averages
/// across all keywords that day. With a keyword, one point per existing
/// record for that keyword (already atomic), sorted ascending by date.
pub fn time_series(
    records: &[DailySentimentRecord],
    keyword: Option<&str>,
) -> Vec<TimeSeriesPoint> {
    match keyword {
        Some(keyword) => {
            let mut points: Vec<TimeSeriesPoint> = records
                .iter()
                .filter(|r| r.keyword == keyword)
                .map(|r| TimeSeriesPoint {
                    date: r.date,
                    avg_pos: r.avg_pos.unwrap_or(0.0),
                    avg_neg: r.avg_neg.unwrap_or(0.0),
                    avg_mix: r.avg_mix.unwrap_or(0.0),
                    avg_neutral: r.avg_neutral.unwrap_or(0.0),
                    count: r.count,
                })
                .collect();
            points.sort_by_key(|p| p.date);
            points
        }
        None => {
            let mut days: BTreeMap<NaiveDate, GroupAccumulator> = BTreeMap::new();
            for record in records {
                days.entry(record.date).or_default().add(record);
            }

            days.into_iter()
                .map(|(date, acc)| {
                    let agg = acc.finalize(date.to_string());
                    TimeSeriesPoint {
                        date,
                        avg_pos: agg.avg_pos,
                        avg_neg: agg.avg_neg,
                        avg_mix: agg.avg_mix,
                        avg_neutral: agg.avg_neutral,
                        count: agg.total_count,
                    }
                })
                .collect()
        }
    }
}
