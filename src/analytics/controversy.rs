//! Controversy scoring
//!
//! Ranks keywords by how evenly contested their daily sentiment is over the
//! period, rather than by how positive or negative they average out.

use std::collections::BTreeMap;

use crate::analytics::{aggregate, GroupBy, MIN_VOLUME, TOP_N};
use crate::types::{ControversyEntry, ControversyKind, DailySentimentRecord};

/// A day is dominated only when one side leads the other by more than this
pub const MARGIN: f64 = 0.1;

const CLOSE_WEIGHT: f64 = 0.45;
const DOMINANT_WEIGHT: f64 = 0.275;

/// Classification of a single (keyword, day) aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayDominance {
    Positive,
    Negative,
    CloseBattle,
}

fn classify_day(avg_pos: f64, avg_neg: f64) -> DayDominance {
    if avg_pos > avg_neg + MARGIN {
        DayDominance::Positive
    } else if avg_neg > avg_pos + MARGIN {
        DayDominance::Negative
    } else {
        DayDominance::CloseBattle
    }
}

#[derive(Debug, Default)]
struct KeywordTally {
    pos_days: u64,
    neg_days: u64,
    close_days: u64,
    total_count: u64,
}

impl KeywordTally {
    fn active_days(&self) -> u64 {
        self.pos_days + self.neg_days + self.close_days
    }

    fn score_and_kind(&self) -> (f64, ControversyKind) {
        let days = self.active_days() as f64;
        let pos_ratio = self.pos_days as f64 / days;
        let neg_ratio = self.neg_days as f64 / days;
        let close_ratio = self.close_days as f64 / days;

        let denominator =
            neg_ratio * DOMINANT_WEIGHT + pos_ratio * DOMINANT_WEIGHT + close_ratio * CLOSE_WEIGHT;
        let score = if denominator > 0.0 {
            close_ratio * CLOSE_WEIGHT * 100.0 / denominator
        } else {
            0.0
        };

        let kind = if neg_ratio > pos_ratio && neg_ratio > close_ratio {
            ControversyKind::NegativeDominant
        } else if pos_ratio > neg_ratio && pos_ratio > close_ratio {
            ControversyKind::PositiveDominant
        } else {
            ControversyKind::Chaotic
        };

        (score, kind)
    }
}

/// Rank keywords by contested sentiment over the period.
///
/// Each (keyword, day) aggregate is classified against [`MARGIN`], day-type
/// ratios are taken over the keyword's distinct active days (not weighted by
/// post count), keywords at or below [`MIN_VOLUME`] summed posts are dropped,
/// and the remainder is scored 0-100 and truncated to the top entries.
pub fn controversy_ranking(records: &[DailySentimentRecord]) -> Vec<ControversyEntry> {
    let mut tallies: BTreeMap<String, KeywordTally> = BTreeMap::new();

    for day in aggregate(records, GroupBy::KeywordDate) {
        let Some((keyword, _date)) = day.group_key.split_once('|') else {
            continue;
        };

        let tally = tallies.entry(keyword.to_string()).or_default();
        match classify_day(day.avg_pos, day.avg_neg) {
            DayDominance::Positive => tally.pos_days += 1,
            DayDominance::Negative => tally.neg_days += 1,
            DayDominance::CloseBattle => tally.close_days += 1,
        }
        tally.total_count += day.total_count;
    }

    let mut entries: Vec<ControversyEntry> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.total_count > MIN_VOLUME)
        .map(|(keyword, tally)| {
            let (score, kind) = tally.score_and_kind();
            ControversyEntry {
                keyword,
                total_count: tally.total_count,
                score,
                kind,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    entries.truncate(TOP_N);
    entries
}
