//! Funnel stage membership, conversion rates and cumulative trends.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::funnel::{
    ConversionRates, FunnelStage, FunnelSummary, FunnelTrends, StageCounts, TrendPoint,
    UserActivity, round_one_decimal,
};
use super::quest_user::QuestUser;

/// Default number of rows in the user activity ranking.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Upper bound on the user activity ranking size.
pub const MAX_ACTIVITY_LIMIT: usize = 100;

/// Counts users per stage. Each predicate is applied independently.
#[must_use]
pub fn count_by_stage(users: &[QuestUser]) -> StageCounts {
    let mut counts = StageCounts::default();
    for user in users {
        for stage in FunnelStage::ALL {
            if stage.matches(user) {
                counts.increment(stage);
            }
        }
    }
    counts
}

/// Derives conversion percentages; zero when nobody has started.
#[must_use]
pub fn conversion_rates(counts: &StageCounts) -> ConversionRates {
    let started = counts.get(FunnelStage::Started);
    let rate = |numerator: u64| {
        if started == 0 {
            0.0
        } else {
            round_one_decimal(numerator as f64 / started as f64 * 100.0)
        }
    };
    ConversionRates {
        started_to_connected: rate(counts.get(FunnelStage::Connected)),
        started_to_completed: rate(counts.get(FunnelStage::Completed)),
    }
}

/// Counts plus conversion rates for the KPI cards.
#[must_use]
pub fn summarize(users: &[QuestUser]) -> FunnelSummary {
    let counts = count_by_stage(users);
    FunnelSummary {
        total_users: users.len() as u64,
        counts,
        rates: conversion_rates(&counts),
    }
}

/// Builds cumulative daily series per stage.
///
/// One point per distinct UTC activity date, ascending. Users without an
/// activity timestamp are left out entirely. Every series is
/// non-decreasing.
#[must_use]
pub fn build_trends(users: &[QuestUser]) -> FunnelTrends {
    let mut per_day: BTreeMap<NaiveDate, StageCounts> = BTreeMap::new();
    for user in users {
        let Some(at) = user.last_activity_at else {
            continue;
        };
        let day = per_day.entry(at.date_naive()).or_default();
        for stage in FunnelStage::ALL {
            if stage.matches(user) {
                day.increment(stage);
            }
        }
    }

    let mut trends = FunnelTrends::default();
    let mut running = StageCounts::default();
    for (date, day) in per_day {
        running += day;
        for stage in FunnelStage::ALL {
            trends.series_mut(stage).push(TrendPoint {
                date,
                value: running.get(stage),
            });
        }
    }
    trends
}

/// Ranks users by points (ties keep input order) and tallies their tasks.
///
/// `limit` is clamped to `1..=MAX_ACTIVITY_LIMIT`.
#[must_use]
pub fn user_activity(users: &[QuestUser], limit: usize) -> Vec<UserActivity> {
    let limit = limit.clamp(1, MAX_ACTIVITY_LIMIT);
    let mut ranked: Vec<&QuestUser> = users.iter().collect();
    ranked.sort_by(|a, b| b.points.cmp(&a.points));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, user)| {
            let mut activity = UserActivity {
                rank: i + 1,
                user_id: user.id.clone(),
                username: user.username.clone(),
                points: user.points,
                stages: FunnelStage::ALL
                    .into_iter()
                    .filter(|s| s.matches(user))
                    .collect(),
                custom: Default::default(),
                quiz: Default::default(),
                video: Default::default(),
                social: Default::default(),
                last_activity_at: user.last_activity_at.map(|at| at.to_rfc3339()),
            };
            for task in user.quest_state.tasks() {
                let tally = activity.tally_mut(task.kind());
                tally.total += 1;
                if task.is_completed() {
                    tally.completed += 1;
                }
            }
            activity
        })
        .collect()
}
