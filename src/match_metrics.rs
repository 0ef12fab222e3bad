use serde::Serialize;

use crate::category_buckets::ShotBucket;
use crate::state::{MatchSnapshot, SummaryStats};

// Counter names in the upstream `statistics` object.
const STAT_RATING: &str = "rating";
const STAT_TOTAL_PASS: &str = "totalPass";
const STAT_ACCURATE_PASS: &str = "accuratePass";
const STAT_POSSESSION_LOST: &str = "possessionLostCtrl";
const STAT_KEY_PASS: &str = "keyPass";
const STAT_GOAL_ASSIST: &str = "goalAssist";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsPanel {
    pub headline: Vec<Metric>,
    pub technical: Vec<Metric>,
}

impl MetricsPanel {
    pub fn find(&self, label: &str) -> Option<&Metric> {
        self.headline
            .iter()
            .chain(self.technical.iter())
            .find(|m| m.label == label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedCounts {
    pub progressive_passes: usize,
    pub dribbles_won: usize,
    pub dribbles_total: usize,
    pub goals: usize,
    pub shots_total: usize,
}

impl DerivedCounts {
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        Self {
            progressive_passes: snapshot.passes.iter().filter(|p| p.is_progressive).count(),
            dribbles_won: snapshot.dribbles.iter().filter(|d| d.outcome).count(),
            dribbles_total: snapshot.dribbles.len(),
            goals: snapshot
                .shots
                .iter()
                .filter(|s| s.bucket == Some(ShotBucket::Goal))
                .count(),
            shots_total: snapshot.shots.len(),
        }
    }
}

/// Rounded to one decimal on the exact binary value, ties to even: 13 of 16
/// is 81.2. Zero when there were no passes.
pub fn pass_accuracy(accurate: impl Into<f64>, total: impl Into<f64>) -> f64 {
    let (accurate, total) = (accurate.into(), total.into());
    if total <= 0.0 {
        return 0.0;
    }
    let pct = accurate / total * 100.0;
    format!("{pct:.1}").parse().unwrap_or(pct)
}

pub fn aggregate_metrics(stats: &SummaryStats, counts: &DerivedCounts) -> MetricsPanel {
    let raw = |name: &str| stats.display(name).unwrap_or_else(|| "0".to_string());

    let mut headline = vec![Metric::new(
        "Rating",
        stats.display(STAT_RATING).unwrap_or_else(|| "-".to_string()),
    )];
    if counts.shots_total > 0 || counts.goals > 0 {
        headline.push(Metric::new(
            "Goals / Shots",
            format!("{} / {}", counts.goals, counts.shots_total),
        ));
    }
    if stats.amount(STAT_KEY_PASS) > 0.0 || stats.amount(STAT_GOAL_ASSIST) > 0.0 {
        headline.push(Metric::new(
            "Key Pass / Assist",
            format!("{} / {}", raw(STAT_KEY_PASS), raw(STAT_GOAL_ASSIST)),
        ));
    }
    let total_passes = stats.amount(STAT_TOTAL_PASS);
    if total_passes > 0.0 {
        headline.push(Metric::new("Total Passes", raw(STAT_TOTAL_PASS)));
    }

    let accuracy = if total_passes > 0.0 {
        format!(
            "{:.1}",
            pass_accuracy(stats.amount(STAT_ACCURATE_PASS), total_passes)
        )
    } else {
        "0".to_string()
    };
    let mut technical = vec![Metric::new(
        "Accurate Passes",
        format!("{} ({accuracy}%)", raw(STAT_ACCURATE_PASS)),
    )];
    if counts.dribbles_total > 0 {
        technical.push(Metric::new(
            "Dribbles",
            format!("{} / {}", counts.dribbles_won, counts.dribbles_total),
        ));
    }
    if stats.amount(STAT_POSSESSION_LOST) > 0.0 {
        technical.push(Metric::new("Possession Lost", raw(STAT_POSSESSION_LOST)));
    }
    if counts.progressive_passes > 0 {
        technical.push(Metric::new("Progression pass", counts.progressive_passes));
    }

    MetricsPanel {
        headline,
        technical,
    }
}
