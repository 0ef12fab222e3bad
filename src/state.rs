use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::category_buckets::{self, DefensiveCategory, ShotBucket};
use crate::data_load::MatchDocuments;
use crate::event_normalize::{self, FlatEvent};
use crate::match_metrics::{self, DerivedCounts, MetricsPanel};
use crate::progressive;
use crate::shot_orientation;
use crate::view_filter::{self, MapView, Selection};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassEvent {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub outcome: bool,
    #[serde(rename = "keyPass")]
    pub key_pass: bool,
    #[serde(rename = "actionType")]
    pub action_type: String,
    #[serde(rename = "isProgressive")]
    pub is_progressive: bool,
}

impl PassEvent {
    pub fn start(&self) -> PitchPoint {
        PitchPoint::new(self.x, self.y)
    }

    pub fn end(&self) -> PitchPoint {
        PitchPoint::new(self.end_x, self.end_y)
    }

    pub fn is_cross(&self) -> bool {
        category_buckets::is_cross(&self.action_type)
    }
}

/// Built by `shot_orientation::orient_shots` from unflipped `FlatEvent`s, so
/// the flip cannot be applied to a `ShotEvent` a second time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotEvent {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "shotType")]
    pub shot_type: String,
    #[serde(rename = "category")]
    pub bucket: Option<ShotBucket>,
}

impl ShotEvent {
    pub(crate) fn oriented(position: PitchPoint, shot_type: String) -> Self {
        let bucket = category_buckets::bucket_shot(&shot_type);
        Self {
            x: position.x,
            y: position.y,
            shot_type,
            bucket,
        }
    }

    pub fn position(&self) -> PitchPoint {
        PitchPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DribbleEvent {
    pub x: f64,
    pub y: f64,
    pub outcome: bool,
}

impl From<&FlatEvent> for DribbleEvent {
    fn from(event: &FlatEvent) -> Self {
        Self {
            x: event.x,
            y: event.y,
            outcome: event.outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefensiveEvent {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "actionType")]
    pub action_type: String,
    pub category: DefensiveCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatSample {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    counters: Map<String, Value>,
}

impl SummaryStats {
    pub fn new(counters: Map<String, Value>) -> Self {
        Self { counters }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.counters.get(name).filter(|v| !v.is_null())
    }

    pub fn amount(&self, name: &str) -> f64 {
        self.get(name).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn display(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSnapshot {
    pub player_name: String,
    pub stats: SummaryStats,
    pub passes: Vec<PassEvent>,
    pub shots: Vec<ShotEvent>,
    pub dribbles: Vec<DribbleEvent>,
    pub defensive: Vec<DefensiveEvent>,
    pub heat: Vec<HeatSample>,
}

impl MatchSnapshot {
    pub fn from_documents(docs: MatchDocuments) -> Self {
        let passes = progressive::classify_passes(&event_normalize::normalize_events(
            &docs.events.passes,
        ));
        let shots = shot_orientation::orient_shots(&event_normalize::normalize_events(&docs.shots));
        let dribbles = event_normalize::normalize_events(&docs.events.dribbles)
            .iter()
            .map(DribbleEvent::from)
            .collect::<Vec<_>>();
        let defensive = category_buckets::categorize_defensive(&event_normalize::normalize_events(
            &docs.events.defensive,
        ));
        let heat = event_normalize::normalize_heat(&docs.heat);

        let player_name = docs
            .stats
            .player
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        debug!(
            passes = passes.len(),
            shots = shots.len(),
            dribbles = dribbles.len(),
            defensive = defensive.len(),
            heat = heat.len(),
            "built match snapshot"
        );

        Self {
            player_name,
            stats: SummaryStats::new(docs.stats.statistics),
            passes,
            shots,
            dribbles,
            defensive,
            heat,
        }
    }

    pub fn view(&self, selection: &Selection) -> MapView<'_> {
        view_filter::filter_view(self, selection)
    }

    pub fn metrics(&self) -> MetricsPanel {
        match_metrics::aggregate_metrics(&self.stats, &DerivedCounts::from_snapshot(self))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchData {
    Loaded(MatchSnapshot),
    NoData { reason: String },
}

impl MatchData {
    pub fn no_data(reason: impl Into<String>) -> Self {
        Self::NoData {
            reason: reason.into(),
        }
    }

    pub fn snapshot(&self) -> Option<&MatchSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            Self::NoData { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn view(&self, selection: &Selection) -> MapView<'_> {
        match self.snapshot() {
            Some(snapshot) => snapshot.view(selection),
            None => MapView::Empty,
        }
    }

    pub fn metrics(&self) -> MetricsPanel {
        self.snapshot()
            .map(MatchSnapshot::metrics)
            .unwrap_or_default()
    }
}
