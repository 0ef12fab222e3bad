use serde::{Serialize, Serializer};

use crate::event_normalize::FlatEvent;
use crate::state::DefensiveEvent;

const CROSS_ACTION: &str = "cross";
const FALLBACK_COLOR: &str = "white";
const FALLBACK_MARKER: &str = "h";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub marker: &'static str,
    pub label: String,
}

impl MarkerStyle {
    pub fn new(color: &'static str, marker: &'static str, label: impl Into<String>) -> Self {
        Self {
            color,
            marker,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefensiveCategory {
    Tackle,
    Clearance,
    BallRecovery,
    Interception,
    Block,
    Other(String),
}

impl DefensiveCategory {
    pub fn key(&self) -> &str {
        match self {
            Self::Tackle => "tackle",
            Self::Clearance => "clearance",
            Self::BallRecovery => "ball-recovery",
            Self::Interception => "interception",
            Self::Block => "block",
            Self::Other(normalized) => normalized,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Tackle => "Tackle".to_string(),
            Self::Clearance => "Clearance".to_string(),
            Self::BallRecovery => "Recovery".to_string(),
            Self::Interception => "Interception".to_string(),
            Self::Block => "Block".to_string(),
            Self::Other(normalized) => title_case(normalized),
        }
    }

    pub fn style(&self) -> MarkerStyle {
        let (color, marker) = match self {
            Self::Tackle => ("#FF9800", "D"),
            Self::Clearance => ("#F44336", "X"),
            Self::BallRecovery => ("#03A9F4", "o"),
            Self::Interception => ("#9C27B0", "s"),
            Self::Block => ("#607D8B", "^"),
            Self::Other(_) => (FALLBACK_COLOR, FALLBACK_MARKER),
        };
        MarkerStyle::new(color, marker, self.label())
    }
}

impl Serialize for DefensiveCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotBucket {
    Goal,
    Saved,
    Missed,
}

impl ShotBucket {
    pub const ALL: [ShotBucket; 3] = [ShotBucket::Goal, ShotBucket::Saved, ShotBucket::Missed];

    pub fn style(self) -> MarkerStyle {
        match self {
            Self::Goal => MarkerStyle::new("#00ff00", "*", "Goal"),
            Self::Saved => MarkerStyle::new("#38b6ff", "o", "Saved"),
            Self::Missed => MarkerStyle::new("#ff3838", "x", "Miss"),
        }
    }
}

pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn bucket_defensive(raw: &str) -> DefensiveCategory {
    let normalized = normalize_label(raw);
    match normalized.as_str() {
        "tackle" => DefensiveCategory::Tackle,
        "clearance" => DefensiveCategory::Clearance,
        "ball-recovery" => DefensiveCategory::BallRecovery,
        "interception" => DefensiveCategory::Interception,
        "block" => DefensiveCategory::Block,
        _ => DefensiveCategory::Other(normalized),
    }
}

pub fn bucket_shot(raw: &str) -> Option<ShotBucket> {
    match normalize_label(raw).as_str() {
        "goal" => Some(ShotBucket::Goal),
        "save" | "saved" => Some(ShotBucket::Saved),
        "miss" | "block" | "blocked" => Some(ShotBucket::Missed),
        _ => None,
    }
}

pub fn is_cross(action_type: &str) -> bool {
    normalize_label(action_type) == CROSS_ACTION
}

pub fn categorize_defensive(events: &[FlatEvent]) -> Vec<DefensiveEvent> {
    events
        .iter()
        .map(|e| DefensiveEvent {
            x: e.x,
            y: e.y,
            action_type: e.action_type.clone(),
            category: bucket_defensive(&e.action_type),
        })
        .collect()
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
