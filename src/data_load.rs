use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::DataConfig;
use crate::event_normalize::{RawEvent, RawPoint};
use crate::state::{MatchData, MatchSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("data file not found: {path}")]
    Missing { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed document {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsDocument {
    #[serde(default)]
    pub statistics: Map<String, Value>,
    #[serde(default)]
    pub player: PlayerInfo,
}

#[derive(Debug, Clone, Default)]
pub struct EventsDocument {
    pub passes: Vec<RawEvent>,
    pub dribbles: Vec<RawEvent>,
    pub defensive: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct EventsWire {
    #[serde(default)]
    passes: Option<Vec<RawEvent>>,
    #[serde(default)]
    dribbles: Option<Vec<RawEvent>>,
    #[serde(default)]
    defensive: Option<Vec<RawEvent>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeatWire {
    Bare(Vec<RawPoint>),
    Wrapped {
        #[serde(default)]
        heatmap: Option<Vec<RawPoint>>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShotWire {
    Bare(Vec<RawEvent>),
    Wrapped {
        #[serde(default)]
        shotmap: Option<Vec<RawEvent>>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MatchDocuments {
    pub stats: StatsDocument,
    pub events: EventsDocument,
    pub heat: Vec<RawPoint>,
    pub shots: Vec<RawEvent>,
}

pub fn parse_stats_json(raw: &str) -> Result<StatsDocument> {
    Ok(parse_or_default::<StatsDocument>(raw).context("invalid stats json")?.unwrap_or_default())
}

pub fn parse_events_json(raw: &str) -> Result<EventsDocument> {
    let Some(wire) = parse_or_default::<EventsWire>(raw).context("invalid events json")? else {
        return Ok(EventsDocument::default());
    };
    Ok(EventsDocument {
        passes: wire.passes.unwrap_or_default(),
        dribbles: wire.dribbles.unwrap_or_default(),
        defensive: wire.defensive.unwrap_or_default(),
    })
}

// Heat and shot documents come wrapped (`{"heatmap": [...]}`) or as a bare array.
pub fn parse_heat_json(raw: &str) -> Result<Vec<RawPoint>> {
    let wire = parse_or_default::<HeatWire>(raw).context("invalid heatmap json")?;
    Ok(match wire {
        Some(HeatWire::Bare(points)) => points,
        Some(HeatWire::Wrapped { heatmap }) => heatmap.unwrap_or_default(),
        None => Vec::new(),
    })
}

pub fn parse_shots_json(raw: &str) -> Result<Vec<RawEvent>> {
    let wire = parse_or_default::<ShotWire>(raw).context("invalid shotmap json")?;
    Ok(match wire {
        Some(ShotWire::Bare(shots)) => shots,
        Some(ShotWire::Wrapped { shotmap }) => shotmap.unwrap_or_default(),
        None => Vec::new(),
    })
}

/// Blank input and a literal `null` both mean "no document".
fn parse_or_default<T: DeserializeOwned>(raw: &str) -> Result<Option<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

pub fn load_documents(cfg: &DataConfig) -> Result<MatchDocuments, LoadError> {
    let stats = load_one(&cfg.stats_path(), parse_stats_json)?;
    let events = load_one(&cfg.events_path(), parse_events_json)?;
    let heat = load_one(&cfg.heat_path(), parse_heat_json)?;
    let shots = load_one(&cfg.shots_path(), parse_shots_json)?;
    Ok(MatchDocuments {
        stats,
        events,
        heat,
        shots,
    })
}

fn load_one<T>(path: &Path, parse: impl FnOnce(&str) -> Result<T>) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse(&raw).map_err(|err| LoadError::Malformed {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

/// Never fails: any load error yields `MatchData::NoData` with the error chain as reason.
pub fn load_match_data(cfg: &DataConfig) -> MatchData {
    match load_documents(cfg) {
        Ok(docs) => {
            let snapshot = MatchSnapshot::from_documents(docs);
            info!(player = %snapshot.player_name, "match data loaded");
            MatchData::Loaded(snapshot)
        }
        Err(err) => {
            let reason = error_chain(&err);
            warn!(error = %reason, "match data unavailable");
            MatchData::no_data(reason)
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut next = err.source();
    while let Some(cause) = next {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        next = cause.source();
    }
    out
}
