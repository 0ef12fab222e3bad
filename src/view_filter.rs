use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::category_buckets::{DefensiveCategory, MarkerStyle, ShotBucket};
use crate::state::{DefensiveEvent, DribbleEvent, HeatSample, MatchSnapshot, PassEvent, ShotEvent};

pub const ALL_TOKEN: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VizKind {
    Heatmap,
    PassMap,
    ShotMap,
    DribbleMap,
    DefensiveMap,
}

impl VizKind {
    pub const ALL: [VizKind; 5] = [
        VizKind::Heatmap,
        VizKind::PassMap,
        VizKind::ShotMap,
        VizKind::DribbleMap,
        VizKind::DefensiveMap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Heatmap => "Heatmap",
            Self::PassMap => "Pass Map",
            Self::ShotMap => "Shot Map",
            Self::DribbleMap => "Dribble Map",
            Self::DefensiveMap => "Defensive Map",
        }
    }
}

impl FromStr for VizKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = token_key(s);
        let key = key.strip_suffix("map").unwrap_or(&key);
        match key {
            "heat" => Ok(Self::Heatmap),
            "pass" | "passes" => Ok(Self::PassMap),
            "shot" | "shots" => Ok(Self::ShotMap),
            "dribble" | "dribbles" => Ok(Self::DribbleMap),
            "defensive" | "defence" | "defense" => Ok(Self::DefensiveMap),
            _ => Err(anyhow!("unknown visualization kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassFilter {
    #[default]
    All,
    Successful,
    Missed,
    Crosses,
    KeyPasses,
    Progressive,
}

impl PassFilter {
    pub const ALL: [PassFilter; 6] = [
        PassFilter::All,
        PassFilter::Successful,
        PassFilter::Missed,
        PassFilter::Crosses,
        PassFilter::KeyPasses,
        PassFilter::Progressive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => ALL_TOKEN,
            Self::Successful => "Successful",
            Self::Missed => "Missed",
            Self::Crosses => "Crosses",
            Self::KeyPasses => "Key Passes",
            Self::Progressive => "Progressive",
        }
    }
}

impl FromStr for PassFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match token_key(s).as_str() {
            "all" => Ok(Self::All),
            "successful" => Ok(Self::Successful),
            "missed" => Ok(Self::Missed),
            "crosses" | "cross" => Ok(Self::Crosses),
            "keypasses" | "keypass" => Ok(Self::KeyPasses),
            "progressive" => Ok(Self::Progressive),
            _ => Err(anyhow!("unknown pass filter: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShotFilter {
    #[default]
    All,
    ShotType(String),
}

impl From<&str> for ShotFilter {
    fn from(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case(ALL_TOKEN) {
            Self::All
        } else {
            Self::ShotType(token.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Heatmap,
    Passes(PassFilter),
    Shots(ShotFilter),
    Dribbles,
    Defensive,
}

impl Selection {
    /// Heat, dribble and defensive maps take no token; anything but `All` is rejected.
    pub fn parse(kind: VizKind, token: Option<&str>) -> Result<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let unfiltered = |sel: Selection| match token {
            None => Ok(sel),
            Some(t) if t.eq_ignore_ascii_case(ALL_TOKEN) => Ok(sel),
            Some(t) => Err(anyhow!("{} takes no filter, got {t}", kind.label())),
        };
        match kind {
            VizKind::Heatmap => unfiltered(Selection::Heatmap),
            VizKind::DribbleMap => unfiltered(Selection::Dribbles),
            VizKind::DefensiveMap => unfiltered(Selection::Defensive),
            VizKind::PassMap => Ok(Selection::Passes(
                token.map(str::parse::<PassFilter>).transpose()?.unwrap_or_default(),
            )),
            VizKind::ShotMap => Ok(Selection::Shots(token.map(ShotFilter::from).unwrap_or_default())),
        }
    }

    pub fn kind(&self) -> VizKind {
        match self {
            Self::Heatmap => VizKind::Heatmap,
            Self::Passes(_) => VizKind::PassMap,
            Self::Shots(_) => VizKind::ShotMap,
            Self::Dribbles => VizKind::DribbleMap,
            Self::Defensive => VizKind::DefensiveMap,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passes(filter) => write!(f, "{} / {}", self.kind().label(), filter.label()),
            Self::Shots(ShotFilter::ShotType(t)) => write!(f, "{} / {t}", self.kind().label()),
            _ => write!(f, "{} / {ALL_TOKEN}", self.kind().label()),
        }
    }
}

/// Named subset of one table. Layers are listed in paint order: the last
/// layer is drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer<'a, T> {
    pub style: MarkerStyle,
    pub records: Vec<&'a T>,
}

impl<'a, T> Layer<'a, T> {
    fn new(style: MarkerStyle, records: Vec<&'a T>) -> Self {
        Self { style, records }
    }

    pub fn label(&self) -> &str {
        &self.style.label
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "layers")]
pub enum MapView<'a> {
    Empty,
    Heatmap(Vec<Layer<'a, HeatSample>>),
    Passes(Vec<Layer<'a, PassEvent>>),
    Shots(Vec<Layer<'a, ShotEvent>>),
    Dribbles(Vec<Layer<'a, DribbleEvent>>),
    Defensive(Vec<Layer<'a, DefensiveEvent>>),
}

impl MapView<'_> {
    pub fn record_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Heatmap(layers) => layers.iter().map(Layer::len).sum(),
            Self::Passes(layers) => layers.iter().map(Layer::len).sum(),
            Self::Shots(layers) => layers.iter().map(Layer::len).sum(),
            Self::Dribbles(layers) => layers.iter().map(Layer::len).sum(),
            Self::Defensive(layers) => layers.iter().map(Layer::len).sum(),
        }
    }
}

pub fn filter_view<'a>(snapshot: &'a MatchSnapshot, selection: &Selection) -> MapView<'a> {
    match selection {
        Selection::Heatmap => MapView::Heatmap(heat_layers(&snapshot.heat)),
        Selection::Passes(filter) => MapView::Passes(pass_layers(&snapshot.passes, *filter)),
        Selection::Shots(filter) => MapView::Shots(shot_layers(&snapshot.shots, filter)),
        Selection::Dribbles => MapView::Dribbles(dribble_layers(&snapshot.dribbles)),
        Selection::Defensive => MapView::Defensive(defensive_layers(&snapshot.defensive)),
    }
}

fn key_pass_style() -> MarkerStyle {
    MarkerStyle::new("#FFD700", "arrow", "Key Pass")
}

fn cross_style() -> MarkerStyle {
    MarkerStyle::new("#00BFFF", "arrow", "Cross")
}

fn progressive_style() -> MarkerStyle {
    MarkerStyle::new("#9C27B0", "arrow", "Progressive")
}

fn successful_style() -> MarkerStyle {
    MarkerStyle::new("#4CAF50", "arrow", "Successful")
}

fn missed_style() -> MarkerStyle {
    MarkerStyle::new("#F44336", "arrow", "Missed")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassTier {
    Missed,
    Successful,
    Progressive,
    Cross,
    KeyPass,
}

fn pass_tier(pass: &PassEvent) -> PassTier {
    if pass.key_pass {
        PassTier::KeyPass
    } else if pass.outcome && pass.is_cross() {
        PassTier::Cross
    } else if pass.is_progressive {
        PassTier::Progressive
    } else if pass.outcome {
        PassTier::Successful
    } else {
        PassTier::Missed
    }
}

pub fn pass_layers(passes: &[PassEvent], filter: PassFilter) -> Vec<Layer<'_, PassEvent>> {
    match filter {
        PassFilter::All => {
            let tier = |t: PassTier| select(passes, |p| pass_tier(p) == t);
            vec![
                Layer::new(successful_style(), tier(PassTier::Successful)),
                Layer::new(missed_style(), tier(PassTier::Missed)),
                Layer::new(cross_style(), tier(PassTier::Cross)),
                Layer::new(progressive_style(), tier(PassTier::Progressive)),
                Layer::new(key_pass_style(), tier(PassTier::KeyPass)),
            ]
        }
        PassFilter::Crosses => vec![
            Layer::new(
                MarkerStyle::new("#00BFFF", "arrow", "Successful Cross"),
                select(passes, |p| p.is_cross() && p.outcome),
            ),
            Layer::new(
                MarkerStyle::new("#F44336", "arrow", "Missed Cross"),
                select(passes, |p| p.is_cross() && !p.outcome),
            ),
        ],
        PassFilter::Successful => vec![Layer::new(successful_style(), select(passes, |p| p.outcome))],
        PassFilter::Missed => vec![Layer::new(missed_style(), select(passes, |p| !p.outcome))],
        PassFilter::KeyPasses => vec![Layer::new(key_pass_style(), select(passes, |p| p.key_pass))],
        PassFilter::Progressive => {
            vec![Layer::new(progressive_style(), select(passes, |p| p.is_progressive))]
        }
    }
}

fn select<T>(records: &[T], pred: impl Fn(&T) -> bool) -> Vec<&T> {
    records.iter().filter(|r| pred(*r)).collect()
}

/// Restrict to the chosen raw shot type, then group into goal, saved and missed.
/// Shots of any other type are left out of every layer.
pub fn shot_layers<'a>(shots: &'a [ShotEvent], filter: &ShotFilter) -> Vec<Layer<'a, ShotEvent>> {
    let selected = shots.iter().filter(|s| match filter {
        ShotFilter::All => true,
        ShotFilter::ShotType(t) => s.shot_type == *t,
    });
    let selected: Vec<&ShotEvent> = selected.collect();
    ShotBucket::ALL
        .into_iter()
        .map(|bucket| {
            let records = selected
                .iter()
                .copied()
                .filter(|s| s.bucket == Some(bucket))
                .collect();
            Layer::new(bucket.style(), records)
        })
        .collect()
}

pub fn shot_filter_options(shots: &[ShotEvent]) -> Vec<String> {
    let mut options = vec![ALL_TOKEN.to_string()];
    for shot in shots {
        if !options[1..].contains(&shot.shot_type) {
            options.push(shot.shot_type.clone());
        }
    }
    options
}

pub fn dribble_layers(dribbles: &[DribbleEvent]) -> Vec<Layer<'_, DribbleEvent>> {
    let (won, lost): (Vec<&DribbleEvent>, Vec<&DribbleEvent>) =
        dribbles.iter().partition(|d| d.outcome);
    vec![
        Layer::new(MarkerStyle::new("#00ff00", "^", "Successful"), won),
        Layer::new(MarkerStyle::new("#ff3838", "v", "Failed"), lost),
    ]
}

pub fn defensive_layers(actions: &[DefensiveEvent]) -> Vec<Layer<'_, DefensiveEvent>> {
    let mut order: Vec<&DefensiveCategory> = Vec::new();
    for action in actions {
        if !order.contains(&&action.category) {
            order.push(&action.category);
        }
    }
    order
        .into_iter()
        .map(|category| {
            let records = actions.iter().filter(|a| a.category == *category).collect();
            Layer::new(category.style(), records)
        })
        .collect()
}

pub fn heat_layers(samples: &[HeatSample]) -> Vec<Layer<'_, HeatSample>> {
    vec![Layer::new(
        MarkerStyle::new("hot", "kde", "Heatmap"),
        samples.iter().collect(),
    )]
}

fn token_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
