use serde::Deserialize;

use crate::state::HeatSample;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// One event record from the feed. Unknown keys are ignored. The key-pass flag
/// and action type each come in two spellings that may both be present;
/// `keypass` and `eventActionType` win over `keyPass` and `actionType`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub player_coordinates: Option<RawPoint>,
    #[serde(default)]
    pub pass_end_coordinates: Option<RawPoint>,
    #[serde(default)]
    pub outcome: Option<bool>,
    #[serde(default)]
    pub keypass: Option<bool>,
    #[serde(default)]
    pub key_pass: Option<bool>,
    #[serde(default)]
    pub event_action_type: Option<String>,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub shot_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatEvent {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub outcome: bool,
    pub key_pass: bool,
    pub action_type: String,
    pub shot_type: String,
}

impl From<&RawEvent> for FlatEvent {
    fn from(raw: &RawEvent) -> Self {
        let (x, y) = flatten_point(raw.player_coordinates.as_ref());
        let (end_x, end_y) = flatten_point(raw.pass_end_coordinates.as_ref());
        Self {
            x,
            y,
            end_x,
            end_y,
            outcome: raw.outcome.unwrap_or(false),
            key_pass: raw.keypass.or(raw.key_pass).unwrap_or(false),
            action_type: raw
                .event_action_type
                .as_ref()
                .or(raw.action_type.as_ref())
                .cloned()
                .unwrap_or_default(),
            shot_type: raw.shot_type.clone().unwrap_or_default(),
        }
    }
}

pub fn normalize_events(raw: &[RawEvent]) -> Vec<FlatEvent> {
    raw.iter().map(FlatEvent::from).collect()
}

pub fn normalize_heat(raw: &[RawPoint]) -> Vec<HeatSample> {
    raw.iter()
        .map(|p| {
            let (x, y) = flatten_point(Some(p));
            HeatSample { x, y }
        })
        .collect()
}

fn flatten_point(point: Option<&RawPoint>) -> (f64, f64) {
    let Some(point) = point else {
        return (0.0, 0.0);
    };
    (point.x.unwrap_or(0.0), point.y.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::{RawEvent, normalize_events};

    fn parse(raw: &str) -> Vec<RawEvent> {
        serde_json::from_str(raw).expect("raw events should parse")
    }

    #[test]
    fn flattens_nested_coordinates() {
        let events = parse(
            r#"[{"playerCoordinates":{"x":40.5,"y":22},"passEndCoordinates":{"x":61,"y":30.5},
                 "outcome":true,"keypass":true,"eventActionType":"cross"}]"#,
        );
        let flat = normalize_events(&events);
        assert_eq!(flat.len(), 1);
        assert_eq!((flat[0].x, flat[0].y), (40.5, 22.0));
        assert_eq!((flat[0].end_x, flat[0].end_y), (61.0, 30.5));
        assert!(flat[0].outcome);
        assert!(flat[0].key_pass);
        assert_eq!(flat[0].action_type, "cross");
    }

    #[test]
    fn missing_pieces_default_to_zero_and_false() {
        let events = parse(
            r#"[{"playerCoordinates":{"x":12}},{"passEndCoordinates":null,"outcome":null},{}]"#,
        );
        let flat = normalize_events(&events);
        assert_eq!(flat.len(), 3);
        assert_eq!((flat[0].x, flat[0].y), (12.0, 0.0));
        for event in &flat[1..] {
            assert_eq!((event.x, event.y, event.end_x, event.end_y), (0.0, 0.0, 0.0, 0.0));
            assert!(!event.outcome);
            assert!(!event.key_pass);
            assert!(event.action_type.is_empty());
        }
    }

    #[test]
    fn both_flag_spellings_are_accepted_together() {
        let events = parse(
            r#"[{"keyPass":false,"keypass":true,"actionType":"pass","eventActionType":"cross"},
                {"keyPass":true,"actionType":"cross"}]"#,
        );
        let flat = normalize_events(&events);
        assert!(flat[0].key_pass);
        assert_eq!(flat[0].action_type, "cross");
        assert!(flat[1].key_pass);
        assert_eq!(flat[1].action_type, "cross");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(normalize_events(&[]).is_empty());
    }
}
