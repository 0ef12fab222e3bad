use crate::event_normalize::FlatEvent;
use crate::state::PassEvent;

pub const BOX_X_LINE: f64 = 83.0;
// Box corridor on the y axis, inclusive at both ends.
pub const BOX_Y_MIN: f64 = 21.0;
pub const BOX_Y_MAX: f64 = 79.0;
pub const OWN_HALF_X_LINE: f64 = 50.0;
pub const OWN_HALF_MIN_GAIN: f64 = 15.0;
pub const OPP_HALF_MIN_GAIN: f64 = 10.0;

/// A failed pass is never progressive. A successful pass is progressive when
/// it enters the box from outside moving forward, or when its forward gain
/// reaches 15 (start at or before halfway) or 10 (start beyond halfway).
pub fn is_progressive(outcome: bool, start_x: f64, end_x: f64, end_y: f64) -> bool {
    if !outcome {
        return false;
    }

    let dist_gain = end_x - start_x;
    let ends_in_box = end_x >= BOX_X_LINE && (BOX_Y_MIN..=BOX_Y_MAX).contains(&end_y);
    let starts_outside_box = start_x < BOX_X_LINE;
    if ends_in_box && starts_outside_box && dist_gain > 0.0 {
        return true;
    }

    if start_x <= OWN_HALF_X_LINE {
        dist_gain >= OWN_HALF_MIN_GAIN
    } else {
        dist_gain >= OPP_HALF_MIN_GAIN
    }
}

pub fn classify_passes(events: &[FlatEvent]) -> Vec<PassEvent> {
    events
        .iter()
        .map(|e| PassEvent {
            x: e.x,
            y: e.y,
            end_x: e.end_x,
            end_y: e.end_y,
            outcome: e.outcome,
            key_pass: e.key_pass,
            action_type: e.action_type.clone(),
            is_progressive: is_progressive(e.outcome, e.x, e.end_x, e.end_y),
        })
        .collect()
}

pub fn reclassify_passes(passes: &[PassEvent]) -> Vec<PassEvent> {
    passes
        .iter()
        .map(|p| PassEvent {
            is_progressive: is_progressive(p.outcome, p.x, p.end_x, p.end_y),
            ..p.clone()
        })
        .collect()
}
