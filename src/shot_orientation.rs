use crate::event_normalize::FlatEvent;
use crate::state::{PitchPoint, ShotEvent};

pub const PITCH_EXTENT: f64 = 100.0;

impl PitchPoint {
    /// Mirror through the pitch centre. Applying it twice gives back the input
    /// exactly for coordinates in `50..=100` and for dyadic values; elsewhere
    /// the round trip can be off by a few ulps of 100 (e.g. 0.1 comes back as
    /// 0.0999999999999943).
    pub fn mirrored(self) -> Self {
        Self {
            x: PITCH_EXTENT - self.x,
            y: PITCH_EXTENT - self.y,
        }
    }
}

pub fn orient_shots(events: &[FlatEvent]) -> Vec<ShotEvent> {
    events
        .iter()
        .map(|e| ShotEvent::oriented(PitchPoint::new(e.x, e.y).mirrored(), e.shot_type.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::orient_shots;
    use crate::event_normalize::FlatEvent;
    use crate::state::PitchPoint;

    #[test]
    fn mirror_is_self_inverse() {
        for (x, y) in [(0.0, 0.0), (100.0, 100.0), (88.4, 47.25), (12.5, 99.9)] {
            let p = PitchPoint::new(x, y);
            assert_eq!(p.mirrored().mirrored(), p);
        }
    }

    #[test]
    fn mirror_round_trip_is_within_ulps_of_100() {
        let tolerance = f64::EPSILON * 100.0;
        for (x, y) in [(0.1, 0.2), (33.3, 66.7), (7.77, 1e-3), (49.99, 12.34)] {
            let back = PitchPoint::new(x, y).mirrored().mirrored();
            assert!((back.x - x).abs() <= tolerance, "{x} came back as {}", back.x);
            assert!((back.y - y).abs() <= tolerance, "{y} came back as {}", back.y);
        }
    }

    #[test]
    fn shots_are_flipped_once() {
        let flat = vec![FlatEvent {
            x: 11.5,
            y: 46.0,
            shot_type: "goal".to_string(),
            ..FlatEvent::default()
        }];
        let shots = orient_shots(&flat);
        assert_eq!(shots[0].position(), PitchPoint::new(88.5, 54.0));
        assert_eq!(shots[0].shot_type, "goal");
    }
}
