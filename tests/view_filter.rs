use std::path::PathBuf;

use pitch_events::config::DataConfig;
use pitch_events::data_load::load_match_data;
use pitch_events::state::{MatchData, MatchSnapshot, PassEvent};
use pitch_events::view_filter::{
    Layer, MapView, PassFilter, Selection, ShotFilter, VizKind, pass_layers, shot_filter_options,
};

fn load_fixture() -> MatchData {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("match");
    load_match_data(&DataConfig::default().with_data_dir(path))
}

fn snapshot(data: &MatchData) -> &MatchSnapshot {
    data.snapshot().expect("fixture should load")
}

fn labels<T>(layers: &[Layer<'_, T>]) -> Vec<String> {
    layers.iter().map(|l| l.label().to_string()).collect()
}

fn sizes<T>(layers: &[Layer<'_, T>]) -> Vec<usize> {
    layers.iter().map(Layer::len).collect()
}

#[test]
fn all_passes_form_a_priority_partition() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let layers = pass_layers(&snap.passes, PassFilter::All);

    assert_eq!(
        labels(&layers),
        vec!["Successful", "Missed", "Cross", "Progressive", "Key Pass"]
    );
    assert_eq!(sizes(&layers), vec![2, 3, 1, 1, 1]);
    assert_eq!(sizes(&layers).iter().sum::<usize>(), snap.passes.len());

    // The key pass is also a progressive cross but is drawn only as a key pass.
    let key_pass = layers[4].records[0];
    assert!(key_pass.is_progressive && key_pass.is_cross());
    for layer in &layers[..4] {
        assert!(!layer.records.iter().any(|p| std::ptr::eq(*p, key_pass)));
    }
    // The progressive cross sits in the cross layer, not the progressive one.
    assert!(layers[2].records[0].is_progressive);
}

#[test]
fn key_pass_filter_ignores_other_flags() {
    let passes = vec![
        PassEvent {
            x: 10.0,
            y: 10.0,
            end_x: 12.0,
            end_y: 10.0,
            outcome: false,
            key_pass: true,
            action_type: "pass".to_string(),
            is_progressive: false,
        },
        PassEvent {
            x: 40.0,
            y: 50.0,
            end_x: 90.0,
            end_y: 50.0,
            outcome: true,
            key_pass: false,
            action_type: "cross".to_string(),
            is_progressive: true,
        },
        PassEvent {
            x: 70.0,
            y: 50.0,
            end_x: 90.0,
            end_y: 50.0,
            outcome: true,
            key_pass: true,
            action_type: "cross".to_string(),
            is_progressive: true,
        },
    ];
    let layers = pass_layers(&passes, PassFilter::KeyPasses);
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].records, vec![&passes[0], &passes[2]]);
}

#[test]
fn single_layer_pass_filters() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let count = |filter| sizes(&pass_layers(&snap.passes, filter));
    assert_eq!(count(PassFilter::Successful), vec![5]);
    assert_eq!(count(PassFilter::Missed), vec![3]);
    assert_eq!(count(PassFilter::KeyPasses), vec![1]);
    assert_eq!(count(PassFilter::Progressive), vec![3]);
}

#[test]
fn crosses_split_by_outcome() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let layers = pass_layers(&snap.passes, PassFilter::Crosses);
    assert_eq!(labels(&layers), vec!["Successful Cross", "Missed Cross"]);
    assert_eq!(sizes(&layers), vec![2, 1]);
}

#[test]
fn shots_are_reoriented_and_grouped() {
    let data = load_fixture();
    let snap = snapshot(&data);
    assert_eq!((snap.shots[0].x, snap.shots[0].y), (90.0, 55.0));
    assert_eq!((snap.shots[5].x, snap.shots[5].y), (100.0, 100.0));

    let MapView::Shots(layers) = snap.view(&Selection::Shots(ShotFilter::All)) else {
        panic!("expected shot layers");
    };
    assert_eq!(labels(&layers), vec!["Goal", "Saved", "Miss"]);
    // "post" has no group and is dropped.
    assert_eq!(sizes(&layers), vec![1, 2, 2]);
}

#[test]
fn shot_filter_uses_raw_type() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let selection = Selection::parse(VizKind::ShotMap, Some("save")).expect("valid token");
    let MapView::Shots(layers) = snap.view(&selection) else {
        panic!("expected shot layers");
    };
    assert_eq!(sizes(&layers), vec![0, 1, 0]);

    let MapView::Shots(layers) = snap.view(&Selection::Shots(ShotFilter::from("post"))) else {
        panic!("expected shot layers");
    };
    assert!(layers.iter().all(Layer::is_empty));
}

#[test]
fn shot_options_in_first_seen_order() {
    let data = load_fixture();
    let snap = snapshot(&data);
    assert_eq!(
        shot_filter_options(&snap.shots),
        vec!["All", "goal", "save", "miss", "blocked", "post", "saved"]
    );
    assert_eq!(shot_filter_options(&[]), vec!["All"]);
}

#[test]
fn dribbles_split_won_and_lost() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let MapView::Dribbles(layers) = snap.view(&Selection::Dribbles) else {
        panic!("expected dribble layers");
    };
    assert_eq!(labels(&layers), vec!["Successful", "Failed"]);
    assert_eq!(sizes(&layers), vec![1, 2]);
}

#[test]
fn defensive_layers_follow_first_appearance() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let MapView::Defensive(layers) = snap.view(&Selection::Defensive) else {
        panic!("expected defensive layers");
    };
    assert_eq!(
        labels(&layers),
        vec!["Tackle", "Recovery", "Aerial-Duel", "Interception"]
    );
    assert_eq!(sizes(&layers), vec![2, 1, 1, 1]);
    assert_eq!(layers[2].style.color, "white");
    assert_eq!(layers[0].style.marker, "D");
}

#[test]
fn filtering_leaves_the_source_untouched() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let before = snap.clone();
    for filter in PassFilter::ALL {
        let _ = snap.view(&Selection::Passes(filter));
    }
    let _ = snap.view(&Selection::Shots(ShotFilter::from("goal")));
    assert_eq!(*snap, before);
}

#[test]
fn view_serializes_with_renderer_columns() {
    let data = load_fixture();
    let snap = snapshot(&data);
    let view = snap.view(&Selection::Passes(PassFilter::KeyPasses));
    let json = serde_json::to_value(&view).expect("view should serialize");
    assert_eq!(json["kind"], "Passes");
    let row = &json["layers"][0]["records"][0];
    assert_eq!(row["end_x"], 90.0);
    assert_eq!(row["keyPass"], true);
    assert_eq!(row["isProgressive"], true);
    assert_eq!(row["actionType"], "cross");
}
