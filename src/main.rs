use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info};

use pitch_events::config::{DataConfig, LoggingConfig};
use pitch_events::data_load::load_match_data;
use pitch_events::logging::init_logging;
use pitch_events::state::MatchData;
use pitch_events::view_filter::{PassFilter, Selection, VizKind, shot_filter_options};

struct CliArgs {
    data_dir: Option<PathBuf>,
    kind: VizKind,
    filter: Option<String>,
    list_filters: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    init_logging(&LoggingConfig::from_env());

    let args = parse_args(std::env::args().skip(1).collect())?;
    let mut cfg = DataConfig::from_env();
    if let Some(dir) = args.data_dir.as_ref() {
        cfg = cfg.with_data_dir(dir);
    }
    debug!(data_dir = %cfg.data_dir.display(), "resolved data config");

    let data = load_match_data(&cfg);
    let output = match &data {
        MatchData::NoData { reason } => json!({ "noData": reason }),
        MatchData::Loaded(snapshot) if args.list_filters => json!({
            "player": snapshot.player_name,
            "kinds": VizKind::ALL.iter().map(|k| k.label()).collect::<Vec<_>>(),
            "passFilters": PassFilter::ALL.iter().map(|f| f.label()).collect::<Vec<_>>(),
            "shotFilters": shot_filter_options(&snapshot.shots),
        }),
        MatchData::Loaded(snapshot) => {
            let selection = Selection::parse(args.kind, args.filter.as_deref())?;
            let view = snapshot.view(&selection);
            info!(selection = %selection, records = view.record_count(), "view built");
            json!({
                "player": snapshot.player_name,
                "metrics": snapshot.metrics(),
                "view": view,
            })
        }
    };

    let rendered = serde_json::to_string_pretty(&output).context("serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliArgs> {
    let mut out = CliArgs {
        data_dir: None,
        kind: VizKind::PassMap,
        filter: None,
        list_filters: false,
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        if flag == "--list-filters" {
            out.list_filters = true;
            continue;
        }
        if !matches!(flag.as_str(), "--data-dir" | "--kind" | "--filter") {
            anyhow::bail!("unknown argument: {flag}");
        }
        let value = match inline {
            Some(v) => v,
            None => iter
                .next()
                .with_context(|| format!("missing value for {flag}"))?,
        };
        match flag.as_str() {
            "--data-dir" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    out.data_dir = Some(PathBuf::from(trimmed));
                }
            }
            "--kind" => out.kind = value.parse()?,
            _ => out.filter = Some(value),
        }
    }
    Ok(out)
}
