pub mod category_buckets;
pub mod config;
pub mod data_load;
pub mod event_normalize;
pub mod logging;
pub mod match_metrics;
pub mod progressive;
pub mod shot_orientation;
pub mod state;
pub mod view_filter;
