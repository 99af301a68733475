//! Daily post-volume analysis: load a table of posts, count them per day,
//! find spikes and show the busiest days.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
