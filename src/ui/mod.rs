// UI and presentation module

pub mod monitor_tui;
