use std::time::Duration;

use egui::Color32;

pub const WINDOW_TITLE: &str = "PDF to Markdown";
pub const WINDOW_SIZE: [f32; 2] = [1100.0, 760.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [720.0, 480.0];
pub const SIDEBAR_WIDTH: f32 = 240.0;
pub const EDITOR_ROWS: usize = 32;
pub const SPINNER_SIZE: f32 = 32.0;

/// Repaint cadence while a request is outstanding.
pub const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(75);

pub const COLOR_PRIMARY: Color32 = Color32::from_rgb(67, 97, 238);
pub const COLOR_SUCCESS: Color32 = Color32::from_rgb(40, 167, 69);
pub const COLOR_WARNING: Color32 = Color32::from_rgb(214, 158, 46);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(220, 53, 69);

pub const TEXT_NO_RESULTS: &str = "No files converted yet.";
pub const TEXT_NO_SELECTION: &str = "Select a file from the list to preview its content";
pub const TEXT_DROP_HINT: &str = "Drop your PDF files here";
