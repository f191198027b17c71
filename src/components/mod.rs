#![allow(clippy::needless_pass_by_value)]

pub mod add_line_dialog;
pub mod app;
pub mod confirmation_dialog;
pub mod editor_state;
pub mod highway_editor;
pub mod line_editor;
pub mod map_canvas;
pub mod map_view;
pub mod modal_overlay;
pub mod shortcuts;
pub mod sidebar;
pub mod station_editor;
pub mod tab_view;
pub mod toast;
