#![allow(clippy::implicit_hasher)]

pub mod logging;
pub mod models;
pub mod components;
pub mod storage;
pub mod constants;
pub mod geometry;
pub mod forms;

pub use components::app::App;
