pub mod engine;
pub mod events;
pub mod hit_detection;
pub mod line_renderer;
pub mod renderer;
pub mod selection;
pub mod snap;
pub mod staging;
pub mod station_renderer;
pub mod viewport;

pub use engine::{MapEngine, PointerButton};
pub use events::{EngineEvent, SelectedItem};
pub use selection::{EditorMode, EditorTab, Selection};
pub use staging::{StagingBuffer, VertexRef};
pub use viewport::Viewport;
