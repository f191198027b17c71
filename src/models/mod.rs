mod dataset;
mod line;
mod settings;
mod station;

pub use dataset::{Dataset, LineCatalog};
pub use line::{parse_hex_color, Branch, Line, LineKey, Vertex};
pub use settings::EditorSettings;
pub use station::{Membership, Memberships, Station, StationId, StationType};
