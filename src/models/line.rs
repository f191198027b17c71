use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use super::StationId;
use crate::constants::{DEFAULT_BRANCH_NAME, DEFAULT_LINE_COLOR};

/// A polyline corner in world coordinates, stored as `[x, z]`.
pub type Vertex = (f64, f64);

/// Identifies a line within the dataset. Line names are only unique per category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub category: String,
    pub name: String,
}

impl LineKey {
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Parse the `"category: name"` label used by the line list.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let (category, name) = label.split_once(": ")?;
        Some(Self::new(category, name))
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub stations: Vec<StationId>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl Branch {
    /// Thread a station onto the branch: its id joins the station list and its
    /// position joins the polyline unless an identical vertex already exists.
    pub fn attach_station(&mut self, id: StationId, position: Vertex) {
        if !self.stations.contains(&id) {
            self.stations.push(id);
        }
        let has_vertex = self.vertices.iter().any(|v| v.0 == position.0 && v.1 == position.1);
        if !has_vertex {
            self.vertices.push(position);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub branches: IndexMap<String, Branch>,
}

fn default_color() -> String {
    DEFAULT_LINE_COLOR.to_string()
}

impl Default for Line {
    fn default() -> Self {
        Self {
            code: String::new(),
            prefix: String::new(),
            y: 0,
            color: default_color(),
            branches: IndexMap::new(),
        }
    }
}

impl Line {
    /// Get a branch, creating an empty one the first time the name is used.
    pub fn branch_mut_or_create(&mut self, name: &str) -> &mut Branch {
        let name = if name.is_empty() { DEFAULT_BRANCH_NAME } else { name };
        self.branches.entry(name.to_string()).or_default()
    }

    /// First vertex of the first branch, used to center the view on the line.
    #[must_use]
    pub fn anchor(&self) -> Option<Vertex> {
        self.branches.values().next().and_then(|b| b.vertices.first().copied())
    }

    /// Parse the stored hex color into RGB. Accepts an optional leading `#`.
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Parse a 6-digit hex color such as `ff0000` or `#00fff0`.
#[must_use]
pub fn parse_hex_color(text: &str) -> Option<(u8, u8, u8)> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_key_label_round_trip() {
        let key = LineKey::new("Nether", "Red Line");
        assert_eq!(key.to_string(), "Nether: Red Line");
        assert_eq!(LineKey::parse_label("Nether: Red Line"), Some(key));
        assert_eq!(LineKey::parse_label("no separator"), None);
    }

    #[test]
    fn test_branch_is_created_lazily_with_default_name() {
        let mut line = Line::default();
        assert!(line.branches.is_empty());

        line.branch_mut_or_create("").vertices.push((1.0, 2.0));
        line.branch_mut_or_create("Spur").vertices.push((3.0, 4.0));

        assert_eq!(line.branches.len(), 2);
        assert_eq!(line.branches[DEFAULT_BRANCH_NAME].vertices, vec![(1.0, 2.0)]);
        assert_eq!(line.anchor(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_attach_station_skips_duplicates() {
        let mut branch = Branch::default();
        branch.attach_station(7, (10.0, 20.0));
        branch.attach_station(7, (10.0, 20.0));
        branch.attach_station(8, (10.0, 20.0));

        assert_eq!(branch.stations, vec![7, 8]);
        assert_eq!(branch.vertices, vec![(10.0, 20.0)]);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("ff0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("#00fff0"), Some((0, 255, 240)));
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_vertices_serialize_as_pairs() {
        let branch = Branch {
            stations: vec![1],
            vertices: vec![(1.5, -3.25)],
        };
        let json = serde_json::to_string(&branch).expect("serialize");
        assert_eq!(json, r#"{"stations":[1],"vertices":[[1.5,-3.25]]}"#);
    }
}
