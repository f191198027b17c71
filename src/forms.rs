//! Text-field snapshots of the station and line editors.
//!
//! Every field is parsed before anything is written, so a bad entry leaves the
//! dataset exactly as it was.

use crate::constants::{DEFAULT_BRANCH_NAME, INVALID_COLOR_PREVIEW};
use crate::geometry::round_to_hundredths;
use crate::models::{parse_hex_color, Dataset, Line, LineKey, Membership, Memberships, Station, StationId, StationType, Vertex};

/// Parse a coordinate field and round it to hundredths.
///
/// # Errors
/// Returns an error naming the field if the text is not a finite number
pub fn parse_coordinate(label: &str, text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(round_to_hundredths)
        .ok_or_else(|| format!("Invalid {label} coordinate: '{text}'"))
}

/// Parse an X/Z field pair into a rounded position.
///
/// # Errors
/// Returns an error for the first field that is not a number
pub fn parse_position(x: &str, z: &str) -> Result<Vertex, String> {
    Ok((parse_coordinate("X", x)?, parse_coordinate("Z", z)?))
}

/// Parse an optional whole-number level. Empty text means absent.
fn parse_level(label: &str, text: &str) -> Result<Option<i32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| format!("Invalid {label}: '{text}'"))
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() { None } else { Some(text.to_string()) }
}

/// One row of the station connection table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionRow {
    pub category: String,
    pub line: String,
    pub map_number: String,
    pub branch: String,
}

impl ConnectionRow {
    fn is_complete(&self) -> bool {
        !self.category.trim().is_empty() && !self.line.trim().is_empty()
    }

    fn branch_name(&self) -> &str {
        if self.branch.is_empty() {
            DEFAULT_BRANCH_NAME
        } else {
            &self.branch
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationForm {
    pub name: String,
    pub station_type: StationType,
    pub x: String,
    pub z: String,
    pub y1: String,
    pub y2: String,
    pub notes: String,
    pub connections: Vec<ConnectionRow>,
}

impl StationForm {
    #[must_use]
    pub fn from_station(station: &Station) -> Self {
        let connections = station
            .lines
            .iter()
            .flat_map(|(category, lines)| {
                lines.iter().map(move |(line, membership)| ConnectionRow {
                    category: category.clone(),
                    line: line.clone(),
                    map_number: membership.map_number().to_string(),
                    branch: membership.branch().to_string(),
                })
            })
            .collect();

        Self {
            name: station.name.clone(),
            station_type: station.station_type,
            x: station.x.to_string(),
            z: station.z.to_string(),
            y1: station.y1.map(|y| y.to_string()).unwrap_or_default(),
            y2: station.y2.map(|y| y.to_string()).unwrap_or_default(),
            notes: station.notes.clone().unwrap_or_default(),
            connections,
        }
    }

    /// Whether the level fields mean anything for the chosen type.
    #[must_use]
    pub fn levels_enabled(&self) -> bool {
        self.station_type.is_elevator()
    }

    /// Write the form back to station `id`, then thread the station onto the
    /// branch of every connected line that exists.
    ///
    /// # Errors
    /// Returns an error if a numeric field does not parse or the station is gone.
    /// Nothing is modified in that case.
    pub fn apply(&self, dataset: &mut Dataset, id: StationId) -> Result<(), String> {
        let (x, z) = parse_position(&self.x, &self.z)?;
        let (y1, y2) = if self.levels_enabled() {
            (parse_level("Y1", &self.y1)?, parse_level("Y2", &self.y2)?)
        } else {
            (None, None)
        };

        let mut memberships = Memberships::new();
        for row in self.connections.iter().filter(|r| r.is_complete()) {
            memberships
                .entry(row.category.clone())
                .or_default()
                .insert(row.line.clone(), Membership::new(row.map_number.clone(), row.branch_name()));
        }

        let station = dataset.station_mut(id).ok_or_else(|| format!("Station {id} not found"))?;
        station.name.clone_from(&self.name);
        station.station_type = self.station_type;
        station.x = x;
        station.z = z;
        station.y1 = y1;
        station.y2 = y2;
        station.notes = non_empty(&self.notes);
        station.lines = memberships;

        for row in self.connections.iter().filter(|r| r.is_complete()) {
            let key = LineKey::new(row.category.as_str(), row.line.as_str());
            if let Some(line) = dataset.line_mut(&key) {
                line.branch_mut_or_create(row.branch_name()).attach_station(id, (x, z));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineForm {
    pub code: String,
    pub prefix: String,
    pub y: String,
    pub color: String,
}

impl LineForm {
    #[must_use]
    pub fn from_line(line: &Line) -> Self {
        Self {
            code: line.code.clone(),
            prefix: line.prefix.clone(),
            y: line.y.to_string(),
            color: line.color.clone(),
        }
    }

    /// The color field as stored: trimmed, without `#`.
    #[must_use]
    pub fn normalized_color(&self) -> String {
        self.color.trim().replace('#', "")
    }

    /// CSS color for the live swatch, gray while the field is not valid hex.
    #[must_use]
    pub fn preview_color(&self) -> String {
        parse_hex_color(&self.normalized_color())
            .map_or_else(|| INVALID_COLOR_PREVIEW.to_string(), |(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Take a `#rrggbb` value from the color picker.
    pub fn set_color_from_picker(&mut self, value: &str) {
        self.color = value.trim().trim_start_matches('#').to_string();
    }

    /// Write the attribute fields back to the line. Staged path edits are
    /// committed separately by the map.
    ///
    /// # Errors
    /// Returns an error if the elevation is not a whole number or the line is gone.
    pub fn apply(&self, dataset: &mut Dataset, key: &LineKey) -> Result<(), String> {
        let y = self
            .y
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid elevation: '{}'", self.y))?;
        let line = dataset.line_mut(key).ok_or_else(|| format!("Line '{key}' not found"))?;
        line.code.clone_from(&self.code);
        line.prefix.clone_from(&self.prefix);
        line.y = y;
        line.color = self.normalized_color();
        Ok(())
    }
}
