use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use super::{Line, LineKey, Station, StationId};
use crate::constants::{DEFAULT_BRANCH_NAME, NEW_STATION_NAME};

/// category -> line name -> line
pub type LineCatalog = IndexMap<String, IndexMap<String, Line>>;

/// The whole network being edited. The editing session owns it; the map
/// canvas only ever borrows it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub lines: LineCatalog,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn station_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.iter_mut().find(|s| s.id == id)
    }

    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&Line> {
        self.lines.get(&key.category)?.get(&key.name)
    }

    pub fn line_mut(&mut self, key: &LineKey) -> Option<&mut Line> {
        self.lines.get_mut(&key.category)?.get_mut(&key.name)
    }

    /// Every line in category, then insertion, order.
    pub fn iter_lines(&self) -> impl Iterator<Item = (LineKey, &Line)> {
        self.lines.iter().flat_map(|(category, lines)| {
            lines
                .iter()
                .map(move |(name, line)| (LineKey::new(category.as_str(), name.as_str()), line))
        })
    }

    #[must_use]
    pub fn line_keys(&self) -> Vec<LineKey> {
        self.iter_lines().map(|(key, _)| key).collect()
    }

    /// One past the highest id in use, or `None` once `StationId::MAX` is taken.
    #[must_use]
    pub fn next_station_id(&self) -> Option<StationId> {
        self.stations.iter().map(|s| s.id).max().unwrap_or(0).checked_add(1)
    }

    /// Create a station with a fresh id at `position` and return the id.
    ///
    /// # Errors
    /// Returns an error when no id above the current maximum is left.
    pub fn add_station(&mut self, position: (f64, f64)) -> Result<StationId, String> {
        let id = self.next_station_id().ok_or("No station ids left")?;
        self.stations.push(Station::new(id, NEW_STATION_NAME.to_string(), position));
        Ok(id)
    }

    /// Line names of `category`, or of every category when it is unknown.
    #[must_use]
    pub fn line_names_in(&self, category: &str) -> Vec<String> {
        match self.lines.get(category) {
            Some(lines) => lines.keys().cloned().collect(),
            None => self
                .lines
                .values()
                .flat_map(|lines| lines.keys().cloned())
                .collect::<IndexSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Every branch name in use, led by the main branch.
    #[must_use]
    pub fn branch_names(&self) -> Vec<String> {
        std::iter::once(DEFAULT_BRANCH_NAME.to_string())
            .chain(self.iter_lines().flat_map(|(_, line)| line.branches.keys().cloned()))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn remove_station(&mut self, id: StationId) -> bool {
        let before = self.stations.len();
        self.stations.retain(|s| s.id != id);
        self.stations.len() != before
    }

    /// Register an empty line under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if either part of the key is blank or the line already exists.
    pub fn add_line(&mut self, key: &LineKey) -> Result<(), String> {
        if key.category.trim().is_empty() || key.name.trim().is_empty() {
            return Err("Category and line name are required".to_string());
        }
        if self.line(key).is_some() {
            return Err(format!("Line '{key}' already exists"));
        }
        self.lines
            .entry(key.category.clone())
            .or_default()
            .insert(key.name.clone(), Line::default());
        Ok(())
    }

    /// Remove a line, dropping its category once it holds no lines.
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let Some(lines) = self.lines.get_mut(&key.category) else {
            return false;
        };
        let removed = lines.shift_remove(&key.name).is_some();
        if lines.is_empty() {
            self.lines.shift_remove(&key.category);
        }
        removed
    }

    /// Stations whose name contains `query`, ignoring case.
    #[must_use]
    pub fn filter_stations(&self, query: &str) -> Vec<&Station> {
        let query = query.to_lowercase();
        self.stations
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Line keys whose `"category: name"` label contains `query`, ignoring case.
    #[must_use]
    pub fn filter_line_keys(&self, query: &str) -> Vec<LineKey> {
        let query = query.to_lowercase();
        self.iter_lines()
            .map(|(key, _)| key)
            .filter(|key| key.to_string().to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.stations.push(Station::new(3, "Spawn".to_string(), (0.0, 0.0)));
        dataset.stations.push(Station::new(9, "Frost Harbor".to_string(), (50.0, 50.0)));
        dataset.add_line(&LineKey::new("Nether", "Red")).expect("add red");
        dataset.add_line(&LineKey::new("Nether", "Aqua")).expect("add aqua");
        dataset.add_line(&LineKey::new("Overworld", "Coast")).expect("add coast");
        dataset
    }

    #[test]
    fn test_next_station_id_is_max_plus_one() {
        let mut dataset = sample();
        assert_eq!(dataset.next_station_id(), Some(10));

        let id = dataset.add_station((12.0, 34.0)).expect("add station");
        assert_eq!(id, 10);
        let station = dataset.station(id).expect("new station");
        assert_eq!(station.name, NEW_STATION_NAME);
        assert_eq!(station.position(), (12.0, 34.0));
    }

    #[test]
    fn test_first_station_id_in_empty_dataset() {
        assert_eq!(Dataset::new().next_station_id(), Some(1));
    }

    #[test]
    fn test_station_ids_exhausted() {
        let mut dataset = sample();
        dataset.stations.push(Station::new(StationId::MAX, "Edge".to_string(), (0.0, 0.0)));
        assert_eq!(dataset.next_station_id(), None);

        assert!(dataset.add_station((1.0, 1.0)).is_err());
        assert_eq!(dataset.stations.len(), 3);
    }

    #[test]
    fn test_line_name_suggestions() {
        let dataset = sample();
        assert_eq!(dataset.line_names_in("Nether"), vec!["Red", "Aqua"]);
        assert_eq!(dataset.line_names_in("Unknown"), vec!["Red", "Aqua", "Coast"]);
    }

    #[test]
    fn test_branch_name_suggestions() {
        let mut dataset = sample();
        assert_eq!(dataset.branch_names(), vec![DEFAULT_BRANCH_NAME]);

        let red = dataset.line_mut(&LineKey::new("Nether", "Red")).expect("red");
        red.branch_mut_or_create("North");
        red.branch_mut_or_create(DEFAULT_BRANCH_NAME);
        dataset
            .line_mut(&LineKey::new("Overworld", "Coast"))
            .expect("coast")
            .branch_mut_or_create("North");
        assert_eq!(dataset.branch_names(), vec![DEFAULT_BRANCH_NAME, "North"]);
    }

    #[test]
    fn test_add_line_rejects_duplicates_and_blanks() {
        let mut dataset = sample();
        assert!(dataset.add_line(&LineKey::new("Nether", "Red")).is_err());
        assert!(dataset.add_line(&LineKey::new("", "Red")).is_err());
        assert!(dataset.add_line(&LineKey::new("Nether", "  ")).is_err());
    }

    #[test]
    fn test_remove_line_drops_empty_category() {
        let mut dataset = sample();
        assert!(dataset.remove_line(&LineKey::new("Overworld", "Coast")));
        assert!(!dataset.lines.contains_key("Overworld"));

        assert!(dataset.remove_line(&LineKey::new("Nether", "Red")));
        assert!(dataset.lines.contains_key("Nether"));
        assert!(!dataset.remove_line(&LineKey::new("Nether", "Red")));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let dataset = sample();
        let labels: Vec<String> = dataset.line_keys().iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["Nether: Red", "Nether: Aqua", "Overworld: Coast"]);
    }

    #[test]
    fn test_filters_ignore_case() {
        let dataset = sample();
        let stations = dataset.filter_stations("harb");
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, 9);

        let lines = dataset.filter_line_keys("NETHER: a");
        assert_eq!(lines, vec![LineKey::new("Nether", "Aqua")]);
        assert_eq!(dataset.filter_line_keys("").len(), 3);
    }

    #[test]
    fn test_remove_station() {
        let mut dataset = sample();
        assert!(dataset.remove_station(3));
        assert!(!dataset.remove_station(3));
        assert!(dataset.station(3).is_none());
    }
}
