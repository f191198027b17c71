use serde::{Deserialize, Serialize};

const EDITOR_SETTINGS_KEY: &str = "highway_editor_settings";

/// Editor preferences that outlive a single dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_orthogonal_snap")]
    pub orthogonal_snap: bool,
}

fn default_orthogonal_snap() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            orthogonal_snap: default_orthogonal_snap(),
        }
    }
}

impl EditorSettings {
    /// Parse settings JSON, keeping defaults for any missing field
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid settings JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse settings: {e}"))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize settings: {e}"))
    }

    /// Load settings from `localStorage`, falling back to defaults
    #[must_use]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(EDITOR_SETTINGS_KEY).ok().flatten());

        let Some(json) = stored else {
            return Self::default();
        };

        Self::from_json(&json).unwrap_or_else(|e| {
            leptos::logging::warn!("{e}");
            Self::default()
        })
    }

    /// Save settings to `localStorage`
    ///
    /// # Errors
    ///
    /// Returns an error if storage is unavailable or the write fails
    pub fn save(&self) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window available")?;
        let storage = window
            .local_storage()
            .ok()
            .flatten()
            .ok_or("Local storage unavailable")?;
        let json = self.to_json()?;
        storage
            .set_item(EDITOR_SETTINGS_KEY, &json)
            .map_err(|_| "Failed to write settings".to_string())
    }
}
