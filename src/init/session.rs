use std::path::Path;

use super::json;
use crate::Session;

impl Session {
    pub fn try_from_file<P: AsRef<Path>>(settings_file_path: P) -> Result<Self, String> {
        let settings = json::parse_settings(settings_file_path)?;
        Self::new(settings).map_err(|e| e.to_string())
    }
}
