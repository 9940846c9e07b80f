use std::collections::BTreeMap;
use std::path::Path;

use crate::models::dimension::DimensionRecord;
use crate::models::errors::WorldError;

const BUILTIN_WORLD: &str = include_str!("../../data/dimensions.json");

/// Where dimension definitions come from.
pub trait WorldDataSource {
    /// Load one dimension by code.
    fn load_dimension(&self, code: &str) -> Result<DimensionRecord, WorldError>;

    /// Codes of every dimension this source can load.
    fn list_available_dimensions(&self) -> Vec<String>;
}

/// World definitions held in one JSON document keyed by dimension code.
#[derive(Debug, Clone)]
pub struct JsonWorldSource {
    dimensions: BTreeMap<String, DimensionRecord>,
}

impl JsonWorldSource {
    pub fn from_json(contents: &str) -> Result<Self, WorldError> {
        Ok(JsonWorldSource {
            dimensions: serde_json::from_str(contents)?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The galaxy shipped with the game.
    pub fn builtin() -> Self {
        // The embedded document is checked by the tests below.
        Self::from_json(BUILTIN_WORLD).unwrap_or_else(|err| {
            tracing::error!(%err, "built-in world data is malformed");
            JsonWorldSource {
                dimensions: BTreeMap::new(),
            }
        })
    }
}

impl WorldDataSource for JsonWorldSource {
    fn load_dimension(&self, code: &str) -> Result<DimensionRecord, WorldError> {
        self.dimensions
            .get(code)
            .cloned()
            .ok_or_else(|| WorldError::UnknownDimension(code.to_string()))
    }

    fn list_available_dimensions(&self) -> Vec<String> {
        self.dimensions.keys().cloned().collect()
    }
}
