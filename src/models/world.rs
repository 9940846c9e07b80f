//! World model
//!
//! The session's view of the universe: a lazily populated cache of loaded
//! dimensions in front of a `WorldDataSource`, plus the warp graph.

use std::collections::HashMap;

use tracing::debug;

use super::dimension::Dimension;
use super::errors::WorldError;
use super::warp::WarpGraph;
use crate::persistence::WorldDataSource;

pub struct World {
    source: Box<dyn WorldDataSource>,
    dimensions: HashMap<String, Dimension>,
    warp: WarpGraph,
}

impl World {
    pub fn new(source: Box<dyn WorldDataSource>, warp: WarpGraph) -> Self {
        World {
            source,
            dimensions: HashMap::new(),
            warp,
        }
    }

    /// Get a dimension, loading and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the source has no such dimension or its
    /// data cannot be read.
    pub fn dimension(&mut self, code: &str) -> Result<&Dimension, WorldError> {
        if !self.dimensions.contains_key(code) {
            let record = self.source.load_dimension(code)?;
            debug!(dimension = code, bodies = record.bodies.len(), "dimension loaded");
            self.dimensions
                .insert(code.to_string(), Dimension::from_record(code, record));
        }
        Ok(&self.dimensions[code])
    }

    /// A dimension only if it is already cached.
    pub fn cached(&self, code: &str) -> Option<&Dimension> {
        self.dimensions.get(code)
    }

    pub fn available_dimensions(&self) -> Vec<String> {
        self.source.list_available_dimensions()
    }

    pub fn warp(&self) -> &WarpGraph {
        &self.warp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::warp::default_warp_paths;
    use crate::persistence::JsonWorldSource;

    fn world() -> World {
        World::new(
            Box::new(JsonWorldSource::builtin()),
            WarpGraph::new(default_warp_paths()),
        )
    }

    #[test]
    fn dimensions_load_lazily_and_stay_cached() {
        let mut world = world();
        assert!(world.cached("A01").is_none());
        let title = world.dimension("A01").unwrap().title().to_string();
        assert_eq!(title, "Sol System");
        assert!(world.cached("A01").is_some());
    }

    #[test]
    fn unknown_dimension_is_an_error() {
        let mut world = world();
        assert!(matches!(
            world.dimension("Z99"),
            Err(WorldError::UnknownDimension(code)) if code == "Z99"
        ));
        assert!(world.cached("Z99").is_none());
    }

    #[test]
    fn every_warp_target_exists_in_builtin_data() {
        let mut world = world();
        let targets: Vec<String> = default_warp_paths().into_values().flatten().collect();
        for code in targets {
            assert!(world.dimension(&code).is_ok(), "missing dimension {}", code);
        }
    }
}
