use std::collections::BTreeMap;

/// Directed adjacency list of permitted jumps between dimensions.
///
/// An edge `A -> B` only allows jumping from A to B; the reverse needs its
/// own edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarpGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl WarpGraph {
    pub fn new(edges: BTreeMap<String, Vec<String>>) -> Self {
        WarpGraph { edges }
    }

    /// Destinations reachable from `from`, or `None` if `from` has no entry.
    pub fn destinations(&self, from: &str) -> Option<&[String]> {
        self.edges.get(from).map(Vec::as_slice)
    }

    pub fn can_jump(&self, from: &str, to: &str) -> bool {
        self.destinations(from)
            .is_some_and(|targets| targets.iter().any(|t| t == to))
    }
}

/// Warp paths of the built-in galaxy.
pub fn default_warp_paths() -> BTreeMap<String, Vec<String>> {
    let paths: [(&str, &[&str]); 10] = [
        ("A01", &["C12", "D14", "N09", "F27"]),
        ("C12", &["A01", "D14", "G33"]),
        ("D14", &["A01", "C12", "C21", "E23"]),
        ("N09", &["A01", "E15", "E05"]),
        ("C21", &["D14"]),
        ("E15", &["N09"]),
        ("F27", &["A01"]),
        ("G33", &["C12"]),
        ("E23", &["D14"]),
        ("E05", &["N09"]),
    ];
    paths
        .iter()
        .map(|(from, to)| {
            (
                from.to_string(),
                to.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}
