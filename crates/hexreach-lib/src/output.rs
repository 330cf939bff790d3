use std::fmt::Write;

use serde::Serialize;

use crate::search::DistanceMap;

/// Hex reached by a distance calculation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceEntry {
    pub label: String,
    pub distance: u32,
}

/// Structured result of a distance calculation that front-ends can
/// serialise or render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistanceReport {
    pub source: String,
    pub max_distance: u32,
    /// Reached hexes, nearest first, ties ordered by label.
    pub reachable: Vec<DistanceEntry>,
}

impl DistanceReport {
    pub fn from_distances(source: &str, max_distance: u32, distances: &DistanceMap) -> Self {
        let mut reachable: Vec<DistanceEntry> = distances
            .iter()
            .map(|(label, distance)| DistanceEntry {
                label: label.clone(),
                distance: *distance,
            })
            .collect();
        reachable.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.label.cmp(&b.label))
        });

        Self {
            source: source.to_string(),
            max_distance,
            reachable,
        }
    }

    /// Labels grouped by distance, nearest first.
    pub fn rings(&self) -> Vec<(u32, Vec<&str>)> {
        let mut rings: Vec<(u32, Vec<&str>)> = Vec::new();
        for entry in &self.reachable {
            match rings.last_mut() {
                Some((distance, labels)) if *distance == entry.distance => {
                    labels.push(&entry.label)
                }
                _ => rings.push((entry.distance, vec![&entry.label])),
            }
        }
        rings
    }

    /// Plain-text rendering with one line per distance.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Distances from {} (max {}):",
            self.source, self.max_distance
        );
        if self.reachable.is_empty() {
            let _ = writeln!(buffer, "  (no hexes reached)");
            return buffer;
        }
        for (distance, labels) in self.rings() {
            let _ = writeln!(buffer, "  {}: {}", distance, labels.join(", "));
        }
        buffer
    }
}
