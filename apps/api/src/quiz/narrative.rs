//! Narrative tables per quiz domain.
//!
//! Every sentence a report can contain lives here as data keyed by level or
//! tag. Adding a domain means adding a table set, not a code path.

use std::collections::BTreeMap;

use crate::engine::scoring::Level;

/// One value per level band.
#[derive(Debug, Clone)]
pub struct PerLevel<T> {
    pub baixo: T,
    pub moderado: T,
    pub alto: T,
    pub muito_alto: T,
}

impl<T> PerLevel<T> {
    pub fn get(&self, level: Level) -> &T {
        match level {
            Level::Baixo => &self.baixo,
            Level::Moderado => &self.moderado,
            Level::Alto => &self.alto,
            Level::MuitoAlto => &self.muito_alto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Narrative {
    /// Executive summary sentence per level.
    pub summaries: PerLevel<String>,
    /// Exactly three recommendations per level.
    pub recommendations: PerLevel<Vec<String>>,
    /// Generic cold-reading statements, always included.
    pub cold_reading: Vec<String>,
    /// Extra cold-reading statement keyed by the single top-ranked tag.
    pub cold_reading_by_tag: BTreeMap<String, String>,
    /// Human-readable category name per tag.
    pub tag_labels: BTreeMap<String, String>,
    /// Action-plan tips per tag.
    pub tag_tips: BTreeMap<String, Vec<String>>,
}

impl Narrative {
    pub fn summary(&self, level: Level) -> &str {
        self.summaries.get(level)
    }

    pub fn recommendations(&self, level: Level) -> &[String] {
        self.recommendations.get(level)
    }

    pub fn cold_reading_for_tag(&self, tag: &str) -> Option<&str> {
        self.cold_reading_by_tag.get(tag).map(String::as_str)
    }

    pub fn tips_for_tag(&self, tag: &str) -> &[String] {
        self.tag_tips.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }
}
