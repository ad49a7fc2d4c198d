use crate::error::Result;
use crate::lineage::algebra;
use crate::types::KinshipReport;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Kinship analyzer that assembles full relationship reports from the
/// path algebra and a caller-supplied spouse-link table
#[derive(Debug, Default)]
pub struct KinshipAnalyzer {
    spouse_links: HashMap<String, String>,
}

impl KinshipAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with an injected affinity table
    pub fn with_spouse_links(spouse_links: HashMap<String, String>) -> Self {
        Self { spouse_links }
    }

    /// Analyze one identifier pair into a full report
    pub fn analyze_pair(&self, id1: &str, id2: &str) -> Result<KinshipReport> {
        debug!("Analyzing identifier pair {} / {}", id1, id2);

        let depth1 = algebra::generation_depth(id1)?;
        let depth2 = algebra::generation_depth(id2)?;
        let ancestor = algebra::common_ancestor(id1, id2)?;
        let distance = algebra::relationship_distance(id1, id2)?;
        let relationship = algebra::classify(id1, id2)?;

        Ok(KinshipReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            id1: id1.to_string(),
            id2: id2.to_string(),
            depth1,
            depth2,
            common_ancestor: ancestor.path().map(|path| path.to_string()),
            distance,
            relationship,
        })
    }

    /// Analyze a batch of identifier pairs, one report each. The first
    /// invalid identifier aborts the batch with its parse error.
    pub fn analyze_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<KinshipReport>> {
        let reports = pairs
            .iter()
            .map(|(id1, id2)| self.analyze_pair(id1, id2))
            .collect::<Result<Vec<_>>>()?;

        info!("Analyzed {} identifier pairs", reports.len());
        Ok(reports)
    }

    /// Spouse of `identifier` from the affinity table, if one is mapped
    pub fn spouse_of(&self, identifier: &str) -> Option<&str> {
        algebra::affinity_link(identifier, &self.spouse_links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Relationship;

    fn analyzer_with_links() -> KinshipAnalyzer {
        let mut spouse_links = HashMap::new();
        spouse_links.insert("1-1-4-6".to_string(), "1-1-5-3".to_string());
        KinshipAnalyzer::with_spouse_links(spouse_links)
    }

    #[test]
    fn test_analyze_pair() {
        let analyzer = KinshipAnalyzer::new();
        let report = analyzer.analyze_pair("1-1-4-6", "1-1-5-3").unwrap();

        assert_eq!(report.depth1, 4);
        assert_eq!(report.depth2, 4);
        assert_eq!(report.common_ancestor.as_deref(), Some("1-1"));
        assert_eq!(report.distance, 4);
        assert_eq!(
            report.relationship,
            Relationship::Cousin {
                level: 2,
                removal: 0
            }
        );
        assert!(report.is_related());
    }

    #[test]
    fn test_analyze_pair_disjoint() {
        let analyzer = KinshipAnalyzer::new();
        let report = analyzer.analyze_pair("1-2", "2-2").unwrap();

        assert!(report.common_ancestor.is_none());
        assert!(!report.is_related());
        assert_eq!(report.distance, 4);
    }

    #[test]
    fn test_analyze_pair_invalid_id() {
        let analyzer = KinshipAnalyzer::new();
        assert!(analyzer.analyze_pair("1--4", "1-1").is_err());
    }

    #[test]
    fn test_analyze_pairs_batch() {
        let analyzer = KinshipAnalyzer::new();
        let pairs = vec![
            ("1-1-4-6".to_string(), "1-1-5-3".to_string()),
            ("1-1-4-6".to_string(), "1-3-1-7".to_string()),
        ];

        let reports = analyzer.analyze_pairs(&pairs).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].classification(), "2nd cousin");
        assert_eq!(reports[1].classification(), "3rd cousin");
    }

    #[test]
    fn test_spouse_lookup() {
        let analyzer = analyzer_with_links();
        assert_eq!(analyzer.spouse_of("1-1-4-6"), Some("1-1-5-3"));
        assert_eq!(analyzer.spouse_of("1-3-1-7"), None);
    }
}
