//! Catalog source — supplies the full list of postings to the matcher.
//!
//! `AppState` holds an `Arc<dyn CatalogSource>`. The default backend is a JSON
//! file read once at startup; anything that can list postings can replace it.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::posting::CandidateRecord;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every posting, in catalog order. No paging or filtering.
    async fn list_postings(&self) -> Result<Arc<Vec<CandidateRecord>>, AppError>;
}

/// Postings held in memory, loaded from a JSON array on disk.
#[derive(Debug, Clone, Default)]
pub struct JsonFileCatalog {
    postings: Arc<Vec<CandidateRecord>>,
}

impl JsonFileCatalog {
    pub fn from_postings(postings: Vec<CandidateRecord>) -> Self {
        Self {
            postings: Arc::new(postings),
        }
    }

    /// Loads the catalog. A missing file gives an empty catalog; unreadable or
    /// malformed JSON is an error.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            warn!("Catalog file {} not found; starting with an empty catalog", path.display());
            return Ok(Self::default());
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;
        let postings: Vec<CandidateRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file '{}' is not a JSON array of postings", path.display()))?;

        info!("Loaded {} postings from {}", postings.len(), path.display());
        Ok(Self::from_postings(postings))
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn list_postings(&self) -> Result<Arc<Vec<CandidateRecord>>, AppError> {
        Ok(Arc::clone(&self.postings))
    }
}

/// Aggregate figures over the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_internships: usize,
    /// Rounded to one decimal place.
    pub avg_rating: f64,
    pub total_stipend: f64,
}

impl CatalogStats {
    pub fn from_postings(postings: &[CandidateRecord]) -> Self {
        let total = postings.len();
        if total == 0 {
            return Self {
                total_internships: 0,
                avg_rating: 0.0,
                total_stipend: 0.0,
            };
        }

        let rating_sum: f64 = postings.iter().map(|p| p.rating).sum();
        let avg_rating = ((rating_sum / total as f64) * 10.0).round() / 10.0;

        Self {
            total_internships: total,
            avg_rating,
            total_stipend: postings.iter().map(|p| p.stipend).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn posting(rating: f64, stipend: f64) -> CandidateRecord {
        CandidateRecord {
            title: "Software Engineering Intern".to_string(),
            rating,
            stipend,
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_empty_catalog() {
        let stats = CatalogStats::from_postings(&[]);
        assert_eq!(stats.total_internships, 0);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.total_stipend, 0.0);
    }

    #[test]
    fn test_stats_rounds_average_rating() {
        let stats = CatalogStats::from_postings(&[
            posting(4.0, 5000.0),
            posting(4.5, 10000.0),
            posting(3.9, 0.0),
        ]);
        assert_eq!(stats.total_internships, 3);
        // (4.0 + 4.5 + 3.9) / 3 = 4.1333
        assert_eq!(stats.avg_rating, 4.1);
        assert_eq!(stats.total_stipend, 15000.0);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonFileCatalog::load(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(catalog.list_postings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_reads_postings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Data Analyst Intern", "required_skills": "sql, excel", "popularity": 71, "rating": 4.3, "company_prestige": 6, "stipend": 12000}},
                {{"title": "AI Research Intern", "popularity": "88"}}
            ]"#
        )
        .unwrap();

        let catalog = JsonFileCatalog::load(file.path()).await.unwrap();
        let postings = catalog.list_postings().await.unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].required_skills, "sql, excel");
        assert_eq!(postings[1].popularity, 88.0);
        assert_eq!(postings[1].stipend, 0.0);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "not an array"}}"#).unwrap();
        assert!(JsonFileCatalog::load(file.path()).await.is_err());
    }
}
