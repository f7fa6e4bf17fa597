//! Station and city directory
//!
//! A static, in-memory list of named points searched by case-insensitive
//! substring match on name and region. The built-in list (Andhra Pradesh
//! monitoring stations followed by popular world cities) is compiled into the
//! binary; a replacement can be loaded from a JSON file with the same schema.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::models::Location;
use crate::{AqiError, Result};

const BUILTIN_DIRECTORY: &str = include_str!("../data/directory.json");

/// Searchable list of locations, kept in directory order
#[derive(Debug, Clone)]
pub struct Directory {
    entries: Vec<Location>,
}

/// Trim a raw query and reject it when nothing is left
pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AqiError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Entries whose name or region contains `query`, ignoring case.
///
/// Callers are expected to reject empty queries with [`validate_query`] first;
/// an empty query here simply matches everything.
#[must_use]
pub fn search(query: &str, directory: &[Location]) -> Vec<Location> {
    let needle = query.to_lowercase();
    directory
        .iter()
        .filter(|location| location.matches(&needle))
        .cloned()
        .collect()
}

impl Directory {
    /// The directory shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_DIRECTORY)
    }

    /// Build a directory from entries, rejecting unnamed or misplaced points
    pub fn from_entries(entries: Vec<Location>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AqiError::directory("directory has no entries"));
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(AqiError::directory(format!(
                    "entry {index} has an empty name"
                )));
            }
            if !entry.has_valid_coordinates() {
                return Err(AqiError::directory(format!(
                    "entry '{}' has invalid coordinates ({})",
                    entry.name,
                    entry.format_coordinates()
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a JSON array of `{ name, region, lat, lng }` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<Location> = serde_json::from_str(json)
            .map_err(|e| AqiError::directory(format!("invalid directory JSON: {e}")))?;
        Self::from_entries(entries)
    }

    /// Load a directory file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading location directory from {}", path.display());
        let json = fs::read_to_string(path)?;
        let directory = Self::from_json_str(&json)?;
        debug!("Loaded {} directory entries", directory.len());
        Ok(directory)
    }

    #[must_use]
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quick picks offered when there are no search results
    #[must_use]
    pub fn popular(&self, count: usize) -> &[Location] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Substring search over this directory
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Location> {
        search(query, &self.entries)
    }

    /// Exact, case-insensitive lookup by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Location> {
        self.entries
            .iter()
            .find(|location| location.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Location> {
        vec![
            Location::with_region("PWD Grounds, Vijayawada", "Andhra Pradesh", 16.5074, 80.6279),
            Location::with_region("Tirumala, Tirupati", "Andhra Pradesh", 13.6833, 79.3474),
            Location::with_region("Secretariat, Amaravati", "Andhra Pradesh", 16.5150, 80.5180),
            Location::with_region("Delhi", "India", 28.7041, 77.1025),
        ]
    }

    #[test]
    fn test_validate_query() {
        assert!(matches!(validate_query(""), Err(AqiError::EmptyQuery)));
        assert!(matches!(validate_query("   \t"), Err(AqiError::EmptyQuery)));
        assert_eq!(validate_query("  Delhi ").unwrap(), "Delhi");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let results = search("VIJAYAWADA", &sample());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "PWD Grounds, Vijayawada");
    }

    #[test]
    fn test_search_matches_region_and_keeps_order() {
        let results = search("andhra", &sample());
        let names: Vec<_> = results.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["PWD Grounds, Vijayawada", "Tirumala, Tirupati", "Secretariat, Amaravati"]
        );
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("atlantis", &sample()).is_empty());
    }

    #[test]
    fn test_builtin_directory_loads() {
        let directory = Directory::builtin().unwrap();
        assert!(directory.len() >= 10);
        assert!(directory.find("pwd grounds, vijayawada").is_some());
        assert!(directory.find("Sydney").is_some());
    }

    #[test]
    fn test_builtin_amaravati_search() {
        let directory = Directory::builtin().unwrap();
        let expected: Vec<_> = directory
            .entries()
            .iter()
            .filter(|l| l.name.to_lowercase().contains("amaravati"))
            .cloned()
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(directory.search("amaravati"), expected);
    }

    #[test]
    fn test_popular_is_bounded() {
        let directory = Directory::from_entries(sample()).unwrap();
        assert_eq!(directory.popular(2).len(), 2);
        assert_eq!(directory.popular(100).len(), 4);
    }

    #[test]
    fn test_rejects_bad_entries() {
        let err = Directory::from_entries(vec![Location::new(" ", 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, AqiError::Directory { .. }));

        let err = Directory::from_entries(vec![Location::new("Pole", 91.0, 0.0)]).unwrap_err();
        assert!(err.to_string().contains("invalid coordinates"));

        assert!(Directory::from_entries(Vec::new()).is_err());
        assert!(Directory::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stations.json");
        fs::write(
            &path,
            r#"[{"name":"Kurnool","region":"Andhra Pradesh","lat":15.8281,"lng":78.0373}]"#,
        )
        .unwrap();

        let directory = Directory::load(&path).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.entries()[0].name, "Kurnool");
    }
}
