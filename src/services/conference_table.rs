//! Offline conference ranking table
//!
//! Preloaded `identifier → year → rank` records with the same fallback
//! rule as the online portal: the rank for a target year is the most
//! recent recorded rank not newer than that year. Tables load from
//! semicolon-separated files (`acronym;year;rank`, `#` starts a comment).

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::CoreRanking;
use crate::services::csv::split_fields;

/// In-memory conference ranking records.
///
/// Identifiers match case-insensitively. Duplicate (identifier, year)
/// rows keep the first value seen, matching the online resolver's
/// first-parsed-wins tie-break.
#[derive(Debug, Default)]
pub struct ConferenceRankingTable {
    rankings: HashMap<String, BTreeMap<i32, CoreRanking>>,
}

impl ConferenceRankingTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(identifier: &str) -> String {
        identifier.trim().to_ascii_uppercase()
    }

    /// Record a ranking. Returns false when the (identifier, year) pair
    /// was already present; the earlier value stays.
    pub fn insert(&mut self, identifier: &str, year: i32, ranking: CoreRanking) -> bool {
        let years = self.rankings.entry(Self::normalize(identifier)).or_default();
        match years.entry(year) {
            Entry::Vacant(slot) => {
                slot.insert(ranking);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Load a table from `acronym;year;rank` lines. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_csv_reader(reader: impl BufRead) -> Result<Self> {
        let mut table = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields = split_fields(trimmed, ';');
            if fields.len() < 3 {
                return Err(Error::Parse(format!(
                    "line {line_no}: expected acronym;year;rank, got {trimmed:?}"
                )));
            }
            let identifier = fields[0].trim();
            if identifier.is_empty() {
                return Err(Error::Parse(format!("line {line_no}: empty acronym")));
            }
            let year: i32 = fields[1].trim().parse().map_err(|_| {
                Error::Parse(format!("line {line_no}: bad year {:?}", fields[1].trim()))
            })?;
            let ranking: CoreRanking = fields[2].trim().parse().map_err(|_| {
                Error::InvalidInput(format!(
                    "line {line_no}: unknown rank token {:?}",
                    fields[2].trim()
                ))
            })?;
            table.insert(identifier, year, ranking);
        }
        debug!(conferences = table.len(), "Loaded conference ranking table");
        Ok(table)
    }

    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Rank for `target_year`: the value recorded at the largest year that
    /// is ≤ the target. Fails with `NotFound` when the identifier is
    /// unknown or every recorded year is newer than the target.
    pub fn ranking_for(&self, identifier: &str, target_year: i32) -> Result<CoreRanking> {
        let key = Self::normalize(identifier);
        let years = self
            .rankings
            .get(&key)
            .ok_or_else(|| Error::NotFound(format!("no ranking records for {identifier:?}")))?;
        years
            .range(..=target_year)
            .next_back()
            .map(|(_, ranking)| *ranking)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "no ranking for {identifier:?} at or before {target_year}"
                ))
            })
    }

    /// Number of distinct conference identifiers.
    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> ConferenceRankingTable {
        let mut table = ConferenceRankingTable::new();
        table.insert("ICSE", 2018, CoreRanking::B);
        table.insert("ICSE", 2020, CoreRanking::A);
        table
    }

    #[test]
    fn test_fallback_picks_most_recent_not_newer() {
        let table = sample();
        assert_eq!(table.ranking_for("ICSE", 2021).unwrap(), CoreRanking::A);
        assert_eq!(table.ranking_for("ICSE", 2020).unwrap(), CoreRanking::A);
        assert_eq!(table.ranking_for("ICSE", 2019).unwrap(), CoreRanking::B);
    }

    #[test]
    fn test_no_year_at_or_before_target_is_not_found() {
        let table = sample();
        assert!(matches!(
            table.ranking_for("ICSE", 2017),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_identifier_is_not_found() {
        let table = sample();
        assert!(matches!(
            table.ranking_for("NOPE", 2020),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_identifier_match_is_case_insensitive() {
        let table = sample();
        assert_eq!(table.ranking_for("icse", 2020).unwrap(), CoreRanking::A);
    }

    #[test]
    fn test_duplicate_year_keeps_first_value() {
        let mut table = sample();
        assert!(!table.insert("icse", 2020, CoreRanking::C));
        assert_eq!(table.ranking_for("ICSE", 2020).unwrap(), CoreRanking::A);
    }

    #[test]
    fn test_csv_load_skips_comments_and_blanks() {
        let text = "# CORE extract\n\nICSE;2018;B\nICSE;2020;A\nVLDB;2020;A*\n";
        let table = ConferenceRankingTable::from_csv_reader(Cursor::new(text)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.ranking_for("VLDB", 2023).unwrap(), CoreRanking::AStar);
    }

    #[test]
    fn test_csv_bad_year_is_parse_error() {
        let text = "ICSE;twenty;B\n";
        assert!(matches!(
            ConferenceRankingTable::from_csv_reader(Cursor::new(text)),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_csv_bad_rank_token_is_invalid_input() {
        let text = "ICSE;2020;A+++\n";
        assert!(matches!(
            ConferenceRankingTable::from_csv_reader(Cursor::new(text)),
            Err(Error::InvalidInput(_))
        ));
    }
}
