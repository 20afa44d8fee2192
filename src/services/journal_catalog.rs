//! Offline journal ranking catalog
//!
//! One catalog file covers ONE catalog year; callers pick the file for
//! the year they want, there is no cross-year fallback here. Rows carry a
//! journal source identifier, a `Categories` cell of `name (Qx)` entries,
//! an optional best-quartile column and optional `IF`-prefixed impact
//! factor columns. Column positions are found from the header by name.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{JournalRanking, QuartileRanking};
use crate::services::csv::split_fields;

const SOURCE_ID_COLUMN: &str = "sourceid";
const CATEGORIES_COLUMN: &str = "categories";
const BEST_QUARTILE_COLUMN: &str = "sjr best quartile";
const IMPACT_FACTOR_PREFIX: &str = "if";

/// Matches one `subject name (Qx)` chunk; the quartile sits in the
/// trailing parentheses, so subject names may themselves contain
/// parenthesized qualifiers like `(miscellaneous)`.
static CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\(([^()]*)\)\s*$").unwrap());

/// Quality classes of the journals listed by one catalog year.
///
/// Source identifiers match case-insensitively; duplicate rows for the
/// same identifier keep the first row seen.
#[derive(Debug)]
pub struct JournalRankingCatalog {
    catalog_year: i32,
    entries: HashMap<String, JournalRanking>,
}

impl JournalRankingCatalog {
    fn normalize(source_id: &str) -> String {
        source_id.trim().to_ascii_lowercase()
    }

    /// Load a catalog from separator-delimited text. The first non-empty
    /// line must be a header naming at least the source identifier column
    /// and one quartile column.
    pub fn from_csv_reader(catalog_year: i32, reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(Error::Parse("empty journal catalog".to_string())),
            }
        };

        let columns: Vec<String> = split_fields(&header, ';')
            .iter()
            .map(|c| c.trim().to_ascii_lowercase())
            .collect();
        let find = |name: &str| columns.iter().position(|c| c == name);

        let source_col = find(SOURCE_ID_COLUMN).ok_or_else(|| {
            Error::Parse(format!("journal catalog header has no {SOURCE_ID_COLUMN:?} column"))
        })?;
        let categories_col = find(CATEGORIES_COLUMN);
        let best_col = find(BEST_QUARTILE_COLUMN);
        if categories_col.is_none() && best_col.is_none() {
            return Err(Error::Parse(
                "journal catalog header has no quartile column".to_string(),
            ));
        }
        let impact_col = columns
            .iter()
            .position(|c| c.starts_with(IMPACT_FACTOR_PREFIX));

        let mut entries: HashMap<String, JournalRanking> = HashMap::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&line, ';');
            let Some(source_id) = fields.get(source_col).map(|f| f.trim()) else {
                continue;
            };
            if source_id.is_empty() {
                continue;
            }

            let mut ranking = JournalRanking::default();
            if let Some(cell) = categories_col.and_then(|col| fields.get(col)) {
                for chunk in cell.split(';') {
                    let Some(caps) = CATEGORY_PATTERN.captures(chunk) else {
                        continue;
                    };
                    let subject = caps[1].trim().to_ascii_lowercase();
                    if subject.is_empty() {
                        continue;
                    }
                    // Unparsable quartile tokens drop that entry only.
                    if let Ok(quartile) = caps[2].parse::<QuartileRanking>() {
                        ranking.quartiles.entry(subject).or_insert(quartile);
                    }
                }
            }
            ranking.best_quartile = best_col
                .and_then(|col| fields.get(col))
                .and_then(|cell| cell.parse::<QuartileRanking>().ok())
                .or_else(|| ranking.quartiles.values().max().copied());
            ranking.impact_factor = impact_col
                .and_then(|col| fields.get(col))
                .and_then(|cell| parse_impact_factor(cell));

            entries.entry(Self::normalize(source_id)).or_insert(ranking);
        }

        debug!(
            catalog_year,
            journals = entries.len(),
            "Loaded journal ranking catalog"
        );
        Ok(JournalRankingCatalog { catalog_year, entries })
    }

    pub fn from_csv_file(catalog_year: i32, path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(catalog_year, BufReader::new(file))
    }

    /// The catalog year this file covers.
    pub fn catalog_year(&self) -> i32 {
        self.catalog_year
    }

    /// Full ranking record for a journal.
    pub fn ranking(&self, source_id: &str) -> Result<&JournalRanking> {
        self.entries
            .get(&Self::normalize(source_id))
            .ok_or_else(|| Error::NotFound(format!("unknown journal source id {source_id:?}")))
    }

    /// Quartile of a journal in one subject area (case-insensitive).
    pub fn quartile(&self, source_id: &str, subject: &str) -> Result<QuartileRanking> {
        let ranking = self.ranking(source_id)?;
        ranking
            .quartiles
            .get(&subject.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "journal {source_id:?} has no quartile for subject {subject:?}"
                ))
            })
    }

    /// Best quartile across subject areas (the synthetic pseudo-subject).
    pub fn best_quartile(&self, source_id: &str) -> Result<QuartileRanking> {
        let ranking = self.ranking(source_id)?;
        ranking.best_quartile.ok_or_else(|| {
            Error::NotFound(format!("journal {source_id:?} has no quartile data"))
        })
    }

    /// Impact factor when the catalog carries one for this journal.
    pub fn impact_factor(&self, source_id: &str) -> Result<Option<f64>> {
        Ok(self.ranking(source_id)?.impact_factor)
    }

    /// Number of distinct journals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lenient numeric parse: accepts a comma decimal separator, rejects
/// negatives and non-numbers.
fn parse_impact_factor(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
