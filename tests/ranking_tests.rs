//! Ranking resolution tests
//!
//! Closest-prior-year fallback for conference ranks, the journal quartile
//! catalog, and the portal page scan on canned HTML. No network anywhere:
//! the online client's parsing is exercised through the public scan
//! functions.

use std::io::Write;

use labmetrics::models::{CoreRanking, QuartileRanking};
use labmetrics::services::{
    best_ranking, scan_ranked_blocks, ConferenceRankingTable, JournalRankingCatalog,
};
use labmetrics::Error;

// =============================================================================
// Conference ranking fallback
// =============================================================================

fn sample_table() -> ConferenceRankingTable {
    let mut table = ConferenceRankingTable::new();
    table.insert("ICSE", 2018, CoreRanking::B);
    table.insert("ICSE", 2020, CoreRanking::A);
    table
}

#[test]
fn test_fallback_returns_most_recent_rank_not_newer_than_target() {
    let table = sample_table();
    assert_eq!(table.ranking_for("ICSE", 2021).unwrap(), CoreRanking::A);
    assert_eq!(table.ranking_for("ICSE", 2019).unwrap(), CoreRanking::B);
}

#[test]
fn test_fallback_fails_when_all_records_are_newer() {
    let err = sample_table().ranking_for("ICSE", 2017).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn test_unknown_conference_fails_with_not_found() {
    let err = sample_table().ranking_for("UNLISTED", 2020).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_table_loads_from_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# CORE extract, semicolon separated").unwrap();
    writeln!(file, "ICSE;2018;B").unwrap();
    writeln!(file, "ICSE;2020;A").unwrap();
    writeln!(file, "MIDDLEWARE;2020;a*").unwrap();
    file.flush().unwrap();

    let table = ConferenceRankingTable::from_csv_file(file.path()).unwrap();
    assert_eq!(table.ranking_for("icse", 2022).unwrap(), CoreRanking::A);
    assert_eq!(
        table.ranking_for("MIDDLEWARE", 2020).unwrap(),
        CoreRanking::AStar
    );
}

#[test]
fn test_malformed_rank_token_is_invalid_input() {
    assert!(matches!(
        "A+++".parse::<CoreRanking>(),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        "Q7".parse::<QuartileRanking>(),
        Err(Error::InvalidInput(_))
    ));
}

// =============================================================================
// Portal page scanning
// =============================================================================

const PORTAL_PAGE: &str = r#"
<html><body>
  <div class="row result">
    <div>Title: Intl Conference on Software Engineering</div>
    <div>Source: CORE2020</div>
    <div>Rank: A</div>
  </div>
  <div class="row result">
    <div>Source: CORE2018</div>
    <div>Rank: B</div>
  </div>
  <div class="row result">
    <div>Source: CORE2008</div>
    <div>Rank: unknown</div>
  </div>
</body></html>
"#;

#[test]
fn test_scan_extracts_year_rank_pairs_in_document_order() {
    let blocks = scan_ranked_blocks(PORTAL_PAGE);
    assert_eq!(blocks, vec![(2020, CoreRanking::A), (2018, CoreRanking::B)]);
}

#[test]
fn test_scan_then_select_applies_prior_year_fallback() {
    let blocks = scan_ranked_blocks(PORTAL_PAGE);
    assert_eq!(best_ranking(&blocks, 2021), Some((2020, CoreRanking::A)));
    assert_eq!(best_ranking(&blocks, 2019), Some((2018, CoreRanking::B)));
    assert_eq!(best_ranking(&blocks, 2017), None);
}

#[test]
fn test_scan_of_resultless_page_finds_nothing() {
    let blocks = scan_ranked_blocks("<html><body><p>No results found.</p></body></html>");
    assert!(blocks.is_empty());
}

#[test]
fn test_equal_year_blocks_resolve_to_first_parsed() {
    let page = r#"
      <div>Source: CORE2020</div><div>Rank: B</div>
      <div>Source: CORE2020</div><div>Rank: C</div>
    "#;
    let blocks = scan_ranked_blocks(page);
    assert_eq!(best_ranking(&blocks, 2020), Some((2020, CoreRanking::B)));
}

// =============================================================================
// Journal quartile catalog
// =============================================================================

const JOURNAL_CATALOG: &str = "\
Rank;Sourceid;Title;Categories;SJR Best Quartile;IF (2021)
1;24810;Engineering Letters;\"Artificial Intelligence (Q1); Software (Q2)\";Q1;3,417
2;19700;Control Review;\"Control and Systems Engineering (Q3)\";;0.98
3;31337;Skipped Entries Journal;\"Broken (Q9); Robotics (Q2)\";;
";

fn catalog() -> JournalRankingCatalog {
    JournalRankingCatalog::from_csv_reader(2021, std::io::Cursor::new(JOURNAL_CATALOG)).unwrap()
}

#[test]
fn test_quartile_lookup_per_subject_area() {
    let cat = catalog();
    assert_eq!(
        cat.quartile("24810", "artificial intelligence").unwrap(),
        QuartileRanking::Q1
    );
    assert_eq!(cat.quartile("24810", "Software").unwrap(), QuartileRanking::Q2);
}

#[test]
fn test_best_quartile_prefers_catalog_column() {
    assert_eq!(catalog().best_quartile("24810").unwrap(), QuartileRanking::Q1);
}

#[test]
fn test_best_quartile_computed_across_subjects_when_column_empty() {
    assert_eq!(catalog().best_quartile("19700").unwrap(), QuartileRanking::Q3);
    // Unparsable tokens are dropped per entry, the rest still count.
    assert_eq!(catalog().best_quartile("31337").unwrap(), QuartileRanking::Q2);
}

#[test]
fn test_impact_factor_parses_both_decimal_separators() {
    let cat = catalog();
    assert_eq!(cat.impact_factor("24810").unwrap(), Some(3.417));
    assert_eq!(cat.impact_factor("19700").unwrap(), Some(0.98));
    assert_eq!(cat.impact_factor("31337").unwrap(), None);
}

#[test]
fn test_unknown_journal_fails_with_not_found() {
    assert!(matches!(
        catalog().best_quartile("99999"),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_catalog_requires_source_and_quartile_columns() {
    let missing_source = "Title;Categories\nX;\"AI (Q1)\"\n";
    assert!(matches!(
        JournalRankingCatalog::from_csv_reader(2021, std::io::Cursor::new(missing_source)),
        Err(Error::Parse(_))
    ));

    let missing_quartiles = "Sourceid;Title\n1;X\n";
    assert!(matches!(
        JournalRankingCatalog::from_csv_reader(2021, std::io::Cursor::new(missing_quartiles)),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_catalog_loads_from_file_for_one_year() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{JOURNAL_CATALOG}").unwrap();
    file.flush().unwrap();

    let cat = JournalRankingCatalog::from_csv_file(2021, file.path()).unwrap();
    assert_eq!(cat.catalog_year(), 2021);
    assert_eq!(cat.len(), 3);
}
