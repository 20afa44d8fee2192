//! Indicator orchestration facade
//!
//! Computes indicator tables for an organization, serves the visible
//! indicators from the cache record (computing and stamping misses), and
//! round-trips cache refresh/reset through the repository.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::IndicatorCacheRecord;
use crate::error::{Error, Result};
use crate::indicators::{all_indicators, AnnualIndicator};
use crate::models::Organization;
use crate::repository::EntityRepository;

/// One computed indicator: its identity, year series and merged scalar.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub key: String,
    pub label: String,
    pub values: BTreeMap<i32, f64>,
    pub merged: Option<f64>,
}

/// Registry of indicators plus the operations callers compose them with.
pub struct IndicatorService {
    indicators: Vec<Box<dyn AnnualIndicator>>,
}

impl IndicatorService {
    /// Service over the built-in indicator registry.
    pub fn new() -> Self {
        Self::with_indicators(all_indicators())
    }

    /// Service over a custom registry (order is display order).
    pub fn with_indicators(indicators: Vec<Box<dyn AnnualIndicator>>) -> Self {
        IndicatorService { indicators }
    }

    pub fn indicators(&self) -> &[Box<dyn AnnualIndicator>] {
        &self.indicators
    }

    /// Look an indicator up by key.
    pub fn indicator(&self, key: &str) -> Option<&dyn AnnualIndicator> {
        self.indicators
            .iter()
            .find(|indicator| indicator.key() == key)
            .map(|boxed| boxed.as_ref())
    }

    /// Compute every registered indicator over the year range, in
    /// registry order.
    pub fn indicator_table(
        &self,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
        locale: &str,
    ) -> Vec<IndicatorSeries> {
        info!(
            organization = %organization.acronym,
            start_year,
            end_year,
            indicators = self.indicators.len(),
            "Computing indicator table"
        );
        self.indicators
            .iter()
            .map(|indicator| {
                let values = indicator.values_per_year(organization, start_year, end_year);
                let merged = (indicator.merge())(&values);
                debug!(key = indicator.key(), years = values.len(), "Indicator computed");
                IndicatorSeries {
                    key: indicator.key().to_string(),
                    label: indicator.label(locale),
                    values,
                    merged,
                }
            })
            .collect()
    }

    /// Values for the cache record's visible keys, in the record's order.
    ///
    /// Cached values are served as-is; misses are computed over the given
    /// range, stored in the record (stamping its date if absent) and
    /// returned. Keys naming no registered indicator are skipped. A key
    /// whose indicator has no data yields `None` and is not cached.
    pub fn visible_indicator_values(
        &self,
        record: &mut IndicatorCacheRecord,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<(String, Option<f64>)>> {
        let keys: Vec<String> = record.visible_key_list().to_vec();
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = record.cached_value(&key) {
                out.push((key, Some(value)));
                continue;
            }
            let Some(indicator) = self.indicator(&key) else {
                warn!(key = %key, "Unknown visible indicator key, skipping");
                continue;
            };
            let merged = indicator.merged_value(organization, start_year, end_year);
            if let Some(value) = merged {
                record.set_cached_value(&key, value)?;
            }
            out.push((key, merged));
        }
        Ok(out)
    }

    /// Recompute every registered indicator and replace the cache record's
    /// content, saving the record back through the repository.
    pub fn refresh_cache<R>(
        &self,
        repository: &R,
        cache_id: Uuid,
        organization: &Organization,
        start_year: i32,
        end_year: i32,
    ) -> Result<IndicatorCacheRecord>
    where
        R: EntityRepository<IndicatorCacheRecord>,
    {
        let mut record = self.load_record(repository, cache_id)?;
        record.reset_cached_values();
        for indicator in &self.indicators {
            if let Some(value) = indicator.merged_value(organization, start_year, end_year) {
                record.set_cached_value(indicator.key(), value)?;
            }
        }
        repository.save(&record)?;
        info!(cache_id = %cache_id, "Indicator cache refreshed");
        Ok(record)
    }

    /// Reset the cache record and save it back through the repository.
    pub fn reset_cache<R>(&self, repository: &R, cache_id: Uuid) -> Result<IndicatorCacheRecord>
    where
        R: EntityRepository<IndicatorCacheRecord>,
    {
        let mut record = self.load_record(repository, cache_id)?;
        record.reset_cached_values();
        repository.save(&record)?;
        info!(cache_id = %cache_id, "Indicator cache reset");
        Ok(record)
    }

    fn load_record<R>(&self, repository: &R, cache_id: Uuid) -> Result<IndicatorCacheRecord>
    where
        R: EntityRepository<IndicatorCacheRecord>,
    {
        repository
            .find_by_id(cache_id)?
            .ok_or_else(|| Error::NotFound(format!("no indicator cache record {cache_id}")))
    }
}

impl Default for IndicatorService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberStatus, Membership, Project, ProjectCategory};
    use crate::repository::InMemoryRepository;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_org() -> Organization {
        let mut org = Organization::new("LAB", "Lab");
        let mut m = Membership::new(Uuid::new_v4(), org.id, MemberStatus::ResearchDirector);
        m.since = Some(date(2019, 1, 1));
        m.set_permanent_position(true);
        org.memberships.push(m);
        org.projects.push(Project::new(
            "ANR",
            ProjectCategory::CompetitiveCall,
            date(2020, 2, 1),
            36,
            150.0,
        ));
        org
    }

    #[test]
    fn test_table_covers_registry_in_order() {
        let service = IndicatorService::new();
        let table = service.indicator_table(&sample_org(), 2020, 2021, "en");
        let keys: Vec<&str> = table.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "permanent_researcher_fte",
                "phd_student_fte",
                "postdoc_fte",
                "total_project_budget",
                "not_academic_project_budget",
                "academic_project_count",
            ]
        );

        let budget = &table[3];
        assert_eq!(budget.values.get(&2020), Some(&150.0));
        assert_eq!(budget.merged, Some(150.0));
    }

    #[test]
    fn test_visible_values_compute_then_serve_from_cache() {
        let service = IndicatorService::new();
        let mut org = sample_org();
        let mut record = IndicatorCacheRecord::new();
        record.set_visible_keys(Some("total_project_budget, permanent_researcher_fte".into()));

        let first = service
            .visible_indicator_values(&mut record, &org, 2020, 2021)
            .unwrap();
        assert_eq!(first[0], ("total_project_budget".to_string(), Some(150.0)));
        assert!(record.cache_date().is_some());

        // The cache answers even after the underlying data changes.
        org.projects.clear();
        let second = service
            .visible_indicator_values(&mut record, &org, 2020, 2021)
            .unwrap();
        assert_eq!(second[0], ("total_project_budget".to_string(), Some(150.0)));
    }

    #[test]
    fn test_visible_values_skip_unknown_keys() {
        let service = IndicatorService::new();
        let mut record = IndicatorCacheRecord::new();
        record.set_visible_keys(Some("bogus_key/total_project_budget".into()));

        let values = service
            .visible_indicator_values(&mut record, &sample_org(), 2020, 2020)
            .unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].0, "total_project_budget");
    }

    #[test]
    fn test_indicator_without_data_not_cached() {
        let service = IndicatorService::new();
        let mut record = IndicatorCacheRecord::new();
        record.set_visible_keys(Some("phd_student_fte".into()));

        let values = service
            .visible_indicator_values(&mut record, &sample_org(), 2020, 2020)
            .unwrap();
        assert_eq!(values, vec![("phd_student_fte".to_string(), None)]);
        assert!(record.cache_date().is_none());
        assert!(record.cached_values().is_empty());
    }

    #[test]
    fn test_refresh_cache_round_trips_repository() {
        let service = IndicatorService::new();
        let repo = InMemoryRepository::new();
        let record = IndicatorCacheRecord::new();
        let cache_id = record.id;
        repo.save(&record).unwrap();

        service
            .refresh_cache(&repo, cache_id, &sample_org(), 2019, 2021)
            .unwrap();

        let mut stored = repo.find_by_id(cache_id).unwrap().unwrap();
        assert_eq!(stored.cached_value("total_project_budget"), Some(150.0));
        assert_eq!(stored.cached_value("permanent_researcher_fte"), Some(1.0));
        assert_eq!(stored.cached_value("phd_student_fte"), None);
    }

    #[test]
    fn test_reset_cache_round_trips_repository() {
        let service = IndicatorService::new();
        let repo = InMemoryRepository::new();
        let record = IndicatorCacheRecord::new();
        let cache_id = record.id;
        repo.save(&record).unwrap();
        service
            .refresh_cache(&repo, cache_id, &sample_org(), 2019, 2021)
            .unwrap();

        service.reset_cache(&repo, cache_id).unwrap();
        let mut stored = repo.find_by_id(cache_id).unwrap().unwrap();
        assert!(stored.cached_values().is_empty());
        assert!(stored.cache_date().is_none());
    }

    #[test]
    fn test_unknown_cache_record_is_not_found() {
        let service = IndicatorService::new();
        let repo: InMemoryRepository<IndicatorCacheRecord> = InMemoryRepository::new();
        assert!(matches!(
            service.reset_cache(&repo, Uuid::new_v4()),
            Err(Error::NotFound(_))
        ));
    }
}
