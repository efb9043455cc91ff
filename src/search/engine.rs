//! Search Engine Integration
//!
//! Ties together specialty detection, filtering, scoring and pagination
//! into the ranked doctor search.

use super::advisory::{build_note, ResponseLanguage};
use super::conditions::detect_specialties;
use super::filter::SearchFilters;
use super::normalize::normalize;
use super::ranking::{score_doctor, sort_by_score, ScoredDoctor, ScoringContext, ScoringWeights};
use super::response::{Analysis, DoctorCard, SearchResponse};
use crate::catalog::{Catalog, DoctorRecord};
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_LIMIT: i64 = 20;

/// One search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Disease, symptom, specialty or doctor name
    pub query: String,
    pub filters: SearchFilters,
    /// Page size; zero or negative yields an empty page
    pub limit: i64,
    /// Page start; negative is treated as zero
    pub offset: i64,
    pub response_language: ResponseLanguage,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: SearchFilters::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            response_language: ResponseLanguage::default(),
        }
    }
}

/// Ranked doctor search over a shared read-only catalog
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    scoring_weights: ScoringWeights,
}

impl SearchEngine {
    /// Create a new search engine with the default weights
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_weights(catalog, ScoringWeights::default())
    }

    /// Create search engine with custom weights
    pub fn with_weights(catalog: Arc<Catalog>, weights: ScoringWeights) -> Self {
        Self {
            catalog,
            scoring_weights: weights,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one search
    ///
    /// 1. Detect specialties from the query.
    /// 2. Pool: doctors passing the filters if any filter was supplied,
    ///    otherwise every doctor.
    /// 3. Relevance gate (see `passes_relevance_gate`).
    /// 4. Score, then stable sort highest first.
    /// 5. Slice `[offset, offset + limit)` and build display rows.
    pub fn search(&self, request: &SearchQuery) -> SearchResponse {
        let specialties = detect_specialties(
            &request.query,
            self.catalog.specialty_labels(),
            self.catalog.mapping(),
        );
        debug!("Detected specialties for '{}': {:?}", request.query, specialties);

        let pool = self.candidate_pool(&request.filters);
        let pool_size = pool.len();

        let normalized_query = normalize(&request.query);
        let ctx = ScoringContext::new(&specialties, &request.query, &request.filters);

        let mut scored: Vec<ScoredDoctor<'_>> = pool
            .into_iter()
            .filter(|doctor| passes_relevance_gate(doctor, &specialties, &normalized_query))
            .map(|doctor| ScoredDoctor {
                doctor,
                score: score_doctor(doctor, &ctx, &self.scoring_weights),
            })
            .collect();

        sort_by_score(&mut scored);

        let page = page_range(scored.len(), request.limit, request.offset);
        debug!(
            "Pool {} -> {} relevant, returning {:?}",
            pool_size,
            scored.len(),
            page
        );

        let doctors = scored[page].iter().map(DoctorCard::from_scored).collect();
        let triage_note = build_note(request.response_language, &request.query, &specialties);

        SearchResponse {
            analysis: Analysis {
                specialties,
                triage_note,
            },
            doctors,
        }
    }

    fn candidate_pool(&self, filters: &SearchFilters) -> Vec<&DoctorRecord> {
        let doctors = self.catalog.doctors();
        if filters.is_active() {
            doctors.iter().filter(|d| filters.matches(d)).collect()
        } else {
            doctors.iter().collect()
        }
    }
}

/// Keep a doctor when no specialty was detected, when it has one of the
/// detected specialties, or when the query is part of its full name
fn passes_relevance_gate(
    doctor: &DoctorRecord,
    specialties: &[String],
    normalized_query: &str,
) -> bool {
    specialties.is_empty()
        || doctor.has_any_specialty(specialties)
        || normalize(&doctor.full_name).contains(normalized_query)
}

/// Half-open page window over `len` sorted results
pub fn page_range(len: usize, limit: i64, offset: i64) -> Range<usize> {
    if limit <= 0 {
        return 0..0;
    }
    let start = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    if start >= len {
        return 0..0;
    }
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    start..start.saturating_add(limit).min(len)
}
