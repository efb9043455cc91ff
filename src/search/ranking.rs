//! Ranking & Scoring System
//!
//! A doctor's score is an additive sum over a fixed, ordered list of signals.
//! There is no normalization: only the relative order within one request
//! matters.
//!
//! | Order | Signal           | Contribution (default weight)                       |
//! |-------|------------------|-----------------------------------------------------|
//! | 1     | SpecialtyOverlap | 1.0 per doctor specialty found in the detected set  |
//! | 2     | NameMatch        | 0.5 if the query is inside the name or an alias     |
//! | 3     | City             | 0.3 if the city filter matches a location exactly   |
//! | 4     | State            | 0.2 if the state filter matches a location exactly  |
//! | 5     | Insurance        | 0.4 if the filter is inside "payer_code payer_name" |
//! | 6     | Language         | 0.2 if the filter is inside a spoken language       |
//!
//! Filter signals fire whenever the filter is supplied, whether or not the
//! candidate pool was restricted by it.

use super::filter::{city_matches, language_matches, state_matches, SearchFilters};
use super::normalize::{normalize, normalize_opt};
use crate::catalog::DoctorRecord;
use serde::Serialize;

/// Scoring weights for the ranking signals
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Per overlapping specialty (stacks)
    pub specialty_overlap: f64,
    /// Flat bonus for a name or alias hit
    pub name_match: f64,
    pub city: f64,
    pub state: f64,
    pub insurance: f64,
    pub language: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            specialty_overlap: 1.0,
            name_match: 0.5,
            city: 0.3,
            state: 0.2,
            insurance: 0.4,
            language: 0.2,
        }
    }
}

/// Ranking signals, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    SpecialtyOverlap,
    NameMatch,
    City,
    State,
    Insurance,
    Language,
}

impl Signal {
    /// Every signal in the order it is evaluated
    pub const ALL: [Signal; 6] = [
        Signal::SpecialtyOverlap,
        Signal::NameMatch,
        Signal::City,
        Signal::State,
        Signal::Insurance,
        Signal::Language,
    ];

    pub fn weight(self, weights: &ScoringWeights) -> f64 {
        match self {
            Signal::SpecialtyOverlap => weights.specialty_overlap,
            Signal::NameMatch => weights.name_match,
            Signal::City => weights.city,
            Signal::State => weights.state,
            Signal::Insurance => weights.insurance,
            Signal::Language => weights.language,
        }
    }

    /// How many times the signal fires for this doctor (0 = not at all)
    ///
    /// Only `SpecialtyOverlap` can fire more than once.
    pub fn hits(self, ctx: &ScoringContext<'_>, doctor: &DoctorRecord) -> u32 {
        let fired = match self {
            Signal::SpecialtyOverlap => {
                return doctor
                    .specialties
                    .iter()
                    .filter(|sp| ctx.specialties.contains(sp))
                    .count() as u32;
            }
            Signal::NameMatch => name_matches(doctor, &ctx.normalized_query),
            Signal::City => ctx.filters.city().is_some_and(|c| city_matches(doctor, c)),
            Signal::State => ctx.filters.state().is_some_and(|s| state_matches(doctor, s)),
            Signal::Insurance => ctx
                .filters
                .insurance()
                .is_some_and(|i| insurance_bonus_matches(doctor, i)),
            Signal::Language => ctx
                .filters
                .language()
                .is_some_and(|l| language_matches(doctor, l)),
        };
        u32::from(fired)
    }
}

/// Request-level inputs shared by every doctor scored in one search
#[derive(Debug)]
pub struct ScoringContext<'a> {
    pub specialties: &'a [String],
    pub normalized_query: String,
    pub filters: &'a SearchFilters,
}

impl<'a> ScoringContext<'a> {
    pub fn new(specialties: &'a [String], query: &str, filters: &'a SearchFilters) -> Self {
        Self {
            specialties,
            normalized_query: normalize(query),
            filters,
        }
    }
}

/// Per-signal contributions for one doctor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<(Signal, f64)>,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Evaluate every signal in order for `doctor`
    pub fn calculate(
        doctor: &DoctorRecord,
        ctx: &ScoringContext<'_>,
        weights: &ScoringWeights,
    ) -> Self {
        let mut contributions = Vec::with_capacity(Signal::ALL.len());
        let mut total = 0.0;

        for signal in Signal::ALL {
            let hits = signal.hits(ctx, doctor);
            if hits > 0 {
                let value = f64::from(hits) * signal.weight(weights);
                contributions.push((signal, value));
                total += value;
            }
        }

        Self {
            contributions,
            total,
        }
    }

    #[cfg(test)]
    pub fn contribution(&self, signal: Signal) -> f64 {
        self.contributions
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

/// A doctor paired with its score for one request
#[derive(Debug, Clone)]
pub struct ScoredDoctor<'a> {
    pub doctor: &'a DoctorRecord,
    pub score: f64,
}

/// Score `doctor` against the request
pub fn score_doctor(
    doctor: &DoctorRecord,
    ctx: &ScoringContext<'_>,
    weights: &ScoringWeights,
) -> f64 {
    ScoreBreakdown::calculate(doctor, ctx, weights).total
}

/// Sort by score, highest first
///
/// The sort is stable: doctors with equal scores keep their candidate order.
pub fn sort_by_score(scored: &mut [ScoredDoctor<'_>]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Round for display, three decimal places
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Non-empty query inside the full name or any alias
fn name_matches(doctor: &DoctorRecord, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return false;
    }
    normalize(&doctor.full_name).contains(normalized_query)
        || doctor
            .name_variants()
            .iter()
            .any(|v| normalize(v).contains(normalized_query))
}

/// Filter inside "payer_code payer_name" for some insurance
///
/// Looser than the insurance filter itself: a fragment spanning code and
/// name ("bcbs blue") still earns the bonus.
fn insurance_bonus_matches(doctor: &DoctorRecord, insurance: &str) -> bool {
    let wanted = normalize(insurance);
    doctor.insurances().iter().any(|ins| {
        let combined = format!(
            "{} {}",
            normalize_opt(ins.payer_code.as_deref()),
            normalize_opt(ins.payer_name.as_deref())
        );
        combined.contains(&wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{doctor, insurance, location};

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.specialty_overlap, 1.0);
        assert_eq!(weights.name_match, 0.5);
        assert_eq!(weights.insurance, 0.4);
    }

    #[test]
    fn test_two_specialties_city_and_name() {
        let mut d = doctor("d1", "Dr. Heart Wong", &["Cardiology", "Internal Medicine"]);
        d.locations = Some(vec![location("Boston", "MA")]);

        let detected = specs(&["Cardiology", "Internal Medicine"]);
        let filters = SearchFilters {
            city: Some("boston".into()),
            ..Default::default()
        };
        let ctx = ScoringContext::new(&detected, "heart", &filters);
        let breakdown = ScoreBreakdown::calculate(&d, &ctx, &ScoringWeights::default());

        assert!(approx(breakdown.total, 2.8));
        assert!(approx(breakdown.contribution(Signal::SpecialtyOverlap), 2.0));
        assert!(approx(breakdown.contribution(Signal::NameMatch), 0.5));
        assert!(approx(breakdown.contribution(Signal::City), 0.3));
        assert_eq!(breakdown.contribution(Signal::State), 0.0);
    }

    #[test]
    fn test_contributions_follow_signal_order() {
        let mut d = doctor("d1", "Dr. Li", &["Neurology"]);
        d.locations = Some(vec![location("Austin", "TX")]);
        d.languages = Some(vec!["English".into()]);

        let detected = specs(&["Neurology"]);
        let filters = SearchFilters {
            state: Some("TX".into()),
            language: Some("english".into()),
            ..Default::default()
        };
        let ctx = ScoringContext::new(&detected, "li", &filters);
        let breakdown = ScoreBreakdown::calculate(&d, &ctx, &ScoringWeights::default());

        let order: Vec<Signal> = breakdown.contributions.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            order,
            vec![Signal::SpecialtyOverlap, Signal::NameMatch, Signal::State, Signal::Language]
        );
        assert!(approx(breakdown.total, 1.9));
    }

    #[test]
    fn test_name_match_is_flat_across_variants() {
        let mut d = doctor("d1", "Dr. Chen Wei", &[]);
        d.name_variants = Some(vec!["Chen Wei".into(), "Wei Chen".into(), "CHEN".into()]);

        let filters = SearchFilters::default();
        let ctx = ScoringContext::new(&[], "chen", &filters);
        assert!(approx(score_doctor(&d, &ctx, &ScoringWeights::default()), 0.5));
    }

    #[test]
    fn test_name_match_via_alias_only() {
        let mut d = doctor("d1", "Dr. Robert Smith", &[]);
        d.name_variants = Some(vec!["Bob Smith".into()]);

        let filters = SearchFilters::default();
        let ctx = ScoringContext::new(&[], "bob", &filters);
        assert!(approx(score_doctor(&d, &ctx, &ScoringWeights::default()), 0.5));
    }

    #[test]
    fn test_empty_query_never_name_matches() {
        let d = doctor("d1", "Dr. Robert Smith", &[]);
        let filters = SearchFilters::default();
        let ctx = ScoringContext::new(&[], "   ", &filters);
        assert_eq!(score_doctor(&d, &ctx, &ScoringWeights::default()), 0.0);
    }

    #[test]
    fn test_duplicate_doctor_specialty_stacks() {
        let d = doctor("d1", "Dr. A", &["Cardiology", "Cardiology"]);
        let detected = specs(&["Cardiology"]);
        let filters = SearchFilters::default();
        let ctx = ScoringContext::new(&detected, "x", &filters);
        assert!(approx(score_doctor(&d, &ctx, &ScoringWeights::default()), 2.0));
    }

    #[test]
    fn test_insurance_bonus_spans_code_and_name() {
        let mut d = doctor("d1", "Dr. A", &[]);
        d.insurances = Some(vec![insurance("BCBS", "Blue Cross")]);

        let filters = SearchFilters {
            insurance: Some("bcbs blue".into()),
            ..Default::default()
        };
        // The boolean filter rejects it, but the bonus still applies
        assert!(!filters.matches(&d));
        let ctx = ScoringContext::new(&[], "x", &filters);
        assert!(approx(score_doctor(&d, &ctx, &ScoringWeights::default()), 0.4));
    }

    #[test]
    fn test_custom_weights() {
        let d = doctor("d1", "Dr. A", &["Cardiology"]);
        let detected = specs(&["Cardiology"]);
        let filters = SearchFilters::default();
        let ctx = ScoringContext::new(&detected, "x", &filters);
        let weights = ScoringWeights {
            specialty_overlap: 3.0,
            ..Default::default()
        };
        assert!(approx(score_doctor(&d, &ctx, &weights), 3.0));
    }

    #[test]
    fn test_sort_is_stable_descending() {
        let a = doctor("a", "A", &[]);
        let b = doctor("b", "B", &[]);
        let c = doctor("c", "C", &[]);
        let d = doctor("d", "D", &[]);
        let mut scored = vec![
            ScoredDoctor { doctor: &a, score: 1.0 },
            ScoredDoctor { doctor: &b, score: 2.0 },
            ScoredDoctor { doctor: &c, score: 1.0 },
            ScoredDoctor { doctor: &d, score: 2.0 },
        ];
        sort_by_score(&mut scored);

        let ids: Vec<&str> = scored.iter().map(|s| s.doctor.doctor_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.1 + 0.2), 0.3);
        assert_eq!(round_score(1.23456), 1.235);
        assert_eq!(round_score(2.8), 2.8);
    }
}
