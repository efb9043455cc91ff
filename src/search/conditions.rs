//! Specialty detection from free-text queries
//!
//! Two phases, the first one wins when it finds anything:
//! 1. Direct mention: a doctor specialty label appears inside the query
//!    ("cardiology near me").
//! 2. Mapping: a condition synonym from the mapping table appears inside the
//!    query ("I have a headache" -> Neurology).
//!
//! Matching is case-insensitive substring containment on normalized text.

use super::normalize::normalize;
use crate::catalog::ConditionMappingEntry;
use std::collections::HashSet;

/// Detect the specialties relevant to `query`
///
/// `specialty_labels` is every specialty carried by the doctor collection.
/// The result has set semantics and keeps first-seen order for display.
/// An empty result means the query was not recognized.
pub fn detect_specialties(
    query: &str,
    specialty_labels: &[String],
    mapping: &[ConditionMappingEntry],
) -> Vec<String> {
    let normalized_query = normalize(query);

    let direct = direct_mentions(&normalized_query, specialty_labels);
    if !direct.is_empty() {
        return direct;
    }

    mapped_specialties(&normalized_query, mapping)
}

fn direct_mentions(normalized_query: &str, specialty_labels: &[String]) -> Vec<String> {
    let mut found = SpecialtySet::default();
    for label in specialty_labels {
        let needle = normalize(label);
        // An empty label would match every query
        if !needle.is_empty() && normalized_query.contains(&needle) {
            found.insert(label);
        }
    }
    found.into_vec()
}

fn mapped_specialties(normalized_query: &str, mapping: &[ConditionMappingEntry]) -> Vec<String> {
    let mut found = SpecialtySet::default();
    for entry in mapping {
        let hit = entry.condition.iter().any(|synonym| {
            let needle = normalize(synonym);
            !needle.is_empty() && normalized_query.contains(&needle)
        });
        if hit {
            for label in &entry.specialties {
                found.insert(label);
            }
        }
    }
    found.into_vec()
}

/// Insertion-ordered set of specialty labels
#[derive(Default)]
struct SpecialtySet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl SpecialtySet {
    fn insert(&mut self, label: &str) {
        if self.seen.insert(label.to_string()) {
            self.ordered.push(label.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::mapping;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_direct_mention() {
        let found = detect_specialties(
            "Cardiology near me",
            &labels(&["Cardiology", "Neurology"]),
            &[],
        );
        assert_eq!(found, vec!["Cardiology"]);
    }

    #[test]
    fn test_mapping_phase_headache() {
        let table = vec![mapping(&["headache"], &["Neurology"])];
        let found = detect_specialties("I have a headache", &labels(&["Cardiology"]), &table);
        assert_eq!(found, vec!["Neurology"]);
    }

    #[test]
    fn test_direct_mention_takes_precedence() {
        // "chest pain" would map to Pulmonology, but the query names Cardiology outright
        let table = vec![mapping(&["chest pain"], &["Pulmonology"])];
        let found = detect_specialties(
            "cardiology for chest pain",
            &labels(&["Cardiology", "Pulmonology"]),
            &table,
        );
        assert_eq!(found, vec!["Cardiology"]);
    }

    #[test]
    fn test_mapping_union_dedup() {
        let table = vec![
            mapping(&["chest pain"], &["Cardiology", "Emergency Medicine"]),
            mapping(&["shortness of breath", "chest"], &["Pulmonology", "Cardiology"]),
            mapping(&["rash"], &["Dermatology"]),
        ];
        let found = detect_specialties("CHEST PAIN and shortness of breath", &[], &table);
        assert_eq!(found, vec!["Cardiology", "Emergency Medicine", "Pulmonology"]);
    }

    #[test]
    fn test_substring_not_token_match() {
        // Synonyms match inside words, on purpose
        let table = vec![mapping(&["ache"], &["Neurology"])];
        let found = detect_specialties("headaches", &[], &table);
        assert_eq!(found, vec!["Neurology"]);
    }

    #[test]
    fn test_empty_synonyms_and_labels_ignored() {
        let table = vec![mapping(&["", "   "], &["Neurology"])];
        let found = detect_specialties("anything", &labels(&["", " "]), &table);
        assert!(found.is_empty());
    }

    #[test]
    fn test_unrecognized_query() {
        let table = vec![mapping(&["headache"], &["Neurology"])];
        assert!(detect_specialties("sprained ankle", &labels(&["Cardiology"]), &table).is_empty());
    }
}
