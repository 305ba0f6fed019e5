//! Free-text symptom matching.
//!
//! Input and keywords are folded the same way (lower case, canonical
//! decomposition, combining diacritical marks dropped) and each keyword is
//! tested for containment in table order. The first keyword found decides the
//! diagnosis, even if a later keyword would be more specific.

use lazy_static::lazy_static;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{lookup, KEYWORDS};
use crate::types::{DiagnosisKey, DiagnosisRecord};

lazy_static! {
    static ref NORMALIZED_KEYWORDS: Vec<(String, &'static str, DiagnosisKey)> = KEYWORDS
        .iter()
        .map(|(keyword, key)| (normalize(keyword), *keyword, *key))
        .collect();
}

/// A successful match: the keyword that fired and the record it points at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymptomMatch {
    pub keyword: &'static str,
    pub record: &'static DiagnosisRecord,
}

/// Folds `text` for comparison: lower case, NFD, combining marks removed
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

// Combining Diacritical Marks block only.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Maps a symptom description to a diagnosis, or `None` when no keyword
/// appears in it. A non-match is a normal outcome, not an error.
pub fn analyze_symptom(text: &str) -> Option<&'static DiagnosisRecord> {
    matched_keyword(text).map(|found| found.record)
}

/// Like [`analyze_symptom`], but also reports which keyword decided the match
pub fn matched_keyword(text: &str) -> Option<SymptomMatch> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    NORMALIZED_KEYWORDS
        .iter()
        .find(|(folded, _, _)| normalized.contains(folded.as_str()))
        .map(|(_, keyword, key)| SymptomMatch {
            keyword: *keyword,
            record: lookup(*key),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::keywords_for;
    use crate::types::Urgency;

    #[test]
    fn test_normalize_strips_case_and_accents() {
        assert_eq!(normalize("SUSPENSÃO"), "suspensao");
        assert_eq!(normalize("Fumaça e Exaustão"), "fumaca e exaustao");
        assert_eq!(normalize("água"), "agua");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_dry_knock_matches_suspension() {
        let record = analyze_symptom("Barulho de batida seca na frente").unwrap();
        assert_eq!(record.key, DiagnosisKey::Suspensao);
        assert_eq!(record.fault, "Desgaste da Bieleta da Barra Estabilizadora");
    }

    #[test]
    fn test_squeal_when_braking_matches_brakes() {
        let record = analyze_symptom("chiado ao frear").unwrap();
        assert_eq!(record.key, DiagnosisKey::Freios);
        assert_eq!(record.urgency, Urgency::High);
    }

    #[test]
    fn test_overheating_matches_engine() {
        let record = analyze_symptom("motor aquecendo muito").unwrap();
        assert_eq!(record.key, DiagnosisKey::Motor);
    }

    #[test]
    fn test_unknown_symptom_has_no_diagnosis() {
        assert!(analyze_symptom("carro fazendo ruido estranho xyz").is_none());
    }

    #[test]
    fn test_empty_and_blank_input_never_match() {
        assert!(analyze_symptom("").is_none());
        assert!(analyze_symptom("   ").is_none());
    }

    #[test]
    fn test_every_keyword_matches_its_diagnosis_anywhere_in_text() {
        for key in DiagnosisKey::ALL {
            for keyword in keywords_for(key) {
                let variants = [
                    format!("tem um problema: {}!", keyword),
                    format!("{} agora", keyword.to_uppercase()),
                    format!("xx{}xx", normalize(keyword)),
                ];
                for input in variants {
                    let record = analyze_symptom(&input)
                        .unwrap_or_else(|| panic!("no match for {:?}", input));
                    assert_eq!(record.key, key, "wrong diagnosis for {:?}", input);
                }
            }
        }
    }

    #[test]
    fn test_accented_input_matches_plain_keyword() {
        let record = analyze_symptom("Ouço um RONCO e sai FUMAÇA").unwrap();
        assert_eq!(record.key, DiagnosisKey::Escapamento);
    }

    #[test]
    fn test_table_order_decides_between_diagnoses() {
        // "freio" is listed before "barulho", so brakes win over suspension.
        let record = analyze_symptom("barulho no freio").unwrap();
        assert_eq!(record.key, DiagnosisKey::Freios);

        // "motor" is listed before "fumaça".
        let record = analyze_symptom("fumaça saindo do motor").unwrap();
        assert_eq!(record.key, DiagnosisKey::Motor);
    }

    #[test]
    fn test_matched_keyword_reports_first_hit() {
        let found = matched_keyword("estalo e batida na roda").unwrap();
        assert_eq!(found.keyword, "batida");
        assert_eq!(found.record.key, DiagnosisKey::Suspensao);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let input = "vapor saindo do capô";
        let first = analyze_symptom(input).map(|record| record.id);
        for _ in 0..3 {
            assert_eq!(analyze_symptom(input).map(|record| record.id), first);
        }
    }
}
