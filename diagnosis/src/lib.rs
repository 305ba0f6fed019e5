// Symptom diagnosis for the autodiag suite:
// - Diagnosis record data structures
// - Static diagnostic table and keyword index
// - Free-text symptom matcher

// Export types module - Diagnosis record data structures
pub mod types;
pub use types::*;

// Export catalog module - Static diagnostic table and keyword index
pub mod catalog;
pub use catalog::{all, keywords_for, lookup, KEYWORDS};

// Export matcher module - Symptom to diagnosis matching
pub mod matcher;
pub use matcher::{analyze_symptom, matched_keyword, normalize, SymptomMatch};
