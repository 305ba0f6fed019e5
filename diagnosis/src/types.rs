use serde::Serialize;
use std::fmt;

/// Key of an entry in the diagnostic table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisKey {
    Freios,
    Motor,
    Suspensao,
    Escapamento,
}

impl DiagnosisKey {
    /// All keys, in table order
    pub const ALL: [DiagnosisKey; 4] = [
        DiagnosisKey::Freios,
        DiagnosisKey::Motor,
        DiagnosisKey::Suspensao,
        DiagnosisKey::Escapamento,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisKey::Freios => "freios",
            DiagnosisKey::Motor => "motor",
            DiagnosisKey::Suspensao => "suspensao",
            DiagnosisKey::Escapamento => "escapamento",
        }
    }
}

impl fmt::Display for DiagnosisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area of the vehicle a diagnosis points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleZone {
    Engine,
    FrontSuspension,
    Brakes,
    Exhaust,
    RearSuspension,
}

impl VehicleZone {
    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            VehicleZone::Engine => "Motor",
            VehicleZone::FrontSuspension => "Suspensão dianteira",
            VehicleZone::Brakes => "Freios",
            VehicleZone::Exhaust => "Escapamento",
            VehicleZone::RearSuspension => "Suspensão traseira",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "baixa",
            Urgency::Medium => "média",
            Urgency::High => "alta",
        }
    }
}

/// How involved the recommended repair is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "simples",
            Complexity::Moderate => "moderada",
            Complexity::Complex => "complexa",
        }
    }
}

/// The part a diagnosis blames
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDescriptor {
    pub name: &'static str,
    pub image: &'static str,
    pub function: &'static str,
    pub symptoms: &'static [&'static str],
}

/// Repair procedure for a diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    /// Ordered repair steps
    pub steps: &'static [&'static str],
    pub complexity: Complexity,
    pub tools: &'static [&'static str],
    pub time_estimate: &'static str,
}

/// Machine-oriented summary of a diagnosis, meant to be handed to an LLM
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPrompt {
    pub symptom: &'static str,
    pub location: &'static str,
    pub condition: &'static str,
    pub severity: &'static str,
}

impl StructuredPrompt {
    /// Renders the prompt as a `key: value` block, one field per line
    pub fn to_prompt_block(&self) -> String {
        format!(
            "sintoma: {}\nlocalizacao: {}\ncondicao: {}\ngravidade: {}",
            self.symptom, self.location, self.condition, self.severity
        )
    }
}

/// A canned diagnosis from the static table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub id: &'static str,
    pub key: DiagnosisKey,
    pub zone: Option<VehicleZone>,
    pub fault: &'static str,
    pub urgency: Urgency,
    pub description: &'static str,
    pub part: PartDescriptor,
    pub action: RecommendedAction,
    pub structured_prompt: StructuredPrompt,
}
