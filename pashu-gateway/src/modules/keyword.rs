//! Keyword-matching prediction module
//!
//! Ranks labels from case-insensitive substrings of the file name. Rules are
//! checked in order and the first match wins; a file matching no rule gets
//! the fallback set. File content is never inspected.

use async_trait::async_trait;
use pashu_common::Prediction;
use serde_json::{Map, Value};

use super::{PredictionError, PredictionModule};
use crate::upload::UploadedFile;

/// Keywords mapped to the ranked predictions they produce
#[derive(Debug, Clone)]
pub struct KeywordRule {
    keywords: Vec<String>,
    predictions: Vec<Prediction>,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], predictions: Vec<Prediction>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            predictions,
        }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k.as_str()))
    }
}

/// Two-valued meta field derived from whether the top label is a hazard
#[derive(Debug, Clone)]
pub struct HazardRule {
    pub hazard_label: String,
    pub field: String,
    pub positive: String,
    pub negative: String,
}

impl HazardRule {
    fn classify(&self, top: &Prediction) -> &str {
        if top.label == self.hazard_label {
            &self.positive
        } else {
            &self.negative
        }
    }
}

/// Deterministic filename-heuristic module
#[derive(Debug, Clone)]
pub struct KeywordModule {
    name: String,
    rules: Vec<KeywordRule>,
    fallback: Vec<Prediction>,
    hazard: Option<HazardRule>,
}

impl KeywordModule {
    pub fn new(name: impl Into<String>, fallback: Vec<Prediction>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            fallback,
            hazard: None,
        }
    }

    /// Append a rule (checked after all earlier rules)
    pub fn rule(mut self, keywords: &[&str], predictions: Vec<Prediction>) -> Self {
        self.rules.push(KeywordRule::new(keywords, predictions));
        self
    }

    pub fn with_hazard(mut self, hazard: HazardRule) -> Self {
        self.hazard = Some(hazard);
        self
    }

    /// Ranked predictions for a file name
    pub fn rank(&self, filename: &str) -> Vec<Prediction> {
        let lowered = filename.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.predictions.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl PredictionModule for KeywordModule {
    fn name(&self) -> &str {
        &self.name
    }

    async fn predict(&self, file: &UploadedFile) -> Result<Vec<Prediction>, PredictionError> {
        Ok(self.rank(file.name()))
    }

    fn derived_meta(&self, top: &Prediction) -> Map<String, Value> {
        let mut meta = Map::new();
        if let Some(hazard) = &self.hazard {
            meta.insert(
                hazard.field.clone(),
                Value::String(hazard.classify(top).to_string()),
            );
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_module() -> KeywordModule {
        KeywordModule::new("fruit", vec![Prediction::new("Unknown", 0.5)])
            .rule(&["apple"], vec![Prediction::new("Apple", 0.9)])
            .rule(&["pineapple", "ananas"], vec![Prediction::new("Pineapple", 0.8)])
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "pineapple" also contains "apple", which is checked first
        let preds = fruit_module().rank("pineapple.png");
        assert_eq!(preds[0].label, "Apple");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(fruit_module().rank("ANANAS.JPG")[0].label, "Pineapple");
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        assert_eq!(fruit_module().rank("banana.jpg")[0].label, "Unknown");
        assert_eq!(fruit_module().rank("")[0].label, "Unknown");
    }

    #[test]
    fn test_no_hazard_rule_means_no_derived_meta() {
        let top = Prediction::new("Apple", 0.9);
        assert!(fruit_module().derived_meta(&top).is_empty());
    }

    #[test]
    fn test_hazard_rule_derives_field() {
        let module = fruit_module().with_hazard(HazardRule {
            hazard_label: "Apple".to_string(),
            field: "allergen".to_string(),
            positive: "yes".to_string(),
            negative: "no".to_string(),
        });

        assert_eq!(module.derived_meta(&Prediction::new("Apple", 0.9))["allergen"], "yes");
        assert_eq!(module.derived_meta(&Prediction::new("Kiwi", 0.9))["allergen"], "no");
    }
}
