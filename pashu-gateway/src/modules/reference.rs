//! Reference modules: animal classifier, snake assessment, emotion
//!
//! Heuristic stand-ins for trained models. Each always returns three
//! predictions whose confidences sum to roughly 1.0.

use pashu_common::Prediction;

use super::{HazardRule, KeywordModule};

pub const CLASSIFIER: &str = "classifier";
pub const SNAKE: &str = "snake";
pub const EMOTION: &str = "emotion";

/// Top label that marks a snake as dangerous
pub const VENOMOUS_LABEL: &str = "Venomous Snake";

fn ranked(entries: &[(&str, f64)]) -> Vec<Prediction> {
    entries
        .iter()
        .map(|(label, confidence)| Prediction::new(*label, *confidence))
        .collect()
}

/// Animal species classifier
pub fn classifier() -> KeywordModule {
    KeywordModule::new(
        CLASSIFIER,
        ranked(&[("Unknown Animal", 0.60), ("Dog", 0.22), ("Cat", 0.18)]),
    )
    .rule(
        &["cow", "cattle", "bovine"],
        ranked(&[("Cow", 0.92), ("Buffalo", 0.05), ("Yak", 0.03)]),
    )
    .rule(
        &["dog", "canine"],
        ranked(&[("Dog", 0.90), ("Wolf", 0.06), ("Fox", 0.04)]),
    )
    .rule(
        &["cat", "feline"],
        ranked(&[("Cat", 0.91), ("Lynx", 0.05), ("Puma", 0.04)]),
    )
}

/// Venomous/non-venomous snake assessment with a `danger` meta field
pub fn snake() -> KeywordModule {
    KeywordModule::new(
        SNAKE,
        ranked(&[("Non-venomous Snake", 0.82), ("Rat Snake", 0.08), ("Other", 0.04)]),
    )
    .rule(
        &["cobra", "viper", "krait"],
        ranked(&[(VENOMOUS_LABEL, 0.88), ("Rat Snake", 0.08), ("Other", 0.04)]),
    )
    .with_hazard(HazardRule {
        hazard_label: VENOMOUS_LABEL.to_string(),
        field: "danger".to_string(),
        positive: "Dangerous".to_string(),
        negative: "Generally Safe".to_string(),
    })
}

/// Animal emotion recognition
pub fn emotion() -> KeywordModule {
    KeywordModule::new(
        EMOTION,
        ranked(&[("Neutral", 0.70), ("Curious", 0.20), ("Relaxed", 0.10)]),
    )
    .rule(
        &["happy", "smile"],
        ranked(&[("Happy", 0.93), ("Relaxed", 0.05), ("Alert", 0.02)]),
    )
    .rule(
        &["angry", "growl", "hiss"],
        ranked(&[("Agitated", 0.88), ("Alert", 0.08), ("Neutral", 0.04)]),
    )
}
