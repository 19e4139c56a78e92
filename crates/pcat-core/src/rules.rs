//! Heuristic tables that drive extraction, unification, and intake.
//!
//! Everything here used to be hard-coded in the maintenance scripts. Loading
//! it from YAML lets tests and one-off runs substitute their own tables.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Category, Effect, Ingredient, Variant};
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct Rules {
    /// Known manufacturers in priority order; first substring match wins.
    pub manufacturers: Vec<String>,
    pub units: UnitWords,
    /// Currency suffixes stripped from spreadsheet price cells, longest first.
    #[serde(default = "default_price_suffixes")]
    pub price_suffixes: Vec<String>,
    /// File-name fragments marking an archive image as a label shot.
    pub label_keywords: Vec<String>,
    pub flagship: FlagshipRule,
    /// Canonical effect categories in priority order.
    pub effect_categories: Vec<EffectCategory>,
    #[serde(default)]
    pub inference: Vec<InferenceRule>,
    #[serde(default)]
    pub product_mappings: Vec<ProductMapping>,
    pub new_product: NewProductTemplate,
    #[serde(default)]
    pub generic_ingredients: GenericIngredients,
    #[serde(default)]
    pub overrides: Vec<ProductOverride>,
}

fn default_price_suffixes() -> Vec<String> {
    vec!["лв.".to_string(), "лв".to_string()]
}

/// Unit words that follow a count in product names, matched case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitWords {
    pub capsules: Vec<String>,
    pub doses: Vec<String>,
    pub grams: Vec<String>,
}

/// Decides which categories are flagship ("bestseller") categories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagshipRule {
    #[serde(default)]
    pub title_markers: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl FlagshipRule {
    /// A category is flagship when its title contains a marker
    /// (case-insensitive) or its id is listed explicitly.
    #[must_use]
    pub fn is_flagship(&self, category: &Category) -> bool {
        let title = category.title().to_lowercase();
        let by_title = self
            .title_markers
            .iter()
            .any(|m| title.contains(&m.to_lowercase()));
        let by_id = category
            .id
            .as_deref()
            .is_some_and(|id| self.category_ids.iter().any(|c| c == id));
        by_title || by_id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectCategory {
    pub label: String,
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Injects `category` at `value` when a product's goals or name hint at it.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceRule {
    pub category: String,
    pub value: f64,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub name_tokens: Vec<String>,
}

/// Links a supplier archive id to the spreadsheet row and target category.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductMapping {
    pub archive_id: String,
    pub search_term: String,
    pub manufacturer: String,
    pub category: String,
}

/// Boilerplate for products created from the spreadsheet.
///
/// `tagline` may contain `{manufacturer}`; `description` may contain `{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProductTemplate {
    pub tagline: String,
    pub description: String,
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub target_profile: Option<String>,
    #[serde(default)]
    pub safety_warnings: Option<String>,
    #[serde(default)]
    pub inventory: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenericIngredients {
    #[serde(default)]
    pub groups: Vec<IngredientGroup>,
    #[serde(default)]
    pub fallback: Vec<Ingredient>,
}

impl GenericIngredients {
    /// First group whose token appears in the lower-cased name, else the fallback.
    #[must_use]
    pub fn for_name(&self, name: &str) -> &[Ingredient] {
        let lower = name.to_lowercase();
        self.groups
            .iter()
            .find(|g| g.name_tokens.iter().any(|t| lower.contains(&t.to_lowercase())))
            .map_or(self.fallback.as_slice(), |g| g.ingredients.as_slice())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientGroup {
    pub name_tokens: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Hand-curated data for one product.
///
/// `tagline`, `effects` and `variants` replace what is there; `label_image`
/// and `ingredients` only fill gaps.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductOverride {
    pub product_id: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub effects: Option<Vec<Effect>>,
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,
    #[serde(default)]
    pub label_image: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl Rules {
    /// Canonical category entry for `label`, if `label` is canonical.
    #[must_use]
    pub fn effect_category(&self, label: &str) -> Option<&EffectCategory> {
        self.effect_categories.iter().find(|c| c.label == label)
    }
}

/// Load and validate the rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<Rules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rules(&content)
}

/// Parse and validate rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML or fails validation.
pub fn parse_rules(content: &str) -> Result<Rules, ConfigError> {
    let rules: Rules = serde_yaml::from_str(content)?;
    validate_rules(&rules)?;
    Ok(rules)
}

fn validate_rules(rules: &Rules) -> Result<(), ConfigError> {
    if rules.manufacturers.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "manufacturer names must be non-empty".to_string(),
        ));
    }

    for (kind, words) in [
        ("capsules", &rules.units.capsules),
        ("doses", &rules.units.doses),
        ("grams", &rules.units.grams),
    ] {
        if words.is_empty() || words.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "units.{kind} must list at least one non-empty word"
            )));
        }
    }

    let mut seen_labels = HashSet::new();
    for category in &rules.effect_categories {
        if category.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "effect category label must be non-empty".to_string(),
            ));
        }
        if !seen_labels.insert(category.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate effect category: '{}'",
                category.label
            )));
        }
        if category.synonyms.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "effect category '{}' has an empty synonym",
                category.label
            )));
        }
    }

    for rule in &rules.inference {
        if rules.effect_category(&rule.category).is_none() {
            return Err(ConfigError::Validation(format!(
                "inference rule targets unknown effect category '{}'",
                rule.category
            )));
        }
        if !(0.0..=100.0).contains(&rule.value) {
            return Err(ConfigError::Validation(format!(
                "inference rule for '{}' has value {} outside 0-100",
                rule.category, rule.value
            )));
        }
    }

    let mut seen_archives = HashSet::new();
    for mapping in &rules.product_mappings {
        if mapping.archive_id.is_empty() || !mapping.archive_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "product mapping archive_id '{}' must be numeric",
                mapping.archive_id
            )));
        }
        if !seen_archives.insert(mapping.archive_id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product mapping for archive {}",
                mapping.archive_id
            )));
        }
    }

    let mut seen_overrides = HashSet::new();
    for o in &rules.overrides {
        if !seen_overrides.insert(o.product_id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate override for product '{}'",
                o.product_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
