//! Folds free-text effect labels onto the canonical categories and keeps the
//! strongest few for display.

use pcat_core::rules::EffectCategory;
use pcat_core::{Catalog, Effect, Product, Rules};

/// How many effects a product page shows.
pub const TOP_EFFECTS: usize = 3;

/// Source recorded for entries injected by inference.
pub const INFERRED_SOURCE: &str = "inferred";

/// One effect after synonym merging, with the labels that fed into it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedEffect {
    pub label: String,
    pub value: f64,
    pub sources: Vec<String>,
}

impl UnifiedEffect {
    #[must_use]
    pub fn to_effect(&self) -> Effect {
        Effect::new(self.label.clone(), self.value)
    }
}

/// Before/after record for one product touched by [`unify_catalog`].
#[derive(Debug, Clone)]
pub struct EffectAudit {
    pub product_id: String,
    pub category: String,
    pub flagship: bool,
    pub before: Vec<Effect>,
    pub after: Vec<UnifiedEffect>,
}

pub struct EffectUnifier<'a> {
    rules: &'a Rules,
    /// Lower-cased synonyms, parallel to `rules.effect_categories`.
    synonyms: Vec<Vec<String>>,
}

impl<'a> EffectUnifier<'a> {
    #[must_use]
    pub fn new(rules: &'a Rules) -> Self {
        let synonyms = rules
            .effect_categories
            .iter()
            .map(|c| c.synonyms.iter().map(|s| s.to_lowercase()).collect())
            .collect();
        Self { rules, synonyms }
    }

    /// Canonical category for an observed label: the first category, in
    /// table order, with a synonym equal to or contained in the label.
    #[must_use]
    pub fn canonical(&self, label: &str) -> Option<&'a EffectCategory> {
        let lower = label.to_lowercase();
        self.synonyms
            .iter()
            .position(|syns| syns.iter().any(|s| lower == *s || lower.contains(s.as_str())))
            .map(|i| &self.rules.effect_categories[i])
    }

    /// Maps every label and merges duplicates, keeping the maximum value.
    ///
    /// Output is in first-seen order. Labels with no canonical category pass
    /// through under their own name.
    #[must_use]
    pub fn merge(&self, effects: &[Effect]) -> Vec<UnifiedEffect> {
        let mut merged: Vec<UnifiedEffect> = Vec::new();
        for effect in effects {
            let observed = effect.label();
            let label = self
                .canonical(observed)
                .map_or(observed, |c| c.label.as_str());
            match merged.iter_mut().find(|m| m.label == label) {
                Some(existing) => {
                    existing.value = existing.value.max(effect.value());
                    if !existing.sources.iter().any(|s| s == observed) {
                        existing.sources.push(observed.to_string());
                    }
                }
                None => merged.push(UnifiedEffect {
                    label: label.to_string(),
                    value: effect.value(),
                    sources: vec![observed.to_string()],
                }),
            }
        }
        merged
    }

    /// Adds the categories a product's goals or name imply but its effects
    /// lack.
    pub fn infer(&self, product: &Product, merged: &mut Vec<UnifiedEffect>) {
        let name = product.name().to_lowercase();
        let goals = product.system_data.goals.as_slice();
        for rule in &self.rules.inference {
            if merged.iter().any(|m| m.label == rule.category) {
                continue;
            }
            let by_goal = rule.goals.iter().any(|g| goals.contains(g));
            let by_name = rule
                .name_tokens
                .iter()
                .any(|t| name.contains(&t.to_lowercase()));
            if by_goal || by_name {
                merged.push(UnifiedEffect {
                    label: rule.category.clone(),
                    value: rule.value,
                    sources: vec![INFERRED_SOURCE.to_string()],
                });
            }
        }
    }

    /// Merged, optionally augmented, and cut to [`TOP_EFFECTS`].
    ///
    /// Flagship products are merged but never inferred.
    #[must_use]
    pub fn unify(&self, product: &Product, flagship: bool) -> Vec<UnifiedEffect> {
        let mut merged = self.merge(product.public_data.effects.as_slice());
        if !flagship {
            self.infer(product, &mut merged);
        }
        top_k(merged, TOP_EFFECTS)
    }
}

/// The `k` highest values, descending. Ties keep their input order.
#[must_use]
pub fn top_k(mut effects: Vec<UnifiedEffect>, k: usize) -> Vec<UnifiedEffect> {
    effects.sort_by(|a, b| b.value.total_cmp(&a.value));
    effects.truncate(k);
    effects
}

/// Rewrites every product's effects in place and returns the audit trail.
pub fn unify_catalog(catalog: &mut Catalog, rules: &Rules) -> Vec<EffectAudit> {
    let unifier = EffectUnifier::new(rules);
    let mut audits = Vec::new();

    for category in catalog.product_categories_mut() {
        let flagship = rules.flagship.is_flagship(category);
        let title = category.title().to_string();
        for product in category.products.iter_mut().flatten() {
            let after = unifier.unify(product, flagship);
            let before = product.public_data.effects.as_slice().to_vec();
            product
                .public_data
                .effects
                .replace_list(after.iter().map(UnifiedEffect::to_effect).collect());
            tracing::debug!(
                product_id = %product.product_id,
                category = %title,
                flagship,
                before = before.len(),
                after = after.len(),
                "effects unified"
            );
            audits.push(EffectAudit {
                product_id: product.product_id.clone(),
                category: title.clone(),
                flagship,
                before,
                after,
            });
        }
    }
    audits
}

#[cfg(test)]
#[path = "effects_test.rs"]
mod tests;
