use pcat_core::rules::ProductOverride;
use pcat_core::Catalog;

use crate::enrich::Enrichment;

/// Applies hand-curated data to the products it names.
///
/// `tagline`, `effects` and `variants` replace what is there. `label_image`
/// and `ingredients` are written only when the product has none. Overrides
/// for products missing from the catalog are logged and ignored.
pub fn apply_overrides(catalog: &mut Catalog, overrides: &[ProductOverride]) -> Vec<Enrichment> {
    let mut changes = Vec::new();

    for o in overrides {
        let Some(product) = catalog.find_product_mut(&o.product_id) else {
            tracing::warn!(product_id = %o.product_id, "override for unknown product");
            continue;
        };
        let public = &mut product.public_data;
        let mut fields = Vec::new();

        if let Some(tagline) = &o.tagline {
            public.tagline.set(tagline.clone());
            fields.push("tagline");
        }
        if let Some(effects) = &o.effects {
            public.effects.set(effects.clone());
            fields.push("effects");
        }
        if let Some(variants) = &o.variants {
            public.variants.set(variants.clone());
            fields.push("variants");
        }
        if let Some(label) = &o.label_image {
            if public.label_image.as_deref().is_none_or(str::is_empty) {
                public.label_image.set(label.clone());
                fields.push("label_image");
            }
        }
        if let Some(ingredients) = &o.ingredients {
            if public.ingredients.as_slice().is_empty() {
                public.ingredients.set(ingredients.clone());
                fields.push("ingredients");
            }
        }

        tracing::info!(product_id = %o.product_id, fields = ?fields, "override applied");
        changes.push(Enrichment {
            product_id: o.product_id.clone(),
            fields,
        });
    }
    changes
}

#[cfg(test)]
mod tests {
    use pcat_core::{Effect, Ingredient, Product};

    use super::*;
    use crate::test_support::{product_category, rules};

    fn catalog() -> Catalog {
        let mut category = product_category("fat-burners");
        for id in ["prod-16905", "prod-24527"] {
            let mut p = Product {
                product_id: id.to_string(),
                ..Product::default()
            };
            p.public_data.tagline.set("old".to_string());
            p.public_data.effects.set(vec![Effect::new("Енергия", 10.0)]);
            category.push_product(p);
        }
        let mut catalog = Catalog::default();
        catalog.categories.push(category);
        catalog
    }

    #[test]
    fn replaces_and_fills_per_field_rules() {
        let rules = rules();
        let mut catalog = catalog();
        catalog
            .find_product_mut("prod-24527")
            .unwrap()
            .public_data
            .label_image
            .set("/images/mine.jpg".to_string());

        let changes = apply_overrides(&mut catalog, &rules.overrides);
        // Five configured products are not in this catalog.
        assert_eq!(changes.len(), 2);

        let full = catalog.find_product("prod-16905").unwrap();
        assert_eq!(
            full.public_data.tagline.as_deref(),
            Some("Sport Definition - Термогенен фет бърнер с L-Carnitine")
        );
        assert_eq!(full.public_data.effects.as_slice().len(), 3);
        assert_eq!(full.public_data.variants.as_slice().len(), 1);
        assert_eq!(full.public_data.ingredients.as_slice().len(), 3);
        assert_eq!(
            changes[0].fields,
            vec!["tagline", "effects", "variants", "label_image", "ingredients"]
        );

        let partial = catalog.find_product("prod-24527").unwrap();
        assert_eq!(partial.public_data.tagline.as_deref(), Some("old"));
        assert_eq!(
            partial.public_data.label_image.as_deref(),
            Some("/images/mine.jpg")
        );
        assert_eq!(changes[1].fields, vec!["variants"]);
    }

    #[test]
    fn existing_ingredients_are_not_replaced() {
        let rules = rules();
        let mut catalog = catalog();
        catalog
            .find_product_mut("prod-16905")
            .unwrap()
            .public_data
            .ingredients
            .set(vec![Ingredient::new("Own", "", "")]);

        apply_overrides(&mut catalog, &rules.overrides);
        let p = catalog.find_product("prod-16905").unwrap();
        let ingredients = p.public_data.ingredients.as_slice();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name.as_deref(), Some("Own"));
    }
}
