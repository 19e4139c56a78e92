//! In-memory model of the catalog document.
//!
//! Every record carries a flattened `extra` map so keys this crate does not
//! model survive a load/save cycle in their original order. Modelled fields
//! are [`Field`]s, so missing keys and explicit `null`s are written back as
//! they were read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{Field, Section};

/// Category `type` tag of the components that carry products.
pub const PRODUCT_CATEGORY: &str = "product_category";

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    /// Ordered page components. Older exports named this array
    /// `page_content` or `product_categories`.
    #[serde(alias = "page_content", alias = "product_categories")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            categories: Vec::new(),
            footer: None,
            extra: Map::new(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories tagged `product_category`, in document order.
    pub fn product_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_product_category())
    }

    pub fn product_categories_mut(&mut self) -> impl Iterator<Item = &mut Category> {
        self.categories
            .iter_mut()
            .filter(|c| c.is_product_category())
    }

    /// Looks a category up by its `id`.
    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
    }

    /// Total number of products across product categories.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.product_categories().map(|c| c.products().len()).sum()
    }

    #[must_use]
    pub fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.product_categories()
            .flat_map(|c| c.products().iter())
            .find(|p| p.product_id == product_id)
    }

    pub fn find_product_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.product_categories_mut()
            .flat_map(|c| c.products.iter_mut().flatten())
            .find(|p| p.product_id == product_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// `None` when the component has no `products` key at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    #[must_use]
    pub fn is_product_category(&self) -> bool {
        self.kind.as_deref() == Some(PRODUCT_CATEGORY)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.products.as_deref().unwrap_or(&[])
    }

    /// Appends a product, creating the `products` array if it was absent.
    pub fn push_product(&mut self, product: Product) {
        self.products.get_or_insert_with(Vec::new).push(product);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Section::is_unwritten")]
    pub public_data: Section<PublicData>,
    #[serde(default, skip_serializing_if = "Section::is_unwritten")]
    pub system_data: Section<SystemData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    #[must_use]
    pub fn name(&self) -> &str {
        self.public_data.name.as_str()
    }
}

/// Customer-facing product data. A key missing from the file stays missing
/// on save and an explicit `null` stays `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tagline: Field<String>,
    #[serde(
        default,
        skip_serializing_if = "Field::is_absent",
        serialize_with = "number::field"
    )]
    pub price: Field<f64>,
    /// Original BGN price, kept after conversion to EUR.
    #[serde(
        default,
        skip_serializing_if = "Field::is_absent",
        serialize_with = "number::field"
    )]
    pub price_bgn: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub currency: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub image_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub label_image: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub effects: Field<Vec<Effect>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub ingredients: Field<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub faq: Field<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub variants: Field<Vec<Variant>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub manufacturer: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub application_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub capsules_count: Field<u32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub doses_count: Field<u32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub weight_grams: Field<u32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub goals: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub target_profile: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub protocol_hint: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub safety_warnings: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub inventory: Field<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A labelled salience bar shown on the product page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub label: Field<String>,
    /// 0-100. Integral values are written back as JSON integers.
    #[serde(
        default,
        skip_serializing_if = "Field::is_absent",
        serialize_with = "number::field"
    )]
    pub value: Field<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Effect {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: Field::Value(label.into()),
            value: Field::Value(value),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Unset values count as 0.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value.copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub amount: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Field::Value(name.into()),
            amount: Field::Value(amount.into()),
            description: Field::Value(description.into()),
            extra: Map::new(),
        }
    }
}

/// A packaging option, e.g. `"Thermo Caps - 120 капсули (30 дози)"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub url: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Writes whole-number floats as JSON integers so `90` does not become `90.0`.
mod number {
    use serde::Serializer;

    use crate::field::Field;

    /// Largest magnitude an `f64` holds without losing integer precision.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    fn write<S: Serializer>(v: f64, serializer: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() && v.trunc() == v && v.abs() < MAX_EXACT {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }

    pub(super) fn field<S: Serializer>(v: &Field<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match v.copied() {
            Some(v) => write(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
