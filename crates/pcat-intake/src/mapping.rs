//! The derived product-id → images file written by image intake and read by
//! the new-product builder.
//!
//! Paths in the file are relative to the images directory
//! (`product_<id>/<file>`), so the mapping does not depend on where that
//! directory lives on disk.

use std::collections::BTreeMap;
use std::path::Path;

use pcat_core::write_json_atomic;
use serde::{Deserialize, Serialize};

use crate::IntakeError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImages {
    #[serde(default)]
    pub main: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
}

impl ProductImages {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.label.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub product_name: String,
    /// `product_<id>`, relative to the images directory.
    pub product_dir: String,
    pub images: ProductImages,
}

/// Keyed by the supplier's numeric product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageMapping(BTreeMap<String, MappingEntry>);

impl ImageMapping {
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] if the file cannot be read and
    /// [`IntakeError::MappingParse`] if it is not a mapping document.
    pub fn load(path: &Path) -> Result<Self, IntakeError> {
        let text = std::fs::read_to_string(path).map_err(|e| IntakeError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| IntakeError::MappingParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Replaces `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Catalog`] wrapping the write failure.
    pub fn save(&self, path: &Path) -> Result<(), IntakeError> {
        write_json_atomic(path, self, "image mapping")?;
        tracing::info!(path = %path.display(), products = self.0.len(), "image mapping saved");
        Ok(())
    }

    pub fn insert(&mut self, product_id: impl Into<String>, entry: MappingEntry) {
        self.0.insert(product_id.into(), entry);
    }

    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&MappingEntry> {
        self.0.get(product_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Mapping-file form of an image under `product_dir`.
#[must_use]
pub fn stored_path(product_dir: &str, file_name: &str) -> String {
    format!("{product_dir}/{file_name}")
}

/// Public link for an image path relative to the images directory.
///
/// `base` is either site-relative, giving a link with exactly one leading
/// `/`, or an absolute URL, which is used as is.
#[must_use]
pub fn image_url(base: &str, relative: &str) -> String {
    let relative = relative
        .trim_start_matches("./")
        .trim_start_matches('/')
        .replace('\\', "/");
    let base = base.trim_end_matches('/');
    if base.contains("://") {
        return format!("{base}/{relative}");
    }
    let base = base.trim_start_matches("./").trim_start_matches('/');
    if base.is_empty() {
        format!("/{relative}")
    } else {
        format!("/{base}/{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> MappingEntry {
        MappingEntry {
            product_name: name.to_string(),
            product_dir: "product_31".to_string(),
            images: ProductImages {
                main: vec!["product_31/front.jpg".to_string()],
                label: Vec::new(),
            },
        }
    }

    #[test]
    fn save_and_load_preserve_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_mapping.json");
        let mut mapping = ImageMapping::default();
        mapping.insert("31", entry("Nutrex Lipo 6"));
        mapping.save(&path).unwrap();

        let loaded = ImageMapping::load(&path).unwrap();
        assert_eq!(loaded, mapping);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value["31"]["images"]["main"][0],
            serde_json::json!("product_31/front.jpg")
        );
    }

    #[test]
    fn load_rejects_non_mapping_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_mapping.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            ImageMapping::load(&path),
            Err(IntakeError::MappingParse { .. })
        ));
    }

    #[test]
    fn site_relative_links_get_one_leading_slash() {
        for base in ["/images/products", "images/products/", "./images/products"] {
            assert_eq!(
                image_url(base, "product_1/a.png"),
                "/images/products/product_1/a.png",
                "base {base}"
            );
        }
        assert_eq!(image_url("/", "product_1/a.png"), "/product_1/a.png");
        assert_eq!(image_url("", "/product_1/a.png"), "/product_1/a.png");
    }

    #[test]
    fn absolute_base_urls_are_kept() {
        assert_eq!(
            image_url("https://cdn.example.bg/img/", "product_1\\a.png"),
            "https://cdn.example.bg/img/product_1/a.png"
        );
    }
}
