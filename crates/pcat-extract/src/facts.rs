//! Best-effort facts pulled out of free-text product names and price cells.
//!
//! Everything here is advisory. The first match wins and `None` means
//! "unknown", never "invalid"; callers decide what to do with gaps.

use std::sync::LazyLock;

use pcat_core::Rules;
use regex::Regex;

use crate::ExtractError;

static IMAGE_URL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/p(\d+)/").expect("valid regex"));

static ARCHIVE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"f1_b2b_(\d+)\.zip").expect("valid regex"));

pub const CAPSULES_APPLICATION: &str = "Oral / Capsules";
pub const POWDER_APPLICATION: &str = "Oral / Powder";

/// Counts and manufacturer recognised in one product name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFacts {
    pub capsules: Option<u32>,
    pub doses: Option<u32>,
    pub grams: Option<u32>,
    pub manufacturer: Option<String>,
}

/// Name and price parser built from the configured word lists.
#[derive(Debug, Clone)]
pub struct FactExtractor {
    capsules: Regex,
    doses: Regex,
    grams: Regex,
    manufacturers: Vec<String>,
    price_suffixes: Vec<String>,
}

impl FactExtractor {
    /// Compiles the unit patterns from `rules`.
    ///
    /// Capsule and gram counts must sit right after a `[`, as in
    /// `"Thermo Caps [120 капсули]"`; dose counts may appear anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Pattern`] if a unit pattern fails to compile.
    pub fn new(rules: &Rules) -> Result<Self, ExtractError> {
        Ok(Self {
            capsules: compile("capsules", &unit_pattern(true, &rules.units.capsules))?,
            doses: compile("doses", &unit_pattern(false, &rules.units.doses))?,
            grams: compile("grams", &unit_pattern(true, &rules.units.grams))?,
            manufacturers: rules.manufacturers.clone(),
            price_suffixes: rules.price_suffixes.clone(),
        })
    }

    #[must_use]
    pub fn extract(&self, name: &str) -> ProductFacts {
        ProductFacts {
            capsules: self.capsules(name),
            doses: self.doses(name),
            grams: self.grams(name),
            manufacturer: self.manufacturer(name).map(str::to_string),
        }
    }

    #[must_use]
    pub fn capsules(&self, name: &str) -> Option<u32> {
        first_count(&self.capsules, name)
    }

    #[must_use]
    pub fn doses(&self, name: &str) -> Option<u32> {
        first_count(&self.doses, name)
    }

    #[must_use]
    pub fn grams(&self, name: &str) -> Option<u32> {
        first_count(&self.grams, name)
    }

    /// First configured manufacturer found in the name before its first `[`.
    ///
    /// List order is priority order, so `"RAW Nutrition"` must precede `"RAW"`.
    #[must_use]
    pub fn manufacturer(&self, name: &str) -> Option<&str> {
        let head = name_head(name);
        self.manufacturers
            .iter()
            .find(|m| head.contains(m.as_str()))
            .map(String::as_str)
    }

    /// Storefront name: the part before the first `[`, without the
    /// manufacturer.
    #[must_use]
    pub fn display_name(&self, name: &str, manufacturer: Option<&str>) -> String {
        let head = name_head(name).trim();
        match manufacturer {
            Some(m) if !m.is_empty() && head.contains(m) => head.replace(m, "").trim().to_string(),
            _ => head.to_string(),
        }
    }

    /// Parses a spreadsheet price cell such as `"45,90 лв."`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPrice`] when the cell is empty or is not
    /// a finite number once the currency suffix is removed.
    pub fn parse_price(&self, cell: &str) -> Result<f64, ExtractError> {
        let invalid = |reason: String| ExtractError::InvalidPrice {
            raw: cell.to_string(),
            reason,
        };

        let mut text = cell.trim();
        if let Some(stripped) = self
            .price_suffixes
            .iter()
            .find_map(|s| text.strip_suffix(s.as_str()))
        {
            text = stripped.trim_end();
        }
        let normalized = text.replace(',', ".");
        if normalized.is_empty() {
            return Err(invalid("empty cell".to_string()));
        }

        let value: f64 = normalized.parse().map_err(|e| invalid(format!("{e}")))?;
        if !value.is_finite() {
            return Err(invalid("not a finite number".to_string()));
        }
        Ok(value)
    }

    /// [`parse_price`](Self::parse_price) with the unknown-price default of `0.0`.
    #[must_use]
    pub fn price_or_zero(&self, cell: &str) -> f64 {
        self.parse_price(cell).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable price; using 0.0");
            0.0
        })
    }
}

/// Numeric product id embedded in a supplier image URL (`.../p24527/...`).
#[must_use]
pub fn product_id_from_image_url(url: &str) -> Option<String> {
    capture(&IMAGE_URL_ID, url)
}

/// Numeric product id of a supplier image archive (`f1_b2b_24527.zip`).
#[must_use]
pub fn archive_product_id(file_name: &str) -> Option<String> {
    capture(&ARCHIVE_ID, file_name)
}

#[must_use]
pub fn application_type(facts: &ProductFacts) -> &'static str {
    if facts.capsules.is_some() {
        CAPSULES_APPLICATION
    } else {
        POWDER_APPLICATION
    }
}

fn unit_pattern(bracketed: bool, words: &[String]) -> String {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let open = if bracketed { r"\[" } else { "" };
    format!(r"(?i){open}(\d+)\s*(?:{alternation})")
}

fn compile(what: &'static str, pattern: &str) -> Result<Regex, ExtractError> {
    Regex::new(pattern).map_err(|source| ExtractError::Pattern { what, source })
}

fn first_count(re: &Regex, name: &str) -> Option<u32> {
    re.captures(name)?.get(1)?.as_str().parse().ok()
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    Some(re.captures(text)?.get(1)?.as_str().to_string())
}

fn name_head(name: &str) -> &str {
    name.split_once('[').map_or(name, |(head, _)| head)
}

#[cfg(test)]
#[path = "facts_test.rs"]
mod tests;
