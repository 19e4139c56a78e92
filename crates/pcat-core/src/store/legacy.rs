//! Read-only support for the legacy catalog layout.
//!
//! The old writer emitted each category indented by four spaces, closed the
//! array with a `"  ],"` line, then appended `"footer": {...}` indented by two
//! spaces, with no enclosing object. The only structural signal is that
//! whitespace convention, so this module undoes exactly that and nothing more.

use serde_json::{Map, Value};

use crate::catalog::{Catalog, Category};
use crate::error::LegacyRepairError;

/// The line that closes the category array.
const ARRAY_END: &str = "  ],";
const ARRAY_INDENT: usize = 4;
const TRAILER_INDENT: usize = 2;

/// Rebuilds a catalog from legacy text.
///
/// A trailing region that cannot be parsed leaves the footer absent; only a
/// missing or unparseable array region is an error.
pub(super) fn repair(text: &str) -> Result<Catalog, LegacyRepairError> {
    let lines: Vec<&str> = text.lines().collect();
    let end = lines
        .iter()
        .position(|l| *l == ARRAY_END)
        .ok_or(LegacyRepairError::MissingArrayEnd)?;

    let array_json = format!("[\n{}\n]", dedent(&lines[..end], ARRAY_INDENT));
    let categories: Vec<Category> = serde_json::from_str(&array_json)
        .map_err(|e| LegacyRepairError::InvalidArray(e.to_string()))?;

    let footer = trailing_footer(&lines[end..]);

    Ok(Catalog {
        categories,
        footer,
        ..Catalog::default()
    })
}

/// Strips up to `width` leading spaces from lines that carry them; blank and
/// under-indented lines pass through unchanged.
fn dedent(lines: &[&str], width: usize) -> String {
    let pad = " ".repeat(width);
    lines
        .iter()
        .map(|l| l.strip_prefix(pad.as_str()).unwrap_or(l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recovers the `footer` object from the region starting at the `],` line.
fn trailing_footer(lines: &[&str]) -> Option<Map<String, Value>> {
    let region = dedent(lines, TRAILER_INDENT);
    let rest = region.trim().strip_prefix("],")?.trim();
    if rest.is_empty() {
        return None;
    }

    // The old writer never closed the outer object; some hand-edited copies did.
    let candidates = [format!("{{{rest}}}"), format!("{{{rest}")];
    let parsed = candidates
        .iter()
        .find_map(|c| serde_json::from_str::<Map<String, Value>>(c).ok());

    match parsed {
        Some(mut trailer) => match trailer.remove("footer") {
            Some(Value::Object(footer)) => Some(footer),
            _ => {
                tracing::debug!("legacy trailer has no footer object");
                None
            }
        },
        None => {
            tracing::debug!("legacy trailer is not valid JSON; footer dropped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dedent_leaves_short_and_blank_lines_alone() {
        let out = dedent(&["    a", "  b", "", "      c"], 4);
        assert_eq!(out, "a\n  b\n\n  c");
    }

    #[test]
    fn missing_array_end_is_reported() {
        let err = repair("    {\"id\": \"x\"}\n  ]\n").unwrap_err();
        assert_eq!(err, LegacyRepairError::MissingArrayEnd);
    }

    #[test]
    fn invalid_array_region_is_reported() {
        let err = repair("    {\"id\": \n  ],\n").unwrap_err();
        assert!(matches!(err, LegacyRepairError::InvalidArray(_)));
    }

    #[test]
    fn unparseable_trailer_drops_only_the_footer() {
        let text = "    {\"id\": \"a\", \"type\": \"product_category\", \"products\": []}\n  ],\n  \"footer\": {oops\n";
        let catalog = repair(text).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        assert!(catalog.footer.is_none());
    }

    #[test]
    fn trailer_with_closing_brace_is_accepted() {
        let text = "    {\"id\": \"a\"}\n  ],\n  \"footer\": {\n    \"phone\": \"0888\"\n  }\n}\n";
        let catalog = repair(text).unwrap();
        assert_eq!(
            catalog.footer.map(Value::Object),
            Some(json!({ "phone": "0888" }))
        );
    }

    #[test]
    fn trailer_without_footer_key_yields_none() {
        let text = "    {\"id\": \"a\"}\n  ],\n  \"links\": []\n";
        let catalog = repair(text).unwrap();
        assert!(catalog.footer.is_none());
    }
}
