//! The supplier's product spreadsheet.
//!
//! Only the first worksheet is read. Its header row must name the
//! `Product`, `Image`, `Price` and `Label` columns; other columns are ignored.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use pcat_extract::product_id_from_image_url;

use crate::IntakeError;

const PRODUCT: &str = "Product";
const IMAGE: &str = "Image";
const PRICE: &str = "Price";
const LABEL: &str = "Label";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetRow {
    /// Full supplier name, e.g. `"Nutrex Lipo 6 [60 капсули]"`.
    pub product: String,
    pub image: String,
    /// Raw price cell; see `FactExtractor::parse_price`.
    pub price: String,
    pub label: String,
    /// Numeric id embedded in the image URL, when there is one.
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    rows: Vec<SpreadsheetRow>,
}

impl Spreadsheet {
    /// Reads the first worksheet of an `.xlsx`, `.xls` or `.ods` file.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Spreadsheet`] if the workbook cannot be opened
    /// or read, [`IntakeError::NoWorksheet`] if it is empty, and
    /// [`IntakeError::MissingColumn`] if a required header is absent.
    pub fn open(path: &Path) -> Result<Self, IntakeError> {
        let path_text = path.display().to_string();
        let mut workbook = open_workbook_auto(path).map_err(|source| IntakeError::Spreadsheet {
            path: path_text.clone(),
            source,
        })?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IntakeError::NoWorksheet {
                path: path_text.clone(),
            })?
            .map_err(|source| IntakeError::Spreadsheet {
                path: path_text.clone(),
                source,
            })?;

        let records = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let sheet = Self::from_records(records, &path_text)?;
        tracing::info!(path = %path_text, rows = sheet.rows.len(), "spreadsheet loaded");
        Ok(sheet)
    }

    /// Builds a sheet from text records whose first record is the header.
    ///
    /// Rows with an empty product name are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingColumn`] if a required header is absent.
    pub fn from_records<I>(records: I, source_name: &str) -> Result<Self, IntakeError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut records = records.into_iter();
        let header = records.next().unwrap_or_default();
        let column = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IntakeError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: name,
                })
        };
        let (product, image, price, label) =
            (column(PRODUCT)?, column(IMAGE)?, column(PRICE)?, column(LABEL)?);

        let rows = records
            .filter_map(|record| {
                let field = |i: usize| record.get(i).map_or("", |s| s.trim()).to_string();
                let name = field(product);
                if name.is_empty() {
                    return None;
                }
                let image = field(image);
                Some(SpreadsheetRow {
                    product: name,
                    product_id: product_id_from_image_url(&image),
                    image,
                    price: field(price),
                    label: field(label),
                })
            })
            .collect();
        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[SpreadsheetRow] {
        &self.rows
    }

    /// First row whose product name contains `term`, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, term: &str) -> Option<&SpreadsheetRow> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|r| r.product.to_lowercase().contains(&term))
    }

    /// First row whose image URL carries `product_id`.
    #[must_use]
    pub fn find_by_product_id(&self, product_id: &str) -> Option<&SpreadsheetRow> {
        self.rows
            .iter()
            .find(|r| r.product_id.as_deref() == Some(product_id))
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "spreadsheet_test.rs"]
mod tests;
