//! Supplier image archives (`f1_b2b_<id>.zip`).
//!
//! Each archive's images are copied flat into `<images_dir>/product_<id>/`
//! and sorted into main and label shots by file name.

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use pcat_extract::archive_product_id;
use zip::ZipArchive;

use crate::mapping::{stored_path, ImageMapping, MappingEntry, ProductImages};
use crate::spreadsheet::Spreadsheet;
use crate::IntakeError;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Main,
    Label,
}

/// `Label` when the file name contains one of `keywords`, ignoring case.
#[must_use]
pub fn classify(file_name: &str, keywords: &[String]) -> ImageKind {
    let lower = file_name.to_lowercase();
    if keywords.iter().any(|k| lower.contains(&k.to_lowercase())) {
        ImageKind::Label
    } else {
        ImageKind::Main
    }
}

/// A recognised archive in the products directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierArchive {
    pub product_id: String,
    pub path: PathBuf,
}

/// Lists `*.zip` files in `dir`, sorted by name. Archives without a
/// recognisable product id are skipped with a warning.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if the directory cannot be listed.
pub fn find_archives(dir: &Path) -> Result<Vec<SupplierArchive>, IntakeError> {
    let mut archives = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| IntakeError::io(dir, e))? {
        let path = entry.map_err(|e| IntakeError::io(dir, e))?.path();
        if path.extension().and_then(OsStr::to_str) != Some("zip") {
            continue;
        }
        let name = path.file_name().and_then(OsStr::to_str).unwrap_or_default();
        match archive_product_id(name) {
            Some(product_id) => archives.push(SupplierArchive { product_id, path }),
            None => tracing::warn!(path = %path.display(), "archive name has no product id; skipped"),
        }
    }
    archives.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(archives)
}

/// Copies the image members of `archive` into `dest`, flattening any
/// directory structure, and returns the written paths by kind.
///
/// # Errors
///
/// Returns [`IntakeError::Archive`] for an unreadable archive and
/// [`IntakeError::Io`] if `dest` or a member file cannot be written.
pub fn extract_images(
    archive: &Path,
    dest: &Path,
    label_keywords: &[String],
) -> Result<Vec<(ImageKind, PathBuf)>, IntakeError> {
    let zip_err = |source| IntakeError::Archive {
        path: archive.display().to_string(),
        source,
    };
    let file = File::open(archive).map_err(|e| IntakeError::io(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(zip_err)?;
    std::fs::create_dir_all(dest).map_err(|e| IntakeError::io(dest, e))?;

    let mut written: Vec<(ImageKind, PathBuf)> = Vec::new();
    for i in 0..zip.len() {
        let mut member = zip.by_index(i).map_err(zip_err)?;
        if member.is_dir() {
            continue;
        }
        // Only the final component is used, so member names cannot escape `dest`.
        let Some(file_name) = Path::new(member.name())
            .file_name()
            .and_then(OsStr::to_str)
            .map(str::to_string)
        else {
            continue;
        };
        if !is_image(&file_name) {
            continue;
        }

        let target = dest.join(&file_name);
        let mut out = File::create(&target).map_err(|e| IntakeError::io(&target, e))?;
        std::io::copy(&mut member, &mut out).map_err(|e| IntakeError::io(&target, e))?;

        if !written.iter().any(|(_, p)| *p == target) {
            written.push((classify(&file_name, label_keywords), target));
        }
    }
    Ok(written)
}

fn is_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Result of one intake run.
#[derive(Debug, Default)]
pub struct ImageIntake {
    pub mapping: ImageMapping,
    /// Archives that could not be extracted, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Extracts every supplier archive in `products_dir` into `images_dir` and
/// builds the image mapping, with paths relative to `images_dir`.
///
/// Names come from the spreadsheet row with the same product id; without
/// one the name falls back to `product_<id>`. A broken archive is logged,
/// recorded in [`ImageIntake::failed`], and skipped.
///
/// # Errors
///
/// Returns [`IntakeError::Io`] if `products_dir` cannot be listed.
pub fn intake_images(
    products_dir: &Path,
    images_dir: &Path,
    spreadsheet: Option<&Spreadsheet>,
    label_keywords: &[String],
) -> Result<ImageIntake, IntakeError> {
    let mut intake = ImageIntake::default();

    for archive in find_archives(products_dir)? {
        let dir_name = format!("product_{}", archive.product_id);
        let dest = images_dir.join(&dir_name);

        let written = match extract_images(&archive.path, &dest, label_keywords) {
            Ok(written) => written,
            Err(e) => {
                tracing::warn!(path = %archive.path.display(), error = %e, "archive skipped");
                intake.failed.push((archive.path, e.to_string()));
                continue;
            }
        };

        let product_name = match spreadsheet.and_then(|s| s.find_by_product_id(&archive.product_id)) {
            Some(row) => row.product.clone(),
            None => {
                tracing::warn!(product_id = %archive.product_id, "no spreadsheet row for archive");
                dir_name.clone()
            }
        };

        let mut images = ProductImages::default();
        for (kind, path) in written {
            let Some(file_name) = path.file_name() else {
                continue;
            };
            let stored = stored_path(&dir_name, &file_name.to_string_lossy());
            match kind {
                ImageKind::Main => images.main.push(stored),
                ImageKind::Label => images.label.push(stored),
            }
        }
        tracing::info!(
            product_id = %archive.product_id,
            main = images.main.len(),
            label = images.label.len(),
            "archive extracted"
        );

        intake.mapping.insert(
            archive.product_id,
            MappingEntry {
                product_name,
                product_dir: dir_name,
                images,
            },
        );
    }
    Ok(intake)
}

#[cfg(test)]
#[path = "archives_test.rs"]
mod tests;
