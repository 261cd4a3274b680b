// Validation utilities
use crate::error::{Error, Result};
use std::path::Path;
use tracing::warn;

pub const MIN_NUM_RECIPES: u32 = 1;
pub const MAX_NUM_RECIPES: u32 = 12;
pub const DEFAULT_NUM_RECIPES: u32 = 5;

/// Image types the search form accepts
const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

/// Validate that an uploaded image is a JPEG or PNG.
///
/// Some browsers send `application/octet-stream`, so the file extension is
/// accepted as a fallback.
pub fn validate_image(content_type: &str, file_name: &str) -> Result<()> {
    let content_type = content_type.to_lowercase();
    if ALLOWED_IMAGE_TYPES
        .iter()
        .any(|allowed| content_type.starts_with(allowed))
    {
        return Ok(());
    }

    if image_extension_allowed(Path::new(file_name)) {
        return Ok(());
    }

    warn!(
        "Rejected upload {} with content type {}",
        file_name, content_type
    );
    Err(Error::Validation(format!(
        "Unsupported image type: {content_type}. Must be JPEG or PNG"
    )))
}

fn image_extension_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Content type for an image file on disk, judged by extension
pub fn image_content_type(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        _ => Err(Error::Validation(format!(
            "Unsupported image file: {}. Must be .jpg, .jpeg or .png",
            path.display()
        ))),
    }
}

/// Parse a requested recipe count, clamped to the range the form offers.
/// Missing or unparseable values fall back to the default.
pub fn clamp_num_recipes(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|n| n.clamp(MIN_NUM_RECIPES, MAX_NUM_RECIPES))
        .unwrap_or(DEFAULT_NUM_RECIPES)
}
