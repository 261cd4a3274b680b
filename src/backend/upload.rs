use axum::extract::Multipart;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::UploadConfig;
use crate::{Error, Result};

pub const IMAGE_FIELD: &str = "image";
pub const DESCRIPTION_FIELD: &str = "description";
pub const NUM_RECIPES_FIELD: &str = "num_recipes";
pub const DESCRIPTION_CONFIRMED_FIELD: &str = "description_confirmed";

const DEFAULT_FILE_NAME: &str = "image";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded food photo
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A search request as received from a browser or the CLI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchUpload {
    pub image: Option<ImageUpload>,
    pub description: Option<String>,
    pub num_recipes: Option<String>,
    /// Set by the web form's confirm control; never forwarded
    pub description_confirmed: bool,
}

impl SearchUpload {
    /// Read every part of a multipart body.
    ///
    /// Only the first non-empty `image` part is kept and it must fit in
    /// `max_image_size`. Text fields keep their first non-empty value.
    /// Anything else is skipped.
    pub async fn from_multipart(mut multipart: Multipart, config: &UploadConfig) -> Result<Self> {
        let mut upload = SearchUpload::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                IMAGE_FIELD if upload.image.is_none() => {
                    let file_name = field
                        .file_name()
                        .filter(|n| !n.is_empty())
                        .unwrap_or(DEFAULT_FILE_NAME)
                        .to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_CONTENT_TYPE)
                        .to_string();

                    let mut data = Vec::new();
                    while let Some(chunk) = field.chunk().await? {
                        if data.len() + chunk.len() > config.max_image_size {
                            return Err(Error::UploadTooLarge(format!(
                                "image exceeds {} bytes",
                                config.max_image_size
                            )));
                        }
                        data.extend_from_slice(&chunk);
                    }

                    // Browsers send an empty file part when nothing was picked
                    if data.is_empty() {
                        continue;
                    }

                    debug!(
                        "Received image {} ({}, {} bytes)",
                        file_name,
                        content_type,
                        data.len()
                    );
                    upload.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        data,
                    });
                }
                DESCRIPTION_FIELD if upload.description.is_none() => {
                    upload.description = non_empty(field.text().await?);
                }
                NUM_RECIPES_FIELD if upload.num_recipes.is_none() => {
                    upload.num_recipes = non_empty(field.text().await?);
                }
                DESCRIPTION_CONFIRMED_FIELD => {
                    let value = field.text().await?;
                    upload.description_confirmed =
                        matches!(value.trim(), "on" | "true" | "1");
                }
                _ => {
                    debug!("Ignoring multipart field: {}", name);
                }
            }
        }

        Ok(upload)
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Build the outbound multipart payload with the same field names
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();

        if let Some(image) = self.image {
            let part = Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part(IMAGE_FIELD, part);
        }

        if let Some(description) = self.description {
            form = form.text(DESCRIPTION_FIELD, description);
        }

        if let Some(num_recipes) = self.num_recipes {
            form = form.text(NUM_RECIPES_FIELD, num_recipes);
        }

        Ok(form)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
