//! Search form state shared by the rendered page and its submission handler

use crate::backend::SearchUpload;
use crate::utils::validation::{clamp_num_recipes, validate_image};
use crate::Result;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload an image or enter a description";
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching for recipes. Please try again.";

/// A submitted search form
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    upload: SearchUpload,
}

impl From<SearchUpload> for SearchForm {
    fn from(upload: SearchUpload) -> Self {
        Self { upload }
    }
}

impl SearchForm {
    /// Description text as typed, confirmed or not
    pub fn description(&self) -> &str {
        self.upload.description.as_deref().unwrap_or_default()
    }

    pub fn description_confirmed(&self) -> bool {
        self.upload.description_confirmed && self.upload.description.is_some()
    }

    pub fn num_recipes(&self) -> u32 {
        clamp_num_recipes(self.upload.num_recipes.as_deref())
    }

    /// Searching needs an image or a confirmed description
    pub fn is_ready(&self) -> bool {
        self.upload.has_image() || self.description_confirmed()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(image) = &self.upload.image {
            validate_image(&image.content_type, &image.file_name)?;
        }
        Ok(())
    }

    /// The payload to forward: unconfirmed descriptions are left out and the
    /// recipe count is always sent
    pub fn into_upload(self) -> SearchUpload {
        let description_confirmed = self.description_confirmed();
        let num_recipes = self.num_recipes();
        let upload = self.upload;

        SearchUpload {
            description: upload.description.filter(|_| description_confirmed),
            num_recipes: Some(num_recipes.to_string()),
            description_confirmed,
            image: upload.image,
        }
    }
}
