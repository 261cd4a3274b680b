use crate::backend::{ImageUpload, Recipe, SearchUpload};
use crate::utils::validation::{clamp_num_recipes, image_content_type};
use crate::{Error, Result};
use reqwest::Client;
use std::path::Path;

/// Build the upload the CLI sends. An image, a description or both are
/// required; the recipe count is clamped to the same range as the web form.
pub async fn build_upload(
    image: Option<&Path>,
    description: Option<String>,
    num_recipes: Option<u32>,
) -> Result<SearchUpload> {
    let description = description.filter(|d| !d.trim().is_empty());

    if image.is_none() && description.is_none() {
        return Err(Error::Validation(
            "Please provide an image or a description".to_string(),
        ));
    }

    let image = match image {
        Some(path) => {
            let content_type = image_content_type(path)?;
            let data = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image")
                .to_string();

            Some(ImageUpload {
                file_name,
                content_type: content_type.to_string(),
                data,
            })
        }
        None => None,
    };

    let num_recipes = clamp_num_recipes(num_recipes.map(|n| n.to_string()).as_deref());

    Ok(SearchUpload {
        image,
        description_confirmed: description.is_some(),
        description,
        num_recipes: Some(num_recipes.to_string()),
    })
}

/// Search for recipes through a running server's proxy route
pub async fn search(
    server_url: &str,
    image: Option<&Path>,
    description: Option<String>,
    num_recipes: Option<u32>,
) -> Result<()> {
    let upload = build_upload(image, description, num_recipes).await?;

    let client = Client::new();
    let url = format!("{}/api/search", server_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .multipart(upload.into_form()?)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::Backend(response.status()));
    }

    let recipes: Vec<Recipe> = response.json().await?;

    print_recipes(&recipes);

    Ok(())
}

fn print_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }

    println!("\nRecommended recipes ({}):\n", recipes.len());

    for (i, recipe) in recipes.iter().enumerate() {
        println!("{}. {}", i + 1, recipe.title);
        println!("   Similarity Score: {:.4}", recipe.score);
        println!("   Image Weight: {}", recipe.image_weight);
        if let Some(text_weight) = recipe.text_weight {
            println!("   Text Weight: {text_weight:.2}");
        }

        println!("   Ingredients:");
        for line in recipe.ingredients.lines() {
            println!("     {line}");
        }

        println!("   Instructions:");
        for line in recipe.instructions.lines() {
            println!("     {line}");
        }
        println!();
    }
}
