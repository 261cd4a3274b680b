use askama::Template;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{Html, IntoResponse},
};
use tracing::{info, warn};

use crate::{
    api::handlers::AppState,
    backend::{Recipe, SearchUpload},
    error::Error,
    utils::validation::{MAX_NUM_RECIPES, MIN_NUM_RECIPES},
    web::form::{SearchForm, MISSING_INPUT_MESSAGE, SEARCH_FAILED_MESSAGE},
    Result,
};

/// Search page template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    description: String,
    description_confirmed: bool,
    num_recipes: u32,
    min_recipes: u32,
    max_recipes: u32,
    search_enabled: bool,
    error: Option<String>,
    results: Vec<RecipeCardData>,
}

#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeCardData {
    title: String,
    score: String,
    image_weight: String,
    text_weight: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
}

impl From<Recipe> for RecipeCardData {
    fn from(recipe: Recipe) -> Self {
        Self {
            title: recipe.title,
            score: format!("{:.4}", recipe.score),
            image_weight: recipe.image_weight.to_string(),
            text_weight: recipe.text_weight.map(|w| format!("{w:.2}")),
            ingredients: lines(&recipe.ingredients),
            instructions: lines(&recipe.instructions),
        }
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

impl IndexTemplate {
    fn for_form(form: &SearchForm) -> Self {
        Self {
            description: form.description().to_string(),
            description_confirmed: form.description_confirmed(),
            num_recipes: form.num_recipes(),
            min_recipes: MIN_NUM_RECIPES,
            max_recipes: MAX_NUM_RECIPES,
            search_enabled: form.is_ready(),
            error: None,
            results: vec![],
        }
    }

    fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    fn render_html(&self) -> Result<Html<String>> {
        Ok(Html(self.render().map_err(|e| {
            Error::Internal(format!("Template render failed: {e}"))
        })?))
    }
}

/// GET / - Search form
pub async fn index() -> Result<impl IntoResponse> {
    IndexTemplate::for_form(&SearchForm::default()).render_html()
}

/// POST /search - Form submission, rendered server-side
pub async fn search_page(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let parsed = match multipart {
        Ok(multipart) => SearchUpload::from_multipart(multipart, &state.settings.upload).await,
        Err(rejection) => Err(Error::Validation(rejection.body_text())),
    };

    let form = match parsed {
        Ok(upload) => SearchForm::from(upload),
        Err(e) => {
            warn!("Failed to read search form: {}", e.log_safe());
            return IndexTemplate::for_form(&SearchForm::default())
                .with_error(SEARCH_FAILED_MESSAGE)
                .render_html();
        }
    };

    let mut template = IndexTemplate::for_form(&form);

    if !form.is_ready() {
        return template.with_error(MISSING_INPUT_MESSAGE).render_html();
    }

    if let Err(e) = form.validate() {
        warn!("Rejected search form: {}", e.log_safe());
        return template.with_error(SEARCH_FAILED_MESSAGE).render_html();
    }

    let recipes = match state.backend.forward(form.into_upload()).await {
        Ok(reply) => reply.recipes(),
        Err(e) => Err(e),
    };

    match recipes {
        Ok(recipes) => {
            info!("Rendering {} recipes", recipes.len());
            template.results = recipes.into_iter().map(RecipeCardData::from).collect();
            template.render_html()
        }
        Err(e) => {
            warn!("Search failed: {}", e.log_safe());
            template.with_error(SEARCH_FAILED_MESSAGE).render_html()
        }
    }
}
