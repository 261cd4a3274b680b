use serde::{Deserialize, Serialize};

/// A scored recipe as returned by the recommendation backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub score: f64,
    pub image_weight: f64,
    /// Only present when the search included a text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_weight: Option<f64>,
}
