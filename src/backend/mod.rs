pub mod client;
pub mod models;
pub mod upload;

pub use client::{BackendClient, BackendReply};
pub use models::Recipe;
pub use upload::{ImageUpload, SearchUpload};
