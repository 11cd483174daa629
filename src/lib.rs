#![deny(missing_docs)]

//! NutriVision: analyze a meal photo with the Google Gemini AI API.
//!
//! A browser form uploads a photo and an optional description; the analyzer
//! validates the upload, prefixes the description to a fixed nutrition
//! prompt and sends both to a vision-capable Gemini model in one request.

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod web;

pub use analysis::{AnalysisOutcome, MealAnalyzer, VisionModel};
pub use client::GenerativeModel;
pub use config::{ApiKey, Settings};
pub use error::NutriVisionError;
