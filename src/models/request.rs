//! Request models for the Gemini AI API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{GenerationConfig, Part};

/// A request to the Gemini AI API.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[builder(doc)]
pub struct Request {
    /// The contents of the request, including the prompt text.
    pub contents: Vec<Content>,
    /// Optional generation settings; the model's defaults apply when absent.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// The producer of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content written by the user.
    User,
    /// Content generated by the model.
    Model,
}

/// A content object containing parts of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The producer of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Request {
    /// Creates a single-turn request whose content is made of `parts`, in order.
    ///
    /// # Arguments
    ///
    /// * `parts` - The parts of the user turn, e.g. a prompt followed by an image
    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self::builder()
            .contents(vec![Content {
                role: None,
                parts,
            }])
            .build()
    }
}
