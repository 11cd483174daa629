use std::fmt;

/// The model method a request is addressed to.
#[derive(Debug, Copy, Clone)]
pub enum RequestType {
    /// A request to generate content.
    GenerateContent,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerateContent => write!(f, "generateContent"),
        }
    }
}
