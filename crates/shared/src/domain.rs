use serde::{Deserialize, Serialize};

/// A favourite-thing article. The title doubles as the identity key for
/// list operations within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Ordered paragraphs.
    pub description: Vec<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "imageAlt")]
    pub image_alt: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        description: Vec<String>,
        image_url: impl Into<String>,
        image_alt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            image_url: image_url.into(),
            image_alt: image_alt.into(),
        }
    }
}
