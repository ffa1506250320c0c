//! Educational resources curated for patients.

use crate::error::{Result, require};
use serde::{Deserialize, Serialize};

/// Format of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Written article.
    #[default]
    Article,
    /// Video.
    Video,
    /// Downloadable PDF.
    Pdf,
    /// Website.
    Website,
    /// Anything else.
    Other,
}

/// A linked learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Title shown as the link text.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Resource format.
    pub kind: ResourceKind,
    /// Target URL.
    pub link: String,
    /// Who shared it.
    pub posted_by: String,
    /// Optional illustration path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Session-scoped list of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceHub {
    resources: Vec<Resource>,
}

impl ResourceHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with the curated resources.
    pub fn seeded() -> Self {
        let curated = [
            (
                "Understanding Hypertension",
                "A beginner-friendly guide to managing high blood pressure.",
                ResourceKind::Article,
                "https://www.heart.org/en/health-topics/high-blood-pressure",
                "Dr. Smith",
                "assets/HighBloodPressure.png",
            ),
            (
                "Diabetes & Nutrition",
                "Learn how to manage diabetes through diet and exercise.",
                ResourceKind::Video,
                "https://www.youtube.com/watch?v=wZAjVQWbMlE",
                "Dr. Maria Tan",
                "assets/Diabetes.png",
            ),
            (
                "Asthma Action Plan",
                "Download a printable asthma management plan.",
                ResourceKind::Pdf,
                "https://www.cdc.gov/asthma/action-plan/documents/asthma-action-plan-508.pdf",
                "Nurse Alex",
                "assets/Asthma.png",
            ),
        ];

        Self {
            resources: curated
                .into_iter()
                .map(|(title, description, kind, link, posted_by, image)| Resource {
                    title: title.into(),
                    description: description.into(),
                    kind,
                    link: link.into(),
                    posted_by: posted_by.into(),
                    image: Some(image.into()),
                })
                .collect(),
        }
    }

    /// Add a resource. Title and link are required.
    pub fn submit(&mut self, resource: Resource) -> Result<&Resource> {
        require("title", &resource.title)?;
        require("link", &resource.link)?;
        self.resources.push(resource);
        Ok(&self.resources[self.resources.len() - 1])
    }

    /// Resources in submission order.
    pub fn list(&self) -> &[Resource] {
        &self.resources
    }
}
