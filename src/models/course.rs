use serde::{Deserialize, Serialize};

use super::Document;

/// Colour theme of a course card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Purple,
    Green,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub id: String,
    pub category: String,
    pub badge: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub extra_info: String,
    pub accent: Accent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub featured: bool,
}

impl Document for Course {
    const COLLECTION: &'static str = "courses";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: Option<String>) {
        self.key = key;
    }

    fn logical_key(&self) -> &str {
        &self.id
    }
}
