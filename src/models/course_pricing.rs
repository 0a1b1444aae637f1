use serde::{Deserialize, Serialize};

use super::Document;

/// Colour theme of a pricing card. A superset of [`Accent`](super::Accent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingAccent {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursePricing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Logical course id, equal to `Course::id`.
    pub id: String,
    pub plan_name: String,
    pub category: String,
    pub original_price: f64,
    pub current_price: f64,
    pub installment_price: f64,
    pub installment_months: u32,
    pub discount: String,
    pub duration: String,
    pub extra: String,
    pub description: String,
    pub features: Vec<String>,
    pub highlighted: bool,
    pub accent: PricingAccent,
    pub badge: String,
    pub cta: String,
    pub popular: bool,
}

impl Document for CoursePricing {
    const COLLECTION: &'static str = "course_pricing";

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
