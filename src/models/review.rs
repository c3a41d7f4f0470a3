use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub comment: String,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }
}

/// Aggregate shown next to a product's reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub count: usize,
    pub average: f64,
    /// `histogram[0]` counts 1-star reviews, `histogram[4]` 5-star ones.
    pub histogram: [usize; 5],
}

impl ReviewSummary {
    /// Ratings outside 1..=5 are ignored.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut histogram = [0usize; 5];
        let mut total = 0u64;
        let mut count = 0usize;

        for review in reviews.iter().filter(|r| (1..=5).contains(&r.rating)) {
            histogram[(review.rating - 1) as usize] += 1;
            total += review.rating as u64;
            count += 1;
        }

        let average = if count == 0 {
            0.0
        } else {
            // one decimal, like the star widget shows
            ((total as f64 / count as f64) * 10.0).round() / 10.0
        };

        Self {
            count,
            average,
            histogram,
        }
    }
}
