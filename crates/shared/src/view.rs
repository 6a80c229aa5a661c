use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PledgeId, PledgeRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const STAR: &str = "⭐";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Aggregates {
    pub total: usize,
    pub student_count: usize,
    pub professional_count: usize,
}

/// One page of the pledge wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub records: Vec<&'a PledgeRecord>,
    pub current_page: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    /// Page selector entries. A single page gets no selector.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages > 1 {
            (1..=self.total_pages).collect()
        } else {
            Vec::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: PledgeId,
    pub name: String,
    pub date: NaiveDate,
    pub rating: usize,
    pub stars: String,
}

impl From<&PledgeRecord> for Certificate {
    fn from(record: &PledgeRecord) -> Self {
        let rating = record.star_rating();
        Self {
            id: record.id,
            name: record.name.clone(),
            date: record.date,
            rating,
            stars: STAR.repeat(rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareMessage {
    pub const TITLE: &'static str = "My Climate Action Pledge";

    pub fn for_record(record: &PledgeRecord, url: impl Into<String>) -> Self {
        Self {
            title: Self::TITLE.to_string(),
            text: format!(
                "I pledged to take climate action! {} is cool enough to care about our planet.",
                record.name
            ),
            url: url.into(),
        }
    }

    /// Text placed on the clipboard or shown for manual copying.
    pub fn clipboard_text(&self) -> String {
        format!("{} {}", self.text, self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
    ManualCopy,
}
