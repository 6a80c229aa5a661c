//! Read side of the pledge list: counters, filtering, pagination and the
//! per-record certificate, plus the sharing chain.

use shared::{
    domain::{PledgeRecord, ProfileCategory, Selection},
    view::{Aggregates, Certificate, Page, DEFAULT_PAGE_SIZE},
};

pub mod share;

pub use share::{ClipboardShare, ManualPrompt, NativeShare, ShareChain, ShareProvider};

pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a PledgeRecord>) -> Aggregates {
    records
        .into_iter()
        .fold(Aggregates::default(), |mut counts, record| {
            counts.total += 1;
            match record.profile_category {
                ProfileCategory::Student => counts.student_count += 1,
                ProfileCategory::WorkingProfessional => counts.professional_count += 1,
                ProfileCategory::Other => {}
            }
            counts
        })
}

/// Records matching both selections, in their original order.
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a PledgeRecord>,
    profile: &Selection<ProfileCategory>,
    region: &Selection<String>,
) -> Vec<&'a PledgeRecord> {
    records
        .into_iter()
        .filter(|record| profile.matches(&record.profile_category) && region.matches(&record.region))
        .collect()
}

/// 1-indexed page of `page_size` records. Pages outside `1..=total_pages`
/// come back empty rather than as an error.
pub fn paginate<'a>(records: &[&'a PledgeRecord], page: usize, page_size: usize) -> Page<'a> {
    let total_pages = if page_size == 0 {
        0
    } else {
        records.len().div_ceil(page_size)
    };

    let start = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size));
    let page_records = match start {
        Some(start) if start < records.len() => {
            let end = start.saturating_add(page_size).min(records.len());
            records[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Page {
        records: page_records,
        current_page: page,
        total_pages,
    }
}

pub fn certificate(record: &PledgeRecord) -> Certificate {
    Certificate::from(record)
}

/// Filter and page selection of the wall. Changing a filter returns to the
/// first page; only explicit page changes move off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallState {
    profile: Selection<ProfileCategory>,
    region: Selection<String>,
    page: usize,
    page_size: usize,
}

impl Default for WallState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl WallState {
    pub fn new(page_size: usize) -> Self {
        Self {
            profile: Selection::All,
            region: Selection::All,
            page: 1,
            page_size,
        }
    }

    pub fn set_filters(&mut self, profile: Selection<ProfileCategory>, region: Selection<String>) {
        self.profile = profile;
        self.region = region;
        self.page = 1;
    }

    pub fn goto_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn profile(&self) -> &Selection<ProfileCategory> {
        &self.profile
    }

    pub fn region(&self) -> &Selection<String> {
        &self.region
    }

    pub fn view<'a>(&self, records: &'a [PledgeRecord]) -> Page<'a> {
        let matching = filter(records, &self.profile, &self.region);
        paginate(&matching, self.page, self.page_size)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
