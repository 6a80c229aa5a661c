use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric base that pledge ids count up from.
pub const PLEDGE_ID_BASE: u64 = 1000;
const PLEDGE_ID_PREFIX: &str = "PLEDGE";

/// Upper bound of the star rating shown on a certificate.
pub const MAX_STAR_RATING: usize = 5;

/// Commitments offered by the pledge form.
pub const COMMITMENT_CHECKLIST: &[&str] = &[
    "Turn off lights when not in use",
    "Use energy-efficient appliances",
    "Set thermostat 1°C higher in summer",
    "Walk or bike for short trips",
    "Use public transportation weekly",
    "Consider electric for next vehicle",
    "Reduce single-use plastics",
    "Recycle properly",
    "Compost food waste",
];

/// Regions offered by the pledge form.
pub const REGIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainParseError {
    #[error("invalid pledge id {0:?}: expected PLEDGE followed by a number")]
    PledgeId(String),
    #[error("unknown profile category {0:?}")]
    ProfileCategory(String),
}

/// `PLEDGE` + number. Serialized as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PledgeId(pub u64);

impl PledgeId {
    /// Id of the record that lands at `index` in insertion order.
    pub fn for_position(index: usize) -> Self {
        Self(PLEDGE_ID_BASE + index as u64 + 1)
    }
}

impl fmt::Display for PledgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PLEDGE_ID_PREFIX}{}", self.0)
    }
}

impl FromStr for PledgeId {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(PLEDGE_ID_PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| DomainParseError::PledgeId(s.to_string()))
    }
}

impl TryFrom<String> for PledgeId {
    type Error = DomainParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PledgeId> for String {
    fn from(value: PledgeId) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileCategory {
    Student,
    #[serde(rename = "Working Professional", alias = "WorkingProfessional")]
    WorkingProfessional,
    Other,
}

impl ProfileCategory {
    pub const ALL: [ProfileCategory; 3] = [
        ProfileCategory::Student,
        ProfileCategory::WorkingProfessional,
        ProfileCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileCategory::Student => "Student",
            ProfileCategory::WorkingProfessional => "Working Professional",
            ProfileCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ProfileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProfileCategory {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "student" => Ok(ProfileCategory::Student),
            "workingprofessional" | "professional" => Ok(ProfileCategory::WorkingProfessional),
            "other" => Ok(ProfileCategory::Other),
            _ => Err(DomainParseError::ProfileCategory(s.to_string())),
        }
    }
}

/// Either every value, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::Only)
    }
}

/// One stored submission. Field names on the wire match the existing
/// `climatePledges` blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeRecord {
    pub id: PledgeId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "state", alias = "region")]
    pub region: String,
    #[serde(rename = "profile", alias = "profileCategory")]
    pub profile_category: ProfileCategory,
    pub commitments: Vec<String>,
    pub date: NaiveDate,
}

impl PledgeRecord {
    /// `min(commitments, 5)`; at least 1 for any record that passed validation.
    pub fn star_rating(&self) -> usize {
        self.commitments.len().min(MAX_STAR_RATING)
    }
}

/// Form payload before an id and date are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PledgeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region: String,
    pub profile_category: ProfileCategory,
    pub commitments: Vec<String>,
}

impl PledgeDraft {
    pub fn into_record(self, id: PledgeId, date: NaiveDate) -> PledgeRecord {
        PledgeRecord {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            region: self.region,
            profile_category: self.profile_category,
            commitments: self.commitments,
            date,
        }
    }
}

pub fn is_known_commitment(value: &str) -> bool {
    COMMITMENT_CHECKLIST.contains(&value)
}

pub fn is_known_region(value: &str) -> bool {
    REGIONS.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pledge_id_round_trips_through_display() {
        let id = PledgeId::for_position(3);
        assert_eq!(id.to_string(), "PLEDGE1004");
        assert_eq!("PLEDGE1004".parse::<PledgeId>().expect("parse"), id);
    }

    #[test]
    fn rejects_malformed_pledge_ids() {
        assert!("1004".parse::<PledgeId>().is_err());
        assert!("PLEDGE".parse::<PledgeId>().is_err());
        assert!("PLEDGEabc".parse::<PledgeId>().is_err());
    }

    #[test]
    fn profile_category_parses_cli_and_wire_spellings() {
        for raw in ["Working Professional", "working-professional", "WorkingProfessional", "professional"] {
            assert_eq!(
                raw.parse::<ProfileCategory>().expect("parse"),
                ProfileCategory::WorkingProfessional
            );
        }
        assert_eq!("STUDENT".parse::<ProfileCategory>().expect("parse"), ProfileCategory::Student);
        assert!("teacher".parse::<ProfileCategory>().is_err());
    }

    #[test]
    fn record_uses_browser_field_names_on_the_wire() {
        let record = PledgeRecord {
            id: PledgeId(1001),
            name: "Alex".into(),
            email: "alex@example.com".into(),
            phone: "5550101".into(),
            region: "Assam".into(),
            profile_category: ProfileCategory::WorkingProfessional,
            commitments: vec!["Recycle properly".into()],
            date: NaiveDate::from_ymd_opt(2023, 6, 10).expect("date"),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["id"], "PLEDGE1001");
        assert_eq!(value["state"], "Assam");
        assert_eq!(value["profile"], "Working Professional");
        assert_eq!(value["date"], "2023-06-10");
    }

    #[test]
    fn record_accepts_spec_style_aliases() {
        let raw = r#"{
            "id": "PLEDGE1009",
            "name": "Sam",
            "email": "sam@example.com",
            "phone": "1",
            "region": "Goa",
            "profileCategory": "WorkingProfessional",
            "commitments": ["Compost food waste"],
            "date": "2024-01-02"
        }"#;
        let record: PledgeRecord = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(record.region, "Goa");
        assert_eq!(record.profile_category, ProfileCategory::WorkingProfessional);
    }

    #[test]
    fn selection_all_matches_everything() {
        let all: Selection<String> = "all".parse().expect("parse");
        assert!(all.matches(&"Assam".to_string()));
        let only: Selection<String> = "Assam".parse().expect("parse");
        assert!(only.matches(&"Assam".to_string()));
        assert!(!only.matches(&"assam".to_string()));
    }

    #[test]
    fn star_rating_caps_at_five() {
        let mut record = PledgeDraft {
            name: "n".into(),
            email: "e".into(),
            phone: "p".into(),
            region: "Goa".into(),
            profile_category: ProfileCategory::Other,
            commitments: COMMITMENT_CHECKLIST.iter().map(|c| c.to_string()).collect(),
        }
        .into_record(PledgeId(1001), NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
        assert_eq!(record.star_rating(), 5);
        record.commitments.truncate(2);
        assert_eq!(record.star_rating(), 2);
    }
}
