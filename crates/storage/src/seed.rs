use chrono::NaiveDate;
use shared::domain::{PledgeId, PledgeRecord, ProfileCategory};

struct SeedRow {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    region: &'static str,
    profile: ProfileCategory,
    commitments: [&'static str; 3],
    date: (i32, u32, u32),
}

const SEED_ROWS: [SeedRow; 3] = [
    SeedRow {
        name: "Alex Johnson",
        email: "alex@example.com",
        phone: "5550101",
        region: "Assam",
        profile: ProfileCategory::Student,
        commitments: [
            "Turn off lights when not in use",
            "Walk or bike for short trips",
            "Reduce single-use plastics",
        ],
        date: (2023, 6, 10),
    },
    SeedRow {
        name: "Maria Garcia",
        email: "maria@example.com",
        phone: "5550102",
        region: "Karnataka",
        profile: ProfileCategory::WorkingProfessional,
        commitments: [
            "Use energy-efficient appliances",
            "Use public transportation weekly",
            "Recycle properly",
        ],
        date: (2023, 6, 11),
    },
    SeedRow {
        name: "James Smith",
        email: "james@example.com",
        phone: "5550103",
        region: "Manipur",
        profile: ProfileCategory::Other,
        commitments: [
            "Set thermostat 1°C higher in summer",
            "Consider electric for next vehicle",
            "Compost food waste",
        ],
        date: (2023, 6, 12),
    },
];

/// Records written when the store holds no pledges yet.
pub fn seed_records() -> Vec<PledgeRecord> {
    SEED_ROWS
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let (y, m, d) = row.date;
            PledgeRecord {
                id: PledgeId::for_position(index),
                name: row.name.to_string(),
                email: row.email.to_string(),
                phone: row.phone.to_string(),
                region: row.region.to_string(),
                profile_category: row.profile,
                commitments: row.commitments.iter().map(|c| c.to_string()).collect(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            }
        })
        .collect()
}
