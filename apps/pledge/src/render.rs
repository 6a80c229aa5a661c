use std::{fmt::Write as _, fs, path::Path};

use anyhow::Context;
use shared::view::{Aggregates, Certificate, Page, STAR};

/// File name used by `certificate --output` when no path is given.
pub const DEFAULT_CERTIFICATE_FILE: &str = "climate-pledge-certificate.txt";

const HEADERS: [&str; 6] = ["ID", "Name", "Date", "Region", "Profile", "Rating"];

pub fn wall_table(page: &Page<'_>) -> String {
    let rows: Vec<[String; 5]> = page
        .records
        .iter()
        .map(|record| {
            [
                record.id.to_string(),
                record.name.clone(),
                record.date.to_string(),
                record.region.clone(),
                record.profile_category.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = std::array::from_fn(|i| HEADERS[i].chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, header) in HEADERS[..5].iter().enumerate() {
        let _ = write!(out, "{header:<width$}  ", width = widths[i]);
    }
    let _ = writeln!(out, "{}", HEADERS[5]);

    if rows.is_empty() {
        let _ = writeln!(out, "(no pledges on this page)");
    }
    for (row, record) in rows.iter().zip(&page.records) {
        for (cell, width) in row.iter().zip(widths) {
            let _ = write!(out, "{cell:<width$}  ");
        }
        let _ = writeln!(out, "{}", STAR.repeat(record.star_rating()));
    }

    let selector = page_selector(page);
    if !selector.is_empty() {
        let _ = writeln!(out, "\nPages: {selector}");
    }
    out
}

/// `1 [2] 3`, current page in brackets.
pub fn page_selector(page: &Page<'_>) -> String {
    page.page_numbers()
        .into_iter()
        .map(|n| {
            if n == page.current_page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn stats(aggregates: &Aggregates) -> String {
    format!(
        "Pledges achieved:           {}\nStudent pledges:            {}\nProfessional pledges:       {}\n",
        aggregates.total, aggregates.student_count, aggregates.professional_count
    )
}

pub fn certificate_panel(certificate: &Certificate) -> String {
    format!(
        "Certificate of Climate Action\n\
         This certifies that {name} has pledged to take climate action.\n\
         Date:      {date}\n\
         Pledge ID: {id}\n\
         Rating:    {stars}\n",
        name = certificate.name,
        date = certificate.date,
        id = certificate.id,
        stars = certificate.stars,
    )
}

/// Saves the certificate as the text panel, or as JSON when `json` is set.
pub fn write_certificate(path: &Path, certificate: &Certificate, json: bool) -> anyhow::Result<()> {
    let body = if json {
        let mut body = serde_json::to_string_pretty(certificate)?;
        body.push('\n');
        body
    } else {
        certificate_panel(certificate)
    };
    fs::write(path, body)
        .with_context(|| format!("failed to write certificate '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::domain::{PledgeId, PledgeRecord, ProfileCategory};

    fn record(id: u64) -> PledgeRecord {
        PledgeRecord {
            id: PledgeId(id),
            name: "Alex Johnson".into(),
            email: "alex@example.com".into(),
            phone: "5550101".into(),
            region: "Assam".into(),
            profile_category: ProfileCategory::WorkingProfessional,
            commitments: vec!["a".into(), "b".into()],
            date: NaiveDate::from_ymd_opt(2023, 6, 10).expect("date"),
        }
    }

    #[test]
    fn table_lists_rows_and_stars() {
        let first = record(1001);
        let page = Page {
            records: vec![&first],
            current_page: 1,
            total_pages: 1,
        };
        let table = wall_table(&page);
        assert!(table.starts_with("ID"));
        assert!(table.contains("PLEDGE1001"));
        assert!(table.contains("Working Professional"));
        assert!(table.contains("⭐⭐"));
        assert!(!table.contains("Pages:"));
    }

    #[test]
    fn selector_brackets_current_page() {
        let page = Page {
            records: Vec::new(),
            current_page: 2,
            total_pages: 3,
        };
        assert_eq!(page_selector(&page), "1 [2] 3");
        assert!(wall_table(&page).contains("(no pledges on this page)"));
    }

    #[test]
    fn certificate_panel_shows_identity_and_rating() {
        let cert = Certificate::from(&record(1004));
        let panel = certificate_panel(&cert);
        assert!(panel.contains("Alex Johnson"));
        assert!(panel.contains("PLEDGE1004"));
        assert!(panel.contains("2023-06-10"));
    }

    #[test]
    fn certificate_is_written_as_panel_or_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cert = Certificate::from(&record(1004));

        let text_path = dir.path().join(DEFAULT_CERTIFICATE_FILE);
        write_certificate(&text_path, &cert, false).expect("write panel");
        assert_eq!(
            fs::read_to_string(&text_path).expect("read panel"),
            certificate_panel(&cert)
        );

        let json_path = dir.path().join("certificate.json");
        write_certificate(&json_path, &cert, true).expect("write json");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).expect("read json"))
                .expect("json");
        assert_eq!(value["id"], "PLEDGE1004");
        assert_eq!(value["name"], "Alex Johnson");
    }

    #[test]
    fn certificate_write_failure_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("certificate.txt");
        let err = write_certificate(&path, &Certificate::from(&record(1001)), false)
            .expect_err("parent directory does not exist");
        assert!(format!("{err:#}").contains("failed to write certificate"));
    }
}
