use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::scoring::AdmissionChance;

/// Vacancy as returned by the listing provider. Every field is optional upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "posisi", default)]
    pub position: Option<String>,
    #[serde(rename = "perusahaan", default)]
    pub company: Option<CompanyRecord>,
    #[serde(rename = "jumlah_kuota", default)]
    pub quota: Option<Value>,
    #[serde(rename = "jumlah_terdaftar", default)]
    pub registered: Option<Value>,
    /// JSON text holding `[{ "title": ... }]`; occasionally malformed.
    #[serde(rename = "program_studi", default)]
    pub programs: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "nama_perusahaan", default)]
    pub name: Option<String>,
    #[serde(rename = "nama_kabupaten", default)]
    pub locality: Option<String>,
}

/// Response envelope of the listing provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub data: Option<Vec<ListingRecord>>,
}

#[derive(Debug, Deserialize)]
struct ProgramOfStudy {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramDecodeError {
    #[error("program list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("program list has unexpected type {0}")]
    UnexpectedType(&'static str),
}

/// Listing reshaped for display, with its admission chance computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayListing {
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub locality: Option<String>,
    pub quota: u32,
    pub registered_count: u32,
    pub program_titles: Vec<String>,
    pub admission: AdmissionChance,
}

impl DisplayListing {
    pub fn from_record(record: ListingRecord) -> Self {
        let quota = count(record.quota.as_ref());
        let registered_count = count(record.registered.as_ref()).unwrap_or(0);

        let program_titles = match program_titles(record.programs.as_ref()) {
            Ok(titles) => titles,
            Err(err) => {
                debug!(
                    position = record.position.as_deref().unwrap_or("-"),
                    error = %err,
                    "ignoring malformed program list"
                );
                Vec::new()
            }
        };

        let admission = match quota {
            Some(quota) => AdmissionChance::estimate(quota, registered_count),
            None => AdmissionChance::unavailable(),
        };

        let (company_name, locality) = match record.company {
            Some(company) => (company.name, company.locality),
            None => (None, None),
        };

        Self {
            position: record.position,
            company_name,
            locality,
            quota: quota.unwrap_or(0),
            registered_count,
            program_titles,
            admission,
        }
    }
}

/// Map provider records 1:1, keeping provider order.
pub fn normalize(records: Vec<ListingRecord>) -> Vec<DisplayListing> {
    records.into_iter().map(DisplayListing::from_record).collect()
}

/// Read a head count that may arrive as a number or numeric text.
///
/// Fractions are truncated and negatives floored at zero. Absent, blank, or non-numeric
/// values yield `None`.
pub fn count(value: Option<&Value>) -> Option<u32> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if !number.is_finite() {
        return None;
    }
    Some(number.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Decode the program-of-study titles of a single record.
pub fn program_titles(value: Option<&Value>) -> Result<Vec<String>, ProgramDecodeError> {
    let programs: Vec<ProgramOfStudy> = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(Vec::new()),
        Some(Value::String(text)) => serde_json::from_str(text)?,
        Some(array @ Value::Array(_)) => Vec::<ProgramOfStudy>::deserialize(array)?,
        Some(Value::Bool(_)) => return Err(ProgramDecodeError::UnexpectedType("boolean")),
        Some(Value::Number(_)) => return Err(ProgramDecodeError::UnexpectedType("number")),
        Some(Value::Object(_)) => return Err(ProgramDecodeError::UnexpectedType("object")),
    };

    Ok(programs
        .into_iter()
        .filter_map(|program| program.title)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::scoring::AdmissionLabel;
    use serde_json::json;

    fn record(value: Value) -> ListingRecord {
        serde_json::from_value(value).expect("record decodes")
    }

    #[test]
    fn reshapes_provider_record() {
        let listing = DisplayListing::from_record(record(json!({
            "posisi": "UI Designer",
            "perusahaan": {
                "nama_perusahaan": "PT Kreatif Nusantara",
                "nama_kabupaten": "KOTA BANDUNG",
                "alamat": "Jl. Asia Afrika"
            },
            "jumlah_kuota": 3,
            "jumlah_terdaftar": 9,
            "program_studi": "[{\"value\":\"1\",\"title\":\"Desain Komunikasi Visual\"},{\"value\":\"2\",\"title\":\"Informatika\"}]"
        })));

        assert_eq!(listing.position.as_deref(), Some("UI Designer"));
        assert_eq!(listing.company_name.as_deref(), Some("PT Kreatif Nusantara"));
        assert_eq!(listing.locality.as_deref(), Some("KOTA BANDUNG"));
        assert_eq!(listing.quota, 3);
        assert_eq!(listing.registered_count, 9);
        assert_eq!(
            listing.program_titles,
            vec!["Desain Komunikasi Visual", "Informatika"]
        );
        assert_eq!(listing.admission.score, 30);
        assert_eq!(listing.admission.label, AdmissionLabel::Low);
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let listing = DisplayListing::from_record(record(json!({ "posisi": "Admin" })));
        assert_eq!(listing.quota, 0);
        assert_eq!(listing.registered_count, 0);
        assert!(listing.program_titles.is_empty());
        assert!(listing.company_name.is_none());
    }

    #[test]
    fn unusable_quota_marks_chance_unavailable() {
        let listing = DisplayListing::from_record(record(json!({
            "jumlah_kuota": "banyak",
            "jumlah_terdaftar": 4
        })));
        assert_eq!(listing.quota, 0);
        assert_eq!(listing.admission, AdmissionChance::unavailable());

        let listing = DisplayListing::from_record(record(json!({
            "jumlah_kuota": 0,
            "jumlah_terdaftar": 4
        })));
        assert_eq!(listing.admission.label, AdmissionLabel::VeryLow);
    }

    #[test]
    fn counts_accept_numeric_text() {
        assert_eq!(count(Some(&json!("12"))), Some(12));
        assert_eq!(count(Some(&json!(" 4.8 "))), Some(4));
        assert_eq!(count(Some(&json!(-3))), Some(0));
        assert_eq!(count(Some(&json!(""))), None);
        assert_eq!(count(Some(&json!(true))), None);
        assert_eq!(count(Some(&Value::Null)), None);
        assert_eq!(count(None), None);
    }

    #[test]
    fn program_titles_tolerate_every_shape() {
        assert_eq!(
            program_titles(Some(&json!([{ "title": "Akuntansi" }, { "value": "9" }])))
                .expect("array decodes"),
            vec!["Akuntansi"]
        );
        assert!(program_titles(Some(&json!(""))).expect("blank").is_empty());
        assert!(program_titles(None).expect("absent").is_empty());
        assert!(program_titles(Some(&json!("[{\"title\": "))).is_err());
        assert!(program_titles(Some(&json!(42))).is_err());
    }

    #[test]
    fn malformed_programs_only_affect_their_record() {
        let listings = normalize(vec![
            record(json!({ "posisi": "A", "program_studi": "[{\"title\":\"Hukum\"}]" })),
            record(json!({ "posisi": "B", "program_studi": "{not json" })),
            record(json!({ "posisi": "C", "program_studi": "[{\"title\":\"Manajemen\"}]" })),
        ]);

        let positions: Vec<_> = listings
            .iter()
            .map(|listing| listing.position.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(positions, vec!["A", "B", "C"]);
        assert_eq!(listings[0].program_titles, vec!["Hukum"]);
        assert!(listings[1].program_titles.is_empty());
        assert_eq!(listings[2].program_titles, vec!["Manajemen"]);
    }

    #[test]
    fn page_accepts_null_data() {
        let page: ListingPage = serde_json::from_value(json!({ "data": null })).expect("decodes");
        assert!(page.data.is_none());
        let page: ListingPage = serde_json::from_value(json!({})).expect("decodes");
        assert!(page.data.is_none());
    }
}
