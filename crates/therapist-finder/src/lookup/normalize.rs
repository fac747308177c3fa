use super::taxonomy::is_mental_health_code;
use crate::registry::{ProviderNumber, RawBasic, RawProviderRecord, RawTaxonomy};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyEntry {
    pub code: String,
    #[serde(rename = "desc")]
    pub description: String,
}

/// A mental-health practitioner as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedProvider {
    pub npi: Option<ProviderNumber>,
    pub name: String,
    pub credential: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub taxonomies: Vec<TaxonomyEntry>,
}

/// Returns `None` for providers without a mental-health classification.
pub fn normalize_record(record: RawProviderRecord) -> Option<NormalizedProvider> {
    let taxonomies = mental_health_taxonomies(record.taxonomies);
    if taxonomies.is_empty() {
        return None;
    }

    let mut addresses = record.addresses;
    let practice = match addresses.iter().position(|address| address.is_practice_location()) {
        Some(index) => addresses.swap_remove(index),
        None => addresses.into_iter().next().unwrap_or_default(),
    };

    let name = display_name(&record.basic);
    let RawBasic {
        credential, gender, ..
    } = record.basic;

    Some(NormalizedProvider {
        npi: record.number,
        name,
        credential: present(credential),
        gender: present(gender),
        city: present(practice.city),
        state: present(practice.state),
        postal_code: present(practice.postal_code),
        phone: present(practice.telephone_number),
        taxonomies,
    })
}

fn mental_health_taxonomies(taxonomies: Vec<RawTaxonomy>) -> Vec<TaxonomyEntry> {
    taxonomies
        .into_iter()
        .filter_map(|taxonomy| {
            let code = taxonomy.code?;
            is_mental_health_code(&code).then(|| TaxonomyEntry {
                code,
                description: taxonomy.desc.unwrap_or_default(),
            })
        })
        .collect()
}

fn display_name(basic: &RawBasic) -> String {
    if let Some(name) = basic.name.as_deref().filter(|name| !name.is_empty()) {
        return name.to_string();
    }

    [basic.first_name.as_deref(), basic.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RawAddress;

    fn taxonomy(code: &str, desc: &str) -> RawTaxonomy {
        RawTaxonomy {
            code: Some(code.to_string()),
            desc: Some(desc.to_string()),
        }
    }

    fn address(purpose: &str, city: &str) -> RawAddress {
        RawAddress {
            address_purpose: Some(purpose.to_string()),
            city: Some(city.to_string()),
            state: Some("MA".to_string()),
            postal_code: Some("021393101".to_string()),
            telephone_number: Some("617-555-0100".to_string()),
        }
    }

    fn psychologist() -> RawProviderRecord {
        RawProviderRecord {
            number: Some(ProviderNumber::Numeric(1_306_849_350)),
            basic: RawBasic {
                first_name: Some("JANE".to_string()),
                last_name: Some("DOE".to_string()),
                credential: Some("PH.D.".to_string()),
                gender: Some("F".to_string()),
                ..RawBasic::default()
            },
            addresses: vec![address("MAILING", "Boston"), address("LOCATION", "Cambridge")],
            taxonomies: vec![
                taxonomy("207Q00000X", "Family Medicine"),
                taxonomy("103TC0700X", "Psychologist, Clinical"),
            ],
        }
    }

    #[test]
    fn keeps_only_mental_health_taxonomies() {
        let provider = normalize_record(psychologist()).expect("psychologist kept");
        assert_eq!(
            provider.taxonomies,
            vec![TaxonomyEntry {
                code: "103TC0700X".to_string(),
                description: "Psychologist, Clinical".to_string(),
            }]
        );
    }

    #[test]
    fn drops_providers_without_mental_health_taxonomies() {
        let mut record = psychologist();
        record.taxonomies = vec![taxonomy("207Q00000X", "Family Medicine")];
        assert!(normalize_record(record).is_none());

        let mut record = psychologist();
        record.taxonomies.clear();
        assert!(normalize_record(record).is_none());
    }

    #[test]
    fn prefers_practice_location_address() {
        let provider = normalize_record(psychologist()).expect("kept");
        assert_eq!(provider.city.as_deref(), Some("Cambridge"));
        assert_eq!(provider.phone.as_deref(), Some("617-555-0100"));
    }

    #[test]
    fn falls_back_to_first_address_then_nothing() {
        let mut record = psychologist();
        record.addresses = vec![address("MAILING", "Boston"), address("OTHER", "Quincy")];
        let provider = normalize_record(record).expect("kept");
        assert_eq!(provider.city.as_deref(), Some("Boston"));

        let mut record = psychologist();
        record.addresses.clear();
        let provider = normalize_record(record).expect("kept");
        assert_eq!(provider.city, None);
        assert_eq!(provider.state, None);
        assert_eq!(provider.postal_code, None);
        assert_eq!(provider.phone, None);
    }

    #[test]
    fn display_name_prefers_combined_name() {
        let mut record = psychologist();
        record.basic.name = Some("DOE JANE".to_string());
        assert_eq!(normalize_record(record).expect("kept").name, "DOE JANE");

        assert_eq!(normalize_record(psychologist()).expect("kept").name, "JANE DOE");
    }

    #[test]
    fn display_name_skips_missing_parts() {
        let mut record = psychologist();
        record.basic.name = Some(String::new());
        record.basic.first_name = None;
        assert_eq!(normalize_record(record).expect("kept").name, "DOE");

        let mut record = psychologist();
        record.basic.first_name = None;
        record.basic.last_name = None;
        assert_eq!(normalize_record(record).expect("kept").name, "");
    }

    #[test]
    fn empty_source_fields_become_null() {
        let mut record = psychologist();
        record.basic.credential = Some(String::new());
        record.basic.gender = None;
        let provider = normalize_record(record).expect("kept");
        assert_eq!(provider.credential, None);
        assert_eq!(provider.gender, None);
    }
}
