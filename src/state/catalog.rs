//! Embedded catalog loading
//!
//! The project list and the certifications are bundled into the binary as
//! JSON and validated once at startup. Any malformed record aborts the load
//! with a descriptive error instead of reaching the filter.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::data::{Certification, ProjectRecord};

const EMBEDDED_PROJECTS: &str = include_str!("../../assets/projects.json");
const EMBEDDED_CERTIFICATIONS: &str = include_str!("../../assets/certifications.json");

/// Errors raised while loading catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {id} has an empty `{field}`")]
    EmptyField { id: String, field: &'static str },

    #[error("project {id} has an empty tag at position {position}")]
    EmptyTag { id: u32, position: usize },

    #[error("record {id} has an invalid `{field}` URL: {value:?}")]
    InvalidUrl {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("project id {id} appears more than once")]
    DuplicateId { id: u32 },

    #[error("project {id} is marked live but has no `liveUrl`")]
    MissingLiveUrl { id: u32 },
}

/// Record shape as written in the data file. Every required field is an
/// `Option` so that absence is reported by name rather than by serde.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawProject {
    id: Option<u32>,
    name: Option<String>,
    description: Option<String>,
    techs: Option<Vec<String>>,
    repo_url: Option<String>,
    image: Option<String>,
    #[serde(default)]
    is_live: bool,
    live_url: Option<String>,
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCertification {
    name: Option<String>,
    issuer: Option<String>,
    date: Option<String>,
    url: Option<String>,
}

/// The validated, immutable project list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

impl Catalog {
    /// Load the catalog bundled with the application
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_PROJECTS)
    }

    /// Parse and validate a catalog, failing on the first malformed record
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawProject> = serde_json::from_str(json)?;

        let mut seen: HashMap<u32, usize> = HashMap::with_capacity(raw.len());
        let mut projects = Vec::with_capacity(raw.len());

        for (index, record) in raw.into_iter().enumerate() {
            let project = validate_project(index, record)?;
            if seen.insert(project.id, index).is_some() {
                return Err(CatalogError::DuplicateId { id: project.id });
            }
            projects.push(project);
        }

        Ok(Catalog { projects })
    }

    /// Build a catalog from records that are already validated
    #[cfg(test)]
    pub fn from_records(projects: Vec<ProjectRecord>) -> Self {
        Catalog { projects }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects shown in the featured strip, in catalog order
    pub fn featured(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter().filter(|p| p.featured)
    }
}

fn validate_project(index: usize, raw: RawProject) -> Result<ProjectRecord, CatalogError> {
    let missing = |field| CatalogError::MissingField { index, field };

    let id = raw.id.ok_or_else(|| missing("id"))?;
    let name = raw.name.ok_or_else(|| missing("name"))?;
    let description = raw.description.ok_or_else(|| missing("description"))?;
    let techs = raw.techs.ok_or_else(|| missing("techs"))?;
    let repo_url = raw.repo_url.ok_or_else(|| missing("repoUrl"))?;
    let image = raw.image.ok_or_else(|| missing("image"))?;

    if name.trim().is_empty() {
        return Err(CatalogError::EmptyField {
            id: id.to_string(),
            field: "name",
        });
    }

    if let Some(position) = techs.iter().position(|t| t.trim().is_empty()) {
        return Err(CatalogError::EmptyTag { id, position });
    }

    check_url(&id.to_string(), "repoUrl", &repo_url)?;

    // A blank liveUrl is the same as no liveUrl.
    let live_url = raw.live_url.filter(|u| !u.trim().is_empty());
    if let Some(live) = &live_url {
        check_url(&id.to_string(), "liveUrl", live)?;
    }
    if raw.is_live && live_url.is_none() {
        return Err(CatalogError::MissingLiveUrl { id });
    }

    Ok(ProjectRecord {
        id,
        name,
        description,
        techs,
        repo_url,
        image,
        is_live: raw.is_live,
        live_url,
        featured: raw.featured,
    })
}

fn check_url(id: &str, field: &'static str, value: &str) -> Result<(), CatalogError> {
    let invalid = || CatalogError::InvalidUrl {
        id: id.to_string(),
        field,
        value: value.to_string(),
    };

    let parsed = Url::parse(value).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}

/// Load the certifications bundled with the application
pub fn embedded_certifications() -> Result<Vec<Certification>, CatalogError> {
    certifications_from_json(EMBEDDED_CERTIFICATIONS)
}

pub fn certifications_from_json(json: &str) -> Result<Vec<Certification>, CatalogError> {
    let raw: Vec<RawCertification> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, cert)| -> Result<Certification, CatalogError> {
            let missing = |field| CatalogError::MissingField { index, field };

            let name = cert.name.ok_or_else(|| missing("name"))?;
            let issuer = cert.issuer.ok_or_else(|| missing("issuer"))?;
            let date = cert.date.ok_or_else(|| missing("date"))?;
            let url = cert.url.ok_or_else(|| missing("url"))?;

            let label = format!("#{index}");
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyField { id: label, field: "name" });
            }
            check_url(&label, "url", &url)?;

            Ok(Certification { name, issuer, date, url })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn project_json(extra: &str) -> String {
        format!(
            r#"[{{
                "id": 7,
                "name": "Shop-App",
                "description": "A sleek shopping app",
                "techs": ["Flutter", "Dart"],
                "repoUrl": "https://github.com/example/Shop-App",
                "image": "/public/assets/images/shoes.gif"{extra}
            }}]"#
        )
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 21);
    }

    #[test]
    fn test_embedded_ids_are_unique() {
        let catalog = Catalog::embedded().unwrap();
        let ids: HashSet<u32> = catalog.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_embedded_certifications_load() {
        let certs = embedded_certifications().unwrap();
        assert_eq!(certs.len(), 5);
        assert!(certs.iter().all(|c| c.url.starts_with("https://")));
    }

    #[test]
    fn test_optional_fields_default() {
        let catalog = Catalog::from_json(&project_json("")).unwrap();
        let project = &catalog.projects()[0];
        assert!(!project.is_live);
        assert!(!project.featured);
        assert_eq!(project.live_url, None);
    }

    #[test]
    fn test_featured_keeps_catalog_order() {
        let catalog = Catalog::embedded().unwrap();
        let featured: Vec<u32> = catalog.featured().map(|p| p.id).collect();
        assert!(!featured.is_empty());
        assert!(featured.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let json = r#"[{"id": 1, "description": "d", "techs": [], "repoUrl": "https://x.dev", "image": "a.png"}]"#;
        match Catalog::from_json(json) {
            Err(CatalogError::MissingField { index: 0, field: "name" }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let one = r#"{"id": 3, "name": "A", "description": "d", "techs": [], "repoUrl": "https://x.dev/a", "image": "a.png"}"#;
        let two = r#"{"id": 3, "name": "B", "description": "d", "techs": [], "repoUrl": "https://x.dev/b", "image": "b.png"}"#;
        let json = format!("[{one},{two}]");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::DuplicateId { id: 3 })
        ));
    }

    #[test]
    fn test_live_without_url_is_rejected() {
        let json = project_json(r#", "isLive": true"#);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::MissingLiveUrl { id: 7 })
        ));

        let blank = project_json(r#", "isLive": true, "liveUrl": "  ""#);
        assert!(matches!(
            Catalog::from_json(&blank),
            Err(CatalogError::MissingLiveUrl { id: 7 })
        ));
    }

    #[test]
    fn test_live_with_url_is_accepted() {
        let json = project_json(r#", "isLive": true, "liveUrl": "https://shop.example.com", "featured": true"#);
        let catalog = Catalog::from_json(&json).unwrap();
        let project = catalog.get(7).unwrap();
        assert_eq!(project.demo_url(), Some("https://shop.example.com"));
        assert!(project.featured);
    }

    #[test]
    fn test_relative_repo_url_is_rejected() {
        let json = r#"[{"id": 1, "name": "A", "description": "d", "techs": [], "repoUrl": "github.com/a", "image": "a.png"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidUrl { field: "repoUrl", .. })
        ));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let json = r#"[{"id": 1, "name": "A", "description": "d", "techs": [], "repoUrl": "ftp://x.dev/a", "image": "a.png"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let json = project_json(r#", "stars": 5"#);
        assert!(matches!(Catalog::from_json(&json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_blank_tag_is_rejected() {
        let json = r#"[{"id": 4, "name": "A", "description": "d", "techs": ["C", " "], "repoUrl": "https://x.dev", "image": "a.png"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::EmptyTag { id: 4, position: 1 })
        ));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.featured().count(), 0);
    }

    #[test]
    fn test_certification_missing_url() {
        let json = r#"[{"name": "A", "issuer": "B", "date": "2024"}]"#;
        assert!(matches!(
            certifications_from_json(json),
            Err(CatalogError::MissingField { index: 0, field: "url" })
        ));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = CatalogError::MissingLiveUrl { id: 12 };
        assert_eq!(err.to_string(), "project 12 is marked live but has no `liveUrl`");
    }
}
