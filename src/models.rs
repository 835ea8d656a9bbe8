use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One API result, kept as the JSON object the search endpoint returned.
pub type RawOffer = Map<String, Value>;

/// Field injected into every raw offer with the keyword that produced it.
pub const SEARCH_KEYWORD_FIELD: &str = "search_keyword";

pub const NOT_SPECIFIED: &str = "Non spécifié";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Stage,
    Alternance,
}

impl ContractType {
    /// Search pages are split by contract; the URL says which one.
    pub fn from_url(url: &str) -> Self {
        if url.to_lowercase().contains("stage") {
            ContractType::Stage
        } else {
            ContractType::Alternance
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Stage => "Stage",
            ContractType::Alternance => "Alternance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Telework {
    #[serde(rename = "Oui")]
    Yes,
    #[serde(rename = "Non")]
    No,
    #[serde(rename = "Hybride")]
    Hybrid,
    #[serde(rename = "Non spécifié")]
    Unspecified,
}

/// Fixed-schema scraped offer. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOffer {
    #[serde(rename = "Intitulé du poste")]
    pub title: String,
    #[serde(rename = "Nom de l entreprise")]
    pub company: String,
    #[serde(rename = "Ville ou région")]
    pub location: String,
    #[serde(rename = "Date de publication")]
    pub published: String,
    #[serde(rename = "Type de contrat")]
    pub contract: ContractType,
    #[serde(rename = "Nombre d années d expérience demandées")]
    pub experience_years: String,
    #[serde(rename = "Niveau de seniorité")]
    pub seniority: String,
    #[serde(rename = "Télétravail")]
    pub telework: Telework,
    #[serde(rename = "Fourchette salariale")]
    pub salary: String,
    #[serde(rename = "Compétences mentionnées")]
    pub skills: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Description du poste")]
    pub description: String,
}

/// Audit record written next to the raw API dump.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub date_collecte: String,
    pub total_offres: usize,
    pub metiers_recherches: Vec<String>,
}

/// What the scraper produced, and whether it had to fall back to demo data.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub offers: Vec<NormalizedOffer>,
    pub used_demo_data: bool,
}
