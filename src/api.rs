use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::ApiConfig;
use crate::http::HttpClient;
use crate::models::{RawOffer, SEARCH_KEYWORD_FIELD};
use crate::writer::{save_raw_offers, RawOutputPaths};

const PAGE_SIZE: usize = 10;
/// ROME code for the IT occupations family.
const ROME_FAMILY: &str = "M18";
pub const OFFERS_PER_KEYWORD: usize = 50;

pub const IT_KEYWORDS: &[&str] = &[
    // Development
    "développeur", "développeur fullstack", "développeur backend", "développeur frontend",
    "développeur mobile", "développeur web", "ingénieur logiciel", "ingénieur informatique",
    // Data
    "data scientist", "data analyst", "analyste données", "ingénieur data", "data engineer",
    "machine learning", "deep learning", "intelligence artificielle", "analyste big data",
    "architecte data", "scientifique des données",
    // Infrastructure and cloud
    "administrateur système", "administrateur réseau", "devops", "ingénieur devops",
    "cloud engineer", "ingénieur cloud", "spécialiste cloud", "architecte cloud",
    "administrateur cloud",
    // Security
    "cybersécurité", "analyste sécurité", "ingénieur sécurité", "responsable sécurité informatique",
    "ethical hacker", "pentester",
    // Web and languages
    "webmaster", "designer UX/UI", "intégrateur web", "développeur javascript",
    "développeur python", "développeur java", "développeur c#", "développeur php",
    // Databases and support
    "administrateur base de données", "DBA", "ingénieur systèmes", "technicien informatique",
    "support technique", "helpdesk",
    // Project and quality
    "chef de projet informatique", "consultant informatique", "product owner", "scrum master",
    "analyste fonctionnel", "testeur QA", "ingénieur qualité logiciel",
];

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resultats: Vec<RawOffer>,
}

// --- Token acquisition ---

/// Client-credentials exchange. Any failure is logged and reported as `None`.
pub fn get_token(http: &dyn HttpClient, config: &ApiConfig) -> Option<String> {
    info!("authenticating against {}", config.token_url);

    let query = [("realm", "/partenaire")];
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("scope", config.scope.as_str()),
    ];

    let reply = match http.post_form(&config.token_url, &query, &form) {
        Ok(reply) => reply,
        Err(e) => {
            error!("token request failed: {:#}", e);
            return None;
        }
    };

    if reply.status != 200 {
        error!("authentication failed ({}): {}", reply.status, reply.body);
        return None;
    }

    match serde_json::from_str::<TokenResponse>(&reply.body) {
        Ok(token) => {
            info!("authenticated");
            Some(token.access_token)
        }
        Err(e) => {
            error!("token response without access_token: {}", e);
            None
        }
    }
}

// --- Range pagination ---

fn fetch_page(
    http: &dyn HttpClient,
    config: &ApiConfig,
    token: &str,
    keyword: &str,
    start: usize,
) -> Result<Vec<RawOffer>> {
    let range = format!("{}-{}", start, start + PAGE_SIZE - 1);
    let bearer = format!("Bearer {}", token);
    let headers = [("Authorization", bearer.as_str())];
    let query = [
        ("motsCles", keyword),
        ("range", range.as_str()),
        ("rome", ROME_FAMILY),
    ];

    let reply = http.get(&config.search_url, &headers, &query)?;
    info!("  range {}: {}", range, reply.status);

    if reply.status != 200 && reply.status != 206 {
        return Err(anyhow!("search API answered {}", reply.status));
    }

    let page: SearchResponse =
        serde_json::from_str(&reply.body).context("Failed to parse search response")?;
    Ok(page.resultats)
}

/// Collects at most `max_results` offers for one keyword, ten per request.
/// A failing page ends pagination; whatever was already fetched is kept.
pub fn search_offers(
    http: &dyn HttpClient,
    config: &ApiConfig,
    token: &str,
    keyword: &str,
    max_results: usize,
) -> Vec<RawOffer> {
    info!("searching offers for '{}'", keyword);

    let mut offers: Vec<RawOffer> = Vec::new();
    let mut start = 0;

    while start < max_results {
        let page = match fetch_page(http, config, token, keyword, start) {
            Ok(page) => page,
            Err(e) => {
                warn!("'{}' stopped at range {}: {:#}", keyword, start, e);
                break;
            }
        };

        if page.is_empty() {
            break;
        }

        offers.extend(page.into_iter().map(|mut offer| {
            offer.insert(
                SEARCH_KEYWORD_FIELD.to_string(),
                Value::String(keyword.to_string()),
            );
            offer
        }));

        if offers.len() >= max_results {
            break;
        }
        start += PAGE_SIZE;
    }

    offers.truncate(max_results);
    offers
}

// --- Keyword sweep ---

#[derive(Debug, Default)]
pub struct SweepReport {
    pub offers: Vec<RawOffer>,
    pub keywords_with_offers: usize,
    pub keywords_without_offers: usize,
}

/// Runs the paginator for every keyword and concatenates the results.
/// Offers matched by several keywords appear once per keyword.
pub fn sweep_keywords(
    http: &dyn HttpClient,
    config: &ApiConfig,
    token: &str,
    keywords: &[&str],
    per_keyword: usize,
) -> SweepReport {
    let mut report = SweepReport::default();

    for keyword in keywords {
        let offers = search_offers(http, config, token, keyword, per_keyword);
        if offers.is_empty() {
            warn!("no offers for '{}'", keyword);
            report.keywords_without_offers += 1;
        } else {
            info!("{} offers collected for '{}'", offers.len(), keyword);
            report.keywords_with_offers += 1;
            report.offers.extend(offers);
        }
    }

    report
}

// --- Full run ---

#[derive(Debug)]
pub enum ApiRunOutcome {
    AuthFailed,
    NoOffers,
    Saved {
        total: usize,
        paths: RawOutputPaths,
    },
}

pub fn raw_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("raw")
}

/// Token, sweep, then one write of everything under `<data_dir>/raw`.
/// Nothing is written when authentication fails or no offer was found.
pub fn run_api_collection(
    http: &dyn HttpClient,
    config: &ApiConfig,
    keywords: &[&str],
    data_dir: &Path,
) -> Result<ApiRunOutcome> {
    let Some(token) = get_token(http, config) else {
        return Ok(ApiRunOutcome::AuthFailed);
    };

    let report = sweep_keywords(http, config, &token, keywords, OFFERS_PER_KEYWORD);
    info!(
        "sweep done: {} keywords with offers, {} without",
        report.keywords_with_offers, report.keywords_without_offers
    );

    if report.offers.is_empty() {
        return Ok(ApiRunOutcome::NoOffers);
    }

    let paths = save_raw_offers(&report.offers, keywords, &raw_dir(data_dir))?;
    Ok(ApiRunOutcome::Saved {
        total: report.offers.len(),
        paths,
    })
}
