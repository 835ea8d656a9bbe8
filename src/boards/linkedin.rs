use anyhow::Result;
use std::time::Duration;

use super::{Card, JobBoard, ListingContext};
use crate::models::{NormalizedOffer, Telework, NOT_SPECIFIED};
use crate::skills::tag_skills;

const SEARCH_URLS: &[&str] = &[
    "https://www.linkedin.com/jobs/search/?keywords=stage%20informatique&location=France",
    "https://www.linkedin.com/jobs/search/?keywords=alternance%20informatique&location=France",
];

pub struct LinkedIn;

impl JobBoard for LinkedIn {
    fn name(&self) -> &'static str {
        "LinkedIn"
    }

    fn search_urls(&self) -> &'static [&'static str] {
        SEARCH_URLS
    }

    fn listing_selector(&self) -> &'static str {
        "div.base-search-card__info, div.job-search-card"
    }

    fn max_listings(&self) -> usize {
        8
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(3)
    }

    // The keywords query parameter, decoded just enough for the console.
    fn search_label(&self, url: &str) -> String {
        url.split('=')
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap_or(url)
            .replace("%20", " ")
    }

    fn parse_listing(&self, card: &Card<'_>, ctx: &ListingContext) -> Result<NormalizedOffer> {
        let title = card.text_or(
            "h3.base-search-card__title, h3.job-title, a.base-search-card__title, a.job-title",
            "Stage/Alternance Informatique",
        )?;
        let company = card.text_or(
            "h4.base-search-card__subtitle, h4.company-name, a.base-search-card__subtitle, a.company-name",
            "Entreprise IT",
        )?;
        let location = card.text_or(
            "span.job-search-card__location, span.location, div.job-search-card__location, div.location",
            "France",
        )?;

        Ok(NormalizedOffer {
            description: format!("Offre LinkedIn - {} chez {}", title, company),
            skills: tag_skills(&title),
            published: ctx.published.clone(),
            contract: ctx.contract,
            experience_years: "0".to_string(),
            seniority: "Étudiant".to_string(),
            telework: Telework::Unspecified,
            salary: NOT_SPECIFIED.to_string(),
            source: self.name().to_string(),
            url: ctx.search_url.clone(),
            title,
            company,
            location,
        })
    }
}
