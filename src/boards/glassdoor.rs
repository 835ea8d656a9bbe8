use anyhow::Result;
use std::time::Duration;

use super::{Card, JobBoard, ListingContext};
use crate::models::{NormalizedOffer, Telework, NOT_SPECIFIED};
use crate::skills::tag_skills;

const SEARCH_URLS: &[&str] = &[
    "https://www.glassdoor.fr/Emploi/stage-informatique-emplois-SRCH_KO0,18.htm",
    "https://www.glassdoor.fr/Emploi/alternance-informatique-emplois-SRCH_KO0,20.htm",
];

const HOME_URL: &str = "https://www.glassdoor.fr";

pub struct Glassdoor;

impl JobBoard for Glassdoor {
    fn name(&self) -> &'static str {
        "Glassdoor"
    }

    fn search_urls(&self) -> &'static [&'static str] {
        SEARCH_URLS
    }

    fn listing_selector(&self) -> &'static str {
        "li.react-job-listing, li.jobListing"
    }

    fn max_listings(&self) -> usize {
        6
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(4)
    }

    fn sends_accept_language(&self) -> bool {
        false
    }

    fn parse_listing(&self, card: &Card<'_>, ctx: &ListingContext) -> Result<NormalizedOffer> {
        let default_title = format!("{} Informatique", ctx.contract.as_str());
        let title = card.text_or("a.jobLink, a.job-title, h3.jobLink, h3.job-title", &default_title)?;
        let company = card.text_or(
            "span.employer-name, span.company, div.employer-name, div.company",
            "Entreprise Tech",
        )?;
        let location = card.text_or("span.location, span.loc, div.location, div.loc", "France")?;

        Ok(NormalizedOffer {
            description: format!("Offre Glassdoor - {} chez {}", title, company),
            skills: tag_skills(&title),
            published: ctx.published.clone(),
            contract: ctx.contract,
            experience_years: "0".to_string(),
            seniority: "Junior".to_string(),
            telework: Telework::Unspecified,
            salary: NOT_SPECIFIED.to_string(),
            source: self.name().to_string(),
            url: HOME_URL.to_string(),
            title,
            company,
            location,
        })
    }
}
