use anyhow::{anyhow, Result};
use regex::Regex;
use std::time::Duration;

use super::{Card, JobBoard, ListingContext};
use crate::models::{NormalizedOffer, Telework, NOT_SPECIFIED};
use crate::skills::tag_skills;

const SEARCH_URLS: &[&str] = &[
    "https://www.chooseyourboss.com/offres/stage?q=informatique",
    "https://www.chooseyourboss.com/offres/stage?q=d%C3%A9veloppement",
    "https://www.chooseyourboss.com/offres/alternance?q=informatique",
    "https://www.chooseyourboss.com/offres/alternance?q=d%C3%A9veloppement",
];

const SITE_ROOT: &str = "https://www.chooseyourboss.com";
const TELEWORK_PATTERN: &str = r"remote|télétravail|hybride|flexible";

pub struct ChooseYourBoss;

impl ChooseYourBoss {
    fn detect_telework(card: &Card<'_>) -> Result<Telework> {
        let re = Regex::new(TELEWORK_PATTERN)?;
        Ok(if re.is_match(&card.markup_lower()) {
            Telework::Yes
        } else {
            Telework::No
        })
    }

    // No link at all is tolerated; a link without a target is not.
    fn offer_url(card: &Card<'_>) -> Result<String> {
        match card.first("a")? {
            Some(link) => {
                let href = link
                    .value()
                    .attr("href")
                    .ok_or_else(|| anyhow!("offer link has no href"))?;
                Ok(format!("{}{}", SITE_ROOT, href))
            }
            None => Ok("Non disponible".to_string()),
        }
    }
}

impl JobBoard for ChooseYourBoss {
    fn name(&self) -> &'static str {
        "ChooseYourBoss"
    }

    fn search_urls(&self) -> &'static [&'static str] {
        SEARCH_URLS
    }

    fn listing_selector(&self) -> &'static str {
        "div.job-item, div.offer-card"
    }

    fn max_listings(&self) -> usize {
        10
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(2)
    }

    fn parse_listing(&self, card: &Card<'_>, ctx: &ListingContext) -> Result<NormalizedOffer> {
        let default_title = format!("{} Informatique", ctx.contract.as_str());
        let title = card.text_or("h3.title, h3.job-title, h2.title, h2.job-title", &default_title)?;
        let company = card.text_or(
            "div.company, div.employer, span.company, span.employer",
            "Startup Tech",
        )?;
        let location = card.text_or("div.location, div.city, span.location, span.city", "France")?;
        let salary = card.text_or(
            "div.salary, div.compensation, span.salary, span.compensation",
            NOT_SPECIFIED,
        )?;

        Ok(NormalizedOffer {
            description: format!("Offre ChooseYourBoss - {} chez {}", title, company),
            skills: tag_skills(&title),
            published: ctx.published.clone(),
            contract: ctx.contract,
            experience_years: "0".to_string(),
            seniority: "Étudiant".to_string(),
            telework: Self::detect_telework(card)?,
            salary,
            source: self.name().to_string(),
            url: Self::offer_url(card)?,
            title,
            company,
            location,
        })
    }
}
