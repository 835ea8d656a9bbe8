//! Job-board scraping. Each site is a [`JobBoard`] strategy that only knows
//! its search URLs, its selectors and how to turn one listing card into a
//! [`NormalizedOffer`]. Fetching, capping, pacing and error isolation live in
//! [`scrape_board`] and are shared by every site.

pub mod chooseyourboss;
pub mod glassdoor;
pub mod linkedin;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::demo::demo_offers;
use crate::http::HttpClient;
use crate::models::{ContractType, NormalizedOffer, ScrapeOutcome};

pub use chooseyourboss::ChooseYourBoss;
pub use glassdoor::Glassdoor;
pub use linkedin::LinkedIn;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "fr-FR,fr;q=0.9,en;q=0.8";

/// Whether to sleep between search pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Polite,
    None,
}

/// What a card parser knows about the page the card came from.
#[derive(Debug, Clone)]
pub struct ListingContext {
    pub search_url: String,
    pub contract: ContractType,
    /// Run date, `DD/MM/YYYY`.
    pub published: String,
}

impl ListingContext {
    pub fn new(search_url: &str, published: &str) -> Self {
        Self {
            search_url: search_url.to_string(),
            contract: ContractType::from_url(search_url),
            published: published.to_string(),
        }
    }
}

pub trait JobBoard {
    fn name(&self) -> &'static str;

    fn search_urls(&self) -> &'static [&'static str];

    /// CSS selector list matching one listing card.
    fn listing_selector(&self) -> &'static str;

    fn max_listings(&self) -> usize;

    /// Pause after each search page.
    fn delay(&self) -> Duration;

    fn sends_accept_language(&self) -> bool {
        true
    }

    /// Console label for a search page.
    fn search_label(&self, url: &str) -> String {
        ContractType::from_url(url).as_str().to_string()
    }

    fn parse_listing(&self, card: &Card<'_>, ctx: &ListingContext) -> Result<NormalizedOffer>;
}

pub fn default_boards() -> Vec<Box<dyn JobBoard>> {
    vec![
        Box::new(LinkedIn),
        Box::new(Glassdoor),
        Box::new(ChooseYourBoss),
    ]
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

// --- Field extraction shared by all boards ---

/// One listing element. Lookups never fail on a missing match; they fall
/// back to the caller's default instead.
pub struct Card<'a> {
    element: ElementRef<'a>,
}

impl<'a> Card<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    pub fn first(&self, css: &str) -> Result<Option<ElementRef<'a>>> {
        let selector = parse_selector(css)?;
        Ok(self.element.select(&selector).next())
    }

    /// Stripped text of the first match, or `None` when nothing matches.
    pub fn text(&self, css: &str) -> Result<Option<String>> {
        Ok(self.first(css)?.map(stripped_text))
    }

    pub fn text_or(&self, css: &str, default: &str) -> Result<String> {
        Ok(self.text(css)?.unwrap_or_else(|| default.to_string()))
    }

    /// Outer markup, lower-cased, for keyword sniffing.
    pub fn markup_lower(&self) -> String {
        self.element.html().to_lowercase()
    }
}

/// Text nodes trimmed and glued together without separators.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

// --- Orchestration ---

/// Parses one search-result page. Cards that fail to parse are logged and
/// dropped; the rest are kept in document order.
pub fn parse_listings(board: &dyn JobBoard, html: &str, ctx: &ListingContext) -> Result<Vec<NormalizedOffer>> {
    let document = Html::parse_document(html);
    let listing_selector = parse_selector(board.listing_selector())?;

    let offers = document
        .select(&listing_selector)
        .take(board.max_listings())
        .filter_map(|element| match board.parse_listing(&Card::new(element), ctx) {
            Ok(offer) => Some(offer),
            Err(e) => {
                warn!("{} card skipped: {:#}", board.name(), e);
                None
            }
        })
        .collect();

    Ok(offers)
}

pub fn scrape_board(
    http: &dyn HttpClient,
    board: &dyn JobBoard,
    published: &str,
    pace: Pace,
) -> Vec<NormalizedOffer> {
    let mut headers = vec![("User-Agent", USER_AGENT)];
    if board.sends_accept_language() {
        headers.push(("Accept-Language", ACCEPT_LANGUAGE));
    }

    let mut offers = Vec::new();

    for url in board.search_urls() {
        info!("{} search: {}", board.name(), board.search_label(url));
        let ctx = ListingContext::new(url, published);

        match http.get(url, &headers, &[]) {
            Ok(reply) if reply.status == 200 => match parse_listings(board, &reply.body, &ctx) {
                Ok(found) => offers.extend(found),
                Err(e) => warn!("{} page not parsed: {:#}", board.name(), e),
            },
            Ok(reply) => warn!("{} answered {} for {}", board.name(), reply.status, url),
            Err(e) => warn!("{} request failed: {:#}", board.name(), e),
        }

        if pace == Pace::Polite {
            thread::sleep(board.delay());
        }
    }

    offers
}

/// Runs every board in turn. When none of them yields an offer the demo
/// dataset is returned instead, with `used_demo_data` set.
pub fn scrape_boards(http: &dyn HttpClient, boards: &[Box<dyn JobBoard>], pace: Pace) -> ScrapeOutcome {
    let published = chrono::Local::now().format("%d/%m/%Y").to_string();
    let mut offers = Vec::new();

    for board in boards {
        info!("trying {}", board.name());
        let found = scrape_board(http, board.as_ref(), &published, pace);
        info!("{}: {} offers", board.name(), found.len());
        offers.extend(found);
    }

    if offers.is_empty() {
        warn!("scraping returned nothing, falling back to demo data");
        return ScrapeOutcome {
            offers: demo_offers(),
            used_demo_data: true,
        };
    }

    ScrapeOutcome {
        offers,
        used_demo_data: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeHttp;

    const LINKEDIN_PAGE: &str = r#"
        <html><body>
          <div class="base-search-card__info">
            <h3 class="base-search-card__title"> Stage Développeur Python </h3>
            <h4 class="base-search-card__subtitle">Acme</h4>
            <span class="job-search-card__location">Lille</span>
          </div>
        </body></html>"#;

    fn html_fragment_card(html: &str, css: &str, run: impl FnOnce(&Card<'_>)) {
        let document = Html::parse_document(html);
        let selector = parse_selector(css).unwrap();
        let element = document.select(&selector).next().unwrap();
        run(&Card::new(element));
    }

    #[test]
    fn test_card_text_or_falls_back() {
        html_fragment_card(
            r#"<div class="card"><h3 class="title">  Dev <b>Rust</b> </h3></div>"#,
            "div.card",
            |card| {
                assert_eq!(card.text_or("h3.title", "x").unwrap(), "DevRust");
                assert_eq!(card.text_or("h2.title", "fallback").unwrap(), "fallback");
                assert_eq!(card.text("span.none").unwrap(), None);
            },
        );
    }

    #[test]
    fn test_card_invalid_selector_is_an_error() {
        html_fragment_card(r#"<div class="card"></div>"#, "div.card", |card| {
            assert!(card.text("h3[").is_err());
        });
    }

    #[test]
    fn test_scrape_board_skips_failed_pages() {
        let http = FakeHttp::new().fail().reply(200, LINKEDIN_PAGE);
        let offers = scrape_board(&http, &LinkedIn, "01/02/2025", Pace::None);

        assert_eq!(http.request_count(), 2);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].title, "Stage Développeur Python");
        assert_eq!(offers[0].contract, ContractType::Alternance);
        assert_eq!(offers[0].published, "01/02/2025");
    }

    #[test]
    fn test_scrape_board_sends_browser_headers() {
        let http = FakeHttp::new();
        scrape_board(&http, &LinkedIn, "01/02/2025", Pace::None);
        scrape_board(&http, &Glassdoor, "01/02/2025", Pace::None);

        let requests = http.requests.borrow();
        assert_eq!(requests.len(), 4);
        assert!(requests[0].header("User-Agent").unwrap().starts_with("Mozilla/5.0"));
        assert_eq!(requests[0].header("Accept-Language"), Some("fr-FR,fr;q=0.9,en;q=0.8"));
        assert!(requests[2].header("User-Agent").is_some());
        assert_eq!(requests[2].header("Accept-Language"), None);
    }

    #[test]
    fn test_parse_listings_caps_per_board() {
        let card = r#"<div class="job-search-card"><h3 class="job-title">Stage Java</h3></div>"#;
        let page = format!("<html><body>{}</body></html>", card.repeat(12));
        let ctx = ListingContext::new(LinkedIn.search_urls()[0], "01/02/2025");

        let offers = parse_listings(&LinkedIn, &page, &ctx).unwrap();
        assert_eq!(offers.len(), 8);
    }

    #[test]
    fn test_scrape_boards_falls_back_to_demo_data() {
        let http = FakeHttp::new()
            .fail()
            .reply(500, "")
            .reply(403, "blocked")
            .reply(200, "<html><body>nothing here</body></html>");
        let outcome = scrape_boards(&http, &default_boards(), Pace::None);

        assert_eq!(http.request_count(), 8);
        assert!(outcome.used_demo_data);
        assert_eq!(outcome.offers, demo_offers());
        assert!(outcome.offers.iter().all(|o| o.source == "Données Démo"));
    }

    #[test]
    fn test_scrape_boards_keeps_live_offers() {
        let http = FakeHttp::new().reply(200, LINKEDIN_PAGE);
        let outcome = scrape_boards(&http, &default_boards(), Pace::None);

        assert!(!outcome.used_demo_data);
        assert_eq!(outcome.offers.len(), 1);
        assert_eq!(outcome.offers[0].source, "LinkedIn");
        assert_eq!(outcome.offers[0].contract, ContractType::Stage);
    }
}
