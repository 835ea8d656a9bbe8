use std::collections::HashSet;

use crate::models::NormalizedOffer;

pub struct ScrapeSummary {
    pub total: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub by_source: Vec<(String, usize)>,
    pub by_contract: Vec<(String, usize)>,
}

/// Occurrences per value, most frequent first, ties in first-seen order.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| v.as_str() == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn summarize(offers: &[NormalizedOffer]) -> ScrapeSummary {
    let companies: HashSet<&str> = offers.iter().map(|o| o.company.as_str()).collect();
    let locations: HashSet<&str> = offers.iter().map(|o| o.location.as_str()).collect();

    ScrapeSummary {
        total: offers.len(),
        unique_companies: companies.len(),
        unique_locations: locations.len(),
        by_source: value_counts(offers.iter().map(|o| o.source.as_str())),
        by_contract: value_counts(offers.iter().map(|o| o.contract.as_str())),
    }
}

pub fn print_summary(summary: &ScrapeSummary) {
    println!("\nResults:");
    println!("  Offers collected:  {}", summary.total);
    println!("  Unique companies:  {}", summary.unique_companies);
    println!("  Unique locations:  {}", summary.unique_locations);

    println!("\nBy source:");
    for (source, count) in &summary.by_source {
        println!("  - {}: {} offers", source, count);
    }

    println!("\nBy contract:");
    for (contract, count) in &summary.by_contract {
        println!("  - {}: {} offers", contract, count);
    }
}

pub fn print_preview(offers: &[NormalizedOffer]) {
    println!("\n{:<40} {:<22} {:<11} {:<15}", "TITLE", "COMPANY", "CONTRACT", "SOURCE");
    println!("{}", "-".repeat(91));
    for offer in offers {
        println!(
            "{:<40} {:<22} {:<11} {:<15}",
            truncate(&offer.title, 38),
            truncate(&offer.company, 20),
            offer.contract.as_str(),
            truncate(&offer.source, 15)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_offers;

    #[test]
    fn test_summarize_demo_offers() {
        let mut offers = demo_offers();
        offers[1].company = offers[0].company.clone();
        offers[3].source = "LinkedIn".to_string();

        let summary = summarize(&offers);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.unique_companies, 3);
        assert_eq!(summary.unique_locations, 4);
        assert_eq!(
            summary.by_source,
            vec![("Données Démo".to_string(), 3), ("LinkedIn".to_string(), 1)]
        );
        assert_eq!(
            summary.by_contract,
            vec![("Stage".to_string(), 2), ("Alternance".to_string(), 2)]
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Développeur", 20), "Développeur");
        assert_eq!(truncate("Intégrateur web confirmé", 10), "Intégra...");
    }
}
