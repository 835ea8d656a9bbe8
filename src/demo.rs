use crate::models::{ContractType, NormalizedOffer, Telework};

pub const DEMO_SOURCE: &str = "Données Démo";

#[allow(clippy::too_many_arguments)]
fn demo_offer(
    title: &str,
    company: &str,
    location: &str,
    published: &str,
    contract: ContractType,
    description: &str,
    telework: Telework,
    skills: &str,
    salary: &str,
    url: &str,
) -> NormalizedOffer {
    NormalizedOffer {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        published: published.to_string(),
        contract,
        experience_years: "0".to_string(),
        seniority: "Étudiant".to_string(),
        telework,
        salary: salary.to_string(),
        skills: skills.to_string(),
        source: DEMO_SOURCE.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    }
}

/// Placeholder offers written when no board returned anything.
/// A `Source` of "Données Démo" in the output means live collection failed.
pub fn demo_offers() -> Vec<NormalizedOffer> {
    vec![
        demo_offer(
            "Stage Développeur FullStack React/Node.js",
            "Startup Tech Paris",
            "Paris",
            "15/01/2024",
            ContractType::Stage,
            "Stage en développement FullStack avec React et Node.js. Participation à des projets innovants.",
            Telework::Hybrid,
            "javascript, react, node.js, sql",
            "Gratification légale",
            "https://example.com/offre1",
        ),
        demo_offer(
            "Alternance Data Analyst Python/SQL",
            "Data Company",
            "Lyon",
            "10/01/2024",
            ContractType::Alternance,
            "Alternance en analyse de données avec Python, SQL et outils de visualisation.",
            Telework::No,
            "python, sql, data analysis, pandas",
            "Salaire alternance",
            "https://example.com/offre2",
        ),
        demo_offer(
            "Stage DevOps AWS/Docker",
            "Cloud Solutions",
            "Toulouse",
            "20/01/2024",
            ContractType::Stage,
            "Stage en infrastructure cloud et automatisation avec AWS et Docker.",
            Telework::Yes,
            "aws, docker, python, linux",
            "Gratification légale",
            "https://example.com/offre3",
        ),
        demo_offer(
            "Alternance Développeur Mobile Flutter",
            "App Startup",
            "Bordeaux",
            "12/01/2024",
            ContractType::Alternance,
            "Alternance en développement mobile cross-platform avec Flutter.",
            Telework::Hybrid,
            "flutter, dart, mobile, android, ios",
            "Salaire alternance",
            "https://example.com/offre4",
        ),
    ]
}
