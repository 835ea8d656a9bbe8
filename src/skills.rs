use crate::models::NOT_SPECIFIED;

const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "angular",
    "vue",
    "node.js",
    "sql",
    "mongodb",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "data science",
    "devops",
    "cloud",
    "php",
    "symfony",
    "laravel",
    "c#",
    ".net",
    "html",
    "css",
    "typescript",
];

/// Skills named in a job title, in vocabulary order, comma-joined.
///
/// Plain substring matching: "javascript" also yields "java".
pub fn tag_skills(title: &str) -> String {
    let title_lower = title.to_lowercase();

    let skills: Vec<&str> = SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| title_lower.contains(skill))
        .collect();

    if skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        skills.join(", ")
    }
}
