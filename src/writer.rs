use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::{NormalizedOffer, RawOffer, RunMetadata};

pub const RAW_JSON_FILE: &str = "offres_it_brutes.json";
pub const RAW_CSV_FILE: &str = "offres_it_brutes.csv";
pub const METADATA_FILE: &str = "metadata_collecte.json";

// --- Normalized offers ---

/// Writes `<prefix>_<YYYYMMDD_HHMMSS>.csv` under `dir`, creating it first.
/// An empty slice writes nothing, leaves `dir` untouched and returns `None`.
pub fn save_offers_csv(offers: &[NormalizedOffer], dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    if offers.is_empty() {
        warn!("no offers to save");
        return Ok(None);
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.csv", prefix, timestamp));

    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for offer in offers {
        writer.serialize(offer)?;
    }
    writer.flush()?;

    info!("{} offers written to {}", offers.len(), path.display());
    Ok(Some(path))
}

/// Data rows in a CSV file, header excluded.
pub fn count_csv_rows(path: &Path) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

// --- Raw API dump ---

#[derive(Debug, Clone)]
pub struct RawOutputPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub metadata: PathBuf,
}

/// Every key seen across the offers, in first-seen order.
fn raw_columns(offers: &[RawOffer]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for offer in offers {
        for key in offer.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }
    columns
}

fn raw_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_raw_csv(offers: &[RawOffer], path: &Path) -> Result<()> {
    let columns = raw_columns(offers);
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(&columns)?;
    for offer in offers {
        writer.write_record(columns.iter().map(|column| raw_cell(offer.get(*column))))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Dumps the sweep as JSON and CSV plus a metadata file, all under `dir`.
pub fn save_raw_offers(offers: &[RawOffer], keywords: &[&str], dir: &Path) -> Result<RawOutputPaths> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let paths = RawOutputPaths {
        json: dir.join(RAW_JSON_FILE),
        csv: dir.join(RAW_CSV_FILE),
        metadata: dir.join(METADATA_FILE),
    };

    write_json(offers, &paths.json)?;
    write_raw_csv(offers, &paths.csv)?;

    let metadata = RunMetadata {
        date_collecte: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        total_offres: offers.len(),
        metiers_recherches: keywords.iter().map(|k| k.to_string()).collect(),
    };
    write_json(&metadata, &paths.metadata)?;

    info!("raw offers saved under {}", dir.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_offers;
    use serde_json::json;
    use tempfile::TempDir;

    const CANONICAL_HEADER: [&str; 13] = [
        "Intitulé du poste",
        "Nom de l entreprise",
        "Ville ou région",
        "Date de publication",
        "Type de contrat",
        "Nombre d années d expérience demandées",
        "Niveau de seniorité",
        "Télétravail",
        "Fourchette salariale",
        "Compétences mentionnées",
        "Source",
        "URL",
        "Description du poste",
    ];

    fn read_offers_csv(path: &Path) -> Result<Vec<NormalizedOffer>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let offers = reader
            .deserialize()
            .collect::<std::result::Result<Vec<NormalizedOffer>, _>>()
            .with_context(|| format!("Failed to read offers from {}", path.display()))?;
        Ok(offers)
    }

    fn raw(value: Value) -> RawOffer {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_save_empty_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data").join("offres");

        let result = save_offers_csv(&[], &target, "stages_alternance").unwrap();
        assert!(result.is_none());
        assert!(!target.exists());
    }

    #[test]
    fn test_save_and_read_back_keeps_order() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("offres");
        let mut offers = demo_offers();
        offers.reverse();

        let path = save_offers_csv(&offers, &target, "stages_alternance")
            .unwrap()
            .unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("stages_alternance_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "stages_alternance_20240101_120000.csv".len());

        assert_eq!(count_csv_rows(&path).unwrap(), 4);
        assert_eq!(read_offers_csv(&path).unwrap(), offers);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, CANONICAL_HEADER);
    }

    #[test]
    fn test_raw_columns_first_seen_order() {
        let offers = vec![
            raw(json!({"id": "1", "intitule": "Dev"})),
            raw(json!({"id": "2", "salaire": {"libelle": "35k"}, "intitule": "Ops"})),
        ];
        assert_eq!(raw_columns(&offers), vec!["id", "intitule", "salaire"]);
    }

    #[test]
    fn test_save_raw_offers_writes_three_files() {
        let dir = TempDir::new().unwrap();
        let offers = vec![
            raw(json!({"id": "1", "intitule": "Développeur", "search_keyword": "développeur"})),
            raw(json!({"id": "2", "lieuTravail": {"libelle": "Paris"}, "alternance": false, "note": null})),
        ];

        let paths = save_raw_offers(&offers, &["développeur", "devops"], dir.path()).unwrap();

        let json_back: Vec<RawOffer> =
            serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json_back, offers);
        assert!(fs::read_to_string(&paths.json).unwrap().contains("Développeur"));

        let mut reader = csv::Reader::from_path(&paths.csv).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            header,
            ["id", "intitule", "search_keyword", "lieuTravail", "alternance", "note"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][2], "développeur");
        assert_eq!(&rows[1][1], "");
        assert_eq!(&rows[1][3], r#"{"libelle":"Paris"}"#);
        assert_eq!(&rows[1][4], "false");
        assert_eq!(&rows[1][5], "");

        let metadata: Value =
            serde_json::from_str(&fs::read_to_string(&paths.metadata).unwrap()).unwrap();
        assert_eq!(metadata["total_offres"], 2);
        assert_eq!(metadata["metiers_recherches"], json!(["développeur", "devops"]));
        assert!(metadata["date_collecte"].as_str().unwrap().contains('T'));
    }
}
