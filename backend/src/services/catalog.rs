//! Vegetable reference catalog
//!
//! Loaded once at start-up from a human-edited CSV table and shared
//! read-only for the life of the process.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{validate_profile, RainPreference, VegetableProfile};

use crate::error::{AppError, AppResult};

/// Required columns as (English name, Japanese label)
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("name", "野菜名"),
    ("min_sow_temp", "種まき適温(最低)"),
    ("max_sow_temp", "種まき適温(最高)"),
    ("rain_preference", "雨の好み"),
    ("days_to_transplant", "定植までの日数"),
];

/// One raw row of the reference table
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "野菜名")]
    name: String,
    #[serde(alias = "種まき適温(最低)")]
    min_sow_temp: String,
    #[serde(alias = "種まき適温(最高)")]
    max_sow_temp: String,
    #[serde(alias = "雨の好み")]
    rain_preference: String,
    #[serde(alias = "定植までの日数")]
    days_to_transplant: String,
    #[serde(alias = "収穫基準", default)]
    harvest_basis: Option<String>,
    #[serde(alias = "収穫までの日数", default)]
    days_to_harvest: Option<String>,
}

impl CatalogRow {
    fn into_profile(self, line: usize) -> AppResult<VegetableProfile> {
        let row_error = |field: &str, value: &str| {
            AppError::CatalogLoad(format!("row {}: invalid {} '{}'", line, field, value))
        };

        let min_sow_temp: Decimal = self
            .min_sow_temp
            .parse()
            .map_err(|_| row_error("min_sow_temp", &self.min_sow_temp))?;
        let max_sow_temp: Decimal = self
            .max_sow_temp
            .parse()
            .map_err(|_| row_error("max_sow_temp", &self.max_sow_temp))?;
        let rain_preference: RainPreference = self
            .rain_preference
            .parse()
            .map_err(|_| row_error("rain_preference", &self.rain_preference))?;
        let days_to_transplant: u32 = self
            .days_to_transplant
            .parse()
            .map_err(|_| row_error("days_to_transplant", &self.days_to_transplant))?;
        let days_to_harvest = match self.days_to_harvest.as_deref() {
            Some(value) => Some(
                value
                    .parse::<u32>()
                    .map_err(|_| row_error("days_to_harvest", value))?,
            ),
            None => None,
        };

        let profile = VegetableProfile {
            name: self.name,
            min_sow_temp,
            max_sow_temp,
            rain_preference,
            days_to_transplant,
            harvest_basis_label: self.harvest_basis,
            days_to_harvest,
        };
        validate_profile(&profile)
            .map_err(|msg| AppError::CatalogLoad(format!("row {}: {}", line, msg)))?;
        Ok(profile)
    }
}

/// The loaded reference catalog, in file order
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<VegetableProfile>,
}

impl Catalog {
    /// Load the catalog from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} vegetables from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load the catalog from any CSV source
    pub fn from_reader<R: Read>(source: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|e| AppError::CatalogLoad(format!("unreadable header: {}", e)))?
            .clone();
        for (english, japanese) in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *english || h == *japanese) {
                return Err(AppError::CatalogLoad(format!(
                    "missing required column '{}'",
                    english
                )));
            }
        }

        let mut profiles: Vec<VegetableProfile> = Vec::new();
        for (index, record) in reader.deserialize::<CatalogRow>().enumerate() {
            // header is line 1
            let line = index + 2;
            let row = record.map_err(|e| AppError::CatalogLoad(format!("row {}: {}", line, e)))?;
            let profile = row.into_profile(line)?;
            if profiles.iter().any(|p| p.name == profile.name) {
                return Err(AppError::CatalogLoad(format!(
                    "row {}: duplicate vegetable '{}'",
                    line, profile.name
                )));
            }
            profiles.push(profile);
        }

        Ok(Self { profiles })
    }

    /// Find a vegetable by name
    pub fn lookup(&self, name: &str) -> AppResult<&VegetableProfile> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AppError::UnknownVegetable(name.to_string()))
    }

    pub fn profiles(&self) -> &[VegetableProfile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH_CSV: &str = "\
 name , min_sow_temp ,max_sow_temp, rain_preference,days_to_transplant,harvest_basis,days_to_harvest
トマト,20,30,dislikes,60,transplant date,50
ほうれん草,15,20,likes,0,,30
ラディッシュ,15,25,neutral,0,,
";

    const JAPANESE_CSV: &str = "\
野菜名,種まき適温(最低),種まき適温(最高), 雨の好み ,定植までの日数
キャベツ,15,25,普通,30
";

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let catalog = Catalog::from_reader(ENGLISH_CSV.as_bytes()).expect("catalog should load");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.names(), vec!["トマト", "ほうれん草", "ラディッシュ"]);
    }

    #[test]
    fn test_optional_columns_parse_when_present_and_blank() {
        let catalog = Catalog::from_reader(ENGLISH_CSV.as_bytes()).unwrap();
        let tomato = catalog.lookup("トマト").unwrap();
        assert_eq!(tomato.rain_preference, RainPreference::Dislikes);
        assert_eq!(tomato.harvest_basis_label.as_deref(), Some("transplant date"));
        assert_eq!(tomato.days_to_harvest, Some(50));

        let radish = catalog.lookup("ラディッシュ").unwrap();
        assert_eq!(radish.harvest_basis_label, None);
        assert_eq!(radish.days_to_harvest, None);
    }

    #[test]
    fn test_japanese_headers_and_tokens() {
        let catalog = Catalog::from_reader(JAPANESE_CSV.as_bytes()).expect("catalog should load");
        let cabbage = catalog.lookup("キャベツ").unwrap();
        assert_eq!(cabbage.min_sow_temp, Decimal::from(15));
        assert_eq!(cabbage.max_sow_temp, Decimal::from(25));
        assert_eq!(cabbage.rain_preference, RainPreference::Neutral);
        assert_eq!(cabbage.days_to_transplant, 30);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "name,min_sow_temp,rain_preference,days_to_transplant\nトマト,20,dislikes,60\n";
        match Catalog::from_reader(csv.as_bytes()) {
            Err(AppError::CatalogLoad(msg)) => assert!(msg.contains("max_sow_temp"), "{}", msg),
            other => panic!("expected CatalogLoad, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_inverted_band_fails_with_row_number() {
        let csv = "name,min_sow_temp,max_sow_temp,rain_preference,days_to_transplant\nトマト,31,30,dislikes,60\n";
        match Catalog::from_reader(csv.as_bytes()) {
            Err(AppError::CatalogLoad(msg)) => assert!(msg.starts_with("row 2"), "{}", msg),
            other => panic!("expected CatalogLoad, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_bad_rain_token_fails() {
        let csv = "name,min_sow_temp,max_sow_temp,rain_preference,days_to_transplant\nトマト,20,30,sometimes,60\n";
        assert!(matches!(
            Catalog::from_reader(csv.as_bytes()),
            Err(AppError::CatalogLoad(_))
        ));
    }

    #[test]
    fn test_duplicate_names_fail() {
        let csv = "name,min_sow_temp,max_sow_temp,rain_preference,days_to_transplant\nナス,20,30,likes,60\nナス,18,28,likes,50\n";
        match Catalog::from_reader(csv.as_bytes()) {
            Err(AppError::CatalogLoad(msg)) => assert!(msg.starts_with("row 3"), "{}", msg),
            other => panic!("expected CatalogLoad, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(matches!(
            Catalog::load("does/not/exist.csv"),
            Err(AppError::CatalogLoad(_))
        ));
    }

    #[test]
    fn test_unknown_vegetable_lookup() {
        let catalog = Catalog::from_reader(ENGLISH_CSV.as_bytes()).unwrap();
        match catalog.lookup("ドリアン") {
            Err(AppError::UnknownVegetable(name)) => assert_eq!(name, "ドリアン"),
            other => panic!("expected UnknownVegetable, got {:?}", other.map(|p| &p.name)),
        }
    }

    #[test]
    fn test_shipped_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/vegetables.csv");
        let catalog = Catalog::load(path).expect("shipped catalog should load");
        assert!(!catalog.is_empty());
    }
}
