//! Static Indonesian administrative region tables.
//!
//! The four tables are read from JSON files once at startup and are only ever
//! read afterwards. Callers get lookups by parent id, not the raw vectors.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A record in one of the region tables.
pub trait Region: DeserializeOwned + Clone {
    /// File the table is loaded from, relative to the data directory.
    const FILE_NAME: &'static str;

    fn id(&self) -> i64;

    /// Id of the enclosing region in the next-larger table.
    fn parent_id(&self) -> Option<i64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    pub province_id: Option<i64>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    pub city_id: Option<i64>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Village {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_parent_id")]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Region for Province {
    const FILE_NAME: &'static str = "provinces.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        None
    }
}

impl Region for City {
    const FILE_NAME: &'static str = "cities.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.province_id
    }
}

impl Region for District {
    const FILE_NAME: &'static str = "districts.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.city_id
    }
}

impl Region for Village {
    const FILE_NAME: &'static str = "villages.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.district_id
    }
}

/// Region files sometimes carry ids as strings (`"64"`); both forms are read.
fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom(format!("invalid region id: {value}")))
}

fn deserialize_parent_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => id_from_value(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid parent id: {value}"))),
    }
}

/// One loaded table, in file order, with unique ids.
#[derive(Debug, Clone)]
pub struct RegionTable<R> {
    records: Vec<R>,
}

impl<R: Region> RegionTable<R> {
    /// Build a table, keeping the first record for any repeated id.
    pub fn from_records(records: Vec<R>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.id()) {
                unique.push(record);
            } else {
                tracing::warn!(
                    table = R::FILE_NAME,
                    id = record.id(),
                    "duplicate region id dropped"
                );
            }
        }

        Self { records: unique }
    }

    /// Load `R::FILE_NAME` from `dir`. A missing or unreadable file gives an
    /// empty table.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(R::FILE_NAME);
        match read_records::<R>(&path) {
            Ok(records) => {
                let table = Self::from_records(records);
                tracing::info!(table = R::FILE_NAME, count = table.len(), "loaded region table");
                table
            }
            Err(err) => {
                tracing::warn!("Error loading {}: {err:#}", R::FILE_NAME);
                Self::from_records(Vec::new())
            }
        }
    }

    pub fn all(&self) -> Vec<R> {
        self.records.clone()
    }

    pub fn by_parent(&self, parent_id: i64) -> Vec<R> {
        self.records
            .iter()
            .filter(|record| record.parent_id() == Some(parent_id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn read_records<R: Region>(path: &Path) -> Result<Vec<R>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse region file: {}", path.display()))
}

/// All four region tables.
#[derive(Debug, Clone)]
pub struct RegionDirectory {
    provinces: RegionTable<Province>,
    cities: RegionTable<City>,
    districts: RegionTable<District>,
    villages: RegionTable<Village>,
}

impl RegionDirectory {
    pub fn load(dir: &Path) -> Self {
        Self {
            provinces: RegionTable::load(dir),
            cities: RegionTable::load(dir),
            districts: RegionTable::load(dir),
            villages: RegionTable::load(dir),
        }
    }

    pub fn new(
        provinces: Vec<Province>,
        cities: Vec<City>,
        districts: Vec<District>,
        villages: Vec<Village>,
    ) -> Self {
        Self {
            provinces: RegionTable::from_records(provinces),
            cities: RegionTable::from_records(cities),
            districts: RegionTable::from_records(districts),
            villages: RegionTable::from_records(villages),
        }
    }

    pub fn provinces(&self) -> Vec<Province> {
        self.provinces.all()
    }

    pub fn cities_by_parent(&self, province_id: i64) -> Vec<City> {
        self.cities.by_parent(province_id)
    }

    pub fn districts_by_parent(&self, city_id: i64) -> Vec<District> {
        self.districts.by_parent(city_id)
    }

    pub fn villages_by_parent(&self, district_id: i64) -> Vec<Village> {
        self.villages.by_parent(district_id)
    }
}
