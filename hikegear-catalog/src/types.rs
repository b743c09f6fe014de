//! Data model types for gear lists and backpacks.
//!
//! These types mirror the persisted JSON documents: a profile's private gear
//! list, stored backpack records, and the intermediate models produced by the
//! spreadsheet reader and the remote page parser.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Gear list ───────────────────────────────────────────────────────────────

/// A single piece of gear inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearItem {
    /// Unique across the whole list, not just the owning category.
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Weight in grams. Stored documents may hold any non-negative number;
    /// fractional weights are rounded to the nearest gram on load.
    #[serde(default, deserialize_with = "grams_from_number")]
    pub weight: u32,
}

fn grams_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let grams = f64::deserialize(deserializer)?;
    let rounded = grams.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return Err(serde::de::Error::custom(format!(
            "weight {grams} is not a valid number of grams"
        )));
    }
    Ok(rounded as u32)
}

/// A named group of gear items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearCategory {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<GearItem>,
}

impl GearCategory {
    /// Create an empty category.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// A profile's private gear: an ordered sequence of categories.
///
/// Serialized as a bare JSON array, the same shape the profile document uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GearList {
    pub categories: Vec<GearCategory>,
}

impl GearList {
    pub fn new(categories: Vec<GearCategory>) -> Self {
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Ids of every category in the list.
    pub fn category_ids(&self) -> HashSet<u32> {
        self.categories.iter().map(|c| c.id).collect()
    }

    /// Ids of every item in the list, across all categories.
    pub fn item_ids(&self) -> HashSet<u32> {
        self.items().map(|i| i.id).collect()
    }

    /// Iterate over every item in category order.
    pub fn items(&self) -> impl Iterator<Item = &GearItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

impl From<Vec<GearCategory>> for GearList {
    fn from(categories: Vec<GearCategory>) -> Self {
        Self { categories }
    }
}

// ── Spreadsheet rows ────────────────────────────────────────────────────────

/// A type-tagged spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// The text content if this is a string cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// What a spreadsheet row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A gear item: name, description, weight.
    Item,
    /// Starts a new category named by the description cell.
    CategoryMarker,
}

/// One classified row of the name/description/weight columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub kind: RowKind,
    pub name: CellValue,
    pub description: CellValue,
    pub weight: CellValue,
}

impl SheetRow {
    pub fn item(
        name: impl Into<CellValue>,
        description: impl Into<CellValue>,
        weight: impl Into<CellValue>,
    ) -> Self {
        Self {
            kind: RowKind::Item,
            name: name.into(),
            description: description.into(),
            weight: weight.into(),
        }
    }

    pub fn category(name: impl Into<CellValue>, description: impl Into<CellValue>) -> Self {
        Self {
            kind: RowKind::CategoryMarker,
            name: name.into(),
            description: description.into(),
            weight: CellValue::Empty,
        }
    }
}

// ── Remote page model ───────────────────────────────────────────────────────

/// A gear list scraped from a third-party page, fields still as displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemotePage {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<RemoteCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<RemoteItem>,
}

/// One item row of a remote list. `weight`, `unit` and `quantity` are raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub worn: bool,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: String,
}

/// Weight unit label shown next to a remote item's weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    G,
    Kg,
    Oz,
    Lb,
}

impl WeightUnit {
    /// Multiplier converting one unit into grams.
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            Self::G => 1.0,
            Self::Kg => 1000.0,
            Self::Oz => 28.35,
            Self::Lb => 453.59,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::G => "g",
            Self::Kg => "kg",
            Self::Oz => "oz",
            Self::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "g" => Ok(Self::G),
            "kg" => Ok(Self::Kg),
            "oz" => Ok(Self::Oz),
            "lb" => Ok(Self::Lb),
            other => Err(format!("unknown weight unit '{other}'")),
        }
    }
}

// ── Backpack ────────────────────────────────────────────────────────────────

/// Identifier of the profile that owns a backpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item of a backpack list, weight already in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackpackItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub worn: bool,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackpackCategory {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub items: Vec<BackpackItem>,
}

/// A backpack that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackpackDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub list: Vec<BackpackCategory>,
}

impl BackpackDraft {
    /// Total weight in grams, counting quantity.
    pub fn total_weight(&self) -> f64 {
        self.list
            .iter()
            .flat_map(|c| c.items.iter())
            .map(|i| i.weight * i.quantity)
            .sum()
    }
}

/// A stored backpack record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backpack {
    pub id: u64,
    pub owner: ProfileId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub list: Vec<BackpackCategory>,
    #[serde(default)]
    pub shared: bool,
}

/// Exclusive upper bound of the category id space.
pub const CATEGORY_ID_SPACE: u32 = 1000;

/// Exclusive upper bound of the item id space, shared by all categories.
pub const ITEM_ID_SPACE: u32 = 10000;
