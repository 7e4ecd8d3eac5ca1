//! Represents a single tracked asset and the payloads that create or change it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Format used for `created_at` / `updated_at`: local time, second precision.
///
/// Lexicographic order of strings in this format matches chronological order,
/// which the service relies on to keep `updated_at >= created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A tracked asset as persisted in the backing file and returned over HTTP.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    /// Identifier assigned by the service (`max + 1`).
    pub id: u64,

    /// Display name, stored trimmed.
    pub name: String,

    /// Free-form status label (e.g. "active", "retired").
    pub status: String,

    /// When the asset was created. Never changes afterwards.
    pub created_at: String,

    /// When the asset was last written by create or update.
    pub updated_at: String,
}

/// Body of `POST /api/assets`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as invalid input rather than a deserialization failure. Only a
/// JSON object is accepted; arrays and scalars are rejected.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(try_from = "Map<String, Value>")]
pub struct NewAsset {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Body of `PUT /api/assets/{id}`. Absent fields are left untouched.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(try_from = "Map<String, Value>")]
pub struct AssetPatch {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<Map<String, Value>> for NewAsset {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            name: string_field(&map, "name")?,
            status: string_field(&map, "status")?,
        })
    }
}

impl TryFrom<Map<String, Value>> for AssetPatch {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            name: string_field(&map, "name")?,
            status: string_field(&map, "status")?,
        })
    }
}

/// `null` and absent are the same; anything other than a string is an error.
fn string_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(format!("field `{}` must be a string, got {}", key, other)),
    }
}

impl NewAsset {
    /// Returns the trimmed name and the status when both are usable.
    pub fn validated(&self) -> Option<(String, String)> {
        let name = self.name.as_deref()?.trim();
        let status = self.status.as_deref()?;
        if name.is_empty() || status.is_empty() {
            return None;
        }
        Some((name.to_string(), status.to_string()))
    }
}

impl AssetPatch {
    /// Merge the present fields onto `asset`. Does not touch timestamps.
    pub fn apply_to(&self, asset: &mut Asset) {
        if let Some(name) = &self.name {
            asset.name = name.trim().to_string();
        }
        if let Some(status) = &self.status {
            asset.status = status.clone();
        }
    }
}
