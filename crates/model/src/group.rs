use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

/// Packed ARGB color a group's measures are drawn in, one byte per channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub struct GroupColor(i64);

impl GroupColor {
    pub fn new(argb: i64) -> Self {
        Self(argb)
    }

    pub fn argb(&self) -> i64 {
        self.0
    }

    /// `RRGGBB` without the alpha channel, the form the static-map thumbnail
    /// renderer consumes.
    pub fn rgb_hex(&self) -> String {
        format!("{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl Default for GroupColor {
    // opaque blue, the editor's suggestion for new groups
    fn default() -> Self {
        Self(0xFF00_00FF)
    }
}

/// A color-coded category measures are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub color: GroupColor,
    pub updated_at: DateTime<Utc>,
}

impl HasId for Group {
    type IdType = String;
}

impl Group {
    pub fn new(name: String, color: GroupColor) -> Self {
        Self {
            name,
            color,
            updated_at: Utc::now(),
        }
    }
}
