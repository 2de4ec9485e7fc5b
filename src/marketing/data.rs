//! Typed model of the embedded marketing payload.
//!
//! The payload is a JSON object mapping group names to group records. Group
//! order is meaningful (descriptors are enumerated in payload order), so the
//! top level is decoded through `serde_json::Map` - which preserves insertion
//! order via the `preserve_order` feature - instead of a hash map.

use serde::Deserialize;
use serde_json::Value;

/// One downloadable file variant advertised for a marketing item.
///
/// `file_extension` and `download_url` may carry stray surrounding
/// whitespace in the upstream data; both are trimmed at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadVariant {
    /// File extension identifying the variant (e.g. `png`, `jpg`, `ai`).
    pub file_extension: String,
    /// Full source URL for the variant.
    pub download_url: String,
}

/// One marketing item: a position tag plus its advertised variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketingItem {
    /// Categorical position tag (e.g. `front`, `bottom`).
    pub position_slug: String,
    /// Advertised file variants, in payload order. Extensions are not
    /// guaranteed unique; selection collapses duplicates last-wins.
    pub itemdownload_set: Vec<DownloadVariant>,
}

/// Wire shape of one group record (`{"items": [...]}`).
#[derive(Debug, Deserialize)]
struct GroupRecord {
    items: Vec<MarketingItem>,
}

/// A named group of marketing items; the name doubles as the output
/// subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingGroup {
    /// Group name, taken verbatim from the payload's object key.
    pub name: String,
    /// Items in payload order.
    pub items: Vec<MarketingItem>,
}

/// The decoded marketing payload: groups in payload insertion order.
///
/// Transient - built once per run by the extractor and consumed by the
/// item enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketingData {
    groups: Vec<MarketingGroup>,
}

impl MarketingData {
    /// Decodes marketing data from unescaped JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the text is not a JSON
    /// object of group records.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        let mut groups = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let record: GroupRecord = serde_json::from_value(value)?;
            groups.push(MarketingGroup {
                name,
                items: record.items,
            });
        }
        Ok(Self { groups })
    }

    /// Groups in payload insertion order.
    #[must_use]
    pub fn groups(&self) -> &[MarketingGroup] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the payload contains no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all groups.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
