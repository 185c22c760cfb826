use foundation::time::Timestamp;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tag taxonomy used by the feed. The engine only consumes geography tags;
/// the rest are carried so the boundary between "known" and "unknown"
/// categories is explicit rather than stringly-typed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagCategory {
    Source,
    Topic,
    Geography,
    Events,
    Other,
}

impl TagCategory {
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "source" => TagCategory::Source,
            "topic" => TagCategory::Topic,
            "geography" => TagCategory::Geography,
            "events" | "event" => TagCategory::Events,
            _ => TagCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Source => "source",
            TagCategory::Topic => "topic",
            TagCategory::Geography => "geography",
            TagCategory::Events => "events",
            TagCategory::Other => "other",
        }
    }
}

// Feeds occasionally invent categories; deserialization must not reject an
// item over a tag the engine ignores anyway.
impl<'de> Deserialize<'de> for TagCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TagCategory::from_str_lossy(&raw))
    }
}

impl Serialize for TagCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsTag {
    pub name: String,
    pub category: TagCategory,
}

/// One item from the feed collaborator. Content fields are carried through
/// untouched; only `tags` and `timestamp` matter to aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub tags: Vec<NewsTag>,
}

impl NewsItem {
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.timestamp_ms)
    }

    pub fn geography_tags(&self) -> impl Iterator<Item = &NewsTag> {
        self.tags
            .iter()
            .filter(|t| t.category == TagCategory::Geography)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewsItem, TagCategory};

    #[test]
    fn unknown_categories_decode_as_other() {
        let item: NewsItem = serde_json::from_str(
            r#"{
                "title": "t",
                "timestamp": 1000,
                "tags": [
                    {"name": "France", "category": "geography"},
                    {"name": "reuters", "category": "source"},
                    {"name": "weird", "category": "sentiment"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(item.tags[0].category, TagCategory::Geography);
        assert_eq!(item.tags[2].category, TagCategory::Other);
        assert_eq!(item.geography_tags().count(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let item: NewsItem = serde_json::from_str(r#"{"timestamp": 5}"#).unwrap();
        assert_eq!(item.title, "");
        assert!(item.tags.is_empty());
        assert_eq!(item.timestamp().millis(), 5);
    }

    #[test]
    fn category_round_trips_through_json() {
        let json = serde_json::to_string(&TagCategory::Geography).unwrap();
        assert_eq!(json, "\"geography\"");
        let back: TagCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TagCategory::Geography);
    }
}
