//! Relational row types handed over by the table loader.
//!
//! Column names follow the source tables (camelCase on the wire). Columns the
//! recommender never reads (prices, banner images, ...) are ignored on
//! deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CollectionId = i64;
pub type UserId = i64;
pub type OrgId = i64;
pub type TagId = i64;
pub type ActivityId = i64;

/// Lenient timestamp columns.
///
/// Accepts RFC 3339 strings as well as naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// values (space separator allowed), which are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

/// A recommendable bundle of activities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub collection_type: String,
    pub organization_id: OrgId,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Collection {
    #[must_use]
    pub fn new(
        id: CollectionId,
        name: impl Into<String>,
        collection_type: impl Into<String>,
        organization_id: OrgId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            collection_type: collection_type.into(),
            organization_id,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deleted(mut self, at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(at);
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Name and description joined for text encoding
    pub fn text(&self) -> String {
        format!("{} {}", self.name, self.description.as_deref().unwrap_or(""))
    }
}

/// A taxonomy entry: a label inside a category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub text: String,
    pub category: String,
}

impl Tag {
    pub fn new(id: TagId, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
        }
    }

    /// Compound `label-category` token. Only the space character is
    /// replaced by `_`; tabs and other whitespace are kept as they are.
    /// Case is preserved.
    pub fn compound(&self) -> String {
        format!("{}-{}", self.text.replace(' ', "_"), self.category.replace(' ', "_"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTag {
    pub collection_id: CollectionId,
    pub tag_id: TagId,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLink {
    pub collection_id: CollectionId,
    pub activity_id: ActivityId,
    #[serde(default)]
    pub order: Option<i32>,
}

impl ActivityLink {
    pub fn new(collection_id: CollectionId, activity_id: ActivityId) -> Self {
        Self {
            collection_id,
            activity_id,
            order: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserOrg {
    pub user_id: UserId,
    pub org_id: OrgId,
}

/// A user's completion of (or attempt at) a collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    /// Nullable in the source table; such rows never join
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub collection_id: Option<CollectionId>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub xp_earned: Option<i64>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionResult {
    pub fn new(user_id: UserId, collection_id: CollectionId) -> Self {
        Self {
            user_id: Some(user_id),
            collection_id: Some(collection_id),
            score: None,
            xp_earned: None,
            created_at: None,
        }
    }
}

/// The row sets one preprocessing pass consumes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    pub collections: Vec<Collection>,
    pub collection_results: Vec<CollectionResult>,
    pub collection_tags: Vec<CollectionTag>,
    pub activity_links: Vec<ActivityLink>,
    pub user_orgs: Vec<UserOrg>,
    pub tags: Vec<Tag>,
}
