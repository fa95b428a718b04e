//! Which listing detail block a category expects.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::{Category, CategoryKind};
use crate::features::categories::tree::CategoryTree;

/// Variant of the per-category attribute block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Vehicle,
    Property,
    Job,
    Pet,
    #[default]
    None,
}

impl From<CategoryKind> for DetailKind {
    fn from(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Vehicle => DetailKind::Vehicle,
            CategoryKind::Property => DetailKind::Property,
            CategoryKind::Job => DetailKind::Job,
            CategoryKind::Pet => DetailKind::Pet,
            CategoryKind::General => DetailKind::None,
        }
    }
}

impl std::fmt::Display for DetailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailKind::Vehicle => write!(f, "vehicle"),
            DetailKind::Property => write!(f, "property"),
            DetailKind::Job => write!(f, "job"),
            DetailKind::Pet => write!(f, "pet"),
            DetailKind::None => write!(f, "none"),
        }
    }
}

const VEHICLE_CATEGORY_WORDS: &[&str] = &["car", "truck", "motorcycle"];
const PROPERTY_TOPIC_WORDS: &[&str] = &["rent", "real estate"];
const PROPERTY_CATEGORY_WORDS: &[&str] = &["apartment", "house"];
const PET_CATEGORY_WORDS: &[&str] = &["dog", "cat"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Resolve the detail kind for `category`, whose root topic is `topic`.
///
/// A stored tag on the category, then on its topic, takes priority. Untagged
/// nodes go through keyword matching in fixed precedence order
/// (vehicle, property, job, pet), first hit wins.
pub fn detail_kind(category: &Category, topic: Option<&Category>) -> DetailKind {
    if let Some(kind) = category.kind.or_else(|| topic.and_then(|t| t.kind)) {
        return kind.into();
    }
    keyword_detail_kind(&category.name, topic.map(|t| t.name.as_str()))
}

/// Name-based fallback for categories without a stored tag.
pub fn keyword_detail_kind(category_name: &str, topic_name: Option<&str>) -> DetailKind {
    let topic = topic_name.unwrap_or_default().to_lowercase();
    let name = category_name.to_lowercase();

    if topic.contains("vehicle") || contains_any(&name, VEHICLE_CATEGORY_WORDS) {
        DetailKind::Vehicle
    } else if contains_any(&topic, PROPERTY_TOPIC_WORDS)
        || contains_any(&name, PROPERTY_CATEGORY_WORDS)
    {
        DetailKind::Property
    } else if topic.contains("job") {
        DetailKind::Job
    } else if topic.contains("pet") || contains_any(&name, PET_CATEGORY_WORDS) {
        DetailKind::Pet
    } else {
        DetailKind::None
    }
}

/// Look up `category_id` in the tree and resolve its detail kind.
/// Unknown ids have no detail block.
pub fn detail_kind_for(tree: &CategoryTree, category_id: Uuid) -> DetailKind {
    match tree.get(category_id) {
        Some(category) => detail_kind(category, tree.topic_of(category_id)),
        None => DetailKind::None,
    }
}
