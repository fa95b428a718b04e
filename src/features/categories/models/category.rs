use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Explicit category-type tag stored on a category node.
///
/// Decides which listing detail block a category expects. Nodes created
/// before the tag existed carry `NULL` and fall back to name matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "category_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Vehicle,
    Property,
    Job,
    Pet,
    General,
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKind::Vehicle => write!(f, "vehicle"),
            CategoryKind::Property => write!(f, "property"),
            CategoryKind::Job => write!(f, "job"),
            CategoryKind::Pet => write!(f, "pet"),
            CategoryKind::General => write!(f, "general"),
        }
    }
}

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub display_order: i32,
    pub kind: Option<CategoryKind>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Top-level categories have no parent
    pub fn is_topic(&self) -> bool {
        self.parent_id.is_none()
    }
}
