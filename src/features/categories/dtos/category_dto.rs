use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::{Category, CategoryKind};
use crate::features::categories::schema::{detail_kind, DetailKind};
use crate::features::categories::tree::CategoryTree;

/// Minimal category reference embedded in other responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategorySummaryDto {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            slug: c.slug.clone(),
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    /// Parent populated as `{name, slug}` when it exists
    pub parent: Option<CategorySummaryDto>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub display_order: i32,
    pub kind: Option<CategoryKind>,
    /// Detail block listings in this category are expected to carry
    pub detail_schema: DetailKind,
}

impl CategoryResponseDto {
    pub fn from_node(c: &Category, tree: &CategoryTree) -> Self {
        let parent = c.parent_id.and_then(|id| tree.get(id)).map(CategorySummaryDto::from);
        let detail_schema = detail_kind(c, tree.topic_of(c.id));

        Self {
            id: c.id,
            parent_id: c.parent_id,
            parent,
            name: c.name.clone(),
            slug: c.slug.clone(),
            description: c.description.clone(),
            icon: c.icon.clone(),
            color: c.color.clone(),
            display_order: c.display_order,
            kind: c.kind,
            detail_schema,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub display_order: i32,
    pub detail_schema: DetailKind,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build the nested view from active topics down
    pub fn build_tree(tree: &CategoryTree) -> Vec<CategoryTreeDto> {
        tree.topics()
            .into_iter()
            .map(|root| Self::build_node(root, tree, 0))
            .collect()
    }

    fn build_node(category: &Category, tree: &CategoryTree, depth: usize) -> CategoryTreeDto {
        // Depth bound keeps a corrupted parent cycle from recursing forever
        let children = if depth < tree.len() {
            tree.children(category.id)
                .into_iter()
                .map(|child| Self::build_node(child, tree, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
            display_order: category.display_order,
            detail_schema: detail_kind(category, tree.topic_of(category.id)),
            children,
        }
    }
}
