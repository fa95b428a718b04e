use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryTreeDto};
use crate::features::categories::store::CategoryStore;
use crate::features::categories::tree::CategoryTree;

struct CachedTree {
    tree: Arc<CategoryTree>,
    loaded_at: Instant,
}

/// Service for category operations.
///
/// Categories are read-only here, so the whole forest is loaded once and
/// served from memory until the cache TTL runs out.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    cache: RwLock<Option<CachedTree>>,
    cache_ttl: Duration,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
            cache_ttl,
        }
    }

    /// Current category snapshot, reloaded from storage when stale
    pub async fn tree(&self) -> Result<Arc<CategoryTree>> {
        {
            let cache_read = self.cache.read().await;
            if let Some(ref cached) = *cache_read {
                if cached.loaded_at.elapsed() < self.cache_ttl {
                    return Ok(Arc::clone(&cached.tree));
                }
            }
        }

        let mut cache_write = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(ref cached) = *cache_write {
            if cached.loaded_at.elapsed() < self.cache_ttl {
                return Ok(Arc::clone(&cached.tree));
            }
        }

        let tree = Arc::new(CategoryTree::new(self.store.load_all().await?));
        if tree.is_empty() {
            tracing::warn!("Category tree loaded with no categories");
        } else {
            tracing::debug!("Category tree loaded with {} nodes", tree.len());
        }
        *cache_write = Some(CachedTree {
            tree: Arc::clone(&tree),
            loaded_at: Instant::now(),
        });

        Ok(tree)
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let tree = self.tree().await?;
        Ok(tree
            .active()
            .into_iter()
            .map(|c| CategoryResponseDto::from_node(c, &tree))
            .collect())
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let tree = self.tree().await?;
        Ok(CategoryTreeDto::build_tree(&tree))
    }

    /// Top-level categories
    pub async fn topics(&self) -> Result<Vec<CategoryResponseDto>> {
        let tree = self.tree().await?;
        Ok(tree
            .topics()
            .into_iter()
            .map(|c| CategoryResponseDto::from_node(c, &tree))
            .collect())
    }

    /// Active children of a category; an unknown parent simply has none
    pub async fn subcategories(&self, parent_id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let tree = self.tree().await?;
        Ok(tree
            .children(parent_id)
            .into_iter()
            .map(|c| CategoryResponseDto::from_node(c, &tree))
            .collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let tree = self.tree().await?;
        tree.find_by_slug(slug)
            .map(|c| CategoryResponseDto::from_node(c, &tree))
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }
}
