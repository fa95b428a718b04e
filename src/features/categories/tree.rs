//! In-memory view of the category forest.
//!
//! Built from a snapshot of every category row in insertion order. All lookups
//! are case-insensitive on `name`/`slug`; when two nodes answer to the same
//! token the one inserted first wins.

use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::features::categories::models::Category;
use crate::shared::validation::sanitize_category_token;

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: Vec<Category>,
    index: HashMap<Uuid, usize>,
    /// Lowercased (name, slug) per node, same order as `nodes`
    keys: Vec<(String, String)>,
}

impl CategoryTree {
    /// `categories` must already be in insertion order (`seq`).
    pub fn new(categories: Vec<Category>) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            // Keep the first occurrence if a snapshot ever repeats an id
            index.entry(category.id).or_insert(pos);
        }
        let keys = categories
            .iter()
            .map(|c| (c.name.to_lowercase(), c.slug.to_lowercase()))
            .collect();

        Self {
            nodes: categories,
            index,
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Category> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Case-insensitive match on name or slug. Tokens that fail the
    /// allow-list never match.
    pub fn resolve(&self, token: &str) -> Option<&Category> {
        let token = sanitize_category_token(token)?.to_lowercase();
        self.keys
            .iter()
            .position(|(name, slug)| *name == token || *slug == token)
            .map(|pos| &self.nodes[pos])
    }

    /// Resolve a reference sent in a listing draft: an id, a name or a slug.
    pub fn resolve_ref(&self, token: &str) -> Option<&Category> {
        match Uuid::parse_str(token.trim()) {
            Ok(id) => self.get(id),
            Err(_) => self.resolve(token),
        }
    }

    /// Exact slug lookup over active categories
    pub fn find_by_slug(&self, slug: &str) -> Option<&Category> {
        self.nodes.iter().find(|c| c.is_active && c.slug == slug)
    }

    /// Active children of `parent_id`, ordered by `(display_order, name)`
    pub fn children(&self, parent_id: Uuid) -> Vec<&Category> {
        Self::sorted(
            self.nodes
                .iter()
                .filter(|c| c.is_active && c.parent_id == Some(parent_id)),
        )
    }

    /// Active top-level categories, ordered by `(display_order, name)`
    pub fn topics(&self) -> Vec<&Category> {
        Self::sorted(self.nodes.iter().filter(|c| c.is_active && c.is_topic()))
    }

    /// Every active category, ordered by `(display_order, name)`
    pub fn active(&self) -> Vec<&Category> {
        Self::sorted(self.nodes.iter().filter(|c| c.is_active))
    }

    /// Walk up the parent chain to the root topic.
    ///
    /// Returns `None` when the chain leads to an id that is not in the
    /// snapshot or loops back on itself.
    pub fn topic_of(&self, id: Uuid) -> Option<&Category> {
        let mut current = self.get(id)?;
        for _ in 0..self.nodes.len() {
            match current.parent_id {
                None => return Some(current),
                Some(parent_id) => current = self.get(parent_id)?,
            }
        }
        tracing::warn!(category_id = %id, "Category parent chain contains a cycle");
        None
    }

    fn sorted<'a>(iter: impl Iterator<Item = &'a Category>) -> Vec<&'a Category> {
        let mut out: Vec<&Category> = iter.collect();
        out.sort_by(|a, b| match a.display_order.cmp(&b.display_order) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category, sample_categories};

    fn names(categories: Vec<&Category>) -> Vec<&str> {
        categories.into_iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let tree = CategoryTree::new(sample_categories());

        let a = tree.resolve("Cars").map(|c| c.id);
        let b = tree.resolve("cars").map(|c| c.id);
        let c = tree.resolve("CARS").map(|c| c.id);

        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_resolve_matches_slug() {
        let tree = CategoryTree::new(sample_categories());
        let by_slug = tree.resolve("for-rent").unwrap();
        assert_eq!(by_slug.name, "For Rent");
    }

    #[test]
    fn test_resolve_is_exact_not_substring() {
        let tree = CategoryTree::new(sample_categories());
        assert!(tree.resolve("car").is_none());
        assert!(tree.resolve("ars").is_none());
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let tree = CategoryTree::new(sample_categories());
        assert!(tree.resolve("nonexistent-slug").is_none());
        assert!(tree.resolve(".*").is_none());
    }

    #[test]
    fn test_resolve_name_with_period() {
        let pets = category("Pets", "pets", None, 0);
        let bernard = category("St. Bernard", "st-bernard", Some(pets.id), 0);
        let bernard_id = bernard.id;
        let tree = CategoryTree::new(vec![pets, bernard]);

        assert_eq!(tree.resolve("St. Bernard").unwrap().id, bernard_id);
        assert_eq!(tree.resolve("st. bernard").unwrap().id, bernard_id);
        assert_eq!(tree.resolve("st-bernard").unwrap().id, bernard_id);
    }

    #[test]
    fn test_resolve_ambiguous_picks_first_inserted() {
        let first = category("Parts", "parts", None, 0);
        let second = category("Other", "PARTS", None, 0);
        let first_id = first.id;

        let tree = CategoryTree::new(vec![first, second]);
        assert_eq!(tree.resolve("parts").unwrap().id, first_id);
    }

    #[test]
    fn test_resolve_ref_accepts_id() {
        let categories = sample_categories();
        let cars_id = categories.iter().find(|c| c.slug == "cars").unwrap().id;
        let tree = CategoryTree::new(categories);

        assert_eq!(tree.resolve_ref(&cars_id.to_string()).unwrap().id, cars_id);
        assert_eq!(tree.resolve_ref("Cars").unwrap().id, cars_id);
        assert!(tree.resolve_ref(&Uuid::new_v4().to_string()).is_none());
    }

    #[test]
    fn test_topics_are_active_and_ordered() {
        let mut inactive = category("Archived", "archived", None, 0);
        inactive.is_active = false;
        let mut categories = sample_categories();
        categories.push(inactive);

        let tree = CategoryTree::new(categories);
        assert_eq!(
            names(tree.topics()),
            vec!["Vehicles", "For Rent", "Jobs", "Pets", "Electronics"]
        );
    }

    #[test]
    fn test_children_ordered_by_order_then_name() {
        let topic = category("Vehicles", "vehicles", None, 1);
        let trucks = category("Trucks", "trucks", Some(topic.id), 2);
        let motorcycles = category("Motorcycles", "motorcycles", Some(topic.id), 1);
        let cars = category("Cars", "cars", Some(topic.id), 1);
        let mut boats = category("Boats", "boats", Some(topic.id), 0);
        boats.is_active = false;
        let topic_id = topic.id;

        let tree = CategoryTree::new(vec![topic, trucks, motorcycles, cars, boats]);
        assert_eq!(
            names(tree.children(topic_id)),
            vec!["Cars", "Motorcycles", "Trucks"]
        );
    }

    #[test]
    fn test_topic_of_walks_to_root() {
        let topic = category("Vehicles", "vehicles", None, 0);
        let cars = category("Cars", "cars", Some(topic.id), 0);
        let sedans = category("Sedans", "sedans", Some(cars.id), 0);
        let (topic_id, sedans_id) = (topic.id, sedans.id);

        let tree = CategoryTree::new(vec![topic, cars, sedans]);
        assert_eq!(tree.topic_of(sedans_id).unwrap().id, topic_id);
        assert_eq!(tree.topic_of(topic_id).unwrap().id, topic_id);
    }

    #[test]
    fn test_topic_of_survives_cycles_and_dangling_parents() {
        let mut a = category("A", "a", None, 0);
        let mut b = category("B", "b", None, 0);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let orphan = category("Orphan", "orphan", Some(Uuid::new_v4()), 0);
        let (a_id, orphan_id) = (a.id, orphan.id);

        let tree = CategoryTree::new(vec![a, b, orphan]);
        assert!(tree.topic_of(a_id).is_none());
        assert!(tree.topic_of(orphan_id).is_none());
    }

    #[test]
    fn test_find_by_slug_is_exact_and_active_only() {
        let mut hidden = category("Hidden", "hidden", None, 0);
        hidden.is_active = false;
        let mut categories = sample_categories();
        categories.push(hidden);
        let tree = CategoryTree::new(categories);

        assert!(tree.find_by_slug("cars").is_some());
        assert!(tree.find_by_slug("CARS").is_none());
        assert!(tree.find_by_slug("hidden").is_none());
    }
}
