use derive_new::new;
use itertools::Itertools;
use treebar_cache::{
    Entity,
    HasTreeCache,
    NodeId,
};

/// Ancestor breadcrumb of a search match, computed client-side from
/// already-loaded nodes. `complete` is false when the walk hit an ancestor
/// that is not in the cache.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct Crumbs {
    /// Ancestor ids ordered root first, excluding the node itself.
    pub ids: Vec<NodeId>,
    pub complete: bool,
}

pub fn breadcrumb<E: Entity, G: HasTreeCache<E>>(
    cache: &G,
    id: &NodeId,
) -> Crumbs {
    let cache = cache.cache();
    let mut ids = Vec::new();
    let mut cursor = cache
        .find_node(id)
        .and_then(|node| node.parent_id.clone());
    let mut complete = true;
    while let Some(parent) = cursor {
        match cache.find_node(&parent) {
            Some(node) => {
                ids.push(node.id.clone());
                cursor = node.parent_id.clone();
            }
            None => {
                complete = false;
                break;
            }
        }
    }
    ids.reverse();
    Crumbs { ids, complete }
}

/// " / "-joined ancestor labels, the way matches are annotated in the
/// navigators.
pub fn breadcrumb_labels<E: Entity, G: HasTreeCache<E>>(
    cache: &G,
    id: &NodeId,
) -> String {
    let crumbs = breadcrumb(cache, id);
    let cache = cache.cache();
    crumbs
        .ids
        .iter()
        .filter_map(|id| cache.find_node(id))
        .map(|node| node.label().to_owned())
        .join(" / ")
}
