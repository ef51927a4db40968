use auto_impl::auto_impl;

use crate::{
    cache::{
        TreeCache,
        getters::view::NodeView,
        partition::ParentKey,
    },
    node::Entity,
};

/// One row of the flattened tree, in render order. Computed on demand from
/// the canonical cache, never by mutating it.
#[derive(Clone, Debug)]
pub enum Row<'a, E: Entity> {
    Node {
        view: NodeView<'a, E>,
        depth: u32,
    },
    /// Affordance row for fetching the next children page of `parent`.
    LoadMore {
        parent: ParentKey,
        next_page: u32,
        depth: u32,
    },
}

impl<E: Entity> Row<'_, E> {
    pub fn depth(&self) -> u32 {
        match self {
            Row::Node { depth, .. } | Row::LoadMore { depth, .. } => *depth,
        }
    }
}

/// Caller-supplied render delegate. The engine never dictates the visual
/// representation of a row.
#[auto_impl(&, Arc)]
pub trait RenderNode<E: Entity> {
    type Rendered;
    fn render(
        &self,
        row: &Row<'_, E>,
    ) -> Self::Rendered;
}

/// Projects the open part of the tree under the current root into a flat
/// row list: node rows in server order, a load-more row after every
/// partially fetched children list.
pub fn visible_rows<E: Entity>(cache: &TreeCache<E>) -> Vec<Row<'_, E>> {
    let mut rows = Vec::new();
    walk(cache, cache.root().clone(), 0, &mut rows);
    rows
}

pub fn render_rows<E: Entity, R: RenderNode<E>>(
    cache: &TreeCache<E>,
    renderer: &R,
) -> Vec<R::Rendered> {
    visible_rows(cache)
        .iter()
        .map(|row| renderer.render(row))
        .collect()
}

fn walk<'a, E: Entity>(
    cache: &'a TreeCache<E>,
    parent: ParentKey,
    depth: u32,
    rows: &mut Vec<Row<'a, E>>,
) {
    for id in cache.children_of(&parent) {
        let Some(view) = cache.node_view(&id) else {
            continue;
        };
        let is_open = view.is_open;
        rows.push(Row::Node { view, depth });
        if is_open {
            walk(cache, ParentKey(Some(id)), depth + 1, rows);
        }
    }
    if let Some(slot) = cache.partition().slot(&parent) {
        if slot.page.has_more {
            rows.push(Row::LoadMore {
                next_page: slot
                    .page
                    .next_page
                    .unwrap_or(slot.page.current + 1),
                parent,
                depth,
            });
        }
    }
}
