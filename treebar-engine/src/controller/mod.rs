use std::sync::{
    Arc,
    RwLock,
};

use derive_more::IsVariant;
use tracing::instrument;
use treebar_cache::{
    Entity,
    ErrorReason,
    FIRST_PAGE,
    HasTreeCache,
    LoadState,
    NodeId,
    PageInfo,
    ParentKey,
    RenderNode,
    Row,
    TreeCache,
    TreeCacheRef,
    render_rows,
    visible_rows,
};
use treebar_search::{
    SearchCoordinator,
    Transition,
};

use crate::{
    config::EngineConfig,
    fetch::{
        orchestrate::FetchCtx,
        source::{
            AncestorSource,
            FetchSource,
        },
    },
};

/// Overall controller lifecycle. `Ready` is the only state from which tree
/// operations are valid; per-node fetch errors return to `Ready` with the
/// slot flagged, never to a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, IsVariant)]
pub enum ControllerState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// The public, imperative handle driving one lazy tree. Cheap to clone;
/// clones share the same cache and state.
pub struct TreeController<E: Entity> {
    pub(crate) ctx: FetchCtx<E>,
    state: Arc<RwLock<ControllerState>>,
}

impl<E: Entity> Clone for TreeController<E> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: Entity> std::fmt::Debug for TreeController<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TreeController")
            .field("state", &self.state())
            .field("ctx", &self.ctx)
            .finish()
    }
}

impl<E: Entity> TreeController<E> {
    pub fn new(
        cache: TreeCacheRef<E>,
        source: Arc<dyn FetchSource<E>>,
        ancestors: Arc<dyn AncestorSource<E>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            ctx: FetchCtx {
                cache,
                search: Arc::new(RwLock::new(SearchCoordinator::default())),
                source,
                ancestors,
                config,
            },
            state: Arc::new(RwLock::new(ControllerState::default())),
        }
    }

    pub fn state(&self) -> ControllerState {
        *self.state.read().unwrap()
    }

    pub fn cache(&self) -> TreeCacheRef<E> {
        self.ctx.cache.clone()
    }

    fn set_state(
        &self,
        state: ControllerState,
    ) {
        *self.state.write().unwrap() = state;
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), ErrorReason> {
        self.state()
            .is_ready()
            .then_some(())
            .ok_or(ErrorReason::NotReady)
    }

    /// Loads (or re-roots) the visible tree at `init_parent`. Unrelated
    /// cache entries are kept. A failed root fetch still leaves the
    /// controller `Ready`, with the root slot flagged for retry.
    #[instrument(skip(self), level = "debug")]
    pub async fn init_root(
        &self,
        init_parent: Option<NodeId>,
    ) -> Result<(), ErrorReason> {
        self.set_state(ControllerState::Loading);
        let root = ParentKey(init_parent);
        self.ctx.cache.write().unwrap().set_root(root.clone());
        let result = self.ctx.fetch_page(root, FIRST_PAGE).await;
        self.set_state(ControllerState::Ready);
        result.map(drop)
    }

    pub async fn expand(
        &self,
        id: &NodeId,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.expand(id).await
    }

    pub fn collapse(
        &self,
        id: &NodeId,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.collapse(id);
        Ok(())
    }

    pub async fn load_more(
        &self,
        parent: impl Into<ParentKey>,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.load_more(parent.into()).await
    }

    /// Collapses every open node. Loaded children stay cached.
    pub fn close_all(&self) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.cache.write().unwrap().close_all();
        Ok(())
    }

    pub fn select(
        &self,
        id: Option<NodeId>,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.cache.write().unwrap().select(id);
        Ok(())
    }

    /// Deep-links to `target`: resolves and opens its ancestor path, then
    /// selects it. Degrades to a detached row when ancestors cannot be
    /// resolved.
    pub async fn reveal(
        &self,
        target: &E,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        self.ctx.reveal(target).await
    }

    /// Applies debounced search text. Non-empty text switches to flat
    /// search fetches in a fresh search partition; empty text drops the
    /// search partition and restores the untouched lazy tree.
    #[instrument(skip(self, text), level = "debug")]
    pub async fn set_search(
        &self,
        text: impl Into<String>,
    ) -> Result<(), ErrorReason> {
        self.ensure_ready()?;
        let text = text.into();
        let ticket = self.ctx.search.write().unwrap().note_input();
        if let Some(delay) = self.ctx.config.debounce.as_deref() {
            delay().await;
        }
        let transition = {
            let mut search = self.ctx.search.write().unwrap();
            if !search.is_current(ticket) {
                // superseded by a faster keystroke
                return Ok(());
            }
            search.submit(&text)
        };
        let root = {
            let mut cache = self.ctx.cache.write().unwrap();
            match transition {
                Transition::EnterSearch => cache.enter_search(),
                Transition::LeaveSearch => {
                    cache.leave_search();
                    return Ok(());
                }
                Transition::Unchanged => return Ok(()),
                Transition::UpdateSearch => {}
            }
            cache.root().clone()
        };
        self.ctx.fetch_page(root, FIRST_PAGE).await.map(drop)
    }

    /// Owned snapshot of the current flat row projection.
    pub fn snapshot_rows(&self) -> Vec<RowSnapshot<E>> {
        let cache = self.ctx.cache();
        visible_rows(&cache).iter().map(RowSnapshot::from).collect()
    }

    /// Renders the projection through the caller's delegate.
    pub fn render_with<R: RenderNode<E>>(
        &self,
        renderer: &R,
    ) -> Vec<R::Rendered> {
        let cache = self.ctx.cache();
        render_rows(&cache, renderer)
    }

    /// Runs a closure against the cache for ad-hoc reads.
    pub fn with_cache<T>(
        &self,
        f: impl FnOnce(&TreeCache<E>) -> T,
    ) -> T {
        f(&self.ctx.cache())
    }
}

/// Owned counterpart of a projected row, for callers that hold rows across
/// cache updates.
#[derive(Clone, Debug, PartialEq)]
pub enum RowSnapshot<E: Entity> {
    Node {
        id: NodeId,
        payload: E,
        depth: u32,
        is_open: bool,
        is_selected: bool,
        is_leaf: bool,
        page: PageInfo,
        load: LoadState,
    },
    LoadMore {
        parent: ParentKey,
        next_page: u32,
        depth: u32,
    },
}

impl<E: Entity> From<&Row<'_, E>> for RowSnapshot<E> {
    fn from(row: &Row<'_, E>) -> Self {
        match row {
            Row::Node { view, depth } => RowSnapshot::Node {
                id: view.node.id.clone(),
                payload: view.node.payload.clone(),
                depth: *depth,
                is_open: view.is_open,
                is_selected: view.is_selected,
                is_leaf: view.node.is_leaf,
                page: view.page,
                load: view.load,
            },
            Row::LoadMore {
                parent,
                next_page,
                depth,
            } => RowSnapshot::LoadMore {
                parent: parent.clone(),
                next_page: *next_page,
                depth: *depth,
            },
        }
    }
}
