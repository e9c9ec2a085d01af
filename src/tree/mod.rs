//! Lazily populated catalog tree.
//!
//! Nodes live in an index arena with parent back-references. A node's
//! children are `None` until fetched; a level that loaded empty holds a single
//! placeholder child instead. Disabling a subscription releases its subtree
//! to a free list that later fetches draw from, so toggling never grows the
//! arena past the largest tree loaded.

pub mod filter;

pub use filter::SubscriptionFilter;

use crate::catalog::{Blob, CatalogProvider, ProviderError, Scope, Subscription};

pub type NodeId = usize;

/// An account together with the subscription it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLocation {
    pub subscription: Subscription,
    pub account: String,
}

/// A container together with its account and subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLocation {
    pub account: AccountLocation,
    pub container: String,
}

impl ContainerLocation {
    pub fn account_name(&self) -> &str {
        &self.account.account
    }

    pub fn subscription(&self) -> &Subscription {
        &self.account.subscription
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Non-interactive leaf standing in for an empty or failed level.
    Placeholder { reason: String, is_error: bool },
    Subscription(Subscription),
    Account {
        location: AccountLocation,
        region: String,
    },
    Container {
        location: ContainerLocation,
        public_access: String,
    },
    Blob {
        container: ContainerLocation,
        blob: Blob,
    },
}

impl NodeKind {
    pub fn placeholder(reason: impl Into<String>) -> Self {
        NodeKind::Placeholder {
            reason: reason.into(),
            is_error: false,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        NodeKind::Placeholder {
            reason: reason.into(),
            is_error: true,
        }
    }

    /// Blobs and placeholders are always leaves.
    pub fn can_have_children(&self) -> bool {
        !matches!(self, NodeKind::Placeholder { .. } | NodeKind::Blob { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            NodeKind::Root => "Subscriptions",
            NodeKind::Placeholder { reason, .. } => reason,
            NodeKind::Subscription(s) => &s.name,
            NodeKind::Account { location, .. } => &location.account,
            NodeKind::Container { location, .. } => &location.container,
            NodeKind::Blob { blob, .. } => &blob.name,
        }
    }

    fn child_scope(&self) -> Option<Scope> {
        match self {
            NodeKind::Subscription(_) => Some(Scope::Accounts),
            NodeKind::Account { .. } => Some(Scope::Containers),
            NodeKind::Container { .. } => Some(Scope::Blobs),
            _ => None,
        }
    }
}

pub fn subscription_label(name: &str, enabled: bool) -> String {
    if enabled {
        format!("(x) {}", name)
    } else {
        format!("( ) {}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub label: String,
    pub parent: Option<NodeId>,
    pub expanded: bool,
    children: Option<Vec<NodeId>>,
}

impl Node {
    /// `None` until the level has been fetched.
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }
}

/// Outcome of a full reload.
#[derive(Debug, Default)]
pub struct ReloadReport {
    pub subscriptions: usize,
    /// First account fetch that failed during eager expansion, if any.
    pub eager_failure: Option<ProviderError>,
}

/// One row of the flattened, visible tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleNode {
    pub id: NodeId,
    pub depth: usize,
}

pub struct Tree {
    nodes: Vec<Node>,
    /// Released slots, reused before the arena grows.
    free: Vec<NodeId>,
    selected: Option<NodeId>,
    eager_expand: bool,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(eager_expand: bool) -> Self {
        Self {
            nodes: vec![root_node()],
            free: Vec::new(),
            selected: None,
            eager_expand,
        }
    }

    pub fn eager_expand(&self) -> bool {
        self.eager_expand
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Loaded child with the given kind name, if any.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get(parent)?
            .children()?
            .iter()
            .copied()
            .find(|&c| self.nodes[c].kind.name() == name)
    }

    pub fn child_names(&self, parent: NodeId) -> Vec<String> {
        self.get(parent)
            .and_then(|n| n.children())
            .map(|ids| {
                ids.iter()
                    .map(|&c| self.nodes[c].kind.name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========== Loading ==========

    /// Rebuild the whole tree from a fresh subscription listing.
    pub async fn load_root(
        &mut self,
        provider: &dyn CatalogProvider,
        filter: &mut SubscriptionFilter,
    ) -> Result<ReloadReport, ProviderError> {
        tracing::debug!(provider = %provider.name(), "listing subscriptions");
        let subscriptions = match provider.list_subscriptions().await {
            Ok(subs) => subs,
            Err(e) => {
                let err = ProviderError::new(Scope::Subscriptions, e);
                tracing::warn!("{}", err);
                self.nodes = vec![root_node()];
                self.free.clear();
                let node = self.push(
                    NodeKind::error("Error loading subscriptions."),
                    Self::ROOT,
                );
                self.nodes[Self::ROOT].children = Some(vec![node]);
                self.selected = Some(node);
                return Err(err);
            }
        };

        self.nodes = vec![root_node()];
        self.free.clear();
        filter.merge(&subscriptions);

        let mut report = ReloadReport {
            subscriptions: subscriptions.len(),
            eager_failure: None,
        };

        if subscriptions.is_empty() {
            let node = self.push(NodeKind::placeholder("No subscriptions found."), Self::ROOT);
            self.nodes[Self::ROOT].children = Some(vec![node]);
            self.selected = Some(node);
            return Ok(report);
        }

        let mut ids = Vec::with_capacity(subscriptions.len());
        for subscription in subscriptions {
            let label = subscription_label(&subscription.name, filter.is_enabled(&subscription.id));
            let id = self.push(NodeKind::Subscription(subscription), Self::ROOT);
            self.nodes[id].label = label;
            ids.push(id);
        }
        self.nodes[Self::ROOT].children = Some(ids.clone());

        if self.eager_expand {
            for &id in &ids {
                let enabled = match &self.nodes[id].kind {
                    NodeKind::Subscription(s) => filter.is_enabled(&s.id),
                    _ => false,
                };
                if !enabled {
                    continue;
                }
                if let Err(err) = self.load_children(id, provider).await {
                    self.attach_error(id, err.scope);
                    if report.eager_failure.is_none() {
                        report.eager_failure = Some(err);
                    }
                }
                self.nodes[id].expanded = true;
            }
        }

        self.selected = ids.first().copied();
        tracing::info!(
            subscriptions = report.subscriptions,
            eager = self.eager_expand,
            "catalog reloaded"
        );
        Ok(report)
    }

    /// Load the next level under `id` if needed and mark it expanded.
    ///
    /// Already-loaded nodes never hit the provider again. On failure the node
    /// stays childless and its expanded flag is left untouched.
    pub async fn expand(
        &mut self,
        id: NodeId,
        provider: &dyn CatalogProvider,
        filter: &SubscriptionFilter,
    ) -> Result<(), ProviderError> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        match &node.kind {
            NodeKind::Subscription(s) if !filter.is_enabled(&s.id) => return Ok(()),
            NodeKind::Subscription(_) | NodeKind::Account { .. } | NodeKind::Container { .. } => {}
            _ => return Ok(()),
        }

        if !node.is_loaded() {
            self.load_children(id, provider).await?;
        }
        self.nodes[id].expanded = true;
        Ok(())
    }

    pub fn collapse(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.expanded = false;
        }
    }

    /// Flip a subscription's enabled flag.
    ///
    /// Returns `Ok(None)` when `id` is not a subscription, otherwise the new
    /// flag. Re-enabling fetches accounts again, like [`Tree::expand`]: a
    /// failed fetch leaves an error placeholder under the still enabled but
    /// collapsed subscription.
    pub async fn toggle_subscription(
        &mut self,
        id: NodeId,
        provider: &dyn CatalogProvider,
        filter: &mut SubscriptionFilter,
    ) -> Result<Option<bool>, ProviderError> {
        let subscription = match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Subscription(s)) => s.clone(),
            _ => return Ok(None),
        };

        let enabled = filter.toggle(&subscription.id);
        tracing::debug!(subscription = %subscription.id, enabled, "toggled subscription");
        self.nodes[id].label = subscription_label(&subscription.name, enabled);

        if !enabled {
            self.release_children(id);
            self.nodes[id].expanded = false;
            self.repair_selection();
            return Ok(Some(false));
        }

        self.release_children(id);
        match self.load_children(id, provider).await {
            Ok(()) => {
                self.nodes[id].expanded = true;
                Ok(Some(true))
            }
            Err(err) => {
                self.attach_error(id, err.scope);
                Err(err)
            }
        }
    }

    /// Fetch and attach the children of `id`. Errors leave the node untouched.
    async fn load_children(
        &mut self,
        id: NodeId,
        provider: &dyn CatalogProvider,
    ) -> Result<(), ProviderError> {
        let kind = self.nodes[id].kind.clone();
        let Some(scope) = kind.child_scope() else {
            return Ok(());
        };
        tracing::debug!(scope = %scope, node = kind.name(), "fetching children");

        let kinds = fetch_children(&kind, provider)
            .await
            .map_err(|e| ProviderError::new(scope, e))
            .inspect_err(|err| tracing::warn!(node = kind.name(), "{}", err))?;

        let ids = kinds.into_iter().map(|k| self.push(k, id)).collect();
        self.nodes[id].children = Some(ids);
        Ok(())
    }

    fn attach_error(&mut self, id: NodeId, scope: Scope) {
        let child = self.push(NodeKind::error(format!("Error loading {}.", scope)), id);
        self.nodes[id].children = Some(vec![child]);
    }

    /// Detach every descendant of `id` and hand the slots to the free list.
    fn release_children(&mut self, id: NodeId) {
        let mut pending = self.nodes[id].children.take().unwrap_or_default();
        while let Some(child) = pending.pop() {
            if let Some(grandchildren) = self.nodes[child].children.take() {
                pending.extend(grandchildren);
            }
            self.free.push(child);
        }
    }

    fn push(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let label = kind.name().to_string();
        let node = Node {
            kind,
            label,
            parent: Some(parent),
            expanded: false,
            children: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    // ========== Selection ==========

    /// Pre-order listing of every node currently shown. The root is implicit.
    pub fn visible(&self) -> Vec<VisibleNode> {
        let mut out = Vec::new();
        if let Some(children) = self.root().children() {
            for &child in children {
                self.collect_visible(child, 0, &mut out);
            }
        }
        out
    }

    fn collect_visible(&self, id: NodeId, depth: usize, out: &mut Vec<VisibleNode>) {
        out.push(VisibleNode { id, depth });
        let node = &self.nodes[id];
        if node.expanded {
            if let Some(children) = node.children() {
                for &child in children {
                    self.collect_visible(child, depth + 1, out);
                }
            }
        }
    }

    /// True when every ancestor is expanded and still owns the node.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let p = &self.nodes[parent];
            let owns = p.children().is_some_and(|c| c.contains(&current));
            if !owns || (parent != Self::ROOT && !p.expanded) {
                return false;
            }
            current = parent;
        }
        current == Self::ROOT && id != Self::ROOT
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: NodeId) -> bool {
        if self.is_visible(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) -> bool {
        self.step_selection(1)
    }

    pub fn select_previous(&mut self) -> bool {
        self.step_selection(-1)
    }

    /// Move the cursor; clamps at both ends. Returns whether it moved.
    fn step_selection(&mut self, delta: isize) -> bool {
        let visible = self.visible();
        if visible.is_empty() {
            return false;
        }
        let current = self
            .selected
            .and_then(|id| visible.iter().position(|v| v.id == id));
        let next = match current {
            Some(i) => (i as isize + delta).clamp(0, visible.len() as isize - 1) as usize,
            None => 0,
        };
        let next_id = visible[next].id;
        let moved = self.selected != Some(next_id);
        self.selected = Some(next_id);
        moved
    }

    /// Move the cursor to the nearest visible ancestor after a collapse or a
    /// discarded subtree. Returns whether the selection changed.
    pub fn repair_selection(&mut self) -> bool {
        let Some(mut id) = self.selected else {
            return false;
        };
        let original = id;
        while !self.is_visible(id) {
            match self.parent(id) {
                Some(parent) if parent != Self::ROOT => id = parent,
                _ => {
                    self.selected = self.visible().first().map(|v| v.id);
                    return self.selected != Some(original);
                }
            }
        }
        self.selected = Some(id);
        id != original
    }
}

fn root_node() -> Node {
    Node {
        kind: NodeKind::Root,
        label: NodeKind::Root.name().to_string(),
        parent: None,
        expanded: true,
        children: None,
    }
}

async fn fetch_children(
    kind: &NodeKind,
    provider: &dyn CatalogProvider,
) -> anyhow::Result<Vec<NodeKind>> {
    let kinds = match kind {
        NodeKind::Subscription(subscription) => {
            let accounts = provider.list_accounts(&subscription.id).await?;
            let kinds = accounts
                .into_iter()
                .map(|a| NodeKind::Account {
                    location: AccountLocation {
                        subscription: subscription.clone(),
                        account: a.name,
                    },
                    region: a.region,
                })
                .collect();
            or_placeholder(kinds, "No accounts.")
        }
        NodeKind::Account { location, .. } => {
            let containers = provider.list_containers(&location.account).await?;
            let kinds = containers
                .into_iter()
                .map(|c| NodeKind::Container {
                    location: ContainerLocation {
                        account: location.clone(),
                        container: c.name,
                    },
                    public_access: c.public_access,
                })
                .collect();
            or_placeholder(kinds, "No containers.")
        }
        NodeKind::Container { location, .. } => {
            let blobs = provider
                .list_blobs(location.account_name(), &location.container)
                .await?;
            let kinds = blobs
                .into_iter()
                .map(|blob| NodeKind::Blob {
                    container: location.clone(),
                    blob,
                })
                .collect();
            or_placeholder(kinds, "No blobs.")
        }
        _ => Vec::new(),
    };
    Ok(kinds)
}

fn or_placeholder(kinds: Vec<NodeKind>, message: &str) -> Vec<NodeKind> {
    if kinds.is_empty() {
        vec![NodeKind::placeholder(message)]
    } else {
        kinds
    }
}
