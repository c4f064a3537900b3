use crate::geometry::alias::{Point, Rotation};
use crate::geometry::transform::Affine;
use crate::scene::geometry::Geometry;
use crate::scene::node::Node;
use crate::scene::node_tree::NodeTree;
use crate::utils::object_uid::{AnchorUid, NodeUid};
use crate::utils::uid_generator::UidGenerator;
use log::trace;
use std::collections::HashMap;

const ROOT_NAME: &str = "root";

/// Scene hierarchy: a root node, everything else hangs below it.
/// Besides the nodes the core creates, it keeps one node per tracked anchor, as the host view does.
pub struct SceneGraph {
    nodes: HashMap<NodeUid, Node>,
    root: NodeUid,
    anchor_nodes: HashMap<AnchorUid, NodeUid>,
    uid_generator: UidGenerator,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let mut uid_generator = UidGenerator::new();
        let root = uid_generator.next();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, Some(ROOT_NAME.to_string()), None));
        Self {
            nodes,
            root,
            anchor_nodes: HashMap::new(),
            uid_generator,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeUid {
        self.root
    }

    #[must_use]
    pub fn node(&self, uid: NodeUid) -> Option<&Node> {
        self.nodes.get(&uid)
    }

    #[must_use]
    pub fn node_mutable(&mut self, uid: NodeUid) -> Option<&mut Node> {
        self.nodes.get_mut(&uid)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn children_of(&self, uid: NodeUid) -> &[NodeUid] {
        self.nodes.get(&uid).map(|node| node.children()).unwrap_or(&[])
    }

    /// Copies `tree` (all of it: geometry references, animation players, lights) under `parent`.
    /// The copy shares no state with the tree or with earlier copies.
    pub fn insert(&mut self, parent: NodeUid, tree: &NodeTree) -> NodeUid {
        assert!(self.nodes.contains_key(&parent), "parent {parent} not found");

        let uid = self.uid_generator.next();
        let mut node = Node::new(uid, tree.name().map(str::to_string), Some(parent));
        node.set_position(tree.position());
        node.set_rotation(tree.rotation());
        node.set_scale(tree.scale());
        node.set_geometry(tree.mesh().map(|resource| Geometry::Mesh { resource: resource.to_string() }));
        node.set_light(tree.light().cloned());
        node.animations_mutable().extend(tree.animations().iter().cloned());
        self.nodes.insert(uid, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.push_child(uid);
        }

        for child in tree.children() {
            self.insert(uid, child);
        }

        trace!("inserted {uid} under {parent}");
        uid
    }

    /// First node with the given name, pre-order from the root.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeUid> {
        let mut stack = vec![self.root];
        while let Some(uid) = stack.pop() {
            let node = self.nodes.get(&uid)?;
            if node.name() == Some(name) {
                return Some(uid);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }

    #[must_use]
    pub fn world_transform(&self, uid: NodeUid) -> Option<Affine> {
        let node = self.nodes.get(&uid)?;
        let local = node.local_transform();
        match node.parent() {
            Some(parent) => Some(self.world_transform(parent)? * local),
            None => Some(local),
        }
    }

    #[must_use]
    pub fn node_for_anchor(&self, anchor: AnchorUid) -> Option<NodeUid> {
        self.anchor_nodes.get(&anchor).copied()
    }

    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchor_nodes.len()
    }

    /// Node following `anchor`, created under the root on first sight; its pose is synced every call.
    pub fn anchor_node(&mut self, anchor: AnchorUid, position: Point, rotation: Rotation) -> NodeUid {
        let uid = match self.anchor_nodes.get(&anchor) {
            Some(existing) => *existing,
            None => {
                let created = self.insert(self.root, &NodeTree::new(anchor.to_string()));
                self.anchor_nodes.insert(anchor, created);
                created
            }
        };
        if let Some(node) = self.nodes.get_mut(&uid) {
            node.set_position(position);
            node.set_rotation(rotation);
        }
        uid
    }

    /// Drops the anchor's node together with its subtree. Returns `false` for unknown anchors.
    pub fn remove_anchor_node(&mut self, anchor: AnchorUid) -> bool {
        let Some(uid) = self.anchor_nodes.remove(&anchor) else {
            return false;
        };

        let parent = self.nodes.get(&uid).and_then(|node| node.parent());
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.forget_child(uid);
        }

        let mut doomed = vec![uid];
        while let Some(victim) = doomed.pop() {
            if let Some(removed) = self.nodes.remove(&victim) {
                doomed.extend(removed.children().iter().copied());
            }
        }
        true
    }
}
