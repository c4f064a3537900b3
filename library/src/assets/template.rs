use crate::assets::loader::{AssetError, AssetLoader};
use crate::scene::node_tree::NodeTree;
use log::info;

/// The loaded character: never inserted into a scene itself, every placement clones it.
#[derive(Debug)]
pub struct TemplateObject {
    tree: NodeTree,
}

impl TemplateObject {
    #[must_use]
    pub fn new(tree: NodeTree) -> Self {
        Self { tree }
    }

    pub fn load(loader: &dyn AssetLoader, asset: &str, node: &str) -> Result<Self, AssetError> {
        let scene = loader.load_scene(asset)?;
        let tree = scene.find_descendant(node)
            .ok_or_else(|| AssetError::NodeNotFound { asset: asset.to_string(), node: node.to_string() })?
            .clone();
        info!("template '{}' loaded from '{}' ({} nodes)", node, asset, tree.node_count());
        Ok(Self { tree })
    }

    #[must_use]
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Deep copy, ready to be positioned and inserted.
    #[must_use]
    pub fn instantiate(&self) -> NodeTree {
        self.tree.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::alias::Point;
    use crate::scene::animation::AnimationPlayer;

    struct InMemoryLoader {
        scene: NodeTree,
    }

    impl AssetLoader for InMemoryLoader {
        fn load_scene(&self, _name: &str) -> Result<NodeTree, AssetError> {
            Ok(self.scene.clone())
        }
    }

    #[must_use]
    fn make_loader() -> InMemoryLoader {
        InMemoryLoader {
            scene: NodeTree::new("scene")
                .with_child(NodeTree::new("Armature")
                    .with_child(NodeTree::new("Base").with_animation(AnimationPlayer::new("samba")))),
        }
    }

    #[test]
    fn test_load_finds_nested_node() {
        let system_under_test = TemplateObject::load(&make_loader(), "Samba Dancing", "Base").expect("template");
        assert_eq!(system_under_test.tree().name(), Some("Base"));
    }

    #[test]
    fn test_load_missing_node() {
        let error = TemplateObject::load(&make_loader(), "Samba Dancing", "Tail").expect_err("node is absent");
        assert_eq!(error.to_string(), "node 'Tail' not found in asset 'Samba Dancing'");
    }

    #[test]
    fn test_instantiate_leaves_template_untouched() {
        let system_under_test = TemplateObject::load(&make_loader(), "Samba Dancing", "Base").expect("template");

        let mut instance = system_under_test.instantiate();
        instance.set_position(Point::new(1.0, 2.0, 3.0));
        instance.set_uniform_scale(0.5);

        assert_eq!(system_under_test.tree().position(), Point::new(0.0, 0.0, 0.0));
        assert_eq!(system_under_test.tree().scale().x, 1.0);
    }
}
