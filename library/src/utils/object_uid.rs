use derive_more::Display;

/// Identity of a node living in the scene graph.
#[derive(Display, Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[display("node#{_0}")]
pub struct NodeUid(pub u32);

impl From<u32> for NodeUid {
    fn from(value: u32) -> Self {
        NodeUid(value)
    }
}

/// Identity the host assigns to a tracked anchor.
#[derive(Display, Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[display("anchor#{_0}")]
pub struct AnchorUid(pub u64);

impl From<u64> for AnchorUid {
    fn from(value: u64) -> Self {
        AnchorUid(value)
    }
}
