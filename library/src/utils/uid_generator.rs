use crate::utils::object_uid::NodeUid;

/// Issues node identities; placed nodes are never removed, so uids are not recycled.
#[derive(Default)]
pub(crate) struct UidGenerator {
    last_generated_uid: u32,
}

impl UidGenerator {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { last_generated_uid: 0 }
    }

    #[must_use]
    pub(crate) fn next(&mut self) -> NodeUid {
        self.last_generated_uid = self.last_generated_uid.wrapping_add(1);
        NodeUid(self.last_generated_uid)
    }
}
