use crate::NodeId;
use crate::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
pub enum RegistryError {
    #[error("no node #{0} in the registry")]
    NotFound(NodeId),

    #[error("node #{0} is already registered")]
    DuplicateId(NodeId),

    #[error("node #{0} is not a channel, playlist or folder")]
    NotAContainer(NodeId),

    #[error("node #{0} is not a video")]
    NotAVideo(NodeId),

    #[error("node #{id} is a {found}, which this operation does not handle")]
    UnexpectedKind { id: NodeId, found: NodeKind },

    #[error("{parent_kind} #{parent} cannot hold {child_kind} #{child}")]
    RejectedChild {
        parent: NodeId,
        parent_kind: NodeKind,
        child: NodeId,
        child_kind: NodeKind,
    },

    #[error("video #{0} has no file name or extension yet")]
    Unresolved(NodeId),
}
