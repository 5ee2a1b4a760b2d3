use ::domain::MediaRegistry;
use ::domain::Node;
use ::domain::NodeId;
use ::use_cases::gateways::IdAllocator;

/// Hands out increasing ids, never the same one twice.
pub struct SequentialIdAllocator {
    next: ::std::sync::atomic::AtomicU64,
}

impl SequentialIdAllocator {
    pub fn new(first: u64) -> Self {
        Self {
            next: ::std::sync::atomic::AtomicU64::new(first),
        }
    }

    /// Starts right after the largest id already in `registry`.
    pub fn following(registry: &MediaRegistry) -> Self {
        let last = registry.nodes().map(Node::id).max().map_or(0, |id| id.0);

        Self::new(last + 1)
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn allocate(&self) -> NodeId {
        NodeId(self.next.fetch_add(1, ::std::sync::atomic::Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_continue_after_the_registry() {
        let mut registry = MediaRegistry::new();
        registry.insert_folder(NodeId(7), "Root", None).unwrap();
        registry.insert_folder(NodeId(3), "Other", None).unwrap();

        let ids = SequentialIdAllocator::following(&registry);

        assert_eq!(ids.allocate(), NodeId(8));
        assert_eq!(ids.allocate(), NodeId(9));
        assert_eq!(SequentialIdAllocator::following(&MediaRegistry::new()).allocate(), NodeId(1));
    }
}
