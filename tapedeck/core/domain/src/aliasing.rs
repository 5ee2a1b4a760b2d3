use crate::errors::RegistryError;
use crate::registry::MediaRegistry;
use crate::registry::NodeLookup;
use crate::NodeId;

/// Alias inconsistencies the registry tolerates but an integrity checker should repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasViolation {
    /// `master_id` does not resolve to a container.
    Dangling { id: NodeId, master_id: NodeId },
    /// `master_id` is itself aliased to `next_id`; only one level is ever resolved.
    Chained { id: NodeId, master_id: NodeId, next_id: NodeId },
    /// `id` lists `slave_id`, but `slave_id` does not alias to `id`.
    StraySlave { id: NodeId, slave_id: NodeId },
}

impl MediaRegistry {
    /// Redirects the downloads of container `id` into the directory of `master_id`. Passing `id`
    /// itself removes the alias.
    ///
    /// Fails without side effects when either end is missing or not a container. An old target
    /// that has since vanished is tolerated. Chains are not prevented, see
    /// [`MediaRegistry::alias_violations`].
    pub fn set_master_id(&mut self, id: NodeId, master_id: NodeId) -> Result<(), RegistryError> {
        let previous = self.require_container(id)?.master_id();

        if previous == master_id {
            return Ok(());
        }

        if master_id != id {
            self.require_container(master_id)?;
        }

        if previous != id {
            match self.require_container_mut(previous) {
                Ok(old_target) => {
                    old_target.core_mut().remove_slave_id(id);
                },

                Err(err) => ::tracing::warn!(%id, %previous, %err, "previous alias target is gone"),
            }
        }

        self.require_container_mut(id)?.core_mut().master_id = master_id;

        if master_id != id {
            self.require_container_mut(master_id)?.core_mut().add_slave_id(id);
        }

        ::tracing::debug!(%id, %previous, %master_id, "changed download destination");

        Ok(())
    }

    /// Lists every alias problem, ordered by the id of the container that carries it.
    pub fn alias_violations(&self) -> Vec<AliasViolation> {
        let mut containers: Vec<_> = self.nodes().filter_map(|node| node.as_container()).collect();
        containers.sort_by_key(|container| container.id());

        let mut violations = Vec::new();

        for container in containers {
            let core = container.core();

            if core.is_aliased() {
                match self.container(core.master_id()) {
                    None => violations.push(AliasViolation::Dangling { id: core.id(), master_id: core.master_id() }),

                    Some(master) if master.core().is_aliased() => violations.push(AliasViolation::Chained {
                        id: core.id(),
                        master_id: core.master_id(),
                        next_id: master.master_id(),
                    }),

                    Some(_) => {},
                }
            }

            for slave_id in core.slave_ids() {
                let consistent = self
                    .container(*slave_id)
                    .is_some_and(|slave| slave.master_id() == core.id());

                if !consistent {
                    violations.push(AliasViolation::StraySlave { id: core.id(), slave_id: *slave_id });
                }
            }
        }

        violations
    }
}
