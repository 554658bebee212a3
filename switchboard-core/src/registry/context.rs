//! The registry owned by the application's composition root

use switchboard_hal::{Capability, InitCapability, INIT_SLOT_CAPACITY, SLOT_CAPACITY};

use super::implementation::{InitImpl, OpImpl};
use super::slot::{BadParam, Registration, RegistryError, SlotTable};

/// Registration record for the initialization namespace
pub type InitRegistration<'a> = Registration<'a, InitImpl<'a>>;

/// Registration record for the operational namespace
pub type OpRegistration<'a> = Registration<'a, OpImpl<'a>>;

/// Capability registry
///
/// Holds one slot table per namespace. Binding requires `&mut self`, so a
/// registry that is being populated can never be read concurrently; once
/// start-up is finished, share it by reference (see
/// [`SharedRegistry`](super::SharedRegistry) for interrupt handlers).
///
/// A new registry starts with every slot unbound.
pub struct Registry<'a> {
    init: SlotTable<'a, InitImpl<'a>, INIT_SLOT_CAPACITY>,
    ops: SlotTable<'a, OpImpl<'a>, SLOT_CAPACITY>,
}

impl<'a> Registry<'a> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            init: SlotTable::new(),
            ops: SlotTable::new(),
        }
    }

    /// Unbind every slot in both namespaces
    pub fn reset(&mut self) {
        self.init.reset();
        self.ops.reset();
        debug!("registry reset");
    }

    /// Bind an initialization capability
    ///
    /// Besides the slot-table checks, rejects an implementation whose variant
    /// belongs to a different capability than `id`.
    pub fn bind_init(
        &mut self,
        id: InitCapability,
        candidate: &InitRegistration<'a>,
    ) -> Result<(), RegistryError> {
        if let Some(implementation) = candidate.implementation {
            if implementation.capability() != id {
                warn!("bind {} rejected: implementation is for {}", id, implementation.capability());
                return Err(BadParam::CapabilityMismatch.into());
            }
        }
        self.init.bind(id.index(), Some(candidate)).inspect_err(|_e| {
            warn!("bind {} rejected: {}", id, _e);
        })?;
        trace!("bound {}", id);
        Ok(())
    }

    /// Bind an operational capability
    ///
    /// Besides the slot-table checks, rejects an implementation whose variant
    /// belongs to a different capability than `id`.
    pub fn bind(
        &mut self,
        id: Capability,
        candidate: &OpRegistration<'a>,
    ) -> Result<(), RegistryError> {
        if let Some(implementation) = candidate.implementation {
            if implementation.capability() != id {
                warn!("bind {} rejected: implementation is for {}", id, implementation.capability());
                return Err(BadParam::CapabilityMismatch.into());
            }
        }
        self.ops.bind(id.index(), Some(candidate)).inspect_err(|_e| {
            warn!("bind {} rejected: {}", id, _e);
        })?;
        trace!("bound {}", id);
        Ok(())
    }

    /// Bind an implementation into the slot named by its own variant
    pub fn register(&mut self, candidate: &OpRegistration<'a>) -> Result<(), RegistryError> {
        let implementation = candidate
            .implementation
            .ok_or(BadParam::EmptyImplementation)?;
        self.bind(implementation.capability(), candidate)
    }

    /// Bind an initialization implementation into the slot named by its own variant
    pub fn register_init(&mut self, candidate: &InitRegistration<'a>) -> Result<(), RegistryError> {
        let implementation = candidate
            .implementation
            .ok_or(BadParam::EmptyImplementation)?;
        self.bind_init(implementation.capability(), candidate)
    }

    /// Export the record bound to an initialization capability
    pub fn export_init(&self, id: InitCapability) -> Result<InitRegistration<'a>, RegistryError> {
        self.init.get(id.index())
    }

    /// Export the record bound to an operational capability
    pub fn export(&self, id: Capability) -> Result<OpRegistration<'a>, RegistryError> {
        self.ops.get(id.index())
    }

    /// Check if an initialization capability is bound
    pub fn is_init_bound(&self, id: InitCapability) -> bool {
        self.init.is_bound(id.index())
    }

    /// Check if an operational capability is bound
    pub fn is_bound(&self, id: Capability) -> bool {
        self.ops.is_bound(id.index())
    }

    /// Number of bound slots as `(init, operational)`
    pub fn bound_counts(&self) -> (usize, usize) {
        (self.init.bound_count(), self.ops.bound_count())
    }

    /// Raw initialization table
    pub fn init_table(&self) -> &SlotTable<'a, InitImpl<'a>, INIT_SLOT_CAPACITY> {
        &self.init
    }

    /// Raw operational table
    pub fn op_table(&self) -> &SlotTable<'a, OpImpl<'a>, SLOT_CAPACITY> {
        &self.ops
    }

    /// Mutable raw operational table, bypassing capability checks
    #[cfg(test)]
    pub(crate) fn op_table_mut(&mut self) -> &mut SlotTable<'a, OpImpl<'a>, SLOT_CAPACITY> {
        &mut self.ops
    }

    /// Mutable raw initialization table, bypassing capability checks
    #[cfg(test)]
    pub(crate) fn init_table_mut(
        &mut self,
    ) -> &mut SlotTable<'a, InitImpl<'a>, INIT_SLOT_CAPACITY> {
        &mut self.init
    }
}

impl Default for Registry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
