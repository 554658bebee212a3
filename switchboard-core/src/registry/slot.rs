//! Slot table storage with the bind and export contracts
//!
//! A table is a fixed array of registration records indexed by capability
//! id. Both namespaces use the same algorithm; only the record type and the
//! capacity differ.

use core::fmt;

use super::observer::InvocationObserver;

/// Registry operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Slot id in range but nothing is bound to it
    NotFound,
    /// Rejected argument
    BadParam(BadParam),
}

/// Reason a bind or export argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BadParam {
    /// No record was supplied
    MissingRecord,
    /// Slot id is not below the table capacity
    SlotOutOfRange,
    /// Record carries no implementation
    EmptyImplementation,
    /// Implementation belongs to a different capability than the slot
    CapabilityMismatch,
}

impl From<BadParam> for RegistryError {
    fn from(reason: BadParam) -> Self {
        RegistryError::BadParam(reason)
    }
}

/// One registration record
///
/// A record without an implementation marks an unbound slot; its observer
/// is ignored.
#[derive(Clone, Copy)]
pub struct Registration<'a, I> {
    /// Implementation reference, mandatory for a successful bind
    pub implementation: Option<I>,
    /// Optional pre/post invocation observer
    pub observer: Option<&'a dyn InvocationObserver>,
}

impl<'a, I: Copy> Registration<'a, I> {
    /// The unbound record
    pub const EMPTY: Self = Self {
        implementation: None,
        observer: None,
    };

    /// Record with an implementation and no observer
    pub const fn new(implementation: I) -> Self {
        Self {
            implementation: Some(implementation),
            observer: None,
        }
    }

    /// Attach an observer
    pub const fn with_observer(mut self, observer: &'a dyn InvocationObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Check if the record carries an implementation
    pub fn is_bound(&self) -> bool {
        self.implementation.is_some()
    }
}

impl<I: Copy> Default for Registration<'_, I> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<I: fmt::Debug> fmt::Debug for Registration<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("implementation", &self.implementation)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

/// Fixed-capacity table of registration records
pub struct SlotTable<'a, I, const N: usize> {
    slots: [Registration<'a, I>; N],
}

impl<'a, I: Copy, const N: usize> SlotTable<'a, I, N> {
    /// Table capacity
    pub const CAPACITY: usize = N;

    /// Create a table with every slot unbound
    pub const fn new() -> Self {
        Self {
            slots: [Registration::EMPTY; N],
        }
    }

    /// Unbind every slot
    pub fn reset(&mut self) {
        self.slots = [Registration::EMPTY; N];
    }

    /// Store `candidate` in slot `index`, replacing the previous record
    ///
    /// Fails with `BadParam` if the candidate is missing, the index is out of
    /// range, or the candidate has no implementation. Observers are optional.
    pub fn bind(
        &mut self,
        index: usize,
        candidate: Option<&Registration<'a, I>>,
    ) -> Result<(), RegistryError> {
        let candidate = candidate.ok_or(BadParam::MissingRecord)?;
        let slot = self.slots.get_mut(index).ok_or(BadParam::SlotOutOfRange)?;
        if !candidate.is_bound() {
            return Err(BadParam::EmptyImplementation.into());
        }
        *slot = *candidate;
        Ok(())
    }

    /// Copy the record in slot `index` into `out`
    ///
    /// Fails with `BadParam` if `out` is missing or the index is out of
    /// range, and with `NotFound` if the slot is unbound. `out` is untouched
    /// on failure.
    pub fn export(
        &self,
        index: usize,
        out: Option<&mut Registration<'a, I>>,
    ) -> Result<(), RegistryError> {
        let out = out.ok_or(BadParam::MissingRecord)?;
        let record = self.get(index)?;
        *out = record;
        Ok(())
    }

    /// Return a copy of the record in slot `index`
    pub fn get(&self, index: usize) -> Result<Registration<'a, I>, RegistryError> {
        let record = self.slots.get(index).ok_or(BadParam::SlotOutOfRange)?;
        if record.is_bound() {
            Ok(*record)
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Check if slot `index` is bound; out-of-range slots are never bound
    pub fn is_bound(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|r| r.is_bound())
    }

    /// Number of bound slots
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|r| r.is_bound()).count()
    }
}

impl<I: Copy, const N: usize> Default for SlotTable<'_, I, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::observer::{Hooks, InvocationCounter};

    type Table<'a> = SlotTable<'a, u16, 8>;

    fn noop() {}

    #[test]
    fn test_new_table_is_unbound() {
        let table = Table::new();
        for index in 0..Table::CAPACITY {
            assert_eq!(table.get(index).unwrap_err(), RegistryError::NotFound);
        }
        assert_eq!(table.bound_count(), 0);
    }

    #[test]
    fn test_bind_then_export() {
        let mut table = Table::new();
        let hooks = Hooks::pre(noop);
        let record = Registration::new(42u16).with_observer(&hooks);

        assert_eq!(table.bind(3, Some(&record)), Ok(()));

        let mut out = Registration::EMPTY;
        assert_eq!(table.export(3, Some(&mut out)), Ok(()));
        assert_eq!(out.implementation, Some(42));
        assert!(out.observer.is_some());
        assert!(table.is_bound(3));
        assert_eq!(table.bound_count(), 1);
    }

    #[test]
    fn test_bind_rejections() {
        let mut table = Table::new();
        let record = Registration::new(1u16);

        assert_eq!(
            table.bind(0, None),
            Err(RegistryError::BadParam(BadParam::MissingRecord))
        );
        assert_eq!(
            table.bind(8, Some(&record)),
            Err(RegistryError::BadParam(BadParam::SlotOutOfRange))
        );
        assert_eq!(
            table.bind(0, Some(&Registration::EMPTY)),
            Err(RegistryError::BadParam(BadParam::EmptyImplementation))
        );

        // Nothing was written
        assert_eq!(table.bound_count(), 0);
    }

    #[test]
    fn test_empty_record_with_observer_still_rejected() {
        let mut table = Table::new();
        let counter = InvocationCounter::new();
        let record: Registration<'_, u16> = Registration {
            implementation: None,
            observer: Some(&counter),
        };

        assert_eq!(
            table.bind(2, Some(&record)),
            Err(RegistryError::BadParam(BadParam::EmptyImplementation))
        );
        assert_eq!(table.get(2).unwrap_err(), RegistryError::NotFound);
    }

    #[test]
    fn test_export_rejections_leave_out_untouched() {
        let mut table = Table::new();
        table.bind(1, Some(&Registration::new(5u16))).unwrap();

        assert_eq!(
            table.export(1, None),
            Err(RegistryError::BadParam(BadParam::MissingRecord))
        );

        let mut out = Registration::new(99u16);
        assert_eq!(
            table.export(8, Some(&mut out)),
            Err(RegistryError::BadParam(BadParam::SlotOutOfRange))
        );
        assert_eq!(table.export(0, Some(&mut out)), Err(RegistryError::NotFound));
        assert_eq!(out.implementation, Some(99));
    }

    #[test]
    fn test_rebind_replaces_whole_record() {
        let mut table = Table::new();
        let counter = InvocationCounter::new();

        let first = Registration::new(1u16).with_observer(&counter);
        let second = Registration::new(2u16);
        table.bind(4, Some(&first)).unwrap();
        table.bind(4, Some(&second)).unwrap();

        let out = table.get(4).unwrap();
        assert_eq!(out.implementation, Some(2));
        // The first record's observer does not survive
        assert!(out.observer.is_none());
    }

    #[test]
    fn test_reset_unbinds_everything() {
        let mut table = Table::new();
        for index in 0..Table::CAPACITY {
            table.bind(index, Some(&Registration::new(index as u16))).unwrap();
        }
        assert_eq!(table.bound_count(), Table::CAPACITY);

        table.reset();
        assert_eq!(table.bound_count(), 0);
        assert!(!table.is_bound(0));
    }
}
