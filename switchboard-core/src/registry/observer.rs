//! Invocation observers
//!
//! An observer attached to a registration is notified immediately before
//! and immediately after every dispatched call of that slot. The wrapper
//! notifies `after` whatever the implementation returned.

use portable_atomic::{AtomicU32, Ordering};
use switchboard_hal::{Capability, InitCapability};

/// Identifies a slot across both namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotKey {
    Init(InitCapability),
    Operation(Capability),
}

impl From<InitCapability> for SlotKey {
    fn from(cap: InitCapability) -> Self {
        SlotKey::Init(cap)
    }
}

impl From<Capability> for SlotKey {
    fn from(cap: Capability) -> Self {
        SlotKey::Operation(cap)
    }
}

/// Receives pre/post invocation events for one registration
///
/// Observers run in whatever context the wrapper is called from, including
/// interrupt handlers, so they must be `Sync` and must not block.
pub trait InvocationObserver: Sync {
    /// Called before the implementation runs
    fn before(&self, _slot: SlotKey) {}

    /// Called after the implementation returns
    fn after(&self, _slot: SlotKey) {}
}

/// Plain zero-argument pre/post hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct Hooks {
    /// Run before the implementation
    pub pre: Option<fn()>,
    /// Run after the implementation
    pub post: Option<fn()>,
}

impl Hooks {
    /// Create hooks from optional pre and post functions
    pub const fn new(pre: Option<fn()>, post: Option<fn()>) -> Self {
        Self { pre, post }
    }

    /// Only a pre-invocation hook
    pub const fn pre(hook: fn()) -> Self {
        Self::new(Some(hook), None)
    }

    /// Only a post-invocation hook
    pub const fn post(hook: fn()) -> Self {
        Self::new(None, Some(hook))
    }
}

impl InvocationObserver for Hooks {
    fn before(&self, _slot: SlotKey) {
        if let Some(pre) = self.pre {
            pre();
        }
    }

    fn after(&self, _slot: SlotKey) {
        if let Some(post) = self.post {
            post();
        }
    }
}

/// Counts calls entering and leaving a slot
///
/// Usable from interrupt context; on targets without native atomics
/// `portable-atomic` falls back to critical sections.
#[derive(Debug, Default)]
pub struct InvocationCounter {
    started: AtomicU32,
    finished: AtomicU32,
}

impl InvocationCounter {
    /// Create a zeroed counter
    pub const fn new() -> Self {
        Self {
            started: AtomicU32::new(0),
            finished: AtomicU32::new(0),
        }
    }

    /// Number of calls that reached the implementation
    pub fn started(&self) -> u32 {
        self.started.load(Ordering::Relaxed)
    }

    /// Number of calls whose implementation returned
    pub fn finished(&self) -> u32 {
        self.finished.load(Ordering::Relaxed)
    }

    /// Check that no call is currently in progress
    pub fn is_idle(&self) -> bool {
        self.started() == self.finished()
    }
}

impl InvocationObserver for InvocationCounter {
    fn before(&self, _slot: SlotKey) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn after(&self, _slot: SlotKey) {
        self.finished.fetch_add(1, Ordering::Relaxed);
    }
}

/// Runs `call` between the observer's `before` and `after` notifications
pub(crate) fn observe<R>(
    observer: Option<&dyn InvocationObserver>,
    slot: SlotKey,
    call: impl FnOnce() -> R,
) -> R {
    if let Some(observer) = observer {
        observer.before(slot);
    }
    let result = call();
    if let Some(observer) = observer {
        observer.after(slot);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    static PRE_CALLS: AtomicU32 = AtomicU32::new(0);
    static POST_CALLS: AtomicU32 = AtomicU32::new(0);

    fn count_pre() {
        PRE_CALLS.fetch_add(1, Ordering::Relaxed);
    }

    fn count_post() {
        POST_CALLS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn test_hooks_forward_to_functions() {
        let hooks = Hooks::new(Some(count_pre), Some(count_post));
        let slot = SlotKey::Operation(Capability::PinToggle);

        let result = observe(Some(&hooks), slot, || 7);
        assert_eq!(result, 7);
        assert_eq!(PRE_CALLS.load(Ordering::Relaxed), 1);
        assert_eq!(POST_CALLS.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_counter() {
        let counter = InvocationCounter::new();
        let slot = SlotKey::Init(InitCapability::DigitalPinInit);

        observe(Some(&counter), slot, || {
            assert_eq!(counter.started(), 1);
            assert_eq!(counter.finished(), 0);
            assert!(!counter.is_idle());
        });

        assert_eq!(counter.started(), 1);
        assert_eq!(counter.finished(), 1);
        assert!(counter.is_idle());
    }

    #[test]
    fn test_no_observer() {
        let slot = SlotKey::from(Capability::PinRead);
        assert!(observe(None, slot, || true));
    }

    #[test]
    fn test_empty_hooks_are_inert() {
        let hooks = Hooks::default();
        let slot = SlotKey::from(InitCapability::BspInit);
        assert_eq!(observe(Some(&hooks), slot, || 3), 3);
    }
}
