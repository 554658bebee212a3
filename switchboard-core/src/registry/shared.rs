//! Registry handle reachable from interrupt handlers
//!
//! Interrupt service routines are plain `fn()` and cannot capture the
//! registry, so a populated registry is published once through a static
//! [`SharedRegistry`] and looked up from there.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::context::Registry;
use crate::dispatch::Gpio;

/// A registry was already installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlreadyInstalled;

/// Write-once cell publishing a frozen registry
///
/// ```ignore
/// static REGISTRY: StaticCell<Registry<'static>> = StaticCell::new();
/// static SHARED: SharedRegistry = SharedRegistry::new();
///
/// let registry = REGISTRY.init(Registry::new());
/// chip::bind_all(registry)?;
/// SHARED.install(registry)?;
/// ```
pub struct SharedRegistry {
    inner: Mutex<CriticalSectionRawMutex, Cell<Option<&'static Registry<'static>>>>,
}

impl SharedRegistry {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(None)),
        }
    }

    /// Publish `registry`
    ///
    /// Taking a shared reference freezes the registry: nothing can bind into
    /// it afterwards.
    pub fn install(&self, registry: &'static Registry<'static>) -> Result<(), AlreadyInstalled> {
        self.inner.lock(|cell| {
            if cell.get().is_some() {
                warn!("registry already installed");
                return Err(AlreadyInstalled);
            }
            cell.set(Some(registry));
            let (_init, _ops) = registry.bound_counts();
            debug!("registry installed ({} init, {} op slots bound)", _init, _ops);
            Ok(())
        })
    }

    /// The installed registry, if any
    pub fn get(&self) -> Option<&'static Registry<'static>> {
        self.inner.lock(|cell| cell.get())
    }

    /// Check if a registry has been installed
    pub fn is_installed(&self) -> bool {
        self.get().is_some()
    }

    /// Wrappers over the installed registry with the default violation policy
    pub fn gpio(&self) -> Option<Gpio<'static, 'static>> {
        self.get().map(Gpio::new)
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{OpImpl, Registration};
    use static_cell::StaticCell;
    use switchboard_hal::Capability;

    fn read(_port: u8, _pin: u8) -> bool {
        true
    }

    #[test]
    fn test_empty_until_installed() {
        let shared = SharedRegistry::new();
        assert!(!shared.is_installed());
        assert!(shared.get().is_none());
        assert!(shared.gpio().is_none());
    }

    #[test]
    fn test_install_once() {
        static FIRST: StaticCell<Registry<'static>> = StaticCell::new();
        static SECOND: StaticCell<Registry<'static>> = StaticCell::new();
        static SHARED: SharedRegistry = SharedRegistry::new();

        let first = FIRST.init(Registry::new());
        first
            .register(&Registration::new(OpImpl::PinRead(&read)))
            .unwrap();
        let second = SECOND.init(Registry::new());

        assert_eq!(SHARED.install(first), Ok(()));
        assert_eq!(SHARED.install(second), Err(AlreadyInstalled));

        let installed = SHARED.get().unwrap();
        assert!(installed.is_bound(Capability::PinRead));
        assert!(SHARED.gpio().unwrap().read(0, 0));
    }
}
