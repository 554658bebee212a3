//! External interrupt configuration

/// Interrupt service routine
pub type IsrHandler = fn();

/// Lowest (numerically largest) interrupt priority accepted by drivers
///
/// Priorities follow the Armv7-M/Armv8-M convention: 0 is the most urgent.
pub const LOWEST_PRIORITY: u8 = 7;

/// Edge that raises the pin interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExtiEdge {
    #[default]
    Disabled = 0,
    Rising = 1,
    Falling = 2,
    Both = 3,
}

impl ExtiEdge {
    /// Create an edge selector from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ExtiEdge::Disabled),
            1 => Some(ExtiEdge::Rising),
            2 => Some(ExtiEdge::Falling),
            3 => Some(ExtiEdge::Both),
            _ => None,
        }
    }

    /// Check if a level transition fires this edge selector
    pub fn fires(self, was_high: bool, is_high: bool) -> bool {
        match self {
            ExtiEdge::Disabled => false,
            ExtiEdge::Rising => !was_high && is_high,
            ExtiEdge::Falling => was_high && !is_high,
            ExtiEdge::Both => was_high != is_high,
        }
    }
}

/// External interrupt registration
#[derive(Debug, Clone, Copy)]
pub struct ExtiConfig {
    /// Interrupt priority, 0 (highest) to [`LOWEST_PRIORITY`]
    pub priority: u8,
    /// Triggering edge
    pub edge: ExtiEdge,
    /// Handler invoked when the interrupt fires
    pub handler: IsrHandler,
}

impl ExtiConfig {
    /// Create a new interrupt configuration
    pub const fn new(priority: u8, edge: ExtiEdge, handler: IsrHandler) -> Self {
        Self {
            priority,
            edge,
            handler,
        }
    }

    /// Check the priority is within the supported range
    pub fn is_valid(&self) -> bool {
        self.priority <= LOWEST_PRIORITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() {}

    #[test]
    fn test_edge_detection() {
        assert!(ExtiEdge::Rising.fires(false, true));
        assert!(!ExtiEdge::Rising.fires(true, false));
        assert!(ExtiEdge::Falling.fires(true, false));
        assert!(!ExtiEdge::Falling.fires(false, true));
        assert!(ExtiEdge::Both.fires(false, true));
        assert!(ExtiEdge::Both.fires(true, false));
        assert!(!ExtiEdge::Both.fires(true, true));
        assert!(!ExtiEdge::Disabled.fires(false, true));
    }

    #[test]
    fn test_priority_range() {
        assert!(ExtiConfig::new(0, ExtiEdge::Rising, noop).is_valid());
        assert!(ExtiConfig::new(LOWEST_PRIORITY, ExtiEdge::Rising, noop).is_valid());
        assert!(!ExtiConfig::new(LOWEST_PRIORITY + 1, ExtiEdge::Rising, noop).is_valid());
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(ExtiEdge::from_u8(3), Some(ExtiEdge::Both));
        assert_eq!(ExtiEdge::from_u8(4), None);
    }
}
