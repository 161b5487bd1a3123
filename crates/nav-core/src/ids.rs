//! Strongly typed identifier and counter wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  Graph indices (`NodeId`, `EdgeId`) carry an `INVALID` sentinel
//! and an `.index()` helper for direct `Vec` indexing.  Counters (`RouteId`,
//! `Generation`) only ever grow: a new route or reroute request takes
//! `current.next()`, so comparing two values tells you which one is newer.

use std::fmt;

/// Generate a typed graph-index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

/// Generate a monotonic counter wrapper around a primitive integer.
macro_rules! counter_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const ZERO: $name = $name(0);

            /// The value after `self`.  Saturates instead of wrapping so an
            /// older value can never compare as newer.
            #[inline]
            #[must_use]
            pub fn next(self) -> $name {
                $name(self.0.saturating_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-network edge.
    pub struct EdgeId(u32);
}

counter_id! {
    /// Identifies a route installed in a navigation session.  Display
    /// consumers compare it to notice that the drawn polyline changed.
    pub struct RouteId(u32);
}

counter_id! {
    /// Reroute generation.  Every reroute request carries the generation that
    /// was current at dispatch; a response is applied only if it still is.
    pub struct Generation(u64);
}
