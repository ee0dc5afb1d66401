//! Strongly typed string identifiers.
//!
//! Network descriptions name every entity with a free-form string, so the
//! ids wrap a `String` rather than an integer.  All ids are
//! `Clone + Ord + Hash` and implement `Borrow<str>`, which lets maps keyed by
//! an id be queried with a plain `&str`.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed id wrapper around a `String`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id! {
    /// Identifier of a network node (signalized or virtual).
    pub struct IntersectionId;
}

typed_id! {
    /// Identifier of a directed road segment.
    pub struct RoadId;
}

typed_id! {
    /// Identifier of a single lane: `{road_id}_{index}`.
    pub struct LaneId;
}

typed_id! {
    /// Identifier of a vehicle as reported by the simulator.
    pub struct VehicleId;
}

impl LaneId {
    /// The id of lane `index` on `road`.  Index 0 is the road's first lane
    /// as listed in the network description.
    pub fn of(road: &RoadId, index: usize) -> LaneId {
        LaneId(format!("{}_{}", road.0, index))
    }
}
