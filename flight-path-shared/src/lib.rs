//! Shared itinerary types and the path resolver used by the backend.

pub mod itinerary {
    use serde::{ser::SerializeTuple, Serialize};
    use std::{
        collections::{HashMap, HashSet},
        fmt::{self, Display, Formatter},
    };
    use thiserror::Error;

    /// A single directed flight leg, origin to destination. Both ends are opaque airport tokens.
    #[derive(Debug, Eq, PartialEq, Hash, Clone)]
    pub struct Segment {
        pub origin: String,
        pub destination: String,
    }

    impl Segment {
        pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
            Segment {
                origin: origin.into(),
                destination: destination.into(),
            }
        }
    }

    impl From<(String, String)> for Segment {
        fn from((origin, destination): (String, String)) -> Self {
            Segment {
                origin,
                destination,
            }
        }
    }

    impl From<[String; 2]> for Segment {
        fn from([origin, destination]: [String; 2]) -> Self {
            Segment {
                origin,
                destination,
            }
        }
    }

    /// Overall start and end of a reconstructed trip
    #[derive(Debug, Eq, PartialEq, Clone)]
    pub struct Itinerary {
        pub start: String,
        pub end: String,
    }

    impl Serialize for Itinerary {
        // Clients expect the path as a bare [start, end] pair rather than an object
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            let mut state = serializer.serialize_tuple(2)?;
            state.serialize_element(&self.start)?;
            state.serialize_element(&self.end)?;
            state.end()
        }
    }

    impl Display for Itinerary {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "{} -> {}", self.start, self.end)
        }
    }

    #[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
    pub enum PathError {
        #[error("Invalid flight data: no unique starting point found.")]
        NoUniqueStart,
        #[error("Cycle detected in the flight path.")]
        CycleDetected,
        #[error("Invalid flight data: disjoint or unconnected flights detected.")]
        DisjointSegments,
    }

    /// Reconstructs the single itinerary formed by an unordered set of segments.
    ///
    /// The start is the first origin (in input order) that never appears as a destination. From
    /// there the successor of each airport is followed until an airport with no outgoing segment
    /// is reached, which becomes the end. Every segment origin has to be visited exactly once
    /// along the way, otherwise the set does not describe one simple chain.
    ///
    /// Several segments leaving the same airport are not reported separately; the last one wins
    /// and the input then fails as disjoint (or as having no start, depending on shape).
    pub fn resolve(segments: &[Segment]) -> Result<Itinerary, PathError> {
        let mut next_hop: HashMap<&str, &str> = HashMap::with_capacity(segments.len());
        let mut origins: Vec<&str> = Vec::with_capacity(segments.len());
        let mut destinations: HashSet<&str> = HashSet::with_capacity(segments.len());

        for segment in segments {
            if next_hop
                .insert(&segment.origin, &segment.destination)
                .is_none()
            {
                origins.push(&segment.origin);
            }
            destinations.insert(&segment.destination);
        }

        let start = origins
            .iter()
            .copied()
            .find(|origin| !destinations.contains(origin))
            .ok_or(PathError::NoUniqueStart)?;

        let mut visited: HashSet<&str> = HashSet::with_capacity(origins.len());
        let mut current = start;
        while let Some(&next) = next_hop.get(current) {
            if !visited.insert(current) {
                return Err(PathError::CycleDetected);
            }
            current = next;
        }

        if visited.len() != segments.len() {
            return Err(PathError::DisjointSegments);
        }

        Ok(Itinerary {
            start: start.to_string(),
            end: current.to_string(),
        })
    }
}
