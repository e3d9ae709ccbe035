//! Reference Library
//!
//! Label-to-shape mapping with stable insertion order. Order is contractual
//! because classification ties break to the first-inserted reference, so
//! the serde impls are written by hand: the library is encoded as a JSON
//! object whose key order is the insertion order, each value a sequence of
//! `[x, y]` pairs.

use crate::trace::{CanonicalShape, TracePoint};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from label to canonical reference shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLibrary {
    entries: Vec<(String, CanonicalShape)>,
}

impl ReferenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite the shape for `label`.
    ///
    /// Overwriting keeps the label's original position, so re-recording a
    /// reference does not change tie-breaking order.
    pub fn insert(&mut self, label: String, shape: CanonicalShape) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = shape,
            None => self.entries.push((label, shape)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&CanonicalShape> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, shape)| shape)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalShape)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), s))
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }
}

impl Serialize for ReferenceLibrary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, shape) in &self.entries {
            let pairs: Vec<[f64; 2]> = shape.points().iter().map(|p| [p.x, p.y]).collect();
            map.serialize_entry(label, &pairs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReferenceLibrary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LibraryVisitor;

        impl<'de> Visitor<'de> for LibraryVisitor {
            type Value = ReferenceLibrary;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map from label to a sequence of [x, y] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut library = ReferenceLibrary::new();
                while let Some((label, pairs)) = access.next_entry::<String, Vec<[f64; 2]>>()? {
                    let points: Vec<TracePoint> =
                        pairs.into_iter().map(TracePoint::from).collect();
                    let shape =
                        CanonicalShape::new(points).map_err(serde::de::Error::custom)?;
                    library.insert(label, shape);
                }
                Ok(library)
            }
        }

        deserializer.deserialize_map(LibraryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(seed: f64) -> CanonicalShape {
        CanonicalShape::new(
            (0..4)
                .map(|i| TracePoint::new(seed + i as f64, seed - i as f64))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut library = ReferenceLibrary::new();
        library.insert("b".to_string(), shape(1.0));
        library.insert("a".to_string(), shape(2.0));
        library.insert("c".to_string(), shape(3.0));

        let labels: Vec<&str> = library.labels().collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut library = ReferenceLibrary::new();
        library.insert("x".to_string(), shape(1.0));
        library.insert("y".to_string(), shape(2.0));
        library.insert("x".to_string(), shape(9.0));

        assert_eq!(library.len(), 2);
        let labels: Vec<&str> = library.labels().collect();
        assert_eq!(labels, vec!["x", "y"]);
        assert_eq!(library.get("x").unwrap().points()[0].x, 9.0);
    }

    #[test]
    fn test_json_format_is_label_to_pairs() {
        let mut library = ReferenceLibrary::new();
        library.insert(
            "L".to_string(),
            CanonicalShape::new(vec![
                TracePoint::new(1.0, 2.0),
                TracePoint::new(3.0, 4.0),
            ])
            .unwrap(),
        );

        let json = serde_json::to_string(&library).unwrap();
        assert_eq!(json, r#"{"L":[[1.0,2.0],[3.0,4.0]]}"#);
    }

    #[test]
    fn test_roundtrip_preserves_order_and_shapes() {
        let mut library = ReferenceLibrary::new();
        library.insert("zeta".to_string(), shape(0.5));
        library.insert("alpha".to_string(), shape(-3.0));

        let json = serde_json::to_string_pretty(&library).unwrap();
        let back: ReferenceLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, library);
        assert_eq!(
            back.labels().collect::<Vec<_>>(),
            vec!["zeta", "alpha"]
        );
    }

    #[test]
    fn test_rejects_degenerate_stored_shape() {
        let err = serde_json::from_str::<ReferenceLibrary>(r#"{"dot":[[1.0,1.0]]}"#);
        assert!(err.is_err());
    }
}
