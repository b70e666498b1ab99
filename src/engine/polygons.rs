//! Ordered set of drawn polygons.

use geo::Polygon;
use reportfence_types::polygon::{DrawnPolygon, PolygonId};

/// Polygons in draw order, keyed by a monotonically assigned id.
///
/// Ids are never reused within one set, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct PolygonSet {
    polygons: Vec<DrawnPolygon>,
    next_id: u64,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a polygon and return its freshly assigned id.
    pub fn insert(&mut self, geometry: Polygon) -> PolygonId {
        self.next_id += 1;
        let id = PolygonId(self.next_id);
        self.polygons.push(DrawnPolygon::new(id, geometry));
        id
    }

    /// Replace the shape of `id` in place. Returns `false` if no such polygon.
    pub fn reshape(&mut self, id: PolygonId, geometry: Polygon) -> bool {
        match self.polygons.iter_mut().find(|p| p.id() == id) {
            Some(polygon) => {
                polygon.reshape(geometry);
                true
            }
            None => false,
        }
    }

    /// Remove `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: PolygonId) -> Option<DrawnPolygon> {
        let pos = self.polygons.iter().position(|p| p.id() == id)?;
        Some(self.polygons.remove(pos))
    }

    pub fn get(&self, id: PolygonId) -> Option<&DrawnPolygon> {
        self.polygons.iter().find(|p| p.id() == id)
    }

    pub fn contains_id(&self, id: PolygonId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawnPolygon> {
        self.polygons.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PolygonId> + '_ {
        self.polygons.iter().map(DrawnPolygon::id)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a DrawnPolygon;
    type IntoIter = std::slice::Iter<'a, DrawnPolygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
