//! # Field Layout
//!
//! The heliostat field being edited: an ordered list of heliostats and
//! receivers with their world positions. Objects are addressed by a stable
//! [`ObjectId`] so selection survives removals.

pub mod markers;

pub use markers::FieldMarkers;

use std::fmt;

use cgmath::Vector3;

/// Stable identifier of a field object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldObjectKind {
    Heliostat,
    Receiver,
}

impl FieldObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldObjectKind::Heliostat => "Heliostat",
            FieldObjectKind::Receiver => "Receiver",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldObject {
    pub id: ObjectId,
    pub kind: FieldObjectKind,
    pub name: String,
    pub position: Vector3<f32>,
}

/// Ordered collection of field objects
#[derive(Debug, Default)]
pub struct FieldLayout {
    objects: Vec<FieldObject>,
    next_id: u32,
}

impl FieldLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout the editor starts with: a receiver at the origin and a short
    /// row of heliostats south of it.
    pub fn with_default_objects() -> Self {
        let mut layout = Self::new();
        layout.add(FieldObjectKind::Receiver, Vector3::new(0.0, 0.0, 0.0));
        for i in 0..3 {
            let x = (i as f32 - 1.0) * 3.0;
            layout.add(FieldObjectKind::Heliostat, Vector3::new(x, 0.0, 6.0));
        }
        layout
    }

    /// Adds an object and returns its id. Names are made unique per kind.
    pub fn add(&mut self, kind: FieldObjectKind, position: Vector3<f32>) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        let name = self.ensure_unique_name(kind.as_str());
        log::debug!("Adding {} '{}' at {:?}", kind.as_str(), name, position);
        self.objects.push(FieldObject {
            id,
            kind,
            name,
            position,
        });
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<FieldObject> {
        let index = self.objects.iter().position(|object| object.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&FieldObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut FieldObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn count_of(&self, kind: FieldObjectKind) -> usize {
        self.objects.iter().filter(|object| object.kind == kind).count()
    }

    fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|object| object.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_remove() {
        let mut layout = FieldLayout::new();
        let a = layout.add(FieldObjectKind::Heliostat, Vector3::new(1.0, 0.0, 2.0));
        let b = layout.add(FieldObjectKind::Receiver, Vector3::new(0.0, 0.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get(a).map(|o| o.kind), Some(FieldObjectKind::Heliostat));

        let removed = layout.remove(a);
        assert_eq!(removed.map(|o| o.id), Some(a));
        assert!(layout.get(a).is_none());
        assert!(layout.remove(a).is_none());
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut layout = FieldLayout::new();
        let a = layout.add(FieldObjectKind::Heliostat, Vector3::new(0.0, 0.0, 0.0));
        layout.remove(a);
        let b = layout.add(FieldObjectKind::Heliostat, Vector3::new(0.0, 0.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_names_are_unique() {
        let mut layout = FieldLayout::new();
        layout.add(FieldObjectKind::Heliostat, Vector3::new(0.0, 0.0, 0.0));
        layout.add(FieldObjectKind::Heliostat, Vector3::new(1.0, 0.0, 0.0));
        layout.add(FieldObjectKind::Heliostat, Vector3::new(2.0, 0.0, 0.0));
        let names: Vec<&str> = layout.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Heliostat", "Heliostat (1)", "Heliostat (2)"]);
    }

    #[test]
    fn test_get_mut_moves_object() {
        let mut layout = FieldLayout::new();
        let id = layout.add(FieldObjectKind::Receiver, Vector3::new(0.0, 0.0, 0.0));
        if let Some(object) = layout.get_mut(id) {
            object.position.y = 12.0;
        }
        assert_eq!(layout.get(id).map(|o| o.position.y), Some(12.0));
    }

    #[test]
    fn test_default_objects() {
        let layout = FieldLayout::with_default_objects();
        assert_eq!(layout.count_of(FieldObjectKind::Receiver), 1);
        assert_eq!(layout.count_of(FieldObjectKind::Heliostat), 3);
        assert!(!layout.is_empty());
    }
}
