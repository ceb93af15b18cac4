//! Box markers drawn for field objects in the main viewport.

use cgmath::Matrix4;

use crate::gfx::geometry::generate_box;
use crate::gfx::gizmos::{Drawable, MaterialDesc, ResourceHandle, ResourcePool};

use super::{FieldLayout, FieldObjectKind, ObjectId};

const HELIOSTAT_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
const RECEIVER_COLOR: [f32; 3] = [0.6, 0.6, 0.65];
const SELECTED_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// GPU handles shared by every marker of a kind
pub struct FieldMarkers {
    heliostat_geometry: ResourceHandle,
    receiver_geometry: ResourceHandle,
    heliostat_material: ResourceHandle,
    receiver_material: ResourceHandle,
    selected_material: ResourceHandle,
}

impl FieldMarkers {
    pub fn new(pool: &mut dyn ResourcePool) -> Self {
        // Mirror panel raised above the ground plane
        let heliostat = generate_box(1.2, 0.1, 1.2).translated([0.0, 1.0, 0.0]);
        // Tower, standing on the ground plane
        let receiver = generate_box(1.0, 3.0, 1.0).translated([0.0, 1.5, 0.0]);

        Self {
            heliostat_geometry: pool.create_geometry(heliostat),
            receiver_geometry: pool.create_geometry(receiver),
            heliostat_material: pool.create_material(MaterialDesc::flat(HELIOSTAT_COLOR)),
            receiver_material: pool.create_material(MaterialDesc::flat(RECEIVER_COLOR)),
            selected_material: pool.create_material(MaterialDesc::flat(SELECTED_COLOR)),
        }
    }

    /// One drawable per object; the selected object uses the highlight
    /// material.
    pub fn drawables(&self, layout: &FieldLayout, selected: Option<ObjectId>) -> Vec<Drawable> {
        layout
            .iter()
            .map(|object| {
                let (geometry, material) = match object.kind {
                    FieldObjectKind::Heliostat => {
                        (self.heliostat_geometry, self.heliostat_material)
                    }
                    FieldObjectKind::Receiver => (self.receiver_geometry, self.receiver_material),
                };
                let material = if selected == Some(object.id) {
                    self.selected_material
                } else {
                    material
                };
                Drawable {
                    geometry,
                    material,
                    transform: Matrix4::from_translation(object.position),
                    opacity: 1.0,
                }
            })
            .collect()
    }

    pub fn dispose(self, pool: &mut dyn ResourcePool) {
        for handle in [
            self.heliostat_geometry,
            self.receiver_geometry,
            self.heliostat_material,
            self.receiver_material,
            self.selected_material,
        ] {
            pool.release(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::gfx::gizmos::test_support::RecordingPool;
    use crate::gfx::gizmos::ResourceKind;

    #[test]
    fn test_selected_object_is_highlighted() {
        let mut pool = RecordingPool::default();
        let markers = FieldMarkers::new(&mut pool);

        let mut layout = FieldLayout::new();
        let a = layout.add(FieldObjectKind::Heliostat, Vector3::new(1.0, 0.0, 0.0));
        let b = layout.add(FieldObjectKind::Heliostat, Vector3::new(2.0, 0.0, 0.0));

        let drawables = markers.drawables(&layout, Some(b));
        assert_eq!(drawables.len(), 2);
        assert_eq!(drawables[0].material, markers.heliostat_material);
        assert_eq!(drawables[1].material, markers.selected_material);
        assert_eq!(drawables[1].transform.w.x, 2.0);

        let unselected = markers.drawables(&layout, Some(a));
        assert_eq!(unselected[1].material, markers.heliostat_material);
    }

    #[test]
    fn test_kinds_use_their_geometry() {
        let mut pool = RecordingPool::default();
        let markers = FieldMarkers::new(&mut pool);
        let layout = FieldLayout::with_default_objects();

        let drawables = markers.drawables(&layout, None);
        assert_eq!(drawables[0].geometry, markers.receiver_geometry);
        assert!(drawables[1..]
            .iter()
            .all(|d| d.geometry == markers.heliostat_geometry));
    }

    #[test]
    fn test_dispose_releases_everything_once() {
        let mut pool = RecordingPool::default();
        let markers = FieldMarkers::new(&mut pool);
        assert_eq!(pool.count_of(ResourceKind::Geometry), 2);
        assert_eq!(pool.count_of(ResourceKind::Material), 3);

        markers.dispose(&mut pool);
        let created = pool.created.clone();
        assert!(created.iter().all(|h| pool.release_count(*h) == 1));
    }
}
