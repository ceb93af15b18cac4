//! Position inspector for the selected field object.
//!
//! Field coordinates are shown as north, east and up. North edits the world
//! `x` component, east edits `z` and up edits `y`.

use cgmath::Vector3;

use crate::field::{FieldObject, ObjectId};

/// One editable field coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAxis {
    North,
    East,
    Up,
}

impl FieldAxis {
    /// Display order of the inspector rows
    pub const ALL: [FieldAxis; 3] = [FieldAxis::North, FieldAxis::East, FieldAxis::Up];

    pub fn label(&self) -> &'static str {
        match self {
            FieldAxis::North => "N",
            FieldAxis::East => "E",
            FieldAxis::Up => "U",
        }
    }

    /// World component the axis edits
    pub fn component(&self) -> usize {
        match self {
            FieldAxis::North => 0,
            FieldAxis::East => 2,
            FieldAxis::Up => 1,
        }
    }

    pub fn get(&self, position: &Vector3<f32>) -> f32 {
        position[self.component()]
    }

    pub fn set(&self, position: &mut Vector3<f32>, value: f32) {
        position[self.component()] = value;
    }
}

/// Parses a coordinate typed into the inspector.
///
/// Empty, non-numeric and non-finite input yields `None`.
pub fn parse_coordinate(input: &str) -> Option<f32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f32>().ok().filter(|value| value.is_finite())
}

/// Applies `input` to one coordinate of `position`.
///
/// Returns `false` and leaves the position unchanged when the input is
/// rejected.
pub fn apply_input(position: &mut Vector3<f32>, axis: FieldAxis, input: &str) -> bool {
    match parse_coordinate(input) {
        Some(value) => {
            axis.set(position, value);
            true
        }
        None => {
            log::debug!("Ignoring {} input {:?}", axis.label(), input);
            false
        }
    }
}

/// Text buffers behind the three inspector fields.
///
/// Buffers are refilled from the object whenever the selection changes or
/// an edit is committed, so rejected input snaps back to the stored value.
#[derive(Debug, Default)]
pub struct PositionInspector {
    object: Option<ObjectId>,
    buffers: [String; 3],
}

impl PositionInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refills the buffers if `object` is not the one being inspected.
    pub fn sync(&mut self, object: &FieldObject) {
        if self.object != Some(object.id) {
            self.object = Some(object.id);
            self.refresh(&object.position);
        }
    }

    pub fn refresh(&mut self, position: &Vector3<f32>) {
        for (buffer, axis) in self.buffers.iter_mut().zip(FieldAxis::ALL) {
            *buffer = format!("{:.3}", axis.get(position));
        }
    }

    pub fn clear(&mut self) {
        self.object = None;
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }

    pub fn buffer_mut(&mut self, axis: FieldAxis) -> &mut String {
        let index = FieldAxis::ALL
            .iter()
            .position(|a| *a == axis)
            .unwrap_or_default();
        &mut self.buffers[index]
    }

    /// Commits the buffer of `axis` into `position`.
    pub fn commit(&mut self, position: &mut Vector3<f32>, axis: FieldAxis) -> bool {
        let input = self.buffer_mut(axis).clone();
        let applied = apply_input(position, axis, &input);
        self.refresh(position);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldLayout, FieldObjectKind};

    #[test]
    fn test_axis_mapping() {
        let mut position = Vector3::new(0.0, 0.0, 0.0);
        assert!(apply_input(&mut position, FieldAxis::North, "1.5"));
        assert!(apply_input(&mut position, FieldAxis::East, "-2"));
        assert!(apply_input(&mut position, FieldAxis::Up, "3"));
        assert_eq!(position, Vector3::new(1.5, 3.0, -2.0));
    }

    #[test]
    fn test_rejected_input_leaves_position() {
        let mut position = Vector3::new(1.0, 2.0, 3.0);
        for input in ["", "   ", "abc", "NaN", "inf", "-inf", "1e40"] {
            assert!(!apply_input(&mut position, FieldAxis::North, input), "{input}");
        }
        assert_eq!(position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_coordinate(" 4.25 "), Some(4.25));
        assert_eq!(parse_coordinate("-0"), Some(-0.0));
    }

    #[test]
    fn test_inspector_buffers_follow_selection() {
        let mut layout = FieldLayout::new();
        let a = layout.add(FieldObjectKind::Heliostat, Vector3::new(1.0, 2.0, 3.0));
        let b = layout.add(FieldObjectKind::Receiver, Vector3::new(-1.0, 0.0, 0.5));

        let mut inspector = PositionInspector::new();
        if let Some(object) = layout.get(a) {
            inspector.sync(object);
        }
        assert_eq!(inspector.buffer_mut(FieldAxis::North).as_str(), "1.000");
        assert_eq!(inspector.buffer_mut(FieldAxis::East).as_str(), "3.000");
        assert_eq!(inspector.buffer_mut(FieldAxis::Up).as_str(), "2.000");

        if let Some(object) = layout.get(b) {
            inspector.sync(object);
        }
        assert_eq!(inspector.buffer_mut(FieldAxis::North).as_str(), "-1.000");
    }

    #[test]
    fn test_commit_snaps_back_on_invalid_input() {
        let mut position = Vector3::new(1.0, 2.0, 3.0);
        let mut inspector = PositionInspector::new();
        inspector.refresh(&position);

        *inspector.buffer_mut(FieldAxis::Up) = "oops".to_string();
        assert!(!inspector.commit(&mut position, FieldAxis::Up));
        assert_eq!(inspector.buffer_mut(FieldAxis::Up).as_str(), "2.000");

        *inspector.buffer_mut(FieldAxis::Up) = "7".to_string();
        assert!(inspector.commit(&mut position, FieldAxis::Up));
        assert_eq!(position.y, 7.0);
    }
}
