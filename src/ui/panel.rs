// src/ui/panel.rs
//! Editor panels
//!
//! The field panel lists objects and inspects the selected one; the view
//! panel shows the gizmo state and offers quick-view buttons.

use crate::editor::EditorContext;
use crate::field::{FieldObjectKind, ObjectId};
use crate::gfx::gizmos::{AnimationState, AxisDirection};

use super::inspector::{FieldAxis, PositionInspector};

/// Field panel: object list, add/remove actions and position inspector
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `context` - Editor session
/// * `inspector` - Text buffers of the position fields
pub fn field_panel(ui: &imgui::Ui, context: &mut EditorContext, inspector: &mut PositionInspector) {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = (display_size[0] * 0.25).clamp(260.0, 380.0);
    let panel_height = (display_size[1] * 0.6).max(320.0);

    ui.window("Field")
        .size([panel_width, panel_height], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            render_object_list(ui, context);
            ui.separator();
            render_actions(ui, context);
            ui.separator();
            render_inspector(ui, context, inspector);
        });
}

fn render_object_list(ui: &imgui::Ui, context: &mut EditorContext) {
    ui.text("Objects");

    if context.field().is_empty() {
        ui.text_disabled("The field is empty");
        return;
    }

    let entries: Vec<(ObjectId, String)> = context
        .field()
        .iter()
        .map(|object| (object.id, format!("{}##{}", object.name, object.id)))
        .collect();

    let mut clicked = None;
    ui.child_window("object_list")
        .size([0.0, 150.0])
        .border(true)
        .build(|| {
            for (id, label) in &entries {
                let is_selected = context.selected() == Some(*id);
                if ui
                    .selectable_config(label)
                    .selected(is_selected)
                    .allow_double_click(false)
                    .build()
                {
                    clicked = Some(*id);
                }
            }
        });

    if clicked.is_some() {
        context.select(clicked);
    }
}

fn render_actions(ui: &imgui::Ui, context: &mut EditorContext) {
    if ui.button("Add heliostat") {
        context.add_object(FieldObjectKind::Heliostat);
    }
    ui.same_line();
    if ui.button("Add receiver") {
        context.add_object(FieldObjectKind::Receiver);
    }
    if context.selected().is_some() {
        ui.same_line();
        if ui.button("Remove") {
            context.remove_selected();
        }
    }
}

fn render_inspector(ui: &imgui::Ui, context: &mut EditorContext, inspector: &mut PositionInspector) {
    let Some(id) = context.selected() else {
        inspector.clear();
        ui.text_disabled("Select an object to edit its position");
        return;
    };
    let Some(object) = context.field_mut().get_mut(id) else {
        inspector.clear();
        return;
    };

    inspector.sync(object);
    ui.text(format!("Object {}", object.id));
    ui.text_disabled(object.kind.as_str());

    if ui.collapsing_header("Position", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        for axis in FieldAxis::ALL {
            ui.text(format!("{}:", axis.label()));
            ui.same_line();
            ui.set_next_item_width(-1.0);
            let label = format!("##pos_{}", axis.label());
            if ui
                .input_text(&label, inspector.buffer_mut(axis))
                .enter_returns_true(true)
                .build()
            {
                inspector.commit(&mut object.position, axis);
            }
        }
    }
}

/// View panel: gizmo style, turn state and quick-view buttons
pub fn view_panel(ui: &imgui::Ui, context: &mut EditorContext) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("View")
        .size([260.0, 0.0], imgui::Condition::FirstUseEver)
        .position(
            [display_size[0] - 280.0, 20.0],
            imgui::Condition::FirstUseEver,
        )
        .resizable(false)
        .collapsible(true)
        .build(|| {
            let gizmo = context.gizmo();
            ui.text(format!("Indicators: {}", gizmo.style()));
            match gizmo.state() {
                AnimationState::Idle => ui.text("Idle"),
                AnimationState::Animating(animation) => {
                    ui.text(format!("Turning to {}", animation.direction))
                }
            }

            let camera = context.camera();
            ui.text(format!(
                "Camera {:.2} {:.2} {:.2}",
                camera.position.x, camera.position.y, camera.position.z
            ));
            ui.separator();

            let animating = context.gizmo().is_animating();
            let mut requested = None;
            ui.disabled(animating, || {
                for (i, direction) in AxisDirection::ALL.iter().enumerate() {
                    if i % 3 != 0 {
                        ui.same_line();
                    }
                    if ui.button_with_size(direction.tag(), [70.0, 0.0]) {
                        requested = Some(*direction);
                    }
                }
            });

            if let Some(direction) = requested {
                context.request_view(direction);
            }

            ui.separator();
            if ui.button("Reset camera") {
                context.camera_manager.camera.reset_to_default();
                context.manual_camera_input();
            }
        });
}
