//! Behaviour tests for the orientation gizmo

#[cfg(test)]
mod tests {
    use super::super::indicators::{AxisDirection, BACK_OPACITY, FRONT_OPACITY};
    use super::super::orientation_gizmo::{AnimationState, OrientationGizmo, PointerEvent};
    use super::super::test_support::{RecordingPool, RecordingRenderer, RenderCall, TestCamera};
    use super::super::traits::ResourceKind;
    use crate::config::{GizmoConfig, IndicatorStyleKind, OverlayCorner};
    use crate::error::GizmoError;
    use crate::gfx::rotation::{angle_between, camera_look_at, identity};
    use crate::gfx::viewport::{HostRect, Viewport};
    use cgmath::{InnerSpace, Quaternion, Rad, Rotation3, Vector3};
    use rand::Rng;
    use std::f32::consts::FRAC_PI_2;

    const HOST: HostRect = HostRect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    /// Client position of the `+X` indicator for an identity camera
    const POS_X_CLICK: PointerEvent = PointerEvent {
        client_x: 768.0,
        client_y: 536.0,
    };

    fn gizmo_with(style: IndicatorStyleKind) -> (OrientationGizmo, RecordingPool) {
        let mut pool = RecordingPool::default();
        let gizmo = OrientationGizmo::new(GizmoConfig::default().with_style(style), &mut pool)
            .expect("default config is valid");
        (gizmo, pool)
    }

    fn facing_z(distance: f32) -> TestCamera {
        TestCamera::new(Vector3::new(0.0, 0.0, distance), identity())
    }

    fn random_orientation(rng: &mut impl Rng) -> Quaternion<f32> {
        loop {
            let q = Quaternion::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            if q.magnitude2() > 1e-3 {
                return q.normalize();
            }
        }
    }

    fn run_to_idle(gizmo: &mut OrientationGizmo, camera: &mut TestCamera, dt: f32) -> usize {
        let mut frames = 0;
        while gizmo.is_animating() && frames < 10_000 {
            gizmo.update(dt, camera);
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_opacity_follows_view_vector() {
        let mut rng = rand::rng();
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);

        for _ in 0..500 {
            let camera = TestCamera::new(Vector3::new(0.0, 0.0, 5.0), random_orientation(&mut rng));
            gizmo.render(&camera, &mut renderer);

            let view = camera.orientation * Vector3::unit_z();
            for direction in AxisDirection::ALL {
                let opacity = gizmo.indicator_opacity(direction).unwrap();
                let component = view[direction.axis()];
                let expected = if (component >= 0.0) == direction.is_positive() {
                    FRONT_OPACITY
                } else {
                    BACK_OPACITY
                };
                assert_eq!(opacity, expected, "{direction} for view {view:?}");
            }

            for (pos, neg) in [
                (AxisDirection::PosX, AxisDirection::NegX),
                (AxisDirection::PosY, AxisDirection::NegY),
                (AxisDirection::PosZ, AxisDirection::NegZ),
            ] {
                let pos = gizmo.indicator_opacity(pos).unwrap();
                let neg = gizmo.indicator_opacity(neg).unwrap();
                assert_eq!(neg, 1.5 - pos);
            }
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Circles);
        let mut renderer = RecordingRenderer::new(800, 600);
        let camera = TestCamera::new(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::from_angle_x(Rad(-0.4)) * Quaternion::from_angle_y(Rad(0.9)),
        );

        gizmo.render(&camera, &mut renderer);
        let first = gizmo.indicators().to_vec();
        let first_calls = renderer.calls.clone();

        renderer.calls.clear();
        gizmo.render(&camera, &mut renderer);
        assert_eq!(gizmo.indicators(), first.as_slice());
        assert_eq!(renderer.calls, first_calls);
    }

    #[test]
    fn test_render_uses_corner_viewport_and_restores() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        gizmo.render(&facing_z(5.0), &mut renderer);

        assert_eq!(renderer.calls.len(), 4);
        assert_eq!(
            renderer.calls[0],
            RenderCall::SetViewport(Viewport::new(672.0, 472.0, 128.0, 128.0))
        );
        assert_eq!(renderer.calls[1], RenderCall::ClearDepth);
        assert!(matches!(
            &renderer.calls[2],
            RenderCall::Draw { drawables, .. } if drawables.len() == 9
        ));
        assert_eq!(renderer.calls[3], RenderCall::SetViewport(Viewport::full(800, 600)));
        assert_eq!(renderer.current, Viewport::full(800, 600));
    }

    #[test]
    fn test_small_window_draws_where_clicks_land() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(100, 80);
        let camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);

        let host = HostRect::new(0.0, 0.0, 100.0, 80.0);
        let overlay = host.overlay(128, OverlayCorner::BottomRight);
        let drawn = Viewport::new(overlay.left, overlay.top, overlay.extent, overlay.extent);
        assert_eq!(renderer.calls[0], RenderCall::SetViewport(drawn));

        // +X sits halfway between the centre and the right edge
        assert!(gizmo.handle_click(&PointerEvent::new(80.0, 40.0), &host, &camera));
        assert!(matches!(
            gizmo.state(),
            AnimationState::Animating(animation) if animation.direction == AxisDirection::PosX
        ));
    }

    #[test]
    fn test_facing_z_opacity() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        gizmo.render(&facing_z(5.0), &mut renderer);

        assert_eq!(gizmo.indicator_opacity(AxisDirection::PosZ), Some(1.0));
        assert_eq!(gizmo.indicator_opacity(AxisDirection::NegZ), Some(0.5));
    }

    #[test]
    fn test_overlay_centre_maps_to_origin() {
        let host = HostRect::new(37.0, 12.5, 640.0, 480.0);
        for corner in [
            OverlayCorner::TopLeft,
            OverlayCorner::TopRight,
            OverlayCorner::BottomLeft,
            OverlayCorner::BottomRight,
        ] {
            let overlay = host.overlay(128, corner);
            let (x, y) = overlay.center();
            let ndc = overlay.to_ndc(x, y);
            assert_eq!((ndc.x, ndc.y), (0.0, 0.0));
        }
    }

    #[test]
    fn test_click_on_centre_picks_front_indicator() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        let camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);

        assert!(gizmo.handle_click(&PointerEvent::new(736.0, 536.0), &HOST, &camera));
        match gizmo.state() {
            AnimationState::Animating(animation) => {
                assert_eq!(animation.direction, AxisDirection::PosZ)
            }
            AnimationState::Idle => panic!("click should start a turn"),
        }
    }

    #[test]
    fn test_turn_to_pos_x_scenario() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut camera = facing_z(5.0);

        gizmo.render(&camera, &mut renderer);
        assert_eq!(gizmo.indicator_opacity(AxisDirection::PosZ), Some(1.0));
        assert_eq!(gizmo.indicator_opacity(AxisDirection::NegZ), Some(0.5));

        assert!(gizmo.handle_click(&POS_X_CLICK, &HOST, &camera));
        let AnimationState::Animating(animation) = *gizmo.state() else {
            panic!("click should start a turn");
        };
        assert_eq!(animation.direction, AxisDirection::PosX);
        assert!(
            angle_between(
                animation.target_orientation,
                Quaternion::from_angle_y(Rad(FRAC_PI_2))
            ) < 1e-6
        );
        assert!((animation.target_position - Vector3::new(5.0, 0.0, 0.0)).magnitude() < 1e-5);

        for _ in 0..4 {
            gizmo.update(0.25, &mut camera);
        }

        assert_eq!(*gizmo.state(), AnimationState::Idle);
        assert!(angle_between(camera.orientation, animation.target_orientation) < 1e-6);
        assert!((camera.position - Vector3::new(5.0, 0.0, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_clicks_rejected_while_animating() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);
        assert!(gizmo.handle_click(&POS_X_CLICK, &HOST, &camera));

        gizmo.update(0.05, &mut camera);
        let before = *gizmo.state();

        for (x, y) in [(736.0, 536.0), (768.0, 536.0), (700.0, 500.0), (10.0, 10.0)] {
            assert!(!gizmo.handle_click(&PointerEvent::new(x, y), &HOST, &camera));
            assert_eq!(*gizmo.state(), before);
        }
        assert!(!gizmo.request_view(AxisDirection::NegY, &camera));
        assert_eq!(*gizmo.state(), before);
    }

    #[test]
    fn test_clicks_that_miss() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        let camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);

        // Outside the overlay
        assert!(!gizmo.handle_click(&PointerEvent::new(100.0, 100.0), &HOST, &camera));
        // Inside the overlay, on empty space near its corner
        assert!(!gizmo.handle_click(&PointerEvent::new(797.0, 475.0), &HOST, &camera));
        assert_eq!(*gizmo.state(), AnimationState::Idle);
    }

    #[test]
    fn test_every_direction_terminates() {
        let mut rng = rand::rng();

        for style in [IndicatorStyleKind::Arrows, IndicatorStyleKind::Circles] {
            for direction in AxisDirection::ALL {
                let (mut gizmo, _pool) = gizmo_with(style);
                let position = Vector3::new(
                    rng.random_range(-20.0..20.0),
                    rng.random_range(-20.0..20.0),
                    rng.random_range(-20.0..20.0),
                );
                let focus = Vector3::new(1.0, -2.0, 0.5);
                let mut camera = TestCamera::new(
                    position,
                    camera_look_at(position, focus, Vector3::unit_y()),
                );
                let radius = (position - focus).magnitude();

                gizmo
                    .prepare_animation(direction.tag(), focus, &camera)
                    .unwrap();
                let frames = run_to_idle(&mut gizmo, &mut camera, 1.0 / 60.0);

                assert!(!gizmo.is_animating(), "{direction} did not finish");
                assert!(frames <= 61, "{direction} took {frames} frames");
                assert!(angle_between(camera.orientation, direction.camera_orientation()) < 1e-6);
                let expected = focus + direction.unit() * radius;
                assert!((camera.position - expected).magnitude() < 1e-3 * radius.max(1.0));
            }
        }
    }

    #[test]
    fn test_update_is_noop_when_idle() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut camera = facing_z(5.0);
        let before = camera;
        gizmo.update(0.5, &mut camera);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_unknown_tag_is_swallowed() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let camera = facing_z(5.0);
        let result = gizmo.prepare_animation("posW", Vector3::new(0.0, 0.0, 0.0), &camera);
        assert_eq!(result, Err(GizmoError::UnknownDirection("posW".to_string())));
        assert_eq!(*gizmo.state(), AnimationState::Idle);
    }

    #[test]
    fn test_invalid_style_cannot_build() {
        let mut pool = RecordingPool::default();
        let result = OrientationGizmo::with_style_str(GizmoConfig::default(), "cubes", &mut pool);
        assert!(matches!(result, Err(GizmoError::InvalidStyle(tag)) if tag == "cubes"));
        assert!(pool.created.is_empty());

        let zero = GizmoConfig::default().with_overlay_extent(0);
        assert!(matches!(
            OrientationGizmo::new(zero, &mut pool),
            Err(GizmoError::InvalidOverlaySize(0))
        ));

        for rate in [0.0, -2.0, f32::NAN] {
            let stalled = GizmoConfig::default().with_turn_rate(rate);
            assert!(matches!(
                OrientationGizmo::new(stalled, &mut pool),
                Err(GizmoError::InvalidTurnRate(_))
            ));
        }
        assert!(pool.created.is_empty());
    }

    #[test]
    fn test_prepare_keeps_running_turn() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut camera = facing_z(5.0);
        assert!(gizmo.request_view(AxisDirection::PosX, &camera));
        gizmo.update(0.05, &mut camera);
        let before = *gizmo.state();

        let result = gizmo.prepare_animation("negY", Vector3::new(0.0, 0.0, 0.0), &camera);
        assert_eq!(result, Err(GizmoError::TurnInProgress));
        assert_eq!(*gizmo.state(), before);

        run_to_idle(&mut gizmo, &mut camera, 1.0 / 60.0);
        assert!((camera.position - Vector3::new(5.0, 0.0, 0.0)).magnitude() < 1e-3);
    }

    #[test]
    fn test_vertical_turns_end_on_axis() {
        for direction in [AxisDirection::PosY, AxisDirection::NegY] {
            for start in [Vector3::new(0.0, 0.0, 5.0), Vector3::new(3.0, 0.0, -4.0)] {
                let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
                let focus = Vector3::new(0.0, 0.0, 0.0);
                let mut camera =
                    TestCamera::new(start, camera_look_at(start, focus, Vector3::unit_y()));

                assert!(gizmo.request_view(direction, &camera));
                run_to_idle(&mut gizmo, &mut camera, 1.0 / 60.0);

                let expected = direction.unit() * 5.0;
                assert!(
                    (camera.position - expected).magnitude() < 1e-5 * 5.0,
                    "{direction} from {start:?} ended at {:?}",
                    camera.position
                );
            }
        }
    }

    #[test]
    fn test_cancel_keeps_camera_where_it_is() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);
        assert!(gizmo.handle_click(&POS_X_CLICK, &HOST, &camera));

        gizmo.update(0.05, &mut camera);
        let paused = camera;
        gizmo.cancel_animation();

        assert_eq!(*gizmo.state(), AnimationState::Idle);
        gizmo.update(0.05, &mut camera);
        assert_eq!(camera, paused);

        gizmo.render(&camera, &mut renderer);
        assert!(gizmo.request_view(AxisDirection::NegZ, &camera));
    }

    #[test]
    fn test_turn_keeps_focus_distance() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Circles);
        let focus = Vector3::new(10.0, 0.0, 0.0);
        let mut camera = TestCamera::new(Vector3::new(10.0, 0.0, 4.0), identity());
        gizmo.focus_center = focus;

        assert!(gizmo.request_view(AxisDirection::PosY, &camera));
        while gizmo.is_animating() {
            gizmo.update(0.02, &mut camera);
            assert!(((camera.position - focus).magnitude() - 4.0).abs() < 1e-3);
        }
        assert!((camera.position - Vector3::new(10.0, 4.0, 0.0)).magnitude() < 1e-3);
    }

    #[test]
    fn test_dispose_releases_each_handle_once() {
        for (style, expected) in [
            (IndicatorStyleKind::Arrows, 17),
            (IndicatorStyleKind::Circles, 13),
        ] {
            let (mut gizmo, mut pool) = gizmo_with(style);
            assert_eq!(pool.created.len(), expected);
            assert_eq!(pool.count_of(ResourceKind::LabelTexture), 6);

            gizmo.dispose(&mut pool);
            gizmo.dispose(&mut pool);

            assert!(gizmo.is_disposed());
            for handle in &pool.created {
                assert_eq!(pool.release_count(*handle), 1, "{handle:?}");
            }
            assert_eq!(pool.releases.len(), expected);
        }
    }

    #[test]
    fn test_disposed_gizmo_draws_nothing() {
        let (mut gizmo, mut pool) = gizmo_with(IndicatorStyleKind::Arrows);
        let mut renderer = RecordingRenderer::new(800, 600);
        gizmo.dispose(&mut pool);

        let camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);
        assert!(renderer.calls.is_empty());
        assert!(!gizmo.handle_click(&POS_X_CLICK, &HOST, &camera));
    }

    #[test]
    fn test_circle_style_shares_click_contract() {
        let (mut gizmo, _pool) = gizmo_with(IndicatorStyleKind::Circles);
        let mut renderer = RecordingRenderer::new(800, 600);
        let mut camera = facing_z(5.0);
        gizmo.render(&camera, &mut renderer);

        assert!(gizmo.handle_click(&POS_X_CLICK, &HOST, &camera));
        run_to_idle(&mut gizmo, &mut camera, 0.25);
        assert!(
            angle_between(camera.orientation, AxisDirection::PosX.camera_orientation()) < 1e-6
        );
    }
}
