//! Integration tests for the screen/plan mapping and zoom behaviour

use floor_placement::layout::ViewportConfig;
use floor_placement::{
    plan_to_screen, screen_to_plan, ContainerBounds, Delta, PlacementError, Point, Viewport,
    ZoomControl,
};

const EPS: f64 = 1e-7;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS * a.x.abs().max(1.0) && (a.y - b.y).abs() < EPS * a.y.abs().max(1.0)
}

#[test]
fn test_round_trip_across_scales_and_translations() {
    let container = ContainerBounds::new(37.0, 112.0, 960.0, 540.0);
    let scales = [0.1, 0.25, 0.5, 1.0, 1.7, 3.3, 5.0];
    let translations = [
        Delta::new(0.0, 0.0),
        Delta::new(-250.0, 80.0),
        Delta::new(1234.5, -987.25),
    ];
    let pointers = [
        Point::new(37.0, 112.0),
        Point::new(500.0, 400.0),
        Point::new(-20.0, 2000.0),
    ];

    for &scale in &scales {
        for &translation in &translations {
            let mut viewport = Viewport::default();
            viewport.set_scale(scale);
            viewport.set_translation(translation);

            for &pointer in &pointers {
                let plan = screen_to_plan(pointer, &viewport, &container).unwrap();
                let back = plan_to_screen(plan, &viewport, &container).unwrap();
                assert!(
                    close(back, pointer),
                    "scale {} translation {:?}: {:?} -> {:?} -> {:?}",
                    scale,
                    translation,
                    pointer,
                    plan,
                    back
                );
            }
        }
    }
}

#[test]
fn test_identity_maps_container_to_percentages() {
    let container = ContainerBounds::new(100.0, 50.0, 800.0, 400.0);
    let viewport = Viewport::default();

    let top_left = screen_to_plan(Point::new(100.0, 50.0), &viewport, &container).unwrap();
    let centre = screen_to_plan(Point::new(500.0, 250.0), &viewport, &container).unwrap();
    let bottom_right = screen_to_plan(Point::new(900.0, 450.0), &viewport, &container).unwrap();

    assert_eq!(top_left, Point::new(0.0, 0.0));
    assert_eq!(centre, Point::new(50.0, 50.0));
    assert_eq!(bottom_right, Point::new(100.0, 100.0));
}

#[test]
fn test_degenerate_container_rejected() {
    let viewport = Viewport::default();
    for container in [
        ContainerBounds::sized(0.0, 400.0),
        ContainerBounds::sized(800.0, -1.0),
        ContainerBounds::sized(f64::NAN, 400.0),
    ] {
        assert_eq!(
            screen_to_plan(Point::new(1.0, 1.0), &viewport, &container),
            Err(PlacementError::InvalidContainer)
        );
    }
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let container = ContainerBounds::new(20.0, 30.0, 1000.0, 600.0);
    let mut viewport = Viewport::default();
    let pointer = Point::new(420.0, 210.0);
    let under_cursor = screen_to_plan(pointer, &viewport, &container).unwrap();

    for delta_y in [-100.0, -100.0, -100.0, 100.0, -100.0] {
        viewport.wheel(pointer, &container, delta_y);
        let now = screen_to_plan(pointer, &viewport, &container).unwrap();
        assert!(close(now, under_cursor), "{:?} != {:?}", now, under_cursor);
    }
}

#[test]
fn test_zoom_is_clamped_and_anchor_still_holds() {
    let container = ContainerBounds::sized(1000.0, 1000.0);
    let mut viewport = Viewport::default();
    let pointer = Point::new(730.0, 120.0);
    let under_cursor = screen_to_plan(pointer, &viewport, &container).unwrap();

    for _ in 0..100 {
        viewport.wheel(pointer, &container, -1.0);
    }
    assert_eq!(viewport.scale(), 5.0);
    let now = screen_to_plan(pointer, &viewport, &container).unwrap();
    assert!(close(now, under_cursor));

    for _ in 0..200 {
        viewport.wheel(pointer, &container, 1.0);
    }
    assert_eq!(viewport.scale(), 0.1);
    let now = screen_to_plan(pointer, &viewport, &container).unwrap();
    assert!(close(now, under_cursor));
}

#[test]
fn test_zoom_buttons_and_reset() {
    let container = ContainerBounds::sized(800.0, 600.0);
    let mut viewport = Viewport::default();
    let centre_plan = screen_to_plan(container.center(), &viewport, &container).unwrap();

    viewport.zoom_control(ZoomControl::In, &container);
    assert!((viewport.scale() - 1.2).abs() < EPS);
    let now = screen_to_plan(container.center(), &viewport, &container).unwrap();
    assert!(close(now, centre_plan));

    viewport.zoom_control(ZoomControl::Out, &container);
    viewport.zoom_control(ZoomControl::Out, &container);
    assert!((viewport.scale() - 1.0 / 1.2).abs() < EPS);

    viewport.pan_by(Delta::new(40.0, -15.0));
    viewport.zoom_control(ZoomControl::Reset, &container);
    assert_eq!(viewport.scale(), 1.0);
    assert_eq!(viewport.translation(), Delta::default());
}

#[test]
fn test_custom_scale_bounds() {
    let config = ViewportConfig {
        min_scale: 0.5,
        max_scale: 2.0,
        ..ViewportConfig::default()
    };
    let mut viewport = Viewport::new(config);
    viewport.set_scale(10.0);
    assert_eq!(viewport.scale(), 2.0);
    viewport.set_scale(0.01);
    assert_eq!(viewport.scale(), 0.5);
}
