#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn mounted_engine() -> BoardEngine {
    let mut engine = BoardEngine::new();
    engine.set_viewport(Viewport { origin: Point::new(0.0, 0.0), width: 800.0, height: 600.0 });
    engine
}

fn image(name: &str) -> ImagePayload {
    ImagePayload { name: name.into(), src: format!("data:image/png;base64,{name}") }
}

// --- Coordinate conversions ---

#[test]
fn to_board_coords_degrades_to_origin_when_unmounted() {
    let engine = BoardEngine::new();
    let pos = engine.to_board_coords(Point::new(123.0, 456.0));
    assert_eq!(pos, Point::new(0.0, 0.0));
}

#[test]
fn to_board_coords_uses_viewport_origin() {
    let mut engine = BoardEngine::new();
    engine.set_viewport(Viewport { origin: Point::new(100.0, 50.0), width: 800.0, height: 600.0 });
    let pos = engine.to_board_coords(Point::new(150.0, 80.0));
    assert_eq!(pos, Point::new(50.0, 30.0));
}

#[test]
fn clear_viewport_restores_degraded_conversions() {
    let mut engine = mounted_engine();
    engine.clear_viewport();
    assert_eq!(engine.to_board_coords(Point::new(10.0, 10.0)), Point::new(0.0, 0.0));
}

#[test]
fn center_board_pos_is_viewport_center() {
    let engine = mounted_engine();
    let center = engine.center_board_pos();
    assert!(approx_eq(center.x, 400.0));
    assert!(approx_eq(center.y, 300.0));
}

#[test]
fn center_board_pos_without_viewport_uses_pan_only() {
    let mut engine = BoardEngine::new();
    // Pan away from the origin via a gesture so the fallback has something
    // to compensate for.
    engine.pointer_down(Point::new(0.0, 0.0), PointerTarget::Board);
    engine.pointer_move(Point::new(30.0, -40.0), RenderedTransform::default());
    engine.pointer_up();
    engine.clear_viewport();

    let center = engine.center_board_pos();
    assert!(approx_eq(center.x, -30.0));
    assert!(approx_eq(center.y, 40.0));
}

// --- Pan gesture ---

#[test]
fn pan_gesture_follows_pointer() {
    let mut engine = mounted_engine();
    engine.pointer_down(Point::new(100.0, 100.0), PointerTarget::Board);
    let action = engine.pointer_move(Point::new(130.0, 90.0), RenderedTransform::default());
    assert_eq!(action, Action::Panned);

    let t = engine.transform();
    assert!(approx_eq(t.pan_x, 30.0));
    assert!(approx_eq(t.pan_y, -10.0));
}

#[test]
fn pan_gesture_has_no_jump_with_existing_pan() {
    let mut engine = mounted_engine();
    engine.pointer_down(Point::new(0.0, 0.0), PointerTarget::Board);
    engine.pointer_move(Point::new(50.0, 50.0), RenderedTransform::default());
    engine.pointer_up();

    // Second pan starts from pan (50, 50); a down+move of zero distance must
    // not move the board.
    engine.pointer_down(Point::new(200.0, 200.0), PointerTarget::Board);
    engine.pointer_move(Point::new(200.0, 200.0), RenderedTransform::default());
    let t = engine.transform();
    assert!(approx_eq(t.pan_x, 50.0));
    assert!(approx_eq(t.pan_y, 50.0));
}

#[test]
fn move_without_gesture_is_noop() {
    let mut engine = mounted_engine();
    let action = engine.pointer_move(Point::new(10.0, 10.0), RenderedTransform::default());
    assert_eq!(action, Action::None);
    assert!(approx_eq(engine.transform().pan_x, 0.0));
}

#[test]
fn pointer_up_ends_pan() {
    let mut engine = mounted_engine();
    engine.pointer_down(Point::new(0.0, 0.0), PointerTarget::Board);
    engine.pointer_up();
    let action = engine.pointer_move(Point::new(99.0, 99.0), RenderedTransform::default());
    assert_eq!(action, Action::None);
}

#[test]
fn pointer_leave_ends_pan() {
    let mut engine = mounted_engine();
    engine.pointer_down(Point::new(0.0, 0.0), PointerTarget::Board);
    engine.pointer_leave();
    assert!(!engine.gesture().is_active());
}

// --- Item drag ---

#[test]
fn item_drag_moves_item_with_rendered_transform() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");

    engine.pointer_down(
        Point::new(100.0, 100.0),
        PointerTarget::Item { id, grab_offset: Point::new(10.0, 10.0) },
    );
    let rendered = RenderedTransform { scale: 2.0, translate_x: 20.0, translate_y: 20.0 };
    let action = engine.pointer_move(Point::new(100.0, 100.0), rendered);

    // (100 - 0 - 20) / 2 - 10 / 2 = 35
    assert_eq!(action, Action::ItemMoved { id, x: 35.0, y: 35.0 });
    let item = engine.item(&id).expect("item present");
    assert!(approx_eq(item.x, 35.0));
    assert!(approx_eq(item.y, 35.0));
}

#[test]
fn item_drag_never_pans() {
    // Drag exclusivity: a press on an item intercepts the gesture, so the
    // same down+move sequence must leave the pan untouched.
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");

    engine.pointer_down(
        Point::new(100.0, 100.0),
        PointerTarget::Item { id, grab_offset: Point::new(0.0, 0.0) },
    );
    engine.pointer_move(Point::new(300.0, 300.0), RenderedTransform::default());

    let t = engine.transform();
    assert!(approx_eq(t.pan_x, 0.0));
    assert!(approx_eq(t.pan_y, 0.0));
}

#[test]
fn second_pointer_down_is_ignored_while_dragging() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");

    engine.pointer_down(
        Point::new(0.0, 0.0),
        PointerTarget::Item { id, grab_offset: Point::new(0.0, 0.0) },
    );
    engine.pointer_down(Point::new(50.0, 50.0), PointerTarget::Board);

    // Still the item drag, not a pan.
    let action = engine.pointer_move(Point::new(60.0, 60.0), RenderedTransform::default());
    assert!(matches!(action, Action::ItemMoved { .. }));
}

#[test]
fn dragging_removed_item_is_noop() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");
    engine.pointer_down(
        Point::new(0.0, 0.0),
        PointerTarget::Item { id, grab_offset: Point::new(0.0, 0.0) },
    );
    engine.remove_item(&id);

    let action = engine.pointer_move(Point::new(10.0, 10.0), RenderedTransform::default());
    assert_eq!(action, Action::None);
}

#[test]
fn window_level_pointer_up_ends_item_drag() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(5.0, 5.0))).expect("valid url");
    engine.pointer_down(
        Point::new(0.0, 0.0),
        PointerTarget::Item { id, grab_offset: Point::new(0.0, 0.0) },
    );
    engine.pointer_up();

    let action = engine.pointer_move(Point::new(10.0, 10.0), RenderedTransform::default());
    assert_eq!(action, Action::None);
    let item = engine.item(&id).expect("item present");
    assert!(approx_eq(item.x, 5.0));
}

// --- Zoom ---

#[test]
fn wheel_without_viewport_is_noop() {
    let mut engine = BoardEngine::new();
    let action = engine.wheel(Point::new(100.0, 100.0), -1.0);
    assert_eq!(action, Action::None);
    assert!(approx_eq(engine.transform().scale, 1.0));
}

#[test]
fn wheel_zooms_about_cursor() {
    let mut engine = BoardEngine::new();
    engine.set_viewport(Viewport { origin: Point::new(40.0, 60.0), width: 800.0, height: 600.0 });
    let pointer = Point::new(340.0, 260.0);
    let board_before = engine.to_board_coords(pointer);

    let action = engine.wheel(pointer, -1.0);
    assert_eq!(action, Action::Zoomed);

    let screen_after = engine.to_screen_coords(board_before);
    assert!(approx_eq(screen_after.x, pointer.x));
    assert!(approx_eq(screen_after.y, pointer.y));
}

#[test]
fn repeated_wheel_respects_scale_bounds() {
    let mut engine = mounted_engine();
    for _ in 0..100 {
        engine.wheel(Point::new(400.0, 300.0), 1.0);
    }
    assert!(approx_eq(engine.transform().scale, crate::consts::MIN_SCALE));

    for _ in 0..100 {
        engine.wheel(Point::new(400.0, 300.0), -1.0);
    }
    assert!(approx_eq(engine.transform().scale, crate::consts::MAX_SCALE));
}

// --- Link and image creation ---

#[test]
fn add_link_rejects_invalid_url() {
    let mut engine = mounted_engine();
    assert!(engine.add_link("not a url", None).is_none());
    assert!(engine.add_link("", None).is_none());
    assert!(engine.items().next().is_none());
}

#[test]
fn add_link_inserts_optimistic_placeholder() {
    let mut engine = mounted_engine();
    let id = engine
        .add_link("https://example.com/page", Some(Point::new(7.0, 8.0)))
        .expect("valid url");

    let item = engine.item(&id).expect("item present");
    assert_eq!(item.title, "example.com");
    assert_eq!(item.description, "https://example.com/page");
    assert_eq!(
        item.favicon.as_deref(),
        Some("https://www.google.com/s2/favicons?domain=example.com&sz=64")
    );
    assert!(item.image.is_none());
    assert!(!item.is_image_only);
    assert!(approx_eq(item.x, 7.0));
    assert!(approx_eq(item.y, 8.0));
}

#[test]
fn add_link_trims_whitespace() {
    let mut engine = mounted_engine();
    let id = engine.add_link("  https://example.com/  ", Some(Point::new(0.0, 0.0))).expect("valid url");
    assert_eq!(engine.item(&id).map(|i| i.url.as_str()), Some("https://example.com/"));
}

#[test]
fn add_link_ids_are_unique() {
    let mut engine = mounted_engine();
    let a = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");
    let b = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");
    assert_ne!(a, b);
}

#[test]
fn add_link_without_position_spawns_in_region() {
    // Identity transform and origin-anchored viewport: board coords equal
    // screen coords, so the spawn must land inside the spawn region.
    let mut engine = mounted_engine();
    for _ in 0..20 {
        let id = engine.add_link("https://example.com/", None).expect("valid url");
        let item = engine.item(&id).expect("item present");
        assert!(item.x >= crate::consts::SPAWN_MIN_X && item.x < crate::consts::SPAWN_MAX_X);
        assert!(item.y >= crate::consts::SPAWN_MIN_Y && item.y < crate::consts::SPAWN_MAX_Y);
    }
}

#[test]
fn add_image_is_image_only() {
    let mut engine = mounted_engine();
    let id = engine.add_image("data:image/png;base64,abc", "photo.png", Some(Point::new(1.0, 2.0)));
    let item = engine.item(&id).expect("item present");
    assert!(item.is_image_only);
    assert_eq!(item.title, "photo.png");
    assert_eq!(item.image.as_deref(), Some("data:image/png;base64,abc"));
    assert!(item.favicon.is_none());
    assert_eq!(item.description, "");
}

// --- Drop / paste contract ---

#[test]
fn multi_file_drop_staggers_items() {
    let mut engine = mounted_engine();
    let payload = Payload { images: vec![image("a"), image("b"), image("c")], text: None };
    let created = engine.handle_drop(payload, Point::new(100.0, 100.0));
    assert_eq!(created.len(), 3);

    let positions: Vec<(f64, f64)> =
        created.iter().map(|id| engine.item(id).map(|i| (i.x, i.y)).expect("item present")).collect();
    assert_eq!(positions, vec![(100.0, 100.0), (120.0, 120.0), (140.0, 140.0)]);
}

#[test]
fn drop_places_link_at_drop_point() {
    let mut engine = mounted_engine();
    engine.wheel(Point::new(0.0, 0.0), 1.0); // scale 0.9, pan unchanged at cursor origin
    let payload = Payload { images: Vec::new(), text: Some("https://example.com/".into()) };
    let created = engine.handle_drop(payload, Point::new(90.0, 90.0));
    assert_eq!(created.len(), 1);

    let expected = engine.to_board_coords(Point::new(90.0, 90.0));
    let item = engine.item(&created[0]).expect("item present");
    assert!(approx_eq(item.x, expected.x));
    assert!(approx_eq(item.y, expected.y));
}

#[test]
fn drop_ignores_non_url_text() {
    let mut engine = mounted_engine();
    let payload = Payload { images: Vec::new(), text: Some("just some words".into()) };
    let created = engine.handle_drop(payload, Point::new(0.0, 0.0));
    assert!(created.is_empty());
}

#[test]
fn drop_accepts_url_with_surrounding_whitespace() {
    let mut engine = mounted_engine();
    let payload = Payload { images: Vec::new(), text: Some("\nhttps://example.com/\n".into()) };
    let created = engine.handle_drop(payload, Point::new(0.0, 0.0));
    assert_eq!(created.len(), 1);
}

#[test]
fn paste_lands_at_board_center() {
    let mut engine = mounted_engine();
    let payload = Payload { images: vec![image("a")], text: Some("https://example.com/".into()) };
    let created = engine.handle_paste(payload);
    assert_eq!(created.len(), 2);

    let center = engine.center_board_pos();
    for id in &created {
        let item = engine.item(id).expect("item present");
        assert!(approx_eq(item.x, center.x));
        assert!(approx_eq(item.y, center.y));
    }
}

// --- Metadata patching ---

#[test]
fn apply_metadata_upgrades_placeholder() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");

    let patch = MetadataPatch {
        title: Some("Example Domain".into()),
        image: Some("https://example.com/og.png".into()),
        ..Default::default()
    };
    assert!(engine.apply_metadata(&id, &patch));
    let item = engine.item(&id).expect("item present");
    assert_eq!(item.title, "Example Domain");
    assert_eq!(item.image.as_deref(), Some("https://example.com/og.png"));
}

#[test]
fn late_metadata_after_removal_is_discarded() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");
    assert!(engine.remove_item(&id));

    let patch = MetadataPatch { title: Some("late".into()), ..Default::default() };
    assert!(!engine.apply_metadata(&id, &patch));
    assert!(engine.items().next().is_none());
}

#[test]
fn remove_item_twice_is_false() {
    let mut engine = mounted_engine();
    let id = engine.add_link("https://example.com/", Some(Point::new(0.0, 0.0))).expect("valid url");
    assert!(engine.remove_item(&id));
    assert!(!engine.remove_item(&id));
}

// --- fallback_favicon_url ---

#[test]
fn fallback_favicon_url_is_deterministic_template() {
    assert_eq!(
        fallback_favicon_url("example.com"),
        "https://www.google.com/s2/favicons?domain=example.com&sz=64"
    );
}
