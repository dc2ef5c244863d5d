use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use clockface::{
    compute_angles, Clock, ClockConfig, ClockError, ClockFaceRenderer, Color, ColorScheme,
    DrawCommand, FaceConfig, GeometryFrame, Scene, StyleFlags,
};

const SIZE: usize = 100;

fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
    let idx = (y * SIZE + x) * 4;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

#[test]
fn three_oclock_frame() {
    let clock = Clock::new(ClockConfig::builder().build()).expect("no resources to load");
    let mut frame = vec![0u8; SIZE * SIZE * 4];
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
    clock.render_frame(&mut frame, SIZE, SIZE, now);

    // outside the dial the window background shows
    assert_eq!(pixel(&frame, 0, 0), [0, 0, 0, 0xff]);
    // dial fill
    assert_eq!(pixel(&frame, 20, 75), [0x55, 0x55, 0x55, 0xff]);
    // hour hand accent pointing at 3
    assert_eq!(pixel(&frame, 65, 49), [0xff, 0xff, 0xff, 0xff]);
    // pivot hole is see-through
    assert_eq!(pixel(&frame, 49, 49)[3], 0);
}

#[test]
fn zero_sized_frame_is_a_no_op() {
    let clock = Clock::new(ClockConfig::builder().build()).expect("no resources to load");
    let mut frame = Vec::new();
    clock.render_frame(&mut frame, 0, 0, Utc::now());
    assert!(frame.is_empty());
}

#[test]
fn garbage_font_is_rejected() {
    let config = ClockConfig::builder().font_data(vec![0, 1, 2, 3]).build();
    assert!(matches!(Clock::new(config), Err(ClockError::Font(_))));
}

#[test]
fn missing_asset_directory_is_an_error() {
    let config = ClockConfig::builder()
        .asset_dir("/nonexistent/clockface-assets".into())
        .build();
    assert!(Clock::new(config).is_err());
}

#[test]
fn angles_follow_the_zone() {
    let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
    // 2021-01-01T00:30:15Z is 09:30:15 in Tokyo
    let angles = compute_angles(1_609_461_015, 0, &tokyo);
    assert!((angles.hour - 285.125).abs() < 1e-9);
    assert!((angles.minute - 181.5).abs() < 1e-9);
    assert!((angles.second - 90.0).abs() < 1e-9);
}

#[test]
fn bare_face_draws_hands_and_pivot_only() {
    let config = FaceConfig::default();
    let colors = ColorScheme {
        background: Color::TRANSPARENT,
        ..ColorScheme::light()
    };
    let mut scene = Scene::new();
    ClockFaceRenderer::new(&config).render(
        &mut scene,
        GeometryFrame::new(200.0, 200.0),
        compute_angles(0, 0, &Utc),
        StyleFlags::NONE,
        &colors,
        Some("UTC"),
    );
    let kinds: Vec<&str> = scene
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::Hand { .. } => "hand",
            DrawCommand::StrokeRing { .. } => "ring",
            DrawCommand::ClearCircle { .. } => "clear",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["hand", "hand", "hand", "ring", "clear"]);
}
