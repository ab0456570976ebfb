use eframe_raster_paint::{Canvas, CanvasConfig, CanvasError, Tool};
use egui::{Color32, Pos2};

fn create_test_canvas() -> Canvas {
    Canvas::with_config(CanvasConfig {
        default_width: 32,
        default_height: 24,
        ..CanvasConfig::default()
    })
}

fn paint_red_line(canvas: &mut Canvas) {
    canvas.set_pen_color(Color32::RED);
    canvas.pointer_down(Pos2::new(4.0, 6.0));
    canvas.pointer_move(Pos2::new(20.0, 6.0));
    canvas.pointer_up(Pos2::new(20.0, 6.0));
}

#[test]
fn test_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.png");

    let mut canvas = create_test_canvas();
    paint_red_line(&mut canvas);
    let written = canvas.save_image(&path).unwrap();
    assert_eq!(written, path);

    let mut reopened = create_test_canvas();
    reopened.resize_canvas(100, 100);
    reopened.load_image(&path).unwrap();

    assert_eq!((reopened.width(), reopened.height()), (32, 24));
    assert_eq!(reopened.image(), canvas.image());
    assert_eq!(reopened.history().len(), 1);
    assert!(!reopened.can_undo());
}

#[test]
fn test_unknown_extension_is_saved_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = create_test_canvas();

    let written = canvas.save_image(dir.path().join("sketch")).unwrap();
    assert_eq!(written, dir.path().join("sketch.png"));
    assert!(written.exists());
    assert_eq!(image::ImageFormat::from_path(&written).unwrap(), image::ImageFormat::Png);

    let written = canvas.save_image(dir.path().join("notes.txt")).unwrap();
    assert_eq!(written, dir.path().join("notes.txt.png"));
}

#[test]
fn test_jpeg_and_bmp_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = create_test_canvas();
    paint_red_line(&mut canvas);

    for name in ["drawing.jpg", "drawing.jpeg", "drawing.bmp"] {
        let written = canvas.save_image(dir.path().join(name)).unwrap();
        let mut reopened = create_test_canvas();
        reopened.load_image(&written).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (32, 24), "{name}");
    }
}

#[test]
fn test_failed_load_leaves_the_canvas_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let mut canvas = create_test_canvas();
    paint_red_line(&mut canvas);
    canvas.set_tool(Tool::Select);
    canvas.pointer_down(Pos2::new(2.0, 2.0));
    canvas.pointer_move(Pos2::new(10.0, 10.0));
    canvas.pointer_up(Pos2::new(10.0, 10.0));

    let before = canvas.image().clone();
    let history_len = canvas.history().len();

    let err = canvas.load_image(&path).unwrap_err();
    assert!(matches!(err, CanvasError::Decode { ref path, .. } if path.ends_with("broken.png")));

    assert_eq!(canvas.image(), &before);
    assert!(canvas.selection().is_some());
    assert_eq!(canvas.history().len(), history_len);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = create_test_canvas();

    let result = canvas.load_image(dir.path().join("nowhere.png"));
    assert!(result.is_err());
    assert_eq!((canvas.width(), canvas.height()), (32, 24));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = create_test_canvas();

    let err = canvas.save_image(dir.path().join("missing").join("out.png")).unwrap_err();
    assert!(matches!(err, CanvasError::Encode { .. }));
    assert!(err.to_string().contains("out.png"));
}
