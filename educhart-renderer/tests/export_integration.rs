//! Integration tests for chart export (educhart-renderer).
//!
//! Renders sessions end to end, writes PNG files and decodes them back to
//! check size, background and file naming.

use std::time::{Duration, UNIX_EPOCH};

use educhart_core::{ChartSession, ChartType, RowEdit, SettingsPatch, Swatch};
use educhart_renderer::{render_session, ChartExporter, Role};

#[test]
fn test_export_default_session_to_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = ChartSession::new();
    let drawing = render_session(&session);

    let exporter = ChartExporter::with_defaults();
    let now = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
    let path = exporter
        .export_to_dir(&drawing, dir.path(), now)
        .expect("export");

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("EduChart-1700000000000.png")
    );

    let image = image::open(&path).expect("decode png").to_rgba8();
    assert_eq!(image.dimensions(), (4800, 3000));

    let corner = image.get_pixel(0, 0);
    assert_eq!(corner.0, [255, 255, 255, 255]);
    assert!(image.pixels().all(|p| p.0[3] == 255), "background must be opaque");
}

#[test]
fn test_export_into_missing_dir_fails_without_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");
    let drawing = render_session(&ChartSession::new());

    let exporter = ChartExporter::with_defaults();
    let result = exporter.export_to_dir(&drawing, &missing, UNIX_EPOCH);
    assert!(result.is_err());
    assert!(!missing.exists());
}

#[test]
fn test_bar_pixels_use_series_color() {
    let mut session = ChartSession::new();
    session.update_settings(SettingsPatch::chart_type(ChartType::Single));
    session.update_settings(SettingsPatch::color(0, Swatch::Emerald));
    let drawing = render_session(&session);

    let bar = drawing.bars(0).next().expect("bar").clone();
    let scale = 0.5_f32;
    let exporter = ChartExporter::with_defaults();
    let pixmap = exporter.rasterize(&drawing, scale).expect("rasterize");

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (x, y) = (
        ((bar.x + bar.width / 2.0) * f64::from(scale)) as u32,
        ((bar.y + bar.height / 2.0) * f64::from(scale)) as u32,
    );
    let pixel = pixmap.pixel(x, y).expect("pixel in bounds");
    assert_eq!(
        [pixel.red(), pixel.green(), pixel.blue()],
        Swatch::Emerald.rgb()
    );
}

#[test]
fn test_degenerate_session_still_exports() {
    let mut session = ChartSession::new();
    while session.can_remove_row() {
        session.remove_row(0).expect("remove");
    }
    session
        .update_row(0, RowEdit::Label(String::new()))
        .expect("label");
    session.update_row(0, RowEdit::Value1(None)).expect("value");

    let drawing = render_session(&session);
    assert_eq!(drawing.with_role(Role::Bar).count(), 0);
    assert_eq!(drawing.with_role(Role::Axis).count(), 2);

    let exporter = ChartExporter::with_defaults();
    let png = exporter.render_to_png(&drawing).expect("png");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
}

#[test]
fn test_chart_text_is_rasterized() {
    let exporter = ChartExporter::with_defaults();
    assert!(
        exporter.font_family().is_some(),
        "no system font faces available to render chart text"
    );

    let drawing = render_session(&ChartSession::new());
    let pixmap = exporter.rasterize(&drawing, 0.5).expect("rasterize");

    // Title band: centered at x 1200, baseline y 96 on the logical canvas.
    let mut dark = 0;
    for y in 10..60 {
        for x in 300..900 {
            let pixel = pixmap.pixel(x, y).expect("pixel in bounds");
            if pixel.red() < 160 && pixel.green() < 160 && pixel.blue() < 160 {
                dark += 1;
            }
        }
    }
    assert!(dark > 100, "title rendered {dark} dark pixels");
}

