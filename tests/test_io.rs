mod common;

use common::*;
use redball::presenter::{render_overlay, status_line};
use redball::{ConsolePresenter, ImageSequenceSource};
use std::path::PathBuf;

#[test]
fn status_text_matches_each_outcome() {
    assert_eq!(
        status_line(&Detection::Valid { center: (300.7, 199.2), radius: 40.9 }),
        "Ball @ (300, 199), r=40"
    );
    assert_eq!(status_line(&Detection::Noise { radius: 12.6 }), "Noise detected (r=12)");
    assert_eq!(status_line(&Detection::NoRegion), "No red region found");
}

#[test]
fn overlay_marks_center_and_outline() {
    let frame = solid_frame(100, 100, BLUE);
    let detection = Detection::Valid { center: (50.0, 50.0), radius: 20.0 };

    let overlay = render_overlay(&frame, &detection);

    assert_eq!(*overlay.get_pixel(50, 50), RED);
    assert_eq!(overlay.get_pixel(70, 50).0, [0, 255, 0]);
    assert_eq!(*overlay.get_pixel(5, 5), BLUE);
}

#[test]
fn overlay_leaves_frame_untouched_without_ball() {
    let frame = solid_frame(40, 30, BLUE);
    assert_eq!(render_overlay(&frame, &Detection::NoRegion), frame);
    assert_eq!(render_overlay(&frame, &Detection::Noise { radius: 5.0 }), frame);
}

#[test]
fn console_presenter_prints_lines_and_stops_on_request() -> anyhow::Result<()> {
    let frame = solid_frame(10, 10, BLUE);
    let mut presenter = ConsolePresenter::new(Vec::new())
        .with_line_mode(true)
        .with_stop_after(Some(2));

    assert_eq!(presenter.present(&frame, &Detection::NoRegion)?, PresenterControl::Continue);
    assert_eq!(
        presenter.present(&frame, &Detection::Noise { radius: 3.0 })?,
        PresenterControl::Stop
    );
    assert_eq!(presenter.presented(), 2);

    let out = String::from_utf8(presenter.into_inner())?;
    assert_eq!(out, "No red region found\nNoise detected (r=3)\n");
    Ok(())
}

#[test]
fn console_presenter_rewrites_status_in_place_by_default() -> anyhow::Result<()> {
    let frame = solid_frame(10, 10, BLUE);
    let mut presenter = ConsolePresenter::new(Vec::new());

    presenter.present(&frame, &Detection::NoRegion)?;

    let out = String::from_utf8(presenter.into_inner())?;
    assert!(out.starts_with("No red region found"));
    assert!(out.ends_with('\r'));
    assert!(!out.contains('\n'));
    Ok(())
}

#[test]
fn console_presenter_saves_overlays() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let overlay_dir = dir.path().join("overlays");
    let frame = red_disks_on_blue(&[((300, 200), 40)]);
    let mut presenter = ConsolePresenter::new(Vec::new()).with_overlay_dir(Some(overlay_dir.clone()))?;

    presenter.present(&frame, &Detection::Valid { center: (300.0, 200.0), radius: 40.0 })?;
    presenter.present(&frame, &Detection::NoRegion)?;

    assert!(overlay_dir.join("000000.png").exists());
    assert!(overlay_dir.join("000001.png").exists());
    Ok(())
}

fn write_frames(dir: &std::path::Path, frames: &[(&str, Frame)]) -> anyhow::Result<()> {
    for (name, frame) in frames {
        frame.save(dir.join(name))?;
    }
    Ok(())
}

#[test]
fn directory_source_reads_frames_in_name_order() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    write_frames(
        dir.path(),
        &[
            ("frame_002.png", solid_frame(64, 48, BLUE)),
            ("frame_001.png", red_disks_on_blue(&[((300, 200), 40)])),
        ],
    )?;
    std::fs::write(dir.path().join("notes.txt"), "not a frame")?;

    let mut source = ImageSequenceSource::open(&[dir.path().to_path_buf()])?;
    assert_eq!(source.len(), 2);

    let first = source.next_frame()?.expect("first frame");
    assert_eq!(first.dimensions(), (640, 480));
    assert!(source.next_frame().is_err(), "second frame has a different size");
    Ok(())
}

#[test]
fn source_ends_after_last_frame() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("only.png");
    solid_frame(8, 8, BLUE).save(&path)?;

    let mut source = ImageSequenceSource::open(&[path])?;

    assert!(source.next_frame()?.is_some());
    assert!(source.next_frame()?.is_none());
    assert!(source.next_frame()?.is_none());
    Ok(())
}

#[test]
fn max_frames_limits_the_source() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    write_frames(
        dir.path(),
        &[
            ("a.png", solid_frame(8, 8, BLUE)),
            ("b.png", solid_frame(8, 8, BLUE)),
            ("c.png", solid_frame(8, 8, BLUE)),
        ],
    )?;

    let mut source = ImageSequenceSource::open(&[dir.path().to_path_buf()])?.with_max_frames(Some(2));

    assert!(source.next_frame()?.is_some());
    assert!(source.next_frame()?.is_some());
    assert!(source.next_frame()?.is_none());
    Ok(())
}

#[test]
fn unavailable_source_is_reported_up_front() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;

    assert!(ImageSequenceSource::open(&[dir.path().to_path_buf()]).is_err());
    assert!(ImageSequenceSource::open(&[PathBuf::from("/definitely/not/here.png")]).is_err());
    Ok(())
}

#[test]
fn undecodable_first_frame_is_reported_up_front() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png")?;

    assert!(ImageSequenceSource::open(&[path]).is_err());
    assert!(ImageSequenceSource::open(&[dir.path().to_path_buf()]).is_err());
    Ok(())
}

#[test]
fn first_frame_is_decoded_once_and_handed_out_first() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    write_frames(
        dir.path(),
        &[
            ("0.png", red_disks_on_blue(&[((300, 200), 40)])),
            ("1.png", solid_frame(640, 480, BLUE)),
        ],
    )?;

    let mut source = ImageSequenceSource::open(&[dir.path().to_path_buf()])?;
    assert_eq!(source.len(), 2);

    let first = source.next_frame()?.expect("first frame");
    assert_eq!(*first.get_pixel(300, 200), RED);
    assert_eq!(source.len(), 1);
    let second = source.next_frame()?.expect("second frame");
    assert_eq!(*second.get_pixel(300, 200), BLUE);
    assert!(source.is_empty());
    Ok(())
}

#[test]
fn default_config_is_valid_red_setup() {
    let config = DetectorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.bands.len(), 2);
    assert_eq!(config.kernel_size, 5);
    assert_eq!(config.min_radius, 20.0);
}

#[test]
fn invalid_configs_are_rejected() {
    let base = DetectorConfig::default();
    assert!(base.clone().with_bands(Vec::new()).validate().is_err());
    assert!(base.clone().with_kernel_size(4).validate().is_err());
    assert!(base.clone().with_kernel_size(0).validate().is_err());
    assert!(base.clone().with_min_radius(-1.0).validate().is_err());
    assert!(base.clone().with_min_radius(f32::NAN).validate().is_err());
    assert!(
        base.clone()
            .with_bands(vec![HsvBand::new((20, 10), (0, 255), (0, 255))])
            .validate()
            .is_err()
    );
    assert!(
        base.with_bands(vec![HsvBand::new((170, 200), (0, 255), (0, 255))])
            .validate()
            .is_err()
    );
    assert!(DetectionPipeline::new(DetectorConfig::default().with_kernel_size(6)).is_err());
}

#[test]
fn json_config_overrides_only_given_fields() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("detector.json");
    std::fs::write(&path, r#"{ "min_radius": 12.5, "kernel_size": 7 }"#)?;

    let config = DetectorConfig::from_json_file(&path)?;

    assert_eq!(config.min_radius, 12.5);
    assert_eq!(config.kernel_size, 7);
    assert_eq!(config.bands, DetectorConfig::default().bands);
    Ok(())
}

#[test]
fn malformed_json_config_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("detector.json");
    std::fs::write(&path, "{ not json")?;

    assert!(DetectorConfig::from_json_file(&path).is_err());
    Ok(())
}
