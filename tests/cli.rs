use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn mandelzoom() -> Command {
    Command::cargo_bin("mandelzoom").unwrap()
}

#[test]
fn renders_a_png() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-s", "40x30"])
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba();
    assert_eq!(img.dimensions(), (40, 30));
    let raw = img.into_raw();
    let pixel = |x: usize, y: usize| raw[(x + y * 40) * 4..][..4].to_vec();
    // (20, 15) samples the origin, which is in the set.
    assert_eq!(pixel(20, 15), vec![0, 0, 0, 255]);
    assert_ne!(pixel(0, 0), vec![0, 0, 0, 255]);
}

#[test]
fn renders_a_pixmap() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.ppm");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-s", "16x16", "-p", "grayscale"])
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba();
    assert_eq!(img.dimensions(), (16, 16));
}

#[test]
fn frames_are_numbered() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("zoom.png");
    mandelzoom()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-s",
            "20x20",
            "--frames",
            "-c",
            "5,5",
            "-c",
            "10,10",
        ])
        .assert()
        .success();

    for n in 0..3 {
        assert!(dir.path().join(format!("zoom-{}.png", n)).exists());
    }
    assert!(!out.exists());
}

#[test]
fn clicks_without_frames_write_only_the_last_view() {
    let dir = tempdir().unwrap();
    let clicked = dir.path().join("clicked.png");
    let direct = dir.path().join("direct.png");
    mandelzoom()
        .args(&["-o", clicked.to_str().unwrap(), "-s", "20x20", "-c", "15,5"])
        .assert()
        .success();
    // One click at (15, 5) on a 20x20 frame lands on zoom 2, offset (5, -5).
    mandelzoom()
        .args(&[
            "-o",
            direct.to_str().unwrap(),
            "-s",
            "20x20",
            "-z",
            "2",
            "-f",
            "5,-5",
        ])
        .assert()
        .success();

    let a = image::open(&clicked).unwrap().to_rgba().into_raw();
    let b = image::open(&direct).unwrap().to_rgba().into_raw();
    assert_eq!(a, b);
}

#[test]
fn output_is_required() {
    mandelzoom().args(&["-s", "10x10"]).assert().failure();
}

#[test]
fn bad_size_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-s", "ten by ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn zero_size_is_rejected_without_writing() {
    let dir = tempdir().unwrap();
    for size in &["0x10", "10x0"] {
        let out = dir.path().join("empty.png");
        mandelzoom()
            .args(&["-o", out.to_str().unwrap(), "-s", size])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not parse output image size"));
        assert!(!out.exists());
    }
}

#[test]
fn bad_zoom_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-z", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zoom level must be a positive number"));
}

#[test]
fn infinite_offset_is_a_render_failure() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-s", "4x4", "-f", "inf,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn unknown_palette_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-p", "rainbow"])
        .assert()
        .failure();
}

#[test]
fn zero_threads_are_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.png");
    mandelzoom()
        .args(&["-o", out.to_str().unwrap(), "-t", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between 1"));
}
