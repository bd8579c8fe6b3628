mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::*;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("web-image-optimizer").unwrap()
}

#[test]
fn test_cli_help() {
    cli().arg("--help").assert().success();
}

#[test]
fn test_compress_help() {
    cli()
        .args(["compress", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--target-size"));
}

#[test]
fn test_info_help() {
    cli().args(["info", "--help"]).assert().success();
}

#[test]
fn test_info_missing_args() {
    cli().arg("info").assert().failure();
}

#[test]
fn test_compress_without_inputs_only_warns() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let scratch = workdir.child("scratch");
    scratch.create_dir_all().unwrap();

    cli()
        .current_dir(workdir.path())
        .args(["compress", "--scratch-dir"])
        .arg(scratch.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Please upload at least one image."));

    assert_eq!(count_entries(scratch.path()), 0);
    workdir
        .child("compressed_images.zip")
        .assert(predicate::path::missing());
}

#[test]
fn test_compress_rejects_out_of_range_quality() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let input = workdir.child("a.jpg");
    input.write_binary(&jpeg_bytes(10, 10)).unwrap();

    cli()
        .args(["compress", "-q", "4"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality value"));
}

#[test]
fn test_compress_rejects_out_of_range_target_size() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let input = workdir.child("a.jpg");
    input.write_binary(&jpeg_bytes(10, 10)).unwrap();

    cli()
        .args(["compress", "-s", "3010"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target size"));
}

#[test]
fn test_compress_nonexistent_input() {
    cli()
        .args(["compress", "/nonexistent/photo.jpg"])
        .assert()
        .failure();
}

#[test]
fn test_compress_single_image_is_delivered_directly() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let scratch = workdir.child("scratch");
    scratch.create_dir_all().unwrap();
    let downloads = workdir.child("downloads");
    let input = workdir.child("beach.jpg");
    input.write_binary(&jpeg_bytes(2400, 1600)).unwrap();

    cli()
        .arg("compress")
        .arg(input.path())
        .args(["-q", "60", "-s", "1200", "-o"])
        .arg(downloads.path())
        .arg("--scratch-dir")
        .arg(scratch.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("beach_compressed.jpg"));

    let output = downloads.child("beach_compressed.jpg");
    output.assert(predicate::path::is_file());
    let decoded = image::open(output.path()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 800));
    assert_eq!(count_entries(scratch.path()), 0);
}

#[test]
fn test_compress_directory_with_corrupt_file() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let scratch = workdir.child("scratch");
    scratch.create_dir_all().unwrap();
    let uploads = workdir.child("uploads");
    uploads.create_dir_all().unwrap();
    uploads.child("good.png").write_binary(&opaque_png_bytes(40, 40)).unwrap();
    uploads.child("clear.png").write_binary(&transparent_png_bytes(40, 40)).unwrap();
    uploads.child("bad.jpg").write_binary(b"garbage").unwrap();
    uploads.child("readme.txt").write_str("ignored").unwrap();
    let downloads = workdir.child("downloads");

    cli()
        .arg("compress")
        .arg(uploads.path())
        .arg("-o")
        .arg(downloads.path())
        .arg("--scratch-dir")
        .arg(scratch.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing bad.jpg"));

    downloads
        .child("compressed_images.zip")
        .assert(predicate::path::is_file());
    assert_eq!(count_entries(scratch.path()), 0);
}

#[test]
fn test_compress_quiet_prints_only_result_path() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let input = workdir.child("tiny.png");
    input.write_binary(&opaque_png_bytes(16, 16)).unwrap();

    cli()
        .arg("--quiet")
        .arg("compress")
        .arg(input.path())
        .arg("-o")
        .arg(workdir.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("tiny_compressed.jpg\n"));
}

#[test]
fn test_info_reports_plan() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let input = workdir.child("wide.jpg");
    input.write_binary(&jpeg_bytes(3000, 1000)).unwrap();

    cli()
        .arg("info")
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1500x500"))
        .stdout(predicate::str::contains("wide_compressed.jpg"));
}

#[test]
fn test_info_with_fake_image() {
    let workdir = assert_fs::TempDir::new().unwrap();
    let input = workdir.child("fake.jpg");
    input.write_str("fake image data").unwrap();

    cli().arg("info").arg(input.path()).assert().failure();
}
