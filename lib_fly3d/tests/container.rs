mod common;

use std::fs;

use common::{GCODE, RED_WHITE_2X1, RED_WHITE_2X1_BLOCK};
use lib_fly3d::container::{build_container, decode, decode_header, encode, store, StoreError};

#[test]
fn test_encode_reference_vector() {
    let container = encode(&RED_WHITE_2X1_BLOCK, GCODE).unwrap();

    // 17-byte address table: image at 17+11, stream at 28+7
    let expected_header: [u8; 17] = [
        0x01, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x1C, 0x00, 0x00,
        0x00, 0x07,
    ];
    assert_eq!(container.len(), 17 + 11 + 7);
    assert_eq!(&container[..17], &expected_header[..]);
    assert_eq!(&container[17..28], &RED_WHITE_2X1_BLOCK[..]);
    assert_eq!(&container[28..], GCODE);
}

#[test]
fn test_header_arithmetic_round_trips() {
    let gcode = vec![b'X'; 1234];
    let container = encode(&RED_WHITE_2X1_BLOCK, &gcode).unwrap();
    let header = decode_header(&container).unwrap();

    assert_eq!(header.image_offset, 17);
    assert_eq!(header.image_size, RED_WHITE_2X1_BLOCK.len() as u32);
    assert_eq!(header.stream_offset, 17 + header.image_size);
    assert_eq!(header.stream_size, 1234);
    assert_eq!(
        container.len(),
        (header.stream_offset + header.stream_size) as usize
    );
}

#[test]
fn test_store_writes_container_and_removes_source() {
    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("benchy.gcode");
    fs::write(&gcode_path, GCODE).unwrap();

    let output = store(&RED_WHITE_2X1_BLOCK, &gcode_path).unwrap();

    assert_eq!(output, dir.path().join("benchy.fly3d"));
    assert!(!gcode_path.exists());
    assert_eq!(
        fs::read(&output).unwrap(),
        encode(&RED_WHITE_2X1_BLOCK, GCODE).unwrap()
    );
    // No stray temporary file
    assert!(!dir.path().join("benchy.fly3d.tmp").exists());
}

#[test]
fn test_store_missing_source_leaves_no_container() {
    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("ghost.gcode");

    let err = store(&RED_WHITE_2X1_BLOCK, &gcode_path).unwrap_err();

    assert!(matches!(err, StoreError::SourceRead { .. }));
    assert!(!dir.path().join("ghost.fly3d").exists());
}

#[test]
fn test_store_write_failure_keeps_source() {
    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("blocked.gcode");
    fs::write(&gcode_path, GCODE).unwrap();
    // A directory squatting on the output path makes the final rename fail
    fs::create_dir(dir.path().join("blocked.fly3d")).unwrap();

    let err = store(&RED_WHITE_2X1_BLOCK, &gcode_path).unwrap_err();

    assert!(matches!(err, StoreError::ContainerWrite { .. }));
    assert_eq!(fs::read(&gcode_path).unwrap(), GCODE);
    assert!(!dir.path().join("blocked.fly3d.tmp").exists());
}

// A failed source deletion after a successful write is non-fatal:
// store keeps the container, logs a warning and still returns the
// output path. That branch cannot be reached through the filesystem
// on Unix — the delete and the container write need the same write
// permission on the same parent directory (the output is always a
// sibling of the source), so any setup that blocks the delete blocks
// the write first and lands in ContainerWrite instead.

#[test]
fn test_store_rejects_path_collision() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("already.fly3d");
    fs::write(&path, b"existing container").unwrap();

    let err = store(&RED_WHITE_2X1_BLOCK, &path).unwrap_err();

    assert!(matches!(err, StoreError::PathCollision(_)));
    assert_eq!(fs::read(&path).unwrap(), b"existing container");
}

#[test]
fn test_build_container_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("print.gcode");
    fs::write(&gcode_path, GCODE).unwrap();

    let output = build_container(&RED_WHITE_2X1, 2, 1, &gcode_path).unwrap();
    let decoded = decode(&fs::read(&output).unwrap()).unwrap();

    assert_eq!(decoded.header.image_offset, 17);
    assert_eq!(decoded.thumbnail.width, 2);
    assert_eq!(decoded.thumbnail.height, 1);
    // Red survives with its low bits truncated, white exactly
    assert_eq!(&decoded.thumbnail.rgb_data, &[0xF8, 0, 0, 0xF8, 0xFC, 0xF8]);
    assert_eq!(decoded.gcode, GCODE);
    assert!(!gcode_path.exists());
}

#[test]
fn test_build_container_bad_pixels_leaves_source() {
    let dir = tempfile::tempdir().unwrap();
    let gcode_path = dir.path().join("short.gcode");
    fs::write(&gcode_path, GCODE).unwrap();

    let err = build_container(&[0u8; 4], 2, 1, &gcode_path).unwrap_err();

    assert!(matches!(err, StoreError::PackFailed(_)));
    assert!(gcode_path.exists());
}
