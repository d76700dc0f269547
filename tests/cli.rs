use std::io::Cursor;
use std::process::Command;

fn minzip() -> Command {
    Command::new(env!("CARGO_BIN_EXE_minzip"))
}

#[test]
fn writes_default_archive() {
    let dir = tempfile::tempdir().unwrap();

    let output = minzip().current_dir(dir.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Created minimal.zip successfully!"
    );

    let buf = std::fs::read(dir.path().join("minimal.zip")).unwrap();
    assert_eq!(buf.len(), 127);
    assert_eq!(&buf[39..50], b"Hello, ZIP!");
    assert_eq!(&buf[105..109], b"PK\x05\x06");
}

#[test]
fn refuses_to_overwrite_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("minimal.zip");
    std::fs::write(&target, b"keep me").unwrap();

    let output = minzip().current_dir(dir.path()).arg("-q").output().unwrap();
    assert!(!output.status.success());
    assert_eq!(std::fs::read(&target).unwrap(), b"keep me");

    let output = minzip()
        .current_dir(dir.path())
        .args(["-q", "-o"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read(&target).unwrap().len(), 127);
}

#[test]
fn archives_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.txt"), b"first file").unwrap();
    std::fs::write(dir.path().join("two.txt"), b"").unwrap();

    let output = minzip()
        .current_dir(dir.path())
        .args(["files.zip", "-q", "-a", "one.txt", "two.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let buf = std::fs::read(dir.path().join("files.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.by_index(0).unwrap().name(), "one.txt");
    assert_eq!(archive.by_index(1).unwrap().size(), 0);
}

#[test]
fn oversized_payload_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("big.bin"), vec![0u8; 70_000]).unwrap();

    let output = minzip()
        .current_dir(dir.path())
        .args(["big.zip", "-a", "big.bin"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("65535"));
    assert!(!dir.path().join("big.zip").exists());
    assert!(!dir.path().join("big.zip.partial").exists());
}

#[test]
fn pipe_mode_writes_archive_to_stdout() {
    let dir = tempfile::tempdir().unwrap();

    let output = minzip()
        .current_dir(dir.path())
        .args(["-p", "-n", "note.txt", "-d", "hi"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!dir.path().join("minimal.zip").exists());

    let mut archive = zip::ZipArchive::new(Cursor::new(output.stdout)).unwrap();
    let mut file = archive.by_name("note.txt").unwrap();
    let mut contents = String::new();
    std::io::Read::read_to_string(&mut file, &mut contents).unwrap();
    assert_eq!(contents, "hi");
}
