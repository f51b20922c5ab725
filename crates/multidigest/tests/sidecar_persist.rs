use std::fs::File;
use std::io::Write;

use multidigest::{
    DigestAlgorithm, DigestHasher, Error, MultiDigestWriter, Registry, SidecarMode,
    SidecarOptions, WriterOptions, digest_file, sidecar,
};
use tempfile::tempdir;

#[test]
fn test_round_trip_for_every_algorithm() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("artifact.tar");

    let options = WriterOptions::new()
        .algorithms(["MD5", "SHA-1", "SHA-256", "SHA-512"])
        .target(&target);
    let sink = File::create(&target).unwrap();
    let mut writer = MultiDigestWriter::with_options(sink, options).unwrap();
    for _ in 0..100 {
        writer.write_all(b"0123456789abcdef").unwrap();
    }
    writer.close().unwrap();

    let digests = writer.digests();
    assert_eq!(digests.len(), 4);
    for (algorithm, digest) in digests.iter() {
        let path = sidecar::sidecar_path(&target, algorithm);
        assert_eq!(sidecar::read(&path).unwrap(), hex::encode(digest), "{algorithm}");
        assert_eq!(sidecar::read_digest(&path).unwrap(), digest);
    }
    digests.verify(&target).unwrap();

    drop(writer);
    let reread = digest_file(&target, ["MD5", "SHA-1", "SHA-256", "SHA-512"]).unwrap();
    assert_eq!(reread, digests);
}

#[test]
fn test_sidecars_keep_existing_extension() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("pom.xml");

    let options = WriterOptions::new()
        .target(&target)
        .sidecar(SidecarOptions::new().mode(SidecarMode::Direct));
    let mut writer = MultiDigestWriter::with_options(Vec::new(), options).unwrap();
    writer.write_all(b"<project/>").unwrap();
    writer.close().unwrap();

    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["pom.xml.md5", "pom.xml.sha1"]);
}

#[test]
fn test_custom_registry_entry() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("data.bin");

    let sha224 = DigestAlgorithm::new("SHA-224", ".sha224", DigestHasher::<sha2::Sha224>::boxed);
    let options = WriterOptions::new()
        .registry(Registry::builtin().register(sha224))
        .algorithms(["SHA-224"])
        .target(&target);

    let mut writer = MultiDigestWriter::with_options(Vec::new(), options).unwrap();
    writer.write_all(b"This is a test.").unwrap();
    writer.close().unwrap();

    let content = sidecar::read(dir.path().join("data.bin.sha224")).unwrap();
    assert_eq!(content, writer.digest_hex("sha-224").unwrap());
    assert_eq!(content.len(), 56);
}

#[test]
fn test_sidecar_failure_after_close() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing-dir").join("data.bin");

    let mut writer = MultiDigestWriter::with_target(Vec::new(), &target);
    writer.write_all(b"This is a test.").unwrap();

    match writer.close() {
        Err(Error::Write { path, .. }) => {
            assert_eq!(path, sidecar::sidecar_path(&target, &multidigest::MD5))
        }
        other => panic!("expected Write error, got {other:?}"),
    }

    assert!(writer.is_closed());
    assert_eq!(
        writer.digest_hex("MD5").unwrap(),
        "120ea8a25e5d487bf68b5f7096440019"
    );

    std::fs::create_dir(dir.path().join("missing-dir")).unwrap();
    writer
        .digests()
        .persist(&target, &SidecarOptions::new().sync(true))
        .unwrap();
    writer.digests().verify(&target).unwrap();
}

#[test]
fn test_second_sidecar_failure_keeps_first() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("data.bin");
    let blocked = dir.path().join("data.bin.sha1");
    std::fs::create_dir(&blocked).unwrap();
    std::fs::write(blocked.join("occupied"), b"x").unwrap();

    let mut writer = MultiDigestWriter::with_target(Vec::new(), &target);
    writer.write_all(b"This is a test.").unwrap();

    match writer.close() {
        Err(Error::Write { path, .. }) => assert_eq!(path, blocked),
        other => panic!("expected Write error, got {other:?}"),
    }

    assert_eq!(
        sidecar::read(dir.path().join("data.bin.md5")).unwrap(),
        "120ea8a25e5d487bf68b5f7096440019"
    );
    assert!(blocked.is_dir());

    // A second close does not retry the failed sidecar.
    writer.close().unwrap();
    assert!(blocked.is_dir());
}
