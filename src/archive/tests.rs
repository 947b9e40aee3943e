use super::paths::{is_valid_cartridge_id, sanitize_relative};
use super::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const CATALOG: &str = r#"{
  "cartridge_id": "BS1926-001",
  "title": "Giants of Jazz",
  "artist": "Smith, Bessie",
  "year": 1923,
  "tracks": [
    { "number": 1, "title": "Downhearted Blues", "path": "audio/track1.m4a" },
    { "number": 2, "title": "Gulf Coast Blues", "path": "audio/track2.m4a" }
  ]
}"#;

struct Fixture {
    _dir: TempDir,
    bundled: PathBuf,
    local: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let bundled = dir.path().join("TestPlaytArchive");
        let local = dir.path().join("PlaytArchive");
        fs::create_dir_all(bundled.join(CARTRIDGES_DIR)).unwrap();
        Self {
            _dir: dir,
            bundled,
            local,
        }
    }

    fn library(&self) -> ArchiveLibrary {
        ArchiveLibrary::new(ConfiguredRoots::new(
            Some(self.bundled.clone()),
            Some(self.local.clone()),
        ))
    }

    fn cartridge(&self, id: &str, catalog: &str, media: &[&str]) -> PathBuf {
        let root = self.bundled.join(CARTRIDGES_DIR).join(id);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(CATALOG_FILE), catalog).unwrap();
        for m in media {
            let p = root.join(m);
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, b"not real audio").unwrap();
        }
        root
    }
}

#[test]
fn sanitize_relative_rejects_traversal_and_absolute_paths() {
    for bad in [
        "",
        "   ",
        "/etc/passwd",
        "~/music.m4a",
        "../../etc/passwd",
        "audio/../../secret",
        "audio/..",
        "..",
        "\\windows\\system32",
        "./.",
    ] {
        assert!(sanitize_relative(bad).is_none(), "{bad:?} should be rejected");
    }
}

#[test]
fn sanitize_relative_normalizes_current_dir_segments() {
    assert_eq!(
        sanitize_relative("  audio/./track1.m4a "),
        Some(PathBuf::from("audio").join("track1.m4a"))
    );
    assert_eq!(sanitize_relative("a..b.m4a"), Some(PathBuf::from("a..b.m4a")));
}

#[test]
fn cartridge_ids_must_be_single_components() {
    assert!(is_valid_cartridge_id("BS1926-001"));
    assert!(!is_valid_cartridge_id(""));
    assert!(!is_valid_cartridge_id(".."));
    assert!(!is_valid_cartridge_id(".hidden"));
    assert!(!is_valid_cartridge_id("a/b"));
    assert!(!is_valid_cartridge_id("/abs"));
}

#[test]
fn resolve_rejects_traversal_before_touching_the_filesystem() {
    // No cartridge exists at all: the rejection must come from the path check.
    let fx = Fixture::new();
    let err = fx
        .library()
        .resolve_media_path(ArchiveSource::Bundled, "NOPE", "../../etc/passwd")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidRelativePath(p) if p == "../../etc/passwd"));
}

#[test]
fn resolve_finds_existing_media() {
    let fx = Fixture::new();
    let root = fx.cartridge("BS1926-001", CATALOG, &["audio/track1.m4a"]);

    let resolved = fx
        .library()
        .resolve_media_path(ArchiveSource::Bundled, "BS1926-001", "audio/track1.m4a")
        .unwrap();

    assert_eq!(resolved, root.join("audio/track1.m4a").canonicalize().unwrap());
    assert!(resolved.is_file());
}

#[test]
fn resolve_reports_missing_media_distinctly() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &["audio/track1.m4a"]);

    let err = fx
        .library()
        .resolve_media_path(ArchiveSource::Bundled, "BS1926-001", "audio/missing.m4a")
        .unwrap_err();

    match err {
        ArchiveError::MissingMedia(path) => assert!(path.ends_with("audio/missing.m4a")),
        other => panic!("expected MissingMedia, got {other:?}"),
    }
}

#[test]
fn resolve_treats_directories_as_missing_media() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &["audio/track1.m4a"]);

    let err = fx
        .library()
        .resolve_media_path(ArchiveSource::Bundled, "BS1926-001", "audio")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::MissingMedia(_)));
}

#[test]
fn resolve_rejects_bad_cartridge_id() {
    let fx = Fixture::new();
    let err = fx
        .library()
        .resolve_media_path(ArchiveSource::Bundled, "..", "audio/track1.m4a")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidCartridgeId(_)));
}

#[cfg(unix)]
#[test]
fn resolve_rejects_symlink_escaping_the_cartridge() {
    let fx = Fixture::new();
    let root = fx.cartridge("BS1926-001", CATALOG, &[]);

    let outside = fx.bundled.parent().unwrap().join("outside");
    fs::create_dir_all(&outside).unwrap();
    fs::write(outside.join("secret.m4a"), b"secret").unwrap();
    std::os::unix::fs::symlink(&outside, root.join("audio")).unwrap();

    let lib = fx.library();
    let err = lib
        .resolve_media_path(ArchiveSource::Bundled, "BS1926-001", "audio/secret.m4a")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidRelativePath(_)));

    // Also when the escaped target does not exist.
    let err = lib
        .resolve_media_path(ArchiveSource::Bundled, "BS1926-001", "audio/nothing.m4a")
        .unwrap_err();
    assert!(matches!(err, ArchiveError::InvalidRelativePath(_)));
}

#[test]
fn list_cartridge_ids_returns_sorted_directories_only() {
    let fx = Fixture::new();
    fx.cartridge("SPELLS201x-001", CATALOG, &[]);
    fx.cartridge("BS1926-001", CATALOG, &[]);
    let cartridges = fx.bundled.join(CARTRIDGES_DIR);
    fs::write(cartridges.join("README.txt"), b"not a cartridge").unwrap();
    fs::create_dir_all(cartridges.join(".DS_Store_dir")).unwrap();

    let ids = fx.library().list_cartridge_ids(ArchiveSource::Bundled).unwrap();
    assert_eq!(ids, vec!["BS1926-001".to_string(), "SPELLS201x-001".to_string()]);
}

#[test]
fn local_archive_is_created_on_demand() {
    let fx = Fixture::new();
    assert!(!fx.local.exists());

    let ids = fx.library().list_cartridge_ids(ArchiveSource::Local).unwrap();
    assert!(ids.is_empty());
    assert!(fx.local.join(CARTRIDGES_DIR).is_dir());
}

#[test]
fn missing_bundled_root_is_reported() {
    let lib = ArchiveLibrary::new(ConfiguredRoots::new(
        Some(PathBuf::from("/definitely/not/here/TestPlaytArchive")),
        None,
    ));
    let err = lib.list_cartridge_ids(ArchiveSource::Bundled).unwrap_err();
    assert!(matches!(err, ArchiveError::MissingBundledArchive));

    let unconfigured = ArchiveLibrary::new(ConfiguredRoots::default());
    assert!(matches!(
        unconfigured.archive_root(ArchiveSource::Bundled),
        Err(ArchiveError::MissingBundledArchive)
    ));
}

#[test]
fn load_cartridge_parses_catalog() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &[]);

    let cartridge = fx
        .library()
        .load_cartridge(ArchiveSource::Bundled, "BS1926-001")
        .unwrap();

    assert_eq!(cartridge.cartridge_id, "BS1926-001");
    assert_eq!(cartridge.title, "Giants of Jazz");
    assert_eq!(cartridge.year, Some(1923));
    assert_eq!(cartridge.source, ArchiveSource::Bundled);
    assert_eq!(cartridge.tracks.len(), 2);
    assert_eq!(cartridge.tracks[1].path, "audio/track2.m4a");
    assert_eq!(cartridge.tracks[0].id(), "1-Downhearted Blues");
    assert_eq!(cartridge.subtitle(), "Smith, Bessie • 1923");
}

#[test]
fn load_cartridge_without_year() {
    let fx = Fixture::new();
    fx.cartridge(
        "SPELLS201x-001",
        r#"{"cartridge_id":"SPELLS201x-001","title":"The Night Has Eyes","artist":"The Spells","tracks":[]}"#,
        &[],
    );

    let cartridge = fx
        .library()
        .load_cartridge(ArchiveSource::Bundled, "SPELLS201x-001")
        .unwrap();
    assert_eq!(cartridge.year, None);
    assert_eq!(cartridge.subtitle(), "The Spells");
    assert!(cartridge.queue_tracks().is_empty());
}

#[test]
fn load_cartridge_reports_missing_and_malformed_catalogs() {
    let fx = Fixture::new();
    let lib = fx.library();

    let err = lib.load_cartridge(ArchiveSource::Bundled, "GHOST").unwrap_err();
    assert!(matches!(err, ArchiveError::MissingCatalog(p) if p.ends_with("GHOST/playt.json")));

    fx.cartridge("BROKEN", "{ not json", &[]);
    let err = lib.load_cartridge(ArchiveSource::Bundled, "BROKEN").unwrap_err();
    assert!(matches!(err, ArchiveError::MalformedCatalog { .. }));

    fx.cartridge("NOTRACKS", r#"{"cartridge_id":"x","title":"t","artist":"a"}"#, &[]);
    let err = lib.load_cartridge(ArchiveSource::Bundled, "NOTRACKS").unwrap_err();
    assert!(matches!(err, ArchiveError::MalformedCatalog { .. }));
}

#[test]
fn queue_tracks_carry_archive_links_and_stable_ids() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &[]);
    let lib = fx.library();

    let first = lib
        .load_queue_tracks(ArchiveSource::Bundled, "BS1926-001")
        .unwrap();
    let second = lib
        .load_queue_tracks(ArchiveSource::Bundled, "BS1926-001")
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].title, "Downhearted Blues");
    assert_eq!(first[0].artist, "Smith, Bessie");
    assert_eq!(first[0].album_title, "Giants of Jazz");
    let link = first[0].archive.as_ref().unwrap();
    assert_eq!(link.cartridge_id, "BS1926-001");
    assert_eq!(link.source, ArchiveSource::Bundled);
    assert_eq!(link.relative_path, "audio/track1.m4a");
    assert_eq!(link.track_number, 1);

    assert!(first[0].same_identity(&second[0]));
    assert!(!first[0].same_identity(&first[1]));
}

#[test]
fn install_copies_cartridge_into_local_archive() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &["audio/track1.m4a", "audio/track2.m4a"]);
    let lib = fx.library();

    lib.install_bundled_to_local("BS1926-001").unwrap();

    let ids = lib.list_cartridge_ids(ArchiveSource::Local).unwrap();
    assert_eq!(ids, vec!["BS1926-001".to_string()]);

    let cartridge = lib.load_cartridge(ArchiveSource::Local, "BS1926-001").unwrap();
    assert_eq!(cartridge.source, ArchiveSource::Local);
    let first = &cartridge.tracks[0];
    let media = lib
        .resolve_media_path(ArchiveSource::Local, "BS1926-001", &first.path)
        .unwrap();
    assert!(media.starts_with(fx.local.canonicalize().unwrap()));
}

#[test]
fn install_replaces_instead_of_merging() {
    let fx = Fixture::new();
    fx.cartridge("BS1926-001", CATALOG, &["audio/track1.m4a"]);
    let lib = fx.library();

    let target = lib.install_bundled_to_local("BS1926-001").unwrap();
    fs::write(target.join("stale.m4a"), b"left over").unwrap();

    lib.install_bundled_to_local("BS1926-001").unwrap();

    assert!(!target.join("stale.m4a").exists());
    assert!(target.join("audio/track1.m4a").is_file());
    assert!(target.join(CATALOG_FILE).is_file());
}

#[test]
fn install_unknown_cartridge_fails() {
    let fx = Fixture::new();
    let err = fx.library().install_bundled_to_local("GHOST").unwrap_err();
    assert!(matches!(err, ArchiveError::MissingCartridge(id) if id == "GHOST"));
    assert!(!Path::new(&fx.local).join(CARTRIDGES_DIR).join("GHOST").exists());
}

#[test]
fn archive_source_parses_and_displays() {
    assert_eq!("bundled".parse::<ArchiveSource>(), Ok(ArchiveSource::Bundled));
    assert_eq!(" Local ".parse::<ArchiveSource>(), Ok(ArchiveSource::Local));
    assert!("remote".parse::<ArchiveSource>().is_err());
    assert_eq!(ArchiveSource::Local.to_string(), "local");
    assert_eq!(ArchiveSource::Bundled.display_name(), "Bundled (Test)");
}
