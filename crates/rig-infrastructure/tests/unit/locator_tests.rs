//! Resource locator tests

use rig_application::ResourceLocator;
use rig_domain::Error;
use rig_infrastructure::TargetResourceLocator;
use rig_infrastructure::config::ResourceConfig;
use std::fs;
use tempfile::TempDir;

/// `tests/resources/shared.txt`, `resources/shared.txt`, `resources/only.txt`
fn fixture() -> (TempDir, TargetResourceLocator) {
    let dir = TempDir::new().expect("temp dir");
    for (sub, name) in [
        ("tests/resources", "shared.txt"),
        ("resources", "shared.txt"),
        ("resources", "only.txt"),
    ] {
        let target = dir.path().join(sub);
        fs::create_dir_all(&target).expect("create resource dir");
        fs::write(target.join(name), sub).expect("write resource");
    }
    let locator = TargetResourceLocator::from_config(&ResourceConfig {
        base_dir: Some(dir.path().to_path_buf()),
        ..ResourceConfig::default()
    });
    (dir, locator)
}

#[test]
fn test_basepath_from_config() {
    let (dir, locator) = fixture();
    assert_eq!(locator.basepath(), dir.path());
    assert_eq!(locator.search_dirs(), ["tests/resources", "resources"]);
}

/// The first search directory holding the resource wins
#[test]
fn test_first_search_dir_wins() {
    let (dir, locator) = fixture();

    let found = locator.target_test_resource("shared.txt").expect("lookup");

    assert_eq!(found, Some(dir.path().join("tests/resources/shared.txt")));
}

#[test]
fn test_later_search_dir_is_used() {
    let (dir, locator) = fixture();

    let found = locator.target_test_resource("only.txt").expect("lookup");

    assert_eq!(found, Some(dir.path().join("resources/only.txt")));
}

#[test]
fn test_missing_resource_is_none() {
    let (_dir, locator) = fixture();
    assert_eq!(locator.target_test_resource("absent.txt").expect("lookup"), None);
}

/// Names may not leave the resource directories
#[test]
fn test_escaping_names_rejected() {
    let (_dir, locator) = fixture();

    for name in ["../shared.txt", "/etc/hosts", ""] {
        let error = locator
            .target_test_resource(name)
            .expect_err("name rejected");
        assert!(matches!(error, Error::Configuration { .. }), "{name}: {error}");
    }
}

/// Without a configured base the package directory is used
#[test]
fn test_default_base_is_manifest_dir() {
    let locator = TargetResourceLocator::from_config(&ResourceConfig::default());
    assert_eq!(
        locator.basepath(),
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
    );
}
