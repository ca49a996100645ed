//! Integration tests for the flat-file farm and waypoint stores

use tempfile::TempDir;

use ultron_runner::store::{Farms, Waypoints};

#[test]
fn test_farms_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("farms.txt");

    let mut farms = Farms::load(&path).unwrap();
    assert!(farms.is_empty());
    farms.set("Steve", [-100.0, 64.0, 200.5]).unwrap();
    farms.set("Alex", [1.0, 2.0, 3.0]).unwrap();

    let reloaded = Farms::load(&path).unwrap();
    assert_eq!(reloaded.get("Steve"), Some([-100.0, 64.0, 200.5]));
    assert_eq!(reloaded.get("Alex"), Some([1.0, 2.0, 3.0]));
    assert_eq!(reloaded.get("Nobody"), None);
}

#[test]
fn test_farms_file_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("farms.txt");

    let mut farms = Farms::load(&path).unwrap();
    farms.set("Steve", [1.0, 2.0, 3.0]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Steve=[1, 2, 3]\n");
}

#[test]
fn test_waypoints_file_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("waypoints.txt");

    let mut waypoints = Waypoints::load(&path).unwrap();
    waypoints.set("quarry", [100.0, 64.5, -200.0]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "quarry=100 64.5 -200\n");
}

#[test]
fn test_last_write_wins() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("farms.txt");

    let mut farms = Farms::load(&path).unwrap();
    farms.set("Steve", [1.0, 1.0, 1.0]).unwrap();
    farms.set("Steve", [2.0, 2.0, 2.0]).unwrap();

    let reloaded = Farms::load(&path).unwrap();
    assert_eq!(reloaded.get("Steve"), Some([2.0, 2.0, 2.0]));
}

#[test]
fn test_set_observes_external_writes() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("waypoints.txt");

    let mut waypoints = Waypoints::load(&path).unwrap();

    // Another writer adds an entry after we loaded
    std::fs::write(&path, "external=9 9 9\n").unwrap();

    waypoints.set("mine", [1.0, 2.0, 3.0]).unwrap();

    let reloaded = Waypoints::load(&path).unwrap();
    assert_eq!(reloaded.get("external"), Some([9.0, 9.0, 9.0]));
    assert_eq!(reloaded.get("mine"), Some([1.0, 2.0, 3.0]));
}

#[test]
fn test_malformed_lines_are_skipped_on_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("waypoints.txt");
    std::fs::write(&path, "good=1 2 3\ngarbage line\nbad=x y z\n").unwrap();

    let waypoints = Waypoints::load(&path).unwrap();
    assert_eq!(waypoints.get("good"), Some([1.0, 2.0, 3.0]));
    assert_eq!(waypoints.names(), vec!["good"]);
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let farms = Farms::load(dir.path().join("nope.txt")).unwrap();
    assert!(farms.is_empty());
}
