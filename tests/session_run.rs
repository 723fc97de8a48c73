//! End-to-end: save a room, run it to disk, list it and replay it

use firecell::config::{AppConfig, ComputationKind};
use firecell::{Session, SessionError};
use firecell_core::{PlayingMode, StateBlueprint};
use firecell_storage::StorageError;

fn session_in(dir: &std::path::Path, computation: ComputationKind) -> Session {
    let mut config = AppConfig::default();
    config.storage.rooms_dir = dir.join("rooms");
    config.storage.simulations_dir = dir.join("simulations");
    config.simulation.max_steps = 4;
    config.simulation.computation = computation;
    config.simulation.threads = 2;
    Session::new(config)
}

#[test]
fn test_run_then_replay_forward_and_backward() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), ComputationKind::ThreadPool);
    session.rooms().save(&StateBlueprint::demo("demo")).unwrap();

    let summary = session.run("demo", Some("first"), None).unwrap();
    assert_eq!(summary.name, "first");
    assert_eq!(summary.published, 4);
    assert!(summary.last.unwrap().burning_cell_count > 0);

    let simulations = session.simulations();
    assert_eq!(simulations.find_stored_simulations().unwrap(), vec!["first"]);
    let stored = simulations.read_stored_config("first").unwrap();
    assert_eq!(stored.room_name, "demo");
    assert_eq!(stored.step_limit, Some(4));

    let mut forward = Vec::new();
    let frames = session
        .replay("first", PlayingMode::Forward, |frame| forward.push(frame.index))
        .unwrap();
    assert_eq!(frames, 4);
    assert_eq!(forward, vec![0, 1, 2, 3]);

    let mut backward = Vec::new();
    let mut layer_names = Vec::new();
    session
        .replay("first", PlayingMode::Backward, |frame| {
            backward.push(frame.index);
            layer_names = frame.layers.iter().map(|(name, _)| *name).collect();
        })
        .unwrap();
    assert_eq!(backward, vec![3, 2, 1, 0]);
    assert_eq!(layer_names, vec!["solids", "smoke", "fire"]);
}

#[test]
fn test_sequential_run_with_step_override() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), ComputationKind::Sequential);
    session.rooms().save(&StateBlueprint::demo("demo")).unwrap();

    let summary = session.run("demo", Some("short"), Some(2)).unwrap();
    assert_eq!(summary.published, 2);
}

#[test]
fn test_zero_steps_refused_before_storing() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), ComputationKind::Sequential);
    session.rooms().save(&StateBlueprint::demo("demo")).unwrap();

    let err = session.run("demo", Some("empty"), Some(0)).unwrap_err();
    assert!(matches!(err, SessionError::ZeroSteps));
    assert!(session.simulations().find_stored_simulations().unwrap().is_empty());
}

#[test]
fn test_name_collision_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), ComputationKind::Sequential);
    session.rooms().save(&StateBlueprint::demo("demo")).unwrap();

    session.run("demo", Some("taken"), Some(1)).unwrap();
    let err = session.run("demo", Some("taken"), Some(1)).unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::AlreadyExists(_))));
}

#[test]
fn test_unknown_room_and_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path(), ComputationKind::Sequential);

    assert!(matches!(session.run("nowhere", None, None), Err(SessionError::Blueprint(_))));
    assert!(session.replay("nothing", PlayingMode::Forward, |_| {}).is_err());
}
