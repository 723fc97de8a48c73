//! Integration tests: blueprints from a library replayed through file storage

use std::sync::Arc;

use firecell_core::{BlueprintLibrary, Diagnostics, Playback, PlayingMode, StateBlueprint};
use firecell_storage::{BinaryStateSerializer, FileSystemStorage, StateConsumer};

#[test]
fn test_library_room_replays_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let library = BlueprintLibrary::new(dir.path().join("rooms"));
    library.save(&StateBlueprint::demo("demo")).unwrap();

    let initial = library.load("demo").unwrap().to_state().unwrap();
    let burning = Diagnostics::from_state(&initial).burning_cell_count;
    assert_eq!(burning, 4);

    let storage = Arc::new(
        FileSystemStorage::new(dir.path().join("states"), Arc::new(BinaryStateSerializer)).unwrap(),
    );
    storage.put_state(initial.clone(), 0).unwrap();
    storage.put_state(initial.clone(), 1).unwrap();
    storage.flush();

    let mut playback = Playback::new(storage.clone(), 0.5);
    assert!(playback.update(0.5));
    assert!(playback.update(0.5));
    assert!(!playback.update(0.5));

    let (index, state) = playback.current().unwrap();
    assert_eq!(index, 1);
    assert_eq!(state, &initial);

    playback.set_mode(PlayingMode::Backward);
    playback.seek(1);
    assert!(playback.update(0.0));
    assert!(playback.update(0.5));
    assert_eq!(playback.current().map(|(i, _)| i), Some(0));
}
