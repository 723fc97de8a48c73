//! File-per-state storage with a background writer
//!
//! Each state is written to `<directory>/<index>`. Writes are queued on a
//! channel and handled by a `state-writer` thread so the engine never waits
//! on the disk; [`FileSystemStorage::flush`] blocks until the queue drains.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use firecell_model::State;
use parking_lot::{Condvar, Mutex};

use crate::{StateConsumer, StateProvider, StateSerializer, StorageError};

struct WriteRequest {
    index: u64,
    state: State,
}

/// Count of queued writes, signalled whenever one finishes
#[derive(Default)]
struct Pending {
    count: Mutex<usize>,
    drained: Condvar,
}

impl Pending {
    fn add(&self) {
        *self.count.lock() += 1;
    }

    fn done(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.drained.wait(&mut count);
        }
    }
}

/// Stores each state as its own file
pub struct FileSystemStorage {
    directory: PathBuf,
    serializer: Arc<dyn StateSerializer>,
    sender: Mutex<Option<Sender<WriteRequest>>>,
    pending: Arc<Pending>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl FileSystemStorage {
    /// Open `directory` (creating it if needed) and start the writer thread
    pub fn new(
        directory: impl Into<PathBuf>,
        serializer: Arc<dyn StateSerializer>,
    ) -> Result<Self, StorageError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;

        let (sender, receiver) = channel::<WriteRequest>();
        let pending = Arc::new(Pending::default());

        let writer = {
            let directory = directory.clone();
            let serializer = Arc::clone(&serializer);
            let pending = Arc::clone(&pending);
            thread::Builder::new()
                .name("state-writer".to_string())
                .spawn(move || write_loop(&directory, serializer.as_ref(), &pending, receiver))?
        };

        log::debug!("File storage opened at {}", directory.display());
        Ok(Self {
            directory,
            serializer,
            sender: Mutex::new(Some(sender)),
            pending,
            writer: Mutex::new(Some(writer)),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding state `index`
    pub fn state_path(&self, index: u64) -> PathBuf {
        self.directory.join(index.to_string())
    }

    /// Block until every queued state has been written
    pub fn flush(&self) {
        self.pending.wait();
    }

    /// Indices of all states present on disk, ascending
    pub fn stored_indices(&self) -> Result<Vec<u64>, StorageError> {
        let mut indices = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(index) = entry.file_name().to_str().and_then(|n| n.parse::<u64>().ok()) {
                indices.push(index);
            }
        }
        indices.sort_unstable();
        Ok(indices)
    }

    /// Flush, stop the writer and wait for it
    pub fn close(&self) {
        self.flush();
        self.sender.lock().take();
        if let Some(writer) = self.writer.lock().take() {
            if writer.join().is_err() {
                log::error!("State writer thread panicked");
            }
        }
    }
}

impl StateConsumer for FileSystemStorage {
    fn put_state(&self, state: State, index: u64) -> Result<(), StorageError> {
        let sender = self.sender.lock();
        let sender = sender.as_ref().ok_or(StorageError::WriterClosed)?;
        self.pending.add();
        if sender.send(WriteRequest { index, state }).is_err() {
            self.pending.done();
            return Err(StorageError::WriterClosed);
        }
        Ok(())
    }
}

impl StateProvider for FileSystemStorage {
    fn get_state(&self, index: u64) -> Option<State> {
        let path = self.state_path(index);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match self.serializer.deserialize(&bytes) {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Corrupt state file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Drop for FileSystemStorage {
    fn drop(&mut self) {
        self.close();
    }
}

fn write_loop(
    directory: &Path,
    serializer: &dyn StateSerializer,
    pending: &Pending,
    receiver: Receiver<WriteRequest>,
) {
    while let Ok(request) = receiver.recv() {
        let path = directory.join(request.index.to_string());
        let result = serializer
            .serialize(&request.state)
            .map_err(StorageError::from)
            .and_then(|bytes| fs::write(&path, bytes).map_err(StorageError::from));
        match result {
            Ok(()) => log::debug!("Wrote state {} to {}", request.index, path.display()),
            Err(e) => log::error!("Failed to write state {}: {}", request.index, e),
        }
        pending.done();
    }
}
