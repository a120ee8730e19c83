//! Bounded fan-out of subdirectory scans
//!
//! Each subdirectory is one task. A fixed number of named threads pull
//! tasks from a crossbeam channel, walk their subtree, and send the file
//! list back. Workers share no state besides the channels and a stop flag
//! raised on the first failure.
//!
//! ```text
//!   subdirs ──► task channel ──┬── Worker 0: find_nc_files ──┐
//!                              ├── Worker 1: find_nc_files ──┼──► result channel ──► scan_all
//!                              └── Worker N: find_nc_files ──┘
//! ```

use crate::error::{CatalogError, Result, WorkerError};
use crate::walker::scan::find_nc_files;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, warn};

/// A subdirectory waiting to be scanned
#[derive(Debug, Clone)]
struct ScanTask {
    /// Position in the caller's subdirectory list
    index: usize,
    path: PathBuf,
}

/// Outcome of one subdirectory scan
type TaskResult = (usize, Result<Vec<PathBuf>>);

/// Files discovered under one subdirectory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirScan {
    pub subdir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// A scanning thread
struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(
        id: usize,
        tasks: Receiver<ScanTask>,
        results: Sender<TaskResult>,
        stop: Arc<AtomicBool>,
    ) -> std::result::Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("catalog-walker-{}", id))
            .spawn(move || worker_loop(id, tasks, results, stop))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    fn join(mut self) -> std::result::Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|payload| WorkerError::Panicked {
                id: self.id,
                message: panic_message(payload.as_ref()),
            })
        } else {
            Ok(())
        }
    }
}

fn worker_loop(
    id: usize,
    tasks: Receiver<ScanTask>,
    results: Sender<TaskResult>,
    stop: Arc<AtomicBool>,
) {
    let mut scanned = 0usize;

    while let Ok(task) = tasks.recv() {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let start = Instant::now();
        let outcome = find_nc_files(&task.path);
        match &outcome {
            Ok(files) => debug!(
                worker = id,
                subdir = %task.path.display(),
                files = files.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Subdirectory scanned"
            ),
            Err(_) => stop.store(true, Ordering::SeqCst),
        }
        scanned += 1;

        if results.send((task.index, outcome)).is_err() {
            break;
        }
    }

    debug!(worker = id, scanned, "Worker finished");
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Worker thread panicked".into()
    }
}

/// Scan every subdirectory on at most `worker_count` threads.
///
/// Blocks until all workers have exited. Results come back in the order of
/// `subdirs`. If any scan fails, the error of the earliest failing
/// subdirectory is returned and no partial results are.
pub fn scan_all(subdirs: Vec<PathBuf>, worker_count: usize) -> Result<Vec<SubdirScan>> {
    if subdirs.is_empty() {
        return Ok(Vec::new());
    }

    let task_count = subdirs.len();
    let worker_count = worker_count.clamp(1, task_count);

    let (task_tx, task_rx) = bounded::<ScanTask>(task_count);
    let (result_tx, result_rx) = unbounded::<TaskResult>();
    let stop = Arc::new(AtomicBool::new(false));

    for (index, path) in subdirs.iter().enumerate() {
        task_tx
            .send(ScanTask {
                index,
                path: path.clone(),
            })
            .map_err(|_| CatalogError::Worker(WorkerError::ResultChannelClosed))?;
    }
    // Workers exit once the queue drains
    drop(task_tx);

    let mut workers = Vec::with_capacity(worker_count);
    for id in 0..worker_count {
        match Worker::spawn(id, task_rx.clone(), result_tx.clone(), Arc::clone(&stop)) {
            Ok(worker) => workers.push(worker),
            Err(e) => {
                stop.store(true, Ordering::SeqCst);
                drop(result_tx);
                join_all(workers)?;
                return Err(e.into());
            }
        }
    }
    drop(result_tx);
    debug!(workers = workers.len(), tasks = task_count, "Scan workers spawned");

    let mut slots: Vec<Option<Result<Vec<PathBuf>>>> = (0..task_count).map(|_| None).collect();
    for (index, outcome) in result_rx.iter() {
        slots[index] = Some(outcome);
    }

    join_all(workers)?;

    let mut scans = Vec::with_capacity(task_count);
    let mut skipped = 0usize;
    for (slot, subdir) in slots.into_iter().zip(subdirs) {
        match slot {
            Some(Ok(files)) => scans.push(SubdirScan { subdir, files }),
            Some(Err(e)) => return Err(e),
            None => skipped += 1,
        }
    }

    // Tasks are only abandoned after a failure, which returned above
    if skipped > 0 {
        return Err(WorkerError::ResultChannelClosed.into());
    }

    Ok(scans)
}

fn join_all(workers: Vec<Worker>) -> Result<()> {
    let mut first_error = None;
    for worker in workers {
        if let Err(e) = worker.join() {
            warn!(error = %e, "Worker failed to join cleanly");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_all_preserves_subdir_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let names = ["atmos", "ice", "land", "ocean", "river"];
        for (i, name) in names.iter().enumerate() {
            for j in 0..=i {
                touch(&root.join(name).join(format!("ts/annual/{}.{}.nc", name, j)));
            }
        }

        let subdirs: Vec<PathBuf> = names.iter().map(|n| root.join(n)).collect();
        let scans = scan_all(subdirs.clone(), 2).unwrap();

        assert_eq!(scans.len(), names.len());
        for (i, scan) in scans.iter().enumerate() {
            assert_eq!(scan.subdir, subdirs[i]);
            assert_eq!(scan.files.len(), i + 1);
        }
    }

    #[test]
    fn test_scan_all_empty() {
        assert!(scan_all(Vec::new(), 4).unwrap().is_empty());
    }

    #[test]
    fn test_more_workers_than_tasks() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("atmos/a.nc"));

        let scans = scan_all(vec![dir.path().join("atmos")], 64).unwrap();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].files, vec![dir.path().join("atmos/a.nc")]);
    }

    #[test]
    fn test_failure_aborts_whole_scan() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("atmos/a.nc"));

        let subdirs = vec![dir.path().join("atmos"), dir.path().join("vanished")];
        let err = scan_all(subdirs, 2).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "Worker thread panicked");
    }
}
