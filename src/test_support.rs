use crate::ui::{Status, StepStatus, Ui};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

#[derive(Debug, Default)]
struct StatusLog {
    opened: usize,
    updates: Vec<String>,
    steps: Vec<(StepStatus, String)>,
    closes: usize,
}

/// Fake reporter that records everything posted to it.
#[derive(Debug, Default)]
pub(crate) struct RecordingUi {
    log: RefCell<StatusLog>,
}

impl RecordingUi {
    pub(crate) fn open_count(&self) -> usize {
        self.log.borrow().opened
    }

    pub(crate) fn close_count(&self) -> usize {
        self.log.borrow().closes
    }

    pub(crate) fn updates(&self) -> Vec<String> {
        self.log.borrow().updates.clone()
    }

    pub(crate) fn steps(&self) -> Vec<(StepStatus, String)> {
        self.log.borrow().steps.clone()
    }
}

struct RecordingStatus<'a> {
    log: &'a RefCell<StatusLog>,
}

impl Ui for RecordingUi {
    fn status(&self) -> Box<dyn Status + '_> {
        self.log.borrow_mut().opened += 1;
        Box::new(RecordingStatus { log: &self.log })
    }
}

impl Status for RecordingStatus<'_> {
    fn update(&mut self, msg: &str) {
        self.log.borrow_mut().updates.push(msg.to_string());
    }

    fn step(&mut self, status: StepStatus, msg: &str) {
        self.log.borrow_mut().steps.push((status, msg.to_string()));
    }

    fn close(&mut self) {
        self.log.borrow_mut().closes += 1;
    }
}
