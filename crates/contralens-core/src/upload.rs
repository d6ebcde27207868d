//! Simulated upload progress for the drop zone.
//!
//! Nothing is transferred. Each queued file advances by a step drawn from a
//! [`ProgressStepper`] on every tick; once a file reaches 100% it settles to
//! success or error on the following tick. Seed the stepper (or script it) to
//! get a reproducible sequence.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Largest single progress step, in percent.
pub const MAX_STEP: f64 = 30.0;

/// Probability that a finished upload settles as a success.
pub const SUCCESS_RATE: f64 = 0.8;

/// File extensions the drop zone takes, lowercase.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Whether `name` has one of the [`ACCEPTED_EXTENSIONS`], ignoring case.
pub fn is_accepted_document(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ACCEPTED_EXTENSIONS
            .iter()
            .any(|accepted| ext.eq_ignore_ascii_case(accepted))
    })
}

/// Source of progress steps and final outcomes.
pub trait ProgressStepper {
    /// Percentage points to add on this tick.
    fn next_increment(&mut self) -> f64;
    /// Whether a completed upload succeeds.
    fn succeeds(&mut self) -> bool;
}

/// Random steps in `[0, MAX_STEP)` with an 80% success rate, from a seeded RNG.
pub struct SeededStepper {
    rng: StdRng,
}

impl SeededStepper {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ProgressStepper for SeededStepper {
    fn next_increment(&mut self) -> f64 {
        self.rng.gen_range(0.0..MAX_STEP)
    }

    fn succeeds(&mut self) -> bool {
        self.rng.gen_bool(SUCCESS_RATE)
    }
}

/// Replays fixed steps and outcomes.
///
/// Once the script runs out, every step completes the upload and every
/// outcome is a success.
#[derive(Debug, Default)]
pub struct ScriptedStepper {
    increments: VecDeque<f64>,
    outcomes: VecDeque<bool>,
}

impl ScriptedStepper {
    pub fn new(increments: impl IntoIterator<Item = f64>, outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            increments: increments.into_iter().collect(),
            outcomes: outcomes.into_iter().collect(),
        }
    }
}

impl ProgressStepper for ScriptedStepper {
    fn next_increment(&mut self) -> f64 {
        self.increments.pop_front().unwrap_or(100.0)
    }

    fn succeeds(&mut self) -> bool {
        self.outcomes.pop_front().unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
    /// Percent complete, `0.0..=100.0`.
    pub progress: f64,
}

/// The files dropped into the upload widget and their simulated progress.
pub struct UploadQueue<P> {
    files: Vec<UploadedFile>,
    stepper: P,
    next_id: u64,
}

impl<P: ProgressStepper> UploadQueue<P> {
    pub fn new(stepper: P) -> Self {
        Self {
            files: Vec::new(),
            stepper,
            next_id: 1,
        }
    }

    /// Queue a file and return its id.
    pub fn add(&mut self, name: impl Into<String>, size: u64) -> String {
        let id = format!("upload-{}", self.next_id);
        self.next_id += 1;
        let name = name.into();
        info!(id = %id, name = %name, size, "queued simulated upload");
        self.files.push(UploadedFile {
            id: id.clone(),
            name,
            size,
            status: UploadStatus::Uploading,
            progress: 0.0,
        });
        id
    }

    /// Advance every in-flight upload by one step.
    pub fn tick(&mut self) {
        for file in self.files.iter_mut().filter(|f| f.status == UploadStatus::Uploading) {
            if file.progress >= 100.0 {
                file.status = if self.stepper.succeeds() {
                    UploadStatus::Success
                } else {
                    UploadStatus::Error
                };
                info!(id = %file.id, status = ?file.status, "simulated upload settled");
                continue;
            }
            let step = self.stepper.next_increment().max(0.0);
            file.progress = (file.progress + step).min(100.0);
            debug!(id = %file.id, progress = file.progress, "simulated upload progress");
        }
    }

    /// Tick until nothing is uploading, returning the number of ticks taken.
    ///
    /// Stops after `max_ticks` even if uploads are still in flight.
    pub fn run_to_completion(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn is_idle(&self) -> bool {
        self.files.iter().all(|f| f.status != UploadStatus::Uploading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_progress_settles_on_the_tick_after_completion() {
        let stepper = ScriptedStepper::new([40.0, 35.0, 30.0], [true]);
        let mut queue = UploadQueue::new(stepper);
        let id = queue.add("msa.pdf", 2048);
        assert_eq!(id, "upload-1");

        queue.tick();
        assert_eq!(queue.files()[0].progress, 40.0);
        queue.tick();
        assert_eq!(queue.files()[0].progress, 75.0);
        queue.tick();
        assert_eq!(queue.files()[0].progress, 100.0);
        assert_eq!(queue.files()[0].status, UploadStatus::Uploading);
        queue.tick();
        assert_eq!(queue.files()[0].status, UploadStatus::Success);
        assert!(queue.is_idle());
    }

    #[test]
    fn scripted_failure() {
        let mut queue = UploadQueue::new(ScriptedStepper::new([100.0], [false]));
        queue.add("nda.docx", 10);
        let ticks = queue.run_to_completion(10);
        assert_eq!(ticks, 2);
        assert_eq!(queue.files()[0].status, UploadStatus::Error);
        assert_eq!(queue.files()[0].progress, 100.0);
    }

    #[test]
    fn negative_steps_never_move_backwards() {
        let mut queue = UploadQueue::new(ScriptedStepper::new([10.0, -50.0], [true]));
        queue.add("a.pdf", 1);
        queue.tick();
        queue.tick();
        assert_eq!(queue.files()[0].progress, 10.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let run = |seed| {
            let mut queue = UploadQueue::new(SeededStepper::new(seed));
            queue.add("a.pdf", 1);
            queue.add("b.pdf", 2);
            let mut trace = Vec::new();
            while !queue.is_idle() {
                queue.tick();
                trace.push(
                    queue
                        .files()
                        .iter()
                        .map(|f| (f.progress, f.status))
                        .collect::<Vec<_>>(),
                );
            }
            trace
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn seeded_steps_stay_in_range() {
        let mut stepper = SeededStepper::new(42);
        for _ in 0..1000 {
            let step = stepper.next_increment();
            assert!((0.0..MAX_STEP).contains(&step));
        }
    }

    #[test]
    fn accepts_only_contract_documents() {
        for name in ["lease.pdf", "NDA.DOCX", "terms.v2.doc", "a.Pdf"] {
            assert!(is_accepted_document(name), "{name}");
        }
        for name in ["notes.txt", "pdf", "archive.pdf.zip", "scan.", "README"] {
            assert!(!is_accepted_document(name), "{name}");
        }
    }

    #[test]
    fn remove_and_clear() {
        let mut queue = UploadQueue::new(ScriptedStepper::default());
        let a = queue.add("a.pdf", 1);
        queue.add("b.pdf", 1);
        assert!(queue.remove(&a));
        assert!(!queue.remove(&a));
        assert_eq!(queue.files().len(), 1);
        assert_eq!(queue.files()[0].id, "upload-2");
        queue.clear();
        assert!(queue.files().is_empty());
        assert!(queue.is_idle());
    }
}
