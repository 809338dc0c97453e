//! Metronome - a deterministic job scheduler for flushing reactive effects
//! in a stable, non-decreasing order.
//!
//! Jobs are kept in a vector sorted by `(id, pre)` rather than a heap:
//! insertion is a single `partition_point` binary search, and because the
//! queue is already sorted, flushing is a linear scan with no per-pop
//! re-heapify cost. For the small queue sizes a UI flush actually reaches
//! (tens, not millions of jobs) that beats a heap's O(log n) pop with O(n)
//! worst-case insert-shift, and keeps the flush order easy to reason about.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// One unit of scheduled work.
///
/// `id` is a sort key (typically a component's creation order), not an
/// identity -- several jobs may share an id. `pre` marks a job that must run
/// before same-id jobs queued without it (component pre-render effects vs.
/// post-render watchers). `allow_recurse` lets a job re-queue itself while
/// it is running without being treated as runaway recursion.
pub struct Job {
    pub id: Option<i32>,
    pub pre: bool,
    pub allow_recurse: bool,
    /// Caller-supplied stable identity for the *logical* job this `Job`
    /// represents (e.g. a component's render effect). The source scheduler
    /// dedups by reference-identity of the scheduled function; Rust has no
    /// equivalent for a `Box<dyn FnMut()>` moved fresh into every call, so
    /// callers that want re-queuing to dedup (rather than double-run) pass
    /// the same `key` every time they schedule the same logical job.
    /// `None` means "never dedup this job" (e.g. one-shot jobs).
    pub key: Option<u64>,
    active: bool,
    uid: u64,
    task: Box<dyn FnMut() + 'static>,
}

impl Job {
    pub fn new(task: impl FnMut() + 'static) -> Self {
        Self {
            id: None,
            pre: false,
            allow_recurse: false,
            key: None,
            active: true,
            uid: 0,
            task: Box::new(task),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn pre(mut self) -> Self {
        self.pre = true;
        self
    }

    pub fn allow_recurse(mut self) -> Self {
        self.allow_recurse = true;
        self
    }

    pub fn with_key(mut self, key: u64) -> Self {
        self.key = Some(key);
        self
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("pre", &self.pre)
            .field("allow_recurse", &self.allow_recurse)
            .field("active", &self.active)
            .field("uid", &self.uid)
            .finish()
    }
}

/// Opaque handle returned by [`Scheduler::queue_job`], usable with
/// [`Scheduler::invalidate_job`] to cancel a job before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobHandle(u64);

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("job recursion limit ({limit}) exceeded; skipping further runs in this flush")]
    RecursionLimitExceeded { limit: u32 },
}

const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// Sort key: ascending by id (jobs with no id sort last, in enqueue order),
/// then pre-jobs before non-pre jobs at the same id.
fn sort_key(job: &Job) -> (i64, u8) {
    let id = job.id.map(i64::from).unwrap_or(i64::MAX);
    let pre_rank = if job.pre { 0 } else { 1 };
    (id, pre_rank)
}

pub struct Scheduler {
    queue: Vec<Job>,
    flushing: bool,
    flush_index: usize,
    pending_post: Vec<Job>,
    active_post: Vec<Job>,
    post_flush_index: usize,
    next_uid: u64,
    recursion_counts: FxHashMap<u64, u32>,
    recursion_limit: u32,
    pub warnings: Vec<SchedulerError>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            flushing: false,
            flush_index: 0,
            pending_post: Vec::new(),
            active_post: Vec::new(),
            post_flush_index: 0,
            next_uid: 1,
            recursion_counts: FxHashMap::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            warnings: Vec::new(),
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Insert `job` into the sorted queue. While a flush is in progress,
    /// jobs are inserted after the job currently running (`flush_index`) so
    /// a job re-queuing itself doesn't get skipped by the scan that already
    /// passed its slot, and so it doesn't re-run jobs already flushed.
    ///
    /// If `job.key` is set and a job with the same key is already present in
    /// `queue[search_from..]`, the new job is dropped and the existing job's
    /// handle is returned instead -- this is the dedup half of the spec's
    /// `queueJob` contract (a job may not be queued twice within the window
    /// it could still run this flush, unless it re-queues itself via
    /// `allow_recurse`, in which case `search_from` already starts past the
    /// running job so the re-queue is accepted).
    pub fn queue_job(&mut self, mut job: Job) -> JobHandle {
        let search_from = if self.flushing { self.flush_index + 1 } else { 0 };

        if let Some(key) = job.key {
            if let Some(existing) = self.queue[search_from..]
                .iter()
                .find(|existing| existing.key == Some(key))
            {
                return JobHandle(existing.uid);
            }
        }

        let uid = self.next_uid;
        self.next_uid += 1;
        job.uid = uid;

        let sk = sort_key(&job);
        let insert_at = search_from
            + self.queue[search_from..].partition_point(|existing| sort_key(existing) <= sk);
        self.queue.insert(insert_at, job);
        JobHandle(uid)
    }

    /// Queue a callback to run once after the current (or next) flush has
    /// finished running every pre/normal job. Deduplicated by `job.key`
    /// against the pending batch, mirroring `queue_job`'s dedup contract.
    pub fn queue_post_flush_cb(&mut self, task: impl FnMut() + 'static) -> JobHandle {
        self.queue_post_flush_cb_job(Job::new(task))
    }

    pub fn queue_post_flush_cb_job(&mut self, mut job: Job) -> JobHandle {
        if let Some(key) = job.key {
            if let Some(existing) = self
                .pending_post
                .iter()
                .find(|existing| existing.key == Some(key))
            {
                return JobHandle(existing.uid);
            }
        }

        let uid = self.next_uid;
        self.next_uid += 1;
        job.uid = uid;
        self.pending_post.push(job);
        JobHandle(uid)
    }

    /// Deactivate a queued job so it is skipped when the scan reaches it.
    /// No-op if the handle has already run or was never queued.
    pub fn invalidate_job(&mut self, handle: JobHandle) {
        for job in self.queue.iter_mut().chain(self.pending_post.iter_mut()) {
            if job.uid == handle.0 {
                job.active = false;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.pending_post.is_empty()
    }

    /// Run every queued job to completion, then every post-flush callback,
    /// draining jobs newly queued by either phase until both are empty.
    pub fn flush_jobs(&mut self) {
        self.flushing = true;
        self.flush_index = 0;

        while self.flush_index < self.queue.len() {
            let idx = self.flush_index;
            let (active, uid, allow_recurse) = {
                let job = &self.queue[idx];
                (job.active, job.uid, job.allow_recurse)
            };
            if active && self.check_recursion(uid) {
                (self.queue[idx].task)();
                if !allow_recurse {
                    self.recursion_counts.remove(&uid);
                }
            }
            self.flush_index += 1;
        }

        self.queue.clear();
        self.flush_index = 0;
        self.flushing = false;
        self.recursion_counts.clear();

        self.flush_post_flush_cbs();
    }

    fn flush_post_flush_cbs(&mut self) {
        if self.pending_post.is_empty() {
            return;
        }

        std::mem::swap(&mut self.active_post, &mut self.pending_post);
        self.active_post
            .sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        self.pending_post.clear();
        self.post_flush_index = 0;

        while self.post_flush_index < self.active_post.len() {
            let job = &mut self.active_post[self.post_flush_index];
            if job.active {
                (job.task)();
            }
            self.post_flush_index += 1;
        }

        self.active_post.clear();
        self.post_flush_index = 0;

        if !self.pending_post.is_empty() {
            self.flush_post_flush_cbs();
        }
    }

    fn check_recursion(&mut self, uid: u64) -> bool {
        let count = self.recursion_counts.entry(uid).or_insert(0);
        *count += 1;
        if *count > self.recursion_limit {
            tracing::warn!(job_uid = uid, limit = self.recursion_limit, "job recursion limit exceeded, skipping further runs this flush");
            self.warnings.push(SchedulerError::RecursionLimitExceeded {
                limit: self.recursion_limit,
            });
            false
        } else {
            true
        }
    }
}
