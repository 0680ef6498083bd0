use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size worker pool draining a shared job queue.
///
/// The acceptor enqueues one job per connection; at most `size` run at
/// once, which caps concurrent connections. Dropping the pool lets the
/// workers finish the queued jobs, then joins them.
pub(crate) struct ThreadPool {
    workers: Vec<Option<JoinHandle<()>>>,
    queue: Arc<(Mutex<VecDeque<Job>>, Condvar)>,
    shutdown: Arc<AtomicBool>,
}

impl ThreadPool {
    pub fn new(size: usize) -> Self {
        let queue = Arc::new((Mutex::new(VecDeque::new()), Condvar::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut workers = Vec::with_capacity(size);

        for i in 0..size {
            let queue = Arc::clone(&queue);
            let shutdown = Arc::clone(&shutdown);
            let handle = thread::Builder::new()
                .name(format!("shipmentd worker #{i}"))
                .spawn(move || worker_loop(&queue, &shutdown))
                .expect("failed to spawn worker thread");
            workers.push(Some(handle));
        }

        Self {
            workers,
            queue,
            shutdown,
        }
    }

    pub fn execute(&self, job: impl FnOnce() + Send + 'static) {
        let (jobs, cvar) = &*self.queue;
        jobs.lock().unwrap().push_back(Box::new(job));
        cvar.notify_one();
    }
}

fn worker_loop(queue: &(Mutex<VecDeque<Job>>, Condvar), shutdown: &AtomicBool) {
    let (lock, cvar) = queue;
    loop {
        let job = {
            let mut jobs = lock.lock().unwrap();
            while jobs.is_empty() && !shutdown.load(Ordering::Acquire) {
                jobs = cvar.wait(jobs).unwrap();
            }
            match jobs.pop_front() {
                Some(job) => job,
                // Shutdown requested and the queue is drained.
                None => return,
            }
        };

        job();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        let (_, cvar) = &*self.queue;
        cvar.notify_all();

        for worker in &mut self.workers {
            if let Some(handle) = worker.take() {
                let _ = handle.join();
            }
        }
    }
}
