use std::panic::resume_unwind;
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

/// A two-value future: [`spawn`](Future::spawn) starts the computation
/// on its own thread, [`wait`](Future::wait) blocks until the pair
/// arrives and caches it for every later call.
///
/// # Examples
///
/// ```
/// use future_out::pair::Future;
/// use std::{thread, time::Duration};
///
/// let mut fut = Future::spawn(|| {
///     thread::sleep(Duration::from_millis(10));
///     ("hello, you".to_string(), None::<String>)
/// });
/// let (greeting, err) = fut.wait();
/// assert_eq!(greeting, "hello, you");
/// assert!(err.is_none());
/// ```
#[derive(Debug)]
pub struct Future<T, K> {
    rx: Receiver<(T, K)>,
    worker: Option<JoinHandle<()>>,
    done: Option<(T, K)>,
}

impl<T, K> Future<T, K> {
    /// Starts `f` on a new thread immediately and returns the handle
    /// without waiting for it to finish.
    ///
    /// The pair travels through a single-slot channel, so the worker
    /// exits even if this future is dropped without ever being waited
    /// on.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> (T, K) + Send + 'static,
        T: Send + 'static,
        K: Send + 'static,
    {
        let (tx, rx) = sync_channel(1);
        let worker = thread::spawn(move || {
            // The receiver may already be gone; nothing left to report.
            let _ = tx.send(f());
        });
        Future {
            rx,
            worker: Some(worker),
            done: None,
        }
    }

    /// Blocks until the computation delivers its pair, then returns
    /// both values in declaration order.
    ///
    /// Only the first call blocks; later calls return the cached pair
    /// immediately and nothing runs twice. If the computation
    /// panicked, the panic is raised again here.
    ///
    /// ```
    /// use future_out::pair::Future;
    ///
    /// let mut fut = Future::spawn(|| ("🍓".to_string(), 1));
    /// let first = fut.wait().0.clone();
    /// let second = fut.wait().0.clone();
    /// assert_eq!(first, second);
    /// ```
    pub fn wait(&mut self) -> (&T, &K) {
        if self.done.is_none() {
            self.done = Some(self.recv());
        }
        let r = self.done.as_ref().expect("delivered above");
        (&r.0, &r.1)
    }

    /// Consuming variant of [`wait`](Future::wait): returns the pair
    /// by value.
    pub fn join(mut self) -> (T, K) {
        self.wait();
        self.done.take().expect("delivered by wait")
    }

    fn recv(&mut self) -> (T, K) {
        match self.rx.recv() {
            Ok(r) => r,
            // The sender only disappears without sending when `f`
            // panicked; forward that panic to our caller.
            Err(_) => {
                let worker = self.worker.take().expect("waited again after a panic");
                match worker.join() {
                    Err(payload) => resume_unwind(payload),
                    Ok(()) => unreachable!("worker exited without sending or panicking"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Future;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn wait_returns_both_values_in_order() {
        let mut fut = Future::spawn(|| (1u8, "one"));
        assert_eq!(fut.wait(), (&1u8, &"one"));
    }

    #[test]
    fn wait_twice_returns_the_cached_pair() {
        let mut fut = Future::spawn(|| ("🍓".to_string(), 42));
        let first = {
            let (s, n) = fut.wait();
            (s.clone(), *n)
        };
        let second = {
            let (s, n) = fut.wait();
            (s.clone(), *n)
        };
        assert_eq!(first, second);
    }

    #[test]
    fn join_returns_owned_values() {
        let fut = Future::spawn(|| (vec![1, 2, 3], "done".to_string()));
        let (v, s) = fut.join();
        assert_eq!(v, vec![1, 2, 3]);
        assert_eq!(s, "done");
    }

    #[test]
    fn worker_panic_is_raised_at_the_wait_site() {
        let mut fut: Future<u8, u8> = Future::spawn(|| panic!("boom"));
        let caught = catch_unwind(AssertUnwindSafe(|| {
            fut.wait();
        }));
        let payload = caught.expect_err("panic should reach the waiter");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    }

    #[test]
    fn dropping_without_waiting_does_not_hang() {
        drop(Future::spawn(|| ((), ())));
    }
}
