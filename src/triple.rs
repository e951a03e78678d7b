use std::panic::resume_unwind;
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

/// A three-value future. Same protocol as [`pair::Future`], with one
/// more result slot; the arity is fixed so every slot keeps its own
/// concrete type.
///
/// [`pair::Future`]: crate::pair::Future
#[derive(Debug)]
pub struct Future<T, K, L> {
    rx: Receiver<(T, K, L)>,
    worker: Option<JoinHandle<()>>,
    done: Option<(T, K, L)>,
}

impl<T, K, L> Future<T, K, L> {
    /// Starts `f` on a new thread immediately and returns the handle
    /// without waiting for it to finish.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> (T, K, L) + Send + 'static,
        T: Send + 'static,
        K: Send + 'static,
        L: Send + 'static,
    {
        let (tx, rx) = sync_channel(1);
        let worker = thread::spawn(move || {
            let _ = tx.send(f());
        });
        Future {
            rx,
            worker: Some(worker),
            done: None,
        }
    }

    /// Blocks until the computation delivers its values (first call
    /// only), then returns all three in declaration order.
    pub fn wait(&mut self) -> (&T, &K, &L) {
        if self.done.is_none() {
            self.done = Some(self.recv());
        }
        let r = self.done.as_ref().expect("delivered above");
        (&r.0, &r.1, &r.2)
    }

    /// Consuming variant of [`wait`](Future::wait).
    pub fn join(mut self) -> (T, K, L) {
        self.wait();
        self.done.take().expect("delivered by wait")
    }

    fn recv(&mut self) -> (T, K, L) {
        match self.rx.recv() {
            Ok(r) => r,
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

    #[test]
    fn wait_returns_all_three_values_in_order() {
        let mut fut = Future::spawn(|| (1u8, "two".to_string(), 3.0f64));
        let (a, b, c) = fut.wait();
        assert_eq!(*a, 1);
        assert_eq!(b, "two");
        assert_eq!(*c, 3.0);
    }

    #[test]
    fn wait_twice_returns_the_cached_values() {
        let mut fut = Future::spawn(|| (true, 'x', 9i64));
        let first = {
            let (a, b, c) = fut.wait();
            (*a, *b, *c)
        };
        let second = {
            let (a, b, c) = fut.wait();
            (*a, *b, *c)
        };
        assert_eq!(first, second);
    }

    #[test]
    fn join_returns_owned_values() {
        let fut = Future::spawn(|| ("a".to_string(), vec![1], ()));
        assert_eq!(fut.join(), ("a".to_string(), vec![1], ()));
    }
}
