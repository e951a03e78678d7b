//! Runtime-typed futures for call sites whose result arity is not
//! fixed at compile time.
//!
//! The computation returns a list of boxed values; [`Future::wait`]
//! distributes them positionally into caller-supplied slots and reads
//! the final position as an optional failure. There is no compile-time
//! safety here: arity and slot types are only checked when `wait`
//! runs, and a mismatch panics. Prefer [`pair`](crate::pair) or
//! [`triple`](crate::triple) whenever the signature is known ahead of
//! time.

use std::any::Any;
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::Arc;
use std::thread;

use crate::{Error, Fault};

/// One boxed positional result.
pub type Value = Box<dyn Any + Send>;

/// Boxes one positional result.
pub fn value<T: Send + 'static>(v: T) -> Value {
    Box::new(v)
}

/// Success marker for the final position.
pub fn ok() -> Value {
    Box::new(None::<Fault>)
}

/// Failure marker for the final position.
pub fn fault<E>(err: E) -> Value
where
    E: std::error::Error + Send + Sync + 'static,
{
    Box::new(Some(Arc::new(err) as Fault))
}

/// A destination for one positional value.
///
/// `Option<T>` stores a clone of the value, leaving the future's cache
/// intact for later waits; [`Skip`] discards its position.
pub trait Slot {
    /// Returns `false` when this slot does not accept the value's
    /// runtime type.
    fn fill(&mut self, value: &dyn Any) -> bool;
}

impl<T: Clone + 'static> Slot for Option<T> {
    fn fill(&mut self, value: &dyn Any) -> bool {
        match value.downcast_ref::<T>() {
            Some(v) => {
                *self = Some(v.clone());
                true
            }
            None => false,
        }
    }
}

/// Placeholder slot: accepts any value and drops it.
#[derive(Debug)]
pub struct Skip;

impl Slot for Skip {
    fn fill(&mut self, _: &dyn Any) -> bool {
        true
    }
}

/// A future over a computation whose result list is only known at
/// runtime.
///
/// # Examples
///
/// ```
/// use future_out::poly::{self, Future};
///
/// let mut fut = Future::spawn(|| {
///     vec![poly::value("hello, you".to_string()), poly::ok()]
/// });
///
/// let mut greeting: Option<String> = None;
/// fut.wait(&mut [&mut greeting]).unwrap();
/// assert_eq!(greeting.as_deref(), Some("hello, you"));
/// ```
pub struct Future {
    rx: Receiver<Vec<Value>>,
    done: Option<Vec<Value>>,
}

impl Future {
    /// Starts `f` on a new thread immediately; however many values it
    /// returns travel as one message.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> Vec<Value> + Send + 'static,
    {
        let (tx, rx) = sync_channel(1);
        thread::spawn(move || {
            let _ = tx.send(f());
        });
        Future { rx, done: None }
    }

    /// Blocks until the value list arrives (first call only), writes
    /// each positional value into the matching slot, and reads the
    /// final position as the failure marker.
    ///
    /// Fewer slots than values is fine; trailing values are simply not
    /// distributed. Passing [`Skip`] leaves a position out without
    /// shifting the rest. Distribution happens before the failure
    /// check, so earlier slots are written even when the computation
    /// failed.
    ///
    /// # Errors
    ///
    /// [`Error::Failed`] when the final value is a fault;
    /// [`Error::Panicked`] when the computation died before sending.
    ///
    /// # Panics
    ///
    /// When more slots than values are supplied, when a slot rejects
    /// its value's runtime type, or when the computation returned no
    /// values at all.
    pub fn wait(&mut self, out: &mut [&mut dyn Slot]) -> Result<(), Error> {
        if self.done.is_none() {
            match self.rx.recv() {
                Ok(values) => self.done = Some(values),
                Err(_) => return Err(Error::Panicked),
            }
        }
        let values = self.done.as_ref().expect("delivered above");

        assert!(
            out.len() <= values.len(),
            "{} slots supplied but the computation returned {} values",
            out.len(),
            values.len(),
        );
        for (i, slot) in out.iter_mut().enumerate() {
            assert!(
                slot.fill(values[i].as_ref()),
                "slot {i} does not accept the type of value {i}",
            );
        }

        match values.last() {
            Some(last) => match read_fault(last.as_ref()) {
                Some(fault) => Err(Error::Failed(fault)),
                None => Ok(()),
            },
            None => panic!("computation returned no values"),
        }
    }
}

/// The final position carries `Option<Fault>` (or a bare `Fault`); any
/// other type there means the computation chose not to report failure.
fn read_fault(last: &dyn Any) -> Option<Fault> {
    if let Some(opt) = last.downcast_ref::<Option<Fault>>() {
        return opt.clone();
    }
    last.downcast_ref::<Fault>().cloned()
}
