//! Blocking one-shot futures: start a computation on its own thread,
//! collect its results later with a single blocking wait.
//!
//! Three flavors share one lifecycle (spawn, background run, one-shot
//! delivery, memoized wait) and differ in how result types are known:
//!
//! - [`pair::Future`] and [`triple::Future`] fix the result arity at
//!   compile time, each slot keeping its own concrete type.
//! - [`poly::Future`] defers arity and types to runtime, distributing
//!   boxed values into caller-supplied slots and reading the final
//!   position as an optional failure.
//!
//! ```
//! use future_out::pair::Future;
//!
//! let mut fut = Future::spawn(|| ("hello".to_string(), 3));
//! let (greeting, count) = fut.wait();
//! assert_eq!(greeting, "hello");
//! assert_eq!(*count, 3);
//! ```

use std::sync::Arc;

pub mod pair;
pub mod poly;
pub mod triple;

/// A failure reported by a computation. Shared, so a cached result can
/// surface the same failure on every wait.
pub type Fault = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// What went wrong while waiting on a [`poly::Future`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The computation flagged a failure in its final return position.
    #[error(transparent)]
    Failed(Fault),
    /// The computation panicked before delivering its values.
    #[error("computation panicked before delivering its result")]
    Panicked,
}
