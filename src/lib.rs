#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Values computed on first access and cached afterwards.
//!
//! [`LazyValue`] is the contract every strategy implements.
//! [`Eager`] holds a value that is already known, [`Deferred`] runs a
//! producer once on first access, and [`TryDeferred`] does the same for
//! producers that may fail. [`Shared`] lets several owners read one
//! instance, so its producer runs once for all of them.
//!
//! None of these types synchronize: concurrent evaluation needs
//! external locking.

pub use deferred::{Deferred, Producer, TryDeferred};
pub use eager::Eager;
pub use err::{LResult, LazyErr};
pub use lazy::LazyValue;
pub use shared::Shared;

pub mod deferred;
pub mod eager;
pub mod err;
pub mod lazy;
pub mod shared;
