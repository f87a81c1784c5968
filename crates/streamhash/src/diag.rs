//! Internal logging shims.
//!
//! With the `tracing` feature these forward to `tracing`; without it they
//! expand to nothing, so the hashing core stays dependency-free at runtime.

#[cfg(feature = "tracing")]
macro_rules! trace_event {
  ($($arg:tt)*) => { ::tracing::trace!(target: "streamhash", $($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
  ($($arg:tt)*) => {{}};
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
  ($($arg:tt)*) => { ::tracing::debug!(target: "streamhash", $($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
  ($($arg:tt)*) => {{}};
}
