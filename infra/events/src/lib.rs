//! # Hook Bus
//!
//! An in-process, type-safe event bus for lifecycle hooks.
//!
//! ## Overview
//!
//! Subscribers are registered per event type and receive a mutable request
//! *scope* alongside the event (for example the pending writes of one
//! transaction). [`EventBus::dispatch`] awaits every subscriber inline, in
//! registration order, so side effects land in the same unit of work as the
//! write that triggered them. The first failing subscriber aborts the dispatch
//! and its error is returned to the caller.
//!
//! ## Features
//!
//! * **Type-Safe**: Events are identified by their Rust type.
//! * **Synchronous**: No channels, queues or background tasks.
//! * **Cheap to share**: `FxHashMap` + `parking_lot::RwLock` behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use lyceum_event_bus::{BoxError, BoxFuture, EventBus, EventBusError, Handler};
//!
//! struct SectionChanged { student: u64 }
//!
//! struct CountMoves;
//!
//! impl Handler<SectionChanged, u32> for CountMoves {
//!     fn handle<'a>(&'a self, _: &'a SectionChanged, moves: &'a mut u32) -> BoxFuture<'a, Result<(), BoxError>> {
//!         Box::pin(async move {
//!             *moves += 1;
//!             Ok(())
//!         })
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus: EventBus<u32> = EventBus::new();
//!     bus.subscribe::<SectionChanged, _>(CountMoves);
//!
//!     let mut moves = 0;
//!     let ran = bus.dispatch(&SectionChanged { student: 42 }, &mut moves).await?;
//!     assert_eq!((ran, moves), (1, 1));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;

pub use bus::{BoxError, BoxFuture, Event, EventBus, Handler};
pub use error::{EventBusError, EventBusErrorExt};
