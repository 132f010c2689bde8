use crate::error::{EventBusError, EventBusErrorExt};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, trace};

/// Boxed error returned by hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed, `Send` future returned by hooks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Marker trait for types that can be dispatched on the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// A subscriber for events of type `E`.
///
/// `S` is the request scope handed to every subscriber of one dispatch, e.g. the
/// pending writes of a transaction. Hooks run inline, one after the other, and
/// the first failure aborts the dispatch.
pub trait Handler<E: Event, S>: Send + Sync + 'static {
    /// Reacts to `event`, recording side effects in `scope`.
    fn handle<'a>(&'a self, event: &'a E, scope: &'a mut S) -> BoxFuture<'a, Result<(), BoxError>>;
}

trait ErasedHandler<S>: Send + Sync {
    fn name(&self) -> &'static str;

    fn call<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
        scope: &'a mut S,
    ) -> BoxFuture<'a, Result<(), EventBusError>>;
}

struct Typed<E, H> {
    handler: H,
    _event: PhantomData<fn(&E)>,
}

impl<E, S, H> ErasedHandler<S> for Typed<E, H>
where
    E: Event,
    S: Send,
    H: Handler<E, S>,
{
    fn name(&self) -> &'static str {
        std::any::type_name::<H>()
    }

    fn call<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
        scope: &'a mut S,
    ) -> BoxFuture<'a, Result<(), EventBusError>> {
        let Some(event) = event.downcast_ref::<E>() else {
            return Box::pin(std::future::ready(Err(EventBusError::TypeMismatch {
                message: std::any::type_name::<E>().into(),
                context: Some(self.name().into()),
            })));
        };

        Box::pin(async move { self.handler.handle(event, scope).await.context(self.name()) })
    }
}

type HandlerList<S> = Vec<Arc<dyn ErasedHandler<S>>>;

/// A thread-safe hook bus with synchronous dispatch.
///
/// Handlers are indexed by the [`TypeId`] of the event and run in registration
/// order. There are no queues: [`EventBus::dispatch`] completes only after every
/// handler has finished, so subscribers share the caller's transaction.
pub struct EventBus<S> {
    handlers: Arc<RwLock<FxHashMap<TypeId, HandlerList<S>>>>,
}

impl<S> Clone for EventBus<S> {
    fn clone(&self) -> Self {
        Self { handlers: Arc::clone(&self.handlers) }
    }
}

impl<S> Default for EventBus<S> {
    fn default() -> Self {
        Self { handlers: Arc::new(RwLock::new(FxHashMap::default())) }
    }
}

impl<S> fmt::Debug for EventBus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        f.debug_struct("EventBus")
            .field("event_types", &handlers.len())
            .field("handlers", &handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl<S: Send + 'static> EventBus<S> {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of type `E`.
    ///
    /// # Examples
    /// ```rust
    /// use lyceum_event_bus::{BoxError, BoxFuture, EventBus, Handler};
    ///
    /// struct StudentCreated(&'static str);
    /// struct Welcome;
    ///
    /// impl Handler<StudentCreated, Vec<String>> for Welcome {
    ///     fn handle<'a>(
    ///         &'a self,
    ///         event: &'a StudentCreated,
    ///         scope: &'a mut Vec<String>,
    ///     ) -> BoxFuture<'a, Result<(), BoxError>> {
    ///         Box::pin(async move {
    ///             scope.push(format!("welcome {}", event.0));
    ///             Ok(())
    ///         })
    ///     }
    /// }
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), lyceum_event_bus::EventBusError> {
    /// let bus: EventBus<Vec<String>> = EventBus::new();
    /// bus.subscribe::<StudentCreated, _>(Welcome);
    ///
    /// let mut outbox = Vec::new();
    /// bus.dispatch(&StudentCreated("ada"), &mut outbox).await?;
    /// assert_eq!(outbox, ["welcome ada"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<E, H>(&self, handler: H)
    where
        E: Event,
        H: Handler<E, S>,
    {
        let erased: Arc<dyn ErasedHandler<S>> =
            Arc::new(Typed::<E, H> { handler, _event: PhantomData });
        trace!(event = std::any::type_name::<E>(), handler = erased.name(), "Registering hook");
        self.handlers.write().entry(TypeId::of::<E>()).or_default().push(erased);
    }

    /// Number of handlers registered for `E`.
    #[must_use]
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.handlers.read().get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }

    /// Runs every handler registered for `E`, in order, against the same `scope`.
    ///
    /// Returns the number of handlers that ran. An event nobody listens to is
    /// not an error.
    ///
    /// # Errors
    /// Returns [`EventBusError::Handler`] with the first failing handler's error;
    /// handlers after it are not run.
    pub async fn dispatch<E: Event>(&self, event: &E, scope: &mut S) -> Result<usize, EventBusError> {
        // Snapshot so handlers can subscribe without deadlocking on the registry.
        let handlers: HandlerList<S> =
            self.handlers.read().get(&TypeId::of::<E>()).cloned().unwrap_or_default();

        if handlers.is_empty() {
            trace!(event = std::any::type_name::<E>(), "Event dropped: no hooks registered");
            return Ok(0);
        }

        for handler in &handlers {
            trace!(event = std::any::type_name::<E>(), handler = handler.name(), "Running hook");
            if let Err(err) = handler.call(event, scope).await {
                debug!(
                    event = std::any::type_name::<E>(),
                    handler = handler.name(),
                    error = %err,
                    "Hook failed, aborting dispatch"
                );
                return Err(err);
            }
        }

        trace!(event = std::any::type_name::<E>(), count = handlers.len(), "Event dispatched");
        Ok(handlers.len())
    }

    /// Drops every registered handler.
    ///
    /// Returns the number of event types that had handlers.
    #[must_use]
    pub fn clear(&self) -> usize {
        let mut handlers = self.handlers.write();
        let count = handlers.len();
        handlers.clear();
        count
    }
}
