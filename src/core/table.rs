// SysBridge - core/table.rs
//
// The callback table: which service implementations are installed.
//
// Every slot is optional. An empty table (the `Default`) means "use the
// platform default for everything". Tables are immutable once built; the
// facade swaps whole tables rather than mutating slots in place, so a
// caller never observes a half-updated table.

use crate::core::model::SensorReading;
use crate::core::services::{Clock, LogSink, SensorSource, UserDirProvider};
use crate::util::error::SensorError;
use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Log callback taking the installed user context.
pub type LogFn<C> = fn(&C, &str);

/// User-directory callback taking the installed user context.
pub type UserDirFn<C> = fn(&C) -> PathBuf;

/// Sensor callback taking the installed user context.
pub type SensorsFn<C> = fn(&C, bool) -> Result<Option<SensorReading>, SensorError>;

/// Set of installed service implementations.
#[derive(Clone, Default)]
pub struct CallbackTable {
    /// Opaque host value shared by the context-bound callbacks.
    context: Option<Arc<dyn Any + Send + Sync>>,
    pub log: Option<Arc<dyn LogSink>>,
    pub clock: Option<Arc<dyn Clock>>,
    pub user_dir: Option<Arc<dyn UserDirProvider>>,
    pub sensors: Option<Arc<dyn SensorSource>>,
}

impl CallbackTable {
    /// Table with no callbacks installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from plain function pointers that all receive the same
    /// host context.
    ///
    /// The context is only stored and handed back to the callbacks; it is
    /// never inspected. Dropping the last table referencing it drops it.
    pub fn with_context<C>(
        user: Arc<C>,
        log: Option<LogFn<C>>,
        user_dir: Option<UserDirFn<C>>,
        sensors: Option<SensorsFn<C>>,
    ) -> Self
    where
        C: Send + Sync + 'static,
    {
        let log = log.map(|f| {
            let user = Arc::clone(&user);
            Arc::new(move |msg: &str| f(&user, msg)) as Arc<dyn LogSink>
        });
        let user_dir = user_dir.map(|f| {
            let user = Arc::clone(&user);
            Arc::new(move || f(&user)) as Arc<dyn UserDirProvider>
        });
        let sensors = sensors.map(|f| {
            let user = Arc::clone(&user);
            Arc::new(move |enable: bool| f(&user, enable)) as Arc<dyn SensorSource>
        });

        Self {
            context: Some(user as Arc<dyn Any + Send + Sync>),
            log,
            clock: None,
            user_dir,
            sensors,
        }
    }

    pub fn with_log(mut self, sink: impl LogSink + 'static) -> Self {
        self.log = Some(Arc::new(sink));
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_user_dir(mut self, provider: impl UserDirProvider + 'static) -> Self {
        self.user_dir = Some(Arc::new(provider));
        self
    }

    pub fn with_sensors(mut self, source: impl SensorSource + 'static) -> Self {
        self.sensors = Some(Arc::new(source));
        self
    }

    /// The host context installed with [`CallbackTable::with_context`], if
    /// it has type `C`.
    pub fn context<C>(&self) -> Option<Arc<C>>
    where
        C: Send + Sync + 'static,
    {
        self.context.clone()?.downcast::<C>().ok()
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.log.is_none()
            && self.clock.is_none()
            && self.user_dir.is_none()
            && self.sensors.is_none()
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTable")
            .field("context", &self.context.is_some())
            .field("log", &self.log.is_some())
            .field("clock", &self.clock.is_some())
            .field("user_dir", &self.user_dir.is_some())
            .field("sensors", &self.sensors.is_some())
            .finish()
    }
}
