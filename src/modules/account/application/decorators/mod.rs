pub mod instrumentation;
pub mod logging;

use metrics::Recorder;
use std::sync::Arc;
use tracing::Dispatch;

use crate::modules::account::application::ports::incoming::AccountService;

pub use instrumentation::InstrumentingDecorator;
pub use logging::LoggingDecorator;

/// Which decorators wrap the base service, and what they report into.
/// A decorator is only built when its flag is on and its sink is present.
#[derive(Clone, Default)]
pub struct ChainConfig {
    pub logging: bool,
    pub instrumentation: bool,
    pub dispatch: Option<Dispatch>,
    pub recorder: Option<Arc<dyn Recorder + Send + Sync>>,
}

impl ChainConfig {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_logging(mut self, dispatch: Dispatch) -> Self {
        self.logging = true;
        self.dispatch = Some(dispatch);
        self
    }

    pub fn with_instrumentation(mut self, recorder: Arc<dyn Recorder + Send + Sync>) -> Self {
        self.instrumentation = true;
        self.recorder = Some(recorder);
        self
    }
}

/// Wraps `base` as logging -> instrumentation -> base.
pub fn build_chain(base: Arc<dyn AccountService>, config: ChainConfig) -> Arc<dyn AccountService> {
    let mut service = base;

    if config.instrumentation {
        if let Some(recorder) = config.recorder {
            service = Arc::new(InstrumentingDecorator::new(service, recorder));
        }
    }

    if config.logging {
        if let Some(dispatch) = config.dispatch {
            service = Arc::new(LoggingDecorator::new(service, dispatch));
        }
    }

    service
}
