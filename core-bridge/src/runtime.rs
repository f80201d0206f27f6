//! # Bridge Runtime
//!
//! Assembles every component from a [`BridgeConfig`] and owns the channel
//! subscriptions.
//!
//! ```ignore
//! let runtime = BridgeRuntime::new(config);
//! runtime.attach(&[window_channel, document_channel])?;
//!
//! if let Some(snapshot) = runtime.bridge().sync_on_startup().await {
//!     app.apply(snapshot);
//! }
//! ```

use bridge_traits::{ChannelSubscription, InboundChannel, InboundSink};
use core_runtime::BridgeConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::bridge::NativeBridge;
use crate::dispatcher::MessageDispatcher;
use crate::error::Result;
use crate::fallback::FallbackStrategies;
use crate::id::RequestIdGenerator;
use crate::navigation::{BackAction, BackNavigator};
use crate::registry::CorrelationRegistry;
use crate::theme::ThemeState;
use crate::transport::TransportAdapter;

pub struct BridgeRuntime {
    bridge: Arc<NativeBridge>,
    navigator: Arc<BackNavigator>,
    theme: Arc<ThemeState>,
    dispatcher: Arc<MessageDispatcher>,
    subscriptions: Mutex<Vec<ChannelSubscription>>,
}

impl BridgeRuntime {
    pub fn new(config: BridgeConfig) -> Self {
        let registry = Arc::new(CorrelationRegistry::new());

        let bridge = Arc::new(NativeBridge::new(
            TransportAdapter::new(config.transport, Arc::clone(&config.environment)),
            Arc::clone(&registry),
            RequestIdGenerator::new(config.clock),
            FallbackStrategies::new(config.fallback, config.options.download_mime_type),
        ));
        let navigator = Arc::new(BackNavigator::new(config.screens, Arc::clone(&bridge)));
        let theme = Arc::new(ThemeState::new(config.environment));
        let dispatcher = Arc::new(MessageDispatcher::new(
            registry,
            Arc::clone(&navigator),
            Arc::clone(&theme),
            config.options.dedup_window,
        ));

        Self {
            bridge,
            navigator,
            theme,
            dispatcher,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    fn subscriptions(&self) -> MutexGuard<'_, Vec<ChannelSubscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe the dispatcher to each channel.
    ///
    /// Replaces any earlier subscriptions. On error, channels subscribed
    /// before the failing one stay attached.
    pub fn attach(&self, channels: &[Arc<dyn InboundChannel>]) -> Result<()> {
        self.detach();

        let sink: Arc<dyn InboundSink> = self.dispatcher.clone();
        for channel in channels {
            let subscription = channel.subscribe(Arc::clone(&sink))?;
            info!(channel = subscription.channel(), "Listening for host messages");
            self.subscriptions().push(subscription);
        }
        Ok(())
    }

    /// Drop every channel subscription.
    pub fn detach(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions());
        for subscription in subscriptions {
            subscription.detach();
        }
    }

    pub fn attached_channels(&self) -> Vec<&'static str> {
        self.subscriptions()
            .iter()
            .map(ChannelSubscription::channel)
            .collect()
    }

    pub fn bridge(&self) -> &Arc<NativeBridge> {
        &self.bridge
    }

    pub fn dispatcher(&self) -> &Arc<MessageDispatcher> {
        &self.dispatcher
    }

    pub fn theme(&self) -> &Arc<ThemeState> {
        &self.theme
    }

    pub fn handle_back(&self) -> BackAction {
        self.navigator.handle_back()
    }
}

impl Drop for BridgeRuntime {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for BridgeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeRuntime")
            .field("bridge", &self.bridge)
            .field("channels", &self.attached_channels())
            .finish_non_exhaustive()
    }
}
