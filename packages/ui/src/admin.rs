//! Console-wide context: configuration, REST client and notification log.

use api::ApiClient;
use dioxus::prelude::*;
use store::AdminConfig;

use crate::notifications::NotificationLog;

#[derive(Clone, Debug)]
pub struct AdminContext {
    pub config: AdminConfig,
    pub api: ApiClient,
}

/// Get the console context provided by [`AdminProvider`].
pub fn use_admin() -> AdminContext {
    use_context::<AdminContext>()
}

/// Provider component for the console context and the notification log.
/// Wrap the router with this component.
#[component]
pub fn AdminProvider(config: AdminConfig, children: Element) -> Element {
    use_context_provider(|| {
        tracing::info!(base_url = %config.api.base_url, policy = ?config.mutations.policy, "admin console starting");
        AdminContext {
            api: ApiClient::from_config(&config.api),
            config: config.clone(),
        }
    });
    use_context_provider(|| Signal::new(NotificationLog::default()));

    rsx! { {children} }
}
