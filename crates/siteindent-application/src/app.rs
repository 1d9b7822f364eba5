//! Wiring of the client components.

use crate::navigator::Navigator;
use crate::orders::OrderWorkflow;
use crate::search::DebouncedSearch;
use crate::session_manager::SessionManager;
use crate::workflow::IndentWorkflow;
use siteindent_core::Result;
use siteindent_core::auth::NavigationPolicy;
use siteindent_core::config::ClientConfig;
use siteindent_core::session::{SessionContext, SessionStore};
use siteindent_interaction::{ApiClient, HttpTransport, SiteIndentApi};
use std::sync::Arc;
use std::time::Duration;

/// Every component of the client, sharing one session context.
pub struct SiteIndentApp {
    pub config: ClientConfig,
    pub context: SessionContext,
    pub api: Arc<SiteIndentApi>,
    pub sessions: Arc<SessionManager>,
    pub indents: IndentWorkflow,
    pub orders: OrderWorkflow,
    pub search: DebouncedSearch,
}

impl SiteIndentApp {
    /// Builds the client over HTTP.
    pub fn from_config(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let context = SessionContext::new();
        let client = ApiClient::from_config(&config, context.clone())?;
        Ok(Self::assemble(config, store, client))
    }

    /// Builds the client over an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let client = ApiClient::new(transport, SessionContext::new());
        Self::assemble(config, store, client)
    }

    fn assemble(config: ClientConfig, store: Arc<dyn SessionStore>, client: ApiClient) -> Self {
        let context = client.session().clone();
        let api = Arc::new(SiteIndentApi::new(client));
        let sessions = Arc::new(SessionManager::new(api.clone(), store, context.clone()));
        let indents = IndentWorkflow::new(
            sessions.clone(),
            api.clone(),
            api.clone(),
            api.clone(),
            api.clone(),
        );
        let orders = OrderWorkflow::new(sessions.clone(), api.clone());
        let search = DebouncedSearch::new(
            api.clone(),
            Duration::from_millis(config.search_debounce_ms),
            config.min_search_chars,
        );

        Self {
            config,
            context,
            api,
            sessions,
            indents,
            orders,
            search,
        }
    }

    pub fn navigation_policy(&self) -> NavigationPolicy {
        NavigationPolicy::with_standard_rules(
            self.config.login_route.clone(),
            self.config.landing_route.clone(),
        )
    }

    /// A navigator on `initial_route`, bound to this client's session.
    pub fn navigator(&self, initial_route: &str) -> Navigator {
        Navigator::new(self.navigation_policy(), self.context.clone(), initial_route)
    }
}
