//! Application state shared across handlers.

use std::sync::Arc;

use openrad_client::fetch::QueryCache;
use openrad_client::ipinfo::{IpInfoClient, IpInfoError};
use openrad_client::session::RequestSession;
use openrad_client::viewer::ViewerUrlBuilder;
use openrad_client::{ApiClient, Session};
use openrad_core::{Envelope, Organization};

use crate::config::PortalConfig;
use crate::error::Result;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the base API client, the viewer URL builder, and the
/// cross-request organization cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    /// Anonymous base client; per-request clients are scoped off it.
    api: ApiClient,
    viewer: ViewerUrlBuilder,
    ipinfo: IpInfoClient,
    /// Organization lookups are shared across requests (the viewer embed
    /// needs one per study page) and invalidated when an admin edits the
    /// organization.
    organizations: QueryCache<Envelope<Organization>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP-info client cannot be built from the
    /// configured token.
    pub fn new(config: PortalConfig) -> std::result::Result<Self, IpInfoError> {
        let api = ApiClient::new(
            &config.client,
            Arc::new(RequestSession::anonymous()),
        );
        let viewer = ViewerUrlBuilder::new(config.client.viewer_url.clone());
        let ipinfo = IpInfoClient::new(&config.client)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                viewer,
                ipinfo,
                organizations: QueryCache::new(),
            }),
        })
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get the anonymous base API client (credential exchange only).
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// An API client scoped to the given request's session.
    #[must_use]
    pub fn api_for(&self, session: Session) -> ApiClient {
        self.inner
            .api
            .scoped(Arc::new(RequestSession::new(session)))
    }

    /// Get a reference to the viewer URL builder.
    #[must_use]
    pub fn viewer(&self) -> &ViewerUrlBuilder {
        &self.inner.viewer
    }

    /// Get a reference to the IP-info client.
    #[must_use]
    pub fn ipinfo(&self) -> &IpInfoClient {
        &self.inner.ipinfo
    }

    /// Resolve an organization by ID or name through the shared cache.
    ///
    /// Concurrent lookups for one organization coalesce into a single
    /// backend request.
    ///
    /// # Errors
    ///
    /// Returns the (possibly shared) transport error.
    pub async fn organization(
        &self,
        api: &ApiClient,
        id: &str,
    ) -> Result<Envelope<Organization>> {
        let key = format!("/organizations/{id}");
        Ok(self
            .inner
            .organizations
            .get_or_fetch(&key, api.get_organization(id))
            .await?)
    }

    /// Drop a cached organization after a mutation made it stale.
    pub async fn invalidate_organization(&self, id: &str) {
        let key = format!("/organizations/{id}");
        self.inner.organizations.invalidate(&key).await;
    }
}
