use std::collections::HashMap;

use hf_provider_core::host::AdminHost;

use super::{
    MANAGE_CAPABILITY, NONCE_QUERY_ARG, REFRESH_NONCE_ACTION, REFRESH_QUERY_ARG, settings_page_url,
};
use crate::catalog::ModelCatalog;

/// Result of running the refresh action for an admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Not a refresh request, or the request was not authorised.
    Ignored,
    /// Cache dropped; send the user back to the settings page.
    Redirect(String),
}

/// Drop the cached catalog when the request asks for it.
///
/// The action runs only when the refresh query arg is present, the user has
/// the manage capability and the nonce verifies. Anything else is ignored
/// without touching the cache.
pub fn handle_refresh(
    query: &HashMap<String, String>,
    host: &dyn AdminHost,
    catalog: &ModelCatalog,
) -> RefreshOutcome {
    if !query.contains_key(REFRESH_QUERY_ARG) {
        return RefreshOutcome::Ignored;
    }

    if !host.current_user_can(MANAGE_CAPABILITY) {
        tracing::debug!("refresh requested without capability");
        return RefreshOutcome::Ignored;
    }

    let nonce = query.get(NONCE_QUERY_ARG).map(String::as_str).unwrap_or_default();
    if !host.verify_nonce(nonce, REFRESH_NONCE_ACTION) {
        tracing::warn!("refresh requested with an invalid nonce");
        return RefreshOutcome::Ignored;
    }

    catalog.invalidate();
    RefreshOutcome::Redirect(settings_page_url(host))
}
