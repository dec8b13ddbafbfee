//! Parse request handling for the sidebar relay
//!
//! Wraps `ParseRequestRouter` in the `{ ok, data, error }` envelope the
//! content script answers with. When a request carries no URL, the current
//! tab URL is asked from a `TabUrlProvider`.

use crate::domain::profile::NormalizedRecord;
use crate::infrastructure::document::PageDocument;
use crate::infrastructure::parsing::{ParseRequestRouter, ParsingError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Active tab as reported by the tab-management side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub url: Option<String>,
    pub tab_id: Option<u32>,
}

/// Answers "which URL is the active tab showing"
#[async_trait]
pub trait TabUrlProvider: Send + Sync {
    async fn current_tab(&self) -> TabInfo;
}

/// Provider that always reports the same tab
#[derive(Debug, Clone, Default)]
pub struct FixedTab(pub TabInfo);

impl FixedTab {
    pub fn url(url: impl Into<String>) -> Self {
        Self(TabInfo {
            url: Some(url.into()),
            tab_id: None,
        })
    }
}

#[async_trait]
impl TabUrlProvider for FixedTab {
    async fn current_tab(&self) -> TabInfo {
        self.0.clone()
    }
}

/// "Extract page data" request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Explicit URL override; the active tab URL is used when absent
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub kind: String,
    pub message: String,
}

impl From<&ParsingError> for ParseFailure {
    fn from(error: &ParsingError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Response envelope; `data` is only present when `ok`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub ok: bool,
    pub data: Option<NormalizedRecord>,
    pub error: Option<ParseFailure>,
}

impl ParseResponse {
    pub const fn success(record: NormalizedRecord) -> Self {
        Self {
            ok: true,
            data: Some(record),
            error: None,
        }
    }

    pub fn failure(error: &ParsingError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

pub struct ParseRequestHandler<P> {
    router: ParseRequestRouter,
    tabs: P,
}

impl<P: TabUrlProvider> ParseRequestHandler<P> {
    pub const fn new(router: ParseRequestRouter, tabs: P) -> Self {
        Self { router, tabs }
    }

    pub const fn router(&self) -> &ParseRequestRouter {
        &self.router
    }

    /// Resolve the URL, route, and wrap the outcome
    pub async fn handle(
        &self,
        document: &dyn PageDocument,
        request: &ParseRequest,
        cancel: &CancellationToken,
    ) -> ParseResponse {
        let url = match &request.url {
            Some(url) => Some(url.clone()),
            None => self.tabs.current_tab().await.url,
        };

        match self
            .router
            .parse_current_page(document, url.as_deref(), cancel)
            .await
        {
            Ok(record) => ParseResponse::success(record),
            Err(e) if e.is_benign() => {
                info!("Nothing to extract: {}", e);
                ParseResponse::failure(&e)
            }
            Err(e) => {
                warn!("Parse request failed: {}", e);
                ParseResponse::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::document::LiveDocument;

    #[tokio::test]
    async fn test_tab_url_is_used_without_override() {
        let handler =
            ParseRequestHandler::new(ParseRequestRouter::default(), FixedTab::url("https://x.com/jdoe"));
        let doc = LiveDocument::new(None, "<main></main>");

        let response = handler
            .handle(&doc, &ParseRequest::default(), &CancellationToken::new())
            .await;

        assert!(response.ok);
        let data = response.data.unwrap();
        assert_eq!(data.handle.as_deref(), Some("jdoe"));
    }

    #[tokio::test]
    async fn test_no_url_anywhere_is_no_parser() {
        let handler = ParseRequestHandler::new(ParseRequestRouter::default(), FixedTab::default());
        let doc = LiveDocument::new(None, "<main></main>");

        let response = handler
            .handle(&doc, &ParseRequest::default(), &CancellationToken::new())
            .await;

        assert!(!response.ok);
        assert!(response.data.is_none());
        assert_eq!(response.error.unwrap().kind, "no_parser");
    }

    #[test]
    fn test_response_json_shape() {
        let response = ParseResponse::failure(&ParsingError::timeout("h1", 15000));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["kind"], "timeout");
    }
}
