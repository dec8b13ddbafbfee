//! Request envelope handling with a tab provider that changes between requests

use async_trait::async_trait;
use leedz_ex_lib::application::{
    ContactDraft, ParseRequest, ParseRequestHandler, TabInfo, TabUrlProvider,
};
use leedz_ex_lib::{LiveDocument, ParseRequestRouter};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Hands out queued tab URLs, one per request
struct QueuedTabs(Mutex<Vec<&'static str>>);

#[async_trait]
impl TabUrlProvider for QueuedTabs {
    async fn current_tab(&self) -> TabInfo {
        let url = self.0.lock().unwrap().pop();
        TabInfo {
            url: url.map(str::to_string),
            tab_id: Some(7),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn tab_url_drives_routing_per_request() {
    let tabs = QueuedTabs(Mutex::new(vec![
        "https://x.com/home",
        "https://www.linkedin.com/in/jane-doe",
    ]));
    let handler = ParseRequestHandler::new(ParseRequestRouter::default(), tabs);
    let doc = LiveDocument::new(None, "<main><h1>Jane Doe</h1></main>");
    let cancel = CancellationToken::new();

    let first = handler.handle(&doc, &ParseRequest::default(), &cancel).await;
    assert!(first.ok);
    assert_eq!(
        first.data.as_ref().and_then(|r| r.profile.as_deref()),
        Some("linkedin.com/in/jane-doe")
    );

    let second = handler.handle(&doc, &ParseRequest::default(), &cancel).await;
    assert!(!second.ok);
    assert!(second.data.is_none());
    assert_eq!(second.error.unwrap().kind, "no_parser");
}

#[tokio::test(start_paused = true)]
async fn explicit_url_skips_the_tab_provider() {
    let tabs = QueuedTabs(Mutex::new(Vec::new()));
    let handler = ParseRequestHandler::new(ParseRequestRouter::default(), tabs);
    let doc = LiveDocument::new(
        None,
        r#"<main><div data-testid="UserDescription">Call 555-123-4567 or mail jane@example.org</div></main>"#,
    );
    let request: ParseRequest = serde_json::from_str(r#"{"url":"https://x.com/jdoe"}"#).unwrap();

    let response = handler
        .handle(&doc, &request, &CancellationToken::new())
        .await;
    assert!(response.ok);

    let mut draft = ContactDraft::default();
    draft.merge_page_data(response.data.as_ref().unwrap());
    assert_eq!(draft.on_x.as_deref(), Some("x.com/jdoe"));
    assert_eq!(draft.email.as_deref(), Some("jane@example.org"));
    assert_eq!(draft.phone.as_deref(), Some("555-123-4567"));
    assert_eq!(draft.compose_notes(), "on_x=x.com/jdoe\nphone=555-123-4567");
}
