//! Page document abstraction
//!
//! Parsers never own the page: they read whatever document the caller hands
//! them. `LiveDocument` is a mutable HTML document whose content can change
//! while a parser is waiting for it, the same way a hydrating page does.

use scraper::{Html, Selector};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;
use tracing::trace;

/// Identity of one document instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Read access to a page plus a structural-mutation feed
pub trait PageDocument: Send + Sync {
    fn id(&self) -> DocumentId;

    /// Current location URL, if known
    fn location(&self) -> Option<String>;

    /// Whether any element matches the selector right now
    fn matches(&self, selector: &Selector) -> bool;

    /// Text of the first matching element, whitespace-collapsed and trimmed
    fn first_text(&self, selector: &Selector) -> Option<String>;

    /// Attribute of the first matching element
    fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String>;

    /// Subscribe to mutation batches; the value is a revision counter
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// In-process document backed by an HTML string
#[derive(Debug)]
pub struct LiveDocument {
    id: DocumentId,
    location: RwLock<Option<String>>,
    html: RwLock<String>,
    mutations: watch::Sender<u64>,
}

impl LiveDocument {
    pub fn new(location: Option<&str>, html: impl Into<String>) -> Self {
        let (mutations, _) = watch::channel(0);
        Self {
            id: DocumentId::next(),
            location: RwLock::new(location.map(str::to_string)),
            html: RwLock::new(html.into()),
            mutations,
        }
    }

    /// Empty page at `location`, as seen right after navigation
    pub fn blank(location: &str) -> Self {
        Self::new(Some(location), "<html><head></head><body></body></html>")
    }

    /// Replace the markup and notify observers
    pub fn set_html(&self, html: impl Into<String>) {
        self.write_html(html.into());
        self.mutations.send_modify(|revision| *revision += 1);
        trace!(document = self.id.0, "document mutated");
    }

    /// Replace the markup without a mutation notification
    pub fn set_html_silently(&self, html: impl Into<String>) {
        self.write_html(html.into());
    }

    pub fn set_location(&self, location: Option<&str>) {
        let mut guard = self
            .location
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = location.map(str::to_string);
    }

    pub fn html(&self) -> String {
        self.html
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of live mutation subscriptions
    pub fn observer_count(&self) -> usize {
        self.mutations.receiver_count()
    }

    fn write_html(&self, html: String) {
        let mut guard = self.html.write().unwrap_or_else(PoisonError::into_inner);
        *guard = html;
    }

    fn with_parsed<T>(&self, f: impl FnOnce(&Html) -> T) -> T {
        let source = self.html.read().unwrap_or_else(PoisonError::into_inner);
        let parsed = Html::parse_document(&source);
        f(&parsed)
    }
}

impl PageDocument for LiveDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn location(&self) -> Option<String> {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn matches(&self, selector: &Selector) -> bool {
        self.with_parsed(|html| html.select(selector).next().is_some())
    }

    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.with_parsed(|html| {
            html.select(selector).next().and_then(|element| {
                let text = collapse_whitespace(&element.text().collect::<String>());
                (!text.is_empty()).then_some(text)
            })
        })
    }

    fn first_attr(&self, selector: &Selector, attr: &str) -> Option<String> {
        self.with_parsed(|html| {
            html.select(selector)
                .next()
                .and_then(|element| element.value().attr(attr))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.mutations.subscribe()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn test_first_text_is_trimmed_and_collapsed() {
        let doc = LiveDocument::new(None, "<h1>\n   Jane \n  Doe  </h1>");
        assert_eq!(doc.first_text(&sel("h1")).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_blank_text_is_none() {
        let doc = LiveDocument::new(None, "<h1>   </h1>");
        assert!(doc.matches(&sel("h1")));
        assert_eq!(doc.first_text(&sel("h1")), None);
    }

    #[test]
    fn test_first_attr() {
        let doc = LiveDocument::new(
            None,
            r#"<head><link rel="canonical" href=" https://x.com/jdoe "></head>"#,
        );
        assert_eq!(
            doc.first_attr(&sel(r#"link[rel="canonical"]"#), "href").as_deref(),
            Some("https://x.com/jdoe")
        );
    }

    #[tokio::test]
    async fn test_set_html_notifies_but_silent_update_does_not() {
        let doc = LiveDocument::blank("https://example.com");
        let mut rx = doc.subscribe();
        assert_eq!(doc.observer_count(), 1);

        doc.set_html_silently("<h1>quiet</h1>");
        assert!(!rx.has_changed().unwrap());

        doc.set_html("<h1>loud</h1>");
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);

        drop(rx);
        assert_eq!(doc.observer_count(), 0);
    }

    #[test]
    fn test_documents_have_distinct_ids() {
        let a = LiveDocument::blank("https://a.example");
        let b = LiveDocument::blank("https://b.example");
        assert_ne!(a.id(), b.id());
    }
}
