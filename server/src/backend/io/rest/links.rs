//! HATEOAS link construction: self links and self/next/prev paging envelopes.
use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri},
    http::{header::HOST, request::Parts, HeaderMap, Uri},
};
use shared::{Link, Linked, PagedResponse, DEFAULT_COUNT};
use std::convert::Infallible;

use crate::backend::domain::{errors::LedgerResult, validation::parse_optional_int};

/// Absolute URL of the current request, split into path and raw query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    base: String,
    query: Option<String>,
}

impl RequestUrl {
    pub fn new(headers: &HeaderMap, uri: &Uri) -> Self {
        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        Self {
            base: format!("http://{}{}", host, uri.path().trim_end_matches('/')),
            query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
        }
    }

    /// The request URL as received
    pub fn href(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.base, query),
            None => self.base.clone(),
        }
    }

    /// URL of a resource nested under the request path
    pub fn child(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }

    /// The request URL with its `index` query parameter replaced
    pub fn with_index(&self, index: usize) -> String {
        let mut pairs: Vec<String> = self
            .query
            .iter()
            .flat_map(|query| query.split('&'))
            .filter(|pair| !pair.is_empty() && !pair.starts_with("index="))
            .map(str::to_string)
            .collect();
        pairs.push(format!("index={}", index));
        format!("{}?{}", self.base, pairs.join("&"))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers see a stripped URI; links need the original one
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());
        Ok(Self::new(&parts.headers, &uri))
    }
}

pub fn self_link(url: &RequestUrl) -> Link {
    Link::new("self", url.href())
}

/// Wrap a single result with its self link
pub fn linked<T>(result: T, url: &RequestUrl) -> Linked<T> {
    Linked {
        result,
        links: vec![self_link(url)],
    }
}

/// Paging window requested by a client.
///
/// The core is asked for one row more than the client wants; whether that
/// extra row comes back decides if a `next` link is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub count: usize,
    pub index: usize,
}

impl Page {
    pub fn from_params(count: Option<&str>, index: Option<&str>) -> LedgerResult<Self> {
        Ok(Self {
            count: parse_optional_int("count", count, DEFAULT_COUNT)?,
            index: parse_optional_int("index", index, 0)?,
        })
    }

    /// `count` to hand to the core: one past the page, saturating
    pub fn lookahead_count(&self) -> String {
        self.count.saturating_add(1).to_string()
    }

    /// Trim `items` to the page, wrap each with a self link under the request
    /// path and add self/next/prev links
    pub fn envelope<T>(
        &self,
        mut items: Vec<T>,
        url: &RequestUrl,
        id_of: impl Fn(&T) -> &str,
    ) -> PagedResponse<T> {
        // A zero-sized page never advances, so it gets no `next`
        let has_more = self.count > 0 && items.len() > self.count;
        items.truncate(self.count);

        let result = items
            .into_iter()
            .map(|item| {
                let href = url.child(id_of(&item));
                Linked {
                    result: item,
                    links: vec![Link::new("self", href)],
                }
            })
            .collect();

        let mut links = vec![self_link(url)];
        if has_more {
            links.push(Link::new("next", url.with_index(self.index.saturating_add(self.count))));
        }
        if self.index > 0 {
            links.push(Link::new("prev", url.with_index(self.index.saturating_sub(self.count))));
        }
        Linked { result, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn url(uri: &str) -> RequestUrl {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("example.com:2345"));
        RequestUrl::new(&headers, &uri.parse().unwrap())
    }

    fn rels<T>(page: &PagedResponse<T>) -> Vec<&str> {
        page.links.iter().map(|link| link.rel.as_str()).collect()
    }

    #[test]
    fn test_request_url_defaults_host() {
        let url = RequestUrl::new(&HeaderMap::new(), &"/accounts/1_ab?x=1".parse().unwrap());
        assert_eq!(url.href(), "http://localhost/accounts/1_ab?x=1");
        assert_eq!(url.child("2_cd"), "http://localhost/accounts/1_ab/2_cd");
    }

    #[test]
    fn test_with_index_replaces_only_index() {
        let paged = url("/accounts?holderId=H1&index=4&count=2");
        assert_eq!(paged.with_index(6), "http://example.com:2345/accounts?holderId=H1&count=2&index=6");
        assert_eq!(url("/accounts").with_index(0), "http://example.com:2345/accounts?index=0");
    }

    #[test]
    fn test_first_page_with_more() {
        let page = Page::from_params(Some("2"), None).unwrap();
        assert_eq!(page.lookahead_count(), "3");
        let envelope = page.envelope(vec!["1_a", "2_b", "3_c"], &url("/accounts?count=2"), |s| *s);
        assert_eq!(envelope.result.len(), 2);
        assert_eq!(rels(&envelope), vec!["self", "next"]);
        assert_eq!(envelope.links[1].href, "http://example.com:2345/accounts?count=2&index=2");
        assert_eq!(envelope.result[0].links[0].href, "http://example.com:2345/accounts/1_a");
    }

    #[test]
    fn test_last_page_has_prev_only() {
        let page = Page::from_params(Some("5"), Some("3")).unwrap();
        let envelope = page.envelope(vec!["4_d"], &url("/accounts?count=5&index=3"), |s| *s);
        assert_eq!(rels(&envelope), vec!["self", "prev"]);
        assert_eq!(envelope.links[1].href, "http://example.com:2345/accounts?count=5&index=0");
    }

    #[test]
    fn test_zero_count_has_no_next() {
        let page = Page::from_params(Some("0"), Some("2")).unwrap();
        let envelope = page.envelope(vec!["3_c"], &url("/accounts?count=0&index=2"), |s| *s);
        assert!(envelope.result.is_empty());
        assert_eq!(rels(&envelope), vec!["self", "prev"]);
    }

    #[test]
    fn test_huge_count_and_index_saturate() {
        let max = usize::MAX.to_string();
        let page = Page::from_params(Some(&max), Some(&max)).unwrap();
        assert_eq!(page.lookahead_count(), max);
        let envelope = page.envelope(Vec::<&str>::new(), &url("/accounts"), |s| *s);
        assert_eq!(rels(&envelope), vec!["self", "prev"]);
        assert_eq!(envelope.links[1].href, "http://example.com:2345/accounts?index=0");

        let page = Page { count: usize::MAX - 1, index: 5 };
        let envelope = page.envelope(vec!["a"; 1], &url("/accounts"), |s| *s);
        assert_eq!(envelope.result.len(), 1);
        assert_eq!(rels(&envelope), vec!["self", "prev"]);
    }

    #[test]
    fn test_bad_count_is_rejected() {
        assert!(Page::from_params(Some("lots"), None).is_err());
        assert_eq!(Page::from_params(None, None).unwrap(), Page { count: 5, index: 0 });
    }
}
