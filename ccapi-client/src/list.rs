//! Paged collections
//!
//! List endpoints answer one page at a time. A [`PagedList`] holds one page
//! and knows how to fetch its neighbours through `next_url` and `prev_url`.

use crate::models::Model;
use crate::network::{NetworkClient, Request};
use ccapi_core::documents::ListDocument;
use ccapi_core::{QueryFilter, Result};
use reqwest::{Method, StatusCode};

/// One page of a collection
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    network: NetworkClient,
    pub total_results: usize,
    pub total_pages: usize,
    next_url: Option<String>,
    prev_url: Option<String>,
    items: Vec<T>,
}

impl<T: Model> PagedList<T> {
    /// Fetch the first page of `path`, optionally filtered
    pub(crate) async fn fetch(
        network: &NetworkClient,
        path: &str,
        filter: Option<&QueryFilter>,
        token: &str,
    ) -> Result<Self> {
        let mut request = Request::new(Method::GET, path)
            .token(token)
            .acceptable(&[StatusCode::OK]);
        if let Some(filter) = filter {
            request = request.filter(filter);
        }

        let response = network.make_request(request).await?;
        let document: ListDocument<T::Entity> = response.decode()?;

        Ok(Self {
            network: network.clone(),
            total_results: document.total_results,
            total_pages: document.total_pages,
            next_url: document.next_url,
            prev_url: document.prev_url,
            items: document.resources.into_iter().map(T::from).collect(),
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_url.is_some()
    }

    pub fn has_prev_page(&self) -> bool {
        self.prev_url.is_some()
    }

    /// Fetch the following page, or `None` on the last one
    pub async fn next(&self, token: &str) -> Result<Option<Self>> {
        match &self.next_url {
            Some(url) => Self::fetch(&self.network, url, None, token).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetch the preceding page, or `None` on the first one
    pub async fn prev(&self, token: &str) -> Result<Option<Self>> {
        match &self.prev_url {
            Some(url) => Self::fetch(&self.network, url, None, token).await.map(Some),
            None => Ok(None),
        }
    }

    /// Walk every remaining page and collect all items, this page included
    pub async fn all(self, token: &str) -> Result<Vec<T>> {
        let mut page = self;
        let mut items = Vec::with_capacity(page.total_results);

        loop {
            let next = page.next(token).await?;
            items.append(&mut page.items);
            match next {
                Some(next) => page = next,
                None => return Ok(items),
            }
        }
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
