use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::info;

use crate::client::DocsClient;
use crate::extract;
use crate::search::{self, SearchRequest};

/// One search hit with its page rendered to markdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedDoc {
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Search, then fetch and extract every hit in ranked order. The first
/// failing page aborts the whole call.
pub async fn retrieve_docs(client: &DocsClient, request: &SearchRequest) -> Result<Vec<RetrievedDoc>> {
    let hits = search::search(client, request).await?;
    let urls: Vec<String> = hits.iter().map(|h| client.settings.page_url(&h.url)).collect();
    let pages = fetch_pages(client, &urls).await?;

    let docs = hits
        .into_par_iter()
        .zip(urls.into_par_iter().zip(pages.into_par_iter()))
        .map(|(hit, (url, html))| -> crate::error::Result<RetrievedDoc> {
            let doc = extract::extract_html(&html, &url)?;
            Ok(RetrievedDoc {
                url,
                title: hit.title,
                text: doc.to_markdown(),
            })
        })
        .collect::<crate::error::Result<Vec<_>>>()?;

    info!(query = %request.query, pages = docs.len(), "retrieved documentation");
    Ok(docs)
}

/// Fetch pages concurrently, at most `fetch_concurrency` in flight. Bodies
/// come back in input order.
async fn fetch_pages(client: &DocsClient, urls: &[String]) -> Result<Vec<String>> {
    let semaphore = Arc::new(Semaphore::new(client.settings.fetch_concurrency.max(1)));

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")?
            .progress_chars("=> "),
    );

    let handles: Vec<_> = urls
        .iter()
        .cloned()
        .map(|url| {
            let client = client.clone();
            let sem = Arc::clone(&semaphore);
            tokio::spawn(async move {
                let _permit = sem.acquire_owned().await;
                client.fetch_page(&url).await
            })
        })
        .collect();

    let mut pages = Vec::with_capacity(handles.len());
    let mut handles = handles.into_iter();
    while let Some(handle) = handles.next() {
        match handle.await? {
            Ok(html) => {
                pages.push(html);
                pb.inc(1);
            }
            Err(e) => {
                handles.for_each(|h| h.abort());
                pb.finish_and_clear();
                return Err(e.into());
            }
        }
    }

    pb.finish_and_clear();
    Ok(pages)
}
