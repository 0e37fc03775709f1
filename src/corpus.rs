//! HTML corpus loader
//!
//! Turns a directory of `*.html` files into a [`LinkGraph`] keyed by file
//! name. Only anchors pointing at other files of the same directory survive;
//! everything else (external URLs, missing files, self-links) is dropped.

use linkrank_algorithms::{LinkGraph, RankError};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// `href` targets of `<a ...>` tags
const LINK_PATTERN: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// Errors that can occur while loading a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus path {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid link graph: {0}")]
    Graph(#[from] RankError<String>),
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Extracts anchor targets from HTML text
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new() -> CorpusResult<Self> {
        Ok(Self {
            pattern: Regex::new(LINK_PATTERN)?,
        })
    }

    /// Distinct `href` values of every anchor in `html`
    pub fn links(&self, html: &str) -> BTreeSet<String> {
        self.pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Load every `*.html` file directly inside `dir` (not recursive).
pub fn crawl(dir: impl AsRef<Path>) -> CorpusResult<LinkGraph<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CorpusError::NotADirectory(dir.to_path_buf()));
    }

    let extractor = LinkExtractor::new()?;
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| CorpusError::Io { path, source }
    };

    // 1. Extract raw links per page
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }

        let contents = fs::read_to_string(&path).map_err(io_error(&path))?;
        let mut links = extractor.links(&contents);
        links.remove(name);

        debug!("Parsed {}: {} candidate links", name, links.len());
        pages.insert(name.to_string(), links);
    }

    // 2. Only keep links to pages of the corpus
    let known: BTreeSet<String> = pages.keys().cloned().collect();
    let mut dropped = 0usize;
    for links in pages.values_mut() {
        let before = links.len();
        links.retain(|link| known.contains(link));
        dropped += before - links.len();
    }

    info!(
        "Loaded corpus {:?}: {} pages, {} links outside the corpus dropped",
        dir,
        pages.len(),
        dropped
    );

    Ok(LinkGraph::from_adjacency(pages)?)
}
