//! # Paginator
//!
//! Slices a final, filtered document sequence into fixed-size page windows
//! and computes every page's navigation: its own URL plus links to the
//! previous, next, first, and last pages.
//!
//! ## Page Windows
//!
//! Page `p` holds the half-open window `[(p-1)*per_page, p*per_page)` of
//! the sequence, clamped to its length. An empty sequence still yields
//! exactly one (empty) page, so every index URL resolves.
//!
//! ## URL Templates
//!
//! The first page has its own URL template (typically the index page the
//! pagination was declared on); all other pages share a template carrying
//! the `:num` placeholder. Templates that do not name a concrete file are
//! completed with the default index filename and extension, and when a
//! custom index filename is configured it is appended to *both* templates
//! so extensionless permalinks stay addressable per page
//! (see [`crate::urls`]).
//!
//! ## Errors
//!
//! Requesting a page beyond the total page count is a programming error in
//! the caller's page-count computation and fails construction with
//! [`PagezError::PageOutOfRange`]. Everything else degrades gracefully.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::{PagezError, Result};
use crate::model::Document;
use crate::urls;

/// One entry of a navigation trail: a page summary for building pagination
/// widgets in the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailEntry {
    pub num: usize,
    pub path: String,
    pub title: String,
}

/// The view of one page: its document slice plus all navigation data.
///
/// Serializes to the flat key set presentation layers consume (`posts`,
/// `total_posts`, `page_path`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginator {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    #[serde(rename = "posts")]
    pub documents: Vec<Document>,
    #[serde(rename = "total_posts")]
    pub total_documents: usize,
    pub total_pages: usize,
    pub page_path: String,
    pub previous_page: Option<usize>,
    pub previous_page_path: Option<String>,
    pub next_page: Option<usize>,
    pub next_page_path: Option<String>,
    pub first_page: usize,
    pub first_page_path: String,
    pub last_page: usize,
    pub last_page_path: String,
    /// Caller-computed trail, carried verbatim. Empty unless set.
    pub page_trail: Vec<TrailEntry>,
}

impl Paginator {
    /// Build the view for page `page` of `total_pages`.
    ///
    /// `first_index_page_url` is the URL template for page 1,
    /// `paginated_page_url` the `:num`-carrying template for the rest.
    /// `default_index` and `default_ext` may be empty; where a concrete
    /// filename is required they fall back to `index` and `.html`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        per_page: usize,
        first_index_page_url: &str,
        paginated_page_url: &str,
        docs: &[Document],
        page: usize,
        total_pages: usize,
        default_index: &str,
        default_ext: &str,
    ) -> Result<Self> {
        // Page numbers are 1-based; 0 and past-the-end are caller bugs.
        if page == 0 || page > total_pages {
            return Err(PagezError::PageOutOfRange { page, total_pages });
        }

        let index_fallback = if default_index.is_empty() {
            "index"
        } else {
            default_index
        };
        let ext_fallback = if default_ext.is_empty() {
            ".html"
        } else {
            default_ext
        };
        let this_page_url = urls::ensure_full_path(
            if page == 1 {
                first_index_page_url
            } else {
                paginated_page_url
            },
            index_fallback,
            ext_fallback,
        );

        // With a custom index filename configured, append it to both
        // templates so extensionless permalinks resolve per page.
        let (first_url, paginated_url) = if !default_index.is_empty() {
            (
                urls::ensure_full_path(first_index_page_url, default_index, default_ext),
                urls::ensure_full_path(paginated_page_url, default_index, default_ext),
            )
        } else {
            (
                first_index_page_url.to_string(),
                paginated_page_url.to_string(),
            )
        };

        let start = (page - 1) * per_page;
        let end = (start + per_page).min(docs.len());
        let documents = if start < docs.len() {
            docs[start..end].to_vec()
        } else {
            Vec::new()
        };

        let page_path = urls::format_page_number(&this_page_url, page, Some(total_pages));

        let previous_page = if page > 1 { Some(page - 1) } else { None };
        let previous_page_path = previous_page.map(|prev| {
            if prev == 1 {
                urls::format_page_number(&first_url, 1, Some(total_pages))
            } else {
                urls::format_page_number(&paginated_url, prev, Some(total_pages))
            }
        });
        let next_page = if page < total_pages {
            Some(page + 1)
        } else {
            None
        };
        let next_page_path =
            next_page.map(|next| urls::format_page_number(&paginated_url, next, Some(total_pages)));

        tracing::debug!(
            "page {}/{} at {} holds {} documents",
            page,
            total_pages,
            page_path,
            documents.len()
        );

        Ok(Self {
            page,
            per_page,
            documents,
            total_documents: docs.len(),
            total_pages,
            page_path,
            previous_page,
            previous_page_path,
            next_page,
            next_page_path,
            first_page: 1,
            first_page_path: urls::format_page_number(&first_url, 1, Some(total_pages)),
            last_page: total_pages,
            last_page_path: urls::format_page_number(
                &paginated_url,
                total_pages,
                Some(total_pages),
            ),
            page_trail: Vec::new(),
        })
    }

    /// Attach a caller-computed navigation trail. The paginator carries it
    /// verbatim; computing trail contents is the host's concern.
    pub fn set_trail(&mut self, trail: Vec<TrailEntry>) {
        self.page_trail = trail;
    }
}

/// Total pages needed for `total_documents` at `per_page` per page. An
/// empty set still gets one page.
pub fn total_pages(total_documents: usize, per_page: usize) -> usize {
    if total_documents == 0 {
        return 1;
    }
    total_documents.div_ceil(per_page.max(1))
}

/// Build the complete page sequence for a document set, in page order.
///
/// `first_page_url` is where page 1 lives; the template for the remaining
/// pages is derived by joining it with the configured permalink pattern.
pub fn paginate(
    config: &PaginationConfig,
    first_page_url: &str,
    docs: &[Document],
) -> Result<Vec<Paginator>> {
    let per_page = config.per_page();
    let total = total_pages(docs.len(), per_page);
    let paginated_url = urls::join_url(first_page_url, &config.permalink);
    (1..=total)
        .map(|page| {
            Paginator::new(
                per_page,
                first_page_url,
                &paginated_url,
                docs,
                page,
                total,
                config.index_name(),
                &config.extension(),
            )
        })
        .collect()
}
