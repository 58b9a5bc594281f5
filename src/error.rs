//! Crate error type.
//!
//! pagez resolves almost every bad input locally: malformed filter elements
//! are dropped, wholly-invalid filters degrade to "no filtering" (see
//! [`crate::filter`]), and documents missing a field are simply excluded.
//! The one condition that is a hard error is asking for a page number beyond
//! the computed page count — that is a caller bug in page-count computation,
//! not user input, so it surfaces immediately.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PagezError>;

#[derive(Debug, Error)]
pub enum PagezError {
    /// The requested page number is outside `1..=total_pages`.
    #[error("page number {page} is out of range for {total_pages} total pages")]
    PageOutOfRange { page: usize, total_pages: usize },
}
