//! Media library connection trait.
//!
//! `MediaLibrary` is implemented by the app to bridge the sync logic to
//! the actual media server client.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::error::PosterError;
use crate::types::MediaItem;

/// Boxed future returned by `MediaLibrary` methods.
pub type LibraryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PosterError>> + Send + 'a>>;

/// Abstract connection to a remote media library.
///
/// Using a trait keeps the matching logic decoupled from transport and
/// testable with mocks.
pub trait MediaLibrary: Send + Sync {
    /// Lists every item in the named library section, in server order.
    fn list_items<'a>(&'a self, library: &'a str) -> LibraryFuture<'a, Vec<MediaItem>>;

    /// Uploads the image at `path` as the poster for `item`.
    fn upload_poster<'a>(&'a self, item: &'a MediaItem, path: &'a Path) -> LibraryFuture<'a, ()>;
}
