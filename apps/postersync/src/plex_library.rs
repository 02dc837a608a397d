//! `MediaLibrary` implementation backed by the Plex HTTP client.

use std::path::Path;

use postersync_plex::{Client, Metadata};
use postersync_posters::{LibraryFuture, MediaItem, MediaLibrary, PosterError, detect_content_type};

/// Bridges the poster sync logic to a Plex Media Server.
pub struct PlexLibrary {
    client: Client,
}

impl PlexLibrary {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl MediaLibrary for PlexLibrary {
    fn list_items<'a>(&'a self, library: &'a str) -> LibraryFuture<'a, Vec<MediaItem>> {
        Box::pin(async move {
            let section = self
                .client
                .find_section(library)
                .await
                .map_err(|e| PosterError::Library(e.to_string()))?;
            let items = self
                .client
                .section_items(&section.key)
                .await
                .map_err(|e| PosterError::Library(e.to_string()))?;
            Ok(items.into_iter().map(to_media_item).collect())
        })
    }

    fn upload_poster<'a>(&'a self, item: &'a MediaItem, path: &'a Path) -> LibraryFuture<'a, ()> {
        Box::pin(async move {
            let data = tokio::fs::read(path).await?;
            self.client
                .upload_poster(&item.id, data, detect_content_type(path))
                .await
                .map_err(|e| PosterError::Upload(e.to_string()))
        })
    }
}

fn to_media_item(meta: Metadata) -> MediaItem {
    MediaItem {
        id: meta.rating_key,
        title: meta.title,
        year: meta.year,
    }
}
