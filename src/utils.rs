use chrono::DateTime;

use crate::types::{
    AlbumTableRow, ArtistTableRow, CanonicalAlbum, CanonicalArtist, CanonicalSong, PageMetadata,
    SongTableRow,
};

/// Returns the items of page `page` (1-based) of size `page_size`.
///
/// Out-of-range pages yield an empty slice; the last page may be short.
pub fn paginate_results<T: Clone>(results: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= results.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(results.len());
    results[start..end].to_vec()
}

/// Number of pages needed for `total_count` items, rounding up.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

pub fn page_metadata(page: usize, page_size: usize, total_count: usize) -> PageMetadata {
    PageMetadata {
        current_page: page,
        page_size,
        total_pages: total_pages(total_count, page_size),
    }
}

/// Formats an epoch-millis timestamp as `YYYY-MM-DD`; zero or out-of-range
/// values render as an empty string.
pub fn format_publish_time(millis: i64) -> String {
    if millis <= 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn song_rows(songs: &[CanonicalSong]) -> Vec<SongTableRow> {
    songs
        .iter()
        .map(|s| SongTableRow {
            id: s.id,
            name: s.name.clone(),
            artists: s
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: s.album.name.clone(),
            published: format_publish_time(s.publish_time),
        })
        .collect()
}

pub fn artist_rows(artists: &[CanonicalArtist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            id: a.id,
            name: a.name.clone(),
            alias: a.alias.iter().take(3).cloned().collect::<Vec<_>>().join(","),
            albums: a.album_size,
        })
        .collect()
}

pub fn album_rows(albums: &[CanonicalAlbum]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .map(|a| AlbumTableRow {
            id: a.id,
            name: a.name.clone(),
            artists: a
                .artists
                .iter()
                .map(|ar| ar.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            size: a.size,
            published: format_publish_time(a.publish_time),
        })
        .collect()
}
