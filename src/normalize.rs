//! Maps raw upstream JSON into canonical records.
//!
//! Every function here is total: missing or `null` scalars become `0` or an
//! empty string, missing lists become empty lists, and nested artist/album
//! lists go through the same mapping element by element. The upstream names
//! the same data differently depending on the endpoint, so each entity takes
//! a shape selector instead of guessing.

use serde_json::Value;

use crate::types::{
    CanonicalAlbum, CanonicalAlbumRef, CanonicalArtist, CanonicalArtistRef, CanonicalSong,
};

static NULL: Value = Value::Null;

/// Where a raw song object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongShape {
    /// Cloud search rows and detail track lists: `ar` / `al`.
    Search,
    /// New-song feed entries: `{song: {artists, album}}`.
    Feed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistShape {
    /// Cloud search rows.
    SearchRow,
    /// Artist detail lookups, carrying biography and track count.
    Detail,
    /// The owner artist nested in an album detail, carrying track count only.
    AlbumOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumShape {
    SearchRow,
    /// Album detail lookups, carrying a description and the owner artist.
    Detail,
}

fn field<'a>(raw: &'a Value, key: &str) -> &'a Value {
    raw.get(key).unwrap_or(&NULL)
}

fn text(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn int(raw: &Value, key: &str) -> i64 {
    match raw.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn text_list(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn objects<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn normalize_artist_ref(raw: &Value) -> CanonicalArtistRef {
    CanonicalArtistRef {
        id: int(raw, "id"),
        name: text(raw, "name"),
        tns: text_list(raw, "tns"),
        alias: text_list(raw, "alias"),
        pic_url: text(raw, "picUrl"),
    }
}

pub fn normalize_album_ref(raw: &Value) -> CanonicalAlbumRef {
    CanonicalAlbumRef {
        id: int(raw, "id"),
        name: text(raw, "name"),
        pic_url: text(raw, "picUrl"),
        tns: text_list(raw, "tns"),
    }
}

pub fn normalize_song(raw: &Value, shape: SongShape) -> CanonicalSong {
    match shape {
        SongShape::Search => CanonicalSong {
            id: int(raw, "id"),
            name: text(raw, "name"),
            artists: objects(raw, "ar").iter().map(normalize_artist_ref).collect(),
            album: normalize_album_ref(field(raw, "al")),
            publish_time: int(raw, "publishTime"),
        },
        SongShape::Feed => {
            let song = match raw.get("song") {
                Some(inner) if inner.is_object() => inner,
                _ => raw,
            };
            let album = field(song, "album");
            let publish_time = match int(song, "publishTime") {
                0 => int(album, "publishTime"),
                t => t,
            };

            CanonicalSong {
                id: int(song, "id"),
                name: text(song, "name"),
                artists: objects(song, "artists")
                    .iter()
                    .map(normalize_artist_ref)
                    .collect(),
                album: normalize_album_ref(album),
                publish_time,
            }
        }
    }
}

/// Normalizes every element of `raw[key]`, treating a missing list as empty.
pub fn normalize_songs(raw: &Value, key: &str, shape: SongShape) -> Vec<CanonicalSong> {
    objects(raw, key)
        .iter()
        .map(|song| normalize_song(song, shape))
        .collect()
}

pub fn normalize_artist(raw: &Value, shape: ArtistShape) -> CanonicalArtist {
    let mut artist = CanonicalArtist {
        id: int(raw, "id"),
        name: text(raw, "name"),
        pic_url: text(raw, "picUrl"),
        alias: text_list(raw, "alias"),
        album_size: int(raw, "albumSize"),
        mv_size: int(raw, "mvSize"),
        brief_desc: None,
        music_size: None,
    };

    match shape {
        ArtistShape::SearchRow => {}
        ArtistShape::Detail => {
            artist.brief_desc = Some(text(raw, "briefDesc"));
            artist.music_size = Some(int(raw, "musicSize"));
        }
        ArtistShape::AlbumOwner => {
            artist.music_size = Some(int(raw, "musicSize"));
        }
    }

    artist
}

pub fn normalize_album(raw: &Value, shape: AlbumShape) -> CanonicalAlbum {
    let mut album = CanonicalAlbum {
        id: int(raw, "id"),
        name: text(raw, "name"),
        size: int(raw, "size"),
        pic_url: text(raw, "picUrl"),
        publish_time: int(raw, "publishTime"),
        company: text(raw, "company"),
        alias: text_list(raw, "alias"),
        artists: objects(raw, "artists")
            .iter()
            .map(normalize_artist_ref)
            .collect(),
        description: None,
        artist: None,
    };

    if shape == AlbumShape::Detail {
        album.description = Some(text(raw, "description"));
        album.artist = Some(normalize_artist(
            field(raw, "artist"),
            ArtistShape::AlbumOwner,
        ));
    }

    album
}
