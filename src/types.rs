use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalArtistRef {
    pub id: i64,
    pub name: String,
    pub tns: Vec<String>,
    pub alias: Vec<String>,
    #[serde(
        rename = "picUrl",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub pic_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAlbumRef {
    pub id: i64,
    pub name: String,
    #[serde(rename = "picUrl")]
    pub pic_url: String,
    pub tns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSong {
    pub id: i64,
    pub name: String,
    #[serde(rename = "ar")]
    pub artists: Vec<CanonicalArtistRef>,
    #[serde(rename = "al")]
    pub album: CanonicalAlbumRef,
    #[serde(rename = "publishTime")]
    pub publish_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalArtist {
    pub id: i64,
    pub name: String,
    #[serde(rename = "picUrl")]
    pub pic_url: String,
    pub alias: Vec<String>,
    #[serde(rename = "albumSize")]
    pub album_size: i64,
    #[serde(rename = "mvSize")]
    pub mv_size: i64,
    #[serde(rename = "briefDesc", skip_serializing_if = "Option::is_none")]
    pub brief_desc: Option<String>,
    #[serde(rename = "musicSize", skip_serializing_if = "Option::is_none")]
    pub music_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAlbum {
    pub id: i64,
    pub name: String,
    pub size: i64,
    #[serde(rename = "picUrl")]
    pub pic_url: String,
    #[serde(rename = "publishTime")]
    pub publish_time: i64,
    pub company: String,
    pub alias: Vec<String>,
    pub artists: Vec<CanonicalArtistRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<CanonicalArtist>,
}

/// An artist detail lookup: the artist plus its hot songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetail {
    pub artist: CanonicalArtist,
    pub songs: Vec<CanonicalSong>,
}

/// An album detail lookup: the album plus its track list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub album: CanonicalAlbum,
    pub songs: Vec<CanonicalSong>,
}

/// Stream url and lyric text of a single song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongPlayback {
    pub id: String,
    pub url: String,
    pub lyric: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Payload of a successful query. Serialized without a tag so the envelope's
/// `data` holds the bare list or object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchData {
    Songs(Vec<CanonicalSong>),
    Artists(Vec<CanonicalArtist>),
    Albums(Vec<CanonicalAlbum>),
    ArtistDetails(Vec<ArtistDetail>),
    AlbumDetails(Vec<AlbumDetail>),
    Playback(SongPlayback),
}

impl SearchData {
    pub fn len(&self) -> usize {
        match self {
            SearchData::Songs(s) => s.len(),
            SearchData::Artists(a) => a.len(),
            SearchData::Albums(a) => a.len(),
            SearchData::ArtistDetails(d) => d.len(),
            SearchData::AlbumDetails(d) => d.len(),
            SearchData::Playback(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub data: SearchData,
    pub metadata: Option<PageMetadata>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: i64,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub published: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub albums: i64,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: i64,
    pub name: String,
    pub artists: String,
    pub size: i64,
    pub published: String,
}
