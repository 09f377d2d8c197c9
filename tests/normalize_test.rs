use melosearch::normalize::*;
use serde_json::json;

#[test]
fn test_normalize_song_full_search_row() {
    let raw = json!({
        "name": "晴天",
        "id": 186016,
        "ar": [{ "id": 6452, "name": "周杰伦", "tns": ["Jay"], "alias": ["周董"] }],
        "al": { "id": 18905, "name": "叶惠美", "picUrl": "http://cover.jpg", "tns": [] },
        "publishTime": 1059580800000i64
    });

    let song = normalize_song(&raw, SongShape::Search);

    assert_eq!(song.id, 186016);
    assert_eq!(song.name, "晴天");
    assert_eq!(song.artists.len(), 1);
    assert_eq!(song.artists[0].name, "周杰伦");
    assert_eq!(song.artists[0].tns, vec!["Jay"]);
    assert_eq!(song.artists[0].alias, vec!["周董"]);
    assert_eq!(song.album.id, 18905);
    assert_eq!(song.album.pic_url, "http://cover.jpg");
    assert_eq!(song.publish_time, 1059580800000);
}

#[test]
fn test_normalize_song_missing_fields_default() {
    let song = normalize_song(&json!({}), SongShape::Search);

    assert_eq!(song.id, 0);
    assert_eq!(song.name, "");
    assert!(song.artists.is_empty());
    assert_eq!(song.album.id, 0);
    assert_eq!(song.album.name, "");
    assert_eq!(song.album.pic_url, "");
    assert!(song.album.tns.is_empty());
    assert_eq!(song.publish_time, 0);
}

#[test]
fn test_normalize_song_null_fields_default() {
    let raw = json!({
        "name": null,
        "id": 7,
        "ar": null,
        "al": { "id": null, "name": "x", "picUrl": null, "tns": null },
        "publishTime": null
    });

    let song = normalize_song(&raw, SongShape::Search);

    assert_eq!(song.id, 7);
    assert_eq!(song.name, "");
    assert!(song.artists.is_empty());
    assert_eq!(song.album.id, 0);
    assert_eq!(song.album.name, "x");
    assert_eq!(song.album.pic_url, "");
    assert_eq!(song.publish_time, 0);
}

#[test]
fn test_normalize_song_artist_entries_default() {
    let raw = json!({ "ar": [{ "name": "Solo" }, {}] });

    let song = normalize_song(&raw, SongShape::Search);

    assert_eq!(song.artists.len(), 2);
    assert_eq!(song.artists[0].name, "Solo");
    assert_eq!(song.artists[0].id, 0);
    assert!(song.artists[0].tns.is_empty());
    assert!(song.artists[0].alias.is_empty());
    assert_eq!(song.artists[1].name, "");
}

#[test]
fn test_normalize_feed_song_uses_feed_field_names() {
    let raw = json!({
        "song": {
            "name": "新歌测试",
            "id": 999,
            "artists": [{ "id": 123, "name": "测试歌手", "picUrl": "http://artist.jpg" }],
            "album": {
                "id": 456,
                "name": "新专辑",
                "picUrl": "http://album.jpg",
                "publishTime": 1640995200000i64
            }
        }
    });

    let song = normalize_song(&raw, SongShape::Feed);

    assert_eq!(song.id, 999);
    assert_eq!(song.name, "新歌测试");
    assert_eq!(song.artists[0].name, "测试歌手");
    assert_eq!(song.artists[0].pic_url, "http://artist.jpg");
    assert_eq!(song.album.name, "新专辑");
    // falls back to the album's publish time
    assert_eq!(song.publish_time, 1640995200000);

    // the search shape does not understand feed field names
    let wrong = normalize_song(&raw["song"], SongShape::Search);
    assert!(wrong.artists.is_empty());
}

#[test]
fn test_normalize_songs_missing_list() {
    assert!(normalize_songs(&json!({}), "songs", SongShape::Search).is_empty());
    assert!(normalize_songs(&json!({ "songs": null }), "songs", SongShape::Search).is_empty());
}

#[test]
fn test_normalize_artist_search_row() {
    let raw = json!({
        "id": 123,
        "name": "测试歌手",
        "picUrl": "http://test.jpg",
        "alias": ["别名"],
        "albumSize": 10,
        "mvSize": 5
    });

    let artist = normalize_artist(&raw, ArtistShape::SearchRow);

    assert_eq!(artist.id, 123);
    assert_eq!(artist.alias, vec!["别名"]);
    assert_eq!(artist.album_size, 10);
    assert_eq!(artist.mv_size, 5);
    assert_eq!(artist.brief_desc, None);
    assert_eq!(artist.music_size, None);
}

#[test]
fn test_normalize_artist_detail_defaults() {
    let artist = normalize_artist(&json!({ "name": "A" }), ArtistShape::Detail);

    assert_eq!(artist.name, "A");
    assert_eq!(artist.pic_url, "");
    assert!(artist.alias.is_empty());
    assert_eq!(artist.album_size, 0);
    assert_eq!(artist.brief_desc.as_deref(), Some(""));
    assert_eq!(artist.music_size, Some(0));
}

#[test]
fn test_normalize_album_search_row() {
    let raw = json!({
        "name": "测试专辑",
        "id": 456,
        "size": 12,
        "picUrl": "http://test.jpg",
        "publishTime": 1640995200000i64,
        "company": "测试公司",
        "alias": [],
        "artists": [{ "name": "测试歌手", "id": 123, "picUrl": "http://artist.jpg" }]
    });

    let album = normalize_album(&raw, AlbumShape::SearchRow);

    assert_eq!(album.size, 12);
    assert_eq!(album.company, "测试公司");
    assert_eq!(album.artists.len(), 1);
    assert_eq!(album.artists[0].pic_url, "http://artist.jpg");
    assert_eq!(album.description, None);
    assert_eq!(album.artist, None);
}

#[test]
fn test_normalize_album_detail_nested_artist() {
    let raw = json!({
        "id": 456,
        "name": "测试专辑",
        "description": "专辑描述",
        "artist": { "id": 123, "name": "测试歌手", "musicSize": 100, "albumSize": 10 }
    });

    let album = normalize_album(&raw, AlbumShape::Detail);

    assert_eq!(album.description.as_deref(), Some("专辑描述"));
    let owner = album.artist.expect("owner artist");
    assert_eq!(owner.name, "测试歌手");
    assert_eq!(owner.music_size, Some(100));
    assert_eq!(owner.brief_desc, None);
    assert!(album.artists.is_empty());
    assert_eq!(album.size, 0);
}

#[test]
fn test_normalize_album_detail_without_artist() {
    let album = normalize_album(&json!({}), AlbumShape::Detail);
    let owner = album.artist.expect("owner artist defaults");
    assert_eq!(owner.id, 0);
    assert_eq!(owner.name, "");
}

#[test]
fn test_serialized_song_keeps_wire_names() {
    let song = normalize_song(&json!({ "id": 1, "name": "n" }), SongShape::Search);
    let value = serde_json::to_value(&song).unwrap();

    for key in ["name", "id", "ar", "al", "publishTime"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert!(value["ar"].as_array().unwrap().is_empty());
    for key in ["id", "name", "picUrl", "tns"] {
        assert!(value["al"].get(key).is_some(), "missing al.{}", key);
    }
}
