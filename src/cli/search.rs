use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, envelope, error,
    planner::{QueryKind, SearchParams, SearchService},
    success,
    types::{SearchData, SearchOutcome},
    utils, warning,
};

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Builds the query parameters of `kind` from a single positional value.
pub fn params_for(
    kind: QueryKind,
    value: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
) -> SearchParams {
    let mut params = SearchParams::default();
    if let (Some(key), Some(value)) = (kind.required_param(), value) {
        params = params.with(key, value);
    }
    if let Some(page) = page {
        params = params.with("page_wanted", page.to_string());
    }
    if let Some(size) = page_size {
        params = params.with("page_size", size.to_string());
    }
    params
}

/// Runs one query from the command line and prints it as tables.
pub async fn search(
    kind: QueryKind,
    value: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
    user: Option<String>,
    json: bool,
) {
    let settings = match config::Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    let service = match SearchService::from_settings(&settings) {
        Ok(s) => s,
        Err(e) => error!("Cannot create upstream clients. Err: {}", e),
    };

    let params = params_for(kind, value, page, page_size);
    let pb = spinner(format!("Running {} search...", kind.name()));
    let result = service.run(kind, &params, user.as_deref()).await;
    pb.finish_and_clear();

    if json {
        let reply = envelope::build(result);
        match serde_json::to_string_pretty(&reply.body) {
            Ok(body) => println!("{}", body),
            Err(e) => error!("Cannot serialize response. Err: {}", e),
        }
        return;
    }

    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => error!("{} (code {})", e, e.envelope_code()),
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    match &outcome.data {
        SearchData::Songs(songs) => println!("{}", Table::new(utils::song_rows(songs))),
        SearchData::Artists(artists) => {
            println!("{}", Table::new(utils::artist_rows(artists)))
        }
        SearchData::Albums(albums) => println!("{}", Table::new(utils::album_rows(albums))),
        SearchData::ArtistDetails(details) => {
            for detail in details {
                success!(
                    "{} ({} albums, {} tracks)",
                    detail.artist.name,
                    detail.artist.album_size,
                    detail.artist.music_size.unwrap_or_default()
                );
                println!("{}", Table::new(utils::song_rows(&detail.songs)));
            }
        }
        SearchData::AlbumDetails(details) => {
            for detail in details {
                success!("{} - {}", detail.album.name, detail.album.company);
                println!("{}", Table::new(utils::song_rows(&detail.songs)));
            }
        }
        SearchData::Playback(playback) => {
            success!("Stream url: {}", playback.url);
            println!("{}", playback.lyric);
        }
    }

    if outcome.data.is_empty() {
        warning!("No results.");
    }
    if let Some(meta) = outcome.metadata {
        success!(
            "Page {}/{} ({} per page)",
            meta.current_page,
            meta.total_pages,
            meta.page_size
        );
    }
}
