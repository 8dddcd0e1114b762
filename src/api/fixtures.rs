//! Seed data for the in-memory services
//!
//! Stands in for a catalog backend until one exists.

use crate::models::{
    CastMember, DownloadRecord, DownloadStatus, FeaturedMovie, MovieDetail, MovieSummary,
    SearchResult, TrendingSearch, WatchProgress,
};

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const ORIGINAL_BASE: &str = "https://image.tmdb.org/t/p/original";

fn poster(path: &str) -> String {
    format!("{}/{}", POSTER_BASE, path)
}

fn summary(id: &str, title: &str, rating: f32, path: &str) -> MovieSummary {
    MovieSummary::new(id, title, rating, &poster(path))
}

pub fn featured() -> FeaturedMovie {
    FeaturedMovie {
        title: "The Black Phone".into(),
        description: "In a suburban Colorado town in the 1970s, five children go missing, \
                      kidnapped by a sadistic killer known as \"The Grabber\". When Finney \
                      Shaw becomes his latest victim, he discovers he can communicate with \
                      the killer's previous victims through a disconnected black phone on \
                      the wall."
            .into(),
        image_url: format!("{}/p9ZUzCyy9wRTDuuQexkQ78R2BgF.jpg", ORIGINAL_BASE),
        rating: 8.8,
    }
}

pub fn top_movies() -> Vec<MovieSummary> {
    vec![
        summary("1", "Inception", 8.8, "9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"),
        summary("2", "The Dark Knight", 9.0, "qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
        summary("3", "Interstellar", 8.6, "gEU2QniE6E77NI6lCU6MxlNBvIx.jpg"),
    ]
}

pub fn upcoming_movies() -> Vec<MovieSummary> {
    vec![
        summary("4", "Dune: Part Two", 9.2, "8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"),
        summary("5", "Deadpool 3", 8.5, "4Y1WNkd88JXmGfhtWR7dmDAo1T2.jpg"),
        summary("6", "Joker: Folie à Deux", 8.7, "bw0l1oqLYEXIGQMrZnsuWlOZ9s2.jpg"),
    ]
}

pub fn continue_watching() -> Vec<WatchProgress> {
    vec![
        WatchProgress {
            movie: summary("7", "The Matrix", 8.7, "f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
            progress: 65,
        },
        WatchProgress {
            movie: summary("8", "Avatar", 7.8, "jRXYjXNq0Cs2TcJjLkki24MLp7u.jpg"),
            progress: 30,
        },
        WatchProgress {
            movie: summary("9", "Oppenheimer", 8.4, "8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg"),
            progress: 85,
        },
    ]
}

/// Every summary the catalog knows about, in display order
pub fn all_movies() -> Vec<MovieSummary> {
    let mut all = top_movies();
    all.extend(upcoming_movies());
    all.extend(continue_watching().into_iter().map(|w| w.movie));
    all
}

pub fn search_index() -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "1".into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster_url: poster("9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"),
            rating: 8.8,
            genres: vec!["Action".into(), "Sci-Fi".into()],
        },
        SearchResult {
            id: "2".into(),
            title: "The Dark Knight".into(),
            year: "2008".into(),
            poster_url: poster("qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
            rating: 9.0,
            genres: vec!["Action".into(), "Crime".into(), "Drama".into()],
        },
    ]
}

pub fn trending_searches() -> Vec<TrendingSearch> {
    vec![
        TrendingSearch {
            id: "4".into(),
            title: "Dune: Part Two".into(),
            poster_url: poster("8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"),
            search_count: 1520,
        },
        TrendingSearch {
            id: "2".into(),
            title: "The Dark Knight".into(),
            poster_url: poster("qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
            search_count: 980,
        },
    ]
}

pub fn inception_detail() -> MovieDetail {
    MovieDetail {
        id: "1".into(),
        title: "Inception".into(),
        description: "A thief who steals corporate secrets through the use of dream-sharing \
                      technology is given the inverse task of planting an idea into the mind \
                      of a C.E.O., but his tragic past may doom the project and his team to \
                      disaster."
            .into(),
        image_url: format!("{}/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg", ORIGINAL_BASE),
        duration: "2h 28m".into(),
        release_date: "2010".into(),
        genres: vec!["Action".into(), "Sci-Fi".into(), "Thriller".into()],
        rating: 88,
        cast: vec![
            cast("1", "Leonardo DiCaprio", "Cobb"),
            cast("2", "Joseph Gordon-Levitt", "Arthur"),
            cast("3", "Ellen Page", "Ariadne"),
        ],
    }
}

fn cast(id: &str, name: &str, character: &str) -> CastMember {
    CastMember {
        id: id.into(),
        name: name.into(),
        character: character.into(),
        profile_image: format!("https://example.com/cast{}.jpg", id),
    }
}

pub fn downloads() -> Vec<DownloadRecord> {
    vec![
        DownloadRecord {
            id: "1".into(),
            title: "Inception".into(),
            thumbnail_url: poster("9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"),
            progress: 65,
            status: DownloadStatus::Downloading,
            file_size: "1.2GB".into(),
            resolution: "1080p".into(),
        },
        DownloadRecord {
            id: "2".into(),
            title: "The Dark Knight".into(),
            thumbnail_url: poster("qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
            progress: 100,
            status: DownloadStatus::Downloaded,
            file_size: "2.1GB".into(),
            resolution: "4K".into(),
        },
    ]
}
