//! CLI Command Handlers
//!
//! Implements all CLI commands against the catalog and download services.
//! Each handler takes CLI args, its collaborators and Output, returns ExitCode.

use serde::Serialize;

use crate::api::{CatalogError, CatalogService, DownloadManager};
use crate::cli::{DownloadsCmd, ExitCode, HomeCmd, HomeResponse, InfoCmd, Output, SearchCmd};
use crate::search::Filtered;

/// Print `data` as JSON or as display lines
fn emit<T, I>(output: &Output, data: T, lines: I) -> ExitCode
where
    T: Serialize,
    I: IntoIterator<Item = String>,
{
    if output.json {
        if let Err(e) = output.print_json(data) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for line in lines {
            output.line(line);
        }
    }
    ExitCode::Success
}

fn catalog_failure(output: &Output, context: &str, err: CatalogError) -> ExitCode {
    let code = match err {
        CatalogError::NotFound(_) => ExitCode::NotFound,
        CatalogError::Unavailable(_) => ExitCode::Error,
    };
    output.error(format!("{}: {}", context, err), code)
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, catalog: &dyn CatalogService, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }
    if cmd.limit == 0 {
        return output.error("--limit must be at least 1", ExitCode::InvalidArgs);
    }

    output.info(format!("Searching for: {}", query));

    match catalog.search(query).await {
        Ok(results) => match Filtered::from_vec(results) {
            Filtered::Matches(mut results) => {
                results.truncate(cmd.limit);
                let lines: Vec<String> = results.iter().map(|r| r.to_string()).collect();
                emit(output, &results, lines)
            }
            Filtered::Empty => {
                output.info("No results found");
                emit(output, Vec::<()>::new(), Vec::new())
            }
        },
        Err(e) => catalog_failure(output, "Search failed", e),
    }
}

// =============================================================================
// Home Command
// =============================================================================

pub async fn home_cmd(_cmd: HomeCmd, catalog: &dyn CatalogService, output: &Output) -> ExitCode {
    let home = async {
        Ok::<_, CatalogError>(HomeResponse {
            featured: catalog.featured().await?,
            top_movies: catalog.top_movies().await?,
            continue_watching: catalog.continue_watching().await?,
            upcoming: catalog.upcoming().await?,
        })
    }
    .await;

    let home = match home {
        Ok(home) => home,
        Err(e) => return catalog_failure(output, "Home failed", e),
    };

    let mut lines = vec![
        format!("Featured: {} ★ {:.1}", home.featured.title, home.featured.rating),
        String::new(),
        "Top Movies".to_string(),
    ];
    lines.extend(home.top_movies.iter().map(|m| format!("  {}", m)));
    lines.push("Continue Watching".to_string());
    lines.extend(
        home.continue_watching
            .iter()
            .map(|w| format!("  {} ({}%)", w.movie, w.progress)),
    );
    lines.push("Upcoming Movies".to_string());
    lines.extend(home.upcoming.iter().map(|m| format!("  {}", m)));

    emit(output, &home, lines)
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, catalog: &dyn CatalogService, output: &Output) -> ExitCode {
    let id = cmd.id.trim();
    if id.is_empty() {
        return output.error("Movie id must not be empty", ExitCode::InvalidArgs);
    }

    output.info(format!("Getting info for: {}", id));

    match catalog.movie_detail(id).await {
        Ok(detail) => {
            let mut lines = vec![
                detail.to_string(),
                detail.genres.join(", "),
                String::new(),
                detail.description.clone(),
            ];
            if !detail.cast.is_empty() {
                lines.push(String::new());
                lines.extend(
                    detail
                        .cast
                        .iter()
                        .map(|c| format!("  {} as {}", c.name, c.character)),
                );
            }
            emit(output, &detail, lines)
        }
        Err(e) => catalog_failure(output, "Movie info failed", e),
    }
}

// =============================================================================
// Downloads Command
// =============================================================================

pub async fn downloads_cmd(
    cmd: DownloadsCmd,
    downloads: &dyn DownloadManager,
    output: &Output,
) -> ExitCode {
    match downloads.list().await {
        Ok(mut records) => {
            if let Some(filter) = cmd.status {
                records.retain(|r| filter.matches(r.status));
            }
            if records.is_empty() {
                output.info("No downloads yet");
            }
            let lines: Vec<String> = records
                .iter()
                .map(|r| format!("{}  {}  {}", r.title, r.status_label(), r.file_info()))
                .collect();
            emit(output, &records, lines)
        }
        Err(e) => catalog_failure(output, "Downloads failed", e),
    }
}
