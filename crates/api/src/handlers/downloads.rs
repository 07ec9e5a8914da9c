//! "Download all images" bundle for a project.
//!
//! Variants are fetched one at a time with a pause between requests and
//! packed into a single zip archive.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::IntoResponse;
use folio_core::download::{sanitize_segment, variant_filename};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Archive name used when the project title is blank or not plain ASCII.
const FALLBACK_ARCHIVE_NAME: &str = "images.zip";

/// GET /api/v1/projects/{id}/images.zip
pub async fn download_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let variants: Vec<_> = project
        .variants()
        .into_iter()
        .filter(|v| !v.url.is_empty())
        .collect();
    if variants.is_empty() {
        return Err(AppError::BadRequest("No images to download".into()));
    }

    let delay = Duration::from_millis(state.config.download_delay_ms);
    let mut used_names = HashSet::new();
    let mut entries = Vec::with_capacity(variants.len());

    for (index, variant) in variants.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match fetch_image(&state.http, &variant.url).await {
            Ok(bytes) => {
                let name = unique_name(
                    variant_filename(&project.title, &variant.name, index, &variant.url),
                    &mut used_names,
                );
                entries.push((name, bytes));
            }
            Err(e) => {
                tracing::warn!(project_id = id, url = %variant.url, error = %e, "Image fetch failed, skipping");
            }
        }
    }

    if entries.is_empty() {
        return Err(AppError::Core(CoreError::Unavailable(
            "None of the images could be downloaded".into(),
        )));
    }

    let archive = build_archive(&entries)
        .map_err(|e| AppError::InternalError(format!("Archive error: {e}")))?;
    tracing::info!(project_id = id, files = entries.len(), bytes = archive.len(), "Image bundle built");

    let disposition = archive_disposition(&project.title);
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (CONTENT_DISPOSITION, disposition),
        ],
        archive,
    ))
}

async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Bytes, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.bytes().await
}

/// Append `-2`, `-3`, ... before the extension until `name` is unused.
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{ext}")),
        None => (name.clone(), String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn build_archive(entries: &[(String, Bytes)]) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }
    Ok(writer.finish()?.into_inner())
}

fn archive_disposition(title: &str) -> HeaderValue {
    let title = sanitize_segment(title.trim());
    let name = if title.is_empty() || !title.is_ascii() {
        FALLBACK_ARCHIVE_NAME.to_string()
    } else {
        format!("{title}-images.zip")
    };
    HeaderValue::from_str(&format!("attachment; filename=\"{name}\"")).unwrap_or_else(|_| {
        HeaderValue::from_static("attachment; filename=\"images.zip\"")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_get_a_counter() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("Knight-Red.png".into(), &mut used), "Knight-Red.png");
        assert_eq!(unique_name("Knight-Red.png".into(), &mut used), "Knight-Red-2.png");
        assert_eq!(unique_name("Knight-Red.png".into(), &mut used), "Knight-Red-3.png");
    }

    #[test]
    fn archive_contains_every_entry() {
        let entries = vec![
            ("a.png".to_string(), Bytes::from_static(b"first")),
            ("b.png".to_string(), Bytes::from_static(b"second")),
        ];
        let bytes = build_archive(&entries).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(archive.len(), 2);
        assert!(names.contains(&"a.png"));
        assert!(names.contains(&"b.png"));
    }

    #[test]
    fn disposition_falls_back_for_unusable_titles() {
        assert_eq!(
            archive_disposition("Knight"),
            "attachment; filename=\"Knight-images.zip\""
        );
        assert_eq!(archive_disposition("  "), "attachment; filename=\"images.zip\"");
        assert_eq!(archive_disposition("Ritter Ü"), "attachment; filename=\"images.zip\"");
    }
}
