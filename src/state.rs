//! Link-state persistence and novelty detection.
//!
//! The state file carries the previous run's link set as plain text, one
//! absolute URL per line. Loading and diffing use set semantics; writing
//! does not. The file is overwritten with the extractor's raw ordered
//! list, so it may contain duplicates that the next load collapses again.
//!
//! Links compare by exact string equality. Trailing slashes or query-string
//! variance on the listing page therefore resurface as "new" links; the
//! state layer does not normalize.

use std::collections::HashSet;
use std::path::Path;

use tokio::fs;
use tracing::{debug, info, instrument};

use crate::error::StateError;

/// Diff the freshly extracted links against the persisted set.
///
/// # Returns
///
/// The set of links present in `current` but absent from the state file.
/// When the state file does not exist yet (first run), every current link is
/// new. No ordering is guaranteed over the returned set.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn diff_new(path: &str, current: &[String]) -> Result<HashSet<String>, StateError> {
    let current_set: HashSet<String> = current.iter().cloned().collect();

    if !Path::new(path).exists() {
        info!(
            count = current_set.len(),
            "No previous link state; treating every link as new"
        );
        return Ok(current_set);
    }

    let raw = fs::read_to_string(path).await.map_err(|e| StateError::Read {
        path: path.to_string(),
        source: e,
    })?;
    let previous: HashSet<String> = raw
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let new_links: HashSet<String> = current_set.difference(&previous).cloned().collect();
    if new_links.is_empty() {
        info!(known = previous.len(), "No new links found");
    } else {
        info!(
            count = new_links.len(),
            known = previous.len(),
            "New links found"
        );
        debug!(?new_links, "New link set");
    }

    Ok(new_links)
}

/// Overwrite the state file with the current run's link list.
///
/// The raw ordered sequence is written as-is, newline-joined, duplicates
/// and all. There is no atomic-write guarantee; a crash mid-write leaves a
/// truncated file, which the next run simply treats as a smaller known set.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn save(path: &str, links: &[String]) -> Result<(), StateError> {
    fs::write(path, links.join("\n"))
        .await
        .map_err(|e| StateError::Write {
            path: path.to_string(),
            source: e,
        })?;
    info!(count = links.len(), "Persisted link state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("links.txt").to_str().unwrap().to_string()
    }

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_state_file_reports_all_links_new() {
        let dir = tempfile::tempdir().unwrap();
        let current = links(&["https://n.example/a", "https://n.example/b"]);

        let new = diff_new(&state_path(&dir), &current).await.unwrap();
        assert_eq!(new.len(), 2);
        assert!(new.contains("https://n.example/a"));
        assert!(new.contains("https://n.example/b"));
    }

    #[tokio::test]
    async fn test_diff_is_set_difference_regardless_of_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        save(&path, &links(&["https://n.example/b", "https://n.example/a"]))
            .await
            .unwrap();

        let current = links(&[
            "https://n.example/a",
            "https://n.example/c",
            "https://n.example/a",
            "https://n.example/b",
        ]);
        let new = diff_new(&path, &current).await.unwrap();
        assert_eq!(new, HashSet::from(["https://n.example/c".to_string()]));
    }

    #[tokio::test]
    async fn test_exact_string_identity_no_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        save(&path, &links(&["https://n.example/a"])).await.unwrap();

        // A trailing slash is a different link as far as the state is concerned.
        let new = diff_new(&path, &links(&["https://n.example/a/"]))
            .await
            .unwrap();
        assert_eq!(new.len(), 1);
    }

    #[tokio::test]
    async fn test_save_writes_raw_list_with_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        let current = links(&["https://n.example/a", "https://n.example/a"]);

        save(&path, &current).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "https://n.example/a\nhttps://n.example/a");
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        save(&path, &links(&["https://n.example/old"])).await.unwrap();
        save(&path, &links(&["https://n.example/new"])).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "https://n.example/new");
    }

    // The full novelty cycle the tool exists for: a listing that grows by one
    // article produces exactly that article, and an unchanged listing
    // produces nothing.
    #[tokio::test]
    async fn test_two_run_novelty_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        let x = "https://n.example/articles/x".to_string();
        let y = "https://n.example/articles/y".to_string();

        // Prior run saw only X.
        save(&path, std::slice::from_ref(&x)).await.unwrap();

        // This run extracts X and Y; only Y is new.
        let extracted = vec![x.clone(), y.clone()];
        let new = diff_new(&path, &extracted).await.unwrap();
        assert_eq!(new, HashSet::from([y.clone()]));
        save(&path, &extracted).await.unwrap();

        // Re-running against an unchanged listing finds nothing new.
        let new_again = diff_new(&path, &extracted).await.unwrap();
        assert!(new_again.is_empty());
    }
}
