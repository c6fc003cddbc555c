// WHY: Turns SuttaCentral web links in translator notes into relative links to local files
// Files are rewritten only when at least one link resolved

use anyhow::{Context, Result};
use glob::glob;
use indicatif::ProgressBar;
use regex_automata::meta::Regex;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::segments::SegmentPathStore;

/// Links in the style of the translator's notes; groups are link text, document, segment
pub const SUTTACENTRAL_LINK_PATTERN: &str =
    r"\[([^\]]+)\]\(https://suttacentral\.net/([\w-]+)/en/brahmali/?#?([0-9.]*)\)";

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// `n` written with Unicode superscript digits
pub fn superscript_number(n: u64) -> String {
    n.to_string()
        .chars()
        .map(|c| c.to_digit(10).map_or(c, |d| SUPERSCRIPT_DIGITS[d as usize]))
        .collect()
}

/// Lexical relative path from directory `from_dir` to `to`
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    fn significant(path: &Path) -> Vec<Component<'_>> {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    let from = significant(from_dir);
    let target = significant(to);

    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Closing half of a markdown link, `](relative/path)`, pointing at `path`.
///
/// When `relative_to` has an extension it is taken to be a file and its
/// directory is used instead.
pub fn relative_link_target(path: &Path, relative_to: &Path) -> String {
    let base = if relative_to.extension().is_some() {
        relative_to.parent().unwrap_or(relative_to)
    } else {
        relative_to
    };
    let relative = relative_path(base, path);
    format!("]({})", relative.to_string_lossy().replace(' ', "%20"))
}

/// `[stem](relative/path)` for the file stored under `id`
pub fn obsidian_link_for_id(store: &SegmentPathStore, id: &str, relative_to: &Path) -> Result<String> {
    let Some(path) = store.get(id) else {
        anyhow::bail!("Unknown SuttaCentral id: {}", id);
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(format!("[{}{}", stem, relative_link_target(path, relative_to)))
}

/// Counts from a folder rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub links_rewritten: usize,
}

/// Rewrites SuttaCentral links against one segment store
pub struct LinkRewriter<'a> {
    store: &'a SegmentPathStore,
    pattern: Regex,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(store: &'a SegmentPathStore) -> Result<Self> {
        let pattern = Regex::new(SUTTACENTRAL_LINK_PATTERN)
            .context("Failed to compile SuttaCentral link pattern")?;
        Ok(Self { store, pattern })
    }

    /// Rewrite resolvable links in `text` for a file living in `file_dir`.
    /// Returns the new text and how many links were replaced.
    pub fn rewrite_text(&self, text: &str, file_dir: &Path) -> (String, usize) {
        let mut output = String::with_capacity(text.len());
        let mut copied_to = 0;
        let mut rewritten = 0;

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(label), Some(document)) =
                (caps.get_match(), caps.get_group(1), caps.get_group(2))
            else {
                continue;
            };
            let segment = caps
                .get_group(3)
                .map(|span| text[span.range()].trim_end_matches('.'))
                .unwrap_or("");
            let document = &text[document.range()];
            let id = if segment.is_empty() {
                document.to_string()
            } else {
                format!("{}:{}", document, segment)
            };

            let Some(path) = self.store.get(&id) else {
                debug!("No local file for {}", id);
                continue;
            };

            output.push_str(&text[copied_to..whole.start()]);
            output.push('[');
            output.push_str(&text[label.range()]);
            output.push_str(&relative_link_target(path, file_dir));
            copied_to = whole.end();
            rewritten += 1;
        }

        output.push_str(&text[copied_to..]);
        (output, rewritten)
    }

    /// Rewrite one markdown file in place; returns the number of links replaced
    pub async fn rewrite_file(&self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let (rewritten_text, links) = self.rewrite_text(&text, file_dir);
        if links > 0 && rewritten_text != text {
            fs::write(path, rewritten_text)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Rewrote {} links in {}", links, path.display());
        }
        Ok(links)
    }

    /// Rewrite every `.md` file below `folder`, ticking `progress` once per file
    pub async fn rewrite_folder(&self, folder: &Path, progress: &ProgressBar) -> Result<RewriteSummary> {
        let pattern = format!("{}/**/*.md", folder.display());
        debug!("Scanning for markdown with pattern: {}", pattern);

        let mut files = Vec::new();
        for entry in glob(&pattern).map_err(|e| anyhow::anyhow!("Failed to create glob pattern: {}", e))? {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => warn!("Glob iteration error: {}", e),
            }
        }
        progress.set_length(files.len() as u64);

        let mut summary = RewriteSummary::default();
        for path in &files {
            let links = self.rewrite_file(path).await?;
            summary.files_scanned += 1;
            if links > 0 {
                summary.files_changed += 1;
                summary.links_rewritten += links;
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Rewrote {} links in {} of {} markdown files",
            summary.links_rewritten, summary.files_changed, summary.files_scanned
        );
        Ok(summary)
    }
}

/// Rewrite resolvable SuttaCentral links in `text` for a file in `file_dir`
pub fn rewrite_suttacentral_links(text: &str, store: &SegmentPathStore, file_dir: &Path) -> Result<String> {
    Ok(LinkRewriter::new(store)?.rewrite_text(text, file_dir).0)
}

/// Rewrite one markdown file in place, writing only when something changed
pub async fn rewrite_links_in_file(path: &Path, store: &SegmentPathStore) -> Result<usize> {
    LinkRewriter::new(store)?.rewrite_file(path).await
}

/// Rewrite every markdown file below `folder`
pub async fn rewrite_links_in_folder(folder: &Path, store: &SegmentPathStore) -> Result<RewriteSummary> {
    LinkRewriter::new(store)?
        .rewrite_folder(folder, &ProgressBar::hidden())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SegmentPathStore {
        let mut store = SegmentPathStore::new();
        store
            .add("pli-tv-bu-vb-pj1", "", "/vault/Suttavibhanga/Pārājika 1.md")
            .unwrap();
        store
            .add("pli-tv-kd1:1.1", "pli-tv-kd1:4.10", "/vault/Khandhaka/Kd1 Great Chapter.md")
            .unwrap();
        store
    }

    #[test]
    fn test_superscript_number() {
        assert_eq!(superscript_number(0), "⁰");
        assert_eq!(superscript_number(1234567890), "¹²³⁴⁵⁶⁷⁸⁹⁰");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/vault/Notes"), Path::new("/vault/Khandhaka/Kd1.md")),
            PathBuf::from("../Khandhaka/Kd1.md")
        );
        assert_eq!(
            relative_path(Path::new("/vault"), Path::new("/vault/a/b.md")),
            PathBuf::from("a/b.md")
        );
        assert_eq!(relative_path(Path::new("/vault"), Path::new("/vault")), PathBuf::from("."));
    }

    #[test]
    fn test_relative_path_ignores_current_dir() {
        assert_eq!(
            relative_path(Path::new("./vault/Notes"), Path::new("vault/./Khandhaka/Kd1.md")),
            PathBuf::from("../Khandhaka/Kd1.md")
        );
    }

    #[test]
    fn test_link_target_encodes_spaces() {
        let target = relative_link_target(
            Path::new("/vault/Khandhaka/Kd1 Great Chapter.md"),
            Path::new("/vault/Notes"),
        );
        assert_eq!(target, "](../Khandhaka/Kd1%20Great%20Chapter.md)");
    }

    #[test]
    fn test_link_target_relative_to_file() {
        let target = relative_link_target(
            Path::new("/vault/Khandhaka/Kd1.md"),
            Path::new("/vault/Notes/index.md"),
        );
        assert_eq!(target, "](../Khandhaka/Kd1.md)");
    }

    #[test]
    fn test_obsidian_link_for_id() {
        let store = store();
        let link = obsidian_link_for_id(&store, "pli-tv-kd1:2.3", Path::new("/vault/Notes")).unwrap();
        assert_eq!(link, "[Kd1 Great Chapter](../Khandhaka/Kd1%20Great%20Chapter.md)");
        assert!(obsidian_link_for_id(&store, "pli-tv-kd2:1.1", Path::new("/vault")).is_err());
    }

    #[test]
    fn test_rewrite_segment_link() {
        let store = store();
        let text = "See [Kd 1.2.3](https://suttacentral.net/pli-tv-kd1/en/brahmali#2.3.) for more.";
        let rewritten = rewrite_suttacentral_links(text, &store, Path::new("/vault/Notes")).unwrap();
        assert_eq!(
            rewritten,
            "See [Kd 1.2.3](../Khandhaka/Kd1%20Great%20Chapter.md) for more."
        );
    }

    #[test]
    fn test_rewrite_document_link() {
        let store = store();
        let text = "[Pj 1](https://suttacentral.net/pli-tv-bu-vb-pj1/en/brahmali)";
        let rewritten = rewrite_suttacentral_links(text, &store, Path::new("/vault/Suttavibhanga")).unwrap();
        assert_eq!(rewritten, "[Pj 1](Pārājika%201.md)");
    }

    #[test]
    fn test_unresolved_links_left_alone() {
        let store = store();
        let text = "[Kd 2](https://suttacentral.net/pli-tv-kd2/en/brahmali#1.1) and \
                    [elsewhere](https://example.com/pli-tv-kd1/en/brahmali#1.1)";
        let rewriter = LinkRewriter::new(&store).unwrap();
        let (rewritten, links) = rewriter.rewrite_text(text, Path::new("/vault"));
        assert_eq!(rewritten, text);
        assert_eq!(links, 0);
    }

    #[test]
    fn test_mixed_links_count() {
        let store = store();
        let text = "[a](https://suttacentral.net/pli-tv-kd1/en/brahmali/#1.1) \
                    [b](https://suttacentral.net/pli-tv-kd9/en/brahmali#1.1) \
                    [c](https://suttacentral.net/pli-tv-bu-vb-pj1/en/brahmali/)";
        let rewriter = LinkRewriter::new(&store).unwrap();
        let (rewritten, links) = rewriter.rewrite_text(text, Path::new("/vault"));
        assert_eq!(links, 2);
        assert!(rewritten.starts_with("[a](Khandhaka/Kd1%20Great%20Chapter.md) [b](https://"));
        assert!(rewritten.ends_with("[c](Suttavibhanga/Pārājika%201.md)"));
    }
}
