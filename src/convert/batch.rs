// src/convert/batch.rs
// =============================================================================
// Converts a whole tree of stored HTML files to Markdown.
//
// The output tree mirrors the input tree:
//   <input_dir>/concepts/agents.html -> <output_dir>/concepts/agents.md
//
// One bad file never stops the batch: its error is logged, recorded in the
// report, and the next file is processed.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use jwalk::{Parallelism, WalkDir};
use serde::Serialize;
use tracing::{info, warn};

use super::markdown::html_to_markdown;
use crate::config::ConvertConfig;
use crate::error::ConversionError;

const INPUT_EXTENSION: &str = "html";
const OUTPUT_EXTENSION: &str = "md";

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertReport {
    /// HTML files found under the input directory
    pub discovered: usize,
    /// Markdown files written
    pub converted: Vec<PathBuf>,
    /// Input files that could not be converted
    pub failed: Vec<PathBuf>,
}

// Finds every .html file under `root`, sorted by path
pub fn discover_html_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable directory entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == INPUT_EXTENSION))
        .collect();

    files.sort();
    files
}

// Where the Markdown for `html_file` goes
pub fn output_path_for(
    html_file: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf, ConversionError> {
    let relative = html_file
        .strip_prefix(input_dir)
        .map_err(|_| ConversionError::OutsideRoot {
            path: html_file.to_path_buf(),
            root: input_dir.to_path_buf(),
        })?;

    Ok(output_dir.join(relative).with_extension(OUTPUT_EXTENSION))
}

// Converts one file and returns the path written
pub fn convert_file(
    html_file: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf, ConversionError> {
    let output_path = output_path_for(html_file, input_dir, output_dir)?;

    let bytes = fs::read(html_file).map_err(|source| ConversionError::Read {
        path: html_file.to_path_buf(),
        source,
    })?;
    // Saved pages are text, but don't give up on a stray invalid byte
    let html = String::from_utf8_lossy(&bytes);

    let markdown = html_to_markdown(&html);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConversionError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&output_path, markdown).map_err(|source| ConversionError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(output_path)
}

// Converts every stored page under config.input_dir
pub fn convert_all(config: &ConvertConfig) -> ConvertReport {
    let files = discover_html_files(&config.input_dir);
    info!("found {} HTML files to convert", files.len());

    let mut report = ConvertReport {
        discovered: files.len(),
        ..Default::default()
    };

    for file in files {
        match convert_file(&file, &config.input_dir, &config.output_dir) {
            Ok(output) => {
                info!("converted {} -> {}", file.display(), output.display());
                report.converted.push(output);
            }
            Err(e) => {
                warn!("error converting {}: {e}", file.display());
                report.failed.push(file);
            }
        }
    }

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        output = %config.output_dir.display(),
        "conversion completed"
    );
    report
}

// Runs convert_all on tokio's blocking pool
pub async fn convert_all_blocking(config: ConvertConfig) -> anyhow::Result<ConvertReport> {
    let report = tokio::task::spawn_blocking(move || convert_all(&config))
        .await
        .context("conversion task panicked")?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample_tree(root: &Path) {
        write(
            &root.join("index.html"),
            "<html><body><nav>Menu</nav><main><h2>Welcome</h2><p>Start here.</p></main></body></html>",
        );
        write(
            &root.join("concepts").join("agents.html"),
            r#"<html><body><article><p>Agents <a href="/tools">use tools</a>.</p></article></body></html>"#,
        );
        write(&root.join("page_list.json"), r#"["/"]"#);
    }

    fn read_tree(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let path = e.path();
                let bytes = fs::read(&path).unwrap();
                (path.strip_prefix(root).unwrap().to_path_buf(), bytes)
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_discover_only_html_sorted() {
        let dir = tempfile::tempdir().unwrap();
        sample_tree(dir.path());

        let files = discover_html_files(dir.path());
        assert_eq!(
            files,
            vec![
                dir.path().join("concepts").join("agents.html"),
                dir.path().join("index.html"),
            ]
        );
    }

    #[test]
    fn test_output_path_mirrors_input() {
        let out = output_path_for(
            Path::new("in/concepts/agents.html"),
            Path::new("in"),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(out, Path::new("out").join("concepts").join("agents.md"));

        let outside = output_path_for(Path::new("elsewhere/a.html"), Path::new("in"), Path::new("out"));
        assert!(matches!(outside, Err(ConversionError::OutsideRoot { .. })));
    }

    #[test]
    fn test_convert_all_mirrors_tree() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        sample_tree(input.path());

        let config = ConvertConfig::new(input.path(), output.path().join("md")).unwrap();
        let report = convert_all(&config);

        assert_eq!(report.discovered, 2);
        assert!(report.failed.is_empty());

        let index = fs::read_to_string(output.path().join("md").join("index.md")).unwrap();
        assert!(index.contains("Welcome"));
        assert!(index.contains("Start here."));
        assert!(!index.contains("Menu"));

        let agents =
            fs::read_to_string(output.path().join("md").join("concepts").join("agents.md")).unwrap();
        assert!(agents.contains("[use tools](/tools)"));
    }

    #[test]
    fn test_convert_twice_is_byte_identical() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        sample_tree(input.path());

        let first = ConvertConfig::new(input.path(), output.path().join("a")).unwrap();
        let second = ConvertConfig::new(input.path(), output.path().join("b")).unwrap();
        convert_all(&first);
        convert_all(&second);

        assert_eq!(
            read_tree(&output.path().join("a")),
            read_tree(&output.path().join("b"))
        );
    }

    #[tokio::test]
    async fn test_blocking_pool_conversion() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        sample_tree(input.path());

        let config = ConvertConfig::new(input.path(), output.path()).unwrap();
        let report = convert_all_blocking(config).await.unwrap();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.converted.len(), 2);
        assert!(output.path().join("concepts").join("agents.md").is_file());
    }

    #[test]
    fn test_bad_file_does_not_stop_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        sample_tree(input.path());

        // A file where the output directory for "concepts" should go
        let md_root = output.path().join("md");
        write(&md_root.join("concepts"), "blocking file");

        let config = ConvertConfig::new(input.path(), &md_root).unwrap();
        let report = convert_all(&config);

        assert_eq!(report.failed, vec![input.path().join("concepts").join("agents.html")]);
        assert_eq!(report.converted, vec![md_root.join("index.md")]);
    }
}
