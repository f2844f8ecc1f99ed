//! Building a whole site: static assets plus one page per markdown file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::page::{PageError, assemble_page};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("Failed to generate page from {path}: {source}")]
    Page { path: PathBuf, source: PageError },
}

/// What a build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SiteSummary {
    pub pages: usize,
    pub assets: usize,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Regenerate the output directory from scratch.
pub fn generate_site(config: &SiteConfig) -> Result<SiteSummary, SiteError> {
    let output = &config.output_dir;
    if output.exists() {
        fs::remove_dir_all(output).map_err(io_error(output))?;
    }
    fs::create_dir_all(output).map_err(io_error(output))?;

    let assets = if config.static_dir.is_dir() {
        copy_static(&config.static_dir, output, &config.template)?
    } else {
        log::warn!(
            "Static directory {} not found, skipping assets",
            config.static_dir.display()
        );
        0
    };

    let template = fs::read_to_string(&config.template).map_err(io_error(&config.template))?;
    let pages = generate_pages_recursive(
        &config.content_dir,
        &template,
        output,
        &config.base_path,
    )?;

    Ok(SiteSummary { pages, assets })
}

/// Copy every file under `static_dir` into `output`, keeping the directory
/// layout. The page template is skipped if it lives there.
pub fn copy_static(static_dir: &Path, output: &Path, template: &Path) -> Result<usize, SiteError> {
    let template = fs::canonicalize(template).ok();
    let mut copied = 0;

    for entry in WalkDir::new(static_dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(static_dir).unwrap_or(entry.path());
        let dest = output.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(io_error(&dest))?;
            continue;
        }
        if template.is_some() && fs::canonicalize(entry.path()).ok() == template {
            continue;
        }

        log::debug!("Copying {} to {}", entry.path().display(), dest.display());
        fs::copy(entry.path(), &dest).map_err(io_error(entry.path()))?;
        copied += 1;
    }

    Ok(copied)
}

/// Render one markdown file into `dest_path` through `template`.
pub fn generate_page(
    from_path: &Path,
    template: &str,
    dest_path: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    log::info!(
        "Generating page from {} to {}",
        from_path.display(),
        dest_path.display()
    );

    let markdown = fs::read_to_string(from_path).map_err(io_error(from_path))?;
    let html = assemble_page(&markdown, template, base_path).map_err(|source| SiteError::Page {
        path: from_path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(dest_path, html).map_err(io_error(dest_path))
}

/// Generate a page for every `.md` file under `content_dir`, mirroring
/// its relative path under `dest_dir` with an `.html` extension.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> Result<usize, SiteError> {
    let mut generated = 0;

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        let dest = dest_dir.join(relative).with_extension("html");
        generate_page(path, template, &dest, base_path)?;
        generated += 1;
    }

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copies_nested_static_files_except_template() {
        let dir = TempDir::new().unwrap();
        let static_dir = dir.path().join("static");
        let output = dir.path().join("public");
        write(&static_dir.join("index.css"), "body {}");
        write(&static_dir.join("images/logo.png"), "png");
        write(&static_dir.join("template.html"), "{{ Content }}");
        fs::create_dir_all(&output).unwrap();

        let copied = copy_static(&static_dir, &output, &static_dir.join("template.html")).unwrap();

        assert_eq!(copied, 2);
        assert!(output.join("index.css").is_file());
        assert!(output.join("images/logo.png").is_file());
        assert!(!output.join("template.html").exists());
    }

    #[test]
    fn only_markdown_files_become_pages() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        let output = dir.path().join("public");
        write(&content.join("index.md"), "# Home");
        write(&content.join("blog/post.md"), "# Post\n\nHello");
        write(&content.join("notes.txt"), "ignored");

        let count = generate_pages_recursive(&content, "{{ Title }}|{{ Content }}", &output, "/")
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(output.join("blog/post.html")).unwrap(),
            "Post|<div class=\"markdown-body\"><h1>Post</h1><p>Hello</p></div>"
        );
        assert!(!output.join("notes.html").exists());
    }

    #[test]
    fn broken_page_names_its_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bad.md");
        write(&source, "no title here");

        let err = generate_page(&source, "{{ Content }}", &dir.path().join("bad.html"), "/")
            .unwrap_err();

        match err {
            SiteError::Page { path, source } => {
                assert_eq!(path, dir.path().join("bad.md"));
                assert!(matches!(source, PageError::MissingTitle));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
