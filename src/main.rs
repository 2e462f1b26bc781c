// src/main.rs
// =============================================================================
// Entry point of the sandwich-client CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the page or JSON)
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success, 1 = something failed to load,
//    2 = error)
// =============================================================================

mod cli;

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use url::Url;

use cli::{Cli, Commands};
use sandwich_client::api::ApiClient;
use sandwich_client::include::{DirSource, FragmentSource, HttpSource, IncludeReport, Includer};
use sandwich_client::menu::{load_menu, MenuOutcome};
use sandwich_client::{logging, resolve_path, HtmlPage};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Include {
            page,
            root,
            base_url,
            location,
            timeout,
            output,
            json,
        } => {
            let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));
            handle_include(&page, root, base_url, location, timeout, output, json).await
        }
        Commands::Menu {
            page,
            api_url,
            output,
            json,
        } => handle_menu(&page, &api_url, output, json).await,
        Commands::Orders { api_url } => {
            let api = ApiClient::new(&api_url)?;
            print_json_or_fail(api.get_orders().await)
        }
        Commands::Reviews { api_url } => {
            let api = ApiClient::new(&api_url)?;
            print_json_or_fail(api.get_reviews().await)
        }
        Commands::Resolve {
            declared,
            document_path,
        } => {
            println!("{}", resolve_path(&declared, &document_path));
            Ok(0)
        }
    }
}

// Handles the 'include' subcommand
//
// A URL page is fetched and its fragments come from the same site (or
// --base-url). A file page takes its fragments from --root, or from
// --base-url when given.
async fn handle_include(
    page_arg: &str,
    root: Option<PathBuf>,
    base_url: Option<String>,
    location: Option<String>,
    timeout: Option<Duration>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let (page, reports) = if let Some(url) = parse_http_url(page_arg) {
        let base = match &base_url {
            Some(base) => {
                Url::parse(base).with_context(|| format!("invalid base URL '{}'", base))?
            }
            None => url.clone(),
        };
        let source = HttpSource::new(base, timeout)?;
        let markup = source
            .fetch_url(url.clone())
            .await
            .with_context(|| format!("could not fetch page {}", url))?;

        let page = HtmlPage::parse(&markup, location.unwrap_or_else(|| url.path().to_string()));
        let reports = run_includes(&page, source).await;
        (page, reports)
    } else {
        let path = Path::new(page_arg);
        let markup = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("could not read page {}", path.display()))?;

        let root = match root {
            Some(root) => root,
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let location = match location {
            Some(location) => location,
            None => site_location(path, &root)?,
        };

        let page = HtmlPage::parse(&markup, location);
        let reports = match base_url {
            Some(base) => {
                let base = Url::parse(&base)
                    .with_context(|| format!("invalid base URL '{}'", base))?;
                run_includes(&page, HttpSource::new(base, timeout)?).await
            }
            None => run_includes(&page, DirSource::new(root)).await,
        };
        (page, reports)
    };

    let failed = reports.iter().filter(|r| !r.is_loaded()).count();
    for report in reports.iter().filter(|r| !r.is_loaded()) {
        warn!(declared = %report.declared, resolved = %report.resolved, "include failed");
    }
    info!(total = reports.len(), failed, "page assembled");

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        write_output(&page.to_html(), output.as_deref()).await?;
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

async fn run_includes<S: FragmentSource>(page: &HtmlPage, source: S) -> Vec<IncludeReport> {
    // A fresh Includer runs exactly once, so this is never None
    Includer::new(source).run(page).await.unwrap_or_default()
}

// Handles the 'menu' subcommand
async fn handle_menu(
    page_path: &Path,
    api_url: &str,
    output: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let markup = tokio::fs::read_to_string(page_path)
        .await
        .with_context(|| format!("could not read page {}", page_path.display()))?;
    let root = page_path.parent().unwrap_or_else(|| Path::new("."));
    let page = HtmlPage::parse(&markup, site_location(page_path, root)?);
    let api = ApiClient::new(api_url)?;

    let outcome = load_menu(&page, &api).await;

    if json {
        let items = match &outcome {
            MenuOutcome::Loaded(items) => items.clone(),
            _ => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if outcome != MenuOutcome::MissingContainer {
        write_output(&page.to_html(), output.as_deref()).await?;
    }

    Ok(match outcome {
        MenuOutcome::Loaded(_) | MenuOutcome::Empty => 0,
        MenuOutcome::Failed(_) | MenuOutcome::MissingContainer => 1,
    })
}

fn print_json_or_fail<T: serde::Serialize>(value: Option<T>) -> Result<i32> {
    match value {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(0)
        }
        None => Ok(1),
    }
}

async fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("could not write {}", path.display()))?;
            info!(file = %path.display(), "page written");
        }
        None => println!("{}", html),
    }
    Ok(())
}

// Only http(s) URLs count; anything else is treated as a file path
fn parse_http_url(arg: &str) -> Option<Url> {
    Url::parse(arg)
        .ok()
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}

// The page's path on the site whose "/" is `root`, e.g. /menu/index.html
fn site_location(page: &Path, root: &Path) -> Result<String> {
    let page = page
        .canonicalize()
        .with_context(|| format!("could not find page {}", page.display()))?;
    let root = root
        .canonicalize()
        .with_context(|| format!("could not find root {}", root.display()))?;
    let relative = page
        .strip_prefix(&root)
        .map_err(|_| anyhow!("page {} is outside root {}", page.display(), root.display()))?;

    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    Ok(format!("/{}", segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("http://localhost:5500/index.html").is_some());
        assert!(parse_http_url("https://shop.example/menu/").is_some());
        assert!(parse_http_url("site/index.html").is_none());
        assert!(parse_http_url("file:///tmp/index.html").is_none());
    }

    #[test]
    fn test_site_location_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("menu")).unwrap();
        let page = dir.path().join("menu/index.html");
        std::fs::write(&page, "<p></p>").unwrap();

        assert_eq!(site_location(&page, dir.path()).unwrap(), "/menu/index.html");
        assert_eq!(
            site_location(&page, &dir.path().join("menu")).unwrap(),
            "/index.html"
        );
    }

    #[test]
    fn test_site_location_outside_root() {
        let site = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let page = other.path().join("index.html");
        std::fs::write(&page, "<p></p>").unwrap();

        assert!(site_location(&page, site.path()).is_err());
    }

    #[tokio::test]
    async fn test_include_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::create_dir_all(dir.path().join("components")).unwrap();
        std::fs::write(
            dir.path().join("pages/order.html"),
            concat!(
                r#"<header data-include="../components/header.html"></header>"#,
                r#"<footer data-include="/components/missing.html"></footer>"#
            ),
        )
        .unwrap();
        std::fs::write(dir.path().join("components/header.html"), "<nav>Order</nav>").unwrap();
        let output = dir.path().join("out.html");

        let code = handle_include(
            dir.path().join("pages/order.html").to_str().unwrap(),
            Some(dir.path().to_path_buf()),
            None,
            None,
            None,
            Some(output.clone()),
            false,
        )
        .await
        .unwrap();

        assert_eq!(code, 1);
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<nav>Order</nav>"));
        assert!(html.contains("Error loading /components/missing.html"));
    }
}
