// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - include: assemble a page by resolving its data-include elements
// - menu:    render the sandwich menu into a page
// - orders / reviews: dump API data as JSON
// - resolve: show how an include path resolves against a page path
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sandwich_client::api::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "sandwich-client",
    version,
    about = "Client tools for the sandwich shop site",
    long_about = "Assembles pages from HTML include fragments, renders the sandwich menu \
                  and reads orders and reviews from the shop's REST API."
)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every data-include element of a page and print the result
    ///
    /// Example: sandwich-client include site/index.html --root site
    Include {
        /// Page to assemble: an http(s) URL or a file
        page: String,

        /// Directory that "/" maps to when reading fragments from disk
        /// (defaults to the page's directory)
        #[arg(long, conflicts_with = "base_url")]
        root: Option<PathBuf>,

        /// Fetch fragments over HTTP from this site instead of from disk
        #[arg(long)]
        base_url: Option<String>,

        /// Path of the page on its site, used to resolve relative includes
        #[arg(long)]
        location: Option<String>,

        /// Per-fragment timeout in seconds for HTTP fetches (0 waits forever)
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Write the assembled page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print a JSON report of every include instead of the page
        #[arg(long)]
        json: bool,
    },

    /// Render the sandwich menu into a page's #menu-container
    Menu {
        /// Page file containing the menu container
        page: PathBuf,

        /// Base URL of the REST API
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Write the rendered page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the menu items as JSON instead of the page
        #[arg(long)]
        json: bool,
    },

    /// Print all orders as JSON
    Orders {
        /// Base URL of the REST API
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Print all reviews as JSON
    Reviews {
        /// Base URL of the REST API
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Print the absolute path an include declaration resolves to
    ///
    /// Example: sandwich-client resolve ../parts/nav.html /shop/menu/index.html
    Resolve {
        /// The data-include value
        declared: String,

        /// Path of the page declaring it
        document_path: String,
    },
}
