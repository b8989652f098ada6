use clap::{Parser, ValueEnum};
use log::LevelFilter;

use catalog_core::RangePolicy;

use super::logging::LogDestination;

/// Command-line arguments for the catalog binary.
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Browse the video catalog in a terminal")]
pub struct CliArgs {
    /// Videos collection: an http(s) URL or a file path.
    #[arg(
        long,
        env = "CATALOG_VIDEOS",
        default_value = "docs/data/videos.json",
        value_name = "URL|PATH"
    )]
    pub videos: String,

    /// Rating collection: an http(s) URL or a file path.
    #[arg(
        long,
        env = "CATALOG_RATING",
        default_value = "docs/data/rating.json",
        value_name = "URL|PATH"
    )]
    pub rating: String,

    /// Page URL whose query string seeds the view state.
    #[arg(
        long = "url",
        env = "CATALOG_PAGE_URL",
        default_value = "https://localhost/index.html",
        value_name = "URL"
    )]
    pub page_url: String,

    /// Show the performer listing for this name instead of the main listing.
    #[arg(long, env = "CATALOG_PERFORMER", value_name = "NAME")]
    pub performer: Option<String>,

    /// Behaviour when a recency window leaves nothing to show.
    #[arg(long, env = "CATALOG_RANGE_POLICY", value_enum, default_value_t = RangePolicyArg::Strict)]
    pub range_policy: RangePolicyArg,

    /// Display locale for numbers and dates (`uk` or `en`).
    #[arg(long, env = "CATALOG_LOCALE", default_value = "uk")]
    pub locale: String,

    #[arg(long, env = "CATALOG_LOG_DESTINATION", value_enum, default_value_t = LogDestination::File)]
    pub log_destination: LogDestination,

    /// error, warn, info, debug, trace or off.
    #[arg(long, env = "CATALOG_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Give up on the initial load after this many seconds.
    #[arg(long, default_value_t = 60)]
    pub load_timeout_secs: u64,

    /// Render the first page and exit without reading commands.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangePolicyArg {
    /// Drop undated and out-of-window records, even if nothing remains.
    Strict,
    /// Ignore the window when it would leave nothing to show.
    Fallback,
}

impl From<RangePolicyArg> for RangePolicy {
    fn from(arg: RangePolicyArg) -> Self {
        match arg {
            RangePolicyArg::Strict => RangePolicy::Strict,
            RangePolicyArg::Fallback => RangePolicy::FallbackWhenEmpty,
        }
    }
}
