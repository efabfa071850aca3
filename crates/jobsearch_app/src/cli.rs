use clap::{Parser, ValueEnum};
use jobsearch_core::{FilterState, RemoteFilter, TimeWindow, FANTASTIC_JOBS_HOST};

use crate::platform::logging::LogDestination;

/// Smallest limit the search form accepts.
pub const LIMIT_INPUT_MIN: i64 = 10;
/// Largest limit the search form accepts; providers may clamp further.
pub const LIMIT_INPUT_MAX: i64 = 500;

#[derive(Parser, Debug)]
#[command(
    name = "jobsearch",
    version,
    about = "Search job listings through the backend search proxy"
)]
pub struct Cli {
    /// Backend base URL; overrides JOBSEARCH_BACKEND_URL / BACKEND_URL.
    #[arg(long)]
    pub backend_url: Option<String>,
    /// X-RapidAPI-Key forwarded to the upstream API.
    #[arg(long, default_value = "")]
    pub api_key: String,
    /// X-RapidAPI-Host; also selects the provider.
    #[arg(long, default_value = FANTASTIC_JOBS_HOST)]
    pub api_host: String,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Comma-separated sources, e.g. workday,greenhouse.
    #[arg(long, default_value = "")]
    pub source: String,
    #[arg(long, value_enum, default_value_t = RemoteArg::Any)]
    pub remote: RemoteArg,
    #[arg(long, value_parser = parse_time_window, default_value = "24h")]
    pub time_window: TimeWindow,
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(LIMIT_INPUT_MIN..=LIMIT_INPUT_MAX))]
    pub limit: i64,
    /// Do not request AI insights.
    #[arg(long)]
    pub no_ai: bool,
    /// Run the initial search, print the results and exit.
    #[arg(long)]
    pub once: bool,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RemoteArg {
    Any,
    Yes,
    No,
}

impl From<RemoteArg> for RemoteFilter {
    fn from(arg: RemoteArg) -> Self {
        match arg {
            RemoteArg::Any => RemoteFilter::Any,
            RemoteArg::Yes => RemoteFilter::RemoteOnly,
            RemoteArg::No => RemoteFilter::OnSiteOnly,
        }
    }
}

pub fn parse_time_window(raw: &str) -> Result<TimeWindow, String> {
    TimeWindow::parse(raw).ok_or_else(|| {
        let options: Vec<_> = TimeWindow::ALL.iter().map(|w| w.as_str()).collect();
        format!("expected one of {}", options.join(", "))
    })
}

impl Cli {
    /// Initial contents of the search form.
    pub fn initial_filters(&self) -> FilterState {
        FilterState {
            title_filter: self.title.clone(),
            location_filter: self.location.clone(),
            description_filter: self.description.clone(),
            source: self.source.clone(),
            remote: self.remote.into(),
            include_ai: !self.no_ai,
            time_window: self.time_window,
            limit: Some(self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_initial_form() {
        let cli = Cli::try_parse_from(["jobsearch"]).unwrap();
        assert_eq!(cli.api_host, FANTASTIC_JOBS_HOST);
        assert_eq!(cli.initial_filters(), FilterState::default());
        assert!(!cli.once);
    }

    #[test]
    fn filters_come_from_flags() {
        let cli = Cli::try_parse_from([
            "jobsearch",
            "--title",
            "Rust",
            "--remote",
            "yes",
            "--time-window",
            "7d",
            "--limit",
            "150",
            "--no-ai",
        ])
        .unwrap();
        let filters = cli.initial_filters();
        assert_eq!(filters.title_filter, "Rust");
        assert_eq!(filters.remote, RemoteFilter::RemoteOnly);
        assert_eq!(filters.time_window, TimeWindow::SevenDays);
        assert_eq!(filters.limit, Some(150));
        assert!(!filters.include_ai);
    }

    #[test]
    fn limit_outside_form_range_is_rejected() {
        assert!(Cli::try_parse_from(["jobsearch", "--limit", "5"]).is_err());
        assert!(Cli::try_parse_from(["jobsearch", "--limit", "501"]).is_err());
        assert!(Cli::try_parse_from(["jobsearch", "--time-window", "weekly"]).is_err());
    }
}
