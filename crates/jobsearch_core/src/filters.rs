use serde::{Serialize, Serializer};

/// Limit assumed by pagination when the filter carries none.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// User-supplied header values forwarded to the backend proxy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub api_key: String,
    pub api_host: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: api_host.into(),
        }
    }

    /// Both fields are required before any request is issued.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_host.is_empty()
    }
}

/// Remote-work filter. Serialized the way the proxy expects the select value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoteFilter {
    #[default]
    Any,
    RemoteOnly,
    OnSiteOnly,
}

impl RemoteFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteFilter::Any => "",
            RemoteFilter::RemoteOnly => "true",
            RemoteFilter::OnSiteOnly => "false",
        }
    }
}

impl Serialize for RemoteFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Posting window offered by Fantastic.jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeWindow {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "hourly")]
    Hourly,
    #[serde(rename = "backfill")]
    Backfill,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::SevenDays,
        TimeWindow::Day,
        TimeWindow::Hourly,
        TimeWindow::Backfill,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::SevenDays => "7d",
            TimeWindow::Day => "24h",
            TimeWindow::Hourly => "hourly",
            TimeWindow::Backfill => "backfill",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::SevenDays => "Last 7 days",
            TimeWindow::Day => "Last 24 hours",
            TimeWindow::Hourly => "Hourly feed",
            TimeWindow::Backfill => "Backfill (6 months)",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Search criteria, replaced wholesale on every submission.
///
/// Field names match the proxy's wire format. `limit` is `None` when the
/// user entered something that is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub title_filter: String,
    pub location_filter: String,
    pub description_filter: String,
    pub source: String,
    pub remote: RemoteFilter,
    pub include_ai: bool,
    pub time_window: TimeWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            title_filter: String::new(),
            location_filter: String::new(),
            description_filter: String::new(),
            source: String::new(),
            remote: RemoteFilter::Any,
            include_ai: true,
            time_window: TimeWindow::Day,
            limit: Some(DEFAULT_PAGE_LIMIT),
        }
    }
}
