use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use jobsearch_core::{AppViewModel, FilterState, JobRowView, Provider, SearchPhase};

const SUMMARY_MAX_CHARS: usize = 200;

/// Renders the whole screen as lines of text.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "== Job Aggregator | provider: {} | host: {} | key: {}",
        view.provider.label(),
        if view.api_host.is_empty() { "(none)" } else { view.api_host.as_str() },
        if view.has_api_key { "set" } else { "missing" }
    ));
    if let Some(warning) = &view.host_warning {
        lines.push(format!("warning: {warning}"));
    }

    let mut summary = format!("{} results", view.job_count);
    if let Some(limits) = &view.rate_limits {
        if let Some(jobs) = &limits.jobs_remaining {
            summary.push_str(&format!(" | Jobs left: {jobs}"));
        }
        if let Some(requests) = &limits.requests_remaining {
            summary.push_str(&format!(" | Requests left: {requests}"));
        }
    }
    lines.push(summary);

    if view.phase == SearchPhase::Loading {
        lines.push("Loading jobs...".to_string());
    }
    if let Some(error) = &view.error {
        lines.push(format!("error: {error}"));
    }
    if !view.is_loading() && view.error.is_none() && view.jobs.is_empty() {
        lines.push("No jobs to show yet. Run a search after adding your API key.".to_string());
    }

    for (index, job) in view.jobs.iter().enumerate() {
        let position = view.offset + index as u64 + 1;
        lines.extend(format_job(position, job));
    }

    lines.push(format!(
        "{} | Offset: {} | {}",
        if view.can_go_previous { "< prev" } else { "  ----" },
        view.offset,
        if view.can_go_next { "next >" } else { "----  " }
    ));
    lines.push(provider_hint(view.provider).to_string());
    lines
}

/// One-line description of the unsubmitted form.
pub fn render_draft(draft: &FilterState, provider: Provider) -> String {
    let limit = draft
        .limit
        .map_or_else(|| "(unset)".to_string(), |limit| limit.to_string());
    match provider {
        Provider::Active => format!(
            "draft: title='{}' location='{}' limit={} window=Last 24 hours (modified)",
            draft.title_filter, draft.location_filter, limit
        ),
        Provider::Fantastic => format!(
            "draft: title='{}' location='{}' description='{}' source='{}' remote={} ai={} window={} limit={}",
            draft.title_filter,
            draft.location_filter,
            draft.description_filter,
            draft.source,
            match draft.remote.as_str() {
                "" => "any",
                "true" => "yes",
                _ => "no",
            },
            if draft.include_ai { "on" } else { "off" },
            draft.time_window.label(),
            limit
        ),
    }
}

fn provider_hint(provider: Provider) -> &'static str {
    match provider {
        Provider::Active => {
            "Using Active Jobs DB: modified in the last 24 hours. Supported inputs: title, location, limit (10-100), offset. Description type is set to text."
        }
        Provider::Fantastic => {
            "Using Fantastic.jobs: title, location, remote, source, time window, and more are supported."
        }
    }
}

fn format_job(position: u64, job: &JobRowView) -> Vec<String> {
    let mut lines = vec![format!(
        "{position}. {}",
        if job.title.is_empty() { "(untitled)" } else { job.title.as_str() }
    )];

    let mut facts = Vec::new();
    if let Some(org) = &job.organization {
        facts.push(org.clone());
    }
    if !job.locations.is_empty() {
        facts.push(job.locations.join(", "));
    }
    if let Some(posted) = job.date_posted.as_deref().and_then(|raw| format_posted(raw, &Local)) {
        facts.push(posted);
    }
    if !facts.is_empty() {
        lines.push(format!("   {}", facts.join(" · ")));
    }

    let tags: Vec<String> = [
        job.source.clone(),
        job.remote.then(|| "Remote".to_string()),
        job.experience_level.clone(),
        job.employment_type.clone(),
    ]
    .into_iter()
    .flatten()
    .map(|tag| format!("[{tag}]"))
    .collect();
    if !tags.is_empty() {
        lines.push(format!("   {}", tags.join(" ")));
    }

    if let Some(url) = &job.url {
        lines.push(format!("   Apply: {url}"));
    }
    if let Some(logo) = &job.organization_logo {
        lines.push(format!("   Logo: {logo}"));
    }
    if let Some(summary) = &job.summary {
        lines.push(format!("   {}", truncate(summary, SUMMARY_MAX_CHARS)));
    }
    lines
}

/// Formats a posting timestamp in `tz`. Unparsable input yields `None`.
pub fn format_posted<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        })
        .ok()?;
    Some(utc.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
