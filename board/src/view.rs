//! Plain-text rendering of the filter bar, the job list and a job's details.

use common::{FilterKey, FilterSet, JobDetail, JobSummary};

use crate::history::Location;
use crate::loader::LoadState;

const LOADING: &str = "Loading...";

pub fn render_filters(filters: &FilterSet) -> String {
    let mut out = String::new();
    for key in FilterKey::ALL {
        let line = match filters.get(key.as_str()) {
            Some(value) => format!("  {:<11} {}\n", key.label(), value),
            None => format!("  {:<11} [{}]\n", key.label(), key.label()),
        };
        out.push_str(&line);
    }

    if !filters.is_empty() {
        let chips: Vec<String> = filters.iter().map(|(_, value)| format!("[{} ×]", value)).collect();
        out.push_str(&format!("  {}   Clear All\n", chips.join(" ")));
    }
    out
}

pub fn render_list(filters: &FilterSet, jobs: &LoadState<Vec<JobSummary>>) -> String {
    let body = match jobs {
        LoadState::Idle | LoadState::Loading => LOADING.to_string(),
        LoadState::Failed(e) => format!("Could not load jobs: {}", e),
        LoadState::Loaded(jobs) if jobs.is_empty() => "No jobs found.".to_string(),
        LoadState::Loaded(jobs) => jobs
            .iter()
            .enumerate()
            .map(|(n, job)| format!("{:>3}. {}\n     {}", n + 1, job.title(), job.facet_line()))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    format!("{}\n{}\n", render_filters(filters), body)
}

/// `back` is where "Back to list" leads, filters included.
pub fn render_detail(back: &Location, job: &LoadState<JobDetail>) -> String {
    match job {
        LoadState::Idle | LoadState::Loading => format!("{}\n", LOADING),
        LoadState::Failed(e) => format!("< Back to list ({})\n\nCould not load job: {}\n", back, e),
        LoadState::Loaded(job) => format!(
            "< Back to list ({})\n\n{}\n{}\n\n{}\n",
            back,
            job.title(),
            job.facet_line(),
            job.description()
        ),
    }
}

/// Lists the enumerated choices for each filter key.
pub fn render_options() -> String {
    FilterKey::ALL
        .into_iter()
        .map(|key| match key.options() {
            [] => format!("{:<11} (free text)\n", key.as_str()),
            options => format!("{:<11} {}\n", key.as_str(), options.join(", ")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jobs() -> Vec<JobSummary> {
        serde_json::from_value(json!([
            {"id": 1, "title": "Rust Engineer", "department": {"name": "IT"}, "location": "Panjim", "function": {"name": "Development"}},
            {"id": 2, "title": "Recruiter", "department": "HR", "location": {"name": "Verna"}, "function": null}
        ]))
        .unwrap()
    }

    #[test]
    fn test_filters_show_placeholders_when_empty() {
        let out = render_filters(&FilterSet::new());
        assert!(out.contains("[Department]"));
        assert!(out.contains("[Search for Job]"));
        assert!(!out.contains("Clear All"));
    }

    #[test]
    fn test_filters_show_chips_and_clear_all() {
        let filters: FilterSet = [("department", "IT"), ("search", "rust")].into_iter().collect();
        let out = render_filters(&filters);
        assert!(out.contains("[IT ×]"));
        assert!(out.contains("[rust ×]"));
        assert!(out.contains("Clear All"));
    }

    #[test]
    fn test_list_states_are_distinct() {
        let filters = FilterSet::new();
        assert!(render_list(&filters, &LoadState::Loading).contains("Loading..."));
        assert!(render_list(&filters, &LoadState::Loaded(vec![])).contains("No jobs found."));
        let failed = render_list(&filters, &LoadState::Failed("timed out".to_string()));
        assert!(failed.contains("Could not load jobs: timed out"));
        assert!(!failed.contains("Loading..."));
    }

    #[test]
    fn test_list_normalizes_fields() {
        let out = render_list(&FilterSet::new(), &LoadState::Loaded(jobs()));
        assert!(out.contains("  1. Rust Engineer"));
        assert!(out.contains("IT | Panjim | Development"));
        assert!(out.contains("  2. Recruiter"));
        assert!(out.contains("HR | Verna | "));
    }

    #[test]
    fn test_list_renders_odd_records() {
        let jobs: Vec<JobSummary> = serde_json::from_value(json!([
            {"title": "No id"},
            {"id": 1.5, "title": 7}
        ]))
        .unwrap();
        let out = render_list(&FilterSet::new(), &LoadState::Loaded(jobs));
        assert!(out.contains("  1. No id"));
        assert!(out.contains("  2. 7"));
    }

    #[test]
    fn test_detail_rendering() {
        let job: JobDetail = serde_json::from_value(json!({
            "id": 42,
            "title": "Rust Engineer",
            "department": {"name": "IT"},
            "location": "Panjim",
            "function": "Development",
            "description": "Own the ingestion pipeline."
        }))
        .unwrap();
        let back = Location::parse("/jobs?department=IT");
        let out = render_detail(&back, &LoadState::Loaded(job));
        assert!(out.starts_with("< Back to list (/jobs?department=IT)"));
        assert!(out.contains("IT | Panjim | Development"));
        assert!(out.contains("Own the ingestion pipeline."));

        assert_eq!(render_detail(&back, &LoadState::Loading), "Loading...\n");
        assert!(
            render_detail(&back, &LoadState::Failed("404".to_string()))
                .contains("Could not load job: 404")
        );
    }

    #[test]
    fn test_options_list_every_key() {
        let out = render_options();
        assert!(out.contains("search      (free text)"));
        assert!(out.contains("department  IT, Management, HR, CX, Development"));
        assert!(out.contains("Mapusa"));
        assert!(out.contains("Conference"));
    }
}
