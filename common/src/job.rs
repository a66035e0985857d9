use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Job identifier as the API sends it: usually a number or a string.
///
/// Floats, out-of-range numbers and other shapes are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(n) => write!(f, "{}", n),
            JobId::Text(s) => f.write_str(s),
            JobId::Other(value) => f.write_str(&scalar_text(value)),
        }
    }
}

/// A department, location or function as the API sends it.
///
/// Sometimes a bare string, sometimes an object carrying `name`. Anything
/// else lands in `Other` so one odd record never fails a whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Text(String),
    Named {
        name: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Other(Value),
}

/// Normalizes a polymorphic field to the string shown to the user.
///
/// Prefers the object's `name`, falls back to the plain string, and yields an
/// empty string for missing or unusable values.
pub fn display_name(field: Option<&Field>) -> String {
    match field {
        Some(Field::Text(s)) => s.clone(),
        Some(Field::Named { name, .. }) => name.clone(),
        Some(Field::Other(value)) => match value {
            Value::Object(map) => map.get("name").map(scalar_text).unwrap_or_default(),
            other => scalar_text(other),
        },
        None => String::new(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// The "department | location | function" line shown under a job title.
pub fn facet_line(
    department: Option<&Field>,
    location: Option<&Field>,
    function: Option<&Field>,
) -> String {
    format!(
        "{} | {} | {}",
        display_name(department),
        display_name(location),
        display_name(function)
    )
}

/// One entry of the jobs collection.
///
/// Every field is optional and tolerant of unexpected shapes. Fields the
/// board does not use are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobSummary {
    pub fn title(&self) -> String {
        display_name(self.title.as_ref())
    }

    pub fn facet_line(&self) -> String {
        facet_line(
            self.department.as_ref(),
            self.location.as_ref(),
            self.function.as_ref(),
        )
    }
}

/// A single job record, as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobDetail {
    pub fn title(&self) -> String {
        display_name(self.title.as_ref())
    }

    pub fn description(&self) -> String {
        display_name(self.description.as_ref())
    }

    pub fn facet_line(&self) -> String {
        facet_line(
            self.department.as_ref(),
            self.location.as_ref(),
            self.function.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_named_object() {
        let field = Field::Named {
            name: "IT".to_string(),
            extra: Map::new(),
        };
        assert_eq!(display_name(Some(&field)), "IT");
    }

    #[test]
    fn test_display_name_plain_string() {
        assert_eq!(display_name(Some(&Field::Text("IT".to_string()))), "IT");
    }

    #[test]
    fn test_display_name_missing() {
        assert_eq!(display_name(None), "");
        assert_eq!(display_name(Some(&Field::Other(Value::Null))), "");
    }

    #[test]
    fn test_display_name_odd_shapes() {
        assert_eq!(display_name(Some(&Field::Other(json!({"name": 7})))), "7");
        assert_eq!(display_name(Some(&Field::Other(json!({"title": "x"})))), "");
        assert_eq!(display_name(Some(&Field::Other(json!(["IT"])))), "");
        assert_eq!(display_name(Some(&Field::Other(json!(12)))), "12");
    }

    #[test]
    fn test_summary_accepts_both_field_shapes() {
        let job: JobSummary = serde_json::from_value(json!({
            "id": 42,
            "title": "Rust Engineer",
            "department": {"id": 3, "name": "IT"},
            "location": "Panjim",
            "function": {"name": "Development"},
            "postedDate": "2024-01-05"
        }))
        .unwrap();

        assert_eq!(job.id, Some(JobId::Number(42)));
        assert_eq!(job.title(), "Rust Engineer");
        assert_eq!(job.facet_line(), "IT | Panjim | Development");
        assert_eq!(job.extra.get("postedDate"), Some(&json!("2024-01-05")));
    }

    #[test]
    fn test_summary_missing_fields() {
        let job: JobSummary = serde_json::from_value(json!({
            "id": "abc-1",
            "department": null
        }))
        .unwrap();
        assert_eq!(job.id.as_ref().map(|id| id.to_string()).as_deref(), Some("abc-1"));
        assert_eq!(job.title(), "");
        assert_eq!(job.facet_line(), " |  | ");
    }

    #[test]
    fn test_summary_passes_through_unknown_fields() {
        let raw = json!({
            "id": 1,
            "title": "QA",
            "department": {"id": 9, "name": "CX"},
            "hiringManager": {"name": "someone"}
        });
        let job: JobSummary = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["hiringManager"], raw["hiringManager"]);
        assert_eq!(back["department"], raw["department"]);
    }

    #[test]
    fn test_summary_tolerates_odd_id_and_title() {
        let jobs: Vec<JobSummary> = serde_json::from_value(json!([
            {"title": "No id"},
            {"id": 2, "title": 7},
            {"id": 1.5, "title": "Float id"},
            {"id": 18446744073709551615u64, "title": ["x"]}
        ]))
        .unwrap();

        assert_eq!(jobs.len(), 4);
        assert_eq!(jobs[0].id, None);
        assert_eq!(jobs[0].title(), "No id");
        assert_eq!(jobs[1].title(), "7");
        assert_eq!(jobs[2].id.as_ref().map(|id| id.to_string()).as_deref(), Some("1.5"));
        assert_eq!(
            jobs[3].id.as_ref().map(|id| id.to_string()).as_deref(),
            Some("18446744073709551615")
        );
        assert_eq!(jobs[3].title(), "");
    }

    #[test]
    fn test_summary_reemits_odd_values_unchanged() {
        let raw = json!({"id": 1.5, "title": 7, "tags": ["a"]});
        let job: JobSummary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&job).unwrap(), raw);
    }

    #[test]
    fn test_detail_description() {
        let job: JobDetail = serde_json::from_value(json!({
            "id": 42,
            "title": "Rust Engineer",
            "department": "IT",
            "description": "<p>Build things.</p>"
        }))
        .unwrap();
        assert_eq!(job.description(), "<p>Build things.</p>");
        assert!(!job.extra.contains_key("description"));
    }
}
