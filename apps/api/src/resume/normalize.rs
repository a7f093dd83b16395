//! Normalization of loosely-shaped resume JSON (model output or client edits)
//! into a complete `ResumeData`.

use serde_json::{Map, Value};

use crate::resume::models::ResumeData;

/// Converts any JSON value into a complete resume record.
///
/// - missing fields get `""` or `[]`
/// - a string given for a list field is split on commas
/// - a non-list, non-string value for a list field becomes `[]`
/// - a non-string value for a string field becomes its JSON text (`null` → `""`)
pub fn normalize_resume(value: Value) -> ResumeData {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let text = |key: &str| obj.get(key).map(scalar_text).unwrap_or_default();
    let list = |key: &str| obj.get(key).map(list_items).unwrap_or_default();

    ResumeData {
        name: text("name"),
        tag: text("tag"),
        email: text("email"),
        location: text("location"),
        number: text("number"),
        summary: text("summary"),
        websites: list("websites"),
        skills: list("skills"),
        education: list("education"),
        experience: list("experience"),
        student: list("student"),
        courses: list("courses"),
        internships: list("internships"),
        extracurriculars: list("extracurriculars"),
        hobbies: list("hobbies"),
        references: list("references"),
        languages: list("languages"),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn list_items(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_commas(s),
        Value::Array(items) => items
            .iter()
            .map(item_text)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Models sometimes return objects (e.g. `{"company": .., "role": ..}`) inside
/// list fields; those are flattened to their scalar values.
fn item_text(value: &Value) -> String {
    match value {
        Value::Object(fields) => fields
            .values()
            .map(item_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" - "),
        Value::Array(items) => items
            .iter()
            .map(item_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}

fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
