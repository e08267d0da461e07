use serde::Serialize;
use std::fmt::Display;

use crate::project::{format_date_time, ProjectFile, Resource, Task};

pub const UNTITLED_PROJECT: &str = "Sin título";

/// Resource classification is not decoded; every resource reports this.
pub const RESOURCE_TYPE: i32 = 0;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub start_date: String,
    pub finish_date: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i32,
    pub wbs: String,
    pub name: String,
    pub start: String,
    pub finish: String,
    pub duration: String,
    pub percent_complete: f64,
    pub is_summary: bool,
    pub is_milestone: bool,
    pub outline_level: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProjectExport {
    pub project: ProjectSummary,
    pub tasks: Vec<TaskRecord>,
    pub resources: Vec<ResourceRecord>,
}

/// String form of `value`, or `default` when it is absent or renders empty.
pub fn string_or<T: Display>(value: Option<T>, default: &str) -> String {
    value
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl TaskRecord {
    /// `None` for tasks without an identifier.
    pub fn from_task(task: &Task) -> Option<Self> {
        let id = task.id?;
        Some(Self {
            id,
            wbs: string_or(task.wbs.as_deref(), ""),
            name: string_or(task.name.as_deref(), ""),
            start: string_or(task.start.as_ref().map(format_date_time), ""),
            finish: string_or(task.finish.as_ref().map(format_date_time), ""),
            duration: string_or(task.duration, ""),
            percent_complete: task.percent_complete.unwrap_or(0.0),
            is_summary: task.summary,
            is_milestone: task.milestone,
            outline_level: task.outline_level.unwrap_or(0),
        })
    }
}

impl ResourceRecord {
    pub fn from_resource(resource: &Resource) -> Option<Self> {
        let id = resource.id?;
        Some(Self {
            id,
            name: string_or(resource.name.as_deref(), ""),
            resource_type: RESOURCE_TYPE,
        })
    }
}

impl From<&ProjectFile> for ProjectExport {
    fn from(project: &ProjectFile) -> Self {
        let properties = &project.properties;
        let summary = ProjectSummary {
            name: string_or(properties.name.as_deref(), UNTITLED_PROJECT),
            start_date: string_or(properties.start_date.as_ref().map(format_date_time), ""),
            finish_date: string_or(properties.finish_date.as_ref().map(format_date_time), ""),
        };

        let tasks = project
            .tasks
            .iter()
            .filter_map(|task| {
                let record = TaskRecord::from_task(task);
                if record.is_none() {
                    log::debug!("skipping task without ID (UID {:?})", task.unique_id);
                }
                record
            })
            .collect();

        let resources = project
            .resources
            .iter()
            .filter_map(|resource| {
                let record = ResourceRecord::from_resource(resource);
                if record.is_none() {
                    log::debug!("skipping resource without ID (UID {:?})", resource.unique_id);
                }
                record
            })
            .collect();

        Self {
            project: summary,
            tasks,
            resources,
        }
    }
}
