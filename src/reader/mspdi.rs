//! Microsoft Project XML (MSPDI) decoding.

use chrono::NaiveDateTime;
use minidom::Element;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::duration::{Duration, TimeUnit};
use crate::error::DecodeError;
use crate::project::{ProjectFile, ProjectProperties, Resource, Task};
use crate::reader::ProjectReader;

pub const MSPDI_NAMESPACE: &str = "http://schemas.microsoft.com/project";

#[derive(Debug, Default, Clone, Copy)]
pub struct MspdiReader;

impl MspdiReader {
    pub fn read_str(&self, data: &str) -> Result<ProjectFile, DecodeError> {
        let data = strip_comments(data.trim_start_matches('\u{feff}'));
        let root: Element = match data.parse() {
            Err(minidom::Error::MissingNamespace) => match with_default_namespace(&data) {
                Some(data) => data.parse()?,
                None => return Err(minidom::Error::MissingNamespace.into()),
            },
            result => result?,
        };
        if !root.is("Project", MSPDI_NAMESPACE) {
            return Err(DecodeError::InvalidDocument(format!(
                "expected <Project> root element, found <{}>",
                root.name()
            )));
        }

        let properties = read_properties(&root)?;
        let tasks = collection(&root, "Tasks", "Task")
            .map(|element| read_task(element, &properties))
            .collect::<Result<Vec<_>, _>>()?;
        let resources = collection(&root, "Resources", "Resource")
            .map(read_resource)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "decoded {} tasks and {} resources",
            tasks.len(),
            resources.len()
        );

        Ok(ProjectFile {
            properties,
            tasks,
            resources,
        })
    }
}

impl ProjectReader for MspdiReader {
    fn read(&self, path: &Path) -> Result<ProjectFile, DecodeError> {
        let data = fs::read_to_string(path)?;
        self.read_str(&data)
    }
}

/// Drop `<!-- -->` comments, which minidom refuses. CDATA sections are
/// copied through untouched.
fn strip_comments(data: &str) -> String {
    let mut output = String::with_capacity(data.len());
    let mut rest = data;
    loop {
        match (rest.find("<!--"), rest.find("<![CDATA[")) {
            (Some(comment), Some(cdata)) if cdata < comment => {
                let end = rest[cdata..]
                    .find("]]>")
                    .map_or(rest.len(), |end| cdata + end + 3);
                output.push_str(&rest[..end]);
                rest = &rest[end..];
            }
            (Some(comment), _) => {
                output.push_str(&rest[..comment]);
                match rest[comment + 4..].find("-->") {
                    Some(end) => rest = &rest[comment + 4 + end + 3..],
                    None => {
                        // unterminated, leave it for the parser to report
                        output.push_str(&rest[comment..]);
                        break;
                    }
                }
            }
            (None, _) => {
                output.push_str(rest);
                break;
            }
        }
    }
    output
}

/// Declare the MSPDI namespace on a root element that carries none.
fn with_default_namespace(data: &str) -> Option<String> {
    let start = data
        .match_indices('<')
        .map(|(index, _)| index + 1)
        .find(|&index| {
            data[index..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        })?;
    let name_end = start
        + data[start..].find(|c: char| c.is_whitespace() || c == '>' || c == '/')?;

    Some(format!(
        r#"{} xmlns="{}"{}"#,
        &data[..name_end],
        MSPDI_NAMESPACE,
        &data[name_end..]
    ))
}

fn collection<'a>(
    root: &'a Element,
    container: &str,
    item: &'static str,
) -> impl Iterator<Item = &'a Element> {
    root.get_child(container, MSPDI_NAMESPACE)
        .into_iter()
        .flat_map(move |parent| {
            parent
                .children()
                .filter(move |child| child.is(item, MSPDI_NAMESPACE))
        })
}

fn read_properties(root: &Element) -> Result<ProjectProperties, DecodeError> {
    let defaults = ProjectProperties::default();
    // A zero calendar factor would make every converted duration infinite.
    let positive_or =
        |value: Option<u32>, default: u32| value.filter(|&v| v > 0).unwrap_or(default);

    Ok(ProjectProperties {
        name: text(root, "Name"),
        start_date: parse_date(root, "StartDate")?,
        finish_date: parse_date(root, "FinishDate")?,
        minutes_per_day: positive_or(
            parse_field(root, "MinutesPerDay")?,
            defaults.minutes_per_day,
        ),
        minutes_per_week: positive_or(
            parse_field(root, "MinutesPerWeek")?,
            defaults.minutes_per_week,
        ),
        days_per_month: positive_or(
            parse_field(root, "DaysPerMonth")?,
            defaults.days_per_month,
        ),
    })
}

fn read_task(element: &Element, properties: &ProjectProperties) -> Result<Task, DecodeError> {
    let unique_id = parse_field(element, "UID")?;
    let id = parse_field(element, "ID")?;
    if parse_bool(element, "IsNull")? {
        return Ok(Task {
            unique_id,
            id,
            ..Task::default()
        });
    }

    let units = parse_field::<i32>(element, "DurationFormat")?
        .map_or(TimeUnit::Days, TimeUnit::from_duration_format);
    let duration = match text(element, "Duration") {
        Some(value) => match Duration::from_iso8601(&value, units, properties) {
            Some(duration) => Some(duration),
            None => {
                return Err(DecodeError::InvalidField {
                    element: "Duration",
                    value,
                })
            }
        },
        None => None,
    };

    Ok(Task {
        unique_id,
        id,
        wbs: text(element, "WBS"),
        name: text(element, "Name"),
        start: parse_date(element, "Start")?,
        finish: parse_date(element, "Finish")?,
        duration,
        percent_complete: parse_field(element, "PercentComplete")?,
        outline_level: parse_field(element, "OutlineLevel")?,
        summary: parse_bool(element, "Summary")?,
        milestone: parse_bool(element, "Milestone")?,
    })
}

fn read_resource(element: &Element) -> Result<Resource, DecodeError> {
    let unique_id = parse_field(element, "UID")?;
    let id = parse_field(element, "ID")?;
    let name = if parse_bool(element, "IsNull")? {
        None
    } else {
        text(element, "Name")
    };

    Ok(Resource {
        unique_id,
        id,
        name,
    })
}

fn text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name, MSPDI_NAMESPACE)
        .map(|child| child.text().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_field<T: FromStr>(
    element: &Element,
    name: &'static str,
) -> Result<Option<T>, DecodeError> {
    match text(element, name) {
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(DecodeError::InvalidField {
                element: name,
                value,
            }),
        },
        None => Ok(None),
    }
}

fn parse_bool(element: &Element, name: &'static str) -> Result<bool, DecodeError> {
    match text(element, name).as_deref() {
        None | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(value) => Err(DecodeError::InvalidField {
            element: name,
            value: value.to_string(),
        }),
    }
}

fn parse_date(
    element: &Element,
    name: &'static str,
) -> Result<Option<NaiveDateTime>, DecodeError> {
    match text(element, name) {
        Some(value) => ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&value, format).ok())
            .map(Some)
            .ok_or(DecodeError::InvalidField {
                element: name,
                value,
            }),
        None => Ok(None),
    }
}
