//! ICS file generation.
//!
//! Content lines are written by the icalendar crate, which applies TEXT
//! escaping and line folding. Only the BEGIN/END structure is written here,
//! so component order and nesting follow the source calendar exactly.

use icalendar::{Component as _, Event as IcsEvent, Property as IcsProperty};

use crate::calendar::{Calendar, Property, RawComponent};

const DEFAULT_VERSION: &str = "2.0";
const DEFAULT_PRODID: &str = "-//roomcal//roomcal//EN";

/// Generate .ics content for a calendar.
///
/// VERSION and PRODID are required by RFC 5545; when the source calendar
/// carried neither, defaults are written so the document stays valid.
pub fn generate_ics(calendar: &Calendar) -> String {
    let mut out = String::new();
    write_line(&mut out, "BEGIN:VCALENDAR");

    let has = |name: &str| {
        calendar
            .properties
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
    };
    let mut properties = Vec::with_capacity(calendar.properties.len() + 2);
    if !has("VERSION") {
        properties.push(Property::new("VERSION", DEFAULT_VERSION));
    }
    if !has("PRODID") {
        properties.push(Property::new("PRODID", DEFAULT_PRODID));
    }
    properties.extend(calendar.properties.iter().cloned());
    out.push_str(&render_properties(&properties));

    for component in &calendar.components {
        write_component(&mut out, component.raw());
    }

    write_line(&mut out, "END:VCALENDAR");
    out
}

fn write_component(out: &mut String, component: &RawComponent) {
    write_line(out, &format!("BEGIN:{}", component.name));
    out.push_str(&render_properties(&component.properties));
    for child in &component.components {
        write_component(out, child);
    }
    write_line(out, &format!("END:{}", component.name));
}

fn write_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

/// Serialize properties through the icalendar crate and return the
/// resulting content lines, folded and CRLF-terminated, in input order.
///
/// The properties ride on an empty VEVENT as multi-properties (which keep
/// insertion order); the crate writes its own DTSTAMP/UID ahead of them, so
/// only the last `properties.len()` logical lines are kept.
fn render_properties(properties: &[Property]) -> String {
    if properties.is_empty() {
        return String::new();
    }

    let mut carrier = IcsEvent::new();
    for property in properties {
        carrier.append_multi_property(to_ics_property(property));
    }
    let mut cal = icalendar::Calendar::new();
    cal.push(carrier.done());
    let rendered = cal.to_string();

    let lines = carrier_lines(&rendered);
    let skip = lines.len().saturating_sub(properties.len());
    lines[skip..]
        .iter()
        .map(|line| format!("{line}\r\n"))
        .collect()
}

fn to_ics_property(property: &Property) -> IcsProperty {
    let mut prop = IcsProperty::new(property.name.as_str(), property.value.as_str());
    for param in &property.params {
        // the crate adds quotes itself where needed
        let value = param.value.as_deref().unwrap_or("").trim_matches('"');
        prop.add_parameter(&param.key, value);
    }
    prop
}

/// Logical content lines inside the carrier VEVENT, continuation lines
/// joined back onto their first line with the original CRLF + space.
fn carrier_lines(rendered: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut in_event = false;

    for line in rendered.lines() {
        if line == "BEGIN:VEVENT" {
            in_event = true;
            continue;
        }
        if line == "END:VEVENT" {
            break;
        }
        if !in_event {
            continue;
        }
        match lines.last_mut() {
            Some(last) if line.starts_with(' ') || line.starts_with('\t') => {
                last.push_str("\r\n");
                last.push_str(line);
            }
            _ => lines.push(line.to_string()),
        }
    }

    lines
}
