//! Per-field extractors.

use fireems_model::parse_datetime;
use regex::Captures;

use crate::field::ParsedField;
use crate::patterns::{
    DATE_AND_TIME, DATE_ONLY, GENERIC_INCIDENT, INCIDENT_TYPES, MILITARY_TIME, RESPONSE_CLOCK,
    RESPONSE_DURATION, STREET_ADDRESS, TIME_ONLY, UNIT,
};

const KNOWN_INCIDENT_CONFIDENCE: f64 = 0.85;
const GENERIC_INCIDENT_CONFIDENCE: f64 = 0.7;

/// Words that read as "<word> fire" but are not categories ("on fire").
const GENERIC_STOPWORDS: [&str; 14] = [
    "a", "an", "and", "at", "for", "in", "is", "no", "of", "on", "the", "to", "was", "were",
];

pub(crate) fn incident_type(text: &str) -> Option<ParsedField> {
    let known = INCIDENT_TYPES
        .iter()
        .filter_map(|(regex, label)| regex.find(text).map(|m| (m, *label)))
        .min_by_key(|(m, _)| m.start());
    if let Some((m, label)) = known {
        return Some(ParsedField::new(label, KNOWN_INCIDENT_CONFIDENCE, m.as_str()));
    }

    GENERIC_INCIDENT
        .captures_iter(text)
        .find(|caps| !GENERIC_STOPWORDS.contains(&caps[1].to_lowercase().as_str()))
        .map(|caps| {
            let label = format!("{} {}", title_case(&caps[1]), title_case(&caps[2]));
            ParsedField::new(label, GENERIC_INCIDENT_CONFIDENCE, &caps[0])
        })
}

pub(crate) fn response_time(text: &str) -> Option<ParsedField> {
    if let Some(caps) = RESPONSE_DURATION.captures(text) {
        let amount = &caps[1];
        let unit = caps[2].to_lowercase();
        let (name, confidence) = if unit.starts_with("min") {
            ("minute", 0.9)
        } else if unit.starts_with("sec") {
            ("second", 0.8)
        } else {
            ("hour", 0.8)
        };
        return Some(ParsedField::new(
            format!("{amount} {}", plural(name, amount)),
            confidence,
            &caps[0],
        ));
    }

    RESPONSE_CLOCK.captures(text).map(|caps| {
        let minutes = caps[1].trim_start_matches('0');
        let minutes = if minutes.is_empty() { "0" } else { minutes };
        let seconds = caps[2].trim_start_matches('0');
        let seconds = if seconds.is_empty() { "0" } else { seconds };
        ParsedField::new(
            format!(
                "{minutes} {} {seconds} {}",
                plural("minute", minutes),
                plural("second", seconds)
            ),
            0.75,
            &caps[0],
        )
    })
}

pub(crate) fn location(text: &str) -> Option<ParsedField> {
    let caps = STREET_ADDRESS.captures(text)?;
    let name = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
    let suffix = expand_street_suffix(&caps[3]);
    let (value, confidence) = match caps.get(1) {
        Some(number) => (format!("{} {name} {suffix}", number.as_str()), 0.85),
        None => (format!("{name} {suffix}"), 0.7),
    };
    Some(ParsedField::new(value, confidence, caps[0].trim_end()))
}

pub(crate) fn date_time(text: &str) -> Option<ParsedField> {
    if let Some(caps) = DATE_AND_TIME.captures(text) {
        let clock = clock_text(&caps, 2);
        let combined = format!("{} {clock}", &caps[1]);
        return Some(match parse_datetime(&combined) {
            Some(dt) => ParsedField::new(dt.format("%Y-%m-%d %H:%M").to_string(), 0.9, &caps[0]),
            None => ParsedField::new(combined, 0.6, &caps[0]),
        });
    }

    if let Some(caps) = DATE_ONLY.captures(text) {
        return Some(match parse_datetime(&caps[1]) {
            Some(dt) => ParsedField::new(dt.format("%Y-%m-%d").to_string(), 0.8, &caps[0]),
            None => ParsedField::new(&caps[1], 0.6, &caps[0]),
        });
    }

    if let Some(caps) = TIME_ONLY.captures(text) {
        if let Some(value) = to_24_hour(&caps, 1) {
            return Some(ParsedField::new(value, 0.6, &caps[0]));
        }
    }

    MILITARY_TIME
        .captures(text)
        .map(|caps| ParsedField::new(format!("{}:{}", &caps[1], &caps[2]), 0.6, &caps[0]))
}

pub(crate) fn units_resources(text: &str) -> Option<ParsedField> {
    let mut units: Vec<String> = Vec::new();
    let mut originals: Vec<&str> = Vec::new();
    let mut any_spelled_out = false;

    for caps in UNIT.captures_iter(text) {
        let kind = match (caps.get(1), caps.get(2)) {
            (Some(word), _) => {
                any_spelled_out = true;
                title_case(word.as_str())
            }
            (None, Some(abbreviation)) => expand_unit_abbreviation(abbreviation.as_str()).to_string(),
            (None, None) => continue,
        };
        let unit = format!("{kind} {}", &caps[3]);
        if !units.contains(&unit) {
            units.push(unit);
            originals.push(caps.get(0).map_or("", |m| m.as_str()));
        }
    }

    if units.is_empty() {
        return None;
    }
    let confidence = if any_spelled_out { 0.8 } else { 0.6 };
    Some(ParsedField::new(units.join(", "), confidence, originals.join(", ")))
}

/// "H:MM[:SS] [AM|PM]" from a time capture starting at group `first`.
fn clock_text(caps: &Captures<'_>, first: usize) -> String {
    let mut clock = format!("{}:{}", &caps[first], &caps[first + 1]);
    if let Some(seconds) = caps.get(first + 2) {
        clock.push(':');
        clock.push_str(seconds.as_str());
    }
    if let Some(meridiem) = caps.get(first + 3) {
        clock.push(' ');
        clock.push_str(&meridiem.as_str().to_uppercase());
        clock.push('M');
    }
    clock
}

fn to_24_hour(caps: &Captures<'_>, first: usize) -> Option<String> {
    let hour: u32 = caps[first].parse().ok()?;
    let minute: u32 = caps[first + 1].parse().ok()?;
    let hour = match caps.get(first + 3).map(|m| m.as_str().to_lowercase()) {
        Some(meridiem) if (1..=12).contains(&hour) => match (meridiem.as_str(), hour) {
            ("a", 12) => 0,
            ("p", h) if h < 12 => h + 12,
            (_, h) => h,
        },
        Some(_) => return None,
        None => hour,
    };
    (hour < 24 && minute < 60).then(|| format!("{hour:02}:{minute:02}"))
}

fn expand_street_suffix(suffix: &str) -> &'static str {
    match suffix.to_lowercase().as_str() {
        "st" | "street" => "Street",
        "ave" | "avenue" => "Avenue",
        "rd" | "road" => "Road",
        "blvd" | "boulevard" => "Boulevard",
        "dr" | "drive" => "Drive",
        "ln" | "lane" => "Lane",
        "ct" | "court" => "Court",
        "pl" | "place" => "Place",
        "hwy" | "highway" => "Highway",
        "pkwy" | "parkway" => "Parkway",
        "cir" | "circle" => "Circle",
        "ter" | "terrace" => "Terrace",
        _ => "Way",
    }
}

fn expand_unit_abbreviation(abbreviation: &str) -> &'static str {
    match abbreviation {
        "E" => "Engine",
        "M" => "Medic",
        "L" => "Ladder",
        "T" => "Truck",
        "R" => "Rescue",
        _ => "Battalion",
    }
}

fn plural(unit: &str, amount: &str) -> String {
    if amount == "1" {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
