//! Compiled patterns for narrative extraction.

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid narrative regex")
}

/// Incident categories with their canonical labels, in priority order.
pub(crate) static INCIDENT_TYPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(?:structure|house|home|building|residential|commercial|apartment|garage|kitchen)\s+fire\b",
            "Structure Fire",
        ),
        (r"(?i)\b(?:vehicle|car|auto|truck)\s+fire\b", "Vehicle Fire"),
        (
            r"(?i)\b(?:brush|grass|wildland|vegetation|forest)\s+fire\b",
            "Brush Fire",
        ),
        (r"(?i)\b(?:trash|dumpster|rubbish|refuse)\s+fire\b", "Rubbish Fire"),
        (
            r"(?i)\b(?:motor\s+vehicle\s+(?:accident|collision|crash)|mva|mvc|traffic\s+(?:accident|collision)|car\s+(?:accident|crash))\b",
            "Motor Vehicle Accident",
        ),
        (r"(?i)\b(?:cardiac\s+arrest|heart\s+attack)\b", "Cardiac Arrest"),
        (r"(?i)\bchest\s+pains?\b", "Chest Pain"),
        (
            r"(?i)\b(?:difficulty\s+breathing|breathing\s+(?:difficulty|problems?)|respiratory\s+distress|shortness\s+of\s+breath)\b",
            "Breathing Problems",
        ),
        (r"(?i)\boverdose\b", "Overdose"),
        (
            r"(?i)\b(?:fall\s+(?:victim|injury)|(?:patient|person|pt)\s+fell)\b",
            "Fall",
        ),
        (
            r"(?i)\b(?:fire\s+alarm|alarm\s+activation|smoke\s+alarm|smoke\s+detector)\b",
            "Alarm Activation",
        ),
        (
            r"(?i)\b(?:gas\s+leak|gas\s+odor|odor\s+of\s+gas|natural\s+gas)\b",
            "Gas Leak",
        ),
        (
            r"(?i)\b(?:hazmat|hazardous\s+materials?|chemical\s+spill)\b",
            "Hazardous Materials",
        ),
        (
            r"(?i)\b(?:water|swift\s+water|technical|confined\s+space|rope)\s+rescue\b",
            "Rescue",
        ),
        (
            r"(?i)\b(?:medical\s+(?:emergency|call)|sick\s+person|ems\s+call)\b",
            "Medical Emergency",
        ),
    ]
    .into_iter()
    .map(|(pattern, label)| (compile(pattern), label))
    .collect()
});

/// "<word> fire|emergency|rescue|alarm|call" for categories not in the table.
pub(crate) static GENERIC_INCIDENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b([a-z]+)\s+(fire|emergency|rescue|alarm|call)\b"));

/// "30 min", "4.5 minutes", "90 sec", "1 hr".
pub(crate) static RESPONSE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(\d+(?:\.\d+)?)\s*(minutes?|mins?|seconds?|secs?|hours?|hrs?)\b")
});

/// "response time 4:32", "response: 12:05".
pub(crate) static RESPONSE_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\bresponse(?:\s+time)?\s*(?:of|was|:|=)?\s*(\d{1,2}):([0-5]\d)\b")
});

/// "[number] Capitalized Name Suffix", e.g. "1200 N Main St".
pub(crate) static STREET_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\b(?:(\d{1,6})\s+)?((?:[A-Z0-9][A-Za-z0-9]*\s+){1,3}?)((?i:street|st|avenue|ave|road|rd|boulevard|blvd|drive|dr|lane|ln|way|court|ct|place|pl|highway|hwy|parkway|pkwy|circle|cir|terrace|ter))\b\.?",
    )
});

const DATE_PART: &str = r"\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{2}-\d{2}";
const TIME_PART: &str = r"(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s*([ap])\.?m\b\.?)?";

/// A date followed by a clock time, e.g. "01/15/2024 at 8:30 pm".
pub(crate) static DATE_AND_TIME: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b({DATE_PART})(?:\s*,|\s+at)?\s+{TIME_PART}"
    ))
});

/// A date on its own: numeric or "Jan 15, 2024".
pub(crate) static DATE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b({DATE_PART}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{{1,2}},?\s+\d{{4}})\b"
    ))
});

/// A clock time on its own.
pub(crate) static TIME_ONLY: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\b{TIME_PART}")));

/// Military time, "1430 hours".
pub(crate) static MILITARY_TIME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b([01]\d|2[0-3])([0-5]\d)\s*(?:hours|hrs)\b"));

/// Apparatus mentions: "Engine 12", "Medic-5", "E12", "BC2".
pub(crate) static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\b(?:((?i:engine|medic|ladder|truck|rescue|squad|battalion|ambulance|tanker|quint|tower|brush))\s*-?\s*|(E|M|L|T|R|BC)-?)(\d{1,4})\b",
    )
});
