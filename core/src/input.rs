use std::collections::HashMap;
use anyhow::{anyhow, Result};

pub const RECORD_KEYS: [&str; 4] = ["attended", "total", "remaining", "target"];
pub const REMINDER_KEYS: [&str; 5] = ["enabled", "time", "daily", "risk", "weekly"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Raw field values as typed by the user, before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordUpdate {
    pub attended: Option<f64>,
    pub total: Option<f64>,
    pub remaining: Option<f64>,
    pub target: Option<f64>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.attended.is_none() && self.total.is_none() && self.remaining.is_none() && self.target.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderUpdate {
    pub enabled: Option<bool>,
    pub time: Option<String>,
    pub daily_reminder: Option<bool>,
    pub risk_alert: Option<bool>,
    pub weekly_summary: Option<bool>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        words.push(arg.clone());
    }

    ParsedInput { words, metadata }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parses `attended:55 total:80 rem:20 tar:75` style arguments.
///
/// Numbers are kept as `f64` so that negative or non-finite values reach
/// validation instead of failing here.
pub fn parse_record_update(args: &[String]) -> Result<RecordUpdate> {
    let parsed = parse_args(args);
    if let Some(word) = parsed.words.first() {
        return Err(anyhow!("Expected key:value, got '{}'", word));
    }

    let mut update = RecordUpdate::default();
    for (key, value) in parsed.metadata {
        let full_key = expand_key(&key, &RECORD_KEYS)?;
        let number: f64 = value
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid number for {}: '{}'", full_key, value))?;
        match full_key.as_str() {
            "attended" => update.attended = Some(number),
            "total" => update.total = Some(number),
            "remaining" => update.remaining = Some(number),
            "target" => update.target = Some(number),
            _ => {}
        }
    }
    Ok(update)
}

pub fn parse_reminder_update(args: &[String]) -> Result<ReminderUpdate> {
    let parsed = parse_args(args);
    if let Some(word) = parsed.words.first() {
        return Err(anyhow!("Expected key:value, got '{}'", word));
    }

    let mut update = ReminderUpdate::default();
    for (key, value) in parsed.metadata {
        let full_key = expand_key(&key, &REMINDER_KEYS)?;
        match full_key.as_str() {
            "time" => update.time = Some(value),
            "enabled" => update.enabled = Some(parse_switch(&value)?),
            "daily" => update.daily_reminder = Some(parse_switch(&value)?),
            "risk" => update.risk_alert = Some(parse_switch(&value)?),
            "weekly" => update.weekly_summary = Some(parse_switch(&value)?),
            _ => {}
        }
    }
    Ok(update)
}

pub fn parse_switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "y" | "1" => Ok(true),
        "off" | "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(anyhow!("Expected on/off, got '{}'", value)),
    }
}
