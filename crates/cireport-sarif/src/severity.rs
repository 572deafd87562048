//! Severity extraction and normalization.
//!
//! SARIF producers disagree on where severity lives. Each source below is
//! tried in order and the first non-empty value wins:
//!
//! 1. `result.level`, `result.severity`, `result.kind`
//! 2. `result.properties.{severity, priority, level, severityLabel}`
//! 3. the rule object embedded in the result (`rule` or `ruleObject`)
//! 4. the rule metadata at `ruleIndex` (or `rule.index` within
//!    `rule.toolComponent.index`)
//! 5. the rule metadata registered under `ruleId`
//!
//! "Non-empty" means not null, `false`, zero, `""`, `[]` or `{}`.

use cireport_types::Severity;
use serde_json::Value;

use crate::rules::RuleIndex;

/// `Some(v)` unless `v` is an empty or falsy JSON value.
pub(crate) fn present(v: Option<&Value>) -> Option<&Value> {
    let v = v?;
    let empty = match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    (!empty).then_some(v)
}

fn first_present<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| present(obj.get(*k)))
}

/// Severity declared by a rule descriptor.
pub fn rule_severity(rule: &Value) -> Option<&Value> {
    present(rule.get("defaultConfiguration").and_then(|c| c.get("level")))
        .or_else(|| present(rule.get("properties").and_then(|p| p.get("severity"))))
}

fn as_index(v: &Value) -> Option<usize> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(usize::from(*b)),
        _ => None,
    }
}

/// Raw severity value for a result, before normalization.
pub fn raw_severity<'a>(result: &'a Value, rules: &RuleIndex<'a>) -> Option<&'a Value> {
    if let Some(v) = first_present(result, &["level", "severity", "kind"]) {
        return Some(v);
    }

    if let Some(props) = present(result.get("properties"))
        && let Some(v) = first_present(props, &["severity", "priority", "level", "severityLabel"])
    {
        return Some(v);
    }

    let rule_ref = first_present(result, &["rule", "ruleObject"]).filter(|r| r.is_object());
    if let Some(v) = rule_ref.and_then(rule_severity) {
        return Some(v);
    }

    if let Some(idx) = result.get("ruleIndex").and_then(as_index)
        && let Some(v) = rules.by_index(0, idx).and_then(rule_severity)
    {
        return Some(v);
    }
    if let Some(rule_ref) = rule_ref
        && let Some(idx) = rule_ref.get("index").and_then(as_index)
    {
        let component = rule_ref
            .get("toolComponent")
            .and_then(|c| c.get("index"))
            .and_then(as_index)
            .unwrap_or(0);
        if let Some(v) = rules.by_index(component, idx).and_then(rule_severity) {
            return Some(v);
        }
    }

    result
        .get("ruleId")
        .and_then(Value::as_str)
        .and_then(|id| rules.by_id(id))
        .and_then(rule_severity)
}

/// Map a severity-like string onto one of the four levels.
///
/// Integer priorities map `<= 1` to error and `2` to warning. Unknown
/// labels become notes.
pub fn normalize_severity_str(value: &str) -> Severity {
    let val = value.trim().to_lowercase();
    if val.is_empty() {
        return Severity::Note;
    }
    if val.bytes().all(|b| b.is_ascii_digit()) {
        return match val.parse::<u64>() {
            Ok(p) if p <= 1 => Severity::Error,
            Ok(2) => Severity::Warning,
            _ => Severity::Note,
        };
    }
    match val.as_str() {
        "critical" | "high" | "error" | "failure" => Severity::Error,
        "warning" | "warn" | "medium" => Severity::Warning,
        "note" | "info" | "informational" | "low" | "recommendation" => Severity::Note,
        "information" => Severity::Information,
        _ => Severity::Note,
    }
}

/// Normalize any JSON severity value. Absent or empty values are notes.
pub fn normalize_severity(value: Option<&Value>) -> Severity {
    match present(value) {
        None => Severity::Note,
        Some(Value::String(s)) => normalize_severity_str(s),
        Some(Value::Number(n)) => normalize_severity_str(&n.to_string()),
        Some(Value::Bool(_)) => normalize_severity_str("true"),
        Some(_) => Severity::Note,
    }
}
