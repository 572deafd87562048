//! Rule metadata lookup tables for one SARIF run.

use std::collections::HashMap;

use serde_json::Value;

use crate::severity::present;

/// Rule descriptors of a run, addressable by id and by `(component, index)`.
///
/// The driver is component `0`; extensions are numbered from `1` in the
/// order they appear. An id defined by the driver is never shadowed by an
/// extension.
#[derive(Debug, Default)]
pub struct RuleIndex<'a> {
    by_id: HashMap<&'a str, &'a Value>,
    by_index: HashMap<(usize, usize), &'a Value>,
}

fn rules_of(component: Option<&Value>) -> &[Value] {
    component
        .and_then(|c| c.get("rules"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn rule_key(rule: &Value) -> Option<&str> {
    present(rule.get("id"))
        .or_else(|| present(rule.get("name")))
        .and_then(Value::as_str)
}

impl<'a> RuleIndex<'a> {
    pub fn build(run: &'a Value) -> Self {
        let mut index = RuleIndex::default();
        let tool = run.get("tool");

        for (idx, rule) in rules_of(tool.and_then(|t| t.get("driver"))).iter().enumerate() {
            if let Some(id) = rule_key(rule) {
                index.by_id.insert(id, rule);
            }
            index.by_index.insert((0, idx), rule);
        }

        let extensions = tool
            .and_then(|t| t.get("extensions"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for (component, ext) in extensions.iter().enumerate() {
            let component = component + 1;
            for (idx, rule) in rules_of(ext.get("driver")).iter().enumerate() {
                if let Some(id) = rule_key(rule) {
                    index.by_id.entry(id).or_insert(rule);
                }
                index.by_index.insert((component, idx), rule);
            }
        }

        index
    }

    pub fn by_id(&self, id: &str) -> Option<&'a Value> {
        self.by_id.get(id).copied()
    }

    pub fn by_index(&self, component: usize, idx: usize) -> Option<&'a Value> {
        self.by_index.get(&(component, idx)).copied()
    }
}
