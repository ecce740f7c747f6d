//! Plugin traits and the static metadata every function carries

use std::collections::HashMap;
use serde::Serialize;
use tasteloop_core::Value;

/// Argument type accepted by a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArgKind {
    Number,
    Text,
}

impl ArgKind {
    /// Name as reported in `ARG_TYPE` errors, matching `Value::type_name`
    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Number => "Number",
            ArgKind::Text => "Text",
        }
    }

    /// JSON Schema type for tool input schemas
    pub fn json_type(&self) -> &'static str {
        match self {
            ArgKind::Number => "number",
            ArgKind::Text => "string",
        }
    }
}

/// One positional argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub kind: ArgKind,
    pub description: &'static str,
    /// Set only for optional arguments; describes what happens when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, kind: ArgKind, description: &'static str) -> Self {
        Self { name, kind, description, default: None }
    }

    pub const fn optional(name: &'static str, kind: ArgKind, description: &'static str, default: &'static str) -> Self {
        Self { name, kind, description, default: Some(default) }
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Static description of a registered function
#[derive(Debug, Clone, Serialize)]
pub struct FunctionMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
    /// Library the function belongs to ("units", "kitchen")
    pub category: &'static str,
    pub related: &'static [&'static str],
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn texts(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| text(s)).collect())
}

impl FunctionMeta {
    /// Arguments that must be present; optional ones always trail
    pub fn required_args(&self) -> usize {
        self.args.iter().take_while(|a| !a.is_optional()).count()
    }

    /// Short listing entry: name, category, usage, description
    pub fn summary(&self) -> Value {
        let mut obj = HashMap::new();
        obj.insert("name".to_string(), text(self.name));
        obj.insert("category".to_string(), text(self.category));
        obj.insert("usage".to_string(), text(self.usage));
        obj.insert("description".to_string(), text(self.description));
        Value::Object(obj)
    }

    /// Full help entry: the summary plus arguments, return shape and examples
    pub fn help(&self) -> Value {
        let mut obj = match self.summary() {
            Value::Object(map) => map,
            _ => HashMap::new(),
        };

        let args = self.args.iter()
            .map(|a| {
                let mut arg = HashMap::new();
                arg.insert("name".to_string(), text(a.name));
                arg.insert("type".to_string(), text(a.kind.name()));
                arg.insert("description".to_string(), text(a.description));
                arg.insert("optional".to_string(), Value::Bool(a.is_optional()));
                if let Some(default) = a.default {
                    arg.insert("default".to_string(), text(default));
                }
                Value::Object(arg)
            })
            .collect();

        obj.insert("args".to_string(), Value::List(args));
        obj.insert("returns".to_string(), text(self.returns));
        obj.insert("examples".to_string(), texts(self.examples));
        obj.insert("related".to_string(), texts(self.related));
        Value::Object(obj)
    }
}

/// A pure function callable by name through the registry.
///
/// Failures come back as `Value::Error`; implementations never panic.
pub trait FunctionPlugin: Send + Sync {
    fn meta(&self) -> FunctionMeta;
    fn call(&self, args: &[Value]) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    static ARGS: [ArgMeta; 2] = [
        ArgMeta::required("value", ArgKind::Number, "Amount"),
        ArgMeta::optional("unit", ArgKind::Text, "Unit", "ml"),
    ];

    fn meta() -> FunctionMeta {
        FunctionMeta {
            name: "measure",
            description: "Measure something",
            usage: "measure(value, [unit])",
            args: &ARGS,
            returns: "Number",
            examples: &["measure(1) → 1"],
            category: "test",
            related: &[],
        }
    }

    #[test]
    fn test_required_args_stop_at_first_optional() {
        assert_eq!(meta().required_args(), 1);
        assert!(ARGS[1].is_optional());
    }

    #[test]
    fn test_help_lists_args() {
        let help = meta().help();
        assert_eq!(help.get("name").as_text(), Some("measure"));
        assert_eq!(help.get("returns").as_text(), Some("Number"));

        let args = help.get("args");
        let args = args.as_list().unwrap();
        assert_eq!(args[0].get("type").as_text(), Some("Number"));
        assert_eq!(args[1].get("default").as_text(), Some("ml"));
    }

    #[test]
    fn test_json_types() {
        assert_eq!(ArgKind::Number.json_type(), "number");
        assert_eq!(ArgKind::Text.json_type(), "string");
    }
}
