//! Function registry: lookup by name, dispatch, help

use crate::{FunctionMeta, FunctionPlugin};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tasteloop_core::{TasteloopError, Value};
use tracing::{debug, warn};

/// Most names offered in an unknown-function suggestion
const MAX_SUGGESTIONS: usize = 3;

/// Functions keyed by lowercased name
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function; a later registration under the same name wins
    pub fn with_function<F: FunctionPlugin + 'static>(mut self, plugin: F) -> Self {
        let key = plugin.meta().name.to_lowercase();
        self.functions.insert(key, Arc::new(plugin));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.trim().to_lowercase()).map(|f| f.as_ref())
    }

    /// Metadata of every registered function, sorted by name
    pub fn function_metas(&self) -> Vec<FunctionMeta> {
        let mut metas: Vec<FunctionMeta> = self.functions.values().map(|f| f.meta()).collect();
        metas.sort_by_key(|m| m.name);
        metas
    }

    /// Call a function by name.
    ///
    /// Unknown names and missing required arguments are reported as error
    /// values without reaching the function.
    pub fn call_function(&self, name: &str, args: &[Value]) -> Value {
        let Some(plugin) = self.get_function(name) else {
            warn!(function = name, "unknown function");
            return Value::Error(self.unknown_function(name));
        };

        let meta = plugin.meta();
        let required = meta.required_args();
        if args.len() < required {
            return Value::Error(TasteloopError::arg_count(meta.name, required, args.len()));
        }

        debug!(function = meta.name, args = args.len(), "calling function");
        let result = plugin.call(args);
        if let Some(e) = result.as_error() {
            debug!(function = meta.name, code = %e.code, "function returned error");
        }
        result
    }

    fn unknown_function(&self, name: &str) -> TasteloopError {
        let err = TasteloopError::undefined_func(name);
        let close = self.closest_names(name);
        if close.is_empty() {
            return err;
        }
        err.with_suggestion(format!("Did you mean {}?", close.join(", ")))
    }

    /// Registered names within a small edit distance of `name`, or sharing
    /// a prefix with it, closest first
    fn closest_names(&self, name: &str) -> Vec<&str> {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let limit = (query.chars().count() / 3).max(1);

        let mut ranked: Vec<(usize, &str)> = self.functions.keys()
            .filter_map(|candidate| {
                let distance = edit_distance(&query, candidate);
                let related = candidate.starts_with(&query) || query.starts_with(candidate.as_str());
                (distance <= limit || related).then_some((distance, candidate.as_str()))
            })
            .collect();

        ranked.sort();
        ranked.into_iter().take(MAX_SUGGESTIONS).map(|(_, n)| n).collect()
    }

    /// Help for one function, or the function list grouped by library
    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => match self.get_function(n) {
                Some(f) => f.meta().help(),
                None => Value::Error(TasteloopError::not_found(format!("No function named '{}'", n))),
            },
            None => self.overview(),
        }
    }

    fn overview(&self) -> Value {
        let mut by_library: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
        for meta in self.function_metas() {
            by_library.entry(meta.category).or_default().push(Value::Text(meta.name.to_string()));
        }

        let mut obj = HashMap::new();
        obj.insert(
            "functions".to_string(),
            Value::Object(by_library.into_iter()
                .map(|(library, names)| (library.to_string(), Value::List(names)))
                .collect()),
        );
        obj.insert(
            "usage".to_string(),
            Value::Text("Pass a function name to help for its arguments and examples.".to_string()),
        );
        Value::Object(obj)
    }

    /// Summaries of all functions, optionally limited to one library
    pub fn list_functions(&self, category: Option<&str>) -> Value {
        Value::List(
            self.function_metas().iter()
                .filter(|m| category.map_or(true, |c| m.category.eq_ignore_ascii_case(c)))
                .map(FunctionMeta::summary)
                .collect(),
        )
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Levenshtein distance over chars
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != *cb);
            row[j + 1] = substitute.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}
