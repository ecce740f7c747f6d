//! Tasteloop MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Every registered kitchen function is
//! exposed as a tool, plus `help` and `list_functions` for discovery.
//!
//! Logs go to stderr; stdout carries protocol messages only.

mod config;

use config::{LogFormat, ServerConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::io::{self, BufRead, Write};
use tasteloop_core::Value;
use tasteloop_plugin::{FunctionMeta, PluginRegistry};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "tasteloop";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TOOL: &str = "help";
const LIST_TOOL: &str = "list_functions";

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn parse_error(message: impl Into<String>) -> Self {
        Self { code: -32700, message: message.into(), data: None }
    }

    fn invalid_request(message: impl Into<String>) -> Self {
        Self { code: -32600, message: message.into(), data: None }
    }

    fn method_not_found(method: &str) -> Self {
        Self { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }
}

impl McpResponse {
    fn new(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        match result {
            Ok(r) => Self { jsonrpc: "2.0".to_string(), id, result: Some(r), error: None },
            Err(e) => Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(e) },
        }
    }
}

/// Registry with every Tasteloop library loaded
fn create_registry() -> PluginRegistry {
    let registry = PluginRegistry::new();
    let registry = tasteloop_units::load_units_library(registry);
    tasteloop_kitchen::load_kitchen_library(registry)
}

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.with_ansi(false).init(),
    }

    if let Some(raw) = &config.unknown_format {
        warn!(value = %raw, "unknown {}, using text", config::LOG_FORMAT_ENV);
    }
}

fn main() {
    let config = ServerConfig::from_env();
    init_logging(&config);

    let registry = create_registry();
    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        functions = registry.function_metas().len(),
        "tasteloop server started"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&registry, stdin.lock(), stdout.lock()) {
        error!(error = %e, "i/o failure, stopping");
        std::process::exit(1);
    }

    info!("server shutting down");
}

/// Answer requests from `reader` until EOF
fn serve<R: BufRead, W: Write>(registry: &PluginRegistry, mut reader: R, mut writer: W) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            debug!("client disconnected (EOF)");
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(response) = handle_line(registry, trimmed) {
            let out = serde_json::to_string(&response)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(writer, "{}", out)?;
            writer.flush()?;
        }
    }
}

/// One request line in, at most one response out
fn handle_line(registry: &PluginRegistry, line: &str) -> Option<McpResponse> {
    let raw: JsonValue = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparseable request");
            return Some(McpResponse::new(
                None,
                Err(McpError::parse_error(format!("Parse error: {}", e))),
            ));
        }
    };

    // Well-formed JSON that is not a JSON-RPC 2.0 request
    let id = raw.get("id").cloned().filter(|id| !id.is_null());
    let request = match McpRequest::deserialize(raw) {
        Ok(r) if r.jsonrpc == "2.0" => r,
        Ok(r) => {
            warn!(jsonrpc = %r.jsonrpc, "unsupported jsonrpc version");
            return Some(McpResponse::new(
                id,
                Err(McpError::invalid_request(format!("Invalid Request: unsupported jsonrpc version '{}'", r.jsonrpc))),
            ));
        }
        Err(e) => {
            warn!(error = %e, "invalid request");
            return Some(McpResponse::new(
                id,
                Err(McpError::invalid_request(format!("Invalid Request: {}", e))),
            ));
        }
    };

    debug!(method = %request.method, "processing");

    // Notifications get no response
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }

    Some(handle_request(registry, &request))
}

fn handle_request(registry: &PluginRegistry, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        "initialize" => handle_initialize(&request.params),
        "initialized" | "ping" => Ok(json!({})),
        "tools/list" => handle_tools_list(registry),
        "tools/call" => handle_tool_call(registry, &request.params),
        other => Err(McpError::method_not_found(other)),
    };

    McpResponse::new(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Kitchen unit conversion and recipe scaling"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Convert recipe quantities within volume, weight or temperature. Use 'help' with a function name for usage and examples."
    }))
}

fn input_schema(meta: &FunctionMeta) -> JsonValue {
    let mut properties = Map::new();
    for arg in meta.args {
        let mut prop = json!({
            "type": arg.kind.json_type(),
            "description": arg.description,
        });
        if let Some(default) = arg.default {
            prop["default"] = json!(default);
        }
        properties.insert(arg.name.to_string(), prop);
    }

    let required: Vec<&str> = meta.args.iter()
        .filter(|a| !a.is_optional())
        .map(|a| a.name)
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn handle_tools_list(registry: &PluginRegistry) -> Result<JsonValue, McpError> {
    let mut tools: Vec<JsonValue> = registry.function_metas().iter()
        .map(|meta| json!({
            "name": meta.name,
            "description": meta.description,
            "inputSchema": input_schema(meta),
        }))
        .collect();

    tools.push(json!({
        "name": HELP_TOOL,
        "description": "Get documentation for a function, or list all functions when no name is given",
        "inputSchema": {
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Function name (optional)"
                }
            }
        }
    }));

    tools.push(json!({
        "name": LIST_TOOL,
        "description": "List available functions, optionally filtered by category (units, kitchen)",
        "inputSchema": {
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Category filter (optional)"
                }
            }
        }
    }));

    Ok(json!({ "tools": tools }))
}

/// Map a JSON arguments object onto positional args in declaration order.
/// Trailing optional args that are absent are left off.
fn positional_args(meta: &FunctionMeta, arguments: &Map<String, JsonValue>) -> Result<Vec<Value>, McpError> {
    let mut args = Vec::with_capacity(meta.args.len());
    for arg in meta.args {
        match arguments.get(arg.name) {
            Some(json) => args.push(Value::from_json(json)),
            None if arg.is_optional() => break,
            None => {
                return Err(McpError::invalid_params(format!(
                    "Missing required argument '{}' for {}",
                    arg.name, meta.name
                )));
            }
        }
    }
    Ok(args)
}

fn tool_result(value: &Value) -> Result<JsonValue, McpError> {
    let text = serde_json::to_string_pretty(&value.to_json())
        .map_err(|e| McpError::invalid_params(format!("Unrenderable result: {}", e)))?;

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "isError": value.is_error()
    }))
}

fn handle_tool_call(registry: &PluginRegistry, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let empty = Map::new();
    let arguments = match params.get("arguments") {
        None | Some(JsonValue::Null) => &empty,
        Some(JsonValue::Object(map)) => map,
        Some(_) => return Err(McpError::invalid_params("arguments must be an object")),
    };

    if name == HELP_TOOL {
        let target = arguments.get("name").and_then(|v| v.as_str());
        return tool_result(&registry.help(target));
    }
    if name == LIST_TOOL {
        let category = arguments.get("category").and_then(|v| v.as_str());
        return tool_result(&registry.list_functions(category));
    }

    let meta = registry.get_function(name)
        .map(|f| f.meta())
        .ok_or_else(|| {
            // Let the registry build the "did you mean" suggestion
            let suggestion = registry.call_function(name, &[]);
            McpError {
                code: -32602,
                message: format!("Unknown tool: {}", name),
                data: Some(suggestion.to_json()),
            }
        })?;

    let args = positional_args(&meta, arguments)?;
    let value = registry.call_function(name, &args);
    tool_result(&value)
}
