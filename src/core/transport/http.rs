//! HTTP transport implementation.
//!
//! Serves three surfaces from one axum router:
//! - the tool API: `POST {api_path}/{tool_name}` with a JSON payload
//! - the page catalog: `GET /tools/{tool_name}`
//! - MCP JSON-RPC over `POST {rpc_path}` for MCP clients without stdio

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::ToolHubServer;
use crate::domains::catalog;
use crate::domains::tools::{Envelope, ErrorCode, ToolError, call_tool_result};

/// MCP protocol revision announced on initialize.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: ToolHubServer,
    api_path: String,
    rpc_path: String,
}

/// HTTP status for a failure envelope.
///
/// Only an unregistered tool is a 404; every other failure is the client's
/// payload and maps to 400.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::UnknownTool => StatusCode::NOT_FOUND,
        ErrorCode::BadRequest | ErrorCode::UnknownAction | ErrorCode::UnsupportedConversion => {
            StatusCode::BAD_REQUEST
        }
    }
}

/// Map an envelope onto an HTTP response.
///
/// Success bodies are the bare fields object; failures are `{error, code}`.
pub fn envelope_response(envelope: Envelope) -> Response {
    let status = envelope.code().map(status_for).unwrap_or(StatusCode::OK);
    (status, Json(envelope.into_body())).into_response()
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for `server`.
    pub fn router(&self, server: ToolHubServer) -> Router {
        let state = AppState {
            server,
            api_path: self.config.api_path.clone(),
            rpc_path: self.config.rpc_path.clone(),
        };

        let mut app = Router::new()
            .route(&self.config.api_path, get(handle_tool_list))
            .route(
                &format!("{}/{{tool_name}}", self.config.api_path),
                post(handle_tool_call),
            )
            .route("/tools/{tool_name}", get(handle_tool_page))
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: ToolHubServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Tools:    POST {}/{{tool_name}}", self.config.api_path);
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "tools": state.api_path,
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "documentation": format!("POST a JSON payload to {}/{{tool_name}}", state.api_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// List the registered tools.
async fn handle_tool_list(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "tools": state.server.list_tools()
    }))
}

/// Run a tool against the request body.
#[instrument(skip_all, fields(tool))]
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> Response {
    tracing::Span::current().record("tool", tool_name.as_str());
    info!("Received tool call: {}", tool_name);

    let payload = if state.server.registry().contains(&tool_name) {
        match parse_body(&body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Rejecting malformed JSON body: {}", e);
                return envelope_response(e.into());
            }
        }
    } else {
        Value::Null
    };

    envelope_response(state.server.dispatch(&tool_name, &payload))
}

/// Describe a tool page, or send unknown slugs back to the index.
async fn handle_tool_page(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
) -> Response {
    match catalog::describe(&tool_name, state.server.registry()) {
        Some(page) => Json(page).into_response(),
        None => {
            info!("Unknown tool page {}, redirecting to index", tool_name);
            Redirect::to("/").into_response()
        }
    }
}

/// Parse a request body; an empty body is an empty payload.
fn parse_body(body: &[u8]) -> Result<Value, ToolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ToolError::bad_request(format!("invalid JSON body: {}", e)))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match process_request(&state, request) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Process a JSON-RPC request. Notifications get no response.
fn process_request(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    if request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(state, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "tools": state.server.list_tools() }),
        ),
        "tools/call" => handle_rpc_tools_call(state, request),
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };
    Some(response)
}

/// Handle initialize request.
fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        }
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
fn handle_rpc_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    if !state.server.registry().contains(name) {
        return JsonRpcResponse::invalid_params(request.id, format!("Tool not found: {}", name));
    }

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    let result = call_tool_result(state.server.dispatch(name, &arguments));

    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(request.id, value),
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
