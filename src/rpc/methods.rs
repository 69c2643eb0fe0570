//! Workbench RPC method implementations
//!
//! Each method corresponds to a JSON-RPC call the explorer UI makes against
//! the editable chain.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::chain::{ChainSession, EditError, EditEvent};
use crate::constants::VERSION;
use crate::crypto::HeaderDigest;
use crate::header::{compute_header_hash, BlockHeader, HeaderField};
use crate::rpc::EthClient;

/// Method not found
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Malformed params
pub const INVALID_PARAMS: i32 = -32602;
/// Upstream node failure
pub const INTERNAL_ERROR: i32 = -32603;
/// Block index or number out of range
pub const OUT_OF_RANGE: i32 = -8;

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<serde_json::Value>,
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: serde_json::Value,
}

/// JSON-RPC Error
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: serde_json::Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }
}

/// RPC Handler State
pub struct RpcState {
    pub session: RwLock<ChainSession>,
    /// Upstream node; `None` when serving a chain loaded from a file
    pub client: Option<EthClient>,
    pub max_blocks: u64,
}

impl RpcState {
    pub fn new(session: ChainSession, client: Option<EthClient>, max_blocks: u64) -> Self {
        Self {
            session: RwLock::new(session),
            client,
            max_blocks,
        }
    }
}

/// Process a JSON-RPC request and return a response
pub async fn handle_request(state: &RpcState, request: JsonRpcRequest) -> JsonRpcResponse {
    let id = request.id;
    let params = request.params;
    tracing::debug!(method = %request.method, "rpc request");

    match request.method.as_str() {
        "getinfo" => get_info(state, id).await,
        "getblockcount" => get_block_count(state, id).await,
        "getblocks" => get_blocks(state, id).await,
        "getblock" => get_block(state, id, params).await,
        "computeheaderhash" => compute_hash(state, id, params).await,
        "validatechain" => validate(state, id).await,
        "getvalidationstatus" => validation_status(state, id).await,
        "editblock" => edit_block(state, id, params).await,
        "togglemode" => toggle_mode(state, id, params).await,
        "saveblock" => save_block(state, id, params).await,
        "cancelblock" => cancel_block(state, id, params).await,
        "restoreblock" => restore_block(state, id, params).await,
        "restoreall" => restore_all(state, id).await,
        "reload" => reload(state, id).await,
        _ => JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Positional parameter `pos`, also accepting a bare scalar for position 0
fn param(params: &Option<serde_json::Value>, pos: usize) -> Option<&serde_json::Value> {
    match params {
        Some(serde_json::Value::Array(arr)) => arr.get(pos),
        Some(value) if pos == 0 => Some(value),
        _ => None,
    }
}

fn index_param(params: &Option<serde_json::Value>) -> Option<usize> {
    param(params, 0)
        .and_then(|v| v.as_u64())
        .and_then(|n| usize::try_from(n).ok())
}

fn edit_error(id: serde_json::Value, e: EditError) -> JsonRpcResponse {
    let code = match e {
        EditError::IndexOutOfRange { .. } => OUT_OF_RANGE,
        EditError::ReadOnlyField(_) => INVALID_PARAMS,
    };
    JsonRpcResponse::error(id, code, e.to_string())
}

/// Returns general workbench information
async fn get_info(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.session.read().await;
    let stats = session.stats();
    let report = session.validate();

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "version": VERSION,
            "upstream": state.client.as_ref().map(|c| c.url()),
            "blocks": stats.block_count,
            "latest": stats.latest_block,
            "modified": stats.modified_count,
            "digest": stats.digest,
            "valid": report.is_valid,
        }),
    )
}

/// Returns the number of loaded blocks
async fn get_block_count(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.session.read().await;
    JsonRpcResponse::success(id, serde_json::json!(session.len()))
}

/// Returns every loaded block with its edit state
async fn get_blocks(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.session.read().await;
    JsonRpcResponse::success(id, serde_json::json!(session.blocks()))
}

/// Returns one block by number
async fn get_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(number) = param(&params, 0).and_then(|v| v.as_u64()) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block number".into());
    };

    let session = state.session.read().await;
    match session.block_by_number(number) {
        Some(block) => JsonRpcResponse::success(id, serde_json::json!(block)),
        None => JsonRpcResponse::error(id, OUT_OF_RANGE, format!("Block {} not loaded", number)),
    }
}

/// Hash an arbitrary header
/// Params: [header, (optional) digest]
async fn compute_hash(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let header: BlockHeader = match param(&params, 0).cloned().map(serde_json::from_value) {
        Some(Ok(header)) => header,
        Some(Err(e)) => {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid header: {e}"))
        }
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected header".into()),
    };

    let digest = match param(&params, 1).and_then(|v| v.as_str()) {
        Some(name) => match name.parse::<HeaderDigest>() {
            Ok(digest) => digest,
            Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e),
        },
        None => state.session.read().await.digest(),
    };

    JsonRpcResponse::success(id, serde_json::json!(compute_header_hash(&header, digest)))
}

/// Returns the whole-chain validation report
async fn validate(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.session.read().await;
    JsonRpcResponse::success(id, serde_json::json!(session.validate()))
}

/// Returns the validation summary shown in the explorer banner
async fn validation_status(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.session.read().await;
    JsonRpcResponse::success(id, serde_json::json!(session.validate().status()))
}

/// Edit one field and cascade
/// Params: [block_index, field, value]
async fn edit_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let index = index_param(&params);
    let field = param(&params, 1).and_then(|v| v.as_str());
    let value = param(&params, 2).and_then(|v| v.as_str());

    let (Some(index), Some(field), Some(value)) = (index, field, value) else {
        return JsonRpcResponse::error(
            id,
            INVALID_PARAMS,
            "Invalid params: [block_index, field, value]".into(),
        );
    };
    let field = match field.parse::<HeaderField>() {
        Ok(field) => field,
        Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e),
    };

    let mut session = state.session.write().await;
    match session.edit(&EditEvent::new(index, field, value)) {
        Ok(()) => JsonRpcResponse::success(id, serde_json::json!(session.blocks())),
        Err(e) => edit_error(id, e),
    }
}

/// Params: [block_index]
async fn toggle_mode(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(index) = index_param(&params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into());
    };
    let mut session = state.session.write().await;
    match session.toggle_edit_mode(index) {
        Ok(editing) => JsonRpcResponse::success(id, serde_json::json!(editing)),
        Err(e) => edit_error(id, e),
    }
}

/// Params: [block_index]
async fn save_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(index) = index_param(&params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into());
    };
    let mut session = state.session.write().await;
    match session.save_changes(index) {
        Ok(()) => JsonRpcResponse::success(id, serde_json::json!(session.get(index))),
        Err(e) => edit_error(id, e),
    }
}

/// Params: [block_index]
async fn cancel_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(index) = index_param(&params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into());
    };
    let mut session = state.session.write().await;
    match session.cancel_changes(index) {
        Ok(()) => JsonRpcResponse::success(id, serde_json::json!(session.get(index))),
        Err(e) => edit_error(id, e),
    }
}

/// Params: [block_index]
async fn restore_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let Some(index) = index_param(&params) else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into());
    };
    let mut session = state.session.write().await;
    match session.restore(index) {
        Ok(()) => JsonRpcResponse::success(id, serde_json::json!(session.get(index))),
        Err(e) => edit_error(id, e),
    }
}

/// Restore every block and return the fresh report
async fn restore_all(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let mut session = state.session.write().await;
    session.restore_all();
    JsonRpcResponse::success(id, serde_json::json!(session.validate()))
}

/// Re-fetch the chain from the upstream node, discarding all edits
async fn reload(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let Some(client) = state.client.as_ref() else {
        return JsonRpcResponse::error(id, INTERNAL_ERROR, "No upstream node configured".into());
    };

    match client.load_blocks(state.max_blocks).await {
        Ok(headers) => {
            let mut session = state.session.write().await;
            session.load(headers);
            JsonRpcResponse::success(id, serde_json::json!(session.len()))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to reload blocks");
            JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Failed to load blocks: {e}"))
        }
    }
}
