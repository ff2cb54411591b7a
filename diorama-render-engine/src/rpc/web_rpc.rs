use crate::engine::orbit::{DetachOrbit, OrbitControllerState, normalize_angle};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing message buffers for the parent page. Systems queue notifications
/// here; they are posted in order at the end of the RPC system chain.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Queue a one-way notification for the parent page.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue a response to a request from the parent page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Drain queued notifications without posting them.
    #[cfg(test)]
    pub(crate) fn take_notifications(&mut self) -> Vec<RpcNotification> {
        std::mem::take(&mut self.outgoing_notifications)
    }
}

/// JSON-RPC bridge between the viewer and the page embedding it.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

/// Owns the `message` listener registered on the page window. Dropping it
/// unregisters the callback, so the listener lives exactly as long as the app.
#[cfg(target_arch = "wasm32")]
struct MessageListener {
    callback: Closure<dyn FnMut(MessageEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for MessageListener {
    fn drop(&mut self) {
        if let Some(window) = window() {
            let _ = window.remove_event_listener_with_callback(
                "message",
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::default();
    let queue = message_queue.clone();

    let callback = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        let Ok(data) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let message: String = data.into();
        if message.contains("jsonrpc") {
            if let Ok(mut queue) = queue.lock() {
                queue.push(message);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available; RPC listener not registered");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    world.insert_non_send_resource(MessageListener { callback });
    world.insert_resource(MessageQueue(message_queue));
}

/// Messages received from the parent window, drained once per frame.
#[derive(Resource)]
struct MessageQueue(Arc<Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the parent page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = match queue_res.0.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(_) => return,
    };
    for content in messages {
        message_events.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut orbit: Option<ResMut<OrbitControllerState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut detach_events: EventWriter<DetachOrbit>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) =
                    handle_rpc_request(&request, orbit.as_deref_mut(), &mut detach_events)
                {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    orbit: Option<&mut OrbitControllerState>,
    detach_events: &mut EventWriter<DetachOrbit>,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_orbit_state" => handle_get_orbit_state(orbit.as_deref()),
        "get_stage_table" => handle_get_stage_table(orbit.as_deref()),
        "set_auto_rotation" => handle_set_auto_rotation(&request.params, orbit),
        "detach_orbit" => handle_detach_orbit(orbit.as_deref(), detach_events),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn attached(orbit: Option<&OrbitControllerState>) -> Result<&OrbitControllerState, RpcError> {
    orbit.ok_or_else(|| RpcError::internal_error("Orbit controller is not attached"))
}

/// Report angle, velocity, stage and manual rotation flag.
fn handle_get_orbit_state(
    orbit: Option<&OrbitControllerState>,
) -> Result<serde_json::Value, RpcError> {
    let orbit = attached(orbit)?;
    Ok(serde_json::json!({
        "angle": orbit.angle(),
        "normalized_angle": normalize_angle(orbit.angle()),
        "velocity": orbit.velocity(),
        "stage": orbit.stage(),
        "manual_rotation": orbit.is_manual_rotation(),
    }))
}

fn handle_get_stage_table(
    orbit: Option<&OrbitControllerState>,
) -> Result<serde_json::Value, RpcError> {
    let orbit = attached(orbit)?;
    serde_json::to_value(orbit.stages())
        .map_err(|e| RpcError::internal_error(&format!("Failed to serialise stages: {}", e)))
}

/// Change the idle auto-rotation rate; `0` disables auto-rotation.
fn handle_set_auto_rotation(
    params: &serde_json::Value,
    orbit: Option<&mut OrbitControllerState>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct AutoRotationParams {
        rate: f64,
    }

    let params = serde_json::from_value::<AutoRotationParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'rate' parameter"))?;
    let orbit =
        orbit.ok_or_else(|| RpcError::internal_error("Orbit controller is not attached"))?;

    orbit
        .set_auto_rotation_rate(params.rate)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    info!("Auto-rotation rate set to {}", params.rate);

    Ok(serde_json::json!({
        "success": true,
        "auto_rotation_rate": params.rate
    }))
}

fn handle_detach_orbit(
    orbit: Option<&OrbitControllerState>,
    detach_events: &mut EventWriter<DetachOrbit>,
) -> Result<serde_json::Value, RpcError> {
    attached(orbit)?;
    detach_events.write(DetachOrbit);
    Ok(serde_json::json!({ "success": true }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Post queued notifications, then responses, to the parent page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    let notifications = std::mem::take(&mut rpc_interface.outgoing_notifications);
    let responses = std::mem::take(&mut rpc_interface.outgoing_responses);

    for notification in &notifications {
        send_message_to_parent(notification);
    }
    for response in &responses {
        send_message_to_parent(response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize message: {}", e);
            return;
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        let Some(parent) = window.parent().ok().flatten() else {
            warn!("No parent window available for message transmission");
            return;
        };
        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
            error!("Failed to send message to parent: {:?}", e);
        }
    }

    // Native builds have no embedding page.
    #[cfg(not(target_arch = "wasm32"))]
    debug!("RPC out: {}", json);
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
