use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

use crate::engine::commands::{
    BaseColorEvent, ClearColorOverrideEvent, CommandError, CommandSource, EmotionToggleEvent,
    GestureToggleEvent, ModelSelectionEvent, ParticleBudgetEvent, SegmentColorsEvent,
    parse_hex_color,
};
use crate::engine::morph::ScaleState;
use crate::engine::shapes::ShapeKind;
use crate::vision::sample::{Emotion, SampleInbox, VisionSample, VisionState, VisionStatus};

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

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<CommandError> for RpcError {
    fn from(error: CommandError) -> Self {
        Self::invalid_params(&error.to_string())
    }
}

/// Resource managing bidirectional RPC traffic with the embedding frontend:
/// requests come in over postMessage, responses and notifications queue here
/// until the outgoing system flushes them.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC command boundary for iframe-based deployment.
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
                    notify_vision_changes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Validate RPC format cheaply before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Transfer closure ownership to JS so it outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the frontend.
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

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Writers for every command the RPC boundary can dispatch.
#[derive(SystemParam)]
pub struct CommandWriters<'w> {
    model: EventWriter<'w, ModelSelectionEvent>,
    budget: EventWriter<'w, ParticleBudgetEvent>,
    base_color: EventWriter<'w, BaseColorEvent>,
    segment_colors: EventWriter<'w, SegmentColorsEvent>,
    clear_color: EventWriter<'w, ClearColorOverrideEvent>,
    gesture: EventWriter<'w, GestureToggleEvent>,
    emotion: EventWriter<'w, EmotionToggleEvent>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    vision_state: Res<VisionState>,
    vision_status: Res<VisionStatus>,
    scale: Res<ScaleState>,
    inbox: Res<SampleInbox>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut writers: CommandWriters,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    &vision_state,
                    &vision_status,
                    &scale,
                    &inbox,
                    &mut writers,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding unparseable RPC message: {parse_error}");
            }
        }
    }
}

/// Handle an individual RPC request and generate a response based on method.
/// Invalid parameters produce an error response and dispatch nothing.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    vision_state: &VisionState,
    vision_status: &VisionStatus,
    scale: &ScaleState,
    inbox: &SampleInbox,
    writers: &mut CommandWriters,
) -> Option<RpcResponse> {
    // Only requests carrying an ID expect a response.
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "set_model" => handle_set_model(&request.params, writers),
        "set_particle_count" => handle_set_particle_count(&request.params, writers),
        "set_base_color" => handle_set_base_color(&request.params, writers),
        "set_segment_colors" => handle_set_segment_colors(&request.params, writers),
        "clear_base_color" => {
            writers.clear_color.write(ClearColorOverrideEvent);
            Ok(serde_json::json!({ "success": true }))
        }
        "set_gesture_enabled" => handle_set_gesture_enabled(&request.params, writers),
        "set_emotion_enabled" => handle_set_emotion_enabled(&request.params, writers),
        "publish_vision_sample" => handle_publish_vision_sample(&request.params, inbox),
        "get_fps" => handle_get_fps(diagnostics),
        "get_vision_state" => Ok(serde_json::json!({
            "openness": vision_state.last.openness,
            "emotion": vision_state.last.emotion.as_str(),
            "scale": scale.live,
            "degraded": vision_status.is_degraded(),
        })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({ "method": request.method })),
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

fn handle_set_model(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetModelParams {
        model: String,
    }

    let parsed = serde_json::from_value::<SetModelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'model' parameter"))?;

    let kind = ShapeKind::from_string(&parsed.model)
        .ok_or_else(|| RpcError::from(CommandError::UnknownModel(parsed.model.clone())))?;

    writers.model.write(ModelSelectionEvent {
        kind,
        source: CommandSource::Rpc,
    });
    info!("Model selection dispatched: {}", kind.as_str());

    Ok(serde_json::json!({ "success": true, "model": kind.as_str() }))
}

fn handle_set_particle_count(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetCountParams {
        count: u64,
    }

    // Fractional and negative counts fail deserialization.
    let parsed = serde_json::from_value::<SetCountParams>(params.clone())
        .map_err(|_| RpcError::from(CommandError::InvalidParticleCount))?;

    writers.budget.write(ParticleBudgetEvent {
        count: parsed.count as usize,
    });

    Ok(serde_json::json!({ "success": true, "count": parsed.count }))
}

fn handle_set_base_color(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetBaseColorParams {
        color: String,
    }

    let parsed = serde_json::from_value::<SetBaseColorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'color' parameter"))?;
    let color = parse_hex_color(&parsed.color)?;

    writers.base_color.write(BaseColorEvent { color });

    Ok(serde_json::json!({ "success": true, "color": parsed.color }))
}

fn handle_set_segment_colors(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetSegmentColorsParams {
        base: String,
        tip: String,
    }

    let parsed = serde_json::from_value::<SetSegmentColorsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'base' and 'tip' parameters"))?;
    // Parse both before dispatching so a bad tip color changes nothing.
    let base = parse_hex_color(&parsed.base)?;
    let tip = parse_hex_color(&parsed.tip)?;

    writers.segment_colors.write(SegmentColorsEvent { base, tip });

    Ok(serde_json::json!({ "success": true }))
}

fn handle_set_gesture_enabled(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    let parsed = parse_enabled_params(params)?;
    writers.gesture.write(GestureToggleEvent {
        enabled: parsed,
    });
    Ok(serde_json::json!({ "success": true, "enabled": parsed }))
}

fn handle_set_emotion_enabled(
    params: &serde_json::Value,
    writers: &mut CommandWriters,
) -> Result<serde_json::Value, RpcError> {
    let parsed = parse_enabled_params(params)?;
    writers.emotion.write(EmotionToggleEvent {
        enabled: parsed,
    });
    Ok(serde_json::json!({ "success": true, "enabled": parsed }))
}

/// Accept one classified sample from a frontend that runs landmark inference
/// on its side of the boundary (the usual arrangement in browser builds).
fn handle_publish_vision_sample(
    params: &serde_json::Value,
    inbox: &SampleInbox,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct PublishSampleParams {
        openness: f32,
        emotion: Emotion,
    }

    let parsed = serde_json::from_value::<PublishSampleParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'openness' and 'emotion' parameters"))?;

    inbox.publisher().publish(VisionSample {
        openness: parsed.openness.clamp(0.0, 1.0),
        emotion: parsed.emotion,
    });

    Ok(serde_json::json!({ "success": true }))
}

fn parse_enabled_params(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(Deserialize)]
    struct EnabledParams {
        enabled: bool,
    }

    serde_json::from_value::<EnabledParams>(params.clone())
        .map(|p| p.enabled)
        .map_err(|_| RpcError::invalid_params("Expected 'enabled' parameter"))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({ "fps": fps }))
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

/// Push a notification whenever the acted-on vision sample changes, so the
/// frontend can mirror the gesture/emotion readouts without polling.
fn notify_vision_changes(
    vision_state: Res<VisionState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_sent: Local<Option<VisionSample>>,
) {
    if *last_sent == Some(vision_state.last) {
        return;
    }
    *last_sent = Some(vision_state.last);

    rpc_interface.send_notification(
        "vision_sample",
        serde_json::json!({
            "openness": vision_state.last.openness,
            "emotion": vision_state.last.emotion.as_str(),
        }),
    );
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send a serialized message to the parent window hosting the canvas.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // Native builds keep the queue flowing but have no parent window.
        let _ = message;
    }
}
