// SPDX-License-Identifier: MPL-2.0
//! Message bridge to a remote embed surface.
//!
//! The embed provider's player runs behind a trust boundary. Commands go out
//! one-way through the surface's [`EmbedPort`]; state notifications come back
//! on the process-wide [`MessageBus`], which any other code may also post
//! to. Nothing is acknowledged: an outbound command may be dropped, and
//! inbound notifications arrive whenever the provider feels like sending
//! them.
//!
//! Wire format (JSON text in both directions):
//!
//! - outbound: `{"event":"command","func":"playVideo","args":[]}`
//! - inbound: `{"event":"onStateChange","info":1}`,
//!   `{"event":"infoDelivery","info":{"playerState":2}}`, `{"event":"onReady"}`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tokio::sync::{broadcast, mpsc};

/// Messages buffered per subscriber before the oldest are overwritten.
const BUS_CAPACITY: usize = 64;

/// Process-wide message channel shared by embed surfaces and unrelated
/// senders. Cloning yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<String>,
}

impl MessageBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Posts a message to every current subscriber. Posting with no
    /// subscribers is not an error.
    pub fn post(&self, payload: impl Into<String>) {
        let _ = self.tx.send(payload.into());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound handle to one embed surface, handed over by the host once the
/// surface has loaded.
#[derive(Debug, Clone)]
pub struct EmbedPort {
    tx: mpsc::UnboundedSender<String>,
}

impl EmbedPort {
    /// Creates a port and the receiving end the surface reads commands from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn post(&self, payload: String) -> Result<(), BridgeError> {
        self.tx
            .send(payload)
            .map_err(|_| BridgeError::SurfaceClosed)
    }
}

/// Why an outbound command was not transmitted. Always discarded by the
/// controller: embed playback is best effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The surface has not finished initializing; no port yet.
    NotReady,
    /// The surface went away.
    SurfaceClosed,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::NotReady => write!(f, "embed surface not ready"),
            BridgeError::SurfaceClosed => write!(f, "embed surface closed"),
        }
    }
}

/// Commands understood by the embed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedCommand {
    PlayVideo,
    PauseVideo,
    Mute,
    UnMute,
}

impl EmbedCommand {
    pub fn func(self) -> &'static str {
        match self {
            EmbedCommand::PlayVideo => "playVideo",
            EmbedCommand::PauseVideo => "pauseVideo",
            EmbedCommand::Mute => "mute",
            EmbedCommand::UnMute => "unMute",
        }
    }
}

/// Player state codes reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Other(i64),
}

impl EmbedPlayerState {
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => Self::Unstarted,
            0 => Self::Ended,
            1 => Self::Playing,
            2 => Self::Paused,
            3 => Self::Buffering,
            5 => Self::Cued,
            other => Self::Other(other),
        }
    }
}

/// Inbound notification recognized as coming from an embed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedEvent {
    Ready,
    StateChange(EmbedPlayerState),
}

#[derive(Serialize)]
struct CommandEnvelope<'a> {
    event: &'static str,
    func: &'a str,
    args: &'a [Value],
}

#[derive(Deserialize)]
struct InboundEnvelope {
    event: String,
    #[serde(default)]
    info: Value,
}

/// Serializes a command envelope.
pub fn encode_command(func: &str, args: &[Value]) -> String {
    let envelope = CommandEnvelope {
        event: "command",
        func,
        args,
    };
    // Serializing strings and JSON values cannot fail.
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Parses an inbound payload. Anything that is not an embed notification
/// (foreign senders, malformed JSON, unknown events) yields `None`.
pub fn parse_inbound(payload: &str) -> Option<EmbedEvent> {
    let envelope: InboundEnvelope = serde_json::from_str(payload).ok()?;
    match envelope.event.as_str() {
        "onReady" => Some(EmbedEvent::Ready),
        "onStateChange" => envelope
            .info
            .as_i64()
            .map(|code| EmbedEvent::StateChange(EmbedPlayerState::from_code(code))),
        "infoDelivery" => envelope
            .info
            .get("playerState")
            .and_then(Value::as_i64)
            .map(|code| EmbedEvent::StateChange(EmbedPlayerState::from_code(code))),
        _ => None,
    }
}

/// Bridge to exactly one mounted embed surface.
#[derive(Debug)]
pub struct RemoteEmbedBridge {
    port: Option<EmbedPort>,
    inbound: Option<broadcast::Receiver<String>>,
}

impl RemoteEmbedBridge {
    /// Subscribes to the bus. Commands are dropped until a surface port is
    /// attached.
    pub fn new(bus: &MessageBus) -> Self {
        Self {
            port: None,
            inbound: Some(bus.subscribe()),
        }
    }

    /// Hands over the outbound port once the surface has initialized.
    pub fn attach_surface(&mut self, port: EmbedPort) {
        if self.inbound.is_none() {
            log::debug!("ignoring embed surface attached after detach");
            return;
        }
        self.port = Some(port);
    }

    pub fn is_ready(&self) -> bool {
        self.port.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.inbound.is_some()
    }

    /// Transmits a command one-way. There is no delivery confirmation.
    pub fn send(&self, func: &str, args: &[Value]) -> Result<(), BridgeError> {
        let port = self.port.as_ref().ok_or(BridgeError::NotReady)?;
        port.post(encode_command(func, args))
    }

    pub fn send_command(&self, command: EmbedCommand) -> Result<(), BridgeError> {
        self.send(command.func(), &[])
    }

    /// Drains every pending inbound message, returning those recognized as
    /// embed notifications in arrival order.
    pub fn poll_events(&mut self) -> Vec<EmbedEvent> {
        let mut events = Vec::new();
        let Some(inbound) = self.inbound.as_mut() else {
            return events;
        };

        loop {
            match inbound.try_recv() {
                Ok(payload) => match parse_inbound(&payload) {
                    Some(event) => events.push(event),
                    None => log::trace!("discarding foreign bus message"),
                },
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::debug!("embed bridge lagged, {} bus messages lost", skipped);
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        events
    }

    /// Stops listening and releases the surface. Idempotent.
    pub fn detach(&mut self) {
        self.port = None;
        self.inbound = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_command_envelope() {
        let encoded = encode_command("playVideo", &[]);
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({"event": "command", "func": "playVideo", "args": []}));
    }

    #[test]
    fn encodes_arguments() {
        let encoded = encode_command("seekTo", &[json!(42), json!(true)]);
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["args"], json!([42, true]));
    }

    #[test]
    fn parses_state_change_notifications() {
        assert_eq!(
            parse_inbound(r#"{"event":"onStateChange","info":1}"#),
            Some(EmbedEvent::StateChange(EmbedPlayerState::Playing))
        );
        assert_eq!(
            parse_inbound(r#"{"event":"infoDelivery","info":{"playerState":2,"currentTime":3.5}}"#),
            Some(EmbedEvent::StateChange(EmbedPlayerState::Paused))
        );
        assert_eq!(
            parse_inbound(r#"{"event":"onStateChange","info":42}"#),
            Some(EmbedEvent::StateChange(EmbedPlayerState::Other(42)))
        );
        assert_eq!(parse_inbound(r#"{"event":"onReady"}"#), Some(EmbedEvent::Ready));
    }

    #[test]
    fn foreign_and_malformed_payloads_are_ignored() {
        for payload in [
            "",
            "hello",
            "{",
            "42",
            r#"{"type":"analytics","data":1}"#,
            r#"{"event":"somethingElse","info":1}"#,
            r#"{"event":"onStateChange","info":"playing"}"#,
            r#"{"event":"infoDelivery","info":{"volume":50}}"#,
            r#"{"event":7}"#,
        ] {
            assert_eq!(parse_inbound(payload), None, "payload {payload:?}");
        }
    }

    #[test]
    fn send_before_surface_is_ready_is_dropped() {
        let bus = MessageBus::new();
        let bridge = RemoteEmbedBridge::new(&bus);

        assert!(!bridge.is_ready());
        assert_eq!(
            bridge.send_command(EmbedCommand::PlayVideo),
            Err(BridgeError::NotReady)
        );
    }

    #[test]
    fn send_reaches_attached_surface() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);
        let (port, mut surface) = EmbedPort::channel();
        bridge.attach_surface(port);

        bridge.send_command(EmbedCommand::Mute).unwrap();

        let received = surface.try_recv().unwrap();
        assert!(received.contains(r#""func":"mute""#));
    }

    #[test]
    fn send_to_closed_surface_reports_closed() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);
        let (port, surface) = EmbedPort::channel();
        bridge.attach_surface(port);
        drop(surface);

        assert_eq!(
            bridge.send_command(EmbedCommand::PauseVideo),
            Err(BridgeError::SurfaceClosed)
        );
    }

    #[test]
    fn poll_returns_recognized_events_in_arrival_order() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);

        bus.post(r#"{"event":"onStateChange","info":1}"#);
        bus.post("not json");
        bus.post(r#"{"event":"onStateChange","info":2}"#);

        assert_eq!(
            bridge.poll_events(),
            vec![
                EmbedEvent::StateChange(EmbedPlayerState::Playing),
                EmbedEvent::StateChange(EmbedPlayerState::Paused),
            ]
        );
        assert!(bridge.poll_events().is_empty());
    }

    #[test]
    fn poll_survives_lagging_behind() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);

        for _ in 0..BUS_CAPACITY + 10 {
            bus.post("noise");
        }
        bus.post(r#"{"event":"onStateChange","info":2}"#);

        assert_eq!(
            bridge.poll_events(),
            vec![EmbedEvent::StateChange(EmbedPlayerState::Paused)]
        );
    }

    #[test]
    fn detach_stops_listening_and_is_idempotent() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);
        let (port, _surface) = EmbedPort::channel();
        bridge.attach_surface(port);
        assert_eq!(bus.subscriber_count(), 1);

        bridge.detach();
        bridge.detach();

        assert_eq!(bus.subscriber_count(), 0);
        assert!(!bridge.is_ready());
        bus.post(r#"{"event":"onStateChange","info":1}"#);
        assert!(bridge.poll_events().is_empty());
        assert_eq!(
            bridge.send_command(EmbedCommand::PlayVideo),
            Err(BridgeError::NotReady)
        );
    }

    #[test]
    fn attach_after_detach_is_ignored() {
        let bus = MessageBus::new();
        let mut bridge = RemoteEmbedBridge::new(&bus);
        bridge.detach();

        let (port, _surface) = EmbedPort::channel();
        bridge.attach_surface(port);

        assert!(!bridge.is_ready());
    }
}
