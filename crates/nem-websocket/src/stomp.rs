//! STOMP frame codec.
//!
//! NIS speaks a STOMP-like sub-protocol over its WebSocket endpoint. A
//! frame serializes as the command line, one `key:value` line per header,
//! a blank line, the body, and a NUL terminator; parsing is the exact
//! inverse. Command names are case-insensitive on parse and upper-cased
//! on serialize.

use std::fmt;

use crate::error::WebSocketError;

/// A STOMP command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StompCommand {
    // Client -> server frames.
    /// Open a STOMP session.
    Connect,
    /// Send a message to a destination.
    Send,
    /// Register a subscription.
    Subscribe,
    /// Remove a subscription.
    Unsubscribe,
    /// Begin a transaction.
    Begin,
    /// Commit a transaction.
    Commit,
    /// Abort a transaction.
    Abort,
    /// Acknowledge a message.
    Ack,
    /// Negatively acknowledge a message.
    Nack,
    /// Close the session.
    Disconnect,
    // Server -> client frames.
    /// Session accepted.
    Connected,
    /// Message delivery for a subscription.
    Message,
    /// Receipt for a client frame.
    Receipt,
    /// Server-side error.
    Error,
}

impl StompCommand {
    /// The canonical upper-case command name.
    pub fn as_str(self) -> &'static str {
        match self {
            StompCommand::Connect => "CONNECT",
            StompCommand::Send => "SEND",
            StompCommand::Subscribe => "SUBSCRIBE",
            StompCommand::Unsubscribe => "UNSUBSCRIBE",
            StompCommand::Begin => "BEGIN",
            StompCommand::Commit => "COMMIT",
            StompCommand::Abort => "ABORT",
            StompCommand::Ack => "ACK",
            StompCommand::Nack => "NACK",
            StompCommand::Disconnect => "DISCONNECT",
            StompCommand::Connected => "CONNECTED",
            StompCommand::Message => "MESSAGE",
            StompCommand::Receipt => "RECEIPT",
            StompCommand::Error => "ERROR",
        }
    }

    /// Parse a command name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self, WebSocketError> {
        match name.to_ascii_uppercase().as_str() {
            "CONNECT" => Ok(StompCommand::Connect),
            "SEND" => Ok(StompCommand::Send),
            "SUBSCRIBE" => Ok(StompCommand::Subscribe),
            "UNSUBSCRIBE" => Ok(StompCommand::Unsubscribe),
            "BEGIN" => Ok(StompCommand::Begin),
            "COMMIT" => Ok(StompCommand::Commit),
            "ABORT" => Ok(StompCommand::Abort),
            "ACK" => Ok(StompCommand::Ack),
            "NACK" => Ok(StompCommand::Nack),
            "DISCONNECT" => Ok(StompCommand::Disconnect),
            "CONNECTED" => Ok(StompCommand::Connected),
            "MESSAGE" => Ok(StompCommand::Message),
            "RECEIPT" => Ok(StompCommand::Receipt),
            "ERROR" => Ok(StompCommand::Error),
            other => Err(WebSocketError::Parse(format!("unknown command: {other}"))),
        }
    }
}

impl fmt::Display for StompCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A STOMP frame: command, ordered headers, and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StompFrame {
    /// The frame command.
    pub command: StompCommand,
    /// Headers in serialization order.
    pub headers: Vec<(String, String)>,
    /// Frame body, without the NUL terminator.
    pub body: String,
}

impl StompFrame {
    /// A frame with no headers and an empty body.
    pub fn new(command: StompCommand) -> Self {
        StompFrame {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header, preserving order.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// The first header value with the given key, if any.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The CONNECT frame sent on transport open.
    pub fn connect(host: &str) -> Self {
        StompFrame::new(StompCommand::Connect)
            .with_header("accept-version", "1.1,1.0")
            .with_header("host", host)
    }

    /// A SUBSCRIBE frame registering `id` against a destination path.
    pub fn subscribe(id: u32, destination: &str) -> Self {
        StompFrame::new(StompCommand::Subscribe)
            .with_header("id", &id.to_string())
            .with_header("destination", destination)
    }

    /// An UNSUBSCRIBE frame for the given id.
    pub fn unsubscribe(id: u32) -> Self {
        StompFrame::new(StompCommand::Unsubscribe).with_header("id", &id.to_string())
    }

    /// A SEND frame carrying a body to a destination path.
    pub fn send(destination: &str, body: &str) -> Self {
        StompFrame::new(StompCommand::Send)
            .with_header("destination", destination)
            .with_header("content-length", &body.len().to_string())
            .with_body(body)
    }

    /// A DISCONNECT frame.
    pub fn disconnect() -> Self {
        StompFrame::new(StompCommand::Disconnect)
    }

    /// Serialize to the wire text form, NUL terminator included.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');
        for (key, value) in &self.headers {
            out.push_str(key);
            out.push(':');
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\u{0}');
        out
    }

    /// Parse a wire-form frame.
    ///
    /// # Arguments
    /// * `text` - The frame text, with or without its NUL terminator.
    pub fn parse(text: &str) -> Result<Self, WebSocketError> {
        let (head, body) = text.split_once("\n\n").ok_or_else(|| {
            WebSocketError::Parse("failed to split into headers and body".to_string())
        })?;

        let mut lines = head.split('\n');
        let command_line = lines.next().unwrap_or_default();
        let command = StompCommand::parse(command_line)?;

        let mut headers = Vec::new();
        for line in lines {
            let (key, value) = line.split_once(':').ok_or_else(|| {
                WebSocketError::Parse(format!("failed to parse header: {line}"))
            })?;
            headers.push((key.to_string(), value.to_string()));
        }

        let body = body.strip_suffix('\u{0}').unwrap_or(body);
        Ok(StompFrame {
            command,
            headers,
            body: body.to_string(),
        })
    }
}

impl fmt::Display for StompFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command={}, headers={{", self.command)?;
        for (i, (key, value)) in self.headers.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}:{value}")?;
        }
        write!(f, "}} body={}", self.body)
    }
}
