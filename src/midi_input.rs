//! MIDI input module for receiving notes from external devices
//!
//! The backend delivers messages on its own thread; they are parsed there
//! and queued on a channel that the tick loop drains without blocking.

use crate::error::{NoteFrameError, Result};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tracing::info;

/// Parsed MIDI event with timing
#[derive(Debug, Clone)]
pub struct MidiEvent {
    /// Timestamp reported by the backend (microseconds)
    pub timestamp_us: u64,
    /// Message type
    pub message_type: MidiMessageType,
}

/// Type of MIDI message
#[derive(Debug, Clone, PartialEq)]
pub enum MidiMessageType {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    Other,
}

impl MidiEvent {
    /// Parse raw MIDI bytes into a MidiEvent
    ///
    /// A note-on with velocity 0 is reported as a note-off.
    pub fn from_bytes(bytes: &[u8], timestamp_us: u64) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        let message_type = match bytes[0] & 0xF0 {
            0x90 if bytes.len() >= 3 && bytes[2] > 0 => MidiMessageType::NoteOn {
                note: bytes[1],
                velocity: bytes[2],
            },
            0x90 if bytes.len() >= 3 => MidiMessageType::NoteOff {
                note: bytes[1],
                velocity: 0,
            },
            0x80 if bytes.len() >= 3 => MidiMessageType::NoteOff {
                note: bytes[1],
                velocity: bytes[2],
            },
            _ => MidiMessageType::Other,
        };

        Some(Self {
            timestamp_us,
            message_type,
        })
    }

    /// Convert MIDI note number to note name
    pub fn midi_to_note_name(note: u8) -> String {
        let note_names = [
            "c", "cs", "d", "ds", "e", "f", "fs", "g", "gs", "a", "as", "b",
        ];
        let octave = (note / 12) as i32 - 1;
        let note_index = (note % 12) as usize;
        format!("{}{}", note_names[note_index], octave)
    }
}

/// Anything the tick loop can drain note events from
pub trait EventSource {
    /// Take every pending event without blocking
    fn drain(&mut self) -> Vec<MidiEvent>;
}

/// Events queued up front, for scripted sessions and tests
impl EventSource for VecDeque<MidiEvent> {
    fn drain(&mut self) -> Vec<MidiEvent> {
        VecDeque::drain(self, ..).collect()
    }
}

/// Pick a port from `ports`
///
/// With no request the first port is used. A request matches a port whose
/// name equals it or contains it; the first match wins.
pub fn select_port(ports: &[String], requested: Option<&str>) -> Result<String> {
    if ports.is_empty() {
        return Err(NoteFrameError::NoMidiPorts);
    }
    match requested {
        None => Ok(ports[0].clone()),
        Some(name) => ports
            .iter()
            .find(|p| p.as_str() == name || p.contains(name))
            .cloned()
            .ok_or_else(|| NoteFrameError::PortNotFound {
                requested: name.to_string(),
                available: ports.to_vec(),
            }),
    }
}

/// MIDI input handler for receiving messages
pub struct MidiInputHandler {
    connection: Option<MidiInputConnection<()>>,
    receiver: Option<Receiver<MidiEvent>>,
}

impl MidiInputHandler {
    pub fn new() -> Self {
        Self {
            connection: None,
            receiver: None,
        }
    }

    /// Names of the available MIDI input ports
    pub fn port_names() -> Result<Vec<String>> {
        let midi_in = MidiInput::new("Noteframe MIDI Scanner")
            .map_err(|e| NoteFrameError::Midi(e.to_string()))?;
        Ok(midi_in
            .ports()
            .iter()
            .filter_map(|port| midi_in.port_name(port).ok())
            .collect())
    }

    /// Connect to the port chosen by [`select_port`]
    pub fn connect(&mut self, requested: Option<&str>) -> Result<String> {
        let mut midi_in = MidiInput::new("Noteframe MIDI Input")
            .map_err(|e| NoteFrameError::Midi(e.to_string()))?;

        let named: Vec<(MidiInputPort, String)> = midi_in
            .ports()
            .into_iter()
            .filter_map(|port| midi_in.port_name(&port).ok().map(|name| (port, name)))
            .collect();
        let names: Vec<String> = named.iter().map(|(_, name)| name.clone()).collect();
        let chosen = select_port(&names, requested)?;
        if requested.is_none() {
            info!("Using MIDI input port: {}", chosen);
        }
        let port = named
            .into_iter()
            .find(|(_, name)| *name == chosen)
            .map(|(port, _)| port)
            .ok_or_else(|| NoteFrameError::Midi(format!("port '{}' disappeared", chosen)))?;

        // Ignore sysex and timing messages for cleaner input
        midi_in.ignore(Ignore::Sysex | Ignore::Time);

        let (sender, receiver) = channel::<MidiEvent>();
        let connection = midi_in
            .connect(
                &port,
                "noteframe-input",
                move |timestamp_us, message, _| {
                    if let Some(event) = MidiEvent::from_bytes(message, timestamp_us) {
                        let _ = sender.send(event);
                    }
                },
                (),
            )
            .map_err(|e| NoteFrameError::Midi(e.to_string()))?;

        info!("Listening for MIDI on: {}", chosen);
        self.connection = Some(connection);
        self.receiver = Some(receiver);
        Ok(chosen)
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Receive all pending MIDI events (non-blocking)
    pub fn recv_all(&self) -> Vec<MidiEvent> {
        let mut events = Vec::new();
        if let Some(ref receiver) = self.receiver {
            loop {
                match receiver.try_recv() {
                    Ok(event) => events.push(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => break,
                }
            }
        }
        events
    }

    /// Disconnect from current device
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }
        self.receiver = None;
    }
}

impl Default for MidiInputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for MidiInputHandler {
    fn drain(&mut self) -> Vec<MidiEvent> {
        self.recv_all()
    }
}
