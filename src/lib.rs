//! # Noteframe - MIDI-Driven Image Grid with Signal Smear
//!
//! Noteframe is a real-time visual instrument. Holding a MIDI note shows the
//! image mapped to it; every held image is packed into an auto-sized grid.
//! Each rendered frame is then read as if it were audio, pushed through a
//! feedback delay whose memory spans frames, and added back over itself at
//! half opacity.
//!
//! ## Core Pieces
//!
//! - **Grid packing** ([`layout`]): near-square grid that drops columns until
//!   cells reach a minimum size
//! - **Held notes** ([`notes`]): note-on/off tracking with ascending render order
//! - **Rendering** ([`render`]): aspect-preserving, centred images per cell
//! - **Signal effect chain** ([`effect_chain`], [`units`]): frame → [-1, 1]
//!   signal → stateful units → frame
//! - **Compositing** ([`compositor`]): additive blend at fixed opacity
//!
//! ## Quick Start
//!
//! ```rust
//! use noteframe::effect_chain::SignalEffectChain;
//! use noteframe::frame::FrameBuffer;
//! use noteframe::layout::compute_layout;
//! use noteframe::process_image_array;
//!
//! let layout = compute_layout(5, 800, 600, 8, 24);
//! assert_eq!((layout.columns, layout.rows), (3, 2));
//!
//! // The chain lives for the whole session; its delay line carries over
//! let mut chain = SignalEffectChain::default_chain();
//! let frame = FrameBuffer::new(32, 24, [20, 40, 60]);
//! let shown = process_image_array(&mut chain, &frame, 0, 0);
//! assert_eq!(shown.width(), 32);
//! ```

pub mod app;
pub mod compositor;
pub mod config;
pub mod display;
pub mod effect_chain;
pub mod effect_unit;
pub mod error;
pub mod frame;
pub mod images;
pub mod layout;
pub mod midi_input;
pub mod notes;
pub mod pipeline;
pub mod render;
pub mod units;

pub use error::{NoteFrameError, Result};
pub use layout::{compute_layout, GridLayout};
pub use pipeline::process_image_array;
