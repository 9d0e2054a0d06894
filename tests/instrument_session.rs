/// End-to-end: config file + image folder -> scripted note events -> frames
use image::{Rgba, RgbaImage};
use noteframe::app::App;
use noteframe::config::Config;
use noteframe::display::Display;
use noteframe::frame::FrameBuffer;
use noteframe::images::ImageLibrary;
use noteframe::midi_input::MidiEvent;
use std::collections::VecDeque;
use std::io;

struct Capture {
    frames: Vec<FrameBuffer>,
}

impl Display for Capture {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn stop_requested(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

fn setup() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    std::fs::create_dir(&images).unwrap();
    RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]))
        .save(images.join("white.png"))
        .unwrap();

    let json = format!(
        r#"{{
            "image_folder": {:?},
            "window": {{ "width": 40, "height": 30, "bg_color": [0, 0, 0] }},
            "notes": {{ "60": "white.png", "64": "white.png", "67": "missing.png" }},
            "grid": {{ "padding": 2, "cell_margin": 1, "min_cell_size": 4 }}
        }}"#,
        images.to_string_lossy()
    );
    let path = dir.path().join("config.json");
    std::fs::write(&path, json).unwrap();
    let config = Config::load(&path).unwrap();
    (dir, config)
}

fn note_events(list: &[[u8; 3]]) -> VecDeque<MidiEvent> {
    list.iter().filter_map(|b| MidiEvent::from_bytes(b, 0)).collect()
}

#[test]
fn test_session_renders_held_notes_only() {
    let (_dir, config) = setup();
    let library = ImageLibrary::load(&config.image_folder, &config.note_files());
    assert_eq!(library.len(), 2);
    assert_eq!(library.missing().len(), 1);

    let mut app = App::from_config(&config, library).with_frame_limit(4);
    let mut events = note_events(&[
        [0x90, 60, 100],
        [0x90, 64, 100],
        [0x90, 67, 100], // mapped but missing: never shows
        [0x80, 60, 0],
    ]);
    let mut display = Capture { frames: Vec::new() };

    app.run(&mut events, &mut display, 1000).unwrap();

    assert_eq!(display.frames.len(), 4);
    assert_eq!(app.notes().sorted_notes(), vec![64]);
    for frame in &display.frames {
        assert_eq!((frame.width(), frame.height()), (40, 30));
    }

    // Note 64 alone gets one 36x26 cell; its image covers the canvas centre.
    // With 60 still held, x = 20 would be the padding between two cells.
    let last = display.frames.last().unwrap();
    assert_eq!(last.pixel(20, 15), [255, 255, 255]);
    assert_eq!(last.pixel(8, 15), [255, 255, 255]);
    // Background: black plus the delay's silent output (128) at half opacity
    assert_eq!(last.pixel(0, 0), [64, 64, 64]);
    assert_eq!(last.pixel(4, 15), [64, 64, 64]);
}

#[test]
fn test_idle_session_is_uniform_wash() {
    let (_dir, config) = setup();
    let mut app = App::from_config(&config, ImageLibrary::new());

    // Black canvas with no notes: flat frame -> mid grey effect at half opacity
    let frame = app.tick();
    assert!(frame.samples().iter().all(|&s| s == 64));
}
