/// Cross-frame behaviour of the signal effect chain
use noteframe::effect_chain::{normalize, SignalEffectChain};
use noteframe::effect_unit::ProcessContext;
use noteframe::frame::FrameBuffer;
use noteframe::units::delay::DelayUnit;

fn gradient(width: usize, height: usize) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height, [0, 0, 0]);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y * width) * 255 / (width * height - 1)) as u8;
            frame.set_pixel(x, y, [v, 255 - v, v / 2]);
        }
    }
    frame
}

/// Delay much shorter than one frame so echoes land inside the next frame
fn short_delay_chain() -> SignalEffectChain {
    SignalEffectChain::new(vec![Box::new(DelayUnit::with_samples(100, 0.8, 1.0))])
}

#[test]
fn test_same_frame_twice_differs_because_state_persists() {
    let mut chain = short_delay_chain();
    let frame = gradient(16, 16);

    let first = chain.process(&frame, &ProcessContext::new(0, 0));
    let second = chain.process(&frame, &ProcessContext::new(1, 0));

    assert_ne!(first, second, "Delay history should carry into the second frame");
    // The opening samples of the first frame were read from an empty line
    assert!(first.samples()[..100].iter().all(|&s| s == 128));
    assert!(second.samples()[..100].iter().any(|&s| s != 128));
}

#[test]
fn test_independent_chains_evolve_identically() {
    let frames = [gradient(16, 16), FrameBuffer::new(16, 16, [9, 9, 9]), gradient(16, 16)];

    let mut a = short_delay_chain();
    let mut b = short_delay_chain();

    for (i, frame) in frames.iter().enumerate() {
        let ctx = ProcessContext::new(i as u64, frames.len() as u64);
        assert_eq!(a.process(frame, &ctx), b.process(frame, &ctx), "frame {}", i);
    }
}

#[test]
fn test_flat_frame_after_content_still_echoes() {
    let mut chain = short_delay_chain();
    chain.process(&gradient(16, 16), &ProcessContext::default());

    let flat = FrameBuffer::new(16, 16, [50, 50, 50]);
    assert!(normalize(flat.samples()).iter().all(|&s| s == 0.0));

    let out = chain.process(&flat, &ProcessContext::default());
    assert!(out.samples().iter().any(|&s| s != 128));
}

#[test]
fn test_flat_frames_keep_delay_clock_running() {
    // Chain A sees a flat frame before the content; chain B does not.
    // If flat frames did not advance the line, both would produce the same output.
    let content = gradient(10, 10);
    let flat = FrameBuffer::new(10, 1, [0, 0, 0]); // 30 samples

    let mut a = SignalEffectChain::new(vec![Box::new(DelayUnit::with_samples(70, 0.5, 1.0))]);
    let mut b = SignalEffectChain::new(vec![Box::new(DelayUnit::with_samples(70, 0.5, 1.0))]);

    a.process(&content, &ProcessContext::default());
    a.process(&flat, &ProcessContext::default());
    let out_a = a.process(&content, &ProcessContext::default());

    b.process(&content, &ProcessContext::default());
    let out_b = b.process(&content, &ProcessContext::default());

    assert_ne!(out_a, out_b);
}

#[test]
fn test_identity_chain_round_trips_full_range_frame() {
    let mut chain = SignalEffectChain::identity();
    let frame = gradient(32, 8);
    assert_eq!(frame.samples().iter().min(), Some(&0));
    assert_eq!(frame.samples().iter().max(), Some(&255));

    let out = chain.process(&frame, &ProcessContext::default());
    assert_eq!(out, frame);
}

#[test]
fn test_default_chain_first_second_is_silent() {
    // One second of delay is 44100 samples; a 64x64 frame is 12288 samples,
    // so the first three frames read only the empty line.
    let mut chain = SignalEffectChain::default_chain();
    let frame = gradient(64, 64);
    for i in 0..3 {
        let out = chain.process(&frame, &ProcessContext::new(i, 0));
        assert!(out.samples().iter().all(|&s| s == 128), "frame {}", i);
    }
    let out = chain.process(&frame, &ProcessContext::new(3, 0));
    assert!(out.samples().iter().any(|&s| s != 128));
}
