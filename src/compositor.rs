// Layer the canvases over the live frame.
// Blank (zero) canvas pixels are transparent; the preview always sits on top
// of committed ink, and committed ink always hides the camera image.
use crate::error::Error;
use crate::types::FrameBuffer;

fn check_size(expected: &FrameBuffer, actual: &FrameBuffer) -> Result<(), Error> {
    if expected.size() != actual.size() {
        return Err(Error::FrameSize { expected: expected.size(), actual: actual.size() });
    }
    Ok(())
}

/// Compose into `frame`, which holds the live image on entry.
pub fn composite_in_place(
    frame: &mut FrameBuffer,    // live camera (plus dashboard/cursor), overwritten
    persistent: &FrameBuffer,   // committed ink
    preview: &FrameBuffer,      // in-progress shape
) -> Result<(), Error> {
    check_size(frame, persistent)?;
    check_size(frame, preview)?;

    for ((out, &ink), &shape) in frame.pixels.iter_mut().zip(&persistent.pixels).zip(&preview.pixels) {
        if shape != 0 {
            *out = shape;
        } else if ink != 0 {
            *out = ink;
        }
    }
    Ok(())
}

/// Compose into a fresh frame, leaving `live` untouched.
pub fn composite(live: &FrameBuffer, persistent: &FrameBuffer, preview: &FrameBuffer) -> Result<FrameBuffer, Error> {
    let mut out = live.clone();
    composite_in_place(&mut out, persistent, preview)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn layers() -> (FrameBuffer, FrameBuffer, FrameBuffer) {
        let live = FrameBuffer::filled(4, 1, Color::GRAY);
        let mut persistent = FrameBuffer::blank(4, 1);
        let mut preview = FrameBuffer::blank(4, 1);
        persistent.pixels[1] = Color::RED.pack();
        persistent.pixels[2] = Color::RED.pack();
        preview.pixels[2] = Color::GREEN.pack();
        preview.pixels[3] = Color::GREEN.pack();
        (live, persistent, preview)
    }

    #[test]
    fn preview_over_ink_over_live() {
        let (live, persistent, preview) = layers();
        let out = composite(&live, &persistent, &preview).unwrap();
        assert_eq!(
            out.pixels,
            vec![Color::GRAY.pack(), Color::RED.pack(), Color::GREEN.pack(), Color::GREEN.pack()]
        );
        assert_eq!(live.pixels, vec![Color::GRAY.pack(); 4]);
    }

    #[test]
    fn composite_is_idempotent() {
        let (live, persistent, preview) = layers();
        let a = composite(&live, &persistent, &preview).unwrap();
        let b = composite(&live, &persistent, &preview).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_canvases_pass_live_through() {
        let live = FrameBuffer::filled(8, 8, Color::YELLOW);
        let blank = FrameBuffer::blank(8, 8);
        assert_eq!(composite(&live, &blank, &blank).unwrap(), live);
    }

    #[test]
    fn size_mismatch_is_rejected_untouched() {
        let mut frame = FrameBuffer::filled(4, 4, Color::WHITE);
        let small = FrameBuffer::filled(2, 2, Color::RED);
        let fits = FrameBuffer::blank(4, 4);
        let err = composite_in_place(&mut frame, &fits, &small).unwrap_err();
        assert!(matches!(err, Error::FrameSize { expected: (4, 4), actual: (2, 2) }));
        assert_eq!(frame, FrameBuffer::filled(4, 4, Color::WHITE));
    }
}
