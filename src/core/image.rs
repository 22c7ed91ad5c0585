//! Capture image - the luminance plane sampled by capture spawns
//!
//! The host refreshes this on its own cadence (not necessarily every
//! step) from a live camera frame. Frames arrive as RGBA8 and are stored
//! as the red channel only, mirrored horizontally so a front-facing
//! camera reads like a mirror.

/// A width x height luminance plane addressable by normalized coordinate.
pub struct CaptureImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CaptureImage {
    /// An empty (all-black) plane. Dimensions must be non-zero - the
    /// capture-spawn path divides by them.
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!(
                "capture image dimensions must be non-zero, got {}x{}",
                width, height
            ));
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ingest an RGBA8 frame, replacing the plane (and its dimensions).
    /// Mirrors in x at ingest so samplers never need to flip.
    pub fn update_rgba(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), String> {
        if width == 0 || height == 0 {
            return Err(format!(
                "capture frame dimensions must be non-zero, got {}x{}",
                width, height
            ));
        }
        let expected = (width * height * 4) as usize;
        if rgba.len() != expected {
            return Err(format!(
                "capture frame byte length {} does not match {}x{} RGBA ({} expected)",
                rgba.len(),
                width,
                height,
                expected
            ));
        }

        let size = (width * height) as usize;
        if self.data.len() != size {
            self.data.resize(size, 0.0);
        }
        self.width = width;
        self.height = height;

        for y in 0..height {
            let row = (y * width) as usize;
            for x in 0..width {
                let mirrored = row + (width - 1 - x) as usize;
                let r = rgba[(row + x as usize) * 4];
                self.data[mirrored] = r as f32 / 255.0;
            }
        }
        Ok(())
    }

    /// Nearest sample at a normalized coordinate, wrapping on both axes
    /// (the capture path tiles the frame when the uv rescale overshoots).
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let fu = fract(u);
        let fv = fract(v);
        let x = ((fu * self.width as f32) as u32).min(self.width - 1);
        let y = ((fv * self.height as f32) as u32).min(self.height - 1);
        *fast!(self.data, [(y * self.width + x) as usize])
    }
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}
