//! Software framebuffer: 32-bit 0RGB pixels, the format minifb presents

use crate::assets::bitmap::DecodedBitmap;

pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF000000; width * height],
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Solid rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            if x0 < x1 {
                self.pixels[row * self.width + x0..row * self.width + x1].fill(color);
            }
        }
    }

    /// Rectangle border drawn inward
    pub fn outline_rect(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
        let t = thickness.min(w / 2).min(h / 2).max(1);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y + t, t, h - 2 * t, color);
        self.fill_rect(x + w - t, y + t, t, h - 2 * t, color);
    }

    /// Alpha-blend an RGBA bitmap with its top-left at (x, y).
    /// `opacity` scales every source pixel's alpha.
    pub fn blit(&mut self, bmp: &DecodedBitmap, x: i32, y: i32, opacity: u8) {
        let sw = bmp.width as i32;
        let sh = bmp.height as i32;
        let opacity = opacity as u32;

        for sy in 0..sh {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..sw {
                let Some(dst_idx) = self.index(x + sx, dy) else {
                    continue;
                };
                let src_idx = (sy * sw + sx) as usize * 4;
                let Some(src) = bmp.pixels.get(src_idx..src_idx + 4) else {
                    continue;
                };

                let (r, g, b) = (src[0] as u32, src[1] as u32, src[2] as u32);
                let a = src[3] as u32 * opacity / 255;
                if a == 0 {
                    continue;
                }

                if a >= 255 {
                    self.pixels[dst_idx] = 0xFF000000 | (r << 16) | (g << 8) | b;
                } else {
                    let dst = self.pixels[dst_idx];
                    let dr = (dst >> 16) & 0xFF;
                    let dg = (dst >> 8) & 0xFF;
                    let db = dst & 0xFF;
                    let inv_a = 255 - a;
                    let out_r = (r * a + dr * inv_a) / 255;
                    let out_g = (g * a + dg * inv_a) / 255;
                    let out_b = (b * a + db * inv_a) / 255;
                    self.pixels[dst_idx] = 0xFF000000 | (out_r << 16) | (out_g << 8) | out_b;
                }
            }
        }
    }
}
