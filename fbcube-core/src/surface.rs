/// Raw pixel surfaces and the drawing seam used by the renderer
use std::ops::{Deref, DerefMut};

use log::warn;
use nalgebra::Point2;
use thiserror::Error;

use crate::raster;

/// 24-bit RGB colour packed as `0x00RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x00_0000);
    pub const WHITE: Color = Color(0xFF_FFFF);
    pub const RED: Color = Color(0xFF_0000);
    pub const GREEN: Color = Color(0x00_FF00);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Keep the top 5/6/5 bits of each channel
    pub fn to_rgb565(self) -> u16 {
        (((self.0 & 0xF8_0000) >> 8) | ((self.0 & 0x00_FC00) >> 5) | ((self.0 & 0x00_00F8) >> 3))
            as u16
    }
}

/// Pixel layout of a surface, derived from its bits-per-pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb565,
    Xrgb8888,
    Unsupported(u32),
}

impl PixelFormat {
    pub fn from_bits_per_pixel(bits: u32) -> Self {
        match bits {
            16 => PixelFormat::Rgb565,
            32 => PixelFormat::Xrgb8888,
            other => PixelFormat::Unsupported(other),
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb565 => 16,
            PixelFormat::Xrgb8888 => 32,
            PixelFormat::Unsupported(bits) => bits,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        (self.bits_per_pixel() / 8) as usize
    }
}

/// Resolution and memory layout of a pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGeometry {
    pub width: u32,
    pub height: u32,
    /// Bytes per row
    pub stride: usize,
    pub bits_per_pixel: u32,
    pub x_offset: u32,
    pub y_offset: u32,
}

impl SurfaceGeometry {
    pub fn new(width: u32, height: u32, stride: usize, bits_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            stride,
            bits_per_pixel,
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// Rows laid out back to back with no padding
    pub fn packed(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        let stride = width as usize * (bits_per_pixel / 8) as usize;
        Self::new(width, height, stride, bits_per_pixel)
    }

    pub fn with_offset(mut self, x_offset: u32, y_offset: u32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::from_bits_per_pixel(self.bits_per_pixel)
    }

    /// Byte offset of a visible pixel, `None` outside the visible area
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let bytes_per_pixel = self.format().bytes_per_pixel();
        Some(
            (x as usize + self.x_offset as usize) * bytes_per_pixel
                + (y as usize + self.y_offset as usize) * self.stride,
        )
    }

    /// Smallest buffer that can hold every visible pixel
    pub fn required_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let bytes_per_pixel = self.format().bytes_per_pixel();
        (self.y_offset as usize + self.height as usize - 1) * self.stride
            + (self.x_offset as usize + self.width as usize) * bytes_per_pixel
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface has no addressable pixels ({width}x{height})")]
    ZeroSized { width: u32, height: u32 },
    #[error("pixel buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },
}

/// Anything the animation loop can draw a frame onto
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill every addressable pixel with black
    fn clear(&mut self);

    /// Write one pixel; coordinates outside the surface are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    fn draw_line(&mut self, from: Point2<i32>, to: Point2<i32>, color: Color) {
        raster::draw_line(self, from.x, from.y, to.x, to.y, color);
    }

    /// Called once the frame is complete
    fn present(&mut self) {}
}

/// Pixel memory plus the geometry needed to address it.
///
/// The buffer is anything that dereferences to bytes: a borrowed slice of a
/// mapped device, an owned `Vec<u8>` or the mapping itself. The surface never
/// decides when that memory is released.
pub struct PixelSurface<B> {
    buffer: B,
    geometry: SurfaceGeometry,
    format: PixelFormat,
    format_warned: bool,
}

impl<B> PixelSurface<B>
where
    B: Deref<Target = [u8]> + DerefMut,
{
    pub fn new(buffer: B, geometry: SurfaceGeometry) -> Result<Self, SurfaceError> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(SurfaceError::ZeroSized {
                width: geometry.width,
                height: geometry.height,
            });
        }

        let required = geometry.required_len();
        if buffer.len() < required {
            return Err(SurfaceError::BufferTooSmall {
                required,
                actual: buffer.len(),
            });
        }

        Ok(Self {
            buffer,
            geometry,
            format: geometry.format(),
            format_warned: false,
        })
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Read back the raw stored value of a pixel
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.geometry.offset(x, y)?;
        match self.format {
            PixelFormat::Xrgb8888 => {
                let bytes = self.buffer.get(offset..offset + 4)?;
                Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            PixelFormat::Rgb565 => {
                let bytes = self.buffer.get(offset..offset + 2)?;
                Some(u16::from_ne_bytes([bytes[0], bytes[1]]) as u32)
            }
            PixelFormat::Unsupported(_) => None,
        }
    }
}

impl<B> Canvas for PixelSurface<B>
where
    B: Deref<Target = [u8]> + DerefMut,
{
    fn width(&self) -> u32 {
        self.geometry.width
    }

    fn height(&self) -> u32 {
        self.geometry.height
    }

    fn clear(&mut self) {
        // Zero is black in every supported format
        self.buffer.fill(0);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(offset) = self.geometry.offset(x, y) else {
            return;
        };

        match self.format {
            PixelFormat::Xrgb8888 => {
                self.buffer[offset..offset + 4].copy_from_slice(&color.0.to_ne_bytes());
            }
            PixelFormat::Rgb565 => {
                self.buffer[offset..offset + 2].copy_from_slice(&color.to_rgb565().to_ne_bytes());
            }
            PixelFormat::Unsupported(bits) => {
                if !self.format_warned {
                    warn!("Unsupported bits per pixel: {}, pixel writes are ignored", bits);
                    self.format_warned = true;
                }
            }
        }
    }
}
