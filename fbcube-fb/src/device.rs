/// Linux framebuffer acquisition: sysfs geometry and a shared memory mapping
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fbcube_core::{PixelSurface, SurfaceGeometry};
use log::{debug, info};
use memmap2::{MmapMut, MmapOptions};

use crate::error::AcquireError;

const SYSFS_GRAPHICS: &str = "/sys/class/graphics";

/// What sysfs reports about a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FbInfo {
    /// Visible resolution, stride, depth and pan offset
    pub geometry: SurfaceGeometry,
    /// Rows in the whole virtual framebuffer
    pub virtual_height: u32,
}

impl FbInfo {
    /// Bytes covering every virtual row
    pub fn map_len(&self) -> usize {
        self.virtual_height as usize * self.geometry.stride
    }

    /// Read `virtual_size`, `bits_per_pixel`, `stride` and, when present,
    /// `pan`, `mode` and `modes` from a `/sys/class/graphics/fbN` directory.
    ///
    /// The visible size is the current `mode`, else the first entry of
    /// `modes`, else the virtual size. It never reaches past the virtual
    /// size once the pan offset is applied.
    pub fn read(sysfs_dir: &Path) -> Result<Self, String> {
        let (virtual_width, virtual_height) =
            parse_pair(&read_attr(sysfs_dir, "virtual_size")?, "virtual_size")?;
        let bits_per_pixel =
            parse_number::<u32>(&read_attr(sysfs_dir, "bits_per_pixel")?, "bits_per_pixel")?;
        let stride = parse_number::<usize>(&read_attr(sysfs_dir, "stride")?, "stride")?;

        let (x_offset, y_offset) = match read_attr(sysfs_dir, "pan") {
            Ok(pan) => parse_pair(&pan, "pan")?,
            Err(_) => (0, 0),
        };

        let panned_width = virtual_width.saturating_sub(x_offset);
        let panned_height = virtual_height.saturating_sub(y_offset);
        let (width, height) = ["mode", "modes"]
            .iter()
            .find_map(|name| read_attr(sysfs_dir, name).ok().and_then(|m| parse_mode(&m)))
            .map(|(w, h)| (w.min(panned_width), h.min(panned_height)))
            .unwrap_or((panned_width, panned_height));

        if stride == 0 || virtual_height == 0 {
            return Err(format!(
                "framebuffer reports an empty memory region (stride {}, {} rows)",
                stride, virtual_height
            ));
        }

        Ok(Self {
            geometry: SurfaceGeometry::new(width, height, stride, bits_per_pixel)
                .with_offset(x_offset, y_offset),
            virtual_height,
        })
    }
}

fn read_attr(dir: &Path, name: &str) -> Result<String, String> {
    fs::read_to_string(dir.join(name))
        .map(|value| value.trim().to_owned())
        .map_err(|e| format!("reading {}: {}", name, e))
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {}: {:?}", name, value))
}

/// `"1920,1080"`
fn parse_pair(value: &str, name: &str) -> Result<(u32, u32), String> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| format!("invalid {}: {:?}", name, value))?;
    Ok((parse_number(a, name)?, parse_number(b, name)?))
}

/// `"U:1920x1080p-0"`, only the first line is considered
fn parse_mode(modes: &str) -> Option<(u32, u32)> {
    let line = modes.lines().next()?;
    let mode = line.split_once(':').map_or(line, |(_, mode)| mode);
    let (width, rest) = mode.split_once('x')?;
    let height: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((width.parse().ok()?, height.parse().ok()?))
}

/// An open, mapped framebuffer device.
///
/// The mapping and the file handle are released when this is dropped, on
/// every path out of the caller.
pub struct Framebuffer {
    info: FbInfo,
    map: MmapMut,
    _file: File,
}

impl Framebuffer {
    /// Open a device such as `/dev/fb0`, reading its geometry from sysfs
    pub fn open(device: &Path) -> Result<Self, AcquireError> {
        let name = device.file_name().ok_or_else(|| AcquireError::Geometry {
            device: device.to_path_buf(),
            reason: "device path has no file name".to_owned(),
        })?;
        let sysfs_dir = Path::new(SYSFS_GRAPHICS).join(name);
        Self::open_with_sysfs(device, &sysfs_dir)
    }

    /// Open `device`, describing it with the attributes in `sysfs_dir`
    pub fn open_with_sysfs(device: &Path, sysfs_dir: &Path) -> Result<Self, AcquireError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(device)
            .map_err(|source| AcquireError::Open {
                device: device.to_path_buf(),
                source,
            })?;

        let info = FbInfo::read(sysfs_dir).map_err(|reason| AcquireError::Geometry {
            device: device.to_path_buf(),
            reason,
        })?;
        debug!("Framebuffer info from {:?}: {:?}", sysfs_dir, info);

        // SAFETY: the mapping is only reached through `surface`, which
        // borrows `self` mutably, and it lives no longer than `file`.
        let map = unsafe { MmapOptions::new().len(info.map_len()).map_mut(&file) }.map_err(
            |source| AcquireError::Map {
                device: device.to_path_buf(),
                source,
            },
        )?;

        let geometry = info.geometry;
        info!(
            "Opened {:?}: {}x{}, {} bpp, stride {} bytes",
            device, geometry.width, geometry.height, geometry.bits_per_pixel, geometry.stride
        );

        Ok(Self {
            info,
            map,
            _file: file,
        })
    }

    pub fn info(&self) -> &FbInfo {
        &self.info
    }

    /// Borrow the mapped memory as a drawable surface
    pub fn surface(&mut self) -> Result<PixelSurface<&mut [u8]>, AcquireError> {
        Ok(PixelSurface::new(&mut self.map[..], self.info.geometry)?)
    }
}
