// Copyright @yucwang 2026

use crate::core::volume::Volume;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::transform::Transform;
use crate::volumes::{wrap_coord3, wrap_index3, VolumeFilterMode, VolumeWrapMode};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum VolumeLoadError {
    Io(std::io::Error),
    Format(String),
}

impl fmt::Display for VolumeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeLoadError::Io(err) => write!(f, "io error: {}", err),
            VolumeLoadError::Format(msg) => write!(f, "vol format error: {}", msg),
        }
    }
}

impl std::error::Error for VolumeLoadError {}

impl From<std::io::Error> for VolumeLoadError {
    fn from(err: std::io::Error) -> Self {
        VolumeLoadError::Io(err)
    }
}

fn format_err<S: Into<String>>(msg: S) -> VolumeLoadError {
    VolumeLoadError::Format(msg.into())
}

/// Voxel grid with values stored at the grid vertices, x fastest. The grid
/// spans `bbox` in local space and is placed in the world by `to_world`.
pub struct GridVolume {
    data: Vec<Float>,
    xres: usize,
    yres: usize,
    zres: usize,
    channels: usize,
    bbox: AABB,
    max_value: Float,
    use_grid_bbox: bool,
    to_world: Transform,
    filter_mode: VolumeFilterMode,
    wrap_mode: VolumeWrapMode,
}

impl GridVolume {
    /// Reads a Mitsuba `.vol` file (version 3, float32 encoding).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VolumeLoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let volume = Self::from_bytes(&bytes)?;
        log::info!("Loaded grid volume {} ({}x{}x{}, {} channels, max {})",
                   path.display(), volume.xres, volume.yres, volume.zres,
                   volume.channels, volume.max_value);
        Ok(volume)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VolumeLoadError> {
        if bytes.len() < 4 {
            return Err(format_err("vol file too small"));
        }
        if &bytes[0..3] != b"VOL" {
            return Err(format_err("invalid vol header"));
        }
        let version = bytes[3];
        if version != 3 {
            return Err(format_err(format!("unsupported vol version: {}", version)));
        }

        let mut cursor = 4usize;
        let encoding = read_i32(bytes, &mut cursor)?;
        let xres = read_i32(bytes, &mut cursor)?;
        let yres = read_i32(bytes, &mut cursor)?;
        let zres = read_i32(bytes, &mut cursor)?;
        let channels = read_i32(bytes, &mut cursor)?;

        if encoding != 1 {
            return Err(format_err(format!("unsupported vol encoding: {}", encoding)));
        }
        if xres <= 0 || yres <= 0 || zres <= 0 || channels <= 0 {
            return Err(format_err("vol dimensions must be positive"));
        }

        let mut corners = [0.0 as Float; 6];
        for value in corners.iter_mut() {
            *value = read_f32(bytes, &mut cursor)?;
        }
        let bbox = AABB::new(
            Vector3f::new(corners[0], corners[1], corners[2]),
            Vector3f::new(corners[3], corners[4], corners[5]),
        );

        let res = (xres as usize, yres as usize, zres as usize);
        let expected = voxel_count(res, channels as usize)?;
        let mut data = Vec::with_capacity(expected);
        for _ in 0..expected {
            data.push(read_f32(bytes, &mut cursor)?);
        }
        if cursor != bytes.len() {
            log::warn!("vol file has {} trailing bytes", bytes.len() - cursor);
        }

        Self::from_data(data, res, channels as usize, bbox)
    }

    /// Builds a grid from raw values laid out as `((z * yres + y) * xres + x) * channels + c`.
    pub fn from_data(data: Vec<Float>,
                     res: (usize, usize, usize),
                     channels: usize,
                     bbox: AABB) -> Result<Self, VolumeLoadError> {
        if channels != 1 && channels != 3 && channels != 6 {
            return Err(format_err(format!("unsupported vol channels: {}", channels)));
        }
        if res.0 == 0 || res.1 == 0 || res.2 == 0 {
            return Err(format_err("vol dimensions must be positive"));
        }
        let expected = voxel_count(res, channels)?;
        if data.len() != expected {
            return Err(format_err(format!("expected {} values, got {}", expected, data.len())));
        }
        if !bbox.is_valid() {
            return Err(format_err("invalid vol bounding box"));
        }

        // Only the first three channels are ever sampled.
        let used = channels.min(3);
        let max_value = data
            .chunks(channels)
            .flat_map(|voxel| voxel[..used].iter().copied())
            .fold(0.0 as Float, Float::max);

        Ok(Self {
            data,
            xres: res.0,
            yres: res.1,
            zres: res.2,
            channels,
            bbox,
            max_value,
            use_grid_bbox: true,
            to_world: Transform::default(),
            filter_mode: VolumeFilterMode::Trilinear,
            wrap_mode: VolumeWrapMode::Clamp,
        })
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.to_world = transform;
    }

    pub fn set_filter_mode(&mut self, filter_mode: VolumeFilterMode) {
        self.filter_mode = filter_mode;
    }

    pub fn set_wrap_mode(&mut self, wrap_mode: VolumeWrapMode) {
        self.wrap_mode = wrap_mode;
    }

    /// When false, the grid covers the unit cube in local space instead of
    /// the bounds stored in the file.
    pub fn set_use_grid_bbox(&mut self, use_grid_bbox: bool) {
        self.use_grid_bbox = use_grid_bbox;
    }

    pub fn resolution(&self) -> (usize, usize, usize) {
        (self.xres, self.yres, self.zres)
    }

    fn fetch(&self, x: usize, y: usize, z: usize, channel: usize) -> Float {
        let idx = ((z * self.yres + y) * self.xres + x) * self.channels + channel;
        self.data[idx]
    }

    fn grid_coords(&self, p: Vector3f) -> (Float, Float, Float) {
        (p.x * (self.xres as Float - 1.0),
         p.y * (self.yres as Float - 1.0),
         p.z * (self.zres as Float - 1.0))
    }

    fn sample_nearest(&self, p: Vector3f) -> Vector3f {
        let (x, y, z) = self.grid_coords(p);
        let idx = ((x + 0.5).floor() as isize, (y + 0.5).floor() as isize, (z + 0.5).floor() as isize);
        let (xi, yi, zi) = wrap_index3(idx, self.resolution(), self.wrap_mode);
        self.sample_channels(xi, yi, zi)
    }

    fn sample_trilinear(&self, p: Vector3f) -> Vector3f {
        let (x, y, z) = self.grid_coords(p);
        let x0 = x.floor() as isize;
        let y0 = y.floor() as isize;
        let z0 = z.floor() as isize;
        let tx = x - x0 as Float;
        let ty = y - y0 as Float;
        let tz = z - z0 as Float;

        let (x0u, y0u, z0u) = wrap_index3((x0, y0, z0), self.resolution(), self.wrap_mode);
        let (x1u, y1u, z1u) = wrap_index3((x0 + 1, y0 + 1, z0 + 1), self.resolution(), self.wrap_mode);

        let c000 = self.sample_channels(x0u, y0u, z0u);
        let c100 = self.sample_channels(x1u, y0u, z0u);
        let c010 = self.sample_channels(x0u, y1u, z0u);
        let c110 = self.sample_channels(x1u, y1u, z0u);
        let c001 = self.sample_channels(x0u, y0u, z1u);
        let c101 = self.sample_channels(x1u, y0u, z1u);
        let c011 = self.sample_channels(x0u, y1u, z1u);
        let c111 = self.sample_channels(x1u, y1u, z1u);

        let c00 = c000 * (1.0 - tx) + c100 * tx;
        let c10 = c010 * (1.0 - tx) + c110 * tx;
        let c01 = c001 * (1.0 - tx) + c101 * tx;
        let c11 = c011 * (1.0 - tx) + c111 * tx;

        let c0 = c00 * (1.0 - ty) + c10 * ty;
        let c1 = c01 * (1.0 - ty) + c11 * ty;

        c0 * (1.0 - tz) + c1 * tz
    }

    fn sample_channels(&self, x: usize, y: usize, z: usize) -> Vector3f {
        if self.channels == 1 {
            let v = self.fetch(x, y, z, 0);
            Vector3f::new(v, v, v)
        } else {
            Vector3f::new(self.fetch(x, y, z, 0), self.fetch(x, y, z, 1), self.fetch(x, y, z, 2))
        }
    }

    fn local_bbox(&self) -> AABB {
        if self.use_grid_bbox {
            self.bbox
        } else {
            AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0))
        }
    }
}

impl Volume for GridVolume {
    fn bbox(&self) -> Option<AABB> {
        let local = self.local_bbox();
        let (min, max) = (local.p_min, local.p_max);
        let mut out = AABB::default();
        for corner in 0..8 {
            let p = Vector3f::new(
                if corner & 1 == 0 { min.x } else { max.x },
                if corner & 2 == 0 { min.y } else { max.y },
                if corner & 4 == 0 { min.z } else { max.z },
            );
            out.expand_by_point(&self.to_world.apply_point(p));
        }
        Some(out)
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn eval(&self, p_world: Vector3f) -> Vector3f {
        let local = self.local_bbox();
        let diag = local.diagnal();
        if diag.x.abs() < 1e-8 || diag.y.abs() < 1e-8 || diag.z.abs() < 1e-8 {
            return Vector3f::zeros();
        }

        let p = self.to_world.inv_apply_point(p_world) - local.p_min;
        let p = wrap_coord3(Vector3f::new(p.x / diag.x, p.y / diag.y, p.z / diag.z), self.wrap_mode);

        match self.filter_mode {
            VolumeFilterMode::Nearest => self.sample_nearest(p),
            VolumeFilterMode::Trilinear => self.sample_trilinear(p),
        }
    }

    fn max(&self) -> Float {
        self.max_value
    }
}

fn voxel_count(res: (usize, usize, usize), channels: usize) -> Result<usize, VolumeLoadError> {
    res.0
        .checked_mul(res.1)
        .and_then(|v| v.checked_mul(res.2))
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| format_err("vol dimensions overflow"))
}

fn read_bytes(bytes: &[u8], cursor: &mut usize) -> Result<[u8; 4], VolumeLoadError> {
    let end = *cursor + 4;
    if end > bytes.len() {
        return Err(format_err("unexpected eof"));
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[*cursor..end]);
    *cursor = end;
    Ok(buf)
}

fn read_i32(bytes: &[u8], cursor: &mut usize) -> Result<i32, VolumeLoadError> {
    Ok(i32::from_le_bytes(read_bytes(bytes, cursor)?))
}

fn read_f32(bytes: &[u8], cursor: &mut usize) -> Result<Float, VolumeLoadError> {
    Ok(Float::from_le_bytes(read_bytes(bytes, cursor)?))
}
