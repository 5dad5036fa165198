use glam::{Mat4, Vec3, Vec4};

/// Host-shareable uniform member types the program understands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformKind {
    Mat4,
    Vec4,
    Vec3,
    /// 32-bit integer used as a boolean; WGSL has no host-shareable `bool`.
    Flag,
}

impl UniformKind {
    pub const fn size(self) -> usize {
        match self {
            UniformKind::Mat4 => 64,
            UniformKind::Vec4 => 16,
            UniformKind::Vec3 => 12,
            UniformKind::Flag => 4,
        }
    }

    pub const fn wgsl_name(self) -> &'static str {
        match self {
            UniformKind::Mat4 => "mat4x4<f32>",
            UniformKind::Vec4 => "vec4<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Flag => "u32",
        }
    }
}

/// Byte offset of a named member inside the uniform block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub offset: u32,
    pub kind: UniformKind,
}

/// CPU staging copy of the uniform block.
///
/// Setters write at the cached location; the program copies the whole block
/// into a fresh GPU slot for every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    bytes: Vec<u8>,
}

impl UniformBlock {
    pub fn new(size: usize) -> Self {
        Self { bytes: vec![0; size] }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn set_mat4(&mut self, loc: UniformLocation, value: &Mat4) {
        debug_assert_eq!(loc.kind, UniformKind::Mat4);
        self.write(loc, bytemuck::bytes_of(value));
    }

    pub fn set_vec4(&mut self, loc: UniformLocation, value: Vec4) {
        debug_assert_eq!(loc.kind, UniformKind::Vec4);
        self.write(loc, bytemuck::bytes_of(&value));
    }

    pub fn set_vec3(&mut self, loc: UniformLocation, value: Vec3) {
        debug_assert_eq!(loc.kind, UniformKind::Vec3);
        self.write(loc, bytemuck::bytes_of(&value));
    }

    pub fn set_flag(&mut self, loc: UniformLocation, value: bool) {
        debug_assert_eq!(loc.kind, UniformKind::Flag);
        self.write(loc, bytemuck::bytes_of(&u32::from(value)));
    }

    fn write(&mut self, loc: UniformLocation, data: &[u8]) {
        let start = loc.offset as usize;
        let end = start + data.len();
        debug_assert!(end <= self.bytes.len(), "uniform write past block end");
        if let Some(dst) = self.bytes.get_mut(start..end) {
            dst.copy_from_slice(data);
        }
    }
}

/// Rounds `size` up to the next multiple of `alignment` (a power of two).
pub(crate) fn align_to(size: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (size + alignment - 1) & !(alignment - 1)
}

/// Per-frame cursor over the slots of a dynamic-offset uniform buffer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SlotCursor {
    stride: u64,
    capacity: u64,
    next: u64,
}

impl SlotCursor {
    pub const MIN_SLOTS: u64 = 8;

    pub fn new(stride: u64) -> Self {
        Self {
            stride,
            capacity: Self::MIN_SLOTS,
            next: 0,
        }
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Size in bytes of a buffer holding every slot.
    #[inline]
    pub fn buffer_size(&self) -> u64 {
        self.stride * self.capacity
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Claims the next slot and returns its byte offset.
    ///
    /// The second value is `Some(new_capacity)` when the buffer must be
    /// reallocated before the slot is written.
    pub fn claim(&mut self) -> (u64, Option<u64>) {
        let grown = if self.next >= self.capacity {
            self.capacity = (self.next + 1).next_power_of_two().max(Self::MIN_SLOTS);
            Some(self.capacity)
        } else {
            None
        };

        let offset = self.next * self.stride;
        self.next += 1;
        (offset, grown)
    }
}
