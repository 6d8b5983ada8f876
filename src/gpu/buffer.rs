//! Typed GPU buffers for data whose size is fixed at creation.
//!
//! Hero geometry is built once, so vertex, index and instance buffers never
//! grow; only uniforms are rewritten, in place, every frame.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// An immutable buffer initialized from a slice, tracking its item count.
pub struct StaticBuffer<T> {
    buffer: wgpu::Buffer,
    count: u32,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> StaticBuffer<T> {
    /// Upload `data`. Empty slices still allocate one zeroed item, since
    /// wgpu rejects zero-sized vertex buffers on some backends.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let zeroed = [T::zeroed()];
        let contents = if data.is_empty() { &zeroed[..] } else { data };
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage,
            });
        Self {
            buffer,
            count: data.len() as u32,
            _marker: PhantomData,
        }
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Give up the typed wrapper, keeping the buffer.
    #[must_use]
    pub fn into_buffer(self) -> wgpu::Buffer {
        self.buffer
    }

    /// Number of items uploaded (zero for an empty slice).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether no items were uploaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A uniform buffer holding exactly one `T`, rewritten in place.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Create the buffer with an initial value.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, value: &T) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(value),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    /// Queue an overwrite of the whole value.
    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
