use std::sync::Arc;

use bytemuck::Pod;

use super::element::{read_value, write_value, Element, Value};
use super::{DType, Device, Shape, Stride};
use crate::error::{ConversionError, Result};

/// Reserve exactly `bytes` of capacity, reporting failure instead of aborting.
fn try_alloc(bytes: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| ConversionError::Allocation { bytes })?;
    Ok(data)
}

/// Empty `Vec<T>` with room for exactly `len` elements.
pub(crate) fn try_vec<T>(len: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| ConversionError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    Ok(out)
}

fn byte_len(numel: usize, dtype: DType) -> Result<usize> {
    numel
        .checked_mul(dtype.size())
        .ok_or(ConversionError::Allocation { bytes: usize::MAX })
}

/// Row-major strides and byte size for a new tensor of `shape`. Shapes whose
/// element count, strides or byte size overflow `usize` cannot be stored.
fn checked_layout(shape: &Shape, dtype: DType) -> Result<(Stride, usize)> {
    let too_large = ConversionError::Allocation { bytes: usize::MAX };
    let numel = shape.checked_numel().ok_or_else(|| too_large.clone())?;
    let stride = Stride::checked_contiguous(shape).ok_or(too_large)?;
    Ok((stride, byte_len(numel, dtype)?))
}

/// Storage offsets of a strided view, in row-major element order.
struct RowMajorOffsets<'a> {
    dims: &'a [usize],
    stride: &'a Stride,
    base: usize,
    index: Vec<usize>,
    remaining: usize,
}

impl<'a> RowMajorOffsets<'a> {
    fn new(tensor: &'a Tensor) -> Self {
        let dims = tensor.shape.dims();
        Self {
            dims,
            stride: &tensor.stride,
            base: tensor.offset,
            index: vec![0; dims.len()],
            remaining: tensor.numel(),
        }
    }
}

impl Iterator for RowMajorOffsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let offset = self.base + self.stride.offset(&self.index);
        for axis in (0..self.dims.len()).rev() {
            self.index[axis] += 1;
            if self.index[axis] < self.dims[axis] {
                break;
            }
            self.index[axis] = 0;
        }
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RowMajorOffsets<'_> {}

/// Storage backend for tensor data.
///
/// Accelerator memory is host-backed: the buffer lives in process memory and
/// is tagged with the device that owns it. Moving data between devices is
/// always a full copy into a new `Storage`.
#[derive(Debug)]
pub struct Storage {
    data: Vec<u8>,
    device: Device,
}

impl Storage {
    pub fn zeroed(size: usize, device: Device) -> Result<Self> {
        let mut data = try_alloc(size)?;
        data.resize(size, 0);
        Ok(Self { data, device })
    }

    fn from_bytes(data: Vec<u8>, device: Device) -> Self {
        Self { data, device }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Strided, typed view over shared storage.
#[derive(Clone)]
pub struct Tensor {
    storage: Arc<Storage>,
    shape: Shape,
    stride: Stride,
    dtype: DType,
    offset: usize,
}

impl Tensor {
    fn from_parts(data: Vec<u8>, shape: Shape, dtype: DType, device: Device) -> Self {
        let stride = Stride::contiguous(&shape);
        Self {
            storage: Arc::new(Storage::from_bytes(data, device)),
            shape,
            stride,
            dtype,
            offset: 0,
        }
    }

    pub fn zeros(shape: Shape, dtype: DType, device: Device) -> Result<Self> {
        let (stride, size) = checked_layout(&shape, dtype)?;
        let storage = Storage::zeroed(size, device)?;

        Ok(Self {
            storage: Arc::new(storage),
            shape,
            stride,
            dtype,
            offset: 0,
        })
    }

    /// Host tensor holding a copy of `data`, laid out row-major in `shape`.
    pub fn from_slice<T: Element>(data: &[T], shape: Shape) -> Result<Self> {
        Self::from_pod_slice(data, shape, T::DTYPE)
    }

    /// Copy `data` into a new host tensor. `dtype` must describe `T`.
    pub(crate) fn from_pod_slice<T: Pod>(data: &[T], shape: Shape, dtype: DType) -> Result<Self> {
        debug_assert_eq!(std::mem::size_of::<T>(), dtype.size());
        let (stride, _) = checked_layout(&shape, dtype)?;
        if data.len() != shape.numel() {
            return Err(ConversionError::shape_mismatch(
                format!("{} elements", shape.numel()),
                format!("{} elements", data.len()),
            ));
        }

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let mut buffer = try_alloc(bytes.len())?;
        buffer.extend_from_slice(bytes);
        Ok(Self {
            storage: Arc::new(Storage::from_bytes(buffer, Device::CPU)),
            shape,
            stride,
            dtype,
            offset: 0,
        })
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn device(&self) -> Device {
        self.storage.device()
    }

    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    #[inline]
    pub fn stride(&self) -> &Stride {
        &self.stride
    }

    /// Check if tensor is contiguous
    pub fn is_contiguous(&self) -> bool {
        self.stride == Stride::contiguous(&self.shape)
    }

    fn row_major_offsets(&self) -> RowMajorOffsets<'_> {
        RowMajorOffsets::new(self)
    }

    #[inline]
    fn element_bytes(&self, offset: usize) -> &[u8] {
        let size = self.dtype.size();
        let start = offset * size;
        &self.storage.as_bytes()[start..start + size]
    }

    #[inline]
    fn read_at(&self, offset: usize) -> Value {
        read_value(self.dtype, self.element_bytes(offset))
    }

    /// Bytes of the viewed elements in row-major order.
    fn contiguous_bytes(&self) -> Result<Vec<u8>> {
        let size = byte_len(self.numel(), self.dtype)?;
        let mut bytes = try_alloc(size)?;
        if self.is_contiguous() {
            let start = self.offset * self.dtype.size();
            bytes.extend_from_slice(&self.storage.as_bytes()[start..start + size]);
        } else {
            for offset in self.row_major_offsets() {
                bytes.extend_from_slice(self.element_bytes(offset));
            }
        }
        Ok(bytes)
    }

    /// Read a single element as `T`, casting from the stored dtype.
    pub fn get_as<T: Element>(&self, index: &[usize]) -> Result<T> {
        if index.len() != self.shape.rank() {
            return Err(ConversionError::shape_mismatch(
                format!("rank {}", index.len()),
                &self.shape,
            ));
        }
        if index.iter().zip(self.shape.dims()).any(|(i, d)| i >= d) {
            return Err(ConversionError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.to_string(),
            });
        }

        let offset = self.offset + self.stride.offset(index);
        Ok(T::from_value(self.read_at(offset)))
    }

    /// All elements in row-major order, each cast to `T`.
    ///
    /// Tensors on an accelerator are copied to the host first.
    pub fn to_vec_as<T: Element>(&self) -> Result<Vec<T>> {
        if self.device() != Device::CPU {
            return self.to_device(Device::CPU)?.to_vec_as();
        }

        if T::DTYPE == self.dtype {
            let bytes = self.contiguous_bytes()?;
            return Ok(bytemuck::pod_collect_to_vec(&bytes));
        }

        let mut out = try_vec(self.numel())?;
        out.extend(
            self.row_major_offsets()
                .map(|offset| T::from_value(self.read_at(offset))),
        );
        Ok(out)
    }

    /// Cast to `dtype`. The result is contiguous and lives on the same device.
    pub fn to_dtype(&self, dtype: DType) -> Result<Tensor> {
        if dtype == self.dtype {
            return Ok(self.clone());
        }

        let mut bytes = try_alloc(byte_len(self.numel(), dtype)?)?;
        for offset in self.row_major_offsets() {
            write_value(dtype, self.read_at(offset), &mut bytes);
        }

        log::trace!("cast {} -> {} for shape {}", self.dtype, dtype, self.shape);
        Ok(Self::from_parts(bytes, self.shape.clone(), dtype, self.device()))
    }

    /// Move to `device`. Same-device calls share storage; otherwise the
    /// viewed elements are copied synchronously into a contiguous buffer.
    pub fn to_device(&self, device: Device) -> Result<Tensor> {
        if device == self.device() {
            return Ok(self.clone());
        }

        let bytes = self.contiguous_bytes()?;
        log::trace!(
            "copy {} bytes {} -> {}",
            bytes.len(),
            self.device(),
            device
        );
        Ok(Self::from_parts(bytes, self.shape.clone(), self.dtype, device))
    }

    /// Row-major copy of this view, or a cheap clone when already contiguous.
    pub fn contiguous(&self) -> Result<Tensor> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }
        let bytes = self.contiguous_bytes()?;
        Ok(Self::from_parts(bytes, self.shape.clone(), self.dtype, self.device()))
    }

    /// Transposed view of a 2-D tensor. No data is copied.
    pub fn t(&self) -> Result<Tensor> {
        let (rows, cols) = self
            .shape
            .as_2d()
            .ok_or_else(|| ConversionError::shape_mismatch("(rows, cols)", &self.shape))?;
        let strides = self.stride.strides();

        Ok(Self {
            storage: Arc::clone(&self.storage),
            shape: Shape::new(vec![cols, rows]),
            stride: Stride::from_vec(vec![strides[1], strides[0]]),
            dtype: self.dtype,
            offset: self.offset,
        })
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype)
            .field("device", &self.device())
            .finish()
    }
}
