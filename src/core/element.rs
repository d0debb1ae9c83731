use std::fmt::Debug;

use bytemuck::Pod;
use half::f16;

use super::DType;

/// Widest lossless form of a single tensor element.
///
/// Integers (`u8`, `i32`, `i64`) fit `i64` exactly and floats (`f16`, `f32`,
/// `f64`) fit `f64` exactly, so routing every cast through this type is the
/// same as a direct `as` cast between the two native types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
}

/// Native scalar type with a fixed [`DType`].
///
/// This is the typed accessor seam of [`Tensor`](super::Tensor): any element
/// can be read back as any `Element`, with `as` cast semantics. Float to
/// integer truncates toward zero and saturates (NaN becomes 0), integer to
/// integer wraps, and anything to float rounds to nearest.
pub trait Element: Pod + Debug + PartialEq + Send + Sync + 'static {
    const DTYPE: DType;

    fn to_value(self) -> Value;

    fn from_value(value: Value) -> Self;

    #[inline]
    fn cast_from<S: Element>(src: S) -> Self {
        Self::from_value(src.to_value())
    }
}

macro_rules! impl_float_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_value(self) -> Value {
                Value::Float(self as f64)
            }

            #[inline]
            fn from_value(value: Value) -> Self {
                match value {
                    Value::Float(v) => v as $ty,
                    Value::Int(v) => v as $ty,
                }
            }
        }
    };
}

macro_rules! impl_int_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn to_value(self) -> Value {
                Value::Int(self as i64)
            }

            #[inline]
            fn from_value(value: Value) -> Self {
                match value {
                    Value::Float(v) => v as $ty,
                    Value::Int(v) => v as $ty,
                }
            }
        }
    };
}

impl_float_element!(f32, DType::F32);
impl_float_element!(f64, DType::F64);
impl_int_element!(i32, DType::I32);
impl_int_element!(i64, DType::I64);
impl_int_element!(u8, DType::U8);

impl Element for f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_value(self) -> Value {
        Value::Float(self.to_f64())
    }

    #[inline]
    fn from_value(value: Value) -> Self {
        match value {
            Value::Float(v) => f16::from_f64(v),
            Value::Int(v) => f16::from_f64(v as f64),
        }
    }
}

/// Decode one element stored as `dtype` from exactly `dtype.size()` bytes.
#[inline]
pub(crate) fn read_value(dtype: DType, bytes: &[u8]) -> Value {
    match dtype {
        DType::F32 => bytemuck::pod_read_unaligned::<f32>(bytes).to_value(),
        DType::F64 => bytemuck::pod_read_unaligned::<f64>(bytes).to_value(),
        DType::I32 => bytemuck::pod_read_unaligned::<i32>(bytes).to_value(),
        DType::I64 => bytemuck::pod_read_unaligned::<i64>(bytes).to_value(),
        DType::U8 => bytes[0].to_value(),
        DType::F16 => bytemuck::pod_read_unaligned::<f16>(bytes).to_value(),
    }
}

/// Encode `value` as `dtype` and append its bytes to `out`.
#[inline]
pub(crate) fn write_value(dtype: DType, value: Value, out: &mut Vec<u8>) {
    match dtype {
        DType::F32 => out.extend_from_slice(bytemuck::bytes_of(&f32::from_value(value))),
        DType::F64 => out.extend_from_slice(bytemuck::bytes_of(&f64::from_value(value))),
        DType::I32 => out.extend_from_slice(bytemuck::bytes_of(&i32::from_value(value))),
        DType::I64 => out.extend_from_slice(bytemuck::bytes_of(&i64::from_value(value))),
        DType::U8 => out.push(u8::from_value(value)),
        DType::F16 => out.extend_from_slice(bytemuck::bytes_of(&f16::from_value(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_to_int_truncates() {
        assert_eq!(i32::cast_from(1.9f64), 1);
        assert_eq!(i32::cast_from(-1.9f64), -1);
        assert_eq!(i32::cast_from(f64::NAN), 0);
        assert_eq!(i32::cast_from(1e12f64), i32::MAX);
    }

    #[test]
    fn test_int_to_int_wraps() {
        assert_eq!(u8::cast_from(257i32), 1);
        assert_eq!(i64::cast_from(-5i32), -5);
    }

    #[test]
    fn test_half_roundtrip() {
        let h = f16::cast_from(0.5f64);
        assert_eq!(f32::cast_from(h), 0.5);
        assert_eq!(<f16 as Element>::DTYPE, DType::F16);
    }

    #[test]
    fn test_read_write_bytes() {
        let mut buf = Vec::new();
        write_value(DType::I64, Value::Float(-3.7), &mut buf);
        assert_eq!(buf.len(), 8);
        assert_eq!(read_value(DType::I64, &buf), Value::Int(-3));

        // unaligned read
        let mut shifted = vec![0u8];
        write_value(DType::F64, Value::Float(2.25), &mut shifted);
        assert_eq!(read_value(DType::F64, &shifted[1..]), Value::Float(2.25));
    }
}
