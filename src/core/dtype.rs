use std::any::TypeId;
use std::mem;
use std::str::FromStr;

use half::f16;

use crate::error::{ConversionError, Result};

/// Data type enum for tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
    U8,
    F16,
}

impl DType {
    /// Size in bytes
    #[inline]
    pub const fn size(&self) -> usize {
        match self {
            DType::F32 => mem::size_of::<f32>(),
            DType::F64 => mem::size_of::<f64>(),
            DType::I32 => mem::size_of::<i32>(),
            DType::I64 => mem::size_of::<i64>(),
            DType::U8 => mem::size_of::<u8>(),
            DType::F16 => mem::size_of::<f16>(),
        }
    }

    #[inline]
    pub const fn is_floating_point(&self) -> bool {
        matches!(self, DType::F32 | DType::F64 | DType::F16)
    }

    #[inline]
    pub const fn is_integer(&self) -> bool {
        matches!(self, DType::I32 | DType::I64 | DType::U8)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::F16 => "f16",
        }
    }

    /// Run-time lookup of the dtype for a native scalar type.
    ///
    /// Generic code that only knows `T: 'static` (for instance a matrix
    /// scalar) goes through this; types without a dtype are rejected with
    /// [`ConversionError::UnsupportedType`].
    pub fn from_type<T: 'static>() -> Result<Self> {
        let id = TypeId::of::<T>();
        let dtype = if id == TypeId::of::<f32>() {
            DType::F32
        } else if id == TypeId::of::<f64>() {
            DType::F64
        } else if id == TypeId::of::<i32>() {
            DType::I32
        } else if id == TypeId::of::<i64>() {
            DType::I64
        } else if id == TypeId::of::<u8>() {
            DType::U8
        } else if id == TypeId::of::<f16>() {
            DType::F16
        } else {
            return Err(ConversionError::UnsupportedType(
                std::any::type_name::<T>().to_string(),
            ));
        };
        Ok(dtype)
    }
}

impl FromStr for DType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "f32" | "float32" => Ok(DType::F32),
            "f64" | "float64" => Ok(DType::F64),
            "i32" | "int32" => Ok(DType::I32),
            "i64" | "int64" => Ok(DType::I64),
            "u8" | "uint8" => Ok(DType::U8),
            "f16" | "float16" => Ok(DType::F16),
            other => Err(ConversionError::UnsupportedType(other.to_string())),
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type() {
        assert_eq!(DType::from_type::<f64>().unwrap(), DType::F64);
        assert_eq!(DType::from_type::<i32>().unwrap(), DType::I32);
        assert_eq!(DType::from_type::<f16>().unwrap(), DType::F16);
        assert!(matches!(
            DType::from_type::<u16>(),
            Err(ConversionError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("float32".parse::<DType>().unwrap(), DType::F32);
        assert_eq!("i64".parse::<DType>().unwrap(), DType::I64);
        assert!("complex64".parse::<DType>().is_err());
    }

    #[test]
    fn test_sizes() {
        assert_eq!(DType::F16.size(), 2);
        assert_eq!(DType::F64.size(), 8);
        assert!(DType::U8.is_integer());
        assert!(DType::F16.is_floating_point());
    }
}
