use std::fmt;
use std::str::FromStr;

use crate::error::ConversionError;

/// Device location for tensor data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    #[default]
    CPU,
    CUDA(usize), // device id
    Metal(usize), // device id
}

impl Device {
    pub fn is_gpu(&self) -> bool {
        !matches!(self, Device::CPU)
    }

    pub fn id(&self) -> usize {
        match self {
            Device::CPU => 0,
            Device::CUDA(id) => *id,
            Device::Metal(id) => *id,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Device::CPU => "CPU",
            Device::CUDA(_) => "CUDA",
            Device::Metal(_) => "METAL",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Parses `"CPU:0"`, `"CUDA:1"`, `"METAL:0"`. The id may be omitted and
/// defaults to 0; the kind is case insensitive.
impl FromStr for Device {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConversionError::InvalidDevice(s.to_string());

        let (kind, id) = match s.split_once(':') {
            Some((kind, id)) => (kind, id.trim().parse::<usize>().map_err(|_| invalid())?),
            None => (s, 0),
        };

        match kind.trim().to_ascii_uppercase().as_str() {
            "CPU" if id == 0 => Ok(Device::CPU),
            "CUDA" => Ok(Device::CUDA(id)),
            "METAL" => Ok(Device::Metal(id)),
            _ => Err(invalid()),
        }
    }
}
