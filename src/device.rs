//! Compute device selection.
//!
//! The device is always passed explicitly into the operations that need it.
//! Gate arithmetic runs on the host; results carry the device they are bound
//! for so the training side can move them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compute device for gate tensors and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeDevice {
    /// Host execution
    #[default]
    Cpu,
    /// CUDA GPU with device ID
    Cuda { device_id: usize },
}

impl ComputeDevice {
    /// Pick CUDA device 0 when one is visible, otherwise the CPU.
    #[must_use]
    pub fn auto_detect() -> Self {
        if Self::cuda_available() {
            Self::Cuda { device_id: 0 }
        } else {
            Self::Cpu
        }
    }

    /// Check if CUDA is available
    #[must_use]
    pub fn cuda_available() -> bool {
        match std::env::var("CUDA_VISIBLE_DEVICES") {
            Ok(devices) => !devices.trim().is_empty() && devices.trim() != "-1",
            Err(_) => std::process::Command::new("nvidia-smi")
                .arg("--query-gpu=name")
                .arg("--format=csv,noheader")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false),
        }
    }

    #[must_use]
    pub const fn is_cuda(&self) -> bool {
        matches!(self, Self::Cuda { .. })
    }

    #[must_use]
    pub const fn is_cpu(&self) -> bool {
        matches!(self, Self::Cpu)
    }

    /// Get device ID for CUDA devices
    #[must_use]
    pub const fn device_id(&self) -> Option<usize> {
        match self {
            Self::Cuda { device_id } => Some(*device_id),
            Self::Cpu => None,
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda { device_id } => write!(f, "cuda:{device_id}"),
        }
    }
}

impl FromStr for ComputeDevice {
    type Err = String;

    /// Accepts `cpu`, `cuda`, `cuda:N` and `auto`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "cpu" => Ok(Self::Cpu),
            "auto" => Ok(Self::auto_detect()),
            "cuda" | "gpu" => Ok(Self::Cuda { device_id: 0 }),
            other => {
                let id = other
                    .strip_prefix("cuda:")
                    .ok_or_else(|| format!("unknown device '{s}' (expected cpu, cuda:N or auto)"))?;
                id.parse::<usize>()
                    .map(|device_id| Self::Cuda { device_id })
                    .map_err(|_| format!("invalid CUDA device id '{id}'"))
            }
        }
    }
}
