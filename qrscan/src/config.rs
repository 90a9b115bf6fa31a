//! Configuration types and defaults

use std::time::Duration;

use qrscan_capture::DEFAULT_FRAME_WIDTH;

use crate::error::ScanError;

/// Scanner configuration
///
/// The defaults reproduce the classic behavior: a 600-pixel-wide sampling
/// buffer and a scan loop that retries until a code is found, with no
/// attempt bound and no timeout. Both bounds can be made explicit here.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Fixed width of the frame-sampling buffer, in pixels
    pub frame_width: u32,
    /// Maximum number of scan cycles before giving up (`None` = unbounded)
    pub max_attempts: Option<u64>,
    /// Wall-clock bound on one `scan` call (`None` = unbounded)
    pub timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            max_attempts: None,
            timeout: None,
        }
    }
}

impl ScanConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.frame_width == 0 {
            return Err(ScanError::InvalidConfiguration {
                message: "Frame width must be > 0".to_string(),
            });
        }

        if self.max_attempts == Some(0) {
            return Err(ScanError::InvalidConfiguration {
                message: "Attempt bound must be > 0".to_string(),
            });
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(ScanError::InvalidConfiguration {
                message: "Timeout must be > 0".to_string(),
            });
        }

        Ok(())
    }
}
