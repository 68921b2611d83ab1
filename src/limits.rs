use crate::NetpbmError;

/// Resource limits applied after the header is scanned, before any
/// sample buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the RGBA output buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), NetpbmError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            NetpbmError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };
        if let Some(max_w) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max_w));
        }
        if let Some(max_h) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max_h));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max_px));
        }
        Ok(())
    }

    /// Check that the RGBA buffer for `width` x `height` fits the memory limit.
    pub(crate) fn check_rgba(&self, width: u32, height: u32) -> Result<(), NetpbmError> {
        let Some(max_mem) = self.max_memory_bytes else {
            return Ok(());
        };
        let Some(bytes) = (u64::from(width) * u64::from(height)).checked_mul(4) else {
            return Err(NetpbmError::LimitExceeded(alloc::format!(
                "allocation for {width}x{height} RGBA exceeds memory limit {max_mem}"
            )));
        };
        if bytes > max_mem {
            return Err(NetpbmError::LimitExceeded(alloc::format!(
                "allocation {bytes} bytes exceeds memory limit {max_mem}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_rgba(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn pixel_count_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(matches!(
            limits.check(10, 11),
            Err(NetpbmError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_counts_four_bytes_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(16),
            ..Default::default()
        };
        assert!(limits.check_rgba(2, 2).is_ok());
        assert!(limits.check_rgba(3, 2).is_err());
    }

    #[test]
    fn memory_limit_with_overflowing_size() {
        let limits = Limits {
            max_memory_bytes: Some(u64::MAX),
            ..Default::default()
        };
        assert!(matches!(
            limits.check_rgba(u32::MAX, u32::MAX),
            Err(NetpbmError::LimitExceeded(_))
        ));
    }
}
