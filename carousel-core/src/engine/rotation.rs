//! Auto-rotation and container geometry.

use super::CarouselEngine;
use crate::{CarouselError, CarouselResult};

impl CarouselEngine {
    /// Switch continuous auto-rotation on or off.
    ///
    /// Enabling also releases a pause; disabling lets the rotation ease to a
    /// stop over the next ticks.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfiguration`] when the rotation speed
    /// is zero; nothing changes in that case.
    pub fn enable_rotation(&mut self, enable: bool) -> CarouselResult<()> {
        if self.motion.rotation_speed == 0.0 {
            tracing::warn!("Rotation toggle rejected: rotation speed is zero");
            return Err(CarouselError::InvalidConfiguration(
                "rotation speed must have a value other than zero".to_string(),
            ));
        }
        self.motion.rotation_enabled = enable;
        self.motion.rotation_paused = !enable;
        tracing::debug!("Rotation enabled: {enable}");
        Ok(())
    }

    /// Flip the rotation direction. The eased speed swings over smoothly.
    pub fn reverse_rotation(&mut self) {
        self.motion.rotation_speed = -self.motion.rotation_speed;
        self.config.rotation_speed = self.motion.rotation_speed;
        tracing::debug!("Rotation speed now {}", self.motion.rotation_speed);
    }

    /// Hold or release auto-rotation without changing whether it is enabled.
    pub fn toggle_pause(&mut self) {
        self.motion.rotation_paused = !self.motion.rotation_paused;
        tracing::debug!("Rotation paused: {}", self.motion.rotation_paused);
    }

    /// Whether the ring is currently being driven by auto-rotation.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.motion.rotation_enabled && !self.motion.rotation_paused
    }

    /// Collapse the ring to its centre so the next ticks grow it back out.
    pub fn open(&mut self) {
        self.motion.current_radius_x = 0.0;
        self.motion.current_radius_y = 0.0;
        tracing::debug!("Opening carousel");
    }

    /// Change the container size. Unset radii are re-derived from it.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfiguration`] for a negative or
    /// non-finite dimension.
    pub fn resize(&mut self, width: f64, height: f64) -> CarouselResult<()> {
        if let Err(e) = check_container(width, height) {
            tracing::warn!("Rejected resize: {e}");
            return Err(e);
        }
        self.container_width = width;
        self.container_height = height;
        self.apply_radii();
        self.refresh_poses();
        tracing::debug!("Resized to {width}x{height}");
        Ok(())
    }
}

/// A container must be finite and non-negative in both dimensions.
pub(super) fn check_container(width: f64, height: f64) -> CarouselResult<()> {
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(CarouselError::InvalidConfiguration(format!(
            "container size must be finite and non-negative, got {width}x{height}"
        )));
    }
    Ok(())
}
