use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::math_util::wrap_pi;

/// Half-width of the pitch band around +-pi/2 treated as gimbal lock.
pub const GIMBAL_LOCK_ZONE: f32 = 0.001;

/// A yaw/pitch/bank orientation in radians.
///
/// Canonical form: pitch in [-pi/2, pi/2], yaw and bank in (-pi, pi], and
/// bank forced to 0 whenever pitch is within [`GIMBAL_LOCK_ZONE`] of a pole
/// (the lost degree of freedom collapses into yaw). Values are not kept
/// canonical automatically; call [`EulerAngles::canonicalized`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct EulerAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub bank: f32,
}

impl fmt::Display for EulerAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EulerAngles(yaw:{}, pitch:{}, bank:{})",
            self.yaw, self.pitch, self.bank
        )
    }
}

impl EulerAngles {
    /// No rotation (0, 0, 0)
    pub const IDENTITY: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
        bank: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32, bank: f32) -> Self {
        Self { yaw, pitch, bank }
    }

    /// Whether pitch sits inside the gimbal-lock band around +-pi/2.
    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.abs() > FRAC_PI_2 - GIMBAL_LOCK_ZONE
    }

    /// Returns the canonical triple describing the same orientation.
    ///
    /// Pitch is wrapped and then reflected off the +-pi/2 poles; the yaw/bank
    /// compensation is keyed on the sign of the reflected pitch. Inside the
    /// lock band the bank folds into yaw (subtracted for a north-pole pitch,
    /// added for a south-pole pitch) and bank is zeroed.
    pub fn canonicalized(&self) -> Self {
        let mut pitch = wrap_pi(self.pitch);
        let mut yaw = self.yaw;
        let mut bank = self.bank;

        if pitch < -FRAC_PI_2 {
            pitch = -PI - pitch;
            if pitch > 0.0 {
                yaw += pitch;
                bank += pitch;
            } else {
                yaw += PI;
                bank += PI;
            }
        } else if pitch > FRAC_PI_2 {
            pitch = PI - pitch;
            if pitch > 0.0 {
                yaw += pitch;
                bank += pitch;
            } else {
                yaw += PI;
                bank += PI;
            }
        }

        if pitch.abs() > FRAC_PI_2 - GIMBAL_LOCK_ZONE {
            if pitch > 0.0 {
                yaw -= bank;
            } else {
                yaw += bank;
            }
            bank = 0.0;
        } else {
            bank = wrap_pi(bank);
        }
        yaw = wrap_pi(yaw);

        Self { yaw, pitch, bank }
    }
}
