use glam::{Mat4, Vec3};

/// Pitch is clamped to +/- this many degrees so the view never flips over the pole.
pub const PITCH_LIMIT: f32 = 89.0;

/// Degrees of rotation per unit of pointer motion.
pub const DEFAULT_SENSITIVITY: f32 = 0.05;

const INITIAL_YAW: f32 = -90.0;

/// Direction requested by a movement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Fly camera with yaw/pitch look and a smoothed eye position.
///
/// Angles are in degrees. Movement never touches `position` directly: it moves
/// `target_position`, and [`smooth`](FlyCamera::smooth) eases the eye toward it
/// once per frame.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    target_position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    /// Units per second.
    pub speed: f32,
    /// Damping rate per second.
    pub smoothness: f32,
    pub sensitivity: f32,
    pointer_locked: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.5, 6.0))
    }
}

impl FlyCamera {
    /// Camera at `position` looking down -Z with the pointer unlocked.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target_position: position,
            front: front_from_angles(INITIAL_YAW, 0.0),
            up: Vec3::Y,
            yaw: INITIAL_YAW,
            pitch: 0.0,
            speed: 5.0,
            smoothness: 8.0,
            sensitivity: DEFAULT_SENSITIVITY,
            pointer_locked: false,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = smoothness;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Smoothed eye position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Where movement input has asked the eye to go.
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    /// Unit look direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Strafe axis, `normalize(front x up)`.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    /// Yaw in degrees, wrapped to `[-180, 180)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, within `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    /// Flip pointer lock and return the new state.
    pub fn toggle_pointer_lock(&mut self) -> bool {
        self.pointer_locked = !self.pointer_locked;
        tracing::debug!(locked = self.pointer_locked, "pointer lock toggled");
        self.pointer_locked
    }

    /// Apply a pointer delta to yaw and pitch.
    ///
    /// Ignored unless the pointer is locked. `dy` is positive when the pointer
    /// moves up. Returns whether the look direction changed.
    pub fn look(&mut self, dx: f32, dy: f32) -> bool {
        if !self.pointer_locked {
            return false;
        }
        self.yaw = wrap_degrees(self.yaw + dx * self.sensitivity);
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
        true
    }

    /// Shift the target position by one movement step of `speed * dt`.
    ///
    /// `dt` is the duration of the frame the key event arrived in, so the
    /// distance covered per key event depends on the frame rate.
    pub fn move_in(&mut self, direction: MoveDirection, dt: f32) {
        let step = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.target_position += self.front * step,
            MoveDirection::Backward => self.target_position -= self.front * step,
            MoveDirection::Right => self.target_position += self.right() * step,
            MoveDirection::Left => self.target_position -= self.right() * step,
        }
    }

    /// Ease `position` toward `target_position` by `k = smoothness * dt`.
    ///
    /// Equivalent to `position * (1 - k) + target * k`. Stable only for
    /// `0 <= k <= 1`; larger steps (a long stall) overshoot, and past
    /// `k = 2` the error grows every frame.
    pub fn smooth(&mut self, dt: f32) {
        let k = self.smoothness * dt;
        if k > 1.0 {
            tracing::warn!(k, dt, "smoothing step exceeds 1, camera will overshoot");
        }
        self.position += (self.target_position - self.position) * k;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// Wrap to `[-180, 180)`.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid rounds tiny negative remainders up to exactly 360.
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
