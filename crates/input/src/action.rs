use dirtjam_camera::MoveDirection;

/// Keys the viewer reacts to. Everything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    F1,
    Other,
}

/// A discrete input event delivered by the host before the frame it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Relative pointer motion. `dy` is positive when the pointer moves up.
    PointerMove { dx: f32, dy: f32 },
    /// Key pressed, including auto-repeat.
    KeyDown(Key),
    KeyUp(Key),
}

/// A high-level action produced from an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rotate the camera by a pointer delta.
    Look { dx: f32, dy: f32 },
    /// Step the camera target one movement increment.
    Move(MoveDirection),
    /// Lock or release the pointer for mouse look.
    TogglePointerLock,
    /// Show or hide the tuning overlay.
    ToggleOverlay,
    /// Ask the host to close the window.
    Quit,
}

/// Map an input event to the action it triggers, if any.
///
/// W/S/A/D move on key-down (every repeat counts), Escape quits, F1 toggles the
/// overlay, and releasing Space toggles pointer lock.
pub fn map_event(event: &InputEvent) -> Option<Action> {
    let action = match *event {
        InputEvent::PointerMove { dx, dy } => Action::Look { dx, dy },
        InputEvent::KeyDown(key) => match key {
            Key::W => Action::Move(MoveDirection::Forward),
            Key::S => Action::Move(MoveDirection::Backward),
            Key::A => Action::Move(MoveDirection::Left),
            Key::D => Action::Move(MoveDirection::Right),
            Key::Escape => Action::Quit,
            Key::F1 => Action::ToggleOverlay,
            Key::Space | Key::Other => return None,
        },
        InputEvent::KeyUp(Key::Space) => Action::TogglePointerLock,
        InputEvent::KeyUp(_) => return None,
    };
    tracing::trace!(?event, ?action, "mapped input");
    Some(action)
}
