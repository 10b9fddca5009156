//! Input aggregation for the camera component.
//!
//! The host window layer forwards discrete events; [`InputState`] folds
//! them into per-tick axes and edge triggers. The camera and physics code
//! is the sole consumer. Edge triggers (`take_*`) fire once per press;
//! held state drops the same tick the release arrives.

/// Abstract key bindings. The host maps physical key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Jump,
    Sprint,
    Descend,
    FlyToggle,
    Grapple,
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Right,
}

/// One discrete event from the host input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Relative mouse motion while the pointer is captured.
    MouseDelta { dx: f32, dy: f32 },
    Scroll(f32),
    Click { kind: ClickKind, x: f32, y: f32 },
    ModifierDown,
    ModifierUp,
}

/// Accumulated input for one simulation tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    forward_held: bool,
    back_held: bool,
    left_held: bool,
    right_held: bool,
    jump_held: bool,
    sprint_held: bool,
    descend_held: bool,
    modifier_held: bool,

    jump_edge: bool,
    fly_toggle_edge: bool,
    grapple_edge: bool,
    board_edge: bool,

    mouse_dx: f32,
    mouse_dy: f32,
    scroll: f32,
    click: Option<(ClickKind, f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::MouseDelta { dx, dy } => {
                self.mouse_dx += dx;
                self.mouse_dy += dy;
            }
            InputEvent::Scroll(delta) => self.scroll += delta,
            InputEvent::Click { kind, x, y } => self.click = Some((kind, x, y)),
            InputEvent::ModifierDown => self.modifier_held = true,
            InputEvent::ModifierUp => self.modifier_held = false,
        }
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::MoveForward => self.forward_held = true,
            Key::MoveBack => self.back_held = true,
            Key::StrafeLeft => self.left_held = true,
            Key::StrafeRight => self.right_held = true,
            Key::Sprint => self.sprint_held = true,
            Key::Descend => self.descend_held = true,
            Key::Jump => {
                // Key repeat must not re-trigger the edge.
                if !self.jump_held {
                    self.jump_edge = true;
                }
                self.jump_held = true;
            }
            Key::FlyToggle => self.fly_toggle_edge = true,
            Key::Grapple => self.grapple_edge = true,
            Key::Board => self.board_edge = true,
        }
    }

    fn key_up(&mut self, key: Key) {
        match key {
            Key::MoveForward => self.forward_held = false,
            Key::MoveBack => self.back_held = false,
            Key::StrafeLeft => self.left_held = false,
            Key::StrafeRight => self.right_held = false,
            Key::Sprint => self.sprint_held = false,
            Key::Descend => self.descend_held = false,
            Key::Jump => self.jump_held = false,
            Key::FlyToggle | Key::Grapple | Key::Board => {}
        }
    }

    /// Movement axes in `[-1, 1]`: (forward/back, strafe right/left).
    pub fn axes(&self) -> (f32, f32) {
        let forward = (self.forward_held as i8 - self.back_held as i8) as f32;
        let strafe = (self.right_held as i8 - self.left_held as i8) as f32;
        (forward, strafe)
    }

    pub fn sprint_held(&self) -> bool {
        self.sprint_held
    }

    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    pub fn descend_held(&self) -> bool {
        self.descend_held
    }

    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_edge)
    }

    pub fn take_fly_toggle(&mut self) -> bool {
        std::mem::take(&mut self.fly_toggle_edge)
    }

    pub fn take_grapple(&mut self) -> bool {
        std::mem::take(&mut self.grapple_edge)
    }

    pub fn take_board(&mut self) -> bool {
        std::mem::take(&mut self.board_edge)
    }

    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        (std::mem::take(&mut self.mouse_dx), std::mem::take(&mut self.mouse_dy))
    }

    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll)
    }

    pub fn take_click(&mut self) -> Option<(ClickKind, f32, f32)> {
        self.click.take()
    }
}
