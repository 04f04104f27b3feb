//! Key input for controllable forces
//!
//! A [`KeyBinder`] maps key names (`"W"`, `"SHIFT"`, ...) to a
//! [`Binding`]: which force to address and which [`ControlAction`] to hand
//! it. The host feeds press/release events to `World::dispatch`, which looks
//! the key up and calls [`Controllable::control`] on the force.
//!
//! - [`Lever`]: three-position switch driven by an up key and a down key
//! - [`SymmetricalLever`]: a lever that reads as `+m`, `0` or `-m`
//! - [`ScalingLever`]: multiplies a value by `f`, `1` or `1/f` each tick
//! - [`ShiftingLever`]: adds `+s`, `0` or `-s` to a value each tick

use std::collections::HashMap;

use crate::simulation::forces::ForceId;

/// What a key does to the force it is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Push lever `n` up while the key is held
    LeverUp(usize),
    /// Push lever `n` down while the key is held
    LeverDown(usize),
    /// Boolean state `n`, true while the key is held
    Hold(usize),
    /// Command `n`, fired once per press
    Trigger(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub force: ForceId,
    pub action: ControlAction,
}

/// Registry of key bindings
#[derive(Debug, Clone, Default)]
pub struct KeyBinder {
    bindings: HashMap<String, Binding>,
}

impl KeyBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing whatever it was bound to
    pub fn bind(&mut self, key: &str, force: ForceId, action: ControlAction) {
        self.bindings.insert(key.to_string(), Binding { force, action });
    }

    /// The lever goes down while `key_down` is held and up while `key_up` is
    pub fn bind_keys_to_lever(&mut self, key_down: &str, key_up: &str, force: ForceId, lever: usize) {
        self.bind(key_down, force, ControlAction::LeverDown(lever));
        self.bind(key_up, force, ControlAction::LeverUp(lever));
    }

    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn clear_key(&mut self, key: &str) {
        self.bindings.remove(key);
    }

    pub fn clear_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.clear_key(key);
        }
    }

    /// Clear every single-letter key in `letters`: `"WE"` clears W and E
    pub fn clear_letter_keys(&mut self, letters: &str) {
        let mut buf = [0u8; 4];
        for c in letters.chars() {
            self.clear_key(c.encode_utf8(&mut buf));
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Something that reacts to bound keys
pub trait Controllable {
    /// Register this controllable's keys. `id` is where the world keeps it.
    fn add_bindings_to(&self, binder: &mut KeyBinder, id: ForceId);

    fn remove_bindings_from(&self, binder: &mut KeyBinder);

    /// Handle a bound key going down (`pressed`) or up
    fn control(&mut self, action: ControlAction, pressed: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeverPosition {
    Up,
    #[default]
    Neutral,
    Down,
}

/// Two keys, three positions. Holding exactly one key moves the lever that
/// way; holding both or neither leaves it neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lever {
    up: bool,
    down: bool,
}

impl Lever {
    pub fn push_up(&mut self, held: bool) {
        self.up = held;
    }

    pub fn push_down(&mut self, held: bool) {
        self.down = held;
    }

    pub fn position(&self) -> LeverPosition {
        match (self.up, self.down) {
            (true, false) => LeverPosition::Up,
            (false, true) => LeverPosition::Down,
            _ => LeverPosition::Neutral,
        }
    }

    /// Route a lever action to this lever; other actions are ignored
    pub fn handle(&mut self, action: ControlAction, pressed: bool) {
        match action {
            ControlAction::LeverUp(_) => self.push_up(pressed),
            ControlAction::LeverDown(_) => self.push_down(pressed),
            _ => {}
        }
    }
}

/// A lever whose value is `+magnitude`, `0` or `-magnitude`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricalLever {
    pub lever: Lever,
    pub magnitude: f64,
}

impl SymmetricalLever {
    pub fn new(magnitude: f64) -> Self {
        Self { lever: Lever::default(), magnitude }
    }

    pub fn value(&self) -> f64 {
        match self.lever.position() {
            LeverPosition::Up => self.magnitude,
            LeverPosition::Neutral => 0.0,
            LeverPosition::Down => -self.magnitude,
        }
    }

    pub fn handle(&mut self, action: ControlAction, pressed: bool) {
        self.lever.handle(action, pressed);
    }
}

/// A lever that grows a value by `factor` while up and shrinks it by the
/// same factor while down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingLever {
    pub lever: Lever,
    pub factor: f64, // > 1
}

impl ScalingLever {
    pub fn new(factor: f64) -> Self {
        Self { lever: Lever::default(), factor }
    }

    pub fn scale_factor(&self) -> f64 {
        match self.lever.position() {
            LeverPosition::Up => self.factor,
            LeverPosition::Neutral => 1.0,
            LeverPosition::Down => 1.0 / self.factor,
        }
    }

    pub fn scale(&self, value: &mut f64) {
        *value *= self.scale_factor();
    }

    pub fn handle(&mut self, action: ControlAction, pressed: bool) {
        self.lever.handle(action, pressed);
    }
}

/// A lever that moves a value by `step` up or down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftingLever {
    pub lever: Lever,
    pub step: f64,
}

impl ShiftingLever {
    pub fn new(step: f64) -> Self {
        Self { lever: Lever::default(), step }
    }

    pub fn shift(&self) -> f64 {
        match self.lever.position() {
            LeverPosition::Up => self.step,
            LeverPosition::Neutral => 0.0,
            LeverPosition::Down => -self.step,
        }
    }

    pub fn shift_value(&self, value: &mut f64) {
        *value += self.shift();
    }

    pub fn handle(&mut self, action: ControlAction, pressed: bool) {
        self.lever.handle(action, pressed);
    }
}
