use std::collections::HashSet;

use obby_core::config::KeyBindings;

/// Logical actions the raw key codes map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Restart,
}

/// Held state of the movement actions, sampled once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Keys currently held, updated from key events as they arrive.
///
/// Only the held set is tracked, so a press and release between two steps is never
/// seen by the simulation.
#[derive(Debug, Clone)]
pub struct InputState {
    keys_down: HashSet<String>,
    bindings: KeyBindings,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            keys_down: HashSet::new(),
            bindings,
        }
    }

    /// Register a key press. Returns the action bound to the code, if any.
    pub fn on_key_down(&mut self, code: impl Into<String>) -> Option<Action> {
        let code = code.into();
        let action = self.action_for(&code);
        self.keys_down.insert(code);
        action
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.keys_down.remove(code);
    }

    pub fn is_key_down(&self, code: &str) -> bool {
        self.keys_down.contains(code)
    }

    /// First action whose bindings include `code`.
    pub fn action_for(&self, code: &str) -> Option<Action> {
        let bound = |codes: &[String]| codes.iter().any(|c| c == code);
        if bound(&self.bindings.move_left) {
            Some(Action::MoveLeft)
        } else if bound(&self.bindings.move_right) {
            Some(Action::MoveRight)
        } else if bound(&self.bindings.jump) {
            Some(Action::Jump)
        } else if bound(&self.bindings.restart) {
            Some(Action::Restart)
        } else {
            None
        }
    }

    pub fn is_action_held(&self, action: Action) -> bool {
        let codes = match action {
            Action::MoveLeft => &self.bindings.move_left,
            Action::MoveRight => &self.bindings.move_right,
            Action::Jump => &self.bindings.jump,
            Action::Restart => &self.bindings.restart,
        };
        codes.iter().any(|c| self.keys_down.contains(c))
    }

    pub fn snapshot(&self) -> Controls {
        Controls {
            left: self.is_action_held(Action::MoveLeft),
            right: self.is_action_held(Action::MoveRight),
            jump: self.is_action_held(Action::Jump),
        }
    }

    /// Drop all held keys, e.g. when the page loses focus.
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_and_up() {
        let mut input = InputState::default();
        input.on_key_down("KeyA");
        assert!(input.is_key_down("KeyA"));
        input.on_key_up("KeyA");
        assert!(!input.is_key_down("KeyA"));
    }

    #[test]
    fn aliases_map_to_same_action() {
        let mut input = InputState::default();
        input.on_key_down("ArrowUp");
        assert!(input.snapshot().jump);
        input.on_key_up("ArrowUp");
        input.on_key_down("Space");
        assert!(input.snapshot().jump);
        input.on_key_down("KeyW");
        input.on_key_up("Space");
        assert!(input.snapshot().jump, "KeyW is still held");
    }

    #[test]
    fn key_down_reports_bound_action() {
        let mut input = InputState::default();
        assert_eq!(input.on_key_down("KeyR"), Some(Action::Restart));
        assert_eq!(input.on_key_down("KeyD"), Some(Action::MoveRight));
        assert_eq!(input.on_key_down("KeyQ"), None);
    }

    #[test]
    fn unbound_keys_do_not_move() {
        let mut input = InputState::default();
        input.on_key_down("KeyQ");
        assert_eq!(input.snapshot(), Controls::default());
    }

    #[test]
    fn custom_bindings_replace_defaults() {
        let bindings = KeyBindings {
            jump: vec!["KeyK".to_string()],
            ..KeyBindings::default()
        };
        let mut input = InputState::new(bindings);
        input.on_key_down("Space");
        assert!(!input.snapshot().jump);
        input.on_key_down("KeyK");
        assert!(input.snapshot().jump);
    }

    #[test]
    fn both_directions_held() {
        let mut input = InputState::default();
        input.on_key_down("ArrowLeft");
        input.on_key_down("ArrowRight");
        let controls = input.snapshot();
        assert!(controls.left && controls.right);
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::default();
        input.on_key_down("KeyD");
        input.on_key_down("Space");
        input.clear();
        assert_eq!(input.snapshot(), Controls::default());
    }
}
