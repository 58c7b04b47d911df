//! Keyboard and pointer input buffering
//!
//! DOM events arrive whenever the browser delivers them; the tracker folds
//! them into held-key state plus one-shot requests, and the game loop takes a
//! [`TickInput`] snapshot once per tick.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Game action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Pause,
    /// Restart on a fresh seed (host-side, not a tick input)
    NewGame,
}

/// Canonical key name and its action for a DOM `KeyboardEvent.key` value
fn binding(key: &str) -> Option<(&'static str, Action)> {
    let binding = match key {
        "ArrowLeft" => ("ArrowLeft", Action::Left),
        "ArrowRight" => ("ArrowRight", Action::Right),
        "ArrowUp" => ("ArrowUp", Action::Jump),
        " " => ("Space", Action::Jump),
        "Escape" => ("Escape", Action::Pause),
        _ => match key.to_ascii_lowercase().as_str() {
            "a" => ("a", Action::Left),
            "d" => ("d", Action::Right),
            "w" => ("w", Action::Jump),
            "p" => ("p", Action::Pause),
            "n" => ("n", Action::NewGame),
            _ => return None,
        },
    };
    Some(binding)
}

/// Action bound to a DOM key name, if any
pub fn action_for_key(key: &str) -> Option<Action> {
    binding(key).map(|(_, action)| action)
}

/// Accumulates input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<(&'static str, Action)>,
    throw_at: Option<Vec2>,
    pause: bool,
    new_game: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound (caller may
    /// suppress the browser default, e.g. page scrolling).
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(bound) = binding(key) else {
            return false;
        };
        // One-shot actions fire on the initial press only, not on auto-repeat
        if self.held.insert(bound) {
            match bound.1 {
                Action::Pause => self.pause = true,
                Action::NewGame => self.new_game = true,
                _ => {}
            }
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match binding(key) {
            Some(bound) => {
                self.held.remove(&bound);
                true
            }
            None => false,
        }
    }

    /// Queue a throw toward an arena point; the latest click before a tick wins
    pub fn click(&mut self, target: Vec2) {
        self.throw_at = Some(target);
    }

    /// Queue a pause toggle
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Forget held keys (focus loss means key-up events may never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Consume a pending new-game request
    pub fn take_new_game(&mut self) -> bool {
        std::mem::take(&mut self.new_game)
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|(_, held)| *held == action)
    }

    /// Snapshot for one tick; one-shot requests are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            jump: self.is_held(Action::Jump),
            throw_at: self.throw_at.take(),
            pause: std::mem::take(&mut self.pause),
        }
    }
}

/// Map a pointer position in client pixels onto arena coordinates
///
/// `origin` and `size` are the canvas's bounding client rect; the canvas may
/// be CSS-scaled relative to the arena.
pub fn client_to_arena(client: Vec2, origin: Vec2, size: Vec2, arena: Vec2) -> Vec2 {
    let local = client - origin;
    if size.x <= 0.0 || size.y <= 0.0 {
        return local;
    }
    local * arena / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(action_for_key("a"), Some(Action::Left));
        assert_eq!(action_for_key("A"), Some(Action::Left));
        assert_eq!(action_for_key("ArrowRight"), Some(Action::Right));
        assert_eq!(action_for_key(" "), Some(Action::Jump));
        assert_eq!(action_for_key("W"), Some(Action::Jump));
        assert_eq!(action_for_key("Escape"), Some(Action::Pause));
        assert_eq!(action_for_key("n"), Some(Action::NewGame));
        assert_eq!(action_for_key("q"), None);
        // Lowercased arrow names are not arrows
        assert_eq!(action_for_key("arrowleft"), None);
    }

    #[test]
    fn test_held_keys_survive_ticks() {
        let mut input = InputTracker::new();
        input.key_down("d");
        assert!(input.take_tick_input().right);
        assert!(input.take_tick_input().right);
        input.key_up("D");
        assert!(!input.take_tick_input().right);
    }

    #[test]
    fn test_two_keys_same_action() {
        let mut input = InputTracker::new();
        input.key_down("a");
        input.key_down("ArrowLeft");
        input.key_up("a");
        assert!(input.take_tick_input().left);
        input.key_up("ArrowLeft");
        assert!(!input.take_tick_input().left);
    }

    #[test]
    fn test_click_is_one_shot() {
        let mut input = InputTracker::new();
        input.click(Vec2::new(10.0, 20.0));
        input.click(Vec2::new(30.0, 40.0));
        assert_eq!(input.take_tick_input().throw_at, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(input.take_tick_input().throw_at, None);
    }

    #[test]
    fn test_pause_ignores_key_repeat() {
        let mut input = InputTracker::new();
        input.key_down("Escape");
        input.key_down("Escape");
        assert!(input.take_tick_input().pause);
        input.key_down("Escape");
        assert!(!input.take_tick_input().pause);
        input.key_up("Escape");
        input.key_down("Escape");
        assert!(input.take_tick_input().pause);
    }

    #[test]
    fn test_new_game_is_one_shot_and_not_a_tick_input() {
        let mut input = InputTracker::new();
        input.key_down("N");
        input.key_down("n");
        assert_eq!(input.take_tick_input(), TickInput::default());
        assert!(input.take_new_game());
        assert!(!input.take_new_game());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputTracker::new();
        input.key_down("a");
        input.key_down("w");
        input.release_all();
        let tick = input.take_tick_input();
        assert!(!tick.left && !tick.jump);
    }

    #[test]
    fn test_client_to_arena_scales() {
        let arena = Vec2::new(800.0, 500.0);
        let p = client_to_arena(
            Vec2::new(210.0, 135.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(400.0, 250.0),
            arena,
        );
        assert_eq!(p, Vec2::new(400.0, 250.0));
    }
}
