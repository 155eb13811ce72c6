use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::config::{KeyBinding, KeyBindings};

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Switch between the full and compact view
    ToggleCompact,
    /// Start or stop screen recording
    ToggleRecording,
    /// Capture a screenshot
    Screenshot,
    /// No action
    None,
}

/// The chord a key press stands for. Without the kitty keyboard protocol the
/// terminal sends Ctrl-M as CR and Ctrl-I as HT, which crossterm reports as
/// `Enter` and `Tab`.
fn pressed_chord(key: &KeyEvent) -> Option<KeyBinding> {
    match key.code {
        KeyCode::Char(c) => Some(KeyBinding {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            key: c.to_ascii_lowercase(),
        }),
        KeyCode::Enter => Some(KeyBinding { ctrl: true, key: 'm' }),
        KeyCode::Tab => Some(KeyBinding { ctrl: true, key: 'i' }),
        _ => None,
    }
}

fn matches_binding(key: &KeyEvent, binding: Option<KeyBinding>) -> bool {
    binding.is_some() && pressed_chord(key) == binding
}

/// Map a key press to an event. Configured bindings win over the plain
/// single-letter fallbacks.
pub fn map_key(key: &KeyEvent, bindings: &KeyBindings) -> MonitorEvent {
    if matches_binding(key, bindings.minimalize) {
        return MonitorEvent::ToggleCompact;
    }
    if matches_binding(key, bindings.start_recording) {
        return MonitorEvent::ToggleRecording;
    }
    if matches_binding(key, bindings.screenshot) {
        return MonitorEvent::Screenshot;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => MonitorEvent::Quit,
            _ => MonitorEvent::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
        KeyCode::Char('m') => MonitorEvent::ToggleCompact,
        KeyCode::Char('r') => MonitorEvent::ToggleRecording,
        KeyCode::Char('s') => MonitorEvent::Screenshot,
        _ => MonitorEvent::None,
    }
}
