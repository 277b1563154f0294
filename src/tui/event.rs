use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::action::Action;

/// Identifier for a key press, in the form the shortcut table expects.
///
/// Returns `None` for keys the site has no name for (media keys, lone
/// modifiers).
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            format!("ctrl+{}", c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "shift+tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };
    Some(name)
}

/// Translate one terminal event into a session action.
pub fn to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            key_name(&key).map(Action::Key)
        }
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

/// Forward local terminal input into the session queue until the queue
/// closes or the terminal stops producing events.
pub async fn forward_input(events: UnboundedSender<Action>) {
    let mut stream = EventStream::new();
    while let Some(event) = stream.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!("Terminal input error: {}", e);
                break;
            }
        };
        if let Some(action) = to_action(event)
            && events.send(action).is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            key_name(&press(KeyCode::Char('a'), KeyModifiers::NONE)).as_deref(),
            Some("a")
        );
        assert_eq!(
            key_name(&press(KeyCode::Char('Q'), KeyModifiers::SHIFT)).as_deref(),
            Some("Q")
        );
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            key_name(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)).as_deref(),
            Some("ctrl+c")
        );
        assert_eq!(
            key_name(&press(KeyCode::Char('U'), KeyModifiers::CONTROL | KeyModifiers::SHIFT))
                .as_deref(),
            Some("ctrl+u")
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_name(&press(KeyCode::PageDown, KeyModifiers::NONE)).as_deref(),
            Some("pgdown")
        );
        assert_eq!(
            key_name(&press(KeyCode::Up, KeyModifiers::NONE)).as_deref(),
            Some("up")
        );
        assert_eq!(key_name(&press(KeyCode::Null, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(to_action(Event::Key(key)), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(
            to_action(Event::Resize(80, 24)),
            Some(Action::Resize { width: 80, height: 24 })
        );
    }
}
