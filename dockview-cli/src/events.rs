use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use dockview_core::menu::MenuController;
use dockview_core::region::RegionId;

use crate::ui::PaneLayout;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(controller: &mut MenuController, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => controller.quit(),
        KeyCode::Char('q') => controller.quit(),

        // Focus
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                controller.cycle_focus_back();
            } else {
                controller.cycle_focus();
            }
        }
        KeyCode::BackTab => controller.cycle_focus_back(),

        // Navigation within the focused pane
        KeyCode::Up | KeyCode::Char('k') => controller.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => controller.move_cursor(1),
        KeyCode::PageUp => controller.move_cursor(-10),
        KeyCode::PageDown => controller.move_cursor(10),
        KeyCode::Home | KeyCode::Char('g') => controller.cursor_to_start(),
        KeyCode::End | KeyCode::Char('G') => controller.cursor_to_end(),

        // Open the highlighted menu entry
        KeyCode::Enter => {
            if controller.active_region() == RegionId::Menu {
                controller.activate();
            }
        }

        // Direct menu access
        KeyCode::Char(c @ '1'..='9') => {
            let row = c as usize - '1' as usize;
            if row < controller.region(RegionId::Menu).line_count() {
                controller.focus(RegionId::Menu);
                controller.select_menu_row(row);
                controller.activate();
            }
        }

        // Reload
        KeyCode::Char('r') => controller.refresh(),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(controller: &mut MenuController, mouse: MouseEvent, layout: &PaneLayout) {
    let Some(id) = layout.region_at(mouse.column, mouse.row) else {
        return;
    };

    match mouse.kind {
        // Scroll wheel moves the pane under the pointer
        MouseEventKind::ScrollUp => controller.region_mut(id).move_cursor(-1),
        MouseEventKind::ScrollDown => controller.region_mut(id).move_cursor(1),

        // Click to focus; a click on a menu entry opens it
        MouseEventKind::Down(MouseButton::Left) => {
            controller.focus(id);

            let rect = layout.rect(id);
            if id != RegionId::Menu || mouse.row <= rect.y {
                return;
            }
            let origin = controller.region(RegionId::Menu).origin();
            let row = origin + (mouse.row - rect.y - 1) as usize;
            if row < controller.region(RegionId::Menu).line_count() {
                controller.select_menu_row(row);
                controller.activate();
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockview_core::client::StaticClient;
    use dockview_core::format::SizeMode;
    use dockview_core::menu::Phase;
    use ratatui::layout::Rect;

    fn controller() -> MenuController {
        MenuController::new(Box::new(StaticClient::demo().unwrap()), SizeMode::Truncated)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> PaneLayout {
        PaneLayout::compute(Rect::new(0, 0, 90, 30)).0
    }

    #[test]
    fn test_quit_keys() {
        let mut c = controller();
        handle_key_event(&mut c, key(KeyCode::Char('q')));
        assert!(!c.is_running());

        let mut c = controller();
        handle_key_event(&mut c, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!c.is_running());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut c = controller();
        handle_key_event(&mut c, key(KeyCode::Tab));
        assert_eq!(c.active_region(), RegionId::Info);
        handle_key_event(&mut c, key(KeyCode::BackTab));
        handle_key_event(&mut c, key(KeyCode::BackTab));
        assert_eq!(c.active_region(), RegionId::Detail);
    }

    #[test]
    fn test_enter_activates_highlighted_entry() {
        let mut c = controller();
        handle_key_event(&mut c, key(KeyCode::Down));
        handle_key_event(&mut c, key(KeyCode::Enter));
        assert_eq!(c.phase(), &Phase::Dispatching { label: " Images ".into() });
    }

    #[test]
    fn test_enter_outside_menu_does_nothing() {
        let mut c = controller();
        c.focus(RegionId::Detail);
        handle_key_event(&mut c, key(KeyCode::Enter));
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[test]
    fn test_number_keys_jump_to_entry() {
        let mut c = controller();
        c.focus(RegionId::Info);
        handle_key_event(&mut c, key(KeyCode::Char('3')));
        assert_eq!(c.active_region(), RegionId::Menu);
        assert_eq!(c.phase(), &Phase::Dispatching { label: " Volumes ".into() });

        let mut c = controller();
        handle_key_event(&mut c, key(KeyCode::Char('7')));
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[test]
    fn test_click_on_menu_entry_activates() {
        let mut c = controller();
        c.focus(RegionId::Detail);
        // Row 0 is the border; row 2 is the second entry.
        handle_mouse_event(&mut c, click(3, 2), &layout());
        assert_eq!(c.active_region(), RegionId::Menu);
        assert_eq!(c.phase(), &Phase::Dispatching { label: " Images ".into() });
    }

    #[test]
    fn test_click_on_border_only_focuses() {
        let mut c = controller();
        c.focus(RegionId::Info);
        handle_mouse_event(&mut c, click(3, 0), &layout());
        assert_eq!(c.active_region(), RegionId::Menu);
        assert_eq!(c.phase(), &Phase::Idle);
    }

    #[test]
    fn test_click_focuses_detail() {
        let mut c = controller();
        handle_mouse_event(&mut c, click(60, 10), &layout());
        assert_eq!(c.active_region(), RegionId::Detail);
    }

    #[test]
    fn test_scroll_moves_pane_under_pointer() {
        let mut c = controller();
        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut c, scroll, &layout());
        assert_eq!(c.region(RegionId::Menu).cursor(), 1);
    }
}
