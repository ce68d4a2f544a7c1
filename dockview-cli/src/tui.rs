use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use dockview_core::menu::MenuController;

use crate::events;
use crate::ui::{self, PaneLayout};

const POLL_INTERVAL: Duration = Duration::from_millis(80);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the menu until the user quits, then hands the controller back.
pub async fn run(mut controller: MenuController) -> Result<MenuController> {
    let mut terminal = setup_terminal()?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    tracing::info!(client = controller.client_name(), "menu started");
    let result = run_loop(&mut terminal, &mut controller).await;

    restore_terminal(&mut terminal)?;
    result?;

    tracing::info!("menu closed");
    Ok(controller)
}

async fn run_loop(terminal: &mut Term, controller: &mut MenuController) -> Result<()> {
    let mut layout = PaneLayout::default();

    while controller.is_running() {
        terminal.draw(|f| layout = ui::draw(f, controller))?;

        // A queued listing runs after the "Loading" frame is on screen.
        if controller.run_pending().await {
            continue;
        }

        if let Some(event) = events::poll_event(POLL_INTERVAL)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(controller, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(controller, mouse, &layout),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
