use swipedeck::cli::{AppConfig, Args};
use swipedeck::config::DeckConfig;
use swipedeck::controller::SwipeController;
use swipedeck::domain::{load_items, sample_items, Cart, GestureSample};
use swipedeck::logging::LoggingConfig;
use swipedeck::scheduler::TokioScheduler;
use swipedeck::tui::{
    card_area, handle_checkout_input, handle_key_event, handle_mouse_event,
    render, render_checkout_overlay, render_help_overlay, render_summary, render_welcome_overlay,
    surface_for, KeyAction, PointerAction, ViewState, CELL_ASPECT,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Position, layout::Rect, Terminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{io, time::Duration};
use tracing::{info, warn};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Convert to config
    let config: AppConfig = args.into();

    let logging = LoggingConfig {
        level: config.log_level.clone(),
        file: config.log_file.clone(),
    };
    if let Err(e) = logging.init() {
        eprintln!("Warning: Failed to open log file: {}", e);
    }

    run_app_with_config(&config)
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    let items = match &config.items {
        Some(path) => load_items(path).map_err(|e| io::Error::other(e.to_string()))?,
        None => sample_items(),
    };

    if items.is_empty() {
        println!("No markets to swipe through.");
        return Ok(());
    }

    // Load user configuration
    let mut user_config = DeckConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        DeckConfig::default()
    });

    let mut deck_config = config.apply(user_config.clone());
    // Stack offsets are drawn in terminal rows
    deck_config.placeholder_offset_step = 1.0;

    let runtime = tokio::runtime::Runtime::new()?;
    let scheduler = TokioScheduler::with_handle(runtime.handle().clone());

    let cart = Cart::new();
    let checkout_due = Arc::new(AtomicBool::new(false));
    let checkout_flag = Arc::clone(&checkout_due);

    let (columns, rows) = crossterm::terminal::size()?;
    let total_items = items.len();
    let controller = SwipeController::new(
        items,
        deck_config,
        surface_for(Rect::new(0, 0, columns, rows)),
        Arc::new(scheduler),
        cart.clone(),
        move || checkout_flag.store(true, Ordering::SeqCst),
    )
    .map_err(|e| io::Error::other(e.to_string()))?;

    info!(items = total_items, "Deck ready");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(
        &mut terminal,
        &controller,
        &cart,
        &checkout_due,
        config,
        &mut user_config,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let stats = controller.stats();
    drop(controller);

    println!(
        "Swiped {} cards: {} yes, {} no, {} skipped. {} picks left in cart.",
        stats.swipes,
        stats.yes,
        stats.no,
        stats.skipped,
        cart.len()
    );

    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    controller: &SwipeController,
    cart: &Cart,
    checkout_due: &AtomicBool,
    config: &AppConfig,
    user_config: &mut DeckConfig,
) -> io::Result<()> {
    // Show welcome on first launch or if --welcome flag is set
    let should_show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Swiping
    };

    let mut last_area = Rect::default();
    let mut drag_origin: Option<(u16, u16)> = None;

    loop {
        if view_state == ViewState::Swiping && checkout_due.swap(false, Ordering::SeqCst) {
            view_state = ViewState::Checkout;
        }

        let view = controller.view();
        let mut area = last_area;

        terminal.draw(|frame| {
            area = frame.area();
            render(frame, &view, cart);

            // Render overlays
            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Summary => render_summary(frame, &controller.stats(), cart),
                ViewState::Checkout => render_checkout_overlay(frame, cart, view.swipes),
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Swiping => {}
            }
        })?;

        if area != last_area {
            if let Err(e) = controller.resize(surface_for(area)) {
                warn!(error = %e, "Terminal too small for gestures");
            }
            last_area = area;
        }

        // Short poll keeps animations moving between input events
        if !event::poll(Duration::from_millis(16))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match view_state {
                ViewState::Help => {
                    // Any key closes help
                    view_state = ViewState::Swiping;
                }
                ViewState::Summary => {
                    // Any key exits from summary
                    break;
                }
                ViewState::Checkout => match handle_checkout_input(key) {
                    KeyAction::ConfirmCheckout => {
                        let picks = cart.take();
                        let staked: u64 = picks.iter().map(|p| p.amount).sum();
                        info!(picks = picks.len(), staked, "Checked out");
                        view_state = ViewState::Swiping;
                    }
                    KeyAction::DismissCheckout => {
                        view_state = ViewState::Swiping;
                    }
                    _ => {}
                },
                ViewState::Welcome => {
                    // Any key dismisses welcome and starts swiping
                    view_state = ViewState::Swiping;

                    // Mark welcome as shown and persist
                    user_config.welcome_shown = true;
                    if let Err(e) = user_config.save() {
                        warn!(error = %e, "Failed to save user config");
                    }
                }
                ViewState::Swiping => match handle_key_event(key) {
                    KeyAction::Quit => {
                        // Show summary before quitting if anything was swiped
                        if controller.counter() > 0 {
                            view_state = ViewState::Summary;
                        } else {
                            break;
                        }
                    }
                    KeyAction::Swipe(outcome) => {
                        if let Err(e) = controller.swipe(outcome) {
                            warn!(error = %e, "Swipe failed");
                        }
                    }
                    KeyAction::Help => {
                        view_state = ViewState::Help;
                    }
                    KeyAction::ConfirmCheckout | KeyAction::DismissCheckout | KeyAction::None => {}
                },
            },
            Event::Mouse(mouse) if view_state == ViewState::Swiping => {
                match handle_mouse_event(mouse) {
                    PointerAction::Press { column, row } => {
                        if !card_area(last_area).contains(Position::new(column, row)) {
                            continue;
                        }
                        if let Some(item) = controller.current() {
                            if controller.begin_drag(&item.id) {
                                drag_origin = Some((column, row));
                            }
                        }
                    }
                    PointerAction::Drag { column, row } => {
                        if let Some((x0, y0)) = drag_origin {
                            let dx = f64::from(column) - f64::from(x0);
                            let dy = (f64::from(row) - f64::from(y0)) * CELL_ASPECT;
                            controller.drag_to(GestureSample::new(dx, dy));
                        }
                    }
                    PointerAction::Release => {
                        if drag_origin.take().is_some() {
                            if let Err(e) = controller.release() {
                                warn!(error = %e, "Gesture rejected");
                            }
                        }
                    }
                    PointerAction::None => {}
                }
            }
            _ => {}
        }
    }

    Ok(())
}
