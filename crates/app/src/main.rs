//! Hostel - room-booking demo shell
//!
//! Headless shell: boots the store, seeds the registry, and reports the
//! current occupancy. A UI front-end binds to the view adapters.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostel_app::state::AppState;
use hostel_app::view;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting hostel shell");

    let app_state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match app_state.occupancy() {
        Ok(summary) => tracing::info!(
            rooms = summary.total_rooms,
            beds = summary.total_beds,
            occupied = summary.occupied_beds,
            "Registry ready"
        ),
        Err(e) => tracing::error!("Failed to read occupancy: {}", e),
    }

    match view::room_rows(&app_state) {
        Ok(rows) => {
            let full = rows.iter().filter(|r| r.is_full).count();
            tracing::info!(rooms = rows.len(), full, "Room listing loaded");
        }
        Err(e) => tracing::error!("Failed to list rooms: {}", e),
    }

    if let Some(session) = app_state.current_session() {
        tracing::info!(role = %session.role, "Active session resumed");
    }
}
