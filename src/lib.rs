//! pcxview - ZSoft PCX decoding for the image viewer
//!
//! The viewer front end opens a file through [`pcx::PcxReader`] and displays
//! the decoded RGB image, the header fields and the palette.

pub mod color;
pub mod config;
pub mod pcx;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("pcxview initializing...");
    }
}
