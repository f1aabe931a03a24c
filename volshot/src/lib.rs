//! Image-to-volume adapter.
//!
//! Loads one grayscale picture per session and turns it into renderer inputs:
//! surface, contour and wireframe figure documents, plus pseudo-volume and
//! pseudo-time-series scenes for an external volume viewer.

pub mod config;
pub mod figure;
pub mod scene;
pub mod session;
pub mod viewer;

pub use session::{LoadedImage, Session, SessionError, SessionResult};

/// Initializes the logger.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. `RUST_LOG` takes precedence over `level`.
pub fn init_logger(level: &str) {
    use std::io::Write;

    _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}
