//! stubr - Automatic test-data stubbing driven by type descriptors
//!
//! Re-exports the resolution engine from `stubr-core` and adds the pieces a
//! test harness needs around it, such as log setup.
pub mod logging;

pub use stubr_core::*;

/// The strategy chain a test run should use
///
/// Reads the nearest `stubr.json` above `start`, falling back to the full
/// preset when there is none.
pub fn stubber_for(start: &std::path::Path) -> Result<Stubber> {
    let settings = match StubberSettings::find_settings_file(start) {
        Some(path) => StubberSettings::load(&path)?,
        None => StubberSettings::default(),
    };
    tracing::debug!("Using {} baseline", settings.baseline);
    Ok(settings.build())
}
