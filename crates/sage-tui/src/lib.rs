//! Full-screen terminal chat client for the Sage health assistant.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::{attachment, chrome, input, sessions, transcript};
pub use runtime::TuiRuntime;
use sage_core::config::Config;
use sage_core::prefs;

/// Runs the interactive chat until the user quits.
///
/// Must be called from inside a multi-thread tokio runtime: the event loop
/// blocks its thread while effect tasks run on the others.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the configuration cannot
/// build an API client, or the terminal fails.
pub fn run_interactive_chat(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Chat mode requires a terminal.\n\
             Use `sage ask '...'` for non-interactive use."
        );
    }

    let theme = prefs::load_theme();
    tracing::info!(base_url = %config.effective_base_url(), ?theme, "starting chat");

    let mut runtime = TuiRuntime::new(config.clone(), theme)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
