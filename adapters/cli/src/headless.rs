//! Line-oriented driver used when no window is requested.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rover_rendering::{command_for_key, status_line};
use rover_world::query;
use tracing::warn;

use crate::session::Session;

/// Reads command keys from `input` and reports the rover after each one.
///
/// Whitespace is ignored, so `f f r` and `ffr` drive the same route.
pub(crate) fn run<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", query::welcome_banner(session.world()))?;
    writeln!(
        output,
        "{} obstacles placed; keys: f forward, b backward, l left, r right",
        query::obstacles(session.world()).len()
    )?;
    writeln!(output, "{}", status_line(&session.state()))?;

    for line in input.lines() {
        let line = line.context("failed to read command input")?;
        for key in line.chars().filter(|key| !key.is_whitespace()) {
            let Some(command) = command_for_key(key) else {
                warn!(%key, "ignoring unbound key");
                writeln!(output, "unknown command key {key:?}")?;
                continue;
            };

            let _ = session.submit(command);
            if let Some(notice) = session.notification() {
                writeln!(output, "{notice}")?;
            }
            writeln!(output, "{}", status_line(&session.state()))?;
        }
    }

    output.flush().context("failed to flush output")?;
    Ok(())
}
