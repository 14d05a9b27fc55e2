//! Line protocol: turn header, move-line history, keep-alive marker
//!
//! All input is whitespace-separated ASCII integers. Malformed input aborts
//! with a diagnostic on stderr and no move is emitted; the committed history
//! itself is applied without legality validation (the platform is the
//! source of truth).

use amazons_core::Move;
use anyhow::Context;
use std::io::BufRead;

/// Emitted on its own line after each move in keep-alive mode
pub const KEEP_RUNNING_MARKER: &str = ">>>KEEP_RUNNING<<<";

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Read the 1-based turn header. `None` means the stream ended before a
/// header arrived (a normal no-op invocation).
pub fn read_turn_id<R: BufRead>(input: &mut R) -> anyhow::Result<Option<u32>> {
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id: u32 = line
            .parse()
            .with_context(|| format!("turn header {:?} is not a positive integer", line))?;
        anyhow::ensure!(id >= 1, "turn header must be positive, got {}", id);
        return Ok(Some(id));
    }
}

/// Read the `2 * turn_id - 1` committed history lines
pub fn read_history<R: BufRead>(input: &mut R, turn_id: u32) -> anyhow::Result<Vec<Move>> {
    let count = 2 * turn_id as usize - 1;
    let mut history = Vec::with_capacity(count);
    for i in 0..count {
        let line = read_line(input)?
            .with_context(|| format!("input ended after {} of {} history lines", i, count))?;
        let mv = Move::parse_line(&line).with_context(|| format!("history line {}", i + 1))?;
        history.push(mv);
    }
    Ok(history)
}

/// Read one opponent move in keep-alive mode; `None` on end of stream
pub fn read_move_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<Move>> {
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    Ok(Some(
        Move::parse_line(&line).context("keep-alive move line")?,
    ))
}
