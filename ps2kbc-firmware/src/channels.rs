//! State shared between the edge task and the foreground
//!
//! The link carries the mailbox, direction and error counters. The edge
//! gate stands in for masking the clock interrupt.

use ps2kbc_core::link::Link;
use ps2kbc_hal_rp2040::{EdgeGate, LineCell};
use static_cell::StaticCell;

/// Link state between the clock-edge handler and the foreground
pub static LINK: Link = Link::new();

/// Gate on the clock-edge task, closed while the foreground inhibits
pub static EDGE_GATE: EdgeGate = EdgeGate::new();

/// PS/2 data line, driven by both sides
pub static DATA_LINE: StaticCell<LineCell> = StaticCell::new();
