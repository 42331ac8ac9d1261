#![allow(clippy::needless_range_loop, clippy::float_cmp)]

pub mod q_shared;
pub mod cvar;
pub mod pmove;
