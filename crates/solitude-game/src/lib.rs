#![allow(clippy::too_many_arguments, clippy::float_cmp)]
// Game module — air strafing, sprint/reload hand logic and view-model overrides

pub mod g_local;
pub mod g_main;
pub mod g_scr;
pub mod p_weapon;
pub mod p_anim;
pub mod dispatch;
