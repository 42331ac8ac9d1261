// g_main.rs — Movement cvar registration and config snapshots

/*
Copyright (C) 1997-2001 Id Software, Inc.

This program is free software; you can redistribute it and/or
modify it under the terms of the GNU General Public License
as published by the Free Software Foundation; either version 2
of the License, or (at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program; if not, write to the Free Software
Foundation, Inc., 59 Temple Place - Suite 330, Boston, MA  02111-1307, USA.
*/

use solitude_common::cvar::{CvarContext, CvarError, CvarFlags};
use solitude_common::pmove::{
    PM_CS_AIRACCELERATE_DEFAULT, PM_CS_AIRSPEEDCAP_DEFAULT, PM_CS_MAX, PM_CS_MIN,
};
use tracing::debug;

use crate::g_local::*;

pub const CVAR_AIR_ACCELERATE: &str = "pm_cs_airAccelerate";
pub const CVAR_AIR_SPEED_CAP: &str = "pm_cs_airSpeedCap";
pub const CVAR_STRAFING: &str = "pm_cs_strafing";

const MOVEMENT_CVAR_FLAGS: CvarFlags = CvarFlags::REPLICATED.union(CvarFlags::CHEAT);

// ============================================================
// Registration
// ============================================================

/// Register the air strafing variables. Safe to call again on map change.
pub fn init_movement_cvars(cvars: &mut CvarContext) -> Result<(), CvarError> {
    cvars.register_float(
        CVAR_AIR_ACCELERATE,
        PM_CS_AIRACCELERATE_DEFAULT,
        PM_CS_MIN,
        PM_CS_MAX,
        MOVEMENT_CVAR_FLAGS,
        "Defines player acceleration mid-air",
    )?;
    cvars.register_float(
        CVAR_AIR_SPEED_CAP,
        PM_CS_AIRSPEEDCAP_DEFAULT,
        PM_CS_MIN,
        PM_CS_MAX,
        MOVEMENT_CVAR_FLAGS,
        "Maximum speed mid-air",
    )?;
    cvars.register_bool(
        CVAR_STRAFING,
        false,
        MOVEMENT_CVAR_FLAGS,
        "Enable CS like strafing",
    )?;
    Ok(())
}

// ============================================================
// Snapshots
// ============================================================

/// Build the movement config from the current cvar values. Unregistered
/// variables fall back to their defaults.
pub fn movement_config_from_cvars(cvars: &CvarContext) -> MovementConfig {
    let defaults = MovementConfig::default();
    MovementConfig {
        air_accelerate: cvars
            .value(CVAR_AIR_ACCELERATE)
            .map_or(defaults.air_accelerate, |v| v.as_float()),
        air_speed_cap: cvars
            .value(CVAR_AIR_SPEED_CAP)
            .map_or(defaults.air_speed_cap, |v| v.as_float()),
        strafing: cvars
            .value(CVAR_STRAFING)
            .map_or(defaults.strafing, |v| v.as_bool()),
    }
}

/// Called between frames. Rebuilds `config` if any movement variable
/// changed and reports whether it did.
pub fn refresh_movement_config(cvars: &mut CvarContext, config: &mut MovementConfig) -> bool {
    let changed = cvars.check_modified();
    let touched = changed.iter().any(|name| {
        name == CVAR_AIR_ACCELERATE || name == CVAR_AIR_SPEED_CAP || name == CVAR_STRAFING
    });
    if !touched {
        return false;
    }

    *config = movement_config_from_cvars(cvars);
    debug!(?config, "movement config refreshed");
    true
}

// ============================================================
// Tests
// ============================================================
