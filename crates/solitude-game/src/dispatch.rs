// dispatch.rs — Registered movement and weapon overrides
//
// The host calls these entry points in place of its own routines. Each one
// either adjusts the host's behavior or hands straight back to it.

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

use solitude_common::cvar::CvarContext;
use solitude_common::pmove::pm_air_move;

use crate::g_local::*;
use crate::g_main::movement_config_from_cvars;
use crate::p_anim::{self, WeapAnimRequest};
use crate::p_weapon::{self, WeaponRules};

/// Override table installed once at startup. Holds an immutable copy of the
/// movement config; rebuild it to pick up new cvar values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementOverrides {
    config: MovementConfig,
}

impl MovementOverrides {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    pub fn from_cvars(cvars: &CvarContext) -> Self {
        Self::new(movement_config_from_cvars(cvars))
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Whether the air move is replaced this session.
    pub fn strafing_enabled(&self) -> bool {
        self.config.strafing
    }

    /// Air move entry point.
    pub fn simulate_motion<H: PmoveHost + ?Sized>(&self, pm: &mut Pmove, pml: &mut PmLocal, host: &H) {
        pm_air_move(pm, pml, &self.config, host);
    }

    pub fn check_for_sprint<R: WeaponRules + ?Sized>(&self, pm: &mut Pmove, rules: &R) {
        p_weapon::check_for_sprint(pm, rules);
    }

    pub fn sprint_ending_buttons(&self, ps: &PlayerState, forward_speed: i8, buttons: Buttons) -> bool {
        p_weapon::sprint_ending_buttons(ps, forward_speed, buttons)
    }

    pub fn begin_weapon_change<F>(
        &self,
        pm: &mut Pmove,
        new_weapon: Weapon,
        is_new_alt: bool,
        quick: bool,
        holdrand: &mut u32,
        underlying: F,
    ) where
        F: FnOnce(&mut Pmove, Weapon, bool, bool, &mut u32),
    {
        p_anim::begin_weapon_change(pm, new_weapon, is_new_alt, quick, holdrand, underlying);
    }

    pub fn start_weapon_anim<F, R>(&self, ps: &PlayerState, request: WeapAnimRequest, underlying: F) -> R
    where
        F: FnOnce(WeapAnimRequest) -> R,
    {
        p_anim::start_weapon_anim(ps, request, underlying)
    }
}

// ============================================================
// Tests
// ============================================================
