// p_anim.rs — View-model animation continuity around sprints and weapon switches

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

use tracing::debug;

use crate::g_local::*;

/// Blend time used when a sprint-in is turned into a quick drop.
pub const SPRINT_GLIDE_TRANSITION: f32 = 0.5;

// ============================================================
// Weapon change stall
// ============================================================

/// Anim pair left behind by a one-handed empty switch. A weapon change from
/// this pair would snap the view model, so the anims are held.
fn is_empty_switch_pair(right: i32, left: i32) -> bool {
    let idle_toggled = WeapAnim::Idle.toggled();
    let empty = WeapAnim::EmptyIdle.id();
    (right == empty && left == idle_toggled) || (right == idle_toggled && left == empty)
}

/// Run the host's weapon change, then put both hands' anims back if the
/// player is mid-sprint so the sprint pose is not interrupted.
pub fn begin_weapon_change<F>(
    pm: &mut Pmove,
    new_weapon: Weapon,
    is_new_alt: bool,
    quick: bool,
    holdrand: &mut u32,
    underlying: F,
) where
    F: FnOnce(&mut Pmove, Weapon, bool, bool, &mut u32),
{
    let right_anim = pm.ps.hand(WeaponHand::Right).weap_anim;
    let left_anim = pm.ps.hand(WeaponHand::Left).weap_anim;
    let sprint = pm.ps.sprint_state;

    let stall_anim = pm.cmd.buttons.contains(Buttons::SPRINT)
        || sprint.last_sprint_start > sprint.last_sprint_end
        || is_empty_switch_pair(right_anim, left_anim);

    if stall_anim {
        debug!(
            client = pm.ps.client_num,
            right_anim,
            left_anim,
            weapon = new_weapon.0,
            "stalling weapon change anims"
        );
    }

    underlying(pm, new_weapon, is_new_alt, quick, holdrand);

    if stall_anim {
        pm.ps.hand_mut(WeaponHand::Right).weap_anim = right_anim;
        pm.ps.hand_mut(WeaponHand::Left).weap_anim = left_anim;
    }
}

// ============================================================
// Weapon anim start
// ============================================================

/// One request to start a view-model animation on a hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeapAnimRequest {
    pub weapon: Weapon,
    pub hand: WeaponHand,
    pub blend_in: WeapAnim,
    pub blend_out: WeapAnim,
    pub transition_time: f32,
}

/// Anims a sprint glide may start from. Compared exactly, toggle bit allowed.
fn is_glide_source(anim: i32) -> bool {
    anim == WeapAnim::Idle.id()
        || anim == WeapAnim::FastReloadEnd.id()
        || anim == WeapAnim::Idle.toggled()
        || anim == WeapAnim::FastReloadEnd.toggled()
}

/// Adjust a weapon anim request so a sprint started from idle glides into a
/// quick drop, then hand it to the host.
pub fn start_weapon_anim<F, R>(ps: &PlayerState, mut request: WeapAnimRequest, underlying: F) -> R
where
    F: FnOnce(WeapAnimRequest) -> R,
{
    let sprint = ps.sprint_state;
    let should_sprint = sprint.last_sprint_start < sprint.last_sprint_end;
    let from_glide_source = is_glide_source(ps.hand(request.hand).weap_anim);

    if matches!(request.blend_out, WeapAnim::QuickRaise | WeapAnim::Raise)
        && from_glide_source
        && should_sprint
    {
        debug!(
            hand = ?request.hand,
            blend_out = request.blend_out.id(),
            blend_in = request.blend_in.id(),
            "barrel roll"
        );
    }

    if matches!(request.blend_out, WeapAnim::SprintIn | WeapAnim::SprintLoop)
        && from_glide_source
        && should_sprint
    {
        request.blend_out = WeapAnim::QuickDrop;
        request.transition_time = SPRINT_GLIDE_TRANSITION;
    }

    underlying(request)
}

// ============================================================
// Tests
// ============================================================
