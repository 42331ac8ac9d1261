// g_scr.rs — Script methods on player entities

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

use thiserror::Error;
use tracing::debug;

use crate::g_local::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("invalid entity")]
    InvalidEntity,
    #[error("not a player entity")]
    NotAPlayer,
}

/// Resolve a script entity reference to its client index.
fn script_client(ctx: &GameContext, entref: ScrEntRef) -> Result<usize, ScriptError> {
    if entref.classnum != ClassNum::Entity as u32 {
        return Err(ScriptError::InvalidEntity);
    }

    let ent = ctx
        .edicts
        .get(usize::from(entref.entnum))
        .ok_or(ScriptError::InvalidEntity)?;
    if !ent.inuse {
        return Err(ScriptError::InvalidEntity);
    }

    match ent.client {
        Some(idx) if idx < ctx.clients.len() => Ok(idx),
        _ => Err(ScriptError::NotAPlayer),
    }
}

/// `player forceplayweapanim(<anim>, [both hands])`
///
/// Writes the raw anim id into the right hand, and the left hand too when
/// `both_hands` is set. Nothing is touched on error.
pub fn force_play_weap_anim(
    ctx: &mut GameContext,
    entref: ScrEntRef,
    anim_id: i32,
    both_hands: bool,
) -> Result<(), ScriptError> {
    let idx = script_client(ctx, entref)?;
    let ps = &mut ctx.clients[idx].ps;

    ps.hand_mut(WeaponHand::Right).weap_anim = anim_id;
    if both_hands {
        ps.hand_mut(WeaponHand::Left).weap_anim = anim_id;
    }

    debug!(entnum = entref.entnum, anim_id, both_hands, "forceplayweapanim");
    Ok(())
}

// ============================================================
// Tests
// ============================================================
