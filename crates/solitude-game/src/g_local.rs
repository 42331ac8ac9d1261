// g_local.rs — Local definitions for game module

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

// Re-export shared items so game files can reach them via `use crate::g_local::*`
pub use solitude_common::pmove::{MovementConfig, PmLocal, Pmove, PmoveHost};
pub use solitude_common::q_shared::*;

pub const MAX_CLIENTS: usize = 18;

// ============================================================
// Entities
// ============================================================

/// Script-side class numbers for entity references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ClassNum {
    #[default]
    Entity = 0,
    HudElem = 1,
    PathNode = 2,
    VehicleNode = 3,
    VehicleCorpse = 4,
}

/// Entity reference handed to script methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrEntRef {
    pub entnum: u16,
    pub classnum: u32,
}

impl ScrEntRef {
    pub fn entity(entnum: u16) -> Self {
        Self {
            entnum,
            classnum: ClassNum::Entity as u32,
        }
    }
}

/// Game-side client. Only what movement and weapon logic need.
#[derive(Debug, Clone, Default)]
pub struct GClient {
    pub ps: PlayerState,
}

#[derive(Debug, Clone, Default)]
pub struct Edict {
    pub classname: String,
    pub inuse: bool,
    pub client: Option<usize>, // index into clients array, None if not a player
}

/// Entities and clients for one game session.
#[derive(Debug, Default)]
pub struct GameContext {
    pub edicts: Vec<Edict>,
    pub clients: Vec<GClient>,
}

impl GameContext {
    /// A context whose first `num_clients` edicts are player slots.
    pub fn new(num_clients: usize) -> Self {
        let num_clients = num_clients.min(MAX_CLIENTS);
        let edicts = (0..num_clients)
            .map(|i| Edict {
                classname: "player".to_string(),
                inuse: true,
                client: Some(i),
            })
            .collect();
        Self {
            edicts,
            clients: vec![GClient::default(); num_clients],
        }
    }

    /// Append a non-player entity and return its number.
    pub fn spawn(&mut self, classname: &str) -> usize {
        self.edicts.push(Edict {
            classname: classname.to_string(),
            inuse: true,
            client: None,
        });
        self.edicts.len() - 1
    }
}

// ============================================================
// Tests
// ============================================================
