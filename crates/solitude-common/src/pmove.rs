// pmove.rs — Air movement with counter-strafe style acceleration
//
// Runs in place of the host's air move when `MovementConfig::strafing` is
// set. Shared by server and client prediction, so every step must be
// bit-reproducible from the same inputs.

use tracing::trace;

use crate::q_shared::{
    dot_product, vector_length, vector_ma, vector_normalize, vector_scale, vector_subtract,
    Bounds, Contents, PlayerState, Trace, UserCmd, Vec3, MASK_PLAYERSOLID, VEC3_ORIGIN,
};

// ============================================================
// Constants
// ============================================================

/// Hard ceiling on the requested air speed.
pub const PM_MAX_WISHSPEED: f32 = 320.0;

/// Surfaces with a normal z above this are walkable and never clipped here.
pub const PM_SURF_SLOPE: f32 = 0.7;

pub const PM_CS_AIRACCELERATE_DEFAULT: f32 = 100.0;
pub const PM_CS_AIRSPEEDCAP_DEFAULT: f32 = 30.0;
pub const PM_CS_MIN: f32 = 1.0;
pub const PM_CS_MAX: f32 = 500.0;

// ============================================================
// Configuration
// ============================================================

/// Tuning values for the alternate air move. Built once from the cvar
/// registry and handed to the movement entry points; never mutated mid-tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Acceleration scalar in air.
    pub air_accelerate: f32,
    /// Maximum speed contribution from air acceleration.
    pub air_speed_cap: f32,
    /// Enables the alternate air move. When false the host's air move runs.
    pub strafing: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            air_accelerate: PM_CS_AIRACCELERATE_DEFAULT,
            air_speed_cap: PM_CS_AIRSPEEDCAP_DEFAULT,
            strafing: false,
        }
    }
}

// ============================================================
// Pmove data
// ============================================================

/// Everything one player's move reads and writes during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmove {
    pub ps: PlayerState,
    pub cmd: UserCmd,
    pub oldcmd: UserCmd,
    pub bounds: Bounds,
    pub tracemask: Contents,
}

impl Default for Pmove {
    fn default() -> Self {
        Self {
            ps: PlayerState::default(),
            cmd: UserCmd::default(),
            oldcmd: UserCmd::default(),
            bounds: Bounds::new([-15.0, -15.0, 0.0], [15.0, 15.0, 70.0]),
            tracemask: MASK_PLAYERSOLID,
        }
    }
}

/// Per-move locals computed by the host before the air move runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PmLocal {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub frametime: f32,
    pub msec: i32,
}

// ============================================================
// Host trait — the world and the host's own movement steps
// ============================================================

pub trait PmoveHost {
    /// Sweep `bounds` from `start` to `end`, ignoring `pass_entity`.
    fn trace(
        &self,
        start: &Vec3,
        end: &Vec3,
        bounds: &Bounds,
        pass_entity: i32,
        content_mask: Contents,
    ) -> Trace;

    /// The host's step-slide move. Always runs before the supplementary clip.
    fn step_slide_move(&self, pm: &mut Pmove, pml: &mut PmLocal, gravity: bool, step: bool);

    /// The host's unmodified air move, used when strafing is disabled.
    fn default_air_move(&self, pm: &mut Pmove, pml: &mut PmLocal);
}

// ============================================================
// Internal functions
// ============================================================

/// Project `inv` onto the surface with `normal`.
///
/// With an overbounce of 1.0 the into-surface component is removed exactly;
/// any component still pointing into the surface afterwards is removed again.
pub fn pm_clip_velocity(inv: &Vec3, normal: &Vec3, overbounce: f32) -> Vec3 {
    let backoff = dot_product(inv, normal) * overbounce;
    let mut out: Vec3 = [0.0; 3];
    for i in 0..3 {
        let change = normal[i] * backoff;
        out[i] = inv[i] - change;
    }

    let adjust = dot_product(&out, normal);
    if adjust < 0.0 {
        let reduce = vector_scale(normal, adjust);
        out = vector_subtract(&out, &reduce);
    }
    out
}

/// Scale `wishvel` down to `PM_MAX_WISHSPEED` if needed and return the
/// resulting wish speed.
pub fn pm_cap_wish_speed(wishvel: &mut Vec3, wishspeed: f32) -> f32 {
    if wishspeed != 0.0 && wishspeed > PM_MAX_WISHSPEED {
        *wishvel = vector_scale(wishvel, PM_MAX_WISHSPEED / wishspeed);
        return PM_MAX_WISHSPEED;
    }
    wishspeed
}

/// Flatten the view basis and build the requested velocity.
/// Returns `(wishvel, wishdir, wishspeed)`.
pub fn pm_wish_velocity(pml: &mut PmLocal, cmd: &UserCmd) -> (Vec3, Vec3, f32) {
    let fmove = cmd.forwardmove as f32;
    let smove = cmd.rightmove as f32;

    pml.forward[2] = 0.0;
    pml.right[2] = 0.0;
    vector_normalize(&mut pml.forward);
    vector_normalize(&mut pml.right);

    let mut wishvel: Vec3 = [0.0; 3];
    for i in 0..2 {
        wishvel[i] = pml.forward[i] * fmove + pml.right[i] * smove;
    }
    wishvel[2] = 0.0;

    let mut wishdir = wishvel;
    let wishspeed = vector_normalize(&mut wishdir);
    let wishspeed = pm_cap_wish_speed(&mut wishvel, wishspeed);

    (wishvel, wishdir, wishspeed)
}

/// Accelerate towards `wishdir`. The gain is capped by `air_speed_cap`
/// along `wishdir`, but scales with the uncapped `wishspeed`.
pub fn pm_air_accelerate(
    wishdir: &Vec3,
    wishspeed: f32,
    ps: &mut PlayerState,
    pml: &PmLocal,
    config: &MovementConfig,
) {
    let accel = config.air_accelerate;
    let wishspd = if wishspeed > config.air_speed_cap {
        config.air_speed_cap
    } else {
        wishspeed
    };

    let currentspeed = dot_product(&ps.velocity, wishdir);
    let addspeed = wishspd - currentspeed;
    if addspeed <= 0.0 {
        return;
    }

    let mut accelspeed = pml.frametime * accel * wishspeed;
    if accelspeed > addspeed {
        accelspeed = addspeed;
    }

    for i in 0..3 {
        ps.velocity[i] += wishdir[i] * accelspeed;
    }
}

/// Supplementary clip against steep surfaces for the rest of the frame.
pub fn pm_try_player_move<H: PmoveHost + ?Sized>(pm: &mut Pmove, pml: &PmLocal, host: &H) {
    let ps = &mut pm.ps;

    if vector_length(&ps.velocity) == 0.0 {
        return;
    }

    let end = vector_ma(&ps.origin, pml.frametime, &ps.velocity);
    let trace = host.trace(&ps.origin, &end, &pm.bounds, ps.client_num, pm.tracemask);

    if trace.fraction == 1.0 {
        return;
    }

    if trace.normal[2] > PM_SURF_SLOPE {
        return;
    }

    trace!(
        client = ps.client_num,
        fraction = trace.fraction,
        normal_z = trace.normal[2],
        "clipping air velocity"
    );
    ps.velocity = pm_clip_velocity(&ps.velocity, &trace.normal, 1.0);
}

// ============================================================
// Public API
// ============================================================

/// Air move for one tick.
///
/// With strafing disabled this is exactly the host's air move. Otherwise it
/// latches the sprint-button-up requirement, accelerates toward the
/// requested direction, runs the host's step-slide move and finally clips
/// velocity against any steep surface in the remaining path.
pub fn pm_air_move<H: PmoveHost + ?Sized>(
    pm: &mut Pmove,
    pml: &mut PmLocal,
    config: &MovementConfig,
    host: &H,
) {
    if !config.strafing {
        host.default_air_move(pm, pml);
        return;
    }

    pm.ps.sprint_state.sprint_button_up_required = true;

    let (_wishvel, wishdir, wishspeed) = pm_wish_velocity(pml, &pm.cmd);
    if wishdir != VEC3_ORIGIN {
        pm_air_accelerate(&wishdir, wishspeed, &mut pm.ps, pml, config);
    }

    host.step_slide_move(pm, pml, true, true);

    pm_try_player_move(pm, pml, host);
}

// ============================================================
// Unit tests
// ============================================================
