// q_shared.rs — foundational types and functions shared by all modules

// ============================================================
// Basic types
// ============================================================

pub type Vec3 = [f32; 3];

pub const VEC3_ORIGIN: Vec3 = [0.0, 0.0, 0.0];

// ============================================================
// Vector math
// ============================================================

#[inline]
pub fn dot_product(a: &Vec3, b: &Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn vector_subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn vector_add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn vector_scale(v: &Vec3, scale: f32) -> Vec3 {
    [v[0] * scale, v[1] * scale, v[2] * scale]
}

/// veca + scale * vecb
pub fn vector_ma(veca: &Vec3, scale: f32, vecb: &Vec3) -> Vec3 {
    [
        veca[0] + scale * vecb[0],
        veca[1] + scale * vecb[1],
        veca[2] + scale * vecb[2],
    ]
}

pub fn vector_length(v: &Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Normalize in place and return the original length.
/// A zero vector is left untouched and reports a length of 0.
pub fn vector_normalize(v: &mut Vec3) -> f32 {
    let length = vector_length(v);
    if length != 0.0 {
        let ilength = 1.0 / length;
        v[0] *= ilength;
        v[1] *= ilength;
        v[2] *= ilength;
    }
    length
}

// ============================================================
// Collision
// ============================================================

bitflags::bitflags! {
    /// Content bits used to build trace masks.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Contents: u32 {
        const SOLID          = 0x0000_0001;
        const GLASS          = 0x0000_0010;
        const WATER          = 0x0000_0020;
        const CANSHOOTCLIP   = 0x0000_0040;
        const MISSILECLIP    = 0x0000_0080;
        const ITEM           = 0x0000_0100;
        const VEHICLECLIP    = 0x0000_0200;
        const PLAYERCLIP     = 0x0001_0000;
        const MONSTERCLIP    = 0x0002_0000;
        const BODY           = 0x0200_0000;
        const CORPSE         = 0x0400_0000;
    }
}

pub const MASK_PLAYERSOLID: Contents = Contents::SOLID
    .union(Contents::GLASS)
    .union(Contents::PLAYERCLIP)
    .union(Contents::VEHICLECLIP)
    .union(Contents::BODY);

/// Axis-aligned box swept by a trace, relative to the trace origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub mins: Vec3,
    pub maxs: Vec3,
}

impl Bounds {
    pub const fn new(mins: Vec3, maxs: Vec3) -> Self {
        Self { mins, maxs }
    }
}

/// Result of sweeping a box through the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    /// Fraction of the requested motion completed; 1.0 means nothing was hit.
    pub fraction: f32,
    /// Normal of the impacted surface. Meaningless when `fraction == 1.0`.
    pub normal: Vec3,
}

impl Default for Trace {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            normal: VEC3_ORIGIN,
        }
    }
}

impl Trace {
    /// A trace that was stopped at `fraction` by a surface with `normal`.
    pub fn hit(fraction: f32, normal: Vec3) -> Self {
        Self { fraction, normal }
    }
}

// ============================================================
// User commands
// ============================================================

bitflags::bitflags! {
    /// usercmd button bits
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u32 {
        const ATTACK       = 0x0000_0001;
        const SPRINT       = 0x0000_0002;
        const MELEE        = 0x0000_0004;
        const ACTIVATE     = 0x0000_0008;
        const RELOAD       = 0x0000_0010;
        const USERELOAD    = 0x0000_0020;
        const LEAN_LEFT    = 0x0000_0040;
        const LEAN_RIGHT   = 0x0000_0080;
        const PRONE        = 0x0000_0100;
        const CROUCH       = 0x0000_0200;
        const GOSTAND      = 0x0000_0400;
        const ADS          = 0x0000_0800;
        const TEMP_ACTION  = 0x0000_1000;
        const HOLD_BREATH  = 0x0000_2000;
        const FRAG         = 0x0000_4000;
        const SMOKE        = 0x0000_8000;
        const NIGHTVISION  = 0x0004_0000;
    }
}

/// Opaque weapon handle. A zero handle means no weapon is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weapon(pub u32);

impl Weapon {
    pub const NONE: Weapon = Weapon(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCmd {
    pub server_time: i32,
    pub buttons: Buttons,
    pub weapon: Weapon,
    pub forwardmove: i8,
    pub rightmove: i8,
    /// Per-command random seed, passed through untouched.
    pub holdrand: u32,
}

// ============================================================
// Player state
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum PmType {
    #[default]
    Normal = 0,
    NormalLinked,
    Noclip,
    Ufo,
    Spectator,
    Intermission,
    LastStand,
    Dead,
    DeadLinked,
}

impl PmType {
    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, PmType::Dead | PmType::DeadLinked)
    }
}

bitflags::bitflags! {
    /// pm_flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PmFlags: u32 {
        const PRONE             = 0x0000_0001;
        const DUCKED            = 0x0000_0002;
        const MANTLE            = 0x0000_0004;
        const LADDER            = 0x0000_0008;
        const BACKWARDS_RUN     = 0x0000_0020;
        const WALKING           = 0x0000_0040;
        const TIME_HARDLANDING  = 0x0000_0080;
        const TIME_KNOCKBACK    = 0x0000_0100;
        const RESPAWNED         = 0x0000_0400;
        const FROZEN            = 0x0000_0800;
        const JUMPING           = 0x0000_4000;
        const SPRINTING         = 0x0000_8000;
        const SHELLSHOCKED      = 0x0001_0000;
        const MELEE_CHARGE      = 0x0002_0000;
        const NO_SPRINT         = 0x0004_0000;
        const NO_JUMP           = 0x0008_0000;
    }
}

bitflags::bitflags! {
    /// Presentation flags set on the player (overlays, view model suppression).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OtherFlags: u32 {
        const INVULNERABLE                 = 0x0000_0001;
        const REMOTE_EYES                  = 0x0000_0002;
        const LINKTO                       = 0x0000_0004;
        const THERMAL_VISION               = 0x0000_0010;
        const THERMAL_VISION_OVERLAY_FOF   = 0x0000_0020;
        const REMOTE_CAMERA_SOUNDS         = 0x0000_0040;
        const ALT_SCENE_REAR_VIEW          = 0x0000_0080;
        const PLAYER                       = 0x0000_0400;
    }
}

impl OtherFlags {
    /// Overlays under which the sprint-ending button check is bypassed.
    pub const SPRINT_OVERLAYS: OtherFlags = OtherFlags::PLAYER
        .union(OtherFlags::THERMAL_VISION_OVERLAY_FOF)
        .union(OtherFlags::THERMAL_VISION);
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Perks: u64 {
        const FASTRELOAD       = 1 << 0;
        const EXTRAAMMO        = 1 << 1;
        const QUICKDRAW        = 1 << 2;
        const LONGERSPRINT     = 1 << 3;
        const RESISTEXPLOSION  = 1 << 10;
        const MARATHON         = 1 << 11;
        const BALLCARRIER      = 1 << 27;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum WeaponHand {
    #[default]
    Right = 0,
    Left = 1,
}

pub const NUM_WEAPON_HANDS: usize = 2;

impl WeaponHand {
    pub const ALL: [WeaponHand; NUM_WEAPON_HANDS] = [WeaponHand::Right, WeaponHand::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Every hand from Right up to and including `last`.
    pub fn up_to(last: WeaponHand) -> impl Iterator<Item = WeaponHand> {
        Self::ALL.into_iter().take(last.index() + 1)
    }
}

/// Per-hand weapon state.
///
/// The numeric values are the ones exchanged with the host. Range membership
/// is only ever tested through the named predicates below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum WeaponState {
    #[default]
    Ready = 0,
    Raising = 1,
    RaisingAltSwitch = 2,
    Dropping = 3,
    DroppingQuick = 4,
    DroppingAlt = 5,
    Firing = 6,
    Rechambering = 7,
    Reloading = 8,
    ReloadingInterupt = 9,
    ReloadStart = 10,
    ReloadStartInterupt = 11,
    ReloadEnd = 12,
    MeleeWaitForResult = 13,
    MeleeFire = 14,
    MeleeEnd = 15,
    OffhandInit = 16,
    OffhandPrepare = 17,
    OffhandHold = 18,
    OffhandHoldPrimed = 19,
    OffhandFire = 20,
    OffhandDetonate = 21,
    OffhandEnd = 22,
    Detonating = 23,
    SprintRaise = 24,
    SprintLoop = 25,
    SprintDrop = 26,
    StunnedStart = 27,
    StunnedLoop = 28,
    StunnedEnd = 29,
    NightvisionWear = 30,
    NightvisionRemove = 31,
    BlastImpact = 32,
    HybridScopeIn = 33,
    HybridScopeOut = 34,
    HeatCooldownStart = 35,
    HeatCooldownEnd = 36,
}

impl WeaponState {
    const ALL: [WeaponState; 37] = [
        WeaponState::Ready,
        WeaponState::Raising,
        WeaponState::RaisingAltSwitch,
        WeaponState::Dropping,
        WeaponState::DroppingQuick,
        WeaponState::DroppingAlt,
        WeaponState::Firing,
        WeaponState::Rechambering,
        WeaponState::Reloading,
        WeaponState::ReloadingInterupt,
        WeaponState::ReloadStart,
        WeaponState::ReloadStartInterupt,
        WeaponState::ReloadEnd,
        WeaponState::MeleeWaitForResult,
        WeaponState::MeleeFire,
        WeaponState::MeleeEnd,
        WeaponState::OffhandInit,
        WeaponState::OffhandPrepare,
        WeaponState::OffhandHold,
        WeaponState::OffhandHoldPrimed,
        WeaponState::OffhandFire,
        WeaponState::OffhandDetonate,
        WeaponState::OffhandEnd,
        WeaponState::Detonating,
        WeaponState::SprintRaise,
        WeaponState::SprintLoop,
        WeaponState::SprintDrop,
        WeaponState::StunnedStart,
        WeaponState::StunnedLoop,
        WeaponState::StunnedEnd,
        WeaponState::NightvisionWear,
        WeaponState::NightvisionRemove,
        WeaponState::BlastImpact,
        WeaponState::HybridScopeIn,
        WeaponState::HybridScopeOut,
        WeaponState::HeatCooldownStart,
        WeaponState::HeatCooldownEnd,
    ];

    #[inline]
    pub fn raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(raw: i32) -> Option<WeaponState> {
        usize::try_from(raw).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Melee swing through the end of an offhand (grenade) throw.
    pub fn is_melee_or_offhand(self) -> bool {
        matches!(
            self,
            WeaponState::MeleeWaitForResult
                | WeaponState::MeleeFire
                | WeaponState::MeleeEnd
                | WeaponState::OffhandInit
                | WeaponState::OffhandPrepare
                | WeaponState::OffhandHold
                | WeaponState::OffhandHoldPrimed
                | WeaponState::OffhandFire
                | WeaponState::OffhandDetonate
                | WeaponState::OffhandEnd
        )
    }

    pub fn is_nightvision(self) -> bool {
        matches!(self, WeaponState::NightvisionWear | WeaponState::NightvisionRemove)
    }

    /// Blast impact through the start of a heat cooldown.
    pub fn is_blast_or_heat_scope(self) -> bool {
        matches!(
            self,
            WeaponState::BlastImpact
                | WeaponState::HybridScopeIn
                | WeaponState::HybridScopeOut
                | WeaponState::HeatCooldownStart
        )
    }

    pub fn is_sprint(self) -> bool {
        matches!(
            self,
            WeaponState::SprintRaise | WeaponState::SprintLoop | WeaponState::SprintDrop
        )
    }

    /// Raised into, or looping in, the sprint pose.
    pub fn is_sprint_held(self) -> bool {
        matches!(self, WeaponState::SprintRaise | WeaponState::SprintLoop)
    }

    /// Attack phases that hold off any sprint transition on either hand.
    pub fn is_attacking(self) -> bool {
        matches!(
            self,
            WeaponState::Firing
                | WeaponState::Rechambering
                | WeaponState::MeleeWaitForResult
                | WeaponState::MeleeFire
                | WeaponState::MeleeEnd
        )
    }

    /// Switch and offhand phases that hold off a sprint transition on the
    /// primary hand. Offhand fire and detonate do not.
    pub fn is_switching_or_offhand(self) -> bool {
        matches!(
            self,
            WeaponState::Raising
                | WeaponState::RaisingAltSwitch
                | WeaponState::Dropping
                | WeaponState::DroppingQuick
                | WeaponState::DroppingAlt
                | WeaponState::OffhandInit
                | WeaponState::OffhandPrepare
                | WeaponState::OffhandHold
                | WeaponState::OffhandHoldPrimed
                | WeaponState::OffhandEnd
        )
    }
}

/// Weapon animation files. A hand's `weap_anim` holds one of these,
/// optionally OR'd with `ANIM_TOGGLEBIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WeapAnim {
    Root = 0,
    Idle = 1,
    EmptyIdle = 2,
    Fire = 3,
    HoldFire = 4,
    LastShot = 5,
    Rechamber = 6,
    Melee = 7,
    MeleeCharge = 8,
    Reload = 9,
    ReloadEmpty = 10,
    ReloadStart = 11,
    ReloadEnd = 12,
    Raise = 13,
    FirstRaise = 14,
    Drop = 15,
    AltRaise = 16,
    AltDrop = 17,
    QuickRaise = 18,
    QuickDrop = 19,
    EmptyRaise = 20,
    EmptyDrop = 21,
    SprintIn = 22,
    SprintLoop = 23,
    SprintOut = 24,
    Detonate = 25,
    NightvisionWear = 26,
    NightvisionRemove = 27,
    SpeedReload = 28,
    FastReloadEnd = 29,
}

impl WeapAnim {
    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn toggled(self) -> i32 {
        self as i32 | ANIM_TOGGLEBIT
    }
}

/// Flipped to force an animation restart when the same id is set twice.
pub const ANIM_TOGGLEBIT: i32 = 0x1000;

/// Torso reload animation that survives the sprint-anim reset, keeping the
/// sprint-out pose on the third-person body during a wrist twist.
pub const TORSO_ANIM_WRIST_TWIST_RELOAD: i32 = 3181;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeaponHandState {
    pub weapon_state: WeaponState,
    /// Time left in the current state, in ms.
    pub weapon_time: i32,
    pub weapon_delay: i32,
    pub weap_anim: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeaponCommon {
    pub weapon: Weapon,
    pub last_weapon_hand: WeaponHand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SprintState {
    pub sprint_button_up_required: bool,
    pub last_sprint_start: i32,
    pub last_sprint_end: i32,
}

/// The part of a player's state touched by movement and weapon logic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub client_num: i32,
    pub pm_type: PmType,
    pub pm_flags: PmFlags,
    pub other_flags: OtherFlags,
    pub perks: Perks,
    pub origin: Vec3,
    pub velocity: Vec3,
    pub sprint_state: SprintState,
    pub weap_common: WeaponCommon,
    pub weap_state: [WeaponHandState; NUM_WEAPON_HANDS],
    pub torso_anim: i32,
}

impl PlayerState {
    #[inline]
    pub fn hand(&self, hand: WeaponHand) -> &WeaponHandState {
        &self.weap_state[hand.index()]
    }

    #[inline]
    pub fn hand_mut(&mut self, hand: WeaponHand) -> &mut WeaponHandState {
        &mut self.weap_state[hand.index()]
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.pm_type.is_dead()
    }

    #[inline]
    pub fn has_perk(&self, perk: Perks) -> bool {
        self.perks.contains(perk)
    }
}

// ============================================================
// Tests
// ============================================================
