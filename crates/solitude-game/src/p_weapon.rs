// p_weapon.rs — Dual-hand sprint and reload transitions

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

use tracing::{debug, trace};

use crate::g_local::*;

// ============================================================
// Constants
// ============================================================

/// A reload pressed within this many ms of the last sprint ending goes to
/// the right hand.
pub const RIGHTY_TIGHTY_WINDOW: i32 = 50;

/// Forward move at or below this never ends a sprint raise.
pub const SPRINT_MIN_FORWARD_SPEED: i8 = 105;

/// Buttons that break a sprint before perk adjustments.
const SPRINT_ENDING_BUTTONS: u32 = 0xCF0D;

/// Buttons an explosive-resistance perk no longer counts as sprint breaking.
const RESISTEXPLOSION_KEPT_BUTTONS: u32 = 0x230;

const RELOAD_BUTTONS: Buttons = Buttons::RELOAD.union(Buttons::USERELOAD);

// ============================================================
// Host trait — weapon rules owned by the host
// ============================================================

pub trait WeaponRules {
    /// Whether `hand` may start a reload right now.
    fn allow_reload(&self, ps: &PlayerState, hand: WeaponHand) -> bool;

    /// Put `hand` into its reloading state.
    fn set_reloading_state(&self, ps: &mut PlayerState, hand: WeaponHand);

    /// Duration of the sprint-in animation, in ms.
    fn sprint_in_time(&self, weapon: Weapon, is_alternate: bool, left_last: bool) -> i32;

    /// Duration of the sprint-out animation, in ms.
    fn sprint_out_time(&self, weapon: Weapon, is_alternate: bool, left_last: bool) -> i32;

    /// Highest hand holding a weapon (Left when dual wielding).
    fn last_weapon_hand(&self, ps: &PlayerState) -> WeaponHand;
}

// ============================================================
// Button edges
// ============================================================

#[inline]
pub fn button_pressed(old: Buttons, new: Buttons, mask: Buttons) -> bool {
    !old.intersects(mask) && new.intersects(mask)
}

#[inline]
pub fn button_released(old: Buttons, new: Buttons, mask: Buttons) -> bool {
    old.intersects(mask) && !new.intersects(mask)
}

/// Rising edge on either reload button.
pub fn reload_pressed(pm: &Pmove) -> bool {
    button_pressed(pm.oldcmd.buttons, pm.cmd.buttons, Buttons::USERELOAD)
        || button_pressed(pm.oldcmd.buttons, pm.cmd.buttons, Buttons::RELOAD)
}

/// Falling edge on either reload button.
pub fn reload_released(pm: &Pmove) -> bool {
    button_released(pm.oldcmd.buttons, pm.cmd.buttons, Buttons::USERELOAD)
        || button_released(pm.oldcmd.buttons, pm.cmd.buttons, Buttons::RELOAD)
}

// ============================================================
// Reload hand arbitration
// ============================================================

/// Righty-tighty: a reload pressed right after a sprint goes to the right
/// hand when only the right hand can reload.
pub fn check_for_righty_tighty<R: WeaponRules + ?Sized>(pm: &mut Pmove, rules: &R) -> bool {
    if !reload_pressed(pm) {
        return false;
    }

    let sprint = &pm.ps.sprint_state;
    if sprint.last_sprint_end.wrapping_sub(sprint.last_sprint_start) >= RIGHTY_TIGHTY_WINDOW {
        return false;
    }

    if rules.allow_reload(&pm.ps, WeaponHand::Right)
        && !rules.allow_reload(&pm.ps, WeaponHand::Left)
    {
        rules.set_reloading_state(&mut pm.ps, WeaponHand::Right);
        debug!(client = pm.ps.client_num, "righty tighty");
        return true;
    }

    false
}

/// Wrist twist: releasing reload while only the left hand can reload starts
/// the left reload and pins the torso to the reload animation, so the
/// third-person body keeps its sprint-out pose.
pub fn check_for_wrist_twist<R: WeaponRules + ?Sized>(pm: &mut Pmove, rules: &R) -> bool {
    if !reload_released(pm) {
        return false;
    }

    if rules.allow_reload(&pm.ps, WeaponHand::Left)
        && !rules.allow_reload(&pm.ps, WeaponHand::Right)
    {
        rules.set_reloading_state(&mut pm.ps, WeaponHand::Left);
        pm.ps.torso_anim = TORSO_ANIM_WRIST_TWIST_RELOAD;
        debug!(client = pm.ps.client_num, "wrist twist");
        return true;
    }

    false
}

// ============================================================
// Sprint transitions
// ============================================================

fn set_sprint_state(ps: &mut PlayerState, hand: WeaponHand, state: WeaponState, time: i32, anim: WeapAnim) {
    let alive = ps.is_alive();
    let ws = ps.hand_mut(hand);
    ws.weapon_state = state;
    ws.weapon_time = time.max(0);
    ws.weapon_delay = 0;

    if alive {
        ws.weap_anim = (ws.weapon_state.raw() & ANIM_TOGGLEBIT) | anim.id();
    }
}

fn left_hand_last(ps: &PlayerState) -> bool {
    ps.weap_common.last_weapon_hand == WeaponHand::Left
}

pub fn sprint_drop<R: WeaponRules + ?Sized>(pm: &mut Pmove, rules: &R) {
    let last_hand = rules.last_weapon_hand(&pm.ps);

    for hand in WeaponHand::up_to(last_hand) {
        if hand == WeaponHand::Left && check_for_righty_tighty(pm, rules) {
            continue;
        }

        let left_last = left_hand_last(&pm.ps);
        let time = rules.sprint_out_time(pm.ps.weap_common.weapon, false, left_last);
        set_sprint_state(&mut pm.ps, hand, WeaponState::SprintDrop, time, WeapAnim::SpeedReload);
    }

    trace!(client = pm.ps.client_num, ?last_hand, "sprint drop");
}

pub fn sprint_raise<R: WeaponRules + ?Sized>(pm: &mut Pmove, rules: &R) {
    let last_hand = rules.last_weapon_hand(&pm.ps);

    for hand in WeaponHand::up_to(last_hand) {
        // a reload on the right hand may hand the last-hand slot back
        let left_last = left_hand_last(&pm.ps);
        let time = rules.sprint_in_time(pm.ps.weap_common.weapon, false, left_last);
        set_sprint_state(&mut pm.ps, hand, WeaponState::SprintRaise, time, WeapAnim::FastReloadEnd);

        // catch a reload edge that lands mid-raise
        if left_last {
            match hand {
                WeaponHand::Right => {
                    check_for_righty_tighty(pm, rules);
                }
                WeaponHand::Left => {
                    check_for_wrist_twist(pm, rules);
                }
            }
        }
    }

    trace!(client = pm.ps.client_num, ?last_hand, "sprint raise");
}

/// Start or end the sprint pose on both hands from the sprint flag.
pub fn check_for_sprint<R: WeaponRules + ?Sized>(pm: &mut Pmove, rules: &R) {
    if pm.cmd.weapon.is_none() {
        return;
    }

    let right = pm.ps.hand(WeaponHand::Right).weapon_state;
    let left = pm.ps.hand(WeaponHand::Left).weapon_state;

    if right.is_attacking() || left.is_attacking() || right.is_switching_or_offhand() {
        return;
    }

    let sprinting = pm.ps.pm_flags.contains(PmFlags::SPRINTING);
    if sprinting && !right.is_sprint() {
        sprint_raise(pm, rules);
    } else if !sprinting && right.is_sprint_held() {
        sprint_drop(pm, rules);
    }
}

/// Decide whether `buttons` end the current sprint. The result is handed
/// back to the host's sprint logic unchanged.
///
/// Holding only the fire-reload button during a left-handed sprint raise is
/// not treated as sprint ending, so a late usereload packet cannot cut a
/// wrist twist short.
pub fn sprint_ending_buttons(ps: &PlayerState, forward_speed: i8, buttons: Buttons) -> bool {
    if ps.other_flags.intersects(OtherFlags::SPRINT_OVERLAYS)
        || forward_speed <= SPRINT_MIN_FORWARD_SPEED
    {
        return true;
    }

    let ball_carrier = u32::from(ps.has_perk(Perks::BALLCARRIER));
    let base = SPRINT_ENDING_BUTTONS - ball_carrier;
    let mask = if ps.has_perk(Perks::RESISTEXPLOSION) {
        Buttons::from_bits_retain(base & !RESISTEXPLOSION_KEPT_BUTTONS) | RELOAD_BUTTONS
    } else {
        Buttons::from_bits_retain(base) | RELOAD_BUTTONS
    };

    let weapon_state = ps.hand(WeaponHand::Right).weapon_state;

    if mask.intersects(buttons) {
        if ps.weap_common.last_weapon_hand == WeaponHand::Left
            && !buttons.contains(Buttons::USERELOAD)
            && weapon_state == WeaponState::SprintRaise
        {
            return false;
        }
        return true;
    }

    weapon_state.is_melee_or_offhand()
        || weapon_state.is_nightvision()
        || weapon_state.is_blast_or_heat_scope()
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SPRINT_IN: i32 = 300;
    const SPRINT_OUT: i32 = 250;
    const RELOAD_TIME: i32 = 1500;

    /// Rules stub with fixed reload eligibility per hand.
    struct StubRules {
        allow_right: bool,
        allow_left: bool,
        dual_wield: bool,
    }

    impl StubRules {
        fn dual(allow_right: bool, allow_left: bool) -> Self {
            Self {
                allow_right,
                allow_left,
                dual_wield: true,
            }
        }
    }

    impl WeaponRules for StubRules {
        fn allow_reload(&self, _ps: &PlayerState, hand: WeaponHand) -> bool {
            match hand {
                WeaponHand::Right => self.allow_right,
                WeaponHand::Left => self.allow_left,
            }
        }

        fn set_reloading_state(&self, ps: &mut PlayerState, hand: WeaponHand) {
            let ws = ps.hand_mut(hand);
            ws.weapon_state = WeaponState::Reloading;
            ws.weapon_time = RELOAD_TIME;
            ws.weapon_delay = 0;
            ws.weap_anim = WeapAnim::Reload.id();
        }

        fn sprint_in_time(&self, _weapon: Weapon, _is_alternate: bool, _left_last: bool) -> i32 {
            SPRINT_IN
        }

        fn sprint_out_time(&self, _weapon: Weapon, _is_alternate: bool, left_last: bool) -> i32 {
            if left_last {
                SPRINT_OUT + 50
            } else {
                SPRINT_OUT
            }
        }

        fn last_weapon_hand(&self, _ps: &PlayerState) -> WeaponHand {
            if self.dual_wield {
                WeaponHand::Left
            } else {
                WeaponHand::Right
            }
        }
    }

    /// Rules stub with host-chosen sprint timings. A right-hand reload
    /// makes the right hand the last weapon hand again.
    struct TimedRules {
        sprint_in: i32,
        sprint_out: i32,
    }

    impl WeaponRules for TimedRules {
        fn allow_reload(&self, _ps: &PlayerState, hand: WeaponHand) -> bool {
            hand == WeaponHand::Right
        }

        fn set_reloading_state(&self, ps: &mut PlayerState, hand: WeaponHand) {
            ps.hand_mut(hand).weapon_state = WeaponState::Reloading;
            ps.weap_common.last_weapon_hand = WeaponHand::Right;
        }

        fn sprint_in_time(&self, _weapon: Weapon, _is_alternate: bool, left_last: bool) -> i32 {
            if left_last {
                self.sprint_in + 50
            } else {
                self.sprint_in
            }
        }

        fn sprint_out_time(&self, _weapon: Weapon, _is_alternate: bool, _left_last: bool) -> i32 {
            self.sprint_out
        }

        fn last_weapon_hand(&self, _ps: &PlayerState) -> WeaponHand {
            WeaponHand::Left
        }
    }

    fn armed_pm() -> Pmove {
        let mut pm = Pmove::default();
        pm.cmd.weapon = Weapon(12);
        pm.oldcmd.weapon = Weapon(12);
        pm.ps.weap_common.weapon = Weapon(12);
        pm.ps.sprint_state.last_sprint_start = 1000;
        pm.ps.sprint_state.last_sprint_end = 1020;
        pm
    }

    fn press(pm: &mut Pmove, buttons: Buttons) {
        pm.oldcmd.buttons = Buttons::empty();
        pm.cmd.buttons = buttons;
    }

    fn release(pm: &mut Pmove, buttons: Buttons) {
        pm.oldcmd.buttons = buttons;
        pm.cmd.buttons = Buttons::empty();
    }

    // ---- edges ----

    #[test]
    fn test_button_edges() {
        let m = Buttons::RELOAD;
        assert!(button_pressed(Buttons::empty(), Buttons::RELOAD, m));
        assert!(!button_pressed(Buttons::RELOAD, Buttons::RELOAD, m));
        assert!(!button_pressed(Buttons::empty(), Buttons::ATTACK, m));
        assert!(button_released(Buttons::RELOAD, Buttons::ATTACK, m));
        assert!(!button_released(Buttons::empty(), Buttons::empty(), m));
    }

    #[test]
    fn test_reload_edges_either_button() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::USERELOAD);
        assert!(reload_pressed(&pm));
        assert!(!reload_released(&pm));

        release(&mut pm, Buttons::RELOAD);
        assert!(reload_released(&pm));
        assert!(!reload_pressed(&pm));

        // swapping one reload button for the other is a press and a release
        pm.oldcmd.buttons = Buttons::RELOAD;
        pm.cmd.buttons = Buttons::USERELOAD;
        assert!(reload_pressed(&pm));
        assert!(reload_released(&pm));
    }

    // ---- righty tighty ----

    #[test]
    fn test_righty_tighty_routes_to_right_only() {
        for button in [Buttons::RELOAD, Buttons::USERELOAD] {
            let mut pm = armed_pm();
            pm.ps.hand_mut(WeaponHand::Left).weapon_state = WeaponState::SprintLoop;
            let left_before = *pm.ps.hand(WeaponHand::Left);
            press(&mut pm, button);

            assert!(check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));
            assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Reloading);
            assert_eq!(*pm.ps.hand(WeaponHand::Left), left_before);
        }
    }

    #[test]
    fn test_righty_tighty_window() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::RELOAD);
        pm.ps.sprint_state.last_sprint_end = pm.ps.sprint_state.last_sprint_start + 50;
        assert!(!check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));

        pm.ps.sprint_state.last_sprint_end = pm.ps.sprint_state.last_sprint_start + 49;
        assert!(check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));
    }

    #[test]
    fn test_righty_tighty_extreme_timestamps() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::RELOAD);
        pm.ps.sprint_state.last_sprint_start = -10;
        pm.ps.sprint_state.last_sprint_end = i32::MAX;
        // the gap wraps negative, inside the window
        assert!(check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));

        pm.ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::Ready;
        pm.ps.sprint_state.last_sprint_start = i32::MIN;
        pm.ps.sprint_state.last_sprint_end = i32::MIN + 49;
        assert!(check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));
    }

    #[test]
    fn test_righty_tighty_needs_rising_edge() {
        let mut pm = armed_pm();
        pm.oldcmd.buttons = Buttons::RELOAD;
        pm.cmd.buttons = Buttons::RELOAD;
        assert!(!check_for_righty_tighty(&mut pm, &StubRules::dual(true, false)));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Ready);
    }

    #[test]
    fn test_righty_tighty_ambiguous_eligibility() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::RELOAD);
        assert!(!check_for_righty_tighty(&mut pm, &StubRules::dual(true, true)));
        assert!(!check_for_righty_tighty(&mut pm, &StubRules::dual(false, true)));
        assert!(!check_for_righty_tighty(&mut pm, &StubRules::dual(false, false)));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Ready);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::Ready);
    }

    // ---- wrist twist ----

    #[test]
    fn test_wrist_twist_routes_to_left() {
        for button in [Buttons::RELOAD, Buttons::USERELOAD] {
            let mut pm = armed_pm();
            let right_before = *pm.ps.hand(WeaponHand::Right);
            release(&mut pm, button);

            assert!(check_for_wrist_twist(&mut pm, &StubRules::dual(false, true)));
            assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::Reloading);
            assert_eq!(pm.ps.torso_anim, TORSO_ANIM_WRIST_TWIST_RELOAD);
            assert_eq!(*pm.ps.hand(WeaponHand::Right), right_before);
        }
    }

    #[test]
    fn test_wrist_twist_needs_falling_edge() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::RELOAD);
        assert!(!check_for_wrist_twist(&mut pm, &StubRules::dual(false, true)));
        assert_eq!(pm.ps.torso_anim, 0);
    }

    #[test]
    fn test_wrist_twist_right_eligible_blocks() {
        let mut pm = armed_pm();
        release(&mut pm, Buttons::RELOAD);
        assert!(!check_for_wrist_twist(&mut pm, &StubRules::dual(true, true)));
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::Ready);
        assert_eq!(pm.ps.torso_anim, 0);
    }

    // ---- sprint raise / drop ----

    #[test]
    fn test_sprint_flag_raises_once() {
        let mut pm = armed_pm();
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        let rules = StubRules::dual(false, false);

        check_for_sprint(&mut pm, &rules);
        for hand in WeaponHand::ALL {
            let ws = pm.ps.hand(hand);
            assert_eq!(ws.weapon_state, WeaponState::SprintRaise);
            assert_eq!(ws.weapon_time, SPRINT_IN);
            assert_eq!(ws.weapon_delay, 0);
            assert_eq!(ws.weap_anim, WeapAnim::FastReloadEnd.id());
        }

        // already raised: a second tick with the flag still set is a no-op
        pm.ps.hand_mut(WeaponHand::Right).weapon_time = 120;
        check_for_sprint(&mut pm, &rules);
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_time, 120);
    }

    #[test]
    fn test_sprint_flag_clear_drops_once() {
        let rules = StubRules::dual(false, false);
        for held in [WeaponState::SprintRaise, WeaponState::SprintLoop] {
            let mut pm = armed_pm();
            pm.ps.hand_mut(WeaponHand::Right).weapon_state = held;
            pm.ps.hand_mut(WeaponHand::Left).weapon_state = held;

            check_for_sprint(&mut pm, &rules);
            for hand in WeaponHand::ALL {
                let ws = pm.ps.hand(hand);
                assert_eq!(ws.weapon_state, WeaponState::SprintDrop);
                assert_eq!(ws.weapon_time, SPRINT_OUT);
                assert_eq!(ws.weap_anim, WeapAnim::SpeedReload.id());
            }

            pm.ps.hand_mut(WeaponHand::Right).weapon_time = 10;
            check_for_sprint(&mut pm, &rules);
            assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_time, 10);
        }
    }

    #[test]
    fn test_sprint_single_hand_leaves_left_alone() {
        let mut pm = armed_pm();
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        let rules = StubRules {
            allow_right: false,
            allow_left: false,
            dual_wield: false,
        };
        check_for_sprint(&mut pm, &rules);
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::SprintRaise);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::Ready);
    }

    #[test]
    fn test_sprint_out_time_uses_last_hand() {
        let mut pm = armed_pm();
        pm.ps.weap_common.last_weapon_hand = WeaponHand::Left;
        pm.ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::SprintLoop;
        check_for_sprint(&mut pm, &StubRules::dual(false, false));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_time, SPRINT_OUT + 50);
    }

    #[test]
    fn test_sprint_dead_player_keeps_anims() {
        let mut pm = armed_pm();
        pm.ps.pm_type = PmType::Dead;
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        pm.ps.hand_mut(WeaponHand::Right).weap_anim = WeapAnim::Idle.id();
        pm.ps.hand_mut(WeaponHand::Left).weap_anim = WeapAnim::EmptyIdle.id();

        check_for_sprint(&mut pm, &StubRules::dual(false, false));

        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::SprintRaise);
        assert_eq!(pm.ps.hand(WeaponHand::Right).weap_anim, WeapAnim::Idle.id());
        assert_eq!(pm.ps.hand(WeaponHand::Left).weap_anim, WeapAnim::EmptyIdle.id());
    }

    #[test]
    fn test_sprint_drop_dead_player_keeps_anims() {
        for pm_type in [PmType::Dead, PmType::DeadLinked] {
            let mut pm = armed_pm();
            pm.ps.pm_type = pm_type;
            for hand in WeaponHand::ALL {
                pm.ps.hand_mut(hand).weapon_state = WeaponState::SprintRaise;
            }
            pm.ps.hand_mut(WeaponHand::Right).weap_anim = WeapAnim::SprintLoop.id();
            pm.ps.hand_mut(WeaponHand::Left).weap_anim = WeapAnim::SprintLoop.toggled();

            check_for_sprint(&mut pm, &StubRules::dual(false, false));

            for hand in WeaponHand::ALL {
                assert_eq!(pm.ps.hand(hand).weapon_state, WeaponState::SprintDrop, "{pm_type:?}");
                assert_eq!(pm.ps.hand(hand).weapon_time, SPRINT_OUT);
            }
            assert_eq!(pm.ps.hand(WeaponHand::Right).weap_anim, WeapAnim::SprintLoop.id());
            assert_eq!(pm.ps.hand(WeaponHand::Left).weap_anim, WeapAnim::SprintLoop.toggled());
        }
    }

    #[test]
    fn test_sprint_negative_host_times_clamped() {
        let rules = TimedRules {
            sprint_in: -40,
            sprint_out: -15,
        };
        let mut pm = armed_pm();
        for hand in WeaponHand::ALL {
            pm.ps.hand_mut(hand).weapon_delay = 30;
        }

        pm.ps.pm_flags |= PmFlags::SPRINTING;
        check_for_sprint(&mut pm, &rules);
        for hand in WeaponHand::ALL {
            let ws = pm.ps.hand(hand);
            assert_eq!(ws.weapon_state, WeaponState::SprintRaise);
            assert_eq!(ws.weapon_time, 0);
            assert_eq!(ws.weapon_delay, 0);
        }

        for hand in WeaponHand::ALL {
            pm.ps.hand_mut(hand).weapon_delay = 30;
        }
        pm.ps.pm_flags.remove(PmFlags::SPRINTING);
        check_for_sprint(&mut pm, &rules);
        for hand in WeaponHand::ALL {
            let ws = pm.ps.hand(hand);
            assert_eq!(ws.weapon_state, WeaponState::SprintDrop);
            assert_eq!(ws.weapon_time, 0);
            assert_eq!(ws.weapon_delay, 0);
        }
    }

    #[test]
    fn test_sprint_raise_rereads_last_hand() {
        let rules = TimedRules {
            sprint_in: 300,
            sprint_out: 250,
        };
        let mut pm = armed_pm();
        pm.ps.weap_common.last_weapon_hand = WeaponHand::Left;
        press(&mut pm, Buttons::RELOAD);

        sprint_raise(&mut pm, &rules);

        // right raised while left was last, then reloaded and took the slot
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Reloading);
        assert_eq!(pm.ps.weap_common.last_weapon_hand, WeaponHand::Right);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::SprintRaise);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_time, 300);
    }

    #[test]
    fn test_sprint_blocked_without_weapon() {
        let mut pm = armed_pm();
        pm.cmd.weapon = Weapon::NONE;
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        check_for_sprint(&mut pm, &StubRules::dual(false, false));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Ready);
    }

    #[test]
    fn test_sprint_blocked_by_attack_on_either_hand() {
        for state in [
            WeaponState::Firing,
            WeaponState::Rechambering,
            WeaponState::MeleeWaitForResult,
            WeaponState::MeleeFire,
            WeaponState::MeleeEnd,
        ] {
            let mut pm = armed_pm();
            pm.ps.pm_flags |= PmFlags::SPRINTING;
            pm.ps.hand_mut(WeaponHand::Left).weapon_state = state;
            check_for_sprint(&mut pm, &StubRules::dual(false, false));
            assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Ready, "{state:?}");
        }
    }

    #[test]
    fn test_sprint_blocked_by_right_switching() {
        let mut pm = armed_pm();
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        pm.ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::DroppingQuick;
        check_for_sprint(&mut pm, &StubRules::dual(false, false));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::DroppingQuick);

        // the same phase on the left hand does not block
        let mut pm = armed_pm();
        pm.ps.pm_flags |= PmFlags::SPRINTING;
        pm.ps.hand_mut(WeaponHand::Left).weapon_state = WeaponState::DroppingQuick;
        check_for_sprint(&mut pm, &StubRules::dual(false, false));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::SprintRaise);
    }

    #[test]
    fn test_sprint_drop_not_after_sprint_drop() {
        let mut pm = armed_pm();
        pm.ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::SprintDrop;
        pm.ps.hand_mut(WeaponHand::Right).weapon_time = 40;
        check_for_sprint(&mut pm, &StubRules::dual(false, false));
        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_time, 40);
    }

    #[test]
    fn test_sprint_drop_righty_tighty_skips_left() {
        let mut pm = armed_pm();
        pm.ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::SprintLoop;
        pm.ps.hand_mut(WeaponHand::Left).weapon_state = WeaponState::SprintLoop;
        pm.ps.hand_mut(WeaponHand::Left).weapon_time = 77;
        press(&mut pm, Buttons::RELOAD);

        sprint_drop(&mut pm, &StubRules::dual(true, false));

        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Reloading);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::SprintLoop);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_time, 77);
    }

    #[test]
    fn test_sprint_raise_left_last_wrist_twist() {
        let mut pm = armed_pm();
        pm.ps.weap_common.last_weapon_hand = WeaponHand::Left;
        release(&mut pm, Buttons::USERELOAD);

        sprint_raise(&mut pm, &StubRules::dual(false, true));

        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::SprintRaise);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::Reloading);
        assert_eq!(pm.ps.torso_anim, TORSO_ANIM_WRIST_TWIST_RELOAD);
    }

    #[test]
    fn test_sprint_raise_left_last_righty_tighty() {
        let mut pm = armed_pm();
        pm.ps.weap_common.last_weapon_hand = WeaponHand::Left;
        press(&mut pm, Buttons::RELOAD);

        sprint_raise(&mut pm, &StubRules::dual(true, false));

        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::Reloading);
        assert_eq!(pm.ps.hand(WeaponHand::Left).weapon_state, WeaponState::SprintRaise);
    }

    #[test]
    fn test_sprint_raise_right_last_skips_arbitration() {
        let mut pm = armed_pm();
        press(&mut pm, Buttons::RELOAD);

        sprint_raise(&mut pm, &StubRules::dual(true, false));

        assert_eq!(pm.ps.hand(WeaponHand::Right).weapon_state, WeaponState::SprintRaise);
    }

    // ---- sprint ending buttons ----

    fn sprinting_ps() -> PlayerState {
        PlayerState::default()
    }

    #[test]
    fn test_sprint_ending_overlay_or_slow() {
        let mut ps = sprinting_ps();
        assert!(sprint_ending_buttons(&ps, 105, Buttons::empty()));
        assert!(sprint_ending_buttons(&ps, -127, Buttons::empty()));

        ps.other_flags = OtherFlags::THERMAL_VISION;
        assert!(sprint_ending_buttons(&ps, 127, Buttons::empty()));
    }

    #[test]
    fn test_sprint_ending_breaking_buttons() {
        let ps = sprinting_ps();
        for button in [
            Buttons::ATTACK,
            Buttons::MELEE,
            Buttons::CROUCH,
            Buttons::ADS,
            Buttons::FRAG,
            Buttons::RELOAD,
            Buttons::USERELOAD,
        ] {
            assert!(sprint_ending_buttons(&ps, 127, button), "{button:?}");
        }
        assert!(!sprint_ending_buttons(&ps, 127, Buttons::SPRINT));
        assert!(!sprint_ending_buttons(&ps, 127, Buttons::LEAN_LEFT));
    }

    #[test]
    fn test_sprint_ending_ball_carrier_drops_attack() {
        let mut ps = sprinting_ps();
        ps.perks = Perks::BALLCARRIER;
        assert!(!sprint_ending_buttons(&ps, 127, Buttons::ATTACK));
        assert!(sprint_ending_buttons(&ps, 127, Buttons::MELEE));
    }

    #[test]
    fn test_sprint_ending_resist_explosion_drops_crouch() {
        let mut ps = sprinting_ps();
        ps.perks = Perks::RESISTEXPLOSION;
        assert!(!sprint_ending_buttons(&ps, 127, Buttons::CROUCH));
        // reload buttons stay sprint breaking
        assert!(sprint_ending_buttons(&ps, 127, Buttons::RELOAD));
        assert!(sprint_ending_buttons(&ps, 127, Buttons::USERELOAD));
    }

    #[test]
    fn test_sprint_ending_wrist_twist_lag_fix() {
        let mut ps = sprinting_ps();
        ps.weap_common.last_weapon_hand = WeaponHand::Left;
        ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::SprintRaise;

        assert!(!sprint_ending_buttons(&ps, 127, Buttons::RELOAD));
        assert!(sprint_ending_buttons(&ps, 127, Buttons::USERELOAD));

        ps.hand_mut(WeaponHand::Right).weapon_state = WeaponState::SprintLoop;
        assert!(sprint_ending_buttons(&ps, 127, Buttons::RELOAD));
    }

    #[test]
    fn test_sprint_ending_busy_states() {
        let mut ps = sprinting_ps();
        for state in [
            WeaponState::MeleeFire,
            WeaponState::OffhandHold,
            WeaponState::OffhandEnd,
            WeaponState::NightvisionWear,
            WeaponState::NightvisionRemove,
            WeaponState::BlastImpact,
            WeaponState::HeatCooldownStart,
        ] {
            ps.hand_mut(WeaponHand::Right).weapon_state = state;
            assert!(sprint_ending_buttons(&ps, 127, Buttons::empty()), "{state:?}");
        }
        for state in [
            WeaponState::Ready,
            WeaponState::Reloading,
            WeaponState::SprintLoop,
            WeaponState::HeatCooldownEnd,
        ] {
            ps.hand_mut(WeaponHand::Right).weapon_state = state;
            assert!(!sprint_ending_buttons(&ps, 127, Buttons::empty()), "{state:?}");
        }
    }
}
