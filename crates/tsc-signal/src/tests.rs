//! Unit tests for the phase state machine.

use tsc_core::IntersectionId;

use crate::PhaseStateMachine;

// ── Helpers ───────────────────────────────────────────────────────────────────

const YELLOW: usize = 0;

/// Three controllable phases shown as light phases 1, 2, 3; yellow is 0.
fn machine(yellow_time: f64) -> PhaseStateMachine {
    PhaseStateMachine::new(IntersectionId::new("i"), vec![1, 2, 3], Some(YELLOW), yellow_time)
        .unwrap()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn initial_state() {
        let m = machine(3.0);
        let s = m.state();
        assert_eq!(s.current_phase, 0);
        assert_eq!(s.true_phase, 1);
        assert_eq!(s.elapsed, 0.0);
        assert_eq!(s.pending_phase, None);
        assert!(!s.is_transitioning());
    }

    #[test]
    fn no_phases_rejected() {
        let r = PhaseStateMachine::new(IntersectionId::new("i"), vec![], Some(0), 3.0);
        assert!(r.is_err());
    }

    #[test]
    fn positive_yellow_needs_yellow_phase() {
        let r = PhaseStateMachine::new(IntersectionId::new("i"), vec![1], None, 3.0);
        assert!(r.is_err());
        let r = PhaseStateMachine::new(IntersectionId::new("i"), vec![1], None, 0.0);
        assert!(r.is_ok());
    }

    #[test]
    fn built_from_topology() {
        let raw = tsc_roadnet::load_roadnet_reader(
            include_str!("../../tsc-roadnet/testdata/four_way.json").as_bytes(),
        )
        .unwrap();
        let config = tsc_core::WorldConfig::default();
        let net = tsc_roadnet::RoadNet::build(raw, &config).unwrap();
        let m = PhaseStateMachine::for_intersection(&net.intersections[0], &config).unwrap();
        assert_eq!(m.phase_count(), 2);
        assert_eq!(m.light_phase(1), Some(2));
        assert_eq!(m.state().true_phase, 1);
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use super::*;

    #[test]
    fn same_phase_only_accumulates() {
        let mut m = machine(3.0);
        for i in 1..=10 {
            assert_eq!(m.step(0, 1.0).unwrap(), None);
            assert_eq!(m.state().elapsed, i as f64);
            assert_eq!(m.state().true_phase, 1);
        }
    }

    #[test]
    fn yellow_inserted_for_three_ticks() {
        let mut m = machine(3.0);
        let mut commands = Vec::new();
        let mut shown = Vec::new();
        // Tick T requests phase 1, later ticks keep requesting it.
        for _ in 0..5 {
            commands.push(m.step(1, 1.0).unwrap());
            shown.push(m.state().true_phase);
        }
        assert_eq!(commands, vec![Some(YELLOW), None, None, Some(2), None]);
        assert_eq!(shown, vec![YELLOW, YELLOW, YELLOW, 2, 2]);
        assert_eq!(m.state().current_phase, 1);
        assert_eq!(m.state().elapsed, 2.0);
        assert_eq!(m.state().pending_phase, None);
    }

    #[test]
    fn elapsed_resets_on_every_change() {
        let mut m = machine(2.0);
        m.step(2, 1.0).unwrap();
        assert_eq!(m.state().elapsed, 1.0);
        assert_eq!(m.state().pending_phase, Some(2));
        m.step(2, 1.0).unwrap();
        assert_eq!(m.state().elapsed, 2.0);
        m.step(2, 1.0).unwrap();
        assert_eq!(m.state().true_phase, 3);
        assert_eq!(m.state().elapsed, 1.0);
    }

    #[test]
    fn requests_during_yellow_are_ignored() {
        let mut m = machine(3.0);
        m.step(1, 1.0).unwrap();
        assert_eq!(m.step(2, 1.0).unwrap(), None);
        assert_eq!(m.step(0, 1.0).unwrap(), None);
        // The pending phase from the first request wins.
        assert_eq!(m.step(2, 1.0).unwrap(), Some(2));
        assert_eq!(m.state().current_phase, 1);
    }

    #[test]
    fn current_phase_kept_during_yellow() {
        let mut m = machine(3.0);
        m.step(2, 1.0).unwrap();
        assert_eq!(m.state().current_phase, 0);
        assert!(m.state().is_transitioning());
    }

    #[test]
    fn zero_yellow_switches_directly() {
        let mut m = machine(0.0);
        assert_eq!(m.step(2, 1.0).unwrap(), Some(3));
        assert_eq!(m.state().current_phase, 2);
        assert_eq!(m.state().true_phase, 3);
        assert_eq!(m.state().elapsed, 1.0);
        assert_eq!(m.step(2, 1.0).unwrap(), None);
    }

    #[test]
    fn fractional_interval_completes_yellow() {
        let mut m = machine(1.0);
        m.step(1, 0.1).unwrap();
        let mut ticks = 1;
        while m.state().is_transitioning() {
            m.step(1, 0.1).unwrap();
            ticks += 1;
            assert!(ticks < 20, "yellow never ended");
        }
        // Yellow shown for 10 ticks of 0.1 s, switch on the 11th.
        assert_eq!(ticks, 11);
    }

    #[test]
    fn out_of_range_request_fails_in_any_state() {
        let mut m = machine(3.0);
        assert!(m.step(3, 1.0).is_err());
        m.step(1, 1.0).unwrap();
        assert!(m.step(7, 1.0).is_err());
        // A rejected request leaves the state untouched.
        assert_eq!(m.state().elapsed, 1.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut m = machine(3.0);
        m.step(2, 1.0).unwrap();
        m.step(2, 1.0).unwrap();
        assert_eq!(m.reset(), 1);
        assert_eq!(m.state(), &crate::PhaseState::initial(1));
    }
}
