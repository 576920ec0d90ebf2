// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render loop lifecycle: what a tick of the event loop should do.

use std::time::Duration;

/// How long a minimized window sleeps per tick instead of rendering.
pub const MINIMIZED_IDLE: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Window/GPU not created yet.
    Init,
    Running,
    /// Exit requested; no further frames.
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePlan {
    /// Nothing to draw yet (still initializing).
    Wait,
    /// Minimized: sleep, skip UI and drawing.
    Idle(Duration),
    /// Poll input, build UI, map viewport, draw, present.
    Render,
    Exit,
}

pub fn plan_frame(state: LoopState, minimized: bool, exit_requested: bool) -> FramePlan {
    match state {
        LoopState::Shutdown => FramePlan::Exit,
        _ if exit_requested => FramePlan::Exit,
        LoopState::Init => FramePlan::Wait,
        LoopState::Running if minimized => FramePlan::Idle(MINIMIZED_IDLE),
        LoopState::Running => FramePlan::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_frames_idle_then_resume() {
        let plans: Vec<_> = [false, true, true, false]
            .into_iter()
            .map(|minimized| plan_frame(LoopState::Running, minimized, false))
            .collect();
        assert_eq!(
            plans,
            vec![
                FramePlan::Render,
                FramePlan::Idle(MINIMIZED_IDLE),
                FramePlan::Idle(MINIMIZED_IDLE),
                FramePlan::Render,
            ]
        );
    }

    #[test]
    fn exit_wins_over_everything() {
        assert_eq!(plan_frame(LoopState::Running, true, true), FramePlan::Exit);
        assert_eq!(plan_frame(LoopState::Init, false, true), FramePlan::Exit);
        assert_eq!(plan_frame(LoopState::Shutdown, false, false), FramePlan::Exit);
    }

    #[test]
    fn init_waits_for_the_window() {
        assert_eq!(plan_frame(LoopState::Init, false, false), FramePlan::Wait);
    }
}
