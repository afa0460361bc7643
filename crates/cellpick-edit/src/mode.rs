//! Interaction modes
//!
//! The dispatcher is in exactly one mode at a time. Shape modes collect
//! clicked points until the shape is complete; every transition clears
//! them.

use cellpick_core::Pta;
use std::fmt;

/// What a plain click does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Grow, relabel or inspect at the click
    #[default]
    Normal,
    /// Two clicks span a rectangle
    Square,
    /// One click stamps a circle
    Circle,
    /// Clicks add vertices; finalized by key
    Polygon,
    /// One click runs contrast growth
    LegacyGrowth,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractionMode::Normal => "normal",
            InteractionMode::Square => "square",
            InteractionMode::Circle => "circle",
            InteractionMode::Polygon => "polygon",
            InteractionMode::LegacyGrowth => "legacy growth",
        };
        f.write_str(name)
    }
}

/// Input to the mode transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Enter `mode`, or leave it if already active
    Toggle(InteractionMode),
    /// Back to normal
    Clear,
    /// A shape was committed
    Complete,
}

impl InteractionMode {
    /// Mode after applying `action`
    pub fn next(self, action: ModeAction) -> InteractionMode {
        match action {
            ModeAction::Toggle(target) if target == self => InteractionMode::Normal,
            ModeAction::Toggle(target) => target,
            ModeAction::Clear | ModeAction::Complete => InteractionMode::Normal,
        }
    }

    /// Number of clicks that complete the shape, if the mode completes on clicks
    pub fn points_to_complete(self) -> Option<usize> {
        match self {
            InteractionMode::Square => Some(2),
            InteractionMode::Circle => Some(1),
            _ => None,
        }
    }
}

/// Current mode plus the points collected in it
#[derive(Debug, Clone, Default)]
pub struct ModeState {
    mode: InteractionMode,
    points: Vec<(u32, u32)>,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn points(&self) -> &[(u32, u32)] {
        &self.points
    }

    /// Collected points as polygon vertices
    pub fn vertices(&self) -> Pta {
        Pta::from_pixels(&self.points)
    }

    /// Record a click; returns the number of points collected
    pub fn add_point(&mut self, x: u32, y: u32) -> usize {
        self.points.push((x, y));
        self.points.len()
    }

    /// Apply `action`, clearing collected points; returns the new mode
    pub fn apply(&mut self, action: ModeAction) -> InteractionMode {
        self.mode = self.mode.next(action);
        self.points.clear();
        self.mode
    }

    /// Drop collected points but stay in the current mode
    pub fn reset_points(&mut self) {
        self.points.clear();
    }
}
