//! Raw pointer input delivered by the host.

use diagramkit_core::{Point, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Press(PointerButton),
    Release(PointerButton),
    /// Pointer motion; `primary_held` tells drags from hovering.
    Motion { primary_held: bool },
    Cancel,
    /// Two-finger scroll or similar, in screen units.
    PanGesture(Vector),
    /// Pinch zoom; the factor multiplies the current zoom.
    MagnifyGesture(f64),
}

/// One input event at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputKind, position: Point) -> Self {
        Self {
            kind,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn press(position: Point) -> Self {
        Self::new(InputKind::Press(PointerButton::Primary), position)
    }

    pub fn release(position: Point) -> Self {
        Self::new(InputKind::Release(PointerButton::Primary), position)
    }

    /// Motion with the primary button held.
    pub fn drag(position: Point) -> Self {
        Self::new(InputKind::Motion { primary_held: true }, position)
    }

    /// Motion without any button held.
    pub fn hover(position: Point) -> Self {
        Self::new(InputKind::Motion { primary_held: false }, position)
    }

    pub fn cancel(position: Point) -> Self {
        Self::new(InputKind::Cancel, position)
    }

    pub fn pan_gesture(position: Point, delta: Vector) -> Self {
        Self::new(InputKind::PanGesture(delta), position)
    }

    pub fn magnify(position: Point, factor: f64) -> Self {
        Self::new(InputKind::MagnifyGesture(factor), position)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn button(&self) -> Option<PointerButton> {
        match self.kind {
            InputKind::Press(button) | InputKind::Release(button) => Some(button),
            InputKind::Motion { primary_held: true } => Some(PointerButton::Primary),
            _ => None,
        }
    }
}
