//! Horizontal mirroring of the drawing surface.
//!
//! Front-camera previews are shown mirrored, so the overlay has to be drawn
//! mirrored too. Styles always draw in camera-natural coordinates and the
//! flip is applied here, around them.

use std::ops::{Deref, DerefMut};

use crate::surface::Surface;

/// Scoped mirror transform.
///
/// Saves the surface state on creation and, when mirroring, installs
/// `x -> width - x`. The saved state is restored exactly once, either by
/// [`MirrorGuard::end`] or when the guard is dropped.
pub struct MirrorGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    mirrored: bool,
}

impl<'a, S: Surface + ?Sized> MirrorGuard<'a, S> {
    pub fn begin(surface: &'a mut S, mirror: bool) -> Self {
        surface.save();
        if mirror {
            let width = surface.size().width as f32;
            surface.translate(width, 0.0);
            surface.scale(-1.0, 1.0);
        }
        Self {
            surface,
            mirrored: mirror,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Restores the surface now.
    pub fn end(self) {}
}

impl<S: Surface + ?Sized> Deref for MirrorGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for MirrorGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for MirrorGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Runs `draw` between [`MirrorGuard::begin`] and the matching restore.
pub fn with_mirror<S, R>(surface: &mut S, mirror: bool, draw: impl FnOnce(&mut S) -> R) -> R
where
    S: Surface + ?Sized,
{
    let mut guard = MirrorGuard::begin(surface, mirror);
    draw(&mut guard)
}
