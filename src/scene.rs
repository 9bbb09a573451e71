use rand::Rng;

use crate::geometry::Point;
use crate::paint::Painter;

/// A self-contained canvas animation.
///
/// All mutable state lives in the implementor; a host drives it by calling
/// [`Scene::step`] once per display frame and [`Scene::resize`] when the
/// surface changes size.
pub trait Scene {
    /// Surface size in CSS pixels.
    fn size(&self) -> (f64, f64);

    /// Rebuild geometry for a new surface size.
    fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R);

    /// Advance the simulation by one frame.
    fn update<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Paint the current state.
    fn draw<P: Painter + ?Sized>(&self, painter: &mut P);

    /// Last pointer position in surface coordinates. Scenes that ignore
    /// the pointer keep the default.
    fn set_pointer(&mut self, _pointer: Option<Point>) {}

    fn step<R: Rng + ?Sized, P: Painter + ?Sized>(&mut self, painter: &mut P, rng: &mut R) {
        self.update(rng);
        self.draw(painter);
    }
}
