//! Camera module for view and projection.

use std::cell::RefCell;
use std::rc::Rc;

use crate::math::Matrix4;

mod perspective;

pub use perspective::Camera;

/// Source of the matrices the particle simulation needs each tick.
pub trait CameraProvider {
    /// View matrix times projection matrix.
    fn view_projection(&self) -> Matrix4;

    /// Camera world matrix, used to orient billboards.
    fn world_matrix(&self) -> Matrix4;
}

/// Lets the host keep moving a camera after handing it to the simulation.
impl<C: CameraProvider + ?Sized> CameraProvider for Rc<RefCell<C>> {
    fn view_projection(&self) -> Matrix4 {
        self.borrow().view_projection()
    }

    fn world_matrix(&self) -> Matrix4 {
        self.borrow().world_matrix()
    }
}
