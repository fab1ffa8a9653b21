use nalgebra::Vector3;

use crate::bodies::Body;

/// Advance every body by `dt` with semi-implicit (symplectic) Euler.
///
/// All velocities are updated first, then all positions with the new
/// velocities. `accelerations` must come from the positions at the start of
/// the step.
pub fn semi_implicit_euler(bodies: &mut [Body], accelerations: &[Vector3<f64>], dt: f64) {
    debug_assert_eq!(bodies.len(), accelerations.len());

    for (body, a) in bodies.iter_mut().zip(accelerations) {
        body.velocity += a * dt;
    }
    for body in bodies.iter_mut() {
        body.position += body.velocity * dt;
    }
}
