use glam::Vec3;

/// Capsule-like hit test between a point and a standing body.
///
/// The body is approximated by the set of points whose distances to its feet
/// and to its head sum to less than `focal_sum`, an ellipsoid with the two
/// ends as foci. This fits a tall humanoid much tighter than a sphere.
pub fn hits(point: Vec3, feet: Vec3, head_offset: Vec3, focal_sum: f32) -> bool {
    let top = point.distance(feet + head_offset);
    let bottom = point.distance(feet);
    top + bottom < focal_sum
}
