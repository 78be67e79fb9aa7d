//! Vector helpers and rim collision response
//!
//! The ball travels in the annulus between the wheel's inner rim (the cone)
//! and outer rim (the bowl wall). Rim contacts clamp the ball back onto the
//! allowed radius and bounce the velocity with restitution.

use glam::Vec2;

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector along `v`, or zero for a zero-length input
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Reflect velocity off a surface with restitution
///
/// `normal` faces the incoming object. The velocity is only reflected while
/// the object is moving toward the surface (`v·n < 0`); a separating
/// velocity is returned unchanged so a contact is never bounced twice.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let d = velocity.dot(normal);
    if d < 0.0 {
        velocity - (1.0 + restitution) * d * normal
    } else {
        velocity
    }
}

/// Unconditional restitution bounce: v' = v - (1+e)(v·n)n
///
/// Rim contacts use this form: the sign of `n` does not matter and the
/// response is applied even if the ball is already separating.
#[inline]
pub fn bounce(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// Which rim the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rim {
    Outer,
    Inner,
}

/// Result of a rim check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimContact {
    pub rim: Rim,
    /// Corrected ball position
    pub position: Vec2,
    /// Velocity after the bounce
    pub velocity: Vec2,
    /// Velocity along the contact normal before the bounce
    pub normal_speed: f32,
}

/// Check the ball against the outer rim
///
/// The normal points outward from the center. Returns `None` when the ball
/// is inside `outer_radius - ball_radius` or sits exactly on the center.
pub fn outer_rim_collision(
    center: Vec2,
    position: Vec2,
    velocity: Vec2,
    ball_radius: f32,
    outer_radius: f32,
    restitution: f32,
) -> Option<RimContact> {
    let offset = position - center;
    let dist = offset.length();
    let limit = outer_radius - ball_radius;
    if dist <= limit || dist == 0.0 {
        return None;
    }

    let normal = offset / dist;
    let normal_speed = velocity.dot(normal);
    Some(RimContact {
        rim: Rim::Outer,
        position: center + normal * limit,
        velocity: bounce(velocity, normal, restitution),
        normal_speed,
    })
}

/// Check the ball against the inner rim
///
/// The normal is inverted (points toward the center) and the position
/// correction multiplies it by the negated limit, so the ball lands on the
/// outside of the inner rim along its own radial line.
pub fn inner_rim_collision(
    center: Vec2,
    position: Vec2,
    velocity: Vec2,
    ball_radius: f32,
    inner_radius: f32,
    restitution: f32,
) -> Option<RimContact> {
    let offset = position - center;
    let dist = offset.length();
    let limit = inner_radius + ball_radius;
    if dist >= limit || dist == 0.0 {
        return None;
    }

    let normal = -offset / dist;
    let normal_speed = velocity.dot(normal);
    Some(RimContact {
        rim: Rim::Inner,
        position: center + normal * -limit,
        velocity: bounce(velocity, normal, restitution),
        normal_speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_guard() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        let n = normalize(Vec2::new(0.0, 2.0));
        assert!((n - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_reflect_approaching() {
        // Moving into a wall whose normal faces back at the ball
        let v = reflect(Vec2::new(3.0, 4.0), Vec2::new(-1.0, 0.0), 0.6);
        assert!((v.x - (-1.8)).abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_reflect_separating_unchanged() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(reflect(v, Vec2::new(1.0, 0.0), 0.6), v);
    }

    #[test]
    fn test_reflect_inelastic_removes_normal_component() {
        let v = reflect(Vec2::new(0.0, -2.0), Vec2::Y, 0.0);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_bounce_outer_wall_normal() {
        // Speed 5 against the outward normal (1, 0)
        let v = bounce(Vec2::new(3.0, 4.0), Vec2::new(1.0, 0.0), 0.6);
        assert!((v.x - (-1.8)).abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_outer_rim_collision() {
        let center = Vec2::new(300.0, 300.0);
        // Inside - no contact
        assert!(
            outer_rim_collision(center, center + Vec2::new(200.0, 0.0), Vec2::X, 10.0, 270.0, 0.6)
                .is_none()
        );

        let contact = outer_rim_collision(
            center,
            center + Vec2::new(265.0, 0.0),
            Vec2::new(3.0, 4.0),
            10.0,
            270.0,
            0.6,
        )
        .unwrap();
        assert_eq!(contact.rim, Rim::Outer);
        assert!((distance(center, contact.position) - 260.0).abs() < 1e-3);
        assert!((contact.velocity.x - (-1.8)).abs() < 1e-5);
        assert!((contact.normal_speed - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_inner_rim_collision_pushes_out_along_radius() {
        let center = Vec2::new(300.0, 300.0);
        let position = center + Vec2::new(0.0, -220.0);
        let contact =
            inner_rim_collision(center, position, Vec2::new(0.0, 2.0), 10.0, 216.0, 0.6).unwrap();
        assert_eq!(contact.rim, Rim::Inner);
        // Same side of the center as before, on the limit radius
        let corrected = contact.position - center;
        assert!((corrected.length() - 226.0).abs() < 1e-3);
        assert!(corrected.y < 0.0);
        // Was moving inward (toward the center), bounced back outward
        assert!(contact.velocity.y < 0.0);
        assert!((contact.velocity.y - (-1.2)).abs() < 1e-5);
    }

    #[test]
    fn test_rim_collision_degenerate_center() {
        let center = Vec2::new(300.0, 300.0);
        assert!(inner_rim_collision(center, center, Vec2::X, 10.0, 216.0, 0.6).is_none());
    }
}
