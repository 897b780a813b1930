//! Tests for collision components.

#[cfg(test)]
mod tests {
    use bevy::math::bounding::IntersectsVolume;
    use bevy::prelude::*;
    use super::super::collision::*;

    #[test]
    fn test_layer_mask_intersects() {
        let mask = LayerMask::PLAYER.union(LayerMask::PROJECTILE);
        assert!(mask.intersects(LayerMask::PLAYER));
        assert!(mask.intersects(LayerMask::PROJECTILE));
        assert!(!mask.intersects(LayerMask::ENEMY));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
    }

    #[test]
    fn test_hitbox_aabb() {
        let hitbox = Hitbox::new(Vec2::new(2.0, 1.0), LayerMask::PLAYER);
        assert_eq!(hitbox.half_extents, Vec2::new(1.0, 0.5));

        let a = hitbox.aabb(Vec2::ZERO);
        let near = hitbox.aabb(Vec2::new(1.5, 0.0));
        let far = hitbox.aabb(Vec2::new(3.0, 0.0));

        assert!(a.intersects(&near));
        assert!(!a.intersects(&far));
    }
}
