//! Collision Response
//!
//! The player is the only moving body. Obstacles are boxes; the side of
//! contact is picked from the smaller overlap:
//! - vertical overlap smaller (or equal) and the obstacle below: land on top
//! - otherwise from below: die
//! - horizontal overlap smaller: land only when the obstacle is behind the
//!   player and not noticeably lower, die otherwise

use crate::config::WorldConfig;
use super::bounds::BoxBounds;
use super::components::Player;
use super::object::GameObject;
use super::transform::{Camera, Transform};

/// Vertical slack (pixels) under which a side hit from behind still counts as a landing
const SIDE_LANDING_SLACK: f32 = 0.3;

/// Resolve an overlap between `player` and an obstacle box sitting at `obstacle_transform`.
///
/// Does nothing when the player has no box of its own.
pub fn resolve_collision(
    obstacle: &BoxBounds,
    obstacle_transform: &Transform,
    player: &mut GameObject,
    camera: &mut Camera,
    world: &WorldConfig,
) {
    let Some(player_bounds) = player.get_component::<BoxBounds>().copied() else {
        return;
    };

    let obstacle_center = obstacle.center(obstacle_transform);
    let player_center = player_bounds.center(&player.transform);

    let dx = obstacle_center.x - player_center.x;
    let dy = obstacle_center.y - player_center.y;

    let overlap_x = obstacle.half_width() + player_bounds.half_width() - dx.abs();
    let overlap_y = obstacle.half_height() + player_bounds.half_height() - dy.abs();

    let lands = if overlap_x >= overlap_y {
        dy > 0.0
    } else {
        dx < 0.0 && dy <= SIDE_LANDING_SLACK
    };

    if lands {
        Player::land(player, obstacle_transform.position.y - player_bounds.height);
    } else {
        log::debug!("player hit an obstacle at {:?}", obstacle_transform.position);
        Player::die(player, camera, world);
    }
}

/// Keep the player from sinking below a ground plane at `ground.transform.position.y`.
pub fn resolve_ground_contact(ground: &GameObject, player: &mut GameObject) {
    let Some(player_bounds) = player.get_component::<BoxBounds>().copied() else {
        return;
    };

    let ground_y = ground.transform.position.y;
    if player.transform.position.y + player_bounds.height > ground_y {
        Player::land(player, ground_y - player_bounds.height);
    }
}
