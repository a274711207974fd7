//! Collision and bonus resolution, once per frame
//!
//! Two passes: `detect` reads the entity list and decides what touched the
//! player, `apply` mutates lives and removes collected bonuses afterwards.
//! Presentation (indicator, sounds, the hold) is left to the caller via the
//! returned events.

use super::entities::{Entity, PlayerCar};

/// What touched the player this frame, as indices into the entity list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contacts {
    pub player: Option<usize>,
    /// First overlapping hazard; None while invincible
    pub hit: Option<usize>,
    /// Every overlapping bonus, ascending
    pub bonuses: Vec<usize>,
}

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.hit.is_none() && self.bonuses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Player hit a hazard; (x, y) is the player's top-left at impact
    Hit { x: i32, y: i32 },
    /// Bonus picked up; `gained` is false when lives were already full
    BonusCollected { gained: bool },
}

pub fn detect(entities: &[Entity]) -> Contacts {
    let Some((player_idx, player)) = find_player(entities) else {
        return Contacts::default();
    };
    let player_rect = player.body.rect;

    // Invincibility is re-checked per candidate; the first hit activates it,
    // so at most one hazard counts per frame.
    let mut invincible = player.invincible;
    let mut hit = None;
    let mut bonuses = Vec::new();

    for (idx, entity) in entities.iter().enumerate() {
        if !entity.rect().intersects(&player_rect) {
            continue;
        }
        if entity.is_hazard() && !invincible {
            hit = Some(idx);
            invincible = true;
        } else if entity.is_bonus() {
            bonuses.push(idx);
        }
    }

    Contacts {
        player: Some(player_idx),
        hit,
        bonuses,
    }
}

pub fn apply(entities: &mut Vec<Entity>, contacts: &Contacts) -> Vec<ContactEvent> {
    let mut events = Vec::new();
    let Some(player_idx) = contacts.player else {
        return events;
    };

    if let Some(Entity::Player(player)) = entities.get_mut(player_idx) {
        if let Some(hazard) = contacts.hit {
            let rect = player.body.rect;
            tracing::debug!("Player hit hazard #{} at ({}, {})", hazard, rect.x, rect.y);
            player.activate_invincibility();
            player.lose_life();
            events.push(ContactEvent::Hit { x: rect.x, y: rect.y });
        }
        for _ in &contacts.bonuses {
            let gained = player.gain_life();
            tracing::debug!("Bonus collected (life gained: {})", gained);
            events.push(ContactEvent::BonusCollected { gained });
        }
    }

    // Descending, so earlier indices stay valid
    for &idx in contacts.bonuses.iter().rev() {
        if idx < entities.len() {
            entities.remove(idx);
        }
    }

    events
}

/// Detect then apply
pub fn resolve(entities: &mut Vec<Entity>) -> Vec<ContactEvent> {
    let contacts = detect(entities);
    if contacts.is_empty() {
        return Vec::new();
    }
    apply(entities, &contacts)
}

fn find_player(entities: &[Entity]) -> Option<(usize, &PlayerCar)> {
    entities.iter().enumerate().find_map(|(idx, e)| match e {
        Entity::Player(p) => Some((idx, p)),
        Entity::Drifter(_) => None,
    })
}
