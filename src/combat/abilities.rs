//! Named attack abilities used by basic and special attacks.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ability {
    pub name: &'static str,
    pub multiplier: f64,
    pub qi_cost: u32,
}

impl Ability {
    /// Raw damage before the target's defense: `floor(attack * multiplier)`.
    pub fn raw_damage(&self, attack: u32) -> u32 {
        (attack as f64 * self.multiplier) as u32
    }

    pub fn is_basic(&self) -> bool {
        self.qi_cost == 0
    }
}

pub const BASIC_STRIKE: Ability = Ability {
    name: "基本打击",
    multiplier: 1.0,
    qi_cost: 0,
};
pub const QI_FIST: Ability = Ability {
    name: "气力拳",
    multiplier: 1.5,
    qi_cost: 10,
};
pub const WHIRLWIND_SLASH: Ability = Ability {
    name: "旋风斩",
    multiplier: 1.2,
    qi_cost: 15,
};
pub const FLYING_SWORD: Ability = Ability {
    name: "飞剑术",
    multiplier: 2.0,
    qi_cost: 20,
};
pub const DRAGON_FIST: Ability = Ability {
    name: "龙拳",
    multiplier: 2.5,
    qi_cost: 30,
};

pub fn starting_abilities() -> Vec<Ability> {
    vec![BASIC_STRIKE, QI_FIST]
}

/// Ability learned on entering a realm, if any.
pub fn ability_unlocked_at(rank: u8) -> Option<Ability> {
    match rank {
        8 => Some(WHIRLWIND_SLASH),
        7 => Some(FLYING_SWORD),
        5 => Some(DRAGON_FIST),
        _ => None,
    }
}

/// Outcome of choosing a special attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecialChoice {
    /// Strongest affordable special ability.
    Affordable(Ability),
    /// Nothing affordable; carries the cheapest special for the warning.
    Unaffordable(Ability),
    /// The player knows no special ability at all.
    NoneKnown,
}

/// Walks the ability list from most to least powerful and picks the first
/// whose cost fits in `qi`. The basic strike is never a special.
pub fn choose_special(abilities: &[Ability], qi: u32) -> SpecialChoice {
    let mut cheapest: Option<Ability> = None;
    for ability in abilities.iter().rev().filter(|a| !a.is_basic()) {
        if ability.qi_cost <= qi {
            return SpecialChoice::Affordable(*ability);
        }
        if cheapest.map_or(true, |c| ability.qi_cost < c.qi_cost) {
            cheapest = Some(*ability);
        }
    }
    match cheapest {
        Some(ability) => SpecialChoice::Unaffordable(ability),
        None => SpecialChoice::NoneKnown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_list() -> Vec<Ability> {
        vec![BASIC_STRIKE, QI_FIST, WHIRLWIND_SLASH, FLYING_SWORD, DRAGON_FIST]
    }

    #[test]
    fn test_raw_damage_floors() {
        assert_eq!(QI_FIST.raw_damage(25), 37);
        assert_eq!(DRAGON_FIST.raw_damage(10), 25);
        assert_eq!(BASIC_STRIKE.raw_damage(7), 7);
    }

    #[test]
    fn test_choose_strongest_affordable() {
        let list = full_list();
        assert_eq!(choose_special(&list, 100), SpecialChoice::Affordable(DRAGON_FIST));
        assert_eq!(choose_special(&list, 25), SpecialChoice::Affordable(FLYING_SWORD));
        assert_eq!(choose_special(&list, 15), SpecialChoice::Affordable(WHIRLWIND_SLASH));
        assert_eq!(choose_special(&list, 10), SpecialChoice::Affordable(QI_FIST));
    }

    #[test]
    fn test_unaffordable_reports_cheapest() {
        assert_eq!(
            choose_special(&full_list(), 0),
            SpecialChoice::Unaffordable(QI_FIST)
        );
        assert_eq!(choose_special(&[BASIC_STRIKE], 50), SpecialChoice::NoneKnown);
    }

    #[test]
    fn test_unlocks() {
        assert_eq!(ability_unlocked_at(8), Some(WHIRLWIND_SLASH));
        assert_eq!(ability_unlocked_at(7), Some(FLYING_SWORD));
        assert_eq!(ability_unlocked_at(5), Some(DRAGON_FIST));
        assert_eq!(ability_unlocked_at(6), None);
    }
}
