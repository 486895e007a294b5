//! # Skills
//! A skill is a named check over the output of a finished run and the inputs
//! that run was given. Each one encodes the computation a level expects.
//!
//! The catalog is fixed: [`SKILLS`] is static data and skills are looked up
//! by their exact name. Matching never searches for the best fitting skill,
//! it only checks the one that was asked for.

use core::fmt;

use crate::Word;

/// Inputs of a run, loaded into `AX` and `BX` before it starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Inputs {
    pub a: Word,
    pub b: Word,
}
impl Inputs {
    pub const fn new(a: Word, b: Word) -> Self {
        Self { a, b }
    }
}

/// Acceptance check of a [`Skill`].
pub type Predicate = fn(output: &[Word], inputs: Inputs) -> bool;

#[derive(Clone, Copy)]
pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    pub damage: u32,
    predicate: Predicate,
}
impl Skill {
    /// Returns true if `output` is what this skill expects for `inputs`.
    pub fn matches(&self, output: &[Word], inputs: Inputs) -> bool {
        (self.predicate)(output, inputs)
    }
}
impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("damage", &self.damage)
            .finish_non_exhaustive()
    }
}
impl PartialEq for Skill {
    /// Skill names are unique within the catalog.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Skill {}

fn single(output: &[Word], expected: Word) -> bool {
    output == [expected]
}

fn countdown(output: &[Word], inputs: Inputs) -> bool {
    let Ok(length) = usize::try_from(inputs.a) else {
        return false;
    };
    output.len() == length && output.iter().copied().eq((1..=inputs.a).rev())
}

const FIBONACCI: [Word; 6] = [1, 1, 2, 3, 5, 8];

/// Every known skill.
pub static SKILLS: [Skill; 10] = [
    Skill {
        name: "Add Beam",
        description: "Compute AX + BX",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.wrapping_add(inputs.b)),
    },
    Skill {
        name: "Sub Strike",
        description: "Compute AX - BX",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.wrapping_sub(inputs.b)),
    },
    Skill {
        name: "Mul Cannon",
        description: "Compute AX * BX",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.wrapping_mul(inputs.b)),
    },
    Skill {
        name: "Max Pulse",
        description: "Output max(AX, BX)",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.max(inputs.b)),
    },
    Skill {
        name: "Countdown Burst",
        description: "Output AX, AX-1, ... down to 1",
        damage: 100,
        predicate: countdown,
    },
    Skill {
        name: "Fibonacci Strike",
        description: "Output the first 6 Fibonacci numbers",
        damage: 100,
        predicate: |output, _| output == FIBONACCI,
    },
    Skill {
        name: "Stack Flip",
        description: "Push AX then BX, pop both (outputs BX then AX)",
        damage: 100,
        predicate: |output, inputs| output == [inputs.b, inputs.a],
    },
    Skill {
        name: "Triple Double",
        description: "Output AX added to itself 3 times (AX * 3)",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.wrapping_mul(3)),
    },
    Skill {
        name: "Branch Blast",
        description: "Output the larger of AX and BX using a jump",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.max(inputs.b)),
    },
    Skill {
        name: "Square Nuke",
        description: "Output AX * AX",
        damage: 100,
        predicate: |output, inputs| single(output, inputs.a.wrapping_mul(inputs.a)),
    },
];

/// Looks a skill up by its exact name.
pub fn find_skill(name: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.name == name)
}

/// Returns the skill named `skill_name` if `output` satisfies it for `inputs`.
///
/// Unknown names never match.
/// # Example
/// ```rust
/// # use chipduel::skills::{match_skill, Inputs};
/// let inputs = Inputs::new(3, 4);
/// assert_eq!(match_skill(&[7], inputs, "Add Beam").map(|s| s.name), Some("Add Beam"));
/// assert!(match_skill(&[7], inputs, "Sub Strike").is_none());
/// ```
pub fn match_skill(output: &[Word], inputs: Inputs, skill_name: &str) -> Option<&'static Skill> {
    find_skill(skill_name).filter(|skill| skill.matches(output, inputs))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_beam() {
        let inputs = Inputs::new(3, 4);
        let skill = match_skill(&[7], inputs, "Add Beam").unwrap();
        assert_eq!(skill.name, "Add Beam");
        assert_eq!(skill.damage, 100);
        assert!(match_skill(&[99], inputs, "Add Beam").is_none());
        assert!(match_skill(&[7, 7], inputs, "Add Beam").is_none());
        assert!(match_skill(&[], inputs, "Add Beam").is_none());
    }

    #[test]
    fn test_selected_by_name_only() {
        // [7] satisfies Add Beam for these inputs, but Sub Strike was asked for.
        assert!(match_skill(&[7], Inputs::new(3, 4), "Sub Strike").is_none());
        assert!(match_skill(&[7], Inputs::new(3, 4), "add beam").is_none());
        assert!(match_skill(&[7], Inputs::new(3, 4), "Unknown Skill").is_none());
    }

    #[test]
    fn test_arithmetic_skills() {
        assert!(match_skill(&[5], Inputs::new(9, 4), "Sub Strike").is_some());
        assert!(match_skill(&[-5], Inputs::new(4, 9), "Sub Strike").is_some());
        assert!(match_skill(&[42], Inputs::new(6, 7), "Mul Cannon").is_some());
        assert!(match_skill(&[12], Inputs::new(4, 0), "Triple Double").is_some());
        assert!(match_skill(&[36], Inputs::new(6, 0), "Square Nuke").is_some());
        assert!(match_skill(&[12], Inputs::new(6, 0), "Square Nuke").is_none());
    }

    #[test]
    fn test_max_skills() {
        for name in ["Max Pulse", "Branch Blast"] {
            assert!(match_skill(&[8], Inputs::new(5, 8), name).is_some());
            assert!(match_skill(&[7], Inputs::new(7, 3), name).is_some());
            assert!(match_skill(&[3], Inputs::new(7, 3), name).is_none());
        }
    }

    #[test]
    fn test_countdown_burst() {
        let inputs = Inputs::new(5, 0);
        assert!(match_skill(&[5, 4, 3, 2, 1], inputs, "Countdown Burst").is_some());
        assert!(match_skill(&[5, 4, 3, 2], inputs, "Countdown Burst").is_none());
        assert!(match_skill(&[5, 4, 3, 2, 1, 0], inputs, "Countdown Burst").is_none());
        assert!(match_skill(&[1, 2, 3, 4, 5], inputs, "Countdown Burst").is_none());
        // Nothing to count down from.
        assert!(match_skill(&[], Inputs::new(0, 0), "Countdown Burst").is_some());
        assert!(match_skill(&[], Inputs::new(-2, 0), "Countdown Burst").is_none());
    }

    #[test]
    fn test_fibonacci_strike() {
        let skill = match_skill(&[1, 1, 2, 3, 5, 8], Inputs::default(), "Fibonacci Strike");
        assert!(skill.is_some());
        // Inputs are irrelevant.
        assert!(match_skill(&[1, 1, 2, 3, 5, 8], Inputs::new(9, 9), "Fibonacci Strike").is_some());
        assert!(match_skill(&[1, 1, 2, 3, 5], Inputs::default(), "Fibonacci Strike").is_none());
        assert!(match_skill(&[0, 1, 1, 2, 3, 5], Inputs::default(), "Fibonacci Strike").is_none());
    }

    #[test]
    fn test_stack_flip() {
        assert!(match_skill(&[7, 3], Inputs::new(3, 7), "Stack Flip").is_some());
        assert!(match_skill(&[3, 7], Inputs::new(3, 7), "Stack Flip").is_none());
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, skill) in SKILLS.iter().enumerate() {
            assert_eq!(find_skill(skill.name), Some(skill));
            assert!(SKILLS[i + 1..].iter().all(|other| other.name != skill.name));
        }
    }
}
