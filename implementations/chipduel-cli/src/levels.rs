//! The level catalog played by the command line front end.

use chipduel::{level::Level, skills::Inputs};

pub static LEVELS: [Level<'static>; 10] = [
    Level {
        level: 1,
        title: "Addition",
        skill_name: "Add Beam",
        inputs: Inputs::new(3, 4),
        budget: 5,
        hint: "; Level 1: Compute AX + BX
; AX = 3, BX = 4
; HLT with the result
",
    },
    Level {
        level: 2,
        title: "Subtraction",
        skill_name: "Sub Strike",
        inputs: Inputs::new(9, 4),
        budget: 5,
        hint: "; Level 2: Compute AX - BX
; AX = 9, BX = 4
; HLT with the result
",
    },
    Level {
        level: 3,
        title: "Multiplication",
        skill_name: "Mul Cannon",
        inputs: Inputs::new(6, 7),
        budget: 8,
        hint: "; Level 3: Compute AX * BX
; AX = 6, BX = 7
; HLT with the result
",
    },
    Level {
        level: 4,
        title: "Maximum",
        skill_name: "Max Pulse",
        inputs: Inputs::new(5, 8),
        budget: 8,
        hint: "; Level 4: Output the larger of AX and BX
; AX = 5, BX = 8
; Hint: use CMP and JE/JNE
",
    },
    Level {
        level: 5,
        title: "Countdown",
        skill_name: "Countdown Burst",
        inputs: Inputs::new(5, 0),
        budget: 25,
        hint: "; Level 5: HLT AX, then AX-1, down to 1
; AX = 5  (count from 5 down to 1)
; Hint: use a loop with CMP and JNE
",
    },
    Level {
        level: 6,
        title: "Fibonacci",
        skill_name: "Fibonacci Strike",
        inputs: Inputs::new(0, 0),
        budget: 30,
        hint: "; Level 6: Output the first 6 Fibonacci numbers
; 1, 1, 2, 3, 5, 8
; Hint: use two registers to track prev and curr
",
    },
    Level {
        level: 7,
        title: "Stack Flip",
        skill_name: "Stack Flip",
        inputs: Inputs::new(3, 7),
        budget: 10,
        hint: "; Level 7: Push AX then BX onto the stack
; Then POP both (reverse order) and HLT each
; AX = 3, BX = 7
; Expected output: [7, 3]
",
    },
    Level {
        level: 8,
        title: "Triple",
        skill_name: "Triple Double",
        inputs: Inputs::new(4, 0),
        budget: 15,
        hint: "; Level 8: Output AX * 3
; AX = 4
; Hint: ADD AX to itself, then ADD original value again
",
    },
    Level {
        level: 9,
        title: "Branch",
        skill_name: "Branch Blast",
        inputs: Inputs::new(7, 3),
        budget: 10,
        hint: "; Level 9: Output the larger of AX and BX
; AX = 7, BX = 3
; You MUST use a jump instruction (JE or JNE)
",
    },
    Level {
        level: 10,
        title: "Square",
        skill_name: "Square Nuke",
        inputs: Inputs::new(6, 0),
        budget: 10,
        hint: "; Level 10: Output AX * AX (AX squared)
; AX = 6
; Hint: MOV BX, AX  then MUL AX, BX
",
    },
];

pub fn find_level(number: u32) -> Option<&'static Level<'static>> {
    LEVELS.iter().find(|level| level.level == number)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_levels_are_playable() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.level as usize, i + 1);
            assert!(level.skill().is_some(), "{}", level.skill_name);
            // Hints are comments, there is nothing to execute in them.
            assert!(chipasm::parse_program(level.hint).is_empty());
        }
        assert_eq!(find_level(7).map(|l| l.title), Some("Stack Flip"));
        assert!(find_level(11).is_none());
    }

    #[test]
    fn test_starter_program() {
        let level = find_level(1).unwrap();
        assert!(level
            .attempt("MOV AX, 3\nMOV BX, 4\nADD AX, BX\nHLT AX")
            .is_success());
    }
}
