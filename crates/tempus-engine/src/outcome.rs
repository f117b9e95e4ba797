//! Decoding of raw engine outcome codes
//!
//! The engine reports every solve and lifecycle result as a small integer.
//! That integer is a tagged variant in disguise: it is decoded exactly once,
//! at the boundary, into the closed [`Outcome`] enum so downstream logic is
//! forced to handle every member. A raw value outside the protocol is a
//! [`ProtocolViolation`], never coerced to a nearby valid value.

use std::os::raw::c_int;
use thiserror::Error;

/// Closed set of outcomes the engine can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Operation completed successfully
    Success,
    /// A plan was found; the plan-length out-parameter is populated
    SolutionFound,
    /// The problem has no reachable goal
    NoSolutionFound,
    /// The engine could not parse the PDDL input
    ParseError,
    /// The engine could not read an input file
    FileError,
    /// The engine rejected the handle or an argument as invalid
    InvalidHandle,
}

/// The engine returned an outcome code the bridge does not recognize
///
/// Indicates a version/ABI mismatch between bridge and engine. The handle
/// that produced it should not be trusted for further calls.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("engine returned outcome code {code} outside the boundary protocol (expected 0..=5)")]
pub struct ProtocolViolation {
    /// The unrecognized raw code
    pub code: i32,
}

impl Outcome {
    /// Decode a raw outcome code
    ///
    /// Total and pure: defined for every `i32`, bijective on 0..=5, and a
    /// `ProtocolViolation` for everything else (including negatives).
    pub fn decode(raw: i32) -> Result<Self, ProtocolViolation> {
        match raw {
            0 => Ok(Outcome::Success),
            1 => Ok(Outcome::SolutionFound),
            2 => Ok(Outcome::NoSolutionFound),
            3 => Ok(Outcome::ParseError),
            4 => Ok(Outcome::FileError),
            5 => Ok(Outcome::InvalidHandle),
            code => Err(ProtocolViolation { code }),
        }
    }

    /// The raw code this outcome decodes from
    pub fn code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::SolutionFound => 1,
            Outcome::NoSolutionFound => 2,
            Outcome::ParseError => 3,
            Outcome::FileError => 4,
            Outcome::InvalidHandle => 5,
        }
    }
}

impl TryFrom<i32> for Outcome {
    type Error = ProtocolViolation;

    fn try_from(raw: i32) -> Result<Self, ProtocolViolation> {
        Outcome::decode(raw)
    }
}

/// Decoded result of one solve call
///
/// Pairs the outcome with the plan-length out-parameter the engine
/// populated. The raw out-parameter is only meaningful for
/// [`Outcome::SolutionFound`]; `plan_length()` enforces that by returning
/// `None` for every other outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveResult {
    outcome: Outcome,
    raw_plan_length: c_int,
}

impl SolveResult {
    pub(crate) fn new(outcome: Outcome, raw_plan_length: c_int) -> Self {
        Self {
            outcome,
            raw_plan_length,
        }
    }

    /// The decoded outcome
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Plan length, populated only when a solution was found
    pub fn plan_length(&self) -> Option<u32> {
        match self.outcome {
            Outcome::SolutionFound => u32::try_from(self.raw_plan_length).ok(),
            _ => None,
        }
    }

    /// Whether the engine found a plan
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::SolutionFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Outcome::Success)]
    #[case(1, Outcome::SolutionFound)]
    #[case(2, Outcome::NoSolutionFound)]
    #[case(3, Outcome::ParseError)]
    #[case(4, Outcome::FileError)]
    #[case(5, Outcome::InvalidHandle)]
    fn test_decode_valid_codes(#[case] raw: i32, #[case] expected: Outcome) {
        assert_eq!(Outcome::decode(raw), Ok(expected));
        // Bijective: decoding then re-encoding round-trips
        assert_eq!(expected.code(), raw);
    }

    #[rstest]
    #[case(-1)]
    #[case(6)]
    #[case(i32::MIN)]
    #[case(i32::MAX)]
    fn test_decode_out_of_range(#[case] raw: i32) {
        assert_eq!(Outcome::decode(raw), Err(ProtocolViolation { code: raw }));
    }

    #[test]
    fn test_try_from_matches_decode() {
        assert_eq!(Outcome::try_from(2), Ok(Outcome::NoSolutionFound));
        assert!(Outcome::try_from(42).is_err());
    }

    proptest! {
        #[test]
        fn test_decode_total(raw in any::<i32>()) {
            match Outcome::decode(raw) {
                Ok(outcome) => prop_assert_eq!(outcome.code(), raw),
                Err(violation) => {
                    prop_assert!(!(0..=5).contains(&raw));
                    prop_assert_eq!(violation.code, raw);
                }
            }
        }
    }

    #[test]
    fn test_plan_length_only_for_solutions() {
        let solved = SolveResult::new(Outcome::SolutionFound, 7);
        assert_eq!(solved.plan_length(), Some(7));
        assert!(solved.is_solved());

        // The out-parameter is not consulted for any other outcome, even if
        // the engine happened to scribble into it
        let unsolved = SolveResult::new(Outcome::NoSolutionFound, 7);
        assert_eq!(unsolved.plan_length(), None);
        assert!(!unsolved.is_solved());

        let file_error = SolveResult::new(Outcome::FileError, -3);
        assert_eq!(file_error.plan_length(), None);
    }

    #[test]
    fn test_negative_plan_length_rejected() {
        let result = SolveResult::new(Outcome::SolutionFound, -1);
        assert_eq!(result.plan_length(), None);
    }
}
