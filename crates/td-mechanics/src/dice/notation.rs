//! Dice notation parsing.
//!
//! A formula is a sequence of signed terms, e.g. `2d6+1 - 1d4 + 1d20!19`:
//! - `NdM` rolls `N` dice with `M` faces (`N` defaults to 1).
//! - A leading `-` marks the dice group as subtracted.
//! - `!` makes the group crit-capable on its top face; `!K` crits on `K` or higher.
//! - A plain number adds to the flat bonus of the preceding dice group, or to
//!   the global modifier when no dice group precedes it.

use crate::error::{MechError, MechResult};
use crate::roll::DiceRollComponent;

/// Parse a formula into its dice groups and global modifier.
pub fn parse_formula(input: &str) -> MechResult<(Vec<DiceRollComponent>, i32)> {
    let fail = |reason: &str| MechError::InvalidNotation {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(fail("empty formula"));
    }

    let mut terms: Vec<(bool, String)> = Vec::new();
    let mut negative = false;
    let mut current = String::new();
    let mut dangling = false;
    for ch in compact.chars() {
        match ch {
            '+' | '-' => {
                if dangling {
                    return Err(fail("two operators in a row"));
                }
                if !current.is_empty() {
                    terms.push((negative, std::mem::take(&mut current)));
                }
                negative = ch == '-';
                dangling = true;
            }
            _ => {
                current.push(ch.to_ascii_lowercase());
                dangling = false;
            }
        }
    }
    if current.is_empty() {
        return Err(fail("formula ends with an operator"));
    }
    terms.push((negative, current));

    let mut components: Vec<DiceRollComponent> = Vec::new();
    let mut global_modifier = 0i32;
    for (negative, term) in terms {
        if term.contains('d') {
            let mut component = parse_dice_term(&term).map_err(|reason| fail(&reason))?;
            if negative {
                component = component.subtracted();
            }
            components.push(component);
        } else {
            let value: i32 = term
                .parse()
                .map_err(|_| fail(&format!("'{term}' is not a number")))?;
            let value = if negative { -value } else { value };
            let target = match components.last_mut() {
                Some(last) => &mut last.flat_bonus,
                None => &mut global_modifier,
            };
            *target = target
                .checked_add(value)
                .ok_or_else(|| fail("constant out of range"))?;
        }
    }

    Ok((components, global_modifier))
}

/// Parse a single `NdM[!K]` term.
fn parse_dice_term(term: &str) -> Result<DiceRollComponent, String> {
    let (count_part, rest) = term
        .split_once('d')
        .ok_or_else(|| format!("'{term}' is not a dice term"))?;

    let count = if count_part.is_empty() {
        1
    } else {
        count_part
            .parse::<i32>()
            .map_err(|_| format!("bad dice count '{count_part}'"))?
    };
    if count < 1 {
        return Err(format!("dice count must be at least 1 in '{term}'"));
    }

    let (faces_part, crit_part) = match rest.split_once('!') {
        Some((faces, crit)) => (faces, Some(crit)),
        None => (rest, None),
    };
    let faces = faces_part
        .parse::<i32>()
        .map_err(|_| format!("bad face count '{faces_part}'"))?;
    if faces < 2 {
        return Err(format!("dice need at least 2 faces in '{term}'"));
    }

    let component = DiceRollComponent::new(count, faces);
    match crit_part {
        None => Ok(component),
        Some("") => Ok(component.with_crit()),
        Some(start) => {
            let start = start
                .parse::<i32>()
                .map_err(|_| format!("bad crit range '{start}'"))?;
            if !(1..=faces).contains(&start) {
                return Err(format!("crit range {start} outside 1..={faces}"));
            }
            Ok(component.with_crit_range(start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_group() {
        let (components, modifier) = parse_formula("2d6").unwrap();
        assert_eq!(components, vec![DiceRollComponent::new(2, 6)]);
        assert_eq!(modifier, 0);
    }

    #[test]
    fn implicit_count() {
        let (components, _) = parse_formula("d20").unwrap();
        assert_eq!(components[0].count, 1);
        assert_eq!(components[0].faces_per_die, 20);
    }

    #[test]
    fn bonus_attaches_to_previous_group() {
        let (components, modifier) = parse_formula("2d6+1 - 1d4 - 2").unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].flat_bonus, 1);
        assert!(!components[0].is_subtracted);
        assert!(components[1].is_subtracted);
        assert_eq!(components[1].flat_bonus, -2);
        assert_eq!(modifier, 0);
    }

    #[test]
    fn leading_constant_is_global() {
        let (components, modifier) = parse_formula("3 + 1D8").unwrap();
        assert_eq!(modifier, 3);
        assert_eq!(components, vec![DiceRollComponent::new(1, 8)]);
    }

    #[test]
    fn crit_markers() {
        let (components, _) = parse_formula("1d20! + 1d20!19").unwrap();
        assert!(components[0].can_crit);
        assert_eq!(components[0].crit_range_start, None);
        assert!(components[1].can_crit);
        assert_eq!(components[1].crit_range_start, Some(19));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("2d6+").is_err());
        assert!(parse_formula("2d6+-1").is_err());
        assert!(parse_formula("0d6").is_err());
        assert!(parse_formula("2d1").is_err());
        assert!(parse_formula("1d6!7").is_err());
        assert!(parse_formula("abc").is_err());
    }

    #[test]
    fn constants_out_of_range_are_rejected() {
        for input in ["1d6 + 2147483647 + 1", "2147483647 + 1 + 1d6", "1d6 - 2147483647 - 2"] {
            let err = parse_formula(input).unwrap_err();
            assert!(err.to_string().contains("constant out of range"), "{input}: {err}");
        }
        let (components, _) = parse_formula("1d6 + 2147483646 + 1").unwrap();
        assert_eq!(components[0].flat_bonus, i32::MAX);
    }

    #[test]
    fn error_names_the_input() {
        let err = parse_formula("2dx").unwrap_err();
        assert!(err.to_string().contains("2dx"));
    }
}
