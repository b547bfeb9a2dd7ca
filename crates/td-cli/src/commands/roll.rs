use td_mechanics::{RollRequest, StandardRoll};

use super::RollArgs;

pub fn run(
    label: &str,
    attribute: i32,
    skill: i32,
    bonus: i32,
    args: &RollArgs,
) -> Result<(), String> {
    let roll = StandardRoll::new(label, attribute, skill).with_bonus(bonus);
    super::execute(RollRequest::standard(roll), args)
}
