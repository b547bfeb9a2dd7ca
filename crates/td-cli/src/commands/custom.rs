use std::path::Path;

use td_mechanics::{Attributes, CompositeRoll, RollRequest};

use super::RollArgs;

/// Where the roll comes from and how its attributes are wired.
pub struct Definition<'a> {
    pub formula: Option<&'a str>,
    pub file: Option<&'a Path>,
    pub name: Option<&'a str>,
    pub primary: Option<&'a str>,
    pub secondary: Option<&'a str>,
    pub accumulate: bool,
}

pub fn run(
    definition: Definition<'_>,
    attributes: Vec<(String, i32)>,
    args: &RollArgs,
) -> Result<(), String> {
    let mut roll = load(&definition)?;
    if let Some(key) = definition.primary {
        roll = roll.with_primary(key);
    }
    if let Some(key) = definition.secondary {
        roll = roll.with_secondary(key);
    }
    if definition.accumulate {
        roll = roll.accumulating_crits();
    }
    roll.validate().map_err(|e| e.to_string())?;

    let attributes: Attributes = attributes.into_iter().collect();
    for key in [&roll.primary_attribute_key, &roll.secondary_attribute_key] {
        if !key.is_empty() && !attributes.contains(key) {
            tracing::warn!(key = %key, "attribute not given, counting it as 0");
        }
    }

    super::execute(RollRequest::custom(roll, attributes), args)
}

fn load(definition: &Definition<'_>) -> Result<CompositeRoll, String> {
    match (definition.formula, definition.file) {
        (Some(formula), _) => {
            let name = definition.name.unwrap_or("Custom");
            CompositeRoll::parse(name, formula).map_err(|e| e.to_string())
        }
        (None, Some(path)) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            let mut roll = CompositeRoll::from_json(&json)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            if let Some(name) = definition.name {
                roll.name = name.to_string();
            }
            Ok(roll)
        }
        (None, None) => Err("give a formula or --file".into()),
    }
}

/// Parse a `KEY=VALUE` attribute argument.
pub fn parse_attribute(arg: &str) -> Result<(String, i32), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing attribute name in '{arg}'"));
    }
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{}' is not a whole number", value.trim()))?;
    Ok((key.to_string(), value))
}
