use crate::config::FlockConfig;
use anyhow::{anyhow, Error};
use std::error;
use std::fmt;

#[derive(PartialEq, Debug)]
pub(crate) enum CreationError {
    FactorShouldBeMoreThanZero(String),
    FactorShouldBeLessThanOne(String),
    VisibleRangeIsSmallerThanProtectedRange,
    MinSpeedIsAboveMaxSpeed,
    ExtentShouldBePositive(String),
    ValueShouldNotBeNegative(String),
    FlutterBoundsAreInvalid,
    ValueIsNotFinite(String),
}

// This is required so that `CreationError` can implement `error::Error`.
impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            CreationError::FactorShouldBeMoreThanZero(factor_name) => {
                factor_name.to_owned() + " factor is negative"
            }
            CreationError::FactorShouldBeLessThanOne(factor_name) => {
                factor_name.to_owned() + " factor is too large and should be at most one"
            }
            CreationError::VisibleRangeIsSmallerThanProtectedRange => {
                "visible range is smaller than protected range".to_owned()
            }
            CreationError::MinSpeedIsAboveMaxSpeed => {
                "min speed is above max speed".to_owned()
            }
            CreationError::ExtentShouldBePositive(extent_name) => {
                extent_name.to_owned() + " of the domain should be positive"
            }
            CreationError::ValueShouldNotBeNegative(value_name) => {
                value_name.to_owned() + " is negative"
            }
            CreationError::FlutterBoundsAreInvalid => {
                "flutter bounds should satisfy 0 <= min <= max".to_owned()
            }
            CreationError::ValueIsNotFinite(value_name) => {
                value_name.to_owned() + " is not a finite number"
            }
        };
        f.write_str(&description)
    }
}

impl error::Error for CreationError {}

fn check_float_between_zero_and_one(value: f32, name: &str) -> Option<CreationError> {
    match value {
        x if x < 0.0 => Some(CreationError::FactorShouldBeMoreThanZero(name.to_string())),
        x if x > 1.0 => Some(CreationError::FactorShouldBeLessThanOne(name.to_string())),
        _ => None,
    }
}

pub(crate) fn validate_factors(
    avoid_factor: f32,
    matching_factor: f32,
    centering_factor: f32,
) -> Vec<CreationError> {
    let avoid = check_float_between_zero_and_one(avoid_factor, "avoid");
    let matching = check_float_between_zero_and_one(matching_factor, "matching");
    let centering = check_float_between_zero_and_one(centering_factor, "centering");

    [avoid, matching, centering]
        .into_iter()
        .flatten()
        .collect()
}

pub(crate) fn validate_ranges(protected_range: f32, visible_range: f32) -> Option<CreationError> {
    if protected_range > visible_range {
        return Some(CreationError::VisibleRangeIsSmallerThanProtectedRange);
    }
    return None;
}

pub(crate) fn validate_speeds(min_speed: f32, max_speed: f32) -> Option<CreationError> {
    if min_speed > max_speed {
        return Some(CreationError::MinSpeedIsAboveMaxSpeed);
    }
    return None;
}

pub(crate) fn validate_extents(width: f32, height: f32, depth: f32) -> Vec<CreationError> {
    [("width", width), ("height", height), ("depth", depth)]
        .into_iter()
        .filter(|(_, extent)| *extent <= 0.0)
        .map(|(name, _)| CreationError::ExtentShouldBePositive(name.to_string()))
        .collect()
}

/// NaN and infinity slip past every ordering check below, so they are caught here first
pub(crate) fn validate_finite(config: &FlockConfig) -> Vec<CreationError> {
    [
        ("width", config.width),
        ("height", config.height),
        ("depth", config.depth),
        ("min speed", config.min_speed),
        ("max speed", config.max_speed),
        ("margin", config.margin),
        ("front margin", config.front_margin),
        ("turn factor", config.turn_factor),
        ("protected range", config.protected_range),
        ("visible range", config.visible_range),
        ("avoid factor", config.avoid_factor),
        ("matching factor", config.matching_factor),
        ("centering factor", config.centering_factor),
        ("min flutter", config.min_flutter),
        ("max flutter", config.max_flutter),
        ("spawn depth speed", config.max_spawn_depth_speed),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_finite())
    .map(|(name, _)| CreationError::ValueIsNotFinite(name.to_string()))
    .collect()
}

fn validate_non_negative(config: &FlockConfig) -> Vec<CreationError> {
    [
        ("margin", config.margin),
        ("front margin", config.front_margin),
        ("turn factor", config.turn_factor),
        ("spawn depth speed", config.max_spawn_depth_speed),
    ]
    .into_iter()
    .filter(|(_, value)| *value < 0.0)
    .map(|(name, _)| CreationError::ValueShouldNotBeNegative(name.to_string()))
    .collect()
}

pub(crate) fn validate_flutter(min_flutter: f32, max_flutter: f32) -> Option<CreationError> {
    if min_flutter < 0.0 || min_flutter > max_flutter {
        return Some(CreationError::FlutterBoundsAreInvalid);
    }
    return None;
}

/// Collects every problem with a config rather than stopping at the first one
pub(crate) fn validate_config(config: &FlockConfig) -> Result<(), InvalidFlockConfig> {
    let mut errors = validate_finite(config);
    errors.extend(validate_factors(
        config.avoid_factor,
        config.matching_factor,
        config.centering_factor,
    ));
    errors.extend(validate_extents(config.width, config.height, config.depth));
    errors.extend(validate_non_negative(config));
    errors.extend(validate_ranges(config.protected_range, config.visible_range));
    errors.extend(validate_speeds(config.min_speed, config.max_speed));
    errors.extend(validate_flutter(config.min_flutter, config.max_flutter));

    if !errors.is_empty() {
        return Err(InvalidFlockConfig { errors });
    }
    return Ok(());
}

#[derive(Debug)]
pub(crate) struct InvalidFlockConfig {
    pub(crate) errors: Vec<CreationError>,
}

impl From<InvalidFlockConfig> for Error {
    fn from(invalid_flock_config: InvalidFlockConfig) -> Self {
        anyhow!("Invalid Flock input: {:?}", invalid_flock_config.errors)
    }
}
