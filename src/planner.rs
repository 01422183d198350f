//! Setpoint planning: turns a partial cool/heat request into a pair the
//! device will accept, or rejects it before anything is written.

use std::future::Future;

use tracing::debug;

use crate::Result;
use crate::error::ValidationError;
use crate::types::{DeviceConstraints, SetpointPlan, SetpointRequest};

/// Checks that need no device state. Runs before any constraints lookup.
pub fn validate(request: &SetpointRequest) -> std::result::Result<(), ValidationError> {
    let request = SetpointRequest::new(request.cool, request.heat);

    if let (Some(cool), Some(heat)) = (request.cool, request.heat) {
        if cool == heat {
            return Err(ValidationError::InvalidSetpoints);
        }
        if cool < heat {
            return Err(ValidationError::CoolBelowHeat);
        }
    }
    Ok(())
}

/// Fills in missing sides from the device defaults and enforces range and delta.
///
/// Cool is resolved completely before heat: a defaulted cool is pushed up
/// against a caller-supplied heat, then a defaulted heat is pushed down
/// against the now-fixed cool.
pub fn resolve(
    request: &SetpointRequest,
    constraints: &DeviceConstraints,
) -> std::result::Result<SetpointPlan, ValidationError> {
    validate(request)?;
    let request = SetpointRequest::new(request.cool, request.heat);

    let cool = match request.cool {
        Some(cool) => cool,
        None => {
            let cool = constraints.current_cool;
            match request.heat {
                Some(heat) if cool - heat < constraints.min_delta => heat + constraints.min_delta,
                _ => cool,
            }
        }
    };

    let heat = match request.heat {
        Some(heat) => heat,
        None => {
            let heat = constraints.current_heat;
            if cool - heat < constraints.min_delta {
                cool - constraints.min_delta
            } else {
                heat
            }
        }
    };

    let in_range = |v: f64| v >= constraints.min && v <= constraints.max;
    if !in_range(cool) || !in_range(heat) {
        return Err(ValidationError::OutOfRange);
    }

    // Adjusted pairs already satisfy the delta; only a pair taken verbatim
    // from the caller can still be too close.
    if request.cool.is_some() && request.heat.is_some() && cool - heat < constraints.min_delta {
        return Err(ValidationError::InvalidSetpoints);
    }

    Ok(SetpointPlan { cool, heat })
}

/// Validates `request`, fetches a fresh constraints snapshot through `lookup`,
/// then resolves the final pair. `lookup` is not called when validation fails.
pub async fn plan<F, Fut>(request: &SetpointRequest, lookup: F) -> Result<SetpointPlan>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<DeviceConstraints>>,
{
    validate(request)?;
    let constraints = lookup().await?;
    let plan = resolve(request, &constraints)?;
    debug!(cool = plan.cool, heat = plan.heat, "setpoints planned");
    Ok(plan)
}
