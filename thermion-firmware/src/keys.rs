//! Thermostat key schema
//!
//! Key numbering shared with the gateway. The gateway owns every value;
//! the panel mirrors the temperature keys and writes commands through
//! the action key.

use thermion_protocol::Key;

/// Command slot written by the panel (Text)
pub const ACTION: Key = 0;

/// Measured room temperature in whole degrees (Int)
pub const CURRENT_TEMP: Key = 20;

/// Cooling setpoint in whole degrees (Int)
pub const COOL_SETPOINT: Key = 21;

/// Heating setpoint in whole degrees (Int)
pub const HEAT_SETPOINT: Key = 22;

/// Command asking the gateway to resend every tracked value
pub const REFRESH_COMMAND: &str = "refresh";
