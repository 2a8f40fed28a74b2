//! Panel UI state
//!
//! Tracks the dashboard readings and bridges synchronizer callbacks into
//! the display task's channel.

use defmt::*;

use thermion_core::sync::{SyncError, SyncObserver};
use thermion_protocol::{Key, Value};

use crate::channels::VALUE_CHANGES;
use crate::keys;

/// Cached dashboard readings
///
/// Each field stays `None` until the gateway reports a change for it.
pub struct Dashboard {
    pub current: Option<i32>,
    pub heat: Option<i32>,
    pub cool: Option<i32>,
}

impl Dashboard {
    /// Create an empty dashboard
    pub const fn new() -> Self {
        Self {
            current: None,
            heat: None,
            cool: None,
        }
    }

    /// Apply a value change
    ///
    /// Returns true when the key drives one of the dashboard fields.
    /// Non-integer payloads for temperature keys are ignored.
    pub fn apply(&mut self, key: Key, value: &Value) -> bool {
        match (key, value.as_int()) {
            (keys::CURRENT_TEMP, Some(temp)) => {
                self.current = Some(temp);
                true
            }
            (keys::HEAT_SETPOINT, Some(temp)) => {
                self.heat = Some(temp);
                true
            }
            (keys::COOL_SETPOINT, Some(temp)) => {
                self.cool = Some(temp);
                true
            }
            _ => false,
        }
    }
}

/// Synchronizer observer that feeds the firmware channels
///
/// Changed values go to the display task. Sync faults are logged; the
/// cache itself already kept the last good state.
pub struct PanelObserver;

impl SyncObserver for PanelObserver {
    fn value_changed(&mut self, key: Key, value: &Value) {
        if VALUE_CHANGES.try_send((key, value.clone())).is_err() {
            warn!("Value channel full, dropping update for key {}", key);
        }
    }

    fn sync_error(&mut self, error: SyncError) {
        warn!("Sync error: {:?}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_temperature_keys() {
        let mut dash = Dashboard::new();

        assert!(dash.apply(keys::CURRENT_TEMP, &Value::Int(72)));
        assert!(dash.apply(keys::HEAT_SETPOINT, &Value::Int(68)));
        assert!(dash.apply(keys::COOL_SETPOINT, &Value::Int(75)));

        assert_eq!(dash.current, Some(72));
        assert_eq!(dash.heat, Some(68));
        assert_eq!(dash.cool, Some(75));
    }

    #[test]
    fn test_apply_ignores_other_keys() {
        let mut dash = Dashboard::new();
        assert!(!dash.apply(keys::ACTION, &Value::Int(1)));
        assert!(dash.current.is_none());
    }

    #[test]
    fn test_apply_ignores_wrong_variant() {
        let mut dash = Dashboard::new();
        let text = Value::from_ref(&thermion_protocol::ValueRef::Text("72")).unwrap();
        assert!(!dash.apply(keys::CURRENT_TEMP, &text));
        assert!(dash.current.is_none());
    }
}
