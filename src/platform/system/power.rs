use battery::units::ratio::percent;
use battery::{Manager, State};

use crate::core::system_monitor::{BatteryReading, BatterySensor, BatteryStatus};

/// First battery reported by the OS, if any
pub struct SystemBatterySensor;

impl BatterySensor for SystemBatterySensor {
    fn read(&self) -> Option<BatteryReading> {
        let manager = Manager::new().ok()?;
        let mut batteries = manager.batteries().ok()?;
        let battery = batteries.next()?.ok()?;

        Some(BatteryReading {
            percent: Some(f64::from(battery.state_of_charge().get::<percent>())),
            status: Some(status_from_state(battery.state())),
        })
    }
}

/// Anything but an explicitly draining battery means external power
fn status_from_state(state: State) -> BatteryStatus {
    match state {
        State::Discharging | State::Empty => BatteryStatus::Discharging,
        _ => BatteryStatus::Charging,
    }
}
