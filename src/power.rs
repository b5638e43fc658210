//! Deep sleep - nRF52840 System OFF with GPIO level wake.
//!
//! System OFF draws ~0.3 µA and destroys all volatile state; the next press
//! of the yes button is a full reset, not a resume. The wake source is a
//! level-low SENSE on the yes pin, armed immediately before power-down.
//!
//! Register access goes through the PAC (the `unstable-pac` feature of
//! `embassy-nrf`) because the GPIO driver does not expose SENSE or the
//! POWER peripheral.

use embassy_nrf::pac;

/// Arm wake-on-low for the given port-0 pin and enter System OFF.
///
/// Does not return. The wakeup path is a cold boot.
pub fn enter_system_off(wake_pin: usize) -> ! {
    defmt::info!("entering System OFF, wake on P0.{}", wake_pin);

    // Wake pin: input, pulled up, sense low. The button shorts to ground.
    pac::P0.pin_cnf(wake_pin).write(|w| {
        w.set_dir(pac::gpio::vals::Dir::INPUT);
        w.set_input(pac::gpio::vals::Input::CONNECT);
        w.set_pull(pac::gpio::vals::Pull::PULLUP);
        w.set_sense(pac::gpio::vals::Sense::LOW);
    });

    pac::POWER.systemoff().write(|w| w.set_systemoff(true));

    // System OFF is emulated under a debugger; spin on WFE either way.
    loop {
        cortex_m::asm::wfe();
    }
}
