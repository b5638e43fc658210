//! Valentine proposal box firmware.
//!
//! One cooperative control loop, no interrupts for input:
//! sample buttons → debounce → feed the state machine (which may run a
//! blocking reveal) → check time-based transitions → paint one LED frame
//! for the resulting state → sleep ~10 ms → repeat. The blocking boot,
//! reveal and shutdown sequences keep animating by calling the render
//! engine inline at their own sub-step rate; button input is deliberately
//! not polled during them.

#![no_std]
#![no_main]

mod config;
mod debounce;
mod error;
mod leds;
mod power;
mod power_logic;
mod render;
mod session;
mod storage;
mod ui;

use defmt::info;
use defmt_rtt as _;
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};
use embedded_hal::spi::SpiBus;
use panic_probe as _;
use smart_leds::RGB8;
use static_cell::StaticCell;

use config::{
    BODY_ACTIVE_LEDS, BODY_PHYSICAL_LEDS, BUTTON_LEDS, CENTER_LAMP, NO_LAMP, REVEAL_DURATION_MS,
    REVEAL_FRAME_MS, STRIP_BRIGHTNESS, TICK_MS, WAKE_PIN, YES_LAMP,
};
use debounce::Debouncer;
use leds::Strip;
use session::{Effect, Session, Tick};
use ui::display::Display;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<peripherals::SPI2>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn spi_config() -> spim::Config {
    let mut cfg = spim::Config::default();
    // 4 MHz puts the pre-rendered 4-bits-per-bit stream inside WS2812 timing.
    cfg.frequency = spim::Frequency::M4;
    cfg
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("valentine-box starting");

    // Boot counter first, while nothing else touches flash.
    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let boot_count = storage::increment_boot_count(&mut flash).await;
    info!("boot #{}", boot_count);

    // OLED over I²C.
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = ui::display::init(i2c);

    // The two WS2812 strips, one SPIM each (MOSI only).
    static LAMP_BUF: StaticCell<[u8; leds::spi_buffer_len(BUTTON_LEDS)]> = StaticCell::new();
    static BODY_BUF: StaticCell<[u8; leds::spi_buffer_len(BODY_PHYSICAL_LEDS)]> = StaticCell::new();

    let lamp_spi = Spim::new_txonly_nosck(p.SPI2, Irqs, p.P0_13, spi_config());
    let body_spi = Spim::new_txonly_nosck(p.SPI3, Irqs, p.P0_14, spi_config());
    let mut lamp_strip = Strip::new(lamp_spi, LAMP_BUF.init([0; leds::spi_buffer_len(BUTTON_LEDS)]));
    let mut body_strip = Strip::new(
        body_spi,
        BODY_BUF.init([0; leds::spi_buffer_len(BODY_PHYSICAL_LEDS)]),
    );
    let _ = lamp_strip.clear(BUTTON_LEDS);
    let _ = body_strip.clear(BODY_PHYSICAL_LEDS);

    let buttons = ui::buttons::Buttons::new(p.P0_11.degrade(), p.P0_12.degrade());

    ui::display::draw_boot_splash(&mut display, boot_count);
    Timer::after_millis(500).await;
    boot_sequence(&mut display, &mut lamp_strip, &mut body_strip).await;

    // Session and debouncer start from the post-boot moment so a button
    // held through the boot wipe does not count as an answer.
    let now = now_ms();
    let (raw_yes, raw_no) = buttons.sample();
    let mut debouncer = Debouncer::new(raw_yes, raw_no, now);
    let mut session = Session::new(now);

    let mut body = [RGB8::default(); BODY_PHYSICAL_LEDS];
    let mut lamps = [RGB8::default(); BUTTON_LEDS];

    loop {
        // 1. Input: sample, debounce, resolve any transition completely
        //    (including the blocking reveal) before this tick's frame.
        let (raw_yes, raw_no) = buttons.sample();
        if let Some(button) = debouncer.poll(raw_yes, raw_no, now_ms()) {
            info!("press: {:?}", button);
            match session.handle_press(button, now_ms()) {
                Effect::None => {}
                Effect::Show(screen) => ui::display::draw_screen(&mut display, screen),
                Effect::BeginReveal => {
                    reveal_pause(
                        &mut session,
                        &mut display,
                        &mut lamp_strip,
                        &mut body_strip,
                    )
                    .await;
                    let (ry, rn) = buttons.sample();
                    debouncer.resync(ry, rn, now_ms());
                }
                Effect::ResetVisuals => {
                    boot_sequence(&mut display, &mut lamp_strip, &mut body_strip).await;
                    let (ry, rn) = buttons.sample();
                    debouncer.resync(ry, rn, now_ms());
                }
            }
            info!("state: {:?}", session.state());
        }

        // 2. Time-based transitions.
        match session.tick(now_ms()) {
            Tick::None => {}
            Tick::CelebrationExpired => {
                info!("celebration over, back to the question");
                boot_sequence(&mut display, &mut lamp_strip, &mut body_strip).await;
                let (ry, rn) = buttons.sample();
                debouncer.resync(ry, rn, now_ms());
            }
            Tick::SleepReady => {
                shutdown(&mut display, &mut lamp_strip, &mut body_strip).await;
            }
        }

        // 3. Paint one frame for the (possibly new) state.
        let state = session.state();
        let now = now_ms();
        render::body_frame(&state, now, &mut body);
        render::button_frame(&state, now, &mut lamps);
        let _ = body_strip.write(&body);
        let _ = lamp_strip.write(&lamps);

        // 4. Bound the polling rate.
        Timer::after_millis(TICK_MS).await;
    }
}

/// Boot visuals: body wipe, center lamp pulse, red/green fade-in, then the
/// ask screen. Blocking; input is not polled until it finishes.
async fn boot_sequence<I2C, S1, S2>(
    display: &mut Display<I2C>,
    lamp_strip: &mut Strip<'_, S1>,
    body_strip: &mut Strip<'_, S2>,
) where
    I2C: embedded_hal::i2c::I2c,
    S1: SpiBus<u8>,
    S2: SpiBus<u8>,
{
    ui::display::clear(display);
    lamp_strip.set_brightness(STRIP_BRIGHTNESS);
    body_strip.set_brightness(STRIP_BRIGHTNESS);

    // Soft pink wash, one pixel at a time.
    let mut body = [RGB8::default(); BODY_PHYSICAL_LEDS];
    for i in 0..BODY_ACTIVE_LEDS {
        body[i] = RGB8 { r: 180, g: 50, b: 80 };
        let _ = body_strip.write(&body);
        Timer::after_millis(40).await;
    }

    // Wake the center lamp, then hand the glow to the two answer lamps.
    let mut lamps = [RGB8::default(); BUTTON_LEDS];
    for v in (0..200u8).step_by(5) {
        lamps[CENTER_LAMP] = RGB8 { r: v, g: v / 2, b: v / 2 };
        let _ = lamp_strip.write(&lamps);
        Timer::after_millis(5).await;
    }
    lamps[CENTER_LAMP] = RGB8::default();

    for v in (0..=250u8).step_by(5) {
        lamps[NO_LAMP] = RGB8 { r: v, g: 0, b: 0 };
        lamps[YES_LAMP] = RGB8 { r: 0, g: v, b: 0 };
        let _ = lamp_strip.write(&lamps);
        Timer::after_millis(5).await;
    }

    ui::display::draw_screen(display, &config::SCREEN_ASK);
}

/// The blocking gotcha pause: claim "You pressed YES!", force-paint the
/// swapped lamp colors before the first sub-step so they are visible the
/// instant the text lands, keep the body breathing, then move the session
/// on to the fair question.
async fn reveal_pause<I2C, S1, S2>(
    session: &mut Session,
    display: &mut Display<I2C>,
    lamp_strip: &mut Strip<'_, S1>,
    body_strip: &mut Strip<'_, S2>,
) where
    I2C: embedded_hal::i2c::I2c,
    S1: SpiBus<u8>,
    S2: SpiBus<u8>,
{
    let state = session.state();
    let mut lamps = [RGB8::default(); BUTTON_LEDS];
    let mut body = [RGB8::default(); BODY_PHYSICAL_LEDS];

    render::button_frame(&state, now_ms(), &mut lamps);
    let _ = lamp_strip.write(&lamps);
    ui::display::draw_screen(display, &config::SCREEN_PRESSED_YES);

    for _ in 0..(REVEAL_DURATION_MS / REVEAL_FRAME_MS) {
        let now = now_ms();
        render::body_frame(&state, now, &mut body);
        render::button_frame(&state, now, &mut lamps);
        let _ = body_strip.write(&body);
        let _ = lamp_strip.write(&lamps);
        Timer::after_millis(REVEAL_FRAME_MS).await;
    }

    if let Effect::Show(screen) = session.finish_reveal(now_ms()) {
        ui::display::draw_screen(display, screen);
    }
}

/// Goodnight fade, then System OFF. Never returns; the next press of the
/// yes button cold-boots the firmware.
async fn shutdown<I2C, S1, S2>(
    display: &mut Display<I2C>,
    lamp_strip: &mut Strip<'_, S1>,
    body_strip: &mut Strip<'_, S2>,
) -> !
where
    I2C: embedded_hal::i2c::I2c,
    S1: SpiBus<u8>,
    S2: SpiBus<u8>,
{
    info!("inactivity timeout, going to sleep");
    ui::display::draw_screen(display, &config::SCREEN_GOODNIGHT);

    let mut body = [RGB8::default(); BODY_PHYSICAL_LEDS];
    for px in body.iter_mut().take(BODY_ACTIVE_LEDS) {
        *px = RGB8 { r: 150, g: 0, b: 50 };
    }
    let mut lamps = [RGB8::default(); BUTTON_LEDS];
    render::button_frame(&session::State::Idle, now_ms(), &mut lamps);

    for level in (0..=STRIP_BRIGHTNESS).rev().step_by(5) {
        lamp_strip.set_brightness(level);
        body_strip.set_brightness(level);
        let _ = body_strip.write(&body);
        let _ = lamp_strip.write(&lamps);
        Timer::after_millis(20).await;
    }

    let _ = lamp_strip.clear(BUTTON_LEDS);
    let _ = body_strip.clear(BODY_PHYSICAL_LEDS);
    ui::display::clear(display);
    Timer::after_millis(100).await;

    power::enter_system_off(WAKE_PIN)
}
