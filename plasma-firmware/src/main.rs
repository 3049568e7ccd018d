//! Plasma - LCD plasma demo firmware
//!
//! Computes a static plasma field once at boot, then animates it forever by
//! cycling a rainbow palette through it on a 320x240 ILI9341 panel.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};
use embedded_alloc::LlffHeap as Heap;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use plasma_core::color::to_color;
use plasma_core::config::{parse_config, PlasmaConfig};
use plasma_core::splash::draw_splash;
use plasma_core::stats::CycleSummary;
use plasma_core::traits::DisplaySurface;
use plasma_core::{Animator, Dimensions, FrameBuffer, Palette, PlasmaField};
use plasma_drivers::display::ili9341::{HEIGHT, WIDTH};

use crate::board::Board;
use crate::channels::CYCLE_STATS;

mod board;
mod channels;
mod runtime;
mod tasks;

// Heap allocator for the plasma field
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 80KB (the field needs 75KB)
const HEAP_SIZE: usize = 80 * 1024;

/// Embedded configuration (compiled into firmware)
/// Edit plasma.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../plasma.toml");

const FRAME_PIXELS: usize = WIDTH as usize * HEIGHT as usize;

/// How often the monitor logs that it is alive
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

const SPLASH_COLOR: u16 = 0xFFFF;

// Frame buffer lives in .bss; building it on the stack would overflow
static FRAME: ConstStaticCell<[u16; FRAME_PIXELS]> = ConstStaticCell::new([0; FRAME_PIXELS]);

// Field and palette are read by the animation task for the program lifetime
static FIELD: StaticCell<PlasmaField> = StaticCell::new();
static PALETTE: StaticCell<Palette> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Plasma firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let Board {
        mut lcd,
        mut backlight,
    } = Board::new(p, config.display.spi_frequency_hz);

    if let Err(e) = lcd.init() {
        error!("LCD init failed: {}", e);
        defmt::panic!("display unavailable");
    }
    if let Err(e) = lcd.clear(config.display.clear_color) {
        warn!("LCD clear failed: {}", e);
    }
    if config.display.backlight {
        backlight.set_high();
    }
    info!("LCD initialized ({}x{})", WIDTH, HEIGHT);

    let (width, height) = lcd.size();
    let dims = unwrap!(Dimensions::new(width, height));
    let mut frame = unwrap!(FrameBuffer::new(dims, FRAME.take()));

    if config.splash.enabled {
        draw_splash(&mut frame, &config.splash.text, to_color(SPLASH_COLOR));
        if let Err(e) = lcd.present(0, 0, width, height, frame.pixels()) {
            warn!("Splash present failed: {}", e);
        }
    }

    // Seeding takes a while; this is what the splash covers
    let seed_start = Instant::now();
    let field = match PlasmaField::seed(dims) {
        Ok(field) => field,
        Err(e) => {
            error!("Plasma field seeding failed: {}", e);
            defmt::panic!("out of memory");
        }
    };
    info!(
        "Plasma field seeded in {} ms",
        seed_start.elapsed().as_millis()
    );

    let field = FIELD.init(field);
    let palette = PALETTE.init(Palette::default());
    let animator = unwrap!(Animator::new(field, palette, frame));

    spawner
        .spawn(tasks::animation_task(
            animator,
            lcd,
            config.animation.stats_every_cycles,
        ))
        .unwrap();

    info!("All tasks spawned, entering main loop");

    // Monitor: log cycle timing as it arrives, with a periodic heartbeat
    loop {
        match select(CYCLE_STATS.wait(), Timer::after(HEARTBEAT_INTERVAL)).await {
            Either::First((cycles, summary)) => log_cycle(cycles, &summary),
            Either::Second(()) => trace!("Main loop heartbeat"),
        }
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Parse the embedded configuration
///
/// Falls back to defaults if it does not parse or validate.
fn load_config() -> PlasmaConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid embedded config ({}), using defaults", e);
            return PlasmaConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("Config out of range ({}), using defaults", e);
        return PlasmaConfig::default();
    }

    info!(
        "Configuration loaded: spi={} Hz, stats every {} cycles",
        config.display.spi_frequency_hz, config.animation.stats_every_cycles
    );
    config
}

/// Log one palette cycle's timing
fn log_cycle(cycles: u32, summary: &CycleSummary) {
    let fps_x10 = summary.fps_x10();
    info!(
        "Cycle {}: {} frames in {} ms ({}.{} fps)",
        cycles,
        summary.frames,
        summary.elapsed_ms,
        fps_x10 / 10,
        fps_x10 % 10
    );
    info!(
        "  render avg {} ms (min {}, max {}), present avg {} ms (min {}, max {})",
        summary.render.average_ms(summary.frames),
        summary.render.min_ms,
        summary.render.max_ms,
        summary.present.average_ms(summary.frames),
        summary.present.min_ms,
        summary.present.max_ms
    );
}
