#![no_std]
#![no_main]

use alarm_clock::{AlarmTransition, EntryActivity, PollReport, SetTarget};
use defmt::{debug, info};
use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

fn log_report(report: &PollReport) {
    match report.entry {
        Some(EntryActivity::Started(target)) => info!("setting {} started", target),
        Some(EntryActivity::Edited { target, mode, time }) => {
            debug!("editing {} ({}): {}", target, mode, time)
        }
        Some(EntryActivity::Committed {
            target: SetTarget::Clock,
            time,
        }) => info!("clock set to {}", time),
        Some(EntryActivity::Committed {
            target: SetTarget::Alarm,
            time,
        }) => info!("alarm armed for {}", time),
        None => {}
    }

    match report.alarm {
        Some(AlarmTransition::Fired) => info!("alarm firing"),
        Some(AlarmTransition::Silenced) => info!("alarm silenced"),
        None => {}
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::*;
    use alarm_clock::config::{DISPLAY_DEVICES, DISPLAY_INTENSITY, INITIAL_TIME, TICK_PERIOD_US};
    use alarm_clock::{
        display, ActiveLevel, Button, ClockState, Coordinator, Debouncer, PendingEvents,
        SampleOutcome,
    };
    use defmt::{debug, info, trace, warn};
    use embedded_hal::digital::v2::OutputPin;
    use max7219::MAX7219;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{
            bank0::{Gpio16, Gpio17, Gpio18, Gpio19, Gpio25},
            DynPinId, FunctionSio, FunctionSpi, Interrupt::EdgeLow, Pin, PullDown, PullUp,
            SioInput, SioOutput,
        },
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    type Spi0 = Spi<
        rp_pico::hal::spi::Enabled,
        rp_pico::hal::pac::SPI0,
        (
            Pin<Gpio19, FunctionSpi, PullDown>,
            Pin<Gpio16, FunctionSpi, PullDown>,
            Pin<Gpio18, FunctionSpi, PullDown>,
        ),
    >;
    type CsPin = Pin<Gpio17, FunctionSio<SioOutput>, PullDown>;
    type DisplayType = MAX7219<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;

    /// Active-low button input, pin number erased so the three share a type.
    type ButtonPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
    type AlarmLed = Pin<Gpio25, FunctionSio<SioOutput>, PullDown>;

    #[shared]
    struct Shared {
        clock: ClockState,
        events: PendingEvents,
        // indexed by `Button::index`
        buttons: [ButtonPin; 3],
        debouncers: [Debouncer; 3],
        settle_alarm: Alarm1,
    }

    #[local]
    struct Local {
        display: DisplayType,
        tick_alarm: Alarm0,
        edge_timer: Timer,
        sample_timer: Timer,
        coordinator: Coordinator<AlarmLed>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        info!("alarm clock starting");

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            rp_pico::XOSC_CRYSTAL_FREQ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut tick_alarm = timer.alarm_0().unwrap();
        tick_alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        tick_alarm.enable_interrupt();

        let mut settle_alarm = timer.alarm_1().unwrap();
        settle_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let mut alarm_led = pins.led.into_push_pull_output();
        alarm_led.set_low().unwrap();

        let mut buttons: [ButtonPin; 3] = [
            pins.gpio15.into_pull_up_input().into_dyn_pin(),
            pins.gpio14.into_pull_up_input().into_dyn_pin(),
            pins.gpio13.into_pull_up_input().into_dyn_pin(),
        ];
        for pin in buttons.iter_mut() {
            pin.set_interrupt_enabled(EdgeLow, true);
        }

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut display = MAX7219::from_spi_cs(DISPLAY_DEVICES, spi, cs).unwrap();
        display.power_on().unwrap();
        for i in 0..DISPLAY_DEVICES {
            display.set_intensity(i, DISPLAY_INTENSITY).unwrap();
            display.clear_display(i).unwrap();
        }

        update_display::spawn().ok();

        (
            Shared {
                clock: ClockState::starting_at(INITIAL_TIME),
                events: PendingEvents::new(),
                buttons,
                debouncers: [Debouncer::new(); 3],
                settle_alarm,
            },
            Local {
                display,
                tick_alarm,
                edge_timer: timer,
                sample_timer: timer,
                coordinator: Coordinator::new(alarm_led),
            },
            init::Monotonics(),
        )
    }

    #[idle(shared = [clock, events], local = [coordinator])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let report = match ctx
                .local
                .coordinator
                .poll(&mut ctx.shared.clock, &mut ctx.shared.events)
            {
                Ok(report) => report,
                Err(never) => match never {},
            };

            if !report.is_quiet() {
                log_report(&report);
                update_display::spawn().ok();
            }

            // Producers `sev` after publishing, so nothing raised since the
            // poll above can be slept through.
            cortex_m::asm::wfe();
        }
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock], local = [tick_alarm])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        ctx.local.tick_alarm.clear_interrupt();
        if ctx.local.tick_alarm.schedule(TICK_PERIOD_US.micros()).is_err() {
            warn!("failed to reschedule tick");
        }

        let now = ctx.shared.clock.lock(|c| {
            c.tick();
            c.current()
        });
        trace!("tick {}", now);

        update_display::spawn().ok();
        cortex_m::asm::sev();
    }

    // Hardware Task: GPIO Interrupt (falling edge on any button)
    #[task(
        binds = IO_IRQ_BANK0,
        priority = 1,
        shared = [buttons, debouncers, settle_alarm],
        local = [edge_timer]
    )]
    fn button_edge(ctx: button_edge::Context) {
        let mut buttons = ctx.shared.buttons;
        let mut debouncers = ctx.shared.debouncers;
        let mut settle_alarm = ctx.shared.settle_alarm;
        let now = ctx.local.edge_timer.get_counter().ticks();

        // Each pin stays masked from its first edge until the debouncer sees it released.
        let next_sample = buttons.lock(|pins| {
            debouncers.lock(|debouncers| {
                let mut needs_settle = false;
                for (pin, debouncer) in pins.iter_mut().zip(debouncers.iter_mut()) {
                    if pin.interrupt_status(EdgeLow) {
                        pin.set_interrupt_enabled(EdgeLow, false);
                        pin.clear_interrupt(EdgeLow);
                        needs_settle |= debouncer.on_edge(now);
                    }
                }
                if needs_settle {
                    next_sample_in(debouncers, now)
                } else {
                    None
                }
            })
        });

        if let Some(us) = next_sample {
            settle_alarm.lock(|a| {
                a.clear_interrupt();
                a.schedule(us.micros()).ok();
            });
        }
    }

    // Hardware Task: debounce settle / release sampling (Timer 1)
    #[task(
        binds = TIMER_IRQ_1,
        priority = 1,
        shared = [buttons, debouncers, settle_alarm, events],
        local = [sample_timer]
    )]
    fn debounce_sample(ctx: debounce_sample::Context) {
        let mut buttons = ctx.shared.buttons;
        let mut debouncers = ctx.shared.debouncers;
        let mut settle_alarm = ctx.shared.settle_alarm;
        let mut events = ctx.shared.events;

        settle_alarm.lock(|a| a.clear_interrupt());
        let now = ctx.local.sample_timer.get_counter().ticks();

        let mut confirmed = [false; 3];
        let next_sample = buttons.lock(|pins| {
            debouncers.lock(|debouncers| {
                for button in Button::ALL {
                    let i = button.index();
                    let (pin, debouncer) = (&mut pins[i], &mut debouncers[i]);
                    if !debouncer.needs_sample() {
                        continue;
                    }

                    let asserted = ActiveLevel::Low.is_asserted(&*pin).unwrap_or(false);
                    let outcome = debouncer.on_sample(asserted, now);
                    confirmed[i] = outcome == SampleOutcome::Confirmed;
                    if outcome.rearms() {
                        pin.clear_interrupt(EdgeLow);
                        pin.set_interrupt_enabled(EdgeLow, true);
                    }
                }
                next_sample_in(debouncers, now)
            })
        });

        for button in Button::ALL {
            if confirmed[button.index()] {
                debug!("{} pressed", button);
                events.lock(|e| e.raise(button));
                cortex_m::asm::sev();
            }
        }

        if let Some(us) = next_sample {
            settle_alarm.lock(|a| {
                a.schedule(us.micros()).ok();
            });
        }
    }

    /// Earliest sample any button still wants, in microseconds from `now`.
    fn next_sample_in(debouncers: &[Debouncer; 3], now: u64) -> Option<u32> {
        debouncers
            .iter()
            .filter_map(|d| d.sample_due_in(now))
            .min()
    }

    // Software Task: Update Display
    #[task(shared = [clock], local = [display])]
    fn update_display(mut ctx: update_display::Context) {
        let buffers = ctx
            .shared
            .clock
            .lock(|c| display::prepare_buffer(&c.display_time()));

        let display = ctx.local.display;
        for (dev_idx, buffer) in buffers.iter().enumerate() {
            if display.write_raw(dev_idx, buffer).is_err() {
                warn!("display write failed on device {}", dev_idx);
                break;
            }
        }
    }
}
