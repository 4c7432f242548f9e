#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use avr_device::interrupt::{self, CriticalSection, Mutex};
use core::cell::{Cell, RefCell};
use panic_halt as _;

use stopwatch::{
    Control, Display, Stopwatch,
    board::{BoardClock, BoardDisplay, Clock, Delay, exint::ExtInts, timer::Timer},
    control::ExtInt,
    display::PinBus,
    hal,
    tick::TickConfig,
};

/// Period of the tick interrupt (in milliseconds).
const TICK_PERIOD_MS: u32 = 1000;

/// UART baud rate of the serial report.
#[cfg(feature = "serial-report")]
const BAUDRATE: u32 = 9600;

const TICK: TickConfig = match TickConfig::for_period(BoardClock::FREQ, TICK_PERIOD_MS) {
    Ok(config) => config,
    Err(_) => panic!("tick period out of range for TC1"),
};

/// Stopwatch state, written by every interrupt and by the main loop.
static STOPWATCH: Mutex<Cell<Stopwatch>> = Mutex::new(Cell::new(Stopwatch::new()));

/// Peripherals used from interrupt handlers, set once before interrupts are enabled.
static TICKER: Mutex<RefCell<Option<Timer>>> = Mutex::new(RefCell::new(None));
static EXINT: Mutex<RefCell<Option<ExtInts>>> = Mutex::new(RefCell::new(None));

/// Handle a button press on `line`.
fn on_button(cs: CriticalSection, line: ExtInt) {
    if let Some(exint) = EXINT.borrow(cs).borrow().as_ref() {
        exint.clear(line);
    }

    if let Some(timer) = TICKER.borrow(cs).borrow_mut().as_mut() {
        let cell = STOPWATCH.borrow(cs);
        let mut stopwatch = cell.get();
        Control::for_line(line).apply(&mut stopwatch, timer);
        cell.set(stopwatch);
    }
}

/// External interrupt INT0 (reset button).
#[avr_device::interrupt(atmega32a)]
fn INT0() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };
    on_button(cs, ExtInt::Int0);
}

/// External interrupt INT1 (pause button).
#[avr_device::interrupt(atmega32a)]
fn INT1() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };
    on_button(cs, ExtInt::Int1);
}

/// External interrupt INT2 (resume button).
#[avr_device::interrupt(atmega32a)]
fn INT2() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };
    on_button(cs, ExtInt::Int2);
}

/// TIMER1 compare interrupt.
/// This interrupt is called every time TCNT1 reaches OCR1A and is reset back to 0 (CTC mode).
/// TIMER1 is setup so this happens once a second.
#[avr_device::interrupt(atmega32a)]
fn TIMER1_COMPA() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };

    if let Some(timer) = TICKER.borrow(cs).borrow().as_ref() {
        timer.clear_match();
    }

    let cell = STOPWATCH.borrow(cs);
    let mut stopwatch = cell.get();
    stopwatch.tick();
    cell.set(stopwatch);
}

#[hal::entry]
fn main() -> ! {
    let dp = hal::Peripherals::take().unwrap();
    let pins = hal::pins!(dp);

    // BCD decoder inputs and digit enables.
    let digit = PinBus::new([
        pins.pc0.into_output().downgrade(),
        pins.pc1.into_output().downgrade(),
        pins.pc2.into_output().downgrade(),
        pins.pc3.into_output().downgrade(),
    ]);
    let enable = PinBus::new([
        pins.pa0.into_output().downgrade(),
        pins.pa1.into_output().downgrade(),
        pins.pa2.into_output().downgrade(),
        pins.pa3.into_output().downgrade(),
        pins.pa4.into_output().downgrade(),
        pins.pa5.into_output().downgrade(),
    ]);
    let mut display: BoardDisplay = Display::new(digit, enable, Delay::new());

    // Reset and resume buttons pull to ground, pause has a pull-down on the board.
    let _reset_button = pins.pd2.into_pull_up_input();
    let _pause_button = pins.pd3.into_floating_input();
    let _resume_button = pins.pb2.into_pull_up_input();

    #[cfg(feature = "serial-report")]
    let mut serial = stopwatch::board::usart::Usart::new(
        dp.USART,
        pins.pd0.into_pull_up_input(),
        pins.pd1.into_output(),
        BAUDRATE,
    );
    #[cfg(feature = "serial-report")]
    let mut reporter = stopwatch::report::Reporter::new();

    let mut exint = ExtInts::new(dp.EXINT);
    exint.configure().unwrap();

    // Set up TIMER1 for 1 second interrupts.
    let timer = Timer::new(dp.TC1, TICK);

    interrupt::free(|cs| {
        TICKER.borrow(cs).replace(Some(timer));
        EXINT.borrow(cs).replace(Some(exint));
    });

    // Enable interrupts.
    unsafe {
        // SAFETY: Not inside a critical section and any non-atomic operations have been completed
        // at this point.
        avr_device::interrupt::enable();
    }

    loop {
        // Normalize and copy the whole state at once so a button press can not
        // land between reading two fields.
        let time = interrupt::free(|cs| {
            let cell = STOPWATCH.borrow(cs);
            let mut stopwatch = cell.get();
            let time = stopwatch.normalize();
            cell.set(stopwatch);
            time
        });

        let Ok(()) = display.refresh(&time);

        #[cfg(feature = "serial-report")]
        reporter.update(time, &mut serial);
    }
}
