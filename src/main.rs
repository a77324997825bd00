#![no_std]
#![no_main]
use panic_halt as _;

use arduino_hal::port::{mode, Pin};
use embedded_hal::serial::Read;
use shift_register::{Button, Config, Event, Gamepad, Mode, Pins, ShiftRegister};

type OutputPin = Pin<mode::Output>;
type InputPin = Pin<mode::Input<mode::Floating>>;

/// Milliseconds between two controller polls.
const POLL_INTERVAL_MS: u16 = 20;

enum Command {
    NoOp,
    ToggleInvert,
    ToggleDisplay,
}

impl Command {
    fn from_u8(value: u8) -> Command {
        match value {
            b'i' => Command::ToggleInvert,
            b'c' => Command::ToggleDisplay,
            _ => Command::NoOp,
        }
    }
}

fn led_pattern(button: Option<Button>) -> u32 {
    match button {
        Some(button) => 1 << (button as u32),
        None => 0,
    }
}

#[arduino_hal::entry]
fn main() -> ! {
    let peripherals = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(peripherals);
    let mut serial = arduino_hal::default_serial!(peripherals, pins, 57600);

    /* DE9 controller: data on pin 2, latch on pin 3, clock on pin 4 */
    let mut pad: Gamepad<OutputPin, OutputPin, InputPin, _, _> = Gamepad::new(
        pins.d4.into_output().downgrade(),
        pins.d3.into_output().downgrade(),
        pins.d2.into_floating_input().downgrade(),
        arduino_hal::Delay::new(),
    )
    .unwrap();

    let mut leds = ShiftRegister::new(
        Config::new(Mode::WriteOnly, 1),
        Pins::output(
            pins.d12.into_output().downgrade(),
            pins.d11.into_output().downgrade(),
            pins.d10.into_output().downgrade(),
        ),
        arduino_hal::Delay::new(),
    )
    .unwrap();

    let mut last = Event::Idle;
    let mut display = true;
    loop {
        let event = match pad.poll() {
            Ok(event) => event,
            Err(never) => match never {},
        };
        if event != last {
            if let Err(never) = ufmt::uwriteln!(&mut serial, "{:?} ({})\r", event, pad.raw()) {
                match never {}
            }
            last = event;
        }

        let command = match serial.read() {
            Ok(b) => Command::from_u8(b),
            Err(nb::Error::WouldBlock) => Command::NoOp,
            Err(nb::Error::Other(never)) => match never {},
        };

        match command {
            Command::ToggleInvert => leds.invert_output = !leds.invert_output,
            Command::ToggleDisplay => display = !display,
            Command::NoOp => (),
        }

        let result = if display {
            leds.output = led_pattern(pad.held_button());
            leds.write()
        } else {
            leds.fill(false)
        };
        if let Err(never) = result {
            match never {}
        }

        arduino_hal::delay_ms(POLL_INTERVAL_MS);
    }
}
